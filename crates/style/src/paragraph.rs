use crate::font::FontWeight;
use crate::text::TextAlign;
use assessor_types::Color;
use serde::{Deserialize, Serialize};

pub const DEFAULT_FONT_FAMILY: &str = "Helvetica";

/// A fully resolved paragraph style.
///
/// Unlike cascading element styles every field is concrete, so a style can be
/// handed to the renderer as-is. Styles are built once and shared behind an
/// `Arc` by every paragraph that uses them.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ParagraphStyle {
    pub font_family: String,
    pub font_weight: FontWeight,
    pub font_size: f32,
    /// Distance between consecutive baselines.
    pub leading: f32,
    pub color: Color,
    pub text_align: TextAlign,
    pub left_indent: f32,
    pub space_before: f32,
    pub space_after: f32,
}

impl Default for ParagraphStyle {
    fn default() -> Self {
        Self {
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_weight: FontWeight::Regular,
            font_size: 10.0,
            leading: 12.0,
            color: Color::BLACK,
            text_align: TextAlign::Left,
            left_indent: 0.0,
            space_before: 0.0,
            space_after: 0.0,
        }
    }
}

impl ParagraphStyle {
    /// A regular-weight style of the given size with the usual 1.2 leading.
    pub fn sized(font_size: f32) -> Self {
        Self {
            font_size,
            leading: font_size * 1.2,
            ..Self::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.font_weight = FontWeight::Bold;
        self
    }

    pub fn family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    pub fn leading(mut self, leading: f32) -> Self {
        self.leading = leading;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.text_align = align;
        self
    }

    pub fn indent(mut self, left_indent: f32) -> Self {
        self.left_indent = left_indent;
        self
    }

    pub fn spacing(mut self, before: f32, after: f32) -> Self {
        self.space_before = before;
        self.space_after = after;
        self
    }
}
