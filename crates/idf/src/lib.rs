//! Intermediate Document Format (IDF)
//!
//! The linear sequence of content blocks handed to the renderer. Blocks carry
//! resolved styles and explicit geometry hints; they know nothing about pages.

mod table;

pub use table::{
    CellAttributes, CellRange, CellSpan, LineStyle, Table, TableCell, TableCommand, TableStyle,
};

use assessor_style::ParagraphStyle;
use assessor_types::{Color, RasterImage};
use std::sync::Arc;

/// One unit of document content.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
    Spacer(Spacer),
    /// A hard page break. Ignored when the current page is still empty.
    PageBreak,
    Drawing(Drawing),
    Image(ImageBlock),
}

impl Block {
    pub fn spacer(width: f32, height: f32) -> Self {
        Block::Spacer(Spacer { width, height })
    }

    /// The text of a paragraph block, if this is one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Block::Paragraph(p) => Some(&p.text),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Block::Table(t) => Some(t),
            _ => None,
        }
    }
}

impl From<Paragraph> for Block {
    fn from(p: Paragraph) -> Self {
        Block::Paragraph(p)
    }
}

impl From<Table> for Block {
    fn from(t: Table) -> Self {
        Block::Table(t)
    }
}

impl From<Drawing> for Block {
    fn from(d: Drawing) -> Self {
        Block::Drawing(d)
    }
}

impl From<ImageBlock> for Block {
    fn from(i: ImageBlock) -> Self {
        Block::Image(i)
    }
}

/// A run of text set in a single style. Explicit `\n` characters force line breaks.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub text: String,
    pub style: Arc<ParagraphStyle>,
    /// Optional URI the paragraph links to.
    pub href: Option<String>,
}

impl Paragraph {
    pub fn new(text: impl Into<String>, style: Arc<ParagraphStyle>) -> Self {
        Self {
            text: text.into(),
            style,
            href: None,
        }
    }

    pub fn with_link(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacer {
    pub width: f32,
    pub height: f32,
}

/// A vector placeholder for an image that is not part of the report data:
/// a rounded box with a centered caption.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawing {
    pub width: f32,
    pub height: f32,
    pub corner_radius: f32,
    pub fill: Color,
    pub stroke: Color,
    pub stroke_width: f32,
    pub label: String,
    pub label_size: f32,
    pub label_color: Color,
}

/// A raster image scaled to a fixed box.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBlock {
    pub image: Arc<RasterImage>,
    pub width: f32,
    pub height: f32,
}
