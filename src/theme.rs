//! Report palette and named paragraph styles.

use assessor_style::{ParagraphStyle, StyleRegistry, TextAlign};
use assessor_types::Color;
use std::sync::Arc;

pub const SECTION_HEADER: &str = "section-header";
pub const SPECIAL_SECTION_HEADER: &str = "special-section-header";
pub const SUBSECTION_HEADER: &str = "subsection-header";
pub const CELL: &str = "cell";
pub const REPORT_TITLE: &str = "report-title";
pub const REPORT_SUBTITLE: &str = "report-subtitle";
pub const BRAND: &str = "brand";
pub const FOOTER_COMPANY: &str = "footer-company";
pub const FOOTER_ADDRESS: &str = "footer-address";
pub const FOOTER_LINK: &str = "footer-link";
pub const PAGE_NUMBER: &str = "page-number";
pub const QR_FALLBACK: &str = "qr-fallback";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub primary: Color,
    /// Table header background and header frame.
    pub header_accent: Color,
    /// Zebra stripes and emphasized rows.
    pub neutral: Color,
    pub grid: Color,
    pub muted_text: Color,
    pub link: Color,
    pub placeholder_fill: Color,
    pub placeholder_stroke: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: Color::rgb(0x01, 0x53, 0x86),
            header_accent: Color::rgb(0xFA, 0xC6, 0x1C),
            neutral: Color::rgb(0xF3, 0xF4, 0xF6),
            grid: Color::rgb(0xB0, 0xB0, 0xB0),
            muted_text: Color::GRAY,
            link: Color::BLUE,
            placeholder_fill: Color::gray_level(0.95),
            placeholder_stroke: Color::gray_level(0.7),
        }
    }
}

/// The palette plus every named style the report uses. Built once per
/// generator and only read afterwards.
#[derive(Debug, Clone)]
pub struct Theme {
    pub palette: Palette,
    styles: StyleRegistry,
}

impl Default for Theme {
    fn default() -> Self {
        Self::standard()
    }
}

impl Theme {
    pub fn standard() -> Self {
        Self::with_palette(Palette::default())
    }

    pub fn with_palette(palette: Palette) -> Self {
        let cell = ParagraphStyle::sized(8.0).leading(9.6);
        let mut styles = StyleRegistry::new(cell.clone());

        styles.register(
            SECTION_HEADER,
            ParagraphStyle::sized(10.0)
                .bold()
                .leading(12.0)
                .indent(15.0)
                .spacing(0.0, 4.0),
        );
        styles.register(
            SPECIAL_SECTION_HEADER,
            ParagraphStyle::sized(10.0)
                .bold()
                .leading(12.0)
                .indent(8.0)
                .spacing(0.0, 8.0),
        );
        styles.register(
            SUBSECTION_HEADER,
            ParagraphStyle::sized(9.0).bold().leading(11.0).spacing(6.0, 4.0),
        );
        styles.register(CELL, cell);
        styles.register(
            REPORT_TITLE,
            ParagraphStyle::sized(20.0)
                .bold()
                .leading(24.0)
                .color(palette.primary)
                .spacing(0.0, 6.0),
        );
        styles.register(
            REPORT_SUBTITLE,
            ParagraphStyle::sized(10.0)
                .leading(14.0)
                .color(palette.muted_text)
                .spacing(4.0, 0.0),
        );
        styles.register(BRAND, ParagraphStyle::sized(18.0).bold().leading(18.0));
        styles.register(FOOTER_COMPANY, ParagraphStyle::sized(8.0).bold().leading(9.6));
        styles.register(
            FOOTER_ADDRESS,
            ParagraphStyle::sized(8.0).leading(9.6).color(palette.muted_text),
        );
        styles.register(
            FOOTER_LINK,
            ParagraphStyle::sized(8.0).leading(9.6).color(palette.link),
        );
        styles.register(
            PAGE_NUMBER,
            ParagraphStyle::sized(8.0).leading(9.6).align(TextAlign::Right),
        );
        styles.register(
            QR_FALLBACK,
            ParagraphStyle::sized(10.0).align(TextAlign::Center),
        );

        Self { palette, styles }
    }

    /// Looks up a named style; unknown names resolve to the cell style.
    pub fn style(&self, name: &str) -> Arc<ParagraphStyle> {
        self.styles.resolve(name)
    }

    pub fn registry(&self) -> &StyleRegistry {
        &self.styles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assessor_style::FontWeight;

    #[test]
    fn section_headers_differ_only_in_indent_and_spacing() {
        let theme = Theme::standard();
        let standard = theme.style(SECTION_HEADER);
        let special = theme.style(SPECIAL_SECTION_HEADER);
        assert_eq!(standard.font_weight, FontWeight::Bold);
        assert_eq!((standard.left_indent, standard.space_after), (15.0, 4.0));
        assert_eq!((special.left_indent, special.space_after), (8.0, 8.0));
        assert_eq!(standard.font_size, special.font_size);
    }

    #[test]
    fn unknown_styles_fall_back_to_cells() {
        let theme = Theme::standard();
        assert_eq!(theme.style("no-such-style").font_size, 8.0);
        assert_eq!(theme.registry().len(), 12);
        assert_eq!(theme.style(REPORT_TITLE).color, theme.palette.primary);
    }
}
