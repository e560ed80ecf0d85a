//! Block measurement shared by the paginator and the painter.

use crate::fonts::{FontFace, FontRegistry};
use crate::text::wrap_lines;
use assessor_idf::{Block, CellAttributes, CellSpan, Paragraph, Table, TableCell};

/// Line height used for plain-text table cells, relative to the font size.
pub(crate) const CELL_LEADING: f32 = 1.2;

#[derive(Clone, Copy)]
pub(crate) struct LayoutContext<'a> {
    pub fonts: &'a FontRegistry,
}

impl<'a> LayoutContext<'a> {
    pub fn new(fonts: &'a FontRegistry) -> Self {
        Self { fonts }
    }

    pub fn paragraph_face(&self, paragraph: &Paragraph) -> &'a FontFace {
        self.fonts
            .resolve(&paragraph.style.font_family, paragraph.style.font_weight)
    }

    pub fn cell_face(&self, attrs: &CellAttributes) -> &'a FontFace {
        self.fonts.resolve(self.fonts.text_family(), attrs.font_weight)
    }

    /// The lines of `paragraph` when set `width` wide, indent included.
    pub fn paragraph_lines(&self, paragraph: &Paragraph, width: f32) -> Vec<String> {
        let style = &paragraph.style;
        let face = self.paragraph_face(paragraph);
        wrap_lines(
            &paragraph.text,
            (width - style.left_indent).max(1.0),
            &face.metrics,
            style.font_size,
        )
    }

    pub fn paragraph_height(&self, paragraph: &Paragraph, width: f32) -> f32 {
        let style = &paragraph.style;
        let lines = self.paragraph_lines(paragraph, width).len();
        style.space_before + lines as f32 * style.leading + style.space_after
    }

    pub fn block_height(&self, block: &Block, width: f32) -> f32 {
        match block {
            Block::Paragraph(p) => self.paragraph_height(p, width),
            Block::Table(t) => TableLayout::compute(self, t, width).height(),
            Block::Spacer(s) => s.height,
            Block::PageBreak => 0.0,
            Block::Drawing(d) => d.height,
            Block::Image(i) => i.height,
        }
    }

    /// The horizontal extent a block occupies when given `width`.
    pub fn block_width(&self, block: &Block, width: f32) -> f32 {
        match block {
            Block::Table(t) => t.fixed_width().unwrap_or(width),
            Block::Drawing(d) => d.width,
            Block::Image(i) => i.width,
            _ => width,
        }
    }
}

/// Resolved geometry of one table.
#[derive(Debug, Clone)]
pub(crate) struct TableLayout {
    pub col_widths: Vec<f32>,
    pub row_heights: Vec<f32>,
    pub spans: Vec<CellSpan>,
    pub attributes: Vec<Vec<CellAttributes>>,
}

impl TableLayout {
    pub fn compute(ctx: &LayoutContext<'_>, table: &Table, available: f32) -> Self {
        let cols = table.column_count();
        let rows = table.row_count();
        let col_widths = resolve_columns(&table.col_widths, cols, available);
        let spans = table.style.spans(cols, rows);
        let attributes: Vec<Vec<CellAttributes>> = (0..rows)
            .map(|r| (0..cols).map(|c| table.style.attributes(c, r, cols, rows)).collect())
            .collect();

        let mut layout = Self {
            col_widths,
            row_heights: Vec::with_capacity(rows),
            spans,
            attributes,
        };

        for (r, row) in table.rows.iter().enumerate() {
            let fixed = table
                .row_heights
                .as_ref()
                .and_then(|heights| heights.get(r))
                .copied();
            let height = match fixed {
                Some(height) => height,
                None => (0..cols)
                    .filter_map(|c| {
                        let width = layout.cell_width(r, c)?;
                        let attrs = &layout.attributes[r][c];
                        Some(match row.get(c) {
                            Some(cell) => layout.cell_content_height(ctx, cell, attrs, width),
                            None => attrs.padding.vertical(),
                        })
                    })
                    .fold(0.0, f32::max),
            };
            layout.row_heights.push(height);
        }
        layout
    }

    pub fn width(&self) -> f32 {
        self.col_widths.iter().sum()
    }

    pub fn height(&self) -> f32 {
        self.row_heights.iter().sum()
    }

    pub fn column_x(&self, col: usize) -> f32 {
        self.col_widths[..col].iter().sum()
    }

    /// Width of the cell at `(row, col)`, or `None` when a span covers it.
    pub fn cell_width(&self, row: usize, col: usize) -> Option<f32> {
        match self.span_at(row, col) {
            Some(span) if span.first_col == col => {
                Some(self.col_widths[span.first_col..=span.last_col].iter().sum())
            }
            Some(_) => None,
            None => self.col_widths.get(col).copied(),
        }
    }

    pub fn span_at(&self, row: usize, col: usize) -> Option<&CellSpan> {
        self.spans
            .iter()
            .find(|s| s.row == row && (s.first_col..=s.last_col).contains(&col))
    }

    /// Cell height including padding.
    pub fn cell_content_height(
        &self,
        ctx: &LayoutContext<'_>,
        cell: &TableCell,
        attrs: &CellAttributes,
        width: f32,
    ) -> f32 {
        let inner = (width - attrs.padding.horizontal()).max(1.0);
        let content = match cell {
            TableCell::Text(text) => {
                let face = ctx.cell_face(attrs);
                let lines = wrap_lines(text, inner, &face.metrics, attrs.font_size).len();
                lines as f32 * attrs.font_size * CELL_LEADING
            }
            TableCell::Blocks(blocks) => blocks.iter().map(|b| ctx.block_height(b, inner)).sum(),
            TableCell::Empty => 0.0,
        };
        content + attrs.padding.vertical()
    }
}

/// Explicit widths are used as given; missing columns share what is left.
fn resolve_columns(explicit: &[f32], cols: usize, available: f32) -> Vec<f32> {
    if explicit.len() >= cols {
        return explicit[..cols].to_vec();
    }
    let used: f32 = explicit.iter().sum();
    let remaining = cols - explicit.len();
    let share = ((available - used) / remaining as f32).max(0.0);
    explicit
        .iter()
        .copied()
        .chain(std::iter::repeat(share).take(remaining))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assessor_idf::{CellRange, TableCommand, TableStyle};
    use assessor_style::{Margins, ParagraphStyle};
    use std::sync::Arc;

    fn small_cells() -> TableStyle {
        TableStyle::new(vec![
            TableCommand::FontSize(CellRange::ALL, 8.0),
            TableCommand::Padding(CellRange::ALL, Margins::all(4.0)),
        ])
    }

    #[test]
    fn equal_share_when_widths_are_missing() {
        assert_eq!(resolve_columns(&[], 4, 504.0), vec![126.0; 4]);
        assert_eq!(resolve_columns(&[100.0], 3, 300.0), vec![100.0, 100.0, 100.0]);
        assert_eq!(resolve_columns(&[50.0, 60.0], 2, 10.0), vec![50.0, 60.0]);
    }

    #[test]
    fn rows_grow_with_wrapped_text() {
        let fonts = FontRegistry::with_standard_fonts();
        let ctx = LayoutContext::new(&fonts);
        let long = "scratches along the rear bumper and both tail lamps ".repeat(4);
        let table = Table::new(
            vec![
                vec!["Parameter".into(), "DETAILS".into()],
                vec!["Remarks".into(), TableCell::text(long)],
            ],
            vec![216.0, 288.0],
        )
        .with_style(small_cells());

        let layout = TableLayout::compute(&ctx, &table, 500.0);
        let single = 8.0 * CELL_LEADING + 8.0;
        assert!((layout.row_heights[0] - single).abs() < 0.001);
        assert!(layout.row_heights[1] > single * 2.0);
        assert_eq!(layout.width(), 504.0);
    }

    #[test]
    fn spans_merge_columns() {
        let fonts = FontRegistry::with_standard_fonts();
        let ctx = LayoutContext::new(&fonts);
        let mut style = small_cells();
        style.push(TableCommand::Span(CellRange::row(1)));
        let table = Table::new(
            vec![
                vec!["Brand".into(), "QR".into()],
                vec!["Comprehensive Vehicle Report".into(), TableCell::Empty],
            ],
            vec![417.6, 86.4],
        )
        .with_style(style)
        .with_row_heights(vec![57.6, 25.2]);

        let layout = TableLayout::compute(&ctx, &table, 545.0);
        let merged = layout.cell_width(1, 0).unwrap();
        assert!((merged - 504.0).abs() < 0.01);
        assert_eq!(layout.cell_width(1, 1), None);
        assert_eq!(layout.cell_width(0, 1), Some(86.4));
        assert_eq!(layout.row_heights, vec![57.6, 25.2]);
        assert!((layout.column_x(1) - 417.6).abs() < 0.01);
    }

    #[test]
    fn paragraph_height_includes_spacing() {
        let fonts = FontRegistry::with_standard_fonts();
        let ctx = LayoutContext::new(&fonts);
        let style = Arc::new(ParagraphStyle::sized(10.0).leading(12.0).spacing(0.0, 4.0).indent(15.0));
        let p = Paragraph::new("Vehicle Details", style);
        assert_eq!(ctx.paragraph_height(&p, 545.0), 16.0);
        assert_eq!(ctx.block_height(&Block::spacer(0.0, 12.0), 545.0), 12.0);
    }
}
