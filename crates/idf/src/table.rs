use crate::{Block, Paragraph};
use assessor_style::{FontWeight, Margins, TextAlign, VerticalAlign};
use assessor_types::Color;

/// Content of one table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum TableCell {
    /// Plain text, styled by the table's font, size, color and alignment commands.
    Text(String),
    /// Nested blocks that carry their own styles (paragraphs, drawings, tables).
    Blocks(Vec<Block>),
    /// A cell covered by a span, or intentionally left blank.
    Empty,
}

impl TableCell {
    pub fn text(text: impl Into<String>) -> Self {
        TableCell::Text(text.into())
    }

    /// The visible text of the cell, paragraphs joined by newlines.
    pub fn plain_text(&self) -> String {
        match self {
            TableCell::Text(text) => text.clone(),
            TableCell::Blocks(blocks) => blocks
                .iter()
                .filter_map(Block::as_text)
                .collect::<Vec<_>>()
                .join("\n"),
            TableCell::Empty => String::new(),
        }
    }
}

impl From<&str> for TableCell {
    fn from(text: &str) -> Self {
        TableCell::Text(text.to_string())
    }
}

impl From<Paragraph> for TableCell {
    fn from(p: Paragraph) -> Self {
        TableCell::Blocks(vec![Block::Paragraph(p)])
    }
}

impl From<Block> for TableCell {
    fn from(block: Block) -> Self {
        TableCell::Blocks(vec![block])
    }
}

impl From<Vec<Block>> for TableCell {
    fn from(blocks: Vec<Block>) -> Self {
        TableCell::Blocks(blocks)
    }
}

/// A rectangular cell range addressed as `(column, row)` pairs.
///
/// Negative indices count from the end, so `(-1, -1)` is the bottom-right cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub start: (i32, i32),
    pub end: (i32, i32),
}

impl CellRange {
    pub const ALL: CellRange = CellRange::new((0, 0), (-1, -1));

    pub const fn new(start: (i32, i32), end: (i32, i32)) -> Self {
        Self { start, end }
    }

    pub const fn row(row: i32) -> Self {
        Self::new((0, row), (-1, row))
    }

    /// All rows from `row` to the last one.
    pub const fn rows_from(row: i32) -> Self {
        Self::new((0, row), (-1, -1))
    }

    pub const fn cell(col: i32, row: i32) -> Self {
        Self::new((col, row), (col, row))
    }

    /// Resolves to inclusive `(first_col, last_col, first_row, last_row)`, or `None`
    /// when the range selects nothing in a `cols` by `rows` table.
    pub fn resolve(&self, cols: usize, rows: usize) -> Option<(usize, usize, usize, usize)> {
        let c0 = resolve_index(self.start.0, cols)?;
        let c1 = resolve_index(self.end.0, cols)?;
        let r0 = resolve_index(self.start.1, rows)?;
        let r1 = resolve_index(self.end.1, rows)?;
        if c0 > c1 || r0 > r1 {
            return None;
        }
        Some((c0, c1, r0, r1))
    }

    pub fn contains(&self, col: usize, row: usize, cols: usize, rows: usize) -> bool {
        self.resolve(cols, rows)
            .is_some_and(|(c0, c1, r0, r1)| (c0..=c1).contains(&col) && (r0..=r1).contains(&row))
    }
}

fn resolve_index(index: i32, len: usize) -> Option<usize> {
    let len = len as i64;
    let resolved = if index < 0 { len + index as i64 } else { index as i64 };
    if (0..len).contains(&resolved) {
        Some(resolved as usize)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub width: f32,
    pub color: Color,
}

impl LineStyle {
    pub const fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }
}

/// One styling instruction applied to a range of cells. Later commands win.
#[derive(Debug, Clone, PartialEq)]
pub enum TableCommand {
    Background(CellRange, Color),
    TextColor(CellRange, Color),
    Align(CellRange, TextAlign),
    VAlign(CellRange, VerticalAlign),
    Font(CellRange, FontWeight),
    FontSize(CellRange, f32),
    Padding(CellRange, Margins),
    /// Lines around every cell in the range.
    Grid(CellRange, LineStyle),
    /// A frame around the outside of the range.
    Box(CellRange, LineStyle),
    /// A vertical line on the left edge of each cell in the range.
    LineBefore(CellRange, LineStyle),
    /// Merge the cells of each row in the range into its first cell.
    Span(CellRange),
}

/// Per-cell presentation after all commands have been applied.
#[derive(Debug, Clone, PartialEq)]
pub struct CellAttributes {
    pub background: Option<Color>,
    pub text_color: Color,
    pub align: TextAlign,
    pub valign: VerticalAlign,
    pub font_weight: FontWeight,
    pub font_size: f32,
    pub padding: Margins,
}

impl Default for CellAttributes {
    fn default() -> Self {
        Self {
            background: None,
            text_color: Color::BLACK,
            align: TextAlign::Left,
            valign: VerticalAlign::Top,
            font_weight: FontWeight::Regular,
            font_size: 10.0,
            padding: Margins::new(3.0, 6.0, 3.0, 6.0),
        }
    }
}

/// A horizontal merge of cells `first_col..=last_col` in `row`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSpan {
    pub row: usize,
    pub first_col: usize,
    pub last_col: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableStyle {
    commands: Vec<TableCommand>,
}

impl TableStyle {
    pub fn new(commands: Vec<TableCommand>) -> Self {
        Self { commands }
    }

    pub fn push(&mut self, command: TableCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[TableCommand] {
        &self.commands
    }

    /// Folds every command covering `(col, row)` into the cell's attributes.
    pub fn attributes(&self, col: usize, row: usize, cols: usize, rows: usize) -> CellAttributes {
        let mut attrs = CellAttributes::default();
        for command in &self.commands {
            match command {
                TableCommand::Background(range, color) if range.contains(col, row, cols, rows) => {
                    attrs.background = Some(*color)
                }
                TableCommand::TextColor(range, color) if range.contains(col, row, cols, rows) => {
                    attrs.text_color = *color
                }
                TableCommand::Align(range, align) if range.contains(col, row, cols, rows) => {
                    attrs.align = *align
                }
                TableCommand::VAlign(range, valign) if range.contains(col, row, cols, rows) => {
                    attrs.valign = *valign
                }
                TableCommand::Font(range, weight) if range.contains(col, row, cols, rows) => {
                    attrs.font_weight = *weight
                }
                TableCommand::FontSize(range, size) if range.contains(col, row, cols, rows) => {
                    attrs.font_size = *size
                }
                TableCommand::Padding(range, padding) if range.contains(col, row, cols, rows) => {
                    attrs.padding = *padding
                }
                _ => {}
            }
        }
        attrs
    }

    pub fn spans(&self, cols: usize, rows: usize) -> Vec<CellSpan> {
        let mut spans = Vec::new();
        for command in &self.commands {
            if let TableCommand::Span(range) = command {
                if let Some((c0, c1, r0, r1)) = range.resolve(cols, rows) {
                    if c1 > c0 {
                        spans.extend((r0..=r1).map(|row| CellSpan {
                            row,
                            first_col: c0,
                            last_col: c1,
                        }));
                    }
                }
            }
        }
        spans
    }
}

/// A grid of cells with explicit column widths.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub rows: Vec<Vec<TableCell>>,
    /// Column widths in points. Empty means "share the available width equally".
    pub col_widths: Vec<f32>,
    /// Fixed row heights; rows size to their content when `None`.
    pub row_heights: Option<Vec<f32>>,
    pub style: TableStyle,
    /// Placement of the table inside the space it is drawn into.
    pub h_align: TextAlign,
}

impl Table {
    pub fn new(rows: Vec<Vec<TableCell>>, col_widths: Vec<f32>) -> Self {
        Self {
            rows,
            col_widths,
            row_heights: None,
            style: TableStyle::default(),
            h_align: TextAlign::Center,
        }
    }

    pub fn with_style(mut self, style: TableStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_row_heights(mut self, heights: Vec<f32>) -> Self {
        self.row_heights = Some(heights);
        self
    }

    pub fn aligned(mut self, align: TextAlign) -> Self {
        self.h_align = align;
        self
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
            .max(self.col_widths.len())
    }

    /// The natural width of the table, when its columns are sized explicitly.
    pub fn fixed_width(&self) -> Option<f32> {
        if self.col_widths.is_empty() {
            None
        } else {
            Some(self.col_widths.iter().sum())
        }
    }

    /// The plain text of every cell, row by row.
    pub fn text_grid(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(TableCell::plain_text).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_indices_count_from_the_end() {
        let range = CellRange::new((-1, 1), (-1, -1));
        assert_eq!(range.resolve(3, 4), Some((2, 2, 1, 3)));
        assert!(range.contains(2, 3, 3, 4));
        assert!(!range.contains(1, 3, 3, 4));
        assert!(!range.contains(2, 0, 3, 4));
    }

    #[test]
    fn ranges_outside_the_table_select_nothing() {
        assert_eq!(CellRange::rows_from(1).resolve(2, 1), None);
        assert_eq!(CellRange::cell(5, 0).resolve(2, 2), None);
    }

    #[test]
    fn later_commands_override_earlier_ones() {
        let style = TableStyle::new(vec![
            TableCommand::Align(CellRange::ALL, TextAlign::Left),
            TableCommand::Font(CellRange::row(0), FontWeight::Bold),
            TableCommand::Align(CellRange::new((-1, 1), (-1, -1)), TextAlign::Right),
            TableCommand::Background(CellRange::row(1), Color::WHITE),
        ]);

        let header = style.attributes(0, 0, 2, 3);
        assert_eq!(header.font_weight, FontWeight::Bold);
        assert_eq!(header.align, TextAlign::Left);

        let money = style.attributes(1, 1, 2, 3);
        assert_eq!(money.align, TextAlign::Right);
        assert_eq!(money.background, Some(Color::WHITE));
        assert_eq!(style.attributes(0, 2, 2, 3).background, None);
    }

    #[test]
    fn spans_expand_per_row() {
        let style = TableStyle::new(vec![
            TableCommand::Span(CellRange::new((0, 1), (1, 2))),
            TableCommand::Span(CellRange::cell(0, 0)),
        ]);
        let spans = style.spans(2, 3);
        assert_eq!(
            spans,
            vec![
                CellSpan { row: 1, first_col: 0, last_col: 1 },
                CellSpan { row: 2, first_col: 0, last_col: 1 },
            ]
        );
    }

    #[test]
    fn column_count_uses_widest_row() {
        let table = Table::new(
            vec![vec!["a".into()], vec!["b".into(), "c".into()]],
            vec![],
        );
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.fixed_width(), None);
        assert_eq!(table.text_grid()[1], vec!["b".to_string(), "c".to_string()]);
    }
}
