//! Data table construction and the shared data table style.

use crate::format::FormattedCell;
use crate::theme::Palette;
use assessor_idf::{CellRange, LineStyle, Table, TableCell, TableCommand, TableStyle};
use assessor_style::{FontWeight, Margins, TextAlign, VerticalAlign};
use assessor_types::Color;

pub const DATA_FONT_SIZE: f32 = 8.0;

/// Style of every data table: an accented bold header row, a thin grid on
/// the data rows and neutral zebra stripes on odd rows. With `has_money` the
/// last column is right-aligned below the header.
pub fn table_style(rows: usize, has_money: bool, palette: &Palette) -> TableStyle {
    let grid = palette.grid;
    let mut style = TableStyle::new(vec![
        TableCommand::Background(CellRange::row(0), palette.header_accent),
        TableCommand::TextColor(CellRange::ALL, Color::BLACK),
        TableCommand::Align(CellRange::ALL, TextAlign::Left),
        TableCommand::Font(CellRange::row(0), FontWeight::Bold),
        TableCommand::FontSize(CellRange::ALL, DATA_FONT_SIZE),
        TableCommand::Padding(CellRange::ALL, Margins::all(4.0)),
        TableCommand::LineBefore(CellRange::cell(1, 0), LineStyle::new(0.5, grid)),
        TableCommand::Box(CellRange::row(0), LineStyle::new(1.0, palette.header_accent)),
        TableCommand::Grid(CellRange::rows_from(1), LineStyle::new(0.3, grid)),
        TableCommand::VAlign(CellRange::ALL, VerticalAlign::Top),
    ]);

    for row in (1..rows).step_by(2) {
        style.push(TableCommand::Background(CellRange::row(row as i32), palette.neutral));
    }
    if has_money {
        style.push(TableCommand::Align(
            CellRange::new((-1, 1), (-1, -1)),
            TextAlign::Right,
        ));
    }
    style
}

/// A header row plus formatted data rows, turned into a styled [`Table`].
///
/// Rows shorter than the header are padded with the placeholder so every row
/// has the header's cell count.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    header: Vec<String>,
    header_align: TextAlign,
    rows: Vec<Vec<FormattedCell>>,
}

impl DataTable {
    pub fn new<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            header: header.into_iter().map(Into::into).collect(),
            header_align: TextAlign::Left,
            rows: Vec::new(),
        }
    }

    pub fn centered_header(mut self) -> Self {
        self.header_align = TextAlign::Center;
        self
    }

    pub fn push_row(&mut self, mut row: Vec<FormattedCell>) {
        row.resize_with(self.header.len(), FormattedCell::placeholder);
        self.rows.push(row);
    }

    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    /// Builds the table, or `None` when there are no columns or no data rows.
    pub fn build(self, col_widths: Vec<f32>, has_money: bool, palette: &Palette) -> Option<Table> {
        if self.header.is_empty() || self.rows.is_empty() {
            return None;
        }
        let row_count = self.rows.len() + 1;
        let mut style = table_style(row_count, has_money, palette);
        if self.header_align != TextAlign::Left {
            style.push(TableCommand::Align(CellRange::row(0), self.header_align));
        }

        let last = self.header.len().saturating_sub(1);
        let mut rows = Vec::with_capacity(row_count);
        rows.push(self.header.into_iter().map(TableCell::Text).collect());
        for (r, row) in self.rows.into_iter().enumerate() {
            let cells = row
                .into_iter()
                .enumerate()
                .map(|(c, cell)| {
                    let column_align = if has_money && c == last {
                        TextAlign::Right
                    } else {
                        TextAlign::Left
                    };
                    if cell.align != column_align {
                        style.push(TableCommand::Align(
                            CellRange::cell(c as i32, r as i32 + 1),
                            cell.align,
                        ));
                    }
                    TableCell::Text(cell.text)
                })
                .collect();
            rows.push(cells);
        }
        Some(Table::new(rows, col_widths).with_style(style))
    }
}
