//! Flows blocks into page frames.
//!
//! Paragraphs split between lines and tables split between rows; drawings and
//! images move to the next page whole. A table row taller than the frame is
//! unpacked and its cell blocks flow one after another. A page break on a page
//! that has no content yet is ignored, and a spacer that does not fit is
//! dropped. Content that can be neither split nor unpacked is an error.

use crate::canvas::Canvas;
use crate::error::RenderError;
use crate::measure::{LayoutContext, TableLayout};
use assessor_idf::{Block, Paragraph, Table, TableCell};
use assessor_style::TextAlign;
use assessor_types::Rect;
use std::ops::Range;
use std::rc::Rc;

const EPSILON: f32 = 0.01;

/// A positioned piece of a block, in top-down page coordinates.
#[derive(Debug)]
pub(crate) enum Fragment<'b> {
    Lines {
        paragraph: &'b Paragraph,
        lines: Vec<String>,
        x: f32,
        top: f32,
        width: f32,
    },
    TableRows {
        table: &'b Table,
        layout: Rc<TableLayout>,
        rows: Range<usize>,
        x: f32,
        y: f32,
    },
    Atomic {
        block: &'b Block,
        x: f32,
        y: f32,
        width: f32,
    },
}

impl Fragment<'_> {
    pub fn paint(&self, canvas: &mut Canvas<'_>) -> Result<(), RenderError> {
        match self {
            Fragment::Lines { paragraph, lines, x, top, width } => {
                canvas.draw_lines(paragraph, lines, *x, *top, *width);
                Ok(())
            }
            Fragment::TableRows { table, layout, rows, x, y } => {
                canvas.draw_table_rows(table, layout, rows.clone(), *x, *y)
            }
            Fragment::Atomic { block, x, y, width } => {
                canvas.draw_block(block, *x, *y, *width).map(|_| ())
            }
        }
    }
}

pub(crate) type Page<'b> = Vec<Fragment<'b>>;

pub(crate) struct Paginator<'a> {
    ctx: LayoutContext<'a>,
    frame: Rect,
}

struct FlowState<'b> {
    pages: Vec<Page<'b>>,
    current: Page<'b>,
    cursor: f32,
}

impl<'b> FlowState<'b> {
    fn new_page(&mut self) {
        self.pages.push(std::mem::take(&mut self.current));
        self.cursor = 0.0;
    }

    fn page_is_empty(&self) -> bool {
        self.current.is_empty()
    }
}

impl<'a> Paginator<'a> {
    pub fn new(ctx: LayoutContext<'a>, frame: Rect) -> Self {
        Self { ctx, frame }
    }

    /// Lays `blocks` out page by page. The result always holds at least one page.
    pub fn paginate<'b>(&self, blocks: &'b [Block]) -> Result<Vec<Page<'b>>, RenderError> {
        let mut state = FlowState {
            pages: Vec::new(),
            current: Vec::new(),
            cursor: 0.0,
        };

        for block in blocks {
            self.flow_block(block, &mut state)?;
        }

        if !state.current.is_empty() || state.pages.is_empty() {
            state.pages.push(state.current);
        }
        log::debug!("Laid out {} page(s)", state.pages.len());
        Ok(state.pages)
    }

    fn flow_block<'b>(&self, block: &'b Block, state: &mut FlowState<'b>) -> Result<(), RenderError> {
        match block {
            Block::PageBreak => {
                if !state.page_is_empty() {
                    state.new_page();
                }
            }
            Block::Spacer(spacer) => {
                if state.cursor + spacer.height > self.frame.height + EPSILON {
                    if !state.page_is_empty() {
                        state.new_page();
                    }
                } else {
                    state.cursor += spacer.height;
                }
            }
            Block::Paragraph(p) => self.flow_paragraph(p, state),
            Block::Table(t) => self.flow_table(t, state)?,
            Block::Drawing(_) | Block::Image(_) => self.flow_atomic(block, state)?,
        }
        Ok(())
    }

    fn remaining(&self, state: &FlowState<'_>) -> f32 {
        self.frame.height - state.cursor
    }

    fn flow_paragraph<'b>(&self, paragraph: &'b Paragraph, state: &mut FlowState<'b>) {
        let style = &paragraph.style;
        let mut lines = self.ctx.paragraph_lines(paragraph, self.frame.width);
        if state.cursor > 0.0 {
            state.cursor += style.space_before;
        }

        while !lines.is_empty() {
            let fit = ((self.remaining(state) + EPSILON) / style.leading).floor().max(0.0) as usize;
            if fit == 0 && !state.page_is_empty() {
                state.new_page();
                continue;
            }
            let take = fit.clamp(1, lines.len());
            let rest = lines.split_off(take);
            state.current.push(Fragment::Lines {
                paragraph,
                lines,
                x: self.frame.x,
                top: self.frame.y + state.cursor,
                width: self.frame.width,
            });
            state.cursor += take as f32 * style.leading;
            lines = rest;
            if !lines.is_empty() {
                state.new_page();
            }
        }

        state.cursor = (state.cursor + style.space_after).min(self.frame.height);
    }

    fn flow_table<'b>(&self, table: &'b Table, state: &mut FlowState<'b>) -> Result<(), RenderError> {
        if table.row_count() == 0 {
            return Ok(());
        }
        let layout = Rc::new(TableLayout::compute(&self.ctx, table, self.frame.width));
        let x = self.frame.x + table.h_align.offset(self.frame.width, layout.width());
        let oversized = |row: usize| layout.row_heights[row] > self.frame.height + EPSILON;

        let mut row = 0;
        while row < table.row_count() {
            if oversized(row) {
                self.unpack_row(table, row, layout.row_heights[row], state)?;
                row += 1;
                continue;
            }

            let available = self.remaining(state) + EPSILON;
            let mut used = 0.0;
            let mut end = row;
            while end < table.row_count() && used + layout.row_heights[end] <= available {
                used += layout.row_heights[end];
                end += 1;
            }

            if end == row {
                if state.page_is_empty() {
                    // Only spacers above; the row fits once they are dropped.
                    state.cursor = 0.0;
                } else {
                    state.new_page();
                }
                continue;
            }

            state.current.push(Fragment::TableRows {
                table,
                layout: Rc::clone(&layout),
                rows: row..end,
                x,
                y: self.frame.y + state.cursor,
            });
            state.cursor += used;
            row = end;
            if row < table.row_count() && !oversized(row) {
                state.new_page();
            }
        }
        Ok(())
    }

    /// Flows the blocks of a row that cannot fit on any page, cell by cell.
    fn unpack_row<'b>(
        &self,
        table: &'b Table,
        row: usize,
        height: f32,
        state: &mut FlowState<'b>,
    ) -> Result<(), RenderError> {
        let too_tall = || {
            RenderError::Geometry(format!(
                "table row {} is taller than the page frame ({:.1} > {:.1}pt)",
                row, height, self.frame.height
            ))
        };
        let mut blocks: Vec<&'b Block> = Vec::new();
        for cell in &table.rows[row] {
            match cell {
                TableCell::Blocks(cell_blocks) => blocks.extend(cell_blocks),
                TableCell::Text(text) if !text.is_empty() => return Err(too_tall()),
                TableCell::Text(_) | TableCell::Empty => {}
            }
        }
        if blocks.is_empty() {
            return Err(too_tall());
        }

        log::debug!(
            "Table row {} is taller than the page frame ({:.1} > {:.1}pt), flowing its cells in sequence",
            row,
            height,
            self.frame.height
        );
        for block in blocks {
            self.flow_block(block, state)?;
        }
        Ok(())
    }

    fn flow_atomic<'b>(&self, block: &'b Block, state: &mut FlowState<'b>) -> Result<(), RenderError> {
        let height = self.ctx.block_height(block, self.frame.width);
        if height > self.frame.height + EPSILON {
            return Err(RenderError::Geometry(format!(
                "block is taller than the page frame ({:.1} > {:.1}pt)",
                height, self.frame.height
            )));
        }
        if height > self.remaining(state) + EPSILON {
            if state.page_is_empty() {
                state.cursor = 0.0;
            } else {
                state.new_page();
            }
        }
        let width = self.ctx.block_width(block, self.frame.width);
        state.current.push(Fragment::Atomic {
            block,
            x: self.frame.x + TextAlign::Center.offset(self.frame.width, width),
            y: self.frame.y + state.cursor,
            width,
        });
        state.cursor += height;
        Ok(())
    }
}
