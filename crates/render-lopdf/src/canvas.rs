//! Page drawing surface.
//!
//! A [`Canvas`] accumulates the content stream of one page. Coordinates passed
//! in are top-down (y grows towards the bottom of the page); the canvas flips
//! them when emitting operators. Drawing state (font, colors, line width,
//! dash) is cached so repeated settings are not re-emitted.

use crate::error::RenderError;
use crate::fonts::FontFace;
use crate::measure::{LayoutContext, TableLayout, CELL_LEADING};
use crate::text::{to_win_ansi, unencodable_chars};
use crate::writer::StreamingPdfWriter;
use assessor_idf::{
    Block, CellAttributes, Drawing, ImageBlock, LineStyle, Paragraph, Table, TableCell,
    TableCommand,
};
use assessor_types::{Color, RasterData, RasterImage, Rect};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Object, Stream, StringFormat};
use std::collections::HashMap;
use std::io::{Seek, Write};
use std::ops::Range;
use std::sync::Arc;

/// Bezier control distance for a quarter circle of radius 1.
const KAPPA: f32 = 0.5523;

/// A clickable area on a page, in PDF (bottom-up) coordinates.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LinkArea {
    pub rect: [f32; 4],
    pub uri: String,
}

#[derive(Default)]
struct DrawState {
    font: Option<(String, f32)>,
    fill: Option<Color>,
    stroke: Option<Color>,
    line_width: Option<f32>,
    dashed: bool,
}

pub struct Canvas<'a> {
    ctx: LayoutContext<'a>,
    images: &'a mut ImageSet,
    page_width: f32,
    page_height: f32,
    content: Content,
    state: DrawState,
    links: Vec<LinkArea>,
}

impl<'a> Canvas<'a> {
    pub(crate) fn new(
        ctx: LayoutContext<'a>,
        images: &'a mut ImageSet,
        page_width: f32,
        page_height: f32,
    ) -> Self {
        Self {
            ctx,
            images,
            page_width,
            page_height,
            content: Content { operations: vec![] },
            state: DrawState::default(),
            links: Vec::new(),
        }
    }

    pub(crate) fn finish(self) -> (Content, Vec<LinkArea>) {
        (self.content, self.links)
    }

    pub fn page_size(&self) -> (f32, f32) {
        (self.page_width, self.page_height)
    }

    /// Height `block` takes when drawn `width` wide.
    pub fn measure(&self, block: &Block, width: f32) -> f32 {
        self.ctx.block_height(block, width)
    }

    fn pdf_y(&self, y: f32) -> f32 {
        self.page_height - y
    }

    fn op(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    fn set_fill_color(&mut self, color: Color) {
        if self.state.fill != Some(color) {
            let [r, g, b] = color.to_unit_rgb();
            self.op("rg", vec![r.into(), g.into(), b.into()]);
            self.state.fill = Some(color);
        }
    }

    fn set_stroke(&mut self, style: LineStyle) {
        if self.state.stroke != Some(style.color) {
            let [r, g, b] = style.color.to_unit_rgb();
            self.op("RG", vec![r.into(), g.into(), b.into()]);
            self.state.stroke = Some(style.color);
        }
        if self.state.line_width != Some(style.width) {
            self.op("w", vec![style.width.into()]);
            self.state.line_width = Some(style.width);
        }
    }

    fn set_dash(&mut self, dash: Option<[f32; 2]>) {
        match dash {
            Some([on, off]) => {
                self.op("d", vec![Object::Array(vec![on.into(), off.into()]), 0.into()]);
                self.state.dashed = true;
            }
            None if self.state.dashed => {
                self.op("d", vec![Object::Array(vec![]), 0.into()]);
                self.state.dashed = false;
            }
            None => {}
        }
    }

    fn set_font(&mut self, face: &FontFace, size: f32) {
        let current = (face.resource_name.clone(), size);
        if self.state.font.as_ref() != Some(&current) {
            self.op(
                "Tf",
                vec![Object::Name(face.resource_name.as_bytes().to_vec()), size.into()],
            );
            self.state.font = Some(current);
        }
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.set_fill_color(color);
        let bottom = self.pdf_y(rect.bottom());
        self.op(
            "re",
            vec![rect.x.into(), bottom.into(), rect.width.into(), rect.height.into()],
        );
        self.op("f", vec![]);
    }

    pub fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), style: LineStyle) {
        self.set_dash(None);
        self.line(from, to, style);
    }

    /// A line drawn `on` points, then skipping `off` points.
    pub fn dashed_line(&mut self, from: (f32, f32), to: (f32, f32), style: LineStyle, on: f32, off: f32) {
        self.set_dash(Some([on, off]));
        self.line(from, to, style);
        self.set_dash(None);
    }

    fn line(&mut self, from: (f32, f32), to: (f32, f32), style: LineStyle) {
        self.set_stroke(style);
        let (y0, y1) = (self.pdf_y(from.1), self.pdf_y(to.1));
        self.op("m", vec![from.0.into(), y0.into()]);
        self.op("l", vec![to.0.into(), y1.into()]);
        self.op("S", vec![]);
    }

    /// Registers a URI link over `rect`.
    pub fn link(&mut self, rect: Rect, uri: impl Into<String>) {
        self.links.push(LinkArea {
            rect: [rect.x, self.pdf_y(rect.bottom()), rect.right(), self.pdf_y(rect.y)],
            uri: uri.into(),
        });
    }

    /// Sets one line of text whose line box starts at `top`.
    fn show_line(&mut self, text: &str, face: &FontFace, size: f32, leading: f32, color: Color, x: f32, top: f32) {
        if text.trim().is_empty() {
            return;
        }
        for c in unencodable_chars(text) {
            log::warn!(
                "Character '{}' (U+{:04X}) is not in WinAnsiEncoding and is set as '?'",
                c,
                c as u32
            );
        }
        let baseline = top + (leading - size) / 2.0 + face.metrics.ascent_at(size);
        let pdf_y = self.pdf_y(baseline);
        self.op("BT", vec![]);
        self.set_font(face, size);
        self.set_fill_color(color);
        self.op("Td", vec![x.into(), pdf_y.into()]);
        self.op(
            "Tj",
            vec![Object::String(to_win_ansi(text), StringFormat::Literal)],
        );
        self.op("ET", vec![]);
    }

    /// Draws `block` in the area starting at `(x, y)` that is `width` wide and
    /// returns the height used.
    pub fn draw_block(&mut self, block: &Block, x: f32, y: f32, width: f32) -> Result<f32, RenderError> {
        match block {
            Block::Paragraph(p) => Ok(self.draw_paragraph(p, x, y, width)),
            Block::Table(t) => self.draw_table(t, x, y, width),
            Block::Spacer(s) => Ok(s.height),
            Block::PageBreak => Ok(0.0),
            Block::Drawing(d) => {
                self.draw_drawing(d, x, y);
                Ok(d.height)
            }
            Block::Image(i) => {
                self.draw_image(i, x, y);
                Ok(i.height)
            }
        }
    }

    fn draw_paragraph(&mut self, paragraph: &Paragraph, x: f32, y: f32, width: f32) -> f32 {
        let lines = self.ctx.paragraph_lines(paragraph, width);
        let style = &paragraph.style;
        self.draw_lines(paragraph, &lines, x, y + style.space_before, width);
        style.space_before + lines.len() as f32 * style.leading + style.space_after
    }

    /// Draws already-wrapped `lines` of `paragraph`, the first line box at `top`.
    pub(crate) fn draw_lines(&mut self, paragraph: &Paragraph, lines: &[String], x: f32, top: f32, width: f32) {
        let style = paragraph.style.clone();
        let face = self.ctx.paragraph_face(paragraph);
        let text_x = x + style.left_indent;
        let available = width - style.left_indent;
        let mut widest: f32 = 0.0;
        let mut left = f32::MAX;

        for (i, line) in lines.iter().enumerate() {
            let line_width = face.metrics.text_width(line, style.font_size);
            let line_x = text_x + style.text_align.offset(available, line_width);
            widest = widest.max(line_x + line_width);
            left = left.min(line_x);
            let line_top = top + i as f32 * style.leading;
            self.show_line(line, face, style.font_size, style.leading, style.color, line_x, line_top);
        }

        if let (Some(href), false) = (&paragraph.href, lines.is_empty()) {
            let area = Rect::new(left, top, widest - left, lines.len() as f32 * style.leading);
            self.link(area, href.clone());
        }
    }

    fn draw_table(&mut self, table: &Table, x: f32, y: f32, width: f32) -> Result<f32, RenderError> {
        let layout = TableLayout::compute(&self.ctx, table, width);
        let table_x = x + table.h_align.offset(width, layout.width());
        self.draw_table_rows(table, &layout, 0..table.row_count(), table_x, y)?;
        Ok(layout.height())
    }

    /// Paints `rows` of `table` with the first of them starting at `y`.
    pub(crate) fn draw_table_rows(
        &mut self,
        table: &Table,
        layout: &TableLayout,
        rows: Range<usize>,
        x: f32,
        y: f32,
    ) -> Result<(), RenderError> {
        let cols = layout.col_widths.len();
        let mut tops = Vec::with_capacity(rows.len() + 1);
        let mut cursor = y;
        for r in rows.clone() {
            tops.push(cursor);
            cursor += layout.row_heights[r];
        }
        tops.push(cursor);
        let top_of = |r: usize| tops[r - rows.start];

        for r in rows.clone() {
            for c in 0..cols {
                if let (Some(w), Some(bg)) = (layout.cell_width(r, c), layout.attributes[r][c].background) {
                    let rect = Rect::new(x + layout.column_x(c), top_of(r), w, layout.row_heights[r]);
                    self.fill_rect(rect, bg);
                }
            }
        }

        for r in rows.clone() {
            for c in 0..cols {
                let Some(w) = layout.cell_width(r, c) else {
                    continue;
                };
                let Some(cell) = table.rows[r].get(c) else {
                    continue;
                };
                let attrs = &layout.attributes[r][c];
                let area = Rect::new(x + layout.column_x(c), top_of(r), w, layout.row_heights[r]);
                self.draw_cell(cell, attrs, layout, area)?;
            }
        }

        let row_count = table.row_count();
        for command in table.style.commands() {
            let (range, style) = match command {
                TableCommand::Grid(range, style)
                | TableCommand::Box(range, style)
                | TableCommand::LineBefore(range, style) => (range, *style),
                _ => continue,
            };
            let Some((c0, c1, r0, r1)) = range.resolve(cols, row_count) else {
                continue;
            };
            let first = r0.max(rows.start);
            let last = r1.min(rows.end.saturating_sub(1));
            if first > last {
                continue;
            }
            let left = x + layout.column_x(c0);
            let right = x + layout.column_x(c1 + 1);

            match command {
                TableCommand::Grid(..) => {
                    for r in first..=last {
                        let (top, bottom) = (top_of(r), top_of(r + 1));
                        self.stroke_line((left, top), (right, top), style);
                        self.stroke_line((left, bottom), (right, bottom), style);
                        for boundary in c0..=c1 + 1 {
                            let inside_span = layout
                                .spans
                                .iter()
                                .any(|s| s.row == r && s.first_col < boundary && boundary <= s.last_col);
                            if !inside_span {
                                let bx = x + layout.column_x(boundary);
                                self.stroke_line((bx, top), (bx, bottom), style);
                            }
                        }
                    }
                }
                TableCommand::Box(..) => {
                    let (top, bottom) = (top_of(first), top_of(last + 1));
                    self.stroke_line((left, top), (left, bottom), style);
                    self.stroke_line((right, top), (right, bottom), style);
                    if first == r0 {
                        self.stroke_line((left, top), (right, top), style);
                    }
                    if last == r1 {
                        self.stroke_line((left, bottom), (right, bottom), style);
                    }
                }
                _ => {
                    let (top, bottom) = (top_of(first), top_of(last + 1));
                    for c in c0..=c1 {
                        let bx = x + layout.column_x(c);
                        self.stroke_line((bx, top), (bx, bottom), style);
                    }
                }
            }
        }
        Ok(())
    }

    fn draw_cell(
        &mut self,
        cell: &TableCell,
        attrs: &CellAttributes,
        layout: &TableLayout,
        area: Rect,
    ) -> Result<(), RenderError> {
        let padding = attrs.padding;
        let inner_width = (area.width - padding.horizontal()).max(1.0);
        let content_height =
            layout.cell_content_height(&self.ctx, cell, attrs, area.width) - padding.vertical();
        let top = area.y
            + padding.top
            + attrs
                .valign
                .offset(area.height - padding.vertical(), content_height);
        let left = area.x + padding.left;

        match cell {
            TableCell::Text(text) => {
                let face = self.ctx.cell_face(attrs);
                let leading = attrs.font_size * CELL_LEADING;
                let lines = crate::text::wrap_lines(text, inner_width, &face.metrics, attrs.font_size);
                for (i, line) in lines.iter().enumerate() {
                    let line_width = face.metrics.text_width(line, attrs.font_size);
                    let line_x = left + attrs.align.offset(inner_width, line_width);
                    let line_top = top + i as f32 * leading;
                    self.show_line(line, face, attrs.font_size, leading, attrs.text_color, line_x, line_top);
                }
            }
            TableCell::Blocks(blocks) => {
                let mut cursor = top;
                for block in blocks {
                    let (block_x, block_width) = match block {
                        Block::Paragraph(_) => (left, inner_width),
                        _ => {
                            let used = self.ctx.block_width(block, inner_width);
                            (left + attrs.align.offset(inner_width, used), used)
                        }
                    };
                    cursor += self.draw_block(block, block_x, cursor, block_width)?;
                }
            }
            TableCell::Empty => {}
        }
        Ok(())
    }

    /// A rounded box with a centered caption.
    pub(crate) fn draw_drawing(&mut self, drawing: &Drawing, x: f32, y: f32) {
        let x0 = x;
        let x1 = x + drawing.width;
        let y0 = self.pdf_y(y + drawing.height);
        let y1 = self.pdf_y(y);
        let r = drawing.corner_radius.min(drawing.width / 2.0).min(drawing.height / 2.0);
        let k = KAPPA * r;

        self.set_fill_color(drawing.fill);
        self.set_dash(None);
        self.set_stroke(LineStyle::new(drawing.stroke_width, drawing.stroke));
        self.op("m", vec![(x0 + r).into(), y0.into()]);
        self.op("l", vec![(x1 - r).into(), y0.into()]);
        self.curve([x1 - r + k, y0], [x1, y0 + r - k], [x1, y0 + r]);
        self.op("l", vec![x1.into(), (y1 - r).into()]);
        self.curve([x1, y1 - r + k], [x1 - r + k, y1], [x1 - r, y1]);
        self.op("l", vec![(x0 + r).into(), y1.into()]);
        self.curve([x0 + r - k, y1], [x0, y1 - r + k], [x0, y1 - r]);
        self.op("l", vec![x0.into(), (y0 + r).into()]);
        self.curve([x0, y0 + r - k], [x0 + r - k, y0], [x0 + r, y0]);
        self.op("h", vec![]);
        self.op("B", vec![]);

        if !drawing.label.is_empty() {
            let face = self.ctx.fonts.resolve("Helvetica", Default::default());
            let size = drawing.label_size;
            let label_width = face.metrics.text_width(&drawing.label, size);
            let label_x = x + (drawing.width - label_width) / 2.0;
            let line_top = y + (drawing.height - size) / 2.0;
            self.show_line(&drawing.label, face, size, size, drawing.label_color, label_x, line_top);
        }
    }

    fn curve(&mut self, c1: [f32; 2], c2: [f32; 2], end: [f32; 2]) {
        self.op(
            "c",
            vec![
                c1[0].into(),
                c1[1].into(),
                c2[0].into(),
                c2[1].into(),
                end[0].into(),
                end[1].into(),
            ],
        );
    }

    pub(crate) fn draw_image(&mut self, image: &ImageBlock, x: f32, y: f32) {
        let name = self.images.name_for(&image.image);
        let bottom = self.pdf_y(y + image.height);
        self.op("q", vec![]);
        self.op(
            "cm",
            vec![
                image.width.into(),
                0.into(),
                0.into(),
                image.height.into(),
                x.into(),
                bottom.into(),
            ],
        );
        self.op("Do", vec![Object::Name(name.into_bytes())]);
        self.op("Q", vec![]);
        // Q restores the graphics state, so cached settings may be stale.
        self.state = DrawState::default();
    }
}

/// Raster images used by the document, each embedded once.
#[derive(Debug, Default)]
pub(crate) struct ImageSet {
    images: Vec<Arc<RasterImage>>,
    by_key: HashMap<String, usize>,
}

impl ImageSet {
    pub fn name_for(&mut self, image: &Arc<RasterImage>) -> String {
        let index = match self.by_key.get(&image.key) {
            Some(index) => *index,
            None => {
                self.images.push(image.clone());
                self.by_key.insert(image.key.clone(), self.images.len() - 1);
                self.images.len() - 1
            }
        };
        format!("Im{}", index + 1)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Buffers every image XObject and returns the `/XObject` resource dictionary.
    pub fn write_resources<W: Write + Seek>(
        &self,
        writer: &mut StreamingPdfWriter<W>,
    ) -> Result<Dictionary, RenderError> {
        let mut xobjects = Dictionary::new();
        for (i, image) in self.images.iter().enumerate() {
            let mut dict = dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => image.width_px as i64,
                "Height" => image.height_px as i64,
                "BitsPerComponent" => 8,
            };
            let id = match &image.data {
                RasterData::Jpeg { data, grayscale } => {
                    dict.set("ColorSpace", if *grayscale { "DeviceGray" } else { "DeviceRGB" });
                    dict.set("Filter", "DCTDecode");
                    writer.buffer_object(Object::Stream(Stream::new(dict, data.clone())))
                }
                RasterData::Rgb { pixels, alpha } => {
                    dict.set("ColorSpace", "DeviceRGB");
                    if let Some(alpha) = alpha {
                        let mask = dictionary! {
                            "Type" => "XObject",
                            "Subtype" => "Image",
                            "Width" => image.width_px as i64,
                            "Height" => image.height_px as i64,
                            "ColorSpace" => "DeviceGray",
                            "BitsPerComponent" => 8,
                        };
                        let mask_id = writer.buffer_compressed_stream(mask, alpha)?;
                        dict.set("SMask", mask_id);
                    }
                    writer.buffer_compressed_stream(dict, pixels)?
                }
            };
            xobjects.set(format!("Im{}", i + 1), id);
        }
        Ok(xobjects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::FontRegistry;
    use assessor_idf::{CellRange, TableStyle};
    use assessor_style::{Margins, ParagraphStyle, TextAlign};

    fn operators(content: &Content) -> Vec<String> {
        content.operations.iter().map(|op| op.operator.clone()).collect()
    }

    fn shown_text(content: &Content) -> Vec<String> {
        content
            .operations
            .iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| match op.operands.first() {
                Some(Object::String(bytes, _)) => Some(String::from_utf8_lossy(bytes).into_owned()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn repeated_colors_are_not_re_emitted() {
        let fonts = FontRegistry::with_standard_fonts();
        let mut images = ImageSet::default();
        let mut canvas = Canvas::new(LayoutContext::new(&fonts), &mut images, 595.0, 842.0);
        canvas.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::GRAY);
        canvas.fill_rect(Rect::new(0.0, 20.0, 10.0, 10.0), Color::GRAY);
        let (content, _) = canvas.finish();
        let ops = operators(&content);
        assert_eq!(ops.iter().filter(|op| *op == "rg").count(), 1);
        assert_eq!(ops.iter().filter(|op| *op == "re").count(), 2);
    }

    #[test]
    fn table_cells_and_grid_are_painted() {
        let fonts = FontRegistry::with_standard_fonts();
        let mut images = ImageSet::default();
        let mut canvas = Canvas::new(LayoutContext::new(&fonts), &mut images, 595.0, 842.0);
        let style = TableStyle::new(vec![
            TableCommand::Background(CellRange::row(0), Color::rgb(0xFA, 0xC6, 0x1C)),
            TableCommand::Padding(CellRange::ALL, Margins::all(4.0)),
            TableCommand::Grid(CellRange::rows_from(1), LineStyle::new(0.3, Color::gray(0xB0))),
        ]);
        let table = Block::Table(
            Table::new(
                vec![
                    vec!["Component".into(), "COST".into()],
                    vec!["Bumper".into(), "Rs. 5,000".into()],
                ],
                vec![396.0, 108.0],
            )
            .with_style(style),
        );

        let height = canvas.draw_block(&table, 25.0, 100.0, 545.0).unwrap();
        assert!(height > 0.0);
        let (content, _) = canvas.finish();
        assert_eq!(shown_text(&content), vec!["Component", "COST", "Bumper", "Rs. 5,000"]);
        assert!(operators(&content).iter().filter(|op| *op == "S").count() >= 4);
    }

    #[test]
    fn linked_paragraph_registers_annotation_area() {
        let fonts = FontRegistry::with_standard_fonts();
        let mut images = ImageSet::default();
        let mut canvas = Canvas::new(LayoutContext::new(&fonts), &mut images, 595.0, 842.0);
        let style = Arc::new(ParagraphStyle::sized(8.0).color(Color::BLUE).align(TextAlign::Left));
        let link = Paragraph::new("www.readyassist.in", style).with_link("https://www.readyassist.in");
        canvas.draw_block(&link.into(), 30.0, 780.0, 300.0).unwrap();

        let (_, links) = canvas.finish();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].uri, "https://www.readyassist.in");
        assert!(links[0].rect[0] >= 30.0);
        assert!(links[0].rect[3] <= 842.0 - 780.0);
    }

    #[test]
    fn characters_outside_win_ansi_are_set_as_question_marks() {
        let fonts = FontRegistry::with_standard_fonts();
        let mut images = ImageSet::default();
        let mut canvas = Canvas::new(LayoutContext::new(&fonts), &mut images, 595.0, 842.0);
        let style = Arc::new(ParagraphStyle::sized(8.0));
        canvas.draw_block(&Paragraph::new("₹ 500", style).into(), 30.0, 100.0, 300.0).unwrap();

        let (content, _) = canvas.finish();
        assert_eq!(shown_text(&content), vec!["? 500"]);
    }

    #[test]
    fn placeholder_is_a_closed_filled_path_with_label() {
        let fonts = FontRegistry::with_standard_fonts();
        let mut images = ImageSet::default();
        let mut canvas = Canvas::new(LayoutContext::new(&fonts), &mut images, 595.0, 842.0);
        let drawing = Drawing {
            width: 150.0,
            height: 150.0,
            corner_radius: 8.0,
            fill: Color::gray_level(0.95),
            stroke: Color::gray_level(0.7),
            stroke_width: 1.0,
            label: "Image Placeholder".to_string(),
            label_size: 10.0,
            label_color: Color::gray_level(0.5),
        };
        canvas.draw_block(&drawing.into(), 0.0, 0.0, 150.0).unwrap();
        let (content, _) = canvas.finish();
        let ops = operators(&content);
        assert_eq!(ops.iter().filter(|op| *op == "c").count(), 4);
        assert!(ops.contains(&"B".to_string()));
        assert_eq!(shown_text(&content), vec!["Image Placeholder"]);
    }

    #[test]
    fn images_are_registered_once_per_key() {
        let mut images = ImageSet::default();
        let image = Arc::new(RasterImage {
            key: "static/images/qr_code.png".to_string(),
            width_px: 1,
            height_px: 1,
            data: RasterData::Rgb { pixels: vec![0, 0, 0], alpha: None },
        });
        assert_eq!(images.name_for(&image), "Im1");
        assert_eq!(images.name_for(&image.clone()), "Im1");
        assert_eq!(images.len(), 1);
    }
}
