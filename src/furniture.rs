//! Page furniture: the brand header and the company footer with page numbers.
//!
//! Both are [`PageDecorator`]s registered for the first and all later pages.
//! The renderer reserves a band above and below the content frame for them.

use crate::assets::ReportAssets;
use crate::classify::layout_style;
use crate::config::Branding;
use crate::theme::{self, Theme};
use assessor_idf::{Block, CellRange, ImageBlock, LineStyle, Paragraph, Table, TableCell, TableCommand, TableStyle};
use assessor_render::{Canvas, PageDecorator, PageInfo, RenderError};
use assessor_style::{inches, Margins, ParagraphStyle, TextAlign, VerticalAlign};
use std::sync::Arc;

const HEADER_ROW_HEIGHTS: [f32; 3] = [0.8 * 72.0, 0.35 * 72.0, 0.25 * 72.0];
/// Space between the header and the content below it.
const HEADER_GAP: f32 = 15.0;
const LOGO_SIZE: f32 = 0.3 * 72.0;
const QR_SIZE: f32 = 0.8 * 72.0;

/// Height of the dashed footer rule above the page bottom.
const FOOTER_RULE_HEIGHT: f32 = 0.9 * 72.0;
/// Distance between the footer table and the page bottom.
const FOOTER_BOTTOM: f32 = 5.0;
const FOOTER_SIDE_PADDING: f32 = 30.0;

/// Band reserved for the header below the top margin.
pub fn header_band() -> f32 {
    HEADER_ROW_HEIGHTS.iter().sum::<f32>() + HEADER_GAP
}

/// Band reserved above the bottom margin, so the content frame ends just
/// above the footer rule.
pub fn footer_band(bottom_margin: f32) -> f32 {
    (FOOTER_RULE_HEIGHT + 6.0 - bottom_margin).max(0.0)
}

/// Logo, brand name, QR code, report title and subtitle.
#[derive(Debug, Clone)]
pub struct HeaderFurniture {
    table: Block,
}

impl HeaderFurniture {
    pub fn new(theme: &Theme, branding: &Branding, assets: &ReportAssets) -> Self {
        let brand = Paragraph::new(branding.brand_name.as_str(), theme.style(theme::BRAND));
        let logo_row = match &assets.logo {
            Some(logo) => Table::new(
                vec![vec![
                    Block::from(ImageBlock {
                        image: logo.clone(),
                        width: LOGO_SIZE,
                        height: LOGO_SIZE,
                    })
                    .into(),
                    brand.into(),
                ]],
                vec![inches(0.35), inches(2.0)],
            ),
            None => {
                log::warn!("Logo image not found, using brand name only");
                Table::new(vec![vec![brand.into()]], vec![inches(2.35)])
            }
        }
        .with_style(layout_style(TextAlign::Left, VerticalAlign::Middle))
        .aligned(TextAlign::Left);

        let qr: Block = match &assets.qr_code {
            Some(qr) => ImageBlock {
                image: qr.clone(),
                width: QR_SIZE,
                height: QR_SIZE,
            }
            .into(),
            None => {
                log::warn!("QR code image not found, using text placeholder");
                Paragraph::new("QR", theme.style(theme::QR_FALLBACK)).into()
            }
        };

        let mut style = layout_style(TextAlign::Left, VerticalAlign::Top);
        style.push(TableCommand::Align(CellRange::cell(1, 0), TextAlign::Right));
        style.push(TableCommand::Span(CellRange::new((0, 1), (-1, 2))));

        let table = Table::new(
            vec![
                vec![Block::from(logo_row).into(), qr.into()],
                vec![
                    Paragraph::new(branding.report_title.as_str(), theme.style(theme::REPORT_TITLE)).into(),
                    TableCell::Empty,
                ],
                vec![
                    Paragraph::new(branding.report_subtitle.as_str(), theme.style(theme::REPORT_SUBTITLE))
                        .into(),
                    TableCell::Empty,
                ],
            ],
            vec![inches(5.8), inches(1.2)],
        )
        .with_style(style)
        .with_row_heights(HEADER_ROW_HEIGHTS.to_vec());

        Self {
            table: table.into(),
        }
    }

    pub fn block(&self) -> &Block {
        &self.table
    }
}

impl PageDecorator for HeaderFurniture {
    fn decorate(&self, canvas: &mut Canvas<'_>, page: &PageInfo) -> Result<(), RenderError> {
        let top = page.frame.y - header_band();
        canvas.draw_block(&self.table, page.frame.x, top, page.frame.width)?;
        Ok(())
    }
}

/// Dashed rule, company details with a website link, and `Page X of Y`.
#[derive(Debug, Clone)]
pub struct FooterFurniture {
    company: Block,
    page_style: Arc<ParagraphStyle>,
    rule: LineStyle,
}

impl FooterFurniture {
    pub fn new(theme: &Theme, branding: &Branding) -> Self {
        let lines = vec![
            vec![Paragraph::new(branding.company_name.as_str(), theme.style(theme::FOOTER_COMPANY)).into()],
            vec![Paragraph::new(branding.company_address.as_str(), theme.style(theme::FOOTER_ADDRESS)).into()],
            vec![Paragraph::new(branding.website_label.as_str(), theme.style(theme::FOOTER_LINK))
                .with_link(branding.website_url.as_str())
                .into()],
        ];
        let company = Table::new(lines, vec![])
            .with_style(TableStyle::new(vec![
                TableCommand::Align(CellRange::ALL, TextAlign::Left),
                TableCommand::VAlign(CellRange::ALL, VerticalAlign::Middle),
                TableCommand::Padding(CellRange::ALL, Margins::new(0.0, 6.0, 1.0, 6.0)),
            ]))
            .aligned(TextAlign::Left);

        Self {
            company: company.into(),
            page_style: theme.style(theme::PAGE_NUMBER),
            rule: LineStyle::new(0.5, theme.palette.grid),
        }
    }

    pub fn page_label(page: &PageInfo) -> String {
        format!("Page {} of {}", page.number, page.total)
    }

    fn table(&self, page: &PageInfo) -> Table {
        let label = Paragraph::new(Self::page_label(page), self.page_style.clone());
        Table::new(
            vec![vec![self.company.clone().into(), label.into()]],
            vec![inches(5.0), inches(2.0)],
        )
        .with_style(TableStyle::new(vec![
            TableCommand::Align(CellRange::cell(0, 0), TextAlign::Left),
            TableCommand::Align(CellRange::cell(-1, -1), TextAlign::Right),
            TableCommand::VAlign(CellRange::ALL, VerticalAlign::Bottom),
            TableCommand::Padding(
                CellRange::ALL,
                Margins::new(3.0, FOOTER_SIDE_PADDING, 0.0, FOOTER_SIDE_PADDING),
            ),
        ]))
        .aligned(TextAlign::Left)
    }
}

impl PageDecorator for FooterFurniture {
    fn decorate(&self, canvas: &mut Canvas<'_>, page: &PageInfo) -> Result<(), RenderError> {
        let rule_y = page.height - FOOTER_RULE_HEIGHT;
        canvas.dashed_line(
            (page.frame.x, rule_y),
            (page.frame.right(), rule_y),
            self.rule,
            3.0,
            3.0,
        );

        let table: Block = self.table(page).into();
        let width = inches(7.0);
        let height = canvas.measure(&table, width);
        canvas.draw_block(&table, 0.0, page.height - FOOTER_BOTTOM - height, width)?;
        Ok(())
    }
}
