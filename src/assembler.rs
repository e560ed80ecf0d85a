//! Walks the report sections in input order and assembles the block sequence.
//!
//! Dispatch is by section name first: the repair cost and market valuation
//! sections have a fixed layout. Every other section goes through the
//! classifier, and a section is only ever rendered once.

use crate::assets::ReportAssets;
use crate::classify::{image_placeholder, layout_style, SectionBuilder};
use crate::config::Branding;
use crate::furniture::{FooterFurniture, HeaderFurniture};
use crate::sections::DedicatedSection;
use crate::theme::{self, Theme};
use crate::value::{ReportInput, ReportValue};
use assessor_idf::{Block, Paragraph, Table, TableCell};
use assessor_render::PageCallbacks;
use assessor_style::{TextAlign, VerticalAlign};
use std::sync::Arc;

/// Sections whose header sits closer to the margin and has no spacer below.
const SPECIAL_HEADER_SECTIONS: [&str; 2] = [
    "Stickers and Signs Observed",
    "Vehicle Dashboard and Condition",
];
const PAGE_BREAK_WORD: &str = "damage";
const PHOTO_GRID_SECTION: &str = "vehicle consistency check";

const PHOTO_WIDTH: f32 = 250.0;
const PHOTO_HEIGHT: f32 = 200.0;
const PHOTO_SPACING: f32 = 20.0;

/// The content blocks of a report plus its page furniture.
#[derive(Debug, Clone)]
pub struct AssembledReport {
    pub blocks: Vec<Block>,
    pub header: Arc<HeaderFurniture>,
    pub footer: Arc<FooterFurniture>,
}

impl AssembledReport {
    /// Header and footer on the first page and on every later page.
    pub fn callbacks(&self) -> PageCallbacks {
        PageCallbacks::new()
            .every_page(self.header.clone())
            .every_page(self.footer.clone())
    }
}

pub struct DocumentAssembler<'a> {
    theme: &'a Theme,
    branding: &'a Branding,
    assets: &'a ReportAssets,
}

impl<'a> DocumentAssembler<'a> {
    pub fn new(theme: &'a Theme, branding: &'a Branding, assets: &'a ReportAssets) -> Self {
        Self {
            theme,
            branding,
            assets,
        }
    }

    pub fn assemble(&self, input: &ReportInput) -> AssembledReport {
        let mut blocks = Vec::new();
        match input.sections() {
            Some(sections) => {
                for (name, content) in sections {
                    self.section(name, content, &mut blocks);
                }
            }
            None => log::debug!("Report input has no section data"),
        }
        log::debug!("Assembled {} block(s)", blocks.len());

        AssembledReport {
            blocks,
            header: Arc::new(HeaderFurniture::new(self.theme, self.branding, self.assets)),
            footer: Arc::new(FooterFurniture::new(self.theme, self.branding)),
        }
    }

    fn section(&self, name: &str, content: &ReportValue, blocks: &mut Vec<Block>) {
        if !content.is_truthy() {
            log::debug!("Skipping empty section '{}'", name);
            return;
        }

        let dedicated = DedicatedSection::for_name(name).zip(content.as_record());
        if let Some((section, record)) = dedicated {
            blocks.extend(section.build(self.theme, record));
            return;
        }

        let lower = name.to_lowercase();
        if lower.contains(PAGE_BREAK_WORD) {
            blocks.push(Block::PageBreak);
        }

        if SPECIAL_HEADER_SECTIONS.contains(&name) {
            blocks.push(Paragraph::new(name, self.theme.style(theme::SPECIAL_SECTION_HEADER)).into());
        } else {
            blocks.push(Paragraph::new(name, self.theme.style(theme::SECTION_HEADER)).into());
            blocks.push(Block::spacer(1.0, 4.0));
        }

        blocks.extend(SectionBuilder::new(self.theme).build(name, content));
        blocks.push(Block::spacer(1.0, 12.0));

        if lower.contains(PHOTO_GRID_SECTION) {
            blocks.push(Block::spacer(1.0, 15.0));
            blocks.push(self.photo_grid().into());
            blocks.push(Block::spacer(1.0, 15.0));
        }
    }

    /// Two rows of two photo placeholders, centered in the frame.
    fn photo_grid(&self) -> Table {
        let palette = &self.theme.palette;
        let photo = || TableCell::from(Block::from(image_placeholder(PHOTO_WIDTH, PHOTO_HEIGHT, palette)));
        let row = || vec![photo(), TableCell::Empty, photo()];
        Table::new(
            vec![row(), vec![TableCell::Empty; 3], row()],
            vec![PHOTO_WIDTH, PHOTO_SPACING, PHOTO_WIDTH],
        )
        .with_row_heights(vec![PHOTO_HEIGHT, PHOTO_SPACING, PHOTO_HEIGHT])
        .with_style(layout_style(TextAlign::Center, VerticalAlign::Middle))
    }
}
