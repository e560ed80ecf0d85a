//! Section classification.
//!
//! The shape of a section is inferred from its content alone: records of
//! observation/recommendation pairs become a damage table, other records a
//! parameter table, lists a column table. [`SectionBuilder`] turns each shape
//! into content blocks.

use crate::format::{self, format_value, has_observation, inline_text, FormattedCell};
use crate::tables::DataTable;
use crate::theme::{self, Palette, Theme};
use crate::value::{Record, ReportValue};
use assessor_idf::{
    Block, CellRange, Drawing, Paragraph, Table, TableCell, TableCommand, TableStyle,
};
use assessor_style::{inches, Margins, TextAlign, VerticalAlign};
use indexmap::IndexSet;

const MONEY_SECTION_WORDS: [&str; 4] = ["cost", "price", "value", "estimation"];
const IMAGE_SECTION_WORDS: [&str; 5] = [
    "vehicle details",
    "vehicle dashboard",
    "vehicle condition",
    "stickers",
    "signs",
];
const BOOLEAN_KEYS: [&str; 1] = ["same vehicle detected"];

/// Width shared by list tables.
const LIST_TABLE_WIDTH: f32 = 7.0 * 72.0;

/// The visual representation chosen for a section.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionShape<'a> {
    /// Components mapped to observation/recommendation records.
    DamageAnalysis(&'a Record),
    KeyValue(&'a Record),
    /// Records that all carry a dealer and a value.
    Quotes(Vec<&'a Record>),
    ListOfRecords(Vec<&'a Record>),
    SimpleList(&'a [ReportValue]),
    Scalar(&'a ReportValue),
}

pub fn classify(content: &ReportValue) -> SectionShape<'_> {
    match content {
        ReportValue::Record(record) => {
            let damage = record
                .values()
                .filter_map(ReportValue::as_record)
                .any(has_observation);
            if damage {
                SectionShape::DamageAnalysis(record)
            } else {
                SectionShape::KeyValue(record)
            }
        }
        ReportValue::List(items) if !items.is_empty() => {
            let records: Option<Vec<&Record>> = items.iter().map(ReportValue::as_record).collect();
            match records {
                Some(records) if records.iter().all(|r| is_quote(r)) => SectionShape::Quotes(records),
                Some(records) => SectionShape::ListOfRecords(records),
                None => SectionShape::SimpleList(items),
            }
        }
        ReportValue::List(items) => SectionShape::SimpleList(items),
        other => SectionShape::Scalar(other),
    }
}

fn is_quote(record: &Record) -> bool {
    record.contains_key("Dealer") && record.contains_key("Value")
}

fn name_contains_any(name: &str, words: &[&str]) -> bool {
    let name = name.to_lowercase();
    words.iter().any(|word| name.contains(word))
}

/// Whether numbers in a section are amounts of money.
pub fn is_money_section(name: &str) -> bool {
    name_contains_any(name, &MONEY_SECTION_WORDS)
}

/// Whether a section is laid out next to an image placeholder.
pub fn has_image_placeholder(name: &str) -> bool {
    name_contains_any(name, &IMAGE_SECTION_WORDS)
}

/// A rounded, captioned box standing in for a photo.
pub fn image_placeholder(width: f32, height: f32, palette: &Palette) -> Drawing {
    Drawing {
        width,
        height,
        corner_radius: 8.0,
        fill: palette.placeholder_fill,
        stroke: palette.placeholder_stroke,
        stroke_width: 1.0,
        label: "Image Placeholder".to_string(),
        label_size: 10.0,
        label_color: palette.muted_text,
    }
}

/// A table style that only places content, with no padding or lines.
pub fn layout_style(align: TextAlign, valign: VerticalAlign) -> TableStyle {
    TableStyle::new(vec![
        TableCommand::Align(CellRange::ALL, align),
        TableCommand::VAlign(CellRange::ALL, valign),
        TableCommand::Padding(CellRange::ALL, Margins::all(0.0)),
    ])
}

/// Builds the body blocks of generically rendered sections.
#[derive(Debug, Clone, Copy)]
pub struct SectionBuilder<'t> {
    theme: &'t Theme,
}

impl<'t> SectionBuilder<'t> {
    pub fn new(theme: &'t Theme) -> Self {
        Self { theme }
    }

    /// The body of section `name`. Sections without data rows produce no blocks.
    pub fn build(&self, name: &str, content: &ReportValue) -> Vec<Block> {
        let shape = classify(content);
        log::debug!("Section '{}' classified as {}", name, shape.kind());
        self.shape_blocks(name, shape)
    }

    fn shape_blocks(&self, name: &str, shape: SectionShape<'_>) -> Vec<Block> {
        match shape {
            SectionShape::DamageAnalysis(record) => self.damage_table(record).into_iter().collect(),
            SectionShape::KeyValue(record) => self.key_value(name, record),
            SectionShape::Quotes(records) => self.quotes(&records).into_iter().collect(),
            SectionShape::ListOfRecords(records) => {
                self.record_list(&records).into_iter().collect()
            }
            SectionShape::SimpleList(items) => self.simple_list(items).into_iter().collect(),
            SectionShape::Scalar(value) => {
                let text = format_value(value, false, value.is_bool()).into_cell().text;
                vec![Paragraph::new(text, self.theme.style(theme::CELL)).into()]
            }
        }
    }

    fn damage_table(&self, record: &Record) -> Option<Block> {
        let mut table = DataTable::new(["Component", "OBSERVATION", "RECOMMENDATION"]);
        for (component, details) in record {
            let Some(details) = details.as_record() else {
                continue;
            };
            let field = |key: &str| {
                details
                    .get(key)
                    .map(inline_text)
                    .map(FormattedCell::left)
                    .unwrap_or_else(FormattedCell::placeholder)
            };
            table.push_row(vec![
                FormattedCell::left(component.as_str()),
                field("Observation"),
                field("Recommendation"),
            ]);
        }
        let widths = vec![inches(2.3), inches(2.3), inches(2.4)];
        table
            .build(widths, false, &self.theme.palette)
            .map(Block::from)
    }

    fn key_value(&self, name: &str, record: &Record) -> Vec<Block> {
        let money = is_money_section(name);
        let mut table = DataTable::new(["Parameter", "DETAILS"]);
        for (key, value) in record {
            let is_boolean = value.is_bool() || BOOLEAN_KEYS.contains(&key.to_lowercase().as_str());
            let align_right = money && value.as_number().is_some();
            let cell = format_value(value, align_right, is_boolean).into_cell();
            table.push_row(vec![FormattedCell::left(key.as_str()), cell]);
        }

        let palette = &self.theme.palette;
        if !has_image_placeholder(name) {
            let widths = vec![inches(3.0), inches(4.0)];
            return table.build(widths, money, palette).map(Block::from).into_iter().collect();
        }

        let Some(data) = table.build(vec![inches(2.5), inches(2.5)], money, palette) else {
            return Vec::new();
        };
        let placeholder = image_placeholder(150.0, 150.0, palette);
        let layout = Table::new(
            vec![vec![
                TableCell::from(Block::from(data.aligned(TextAlign::Left))),
                TableCell::Empty,
                TableCell::from(Block::from(placeholder)),
            ]],
            vec![inches(5.0), inches(0.2), inches(2.0)],
        )
        .with_style(layout_style(TextAlign::Left, VerticalAlign::Top));
        vec![layout.into()]
    }

    fn quotes(&self, records: &[&Record]) -> Option<Block> {
        let mut table = DataTable::new(["Dealer", "VALUE"]);
        for record in records {
            let dealer = record
                .get("Dealer")
                .map(inline_text)
                .unwrap_or_else(|| format::PLACEHOLDER.to_string());
            let value = record
                .get("Value")
                .map(|v| format_value(v, true, false).into_cell())
                .unwrap_or_else(FormattedCell::placeholder);
            table.push_row(vec![FormattedCell::left(dealer), value]);
        }
        self.list_table(table)
    }

    fn record_list(&self, records: &[&Record]) -> Option<Block> {
        let keys: IndexSet<&str> = records
            .iter()
            .flat_map(|record| record.keys().map(String::as_str))
            .collect();
        if keys.is_empty() {
            return None;
        }
        let mut table = DataTable::new(keys.iter().map(|k| k.to_uppercase())).centered_header();
        for record in records {
            let row = keys
                .iter()
                .map(|key| match record.get(*key) {
                    Some(value) => format_value(value, false, value.is_bool()).into_cell(),
                    None => FormattedCell::placeholder(),
                })
                .collect();
            table.push_row(row);
        }
        self.list_table(table)
    }

    fn simple_list(&self, items: &[ReportValue]) -> Option<Block> {
        let mut table = DataTable::new(["Item"]).centered_header();
        for item in items {
            table.push_row(vec![format_value(item, false, item.is_bool()).into_cell()]);
        }
        self.list_table(table)
    }

    /// List tables split the full table width evenly between their columns.
    fn list_table(&self, table: DataTable) -> Option<Block> {
        let columns = table.column_count();
        let widths = vec![LIST_TABLE_WIDTH / columns as f32; columns];
        table
            .build(widths, false, &self.theme.palette)
            .map(Block::from)
    }
}

impl SectionShape<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            SectionShape::DamageAnalysis(_) => "damage analysis",
            SectionShape::KeyValue(_) => "key-value",
            SectionShape::Quotes(_) => "dealer quotes",
            SectionShape::ListOfRecords(_) => "record list",
            SectionShape::SimpleList(_) => "simple list",
            SectionShape::Scalar(_) => "scalar",
        }
    }
}
