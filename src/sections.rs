//! Sections with a fixed layout: repair cost estimation and market valuation.

use crate::format::{format_currency, inline_text};
use crate::theme::{self, Palette, Theme};
use crate::value::{Record, ReportValue};
use assessor_idf::{Block, CellRange, LineStyle, Paragraph, Table, TableCell, TableCommand, TableStyle};
use assessor_style::{inches, FontWeight, Margins, TextAlign};
use assessor_types::Color;

pub const REPAIR_COST_SECTION: &str = "Repair Cost Estimation (INR)";
pub const MARKET_VALUATION_SECTION: &str = "Market Valuation (INR)";

const TOTAL_KEY: &str = "Total Repair Cost";
const MARKET_QUOTES_KEY: &str = "Market Quotes";
const VALUATION_KEYS: [&str; 4] = [
    "Pre-Accident Value",
    "Post-Accident Value",
    "Salvage Value",
    "Estimated Value After Repairs",
];

/// Sections whose layout does not depend on the shape of their content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedicatedSection {
    RepairCost,
    MarketValuation,
}

impl DedicatedSection {
    pub fn for_name(name: &str) -> Option<Self> {
        match name {
            REPAIR_COST_SECTION => Some(DedicatedSection::RepairCost),
            MARKET_VALUATION_SECTION => Some(DedicatedSection::MarketValuation),
            _ => None,
        }
    }

    pub fn build(self, theme: &Theme, content: &Record) -> Vec<Block> {
        match self {
            DedicatedSection::RepairCost => repair_cost(theme, content),
            DedicatedSection::MarketValuation => market_valuation(theme, content),
        }
    }
}

fn money_text(value: &ReportValue) -> String {
    match value.as_number() {
        Some(n) => format_currency(n),
        None => inline_text(value),
    }
}

/// Plain grid style of the summary tables: bold shaded header, right-aligned
/// amounts in the second column. A total row repeats the header emphasis.
fn summary_style(palette: &Palette, total_row: bool) -> TableStyle {
    let mut style = TableStyle::new(vec![
        TableCommand::Background(CellRange::row(0), palette.neutral),
        TableCommand::TextColor(CellRange::ALL, Color::BLACK),
        TableCommand::Align(CellRange::ALL, TextAlign::Left),
        TableCommand::Align(CellRange::new((1, 0), (1, -1)), TextAlign::Right),
        TableCommand::Font(CellRange::row(0), FontWeight::Bold),
        TableCommand::FontSize(CellRange::ALL, 8.0),
        TableCommand::Padding(CellRange::ALL, Margins::new(2.0, 4.0, 2.0, 4.0)),
        TableCommand::Grid(CellRange::ALL, LineStyle::new(0.5, Color::GRAY)),
    ]);
    if total_row {
        style.push(TableCommand::Background(CellRange::row(-1), palette.neutral));
        style.push(TableCommand::Font(CellRange::row(-1), FontWeight::Bold));
    }
    style
}

fn summary_table(
    header: [&str; 2],
    rows: Vec<[String; 2]>,
    widths: [f32; 2],
    total_row: bool,
    palette: &Palette,
) -> Option<Table> {
    if rows.is_empty() {
        return None;
    }
    let cells = std::iter::once(header.map(String::from))
        .chain(rows)
        .map(|row| row.into_iter().map(TableCell::Text).collect())
        .collect();
    Some(Table::new(cells, widths.to_vec()).with_style(summary_style(palette, total_row)))
}

/// Page break, header, component costs in input order and the total last.
fn repair_cost(theme: &Theme, costs: &Record) -> Vec<Block> {
    let mut blocks = vec![
        Block::PageBreak,
        Paragraph::new("Repair Cost Estimation", theme.style(theme::SECTION_HEADER)).into(),
    ];

    let mut rows: Vec<[String; 2]> = costs
        .iter()
        .filter(|(component, _)| component.as_str() != TOTAL_KEY)
        .map(|(component, cost)| [component.clone(), money_text(cost)])
        .collect();
    let total = costs.get(TOTAL_KEY);
    if let Some(total) = total {
        rows.push([TOTAL_KEY.to_string(), money_text(total)]);
    }

    if let Some(table) = summary_table(
        ["Component", "COST"],
        rows,
        [inches(5.5), inches(1.5)],
        total.is_some(),
        &theme.palette,
    ) {
        blocks.push(table.into());
        blocks.push(Block::spacer(1.0, 8.0));
    }
    blocks
}

/// Allow-listed valuation figures, then dealer quotes when there are any.
fn market_valuation(theme: &Theme, valuation: &Record) -> Vec<Block> {
    let mut blocks = vec![
        Paragraph::new("Market Valuation", theme.style(theme::SECTION_HEADER)).into(),
    ];
    let widths = [inches(4.5), inches(2.5)];

    let rows = VALUATION_KEYS
        .iter()
        .filter_map(|key| valuation.get(*key).map(|v| [key.to_string(), money_text(v)]))
        .collect();
    if let Some(table) = summary_table(["Parameter", "VALUE"], rows, widths, false, &theme.palette) {
        blocks.push(table.into());
        blocks.push(Block::spacer(1.0, 4.0));
    }

    let quotes = valuation
        .get(MARKET_QUOTES_KEY)
        .and_then(ReportValue::as_list)
        .filter(|quotes| !quotes.is_empty());
    if let Some(quotes) = quotes {
        blocks.push(Paragraph::new("Market Quotes", theme.style(theme::SUBSECTION_HEADER)).into());
        let rows = quotes
            .iter()
            .filter_map(ReportValue::as_record)
            .filter_map(|quote| {
                let dealer = quote.get("Dealer")?;
                let value = quote.get("Value")?;
                Some([inline_text(dealer), money_text(value)])
            })
            .collect();
        if let Some(table) = summary_table(["Dealer", "VALUE"], rows, widths, false, &theme.palette) {
            blocks.push(table.into());
            blocks.push(Block::spacer(1.0, 4.0));
        }
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: &str) -> Record {
        match serde_json::from_str::<ReportValue>(json).unwrap() {
            ReportValue::Record(record) => record,
            other => panic!("not a record: {other:?}"),
        }
    }

    fn tables(blocks: &[Block]) -> Vec<&Table> {
        blocks.iter().filter_map(Block::as_table).collect()
    }

    #[test]
    fn dispatch_is_by_exact_name() {
        assert_eq!(DedicatedSection::for_name(REPAIR_COST_SECTION), Some(DedicatedSection::RepairCost));
        assert_eq!(
            DedicatedSection::for_name(MARKET_VALUATION_SECTION),
            Some(DedicatedSection::MarketValuation)
        );
        assert_eq!(DedicatedSection::for_name("Repair Cost Estimation"), None);
        assert_eq!(DedicatedSection::for_name("Damage Analysis"), None);
    }

    #[test]
    fn total_repair_cost_comes_last_and_stands_out() {
        let theme = Theme::standard();
        let costs = record(r#"{"Total Repair Cost": 5000, "Bumper": 5000}"#);
        let blocks = DedicatedSection::RepairCost.build(&theme, &costs);

        assert_eq!(blocks[0], Block::PageBreak);
        assert_eq!(blocks[1].as_text(), Some("Repair Cost Estimation"));
        let table = tables(&blocks)[0];
        assert_eq!(
            table.text_grid(),
            vec![
                vec!["Component", "COST"],
                vec!["Bumper", "Rs. 5,000"],
                vec!["Total Repair Cost", "Rs. 5,000"],
            ]
        );
        let total = table.style.attributes(0, 2, 2, 3);
        assert_eq!(total.font_weight, FontWeight::Bold);
        assert_eq!(total.background, Some(theme.palette.neutral));
        assert_eq!(table.style.attributes(0, 1, 2, 3).font_weight, FontWeight::Regular);
        assert_eq!(table.style.attributes(1, 1, 2, 3).align, TextAlign::Right);
    }

    #[test]
    fn repair_costs_without_a_total_have_no_emphasized_row() {
        let theme = Theme::standard();
        let costs = record(r#"{"Bumper": 5000, "Headlamp": "pending"}"#);
        let blocks = DedicatedSection::RepairCost.build(&theme, &costs);
        let table = tables(&blocks)[0];
        assert_eq!(table.text_grid()[2], vec!["Headlamp", "pending"]);
        assert_eq!(table.style.attributes(0, 2, 2, 3).font_weight, FontWeight::Regular);
    }

    #[test]
    fn valuation_uses_the_allow_list_order() {
        let theme = Theme::standard();
        let valuation = record(
            r#"{"Salvage Value": 90000, "Notes": "ignored", "Pre-Accident Value": 550000,
                "Market Quotes": [{"Dealer": "Sharma Motors", "Value": 350000}, {"Dealer": "No Value"}]}"#,
        );
        let blocks = DedicatedSection::MarketValuation.build(&theme, &valuation);
        let tables = tables(&blocks);
        assert_eq!(tables.len(), 2);
        assert_eq!(
            tables[0].text_grid(),
            vec![
                vec!["Parameter", "VALUE"],
                vec!["Pre-Accident Value", "Rs. 550,000"],
                vec!["Salvage Value", "Rs. 90,000"],
            ]
        );
        assert_eq!(
            tables[1].text_grid(),
            vec![vec!["Dealer", "VALUE"], vec!["Sharma Motors", "Rs. 350,000"]]
        );
        assert!(blocks.iter().any(|b| b.as_text() == Some("Market Quotes")));
    }

    #[test]
    fn empty_quotes_are_left_out() {
        let theme = Theme::standard();
        let valuation = record(r#"{"Post-Accident Value": 300000, "Market Quotes": []}"#);
        let blocks = DedicatedSection::MarketValuation.build(&theme, &valuation);
        assert_eq!(tables(&blocks).len(), 1);
        assert!(!blocks.iter().any(|b| b.as_text() == Some("Market Quotes")));
    }
}
