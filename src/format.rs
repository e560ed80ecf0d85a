//! Cell value formatting.
//!
//! [`format_value`] is total: every [`ReportValue`] formats to something, and
//! malformed data degrades to text or the [`PLACEHOLDER`] rather than failing.

use crate::value::{Number, Record, ReportValue};
use assessor_style::TextAlign;
use itertools::Itertools;

/// Shown wherever a value is missing.
pub const PLACEHOLDER: &str = "N/A";

/// Prefix of every monetary amount.
pub const CURRENCY_MARKER: &str = "Rs.";

const DEALER_KEY: &str = "Dealer";
const VALUE_KEY: &str = "Value";
const OBSERVATION_KEY: &str = "Observation";
const RECOMMENDATION_KEY: &str = "Recommendation";
const MONEY_KEY_WORDS: [&str; 3] = ["cost", "price", "value"];

/// A formatted table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedCell {
    pub text: String,
    pub align: TextAlign,
}

impl FormattedCell {
    pub fn left(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            align: TextAlign::Left,
        }
    }

    pub fn right(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            align: TextAlign::Right,
        }
    }

    pub fn placeholder() -> Self {
        Self::left(PLACEHOLDER)
    }
}

/// The result of formatting one value.
#[derive(Debug, Clone, PartialEq)]
pub enum Formatted<'a> {
    Cell(FormattedCell),
    /// An observation/recommendation record, handed back untouched so the
    /// caller can lay it out as its own columns.
    Raw(&'a Record),
}

impl Formatted<'_> {
    /// Collapses the result into a single cell. Raw records become their
    /// `key: value` lines.
    pub fn into_cell(self) -> FormattedCell {
        match self {
            Formatted::Cell(cell) => cell,
            Formatted::Raw(record) => FormattedCell::left(record_lines(record)),
        }
    }
}

/// Formats `value` for a table cell.
///
/// `align_right` marks a monetary context: numbers get the currency marker and
/// right alignment. `is_boolean` forces a `Yes`/`No` rendering by truthiness.
pub fn format_value(value: &ReportValue, align_right: bool, is_boolean: bool) -> Formatted<'_> {
    if is_boolean {
        return Formatted::Cell(FormattedCell::left(yes_no(value.is_truthy())));
    }
    let cell = match value {
        ReportValue::Number(n) if align_right => FormattedCell::right(format_currency(*n)),
        ReportValue::Number(n) => FormattedCell::left(group_thousands(*n)),
        ReportValue::Bool(b) => FormattedCell::left(yes_no(*b)),
        ReportValue::List(items) => FormattedCell::left(list_text(items)),
        ReportValue::Record(record) => {
            if let Some(line) = dealer_line(record) {
                FormattedCell::left(line)
            } else if has_observation(record) {
                return Formatted::Raw(record);
            } else {
                FormattedCell::left(record_lines(record))
            }
        }
        ReportValue::Text(s) => FormattedCell::left(s.clone()),
        ReportValue::Null => FormattedCell::placeholder(),
    };
    Formatted::Cell(cell)
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// `Rs. ` followed by the grouped amount.
pub fn format_currency(amount: Number) -> String {
    format!("{} {}", CURRENCY_MARKER, group_thousands(amount))
}

/// Inserts a comma every three integer digits. Floats keep their fraction.
pub fn group_thousands(amount: Number) -> String {
    let plain = amount.to_string();
    if !amount.as_f64().is_finite() || plain.contains(['e', 'E']) {
        return plain;
    }
    let (sign, unsigned) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain.as_str()),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let digits: Vec<char> = integer.chars().collect();
    let grouped = digits
        .rchunks(3)
        .rev()
        .map(|chunk| chunk.iter().collect::<String>())
        .join(",");

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Whether a record describes a damaged component.
pub fn has_observation(record: &Record) -> bool {
    record.contains_key(OBSERVATION_KEY) || record.contains_key(RECOMMENDATION_KEY)
}

/// Whether a field name denotes an amount of money.
pub fn is_money_key(key: &str) -> bool {
    let key = key.to_lowercase();
    MONEY_KEY_WORDS.iter().any(|word| key.contains(word))
}

/// Plain text of a value nested inside another cell.
pub fn inline_text(value: &ReportValue) -> String {
    match value {
        ReportValue::Null => PLACEHOLDER.to_string(),
        ReportValue::Bool(b) => yes_no(*b).to_string(),
        ReportValue::Number(n) => n.to_string(),
        ReportValue::Text(s) => s.clone(),
        ReportValue::List(items) => items.iter().map(inline_text).join(", "),
        ReportValue::Record(record) => record
            .iter()
            .map(|(k, v)| format!("{}: {}", k, inline_text(v)))
            .join(", "),
    }
}

/// `<dealer>: Rs. <value>` for a market quote record.
fn dealer_line(record: &Record) -> Option<String> {
    let dealer = record.get(DEALER_KEY)?;
    let value = record.get(VALUE_KEY)?;
    let amount = match value.as_number() {
        Some(n) => format_currency(n),
        None => format!("{} {}", CURRENCY_MARKER, inline_text(value)),
    };
    Some(format!("{}: {}", inline_text(dealer), amount))
}

fn list_text(items: &[ReportValue]) -> String {
    let records: Option<Vec<&Record>> = items.iter().map(ReportValue::as_record).collect();
    match records {
        Some(records) => records
            .into_iter()
            .map(|record| {
                dealer_line(record).unwrap_or_else(|| {
                    record
                        .iter()
                        .map(|(k, v)| format!("{}: {}", k, inline_text(v)))
                        .join(", ")
                })
            })
            .join("\n"),
        None => items.iter().map(inline_text).join(", "),
    }
}

fn record_lines(record: &Record) -> String {
    record
        .iter()
        .map(|(k, v)| match v {
            ReportValue::Number(n) if is_money_key(k) => format!("{}: {}", k, format_currency(*n)),
            _ => format!("{}: {}", k, inline_text(v)),
        })
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json(s: &str) -> ReportValue {
        serde_json::from_str(s).unwrap()
    }

    fn text(value: &ReportValue, align_right: bool, is_boolean: bool) -> FormattedCell {
        format_value(value, align_right, is_boolean).into_cell()
    }

    #[test]
    fn groups_integers_and_floats() {
        assert_eq!(group_thousands(Number::Int(0)), "0");
        assert_eq!(group_thousands(Number::Int(999)), "999");
        assert_eq!(group_thousands(Number::Int(1000)), "1,000");
        assert_eq!(group_thousands(Number::Int(-1234567)), "-1,234,567");
        assert_eq!(group_thousands(Number::Float(1234.5)), "1,234.5");
        assert_eq!(group_thousands(Number::Float(150000.0)), "150,000.0");
    }

    #[test]
    fn money_is_prefixed_and_right_aligned() {
        let cell = text(&json("45000"), true, false);
        assert_eq!(cell, FormattedCell::right("Rs. 45,000"));

        let cell = text(&json("45000"), false, false);
        assert_eq!(cell, FormattedCell::left("45,000"));
    }

    #[test]
    fn booleans_render_yes_no() {
        assert_eq!(text(&json("true"), false, false).text, "Yes");
        assert_eq!(text(&json("false"), false, true).text, "No");
        assert_eq!(text(&json("\"Detected\""), false, true).text, "Yes");
        assert_eq!(text(&json("0"), true, true).text, "No");
    }

    #[test]
    fn market_quotes_render_one_per_line() {
        let value = json(r#"[{"Dealer": "Sharma Motors", "Value": 350000}, {"Dealer": "City Cars", "Value": 365000.5}]"#);
        assert_eq!(
            text(&value, false, false).text,
            "Sharma Motors: Rs. 350,000\nCity Cars: Rs. 365,000.5"
        );
    }

    #[test]
    fn generic_record_lists_join_pairs() {
        let value = json(r#"[{"Part": "Bumper", "Replaced": true}, {"Part": "Door"}]"#);
        assert_eq!(text(&value, false, false).text, "Part: Bumper, Replaced: Yes\nPart: Door");
    }

    #[test]
    fn scalar_lists_are_comma_joined() {
        assert_eq!(text(&json(r#"["Dent", "Scratch", 3]"#), false, false).text, "Dent, Scratch, 3");
    }

    #[test]
    fn records_render_as_lines_with_money_keys() {
        let value = json(r#"{"Labour Cost": 2500, "Hours": 4, "Paint Needed": false}"#);
        assert_eq!(
            text(&value, false, false).text,
            "Labour Cost: Rs. 2,500\nHours: 4\nPaint Needed: No"
        );
    }

    #[test]
    fn dealer_records_render_on_one_line() {
        let value = json(r#"{"Dealer": "Sharma Motors", "Value": 1200}"#);
        assert_eq!(text(&value, false, false).text, "Sharma Motors: Rs. 1,200");
    }

    #[test]
    fn observation_records_are_returned_raw() {
        let value = json(r#"{"Observation": "Cracked", "Recommendation": "Replace"}"#);
        match format_value(&value, false, false) {
            Formatted::Raw(record) => assert_eq!(record.len(), 2),
            other => panic!("expected raw record, got {other:?}"),
        }
    }

    #[test]
    fn null_and_text_fall_back_to_strings() {
        assert_eq!(text(&ReportValue::Null, false, false).text, PLACEHOLDER);
        assert_eq!(text(&json("\"Honda City\""), true, false), FormattedCell::left("Honda City"));
    }
}
