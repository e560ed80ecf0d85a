use assessor::format::{format_currency, format_value, group_thousands, FormattedCell};
use assessor::{Number, ReportValue};
use assessor_style::TextAlign;
use proptest::prelude::*;

proptest! {
    #[test]
    fn grouping_only_inserts_separators(n in any::<i64>()) {
        let grouped = group_thousands(Number::Int(n));
        prop_assert_eq!(grouped.replace(',', ""), n.to_string());

        let digits = grouped.trim_start_matches('-');
        let mut groups = digits.split(',');
        let first = groups.next().unwrap_or_default();
        prop_assert!((1..=3).contains(&first.len()));
        for group in groups {
            prop_assert_eq!(group.len(), 3);
        }
    }

    #[test]
    fn currency_is_marked_and_grouped(n in 0i64..1_000_000_000_000) {
        let text = format_currency(Number::Int(n));
        prop_assert!(text.starts_with("Rs. "));
        prop_assert_eq!(&text["Rs. ".len()..], group_thousands(Number::Int(n)));
    }

    #[test]
    fn money_cells_align_right(n in any::<i64>()) {
        let cell = format_value(&ReportValue::Number(Number::Int(n)), true, false).into_cell();
        prop_assert_eq!(cell.align, TextAlign::Right);
        prop_assert!(cell.text.starts_with("Rs. "));
    }

    #[test]
    fn booleans_never_render_raw(flag in any::<bool>(), forced in any::<bool>()) {
        let FormattedCell { text, .. } = format_value(&ReportValue::Bool(flag), false, forced).into_cell();
        prop_assert_eq!(text, if flag { "Yes" } else { "No" });
    }

    #[test]
    fn fractions_survive_grouping(whole in 0u32..10_000_000, cents in 1u32..100) {
        let value = whole as f64 + cents as f64 / 100.0;
        let grouped = group_thousands(Number::Float(value));
        prop_assert_eq!(grouped.replace(',', ""), value.to_string());
    }
}
