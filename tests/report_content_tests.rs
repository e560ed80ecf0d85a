mod common;

use common::fixtures::*;
use common::pdf_assertions::{extract_text, extract_uris, text_positions};
use common::{init_logging, render_json, TestResult};
use serde_json::json;

#[test]
fn test_sample_report_renders_every_section() -> TestResult {
    init_logging();

    let pdf = render_json(&sample_report())?;
    assert_pdf_min_pages!(pdf, 3);
    for header in [
        "Vehicle Details",
        "Accident Summary",
        "Damage Analysis",
        "Repair Cost Estimation",
        "Market Valuation",
        "Market Quotes",
        "Stickers and Signs Observed",
        "Previous Claims",
        "Vehicle Consistency Check",
    ] {
        assert_pdf_contains_text!(pdf, header);
    }
    Ok(())
}

#[test]
fn test_damage_table_lists_components() -> TestResult {
    init_logging();

    let pdf = render_json(&sample_report())?;
    assert_pdf_contains_text!(pdf, "Component");
    assert_pdf_contains_text!(pdf, "OBSERVATION");
    assert_pdf_contains_text!(pdf, "RECOMMENDATION");
    assert_pdf_contains_text!(pdf, "Rear Bumper");
    assert_pdf_contains_text!(pdf, "Broken lens");
    Ok(())
}

#[test]
fn test_damage_analysis_starts_a_new_page() -> TestResult {
    init_logging();

    let pdf = render_json(&sample_report())?;
    assert!(!pdf.page_text(1).contains("Damage Analysis"));
    assert!(pdf.page_text(2).contains("Damage Analysis"));
    Ok(())
}

#[test]
fn test_repair_total_is_the_last_row() -> TestResult {
    init_logging();

    let pdf = render_json(&sample_report())?;
    let text = extract_text(&pdf.doc);
    let boot_lid = text.rfind("Boot Lid").ok_or("missing component row")?;
    let total = text.find("Total Repair Cost").ok_or("missing total row")?;
    assert!(total > boot_lid, "total should follow the components:\n{text}");
    assert_pdf_contains_text!(pdf, "Rs. 18,500");
    assert_pdf_contains_text!(pdf, "Rs. 9,500");
    Ok(())
}

#[test]
fn test_market_valuation_shows_allow_listed_figures_and_quotes() -> TestResult {
    init_logging();

    let pdf = render_json(&report(json!({
        "Market Valuation (INR)": {
            "Pre-Accident Value": 550000,
            "Depreciation Notes": "should not appear",
            "Market Quotes": [{"Dealer": "City Motors", "Value": 540000}]
        }
    })))?;
    assert_pdf_contains_text!(pdf, "Pre-Accident Value");
    assert_pdf_contains_text!(pdf, "Rs. 550,000");
    assert_pdf_contains_text!(pdf, "City Motors");
    assert_pdf_contains_text!(pdf, "Rs. 540,000");
    assert_pdf_not_contains_text!(pdf, "Depreciation Notes");
    Ok(())
}

#[test]
fn test_empty_sections_are_skipped() -> TestResult {
    init_logging();

    let pdf = render_json(&report(json!({
        "Empty Record": {},
        "Empty List": [],
        "Nothing": null,
        "Vehicle Details": {"Make": "Honda"}
    })))?;
    assert_pdf_contains_text!(pdf, "Vehicle Details");
    assert_pdf_not_contains_text!(pdf, "Empty Record");
    assert_pdf_not_contains_text!(pdf, "Empty List");
    assert_pdf_not_contains_text!(pdf, "Nothing");
    Ok(())
}

#[test]
fn test_record_lists_use_the_union_of_keys() -> TestResult {
    init_logging();

    let pdf = render_json(&sample_report())?;
    assert_pdf_contains_text!(pdf, "CLAIM NO");
    assert_pdf_contains_text!(pdf, "AMOUNT");
    assert_pdf_contains_text!(pdf, "INSURER");
    assert_pdf_contains_text!(pdf, "Acme General");
    assert_pdf_contains_text!(pdf, "N/A");
    Ok(())
}

#[test]
fn test_booleans_render_as_yes_no() -> TestResult {
    init_logging();

    let pdf = render_json(&report(json!({
        "Stickers and Signs Observed": {"Fastag": true, "Press Sticker": false}
    })))?;
    assert_pdf_contains_text!(pdf, "Yes");
    assert_pdf_contains_text!(pdf, "No");
    assert_pdf_not_contains_text!(pdf, "true");
    Ok(())
}

#[test]
fn test_every_page_is_numbered_with_the_final_count() -> TestResult {
    init_logging();

    let pdf = render_json(&sample_report())?;
    let total = pdf.page_count();
    assert!(total >= 3);
    for page in 1..=total {
        let text = pdf.page_text(page as u32);
        let label = format!("Page {} of {}", page, total);
        assert!(text.contains(&label), "page {page} should carry '{label}':\n{text}");
        assert!(text.contains("Comprehensive Vehicle Report"));
    }
    Ok(())
}

#[test]
fn test_footer_links_to_the_website() -> TestResult {
    init_logging();

    let pdf = render_json(&report(json!({"Vehicle Details": {"Make": "Honda"}})))?;
    assert_pdf_contains_text!(pdf, "www.readyassist.in");
    assert!(extract_uris(&pdf.doc).contains(&"https://www.readyassist.in".to_string()));
    Ok(())
}

#[test]
fn test_report_without_data_still_has_furniture() -> TestResult {
    init_logging();

    let pdf = render_json(&json!({}))?;
    assert_eq!(pdf.page_count(), 1);
    assert_pdf_contains_text!(pdf, "Page 1 of 1");
    assert_pdf_contains_text!(pdf, "ReadyAssist");
    Ok(())
}

#[test]
fn test_long_image_sections_continue_across_pages() -> TestResult {
    init_logging();

    let details: serde_json::Map<String, serde_json::Value> = (0..60)
        .map(|i| (format!("Param {i:02}"), json!(format!("Value {i:02}"))))
        .collect();
    let pdf = render_json(&report(json!({ "Vehicle Details": details })))?;

    assert_pdf_min_pages!(pdf, 2);
    let first_page = pdf.page_text(1);
    assert!(first_page.contains("Vehicle Details"));
    assert!(first_page.contains("Param 00"), "rows should start below the header:\n{first_page}");
    for i in 0..60 {
        assert_pdf_contains_text!(pdf, &format!("Param {i:02}"));
    }
    assert_pdf_contains_text!(pdf, "Image Placeholder");

    for page in 1..=pdf.page_count() as u32 {
        for (text, y) in text_positions(&pdf.doc, page) {
            assert!(
                (0.0..=842.0).contains(&y),
                "'{text}' on page {page} is set off the page at y={y}"
            );
        }
    }
    Ok(())
}
