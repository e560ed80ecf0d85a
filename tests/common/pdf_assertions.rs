use lopdf::content::Content;
use lopdf::{Document as LopdfDocument, Object};

/// Extract all text content from a PDF document
pub fn extract_text(doc: &LopdfDocument) -> String {
    let mut text = String::new();
    let pages = doc.get_pages();
    for page_num in 1..=pages.len() {
        if let Ok(page_text) = doc.extract_text(&[page_num as u32]) {
            text.push_str(&page_text);
            text.push('\n');
        }
    }
    text
}

/// Every shown string on `page` (1-based) with the baseline it is set at,
/// in PDF coordinates (origin bottom-left)
pub fn text_positions(doc: &LopdfDocument, page: u32) -> Vec<(String, f32)> {
    let Some(page_id) = doc.get_pages().get(&page).copied() else {
        return Vec::new();
    };
    let Ok(bytes) = doc.get_page_content(page_id) else {
        return Vec::new();
    };
    let Ok(content) = Content::decode(&bytes) else {
        return Vec::new();
    };

    let mut positions = Vec::new();
    let mut baseline = 0.0;
    for op in &content.operations {
        match op.operator.as_str() {
            "Td" => {
                if let Some(y) = op.operands.get(1).and_then(|y| y.as_float().ok()) {
                    baseline = y;
                }
            }
            "Tj" => {
                if let Some(Object::String(bytes, _)) = op.operands.first() {
                    positions.push((String::from_utf8_lossy(bytes).to_string(), baseline));
                }
            }
            _ => {}
        }
    }
    positions
}

/// URIs of all link actions in the document
pub fn extract_uris(doc: &LopdfDocument) -> Vec<String> {
    let mut uris = Vec::new();
    for object in doc.objects.values() {
        let Ok(dict) = object.as_dict() else { continue };
        let action = match dict.get(b"A") {
            Ok(Object::Dictionary(action)) => Some(action),
            Ok(Object::Reference(id)) => doc.get_dictionary(*id).ok(),
            _ => None,
        };
        if let Some(Ok(Object::String(uri, _))) = action.map(|a| a.get(b"URI")) {
            uris.push(String::from_utf8_lossy(uri).to_string());
        }
    }
    uris
}

/// Value of a string entry in the trailer's `/Info` dictionary
pub fn info_entry(doc: &LopdfDocument, key: &[u8]) -> Option<String> {
    let info = match doc.trailer.get(b"Info").ok()? {
        Object::Reference(id) => doc.get_dictionary(*id).ok()?,
        Object::Dictionary(dict) => dict,
        _ => return None,
    };
    match info.get(key).ok()? {
        Object::String(bytes, _) => Some(String::from_utf8_lossy(bytes).to_string()),
        _ => None,
    }
}

/// Assert that PDF contains specific text
#[macro_export]
macro_rules! assert_pdf_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(
            extracted.contains($text),
            "PDF should contain '{}', but extracted text was:\n{}",
            $text,
            extracted
        );
    };
}

/// Assert that PDF does NOT contain specific text
#[macro_export]
macro_rules! assert_pdf_not_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(
            !extracted.contains($text),
            "PDF should NOT contain '{}', but it was found in:\n{}",
            $text,
            extracted
        );
    };
}

/// Assert minimum number of pages
#[macro_export]
macro_rules! assert_pdf_min_pages {
    ($pdf:expr, $min:expr) => {
        assert!(
            $pdf.page_count() >= $min,
            "Expected at least {} pages, got {}",
            $min,
            $pdf.page_count()
        );
    };
}
