#![allow(dead_code)]

pub mod fixtures;
pub mod pdf_assertions;

use assessor::{GeneratorConfig, ReportError, ReportGenerator, ReportInput};
use assessor_resource::InMemoryResourceProvider;
use lopdf::Document as LopdfDocument;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    /// Create a GeneratedPdf from raw bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    /// Load a report written to disk
    pub fn from_file(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        Self::from_bytes(std::fs::read(path)?)
    }

    /// Get the number of pages in the PDF
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Text of a single page (1-based)
    pub fn page_text(&self, page: u32) -> String {
        self.doc.extract_text(&[page]).unwrap_or_default()
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A generator without any assets, so the header uses its text fallbacks
pub fn generator() -> Result<ReportGenerator, ReportError> {
    generator_with(GeneratorConfig::default())
}

pub fn generator_with(config: GeneratorConfig) -> Result<ReportGenerator, ReportError> {
    ReportGenerator::with_provider(config, &InMemoryResourceProvider::new())
}

/// Render report JSON into memory
pub fn render_json(json: &serde_json::Value) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    let input = ReportInput::from_json(&json.to_string())?;
    let bytes = generator()?.render(&input)?;
    GeneratedPdf::from_bytes(bytes)
}
