//! The report generator: assembles, renders and writes one PDF per call.

use crate::assembler::DocumentAssembler;
use crate::assets::ReportAssets;
use crate::config::GeneratorConfig;
use crate::error::ReportError;
use crate::furniture::{footer_band, header_band};
use crate::theme::Theme;
use crate::value::ReportInput;
use assessor_render::{DocumentInfo, DocumentRenderer, PageTemplate, PdfRenderer};
use assessor_resource::{FilesystemResourceProvider, ResourceProvider};
use chrono::Local;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Turns report input into PDF files.
///
/// The theme, assets and renderer are set up once; every call to
/// [`generate_report`](Self::generate_report) only reads them.
pub struct ReportGenerator<R: DocumentRenderer = PdfRenderer> {
    config: GeneratorConfig,
    theme: Theme,
    assets: ReportAssets,
    renderer: R,
}

impl ReportGenerator<PdfRenderer> {
    /// Loads assets from `config.asset_dir`.
    pub fn new(config: GeneratorConfig) -> Result<Self, ReportError> {
        let provider = FilesystemResourceProvider::new(&config.asset_dir);
        Self::with_provider(config, &provider)
    }

    pub fn with_provider(
        config: GeneratorConfig,
        provider: &dyn ResourceProvider,
    ) -> Result<Self, ReportError> {
        let assets = ReportAssets::load(provider, &config.assets);
        let template = PageTemplate::new(config.page)
            .with_bands(header_band(), footer_band(config.page.margins.bottom));
        template.frame()?;

        let info = DocumentInfo {
            title: Some(config.branding.report_title.clone()),
            author: Some(config.branding.company_name.clone()),
            creator: Some(format!("assessor {}", env!("CARGO_PKG_VERSION"))),
            ..DocumentInfo::default()
        };
        let renderer = PdfRenderer::new(template)
            .with_fonts(assets.font_registry())
            .with_info(info);

        Ok(Self {
            config,
            theme: Theme::standard(),
            assets,
            renderer,
        })
    }
}

impl<R: DocumentRenderer> ReportGenerator<R> {
    /// Swaps the document renderer, keeping configuration and assets.
    pub fn with_renderer<T: DocumentRenderer>(self, renderer: T) -> ReportGenerator<T> {
        ReportGenerator {
            config: self.config,
            theme: self.theme,
            assets: self.assets,
            renderer,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn assets(&self) -> &ReportAssets {
        &self.assets
    }

    /// Renders the report into memory.
    pub fn render(&self, input: &ReportInput) -> Result<Vec<u8>, ReportError> {
        let report = DocumentAssembler::new(&self.theme, &self.config.branding, &self.assets)
            .assemble(input);
        let bytes = self.renderer.render(&report.blocks, &report.callbacks())?;
        Ok(bytes)
    }

    /// Renders the report and writes it to
    /// `<output_dir>/<prefix>_<YYYYMMDD_HHMMSS>.pdf`, returning that path.
    ///
    /// The file only appears once it is complete; a failed run leaves nothing
    /// behind in `output_dir`.
    pub fn generate_report<P: AsRef<Path>>(
        &self,
        input: &ReportInput,
        output_dir: P,
    ) -> Result<PathBuf, ReportError> {
        self.write_report(input, output_dir.as_ref())
            .inspect_err(|e| log::error!("Error generating PDF report: {}", e))
    }

    /// Parses `json` as report input, then behaves like
    /// [`generate_report`](Self::generate_report).
    pub fn generate_report_json<P: AsRef<Path>>(
        &self,
        json: &str,
        output_dir: P,
    ) -> Result<PathBuf, ReportError> {
        let input = ReportInput::from_json(json)
            .inspect_err(|e| log::error!("Error generating PDF report: {}", e))?;
        self.generate_report(&input, output_dir)
    }

    pub fn file_name(&self) -> String {
        format!(
            "{}_{}.pdf",
            self.config.file_prefix,
            Local::now().format(TIMESTAMP_FORMAT)
        )
    }

    fn write_report(&self, input: &ReportInput, output_dir: &Path) -> Result<PathBuf, ReportError> {
        let bytes = self.render(input)?;

        fs::create_dir_all(output_dir)?;
        let path = output_dir.join(self.file_name());
        let mut file = NamedTempFile::new_in(output_dir)?;
        file.write_all(&bytes)?;
        file.persist(&path).map_err(|e| ReportError::Persist {
            path: path.clone(),
            source: e.error,
        })?;

        log::info!("Wrote {} ({} bytes)", path.display(), bytes.len());
        Ok(path)
    }
}
