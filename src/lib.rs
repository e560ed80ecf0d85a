//! Vehicle damage assessment reports rendered to PDF.
//!
//! Report input is a JSON object whose `data` member maps section names to
//! content. Sections are laid out in input order: a few well-known sections
//! get a fixed layout, everything else is classified by shape and turned into
//! a table. Every page carries a brand header and a footer with
//! `Page X of Y` numbering.
//!
//! ```no_run
//! use assessor::{GeneratorConfig, ReportGenerator, ReportInput};
//!
//! # fn main() -> Result<(), assessor::ReportError> {
//! let generator = ReportGenerator::new(GeneratorConfig::default())?;
//! let input = ReportInput::from_json(r#"{"data": {"Vehicle Details": {"Make": "Honda"}}}"#)?;
//! let path = generator.generate_report(&input, "reports")?;
//! println!("{}", path.display());
//! # Ok(())
//! # }
//! ```

pub mod assembler;
pub mod assets;
pub mod classify;
pub mod config;
pub mod error;
pub mod format;
pub mod furniture;
pub mod generator;
pub mod sections;
pub mod tables;
pub mod theme;
pub mod value;

pub use assembler::{AssembledReport, DocumentAssembler};
pub use assets::ReportAssets;
pub use config::{AssetPaths, Branding, ConfigError, GeneratorConfig};
pub use error::ReportError;
pub use generator::ReportGenerator;
pub use theme::{Palette, Theme};
pub use value::{Number, Record, ReportInput, ReportValue};

pub use assessor_render::{DocumentRenderer, PdfRenderer, RenderError};
