//! Generator configuration.
//!
//! Every field has a default, so an empty JSON object is a valid
//! configuration and a config file only needs to name what it changes.

use assessor_style::{Margins, PageLayout, PageSize};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Texts printed in the page header and footer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Branding {
    pub brand_name: String,
    pub report_title: String,
    pub report_subtitle: String,
    pub company_name: String,
    pub company_address: String,
    pub website_label: String,
    pub website_url: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            brand_name: "ReadyAssist".to_string(),
            report_title: "Comprehensive Vehicle Report".to_string(),
            report_subtitle: "A system generated report by AI operated Impact Analysis system"
                .to_string(),
            company_name: "Sundaravijayam Automobile Services Private Limited".to_string(),
            company_address: "839/2, 24th Main Rd, Behind Thirumala Theatre, 1st Sector, HSR Layout, Bengaluru, Karnataka 560102".to_string(),
            website_label: "www.readyassist.in".to_string(),
            website_url: "https://www.readyassist.in".to_string(),
        }
    }
}

/// Asset locations, relative to [`GeneratorConfig::asset_dir`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssetPaths {
    pub font: String,
    pub logo: String,
    pub qr_code: String,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            font: "static/fonts/DejaVuSans.ttf".to_string(),
            logo: "static/images/readyassist_logo.png".to_string(),
            qr_code: "static/images/qr_code.png".to_string(),
        }
    }
}

pub(crate) fn default_page() -> PageLayout {
    PageLayout {
        size: PageSize::A4,
        margins: Margins::new(25.0, 25.0, 45.0, 25.0),
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorConfig {
    pub asset_dir: PathBuf,
    pub assets: AssetPaths,
    /// Output files are named `<prefix>_<YYYYMMDD_HHMMSS>.pdf`.
    pub file_prefix: String,
    pub page: PageLayout,
    pub branding: Branding,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("."),
            assets: AssetPaths::default(),
            file_prefix: "vehicle_damage_report".to_string(),
            page: default_page(),
            branding: Branding::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::debug!("Loaded generator config from {}", path.display());
        Ok(config)
    }

    pub fn with_asset_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.asset_dir = dir.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_config_uses_defaults() {
        let config = GeneratorConfig::from_json("{}").unwrap();
        assert_eq!(config, GeneratorConfig::default());
        assert_eq!(config.page.margins.bottom, 45.0);
        assert_eq!(config.branding.brand_name, "ReadyAssist");
    }

    #[test]
    fn partial_overrides_keep_other_defaults() {
        let config = GeneratorConfig::from_json(
            r#"{"filePrefix": "claim", "branding": {"brandName": "Acme Assist"}, "assets": {"qrCode": "qr.jpg"}}"#,
        )
        .unwrap();
        assert_eq!(config.file_prefix, "claim");
        assert_eq!(config.branding.brand_name, "Acme Assist");
        assert_eq!(config.branding.website_url, "https://www.readyassist.in");
        assert_eq!(config.assets.qr_code, "qr.jpg");
        assert_eq!(config.assets.logo, AssetPaths::default().logo);
    }

    #[test]
    fn reads_config_files() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"assetDir": "/srv/assets"}}"#).unwrap();
        let config = GeneratorConfig::from_file(file.path()).unwrap();
        assert_eq!(config.asset_dir, PathBuf::from("/srv/assets"));

        let missing = GeneratorConfig::from_file("/nonexistent/assessor.json");
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
        assert!(matches!(GeneratorConfig::from_json("{"), Err(ConfigError::Parse(_))));
    }
}
