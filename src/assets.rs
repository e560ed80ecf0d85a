//! Optional report assets: the cell font, the brand logo and the QR code.

use crate::config::AssetPaths;
use assessor_render::FontRegistry;
use assessor_resource::{try_load_asset, try_load_image, ResourceProvider, SharedResourceData};
use assessor_style::FontWeight;
use assessor_types::RasterImage;
use std::sync::Arc;

/// Family name the embedded cell font is registered under.
pub const CELL_FONT_FAMILY: &str = "DejaVuSans";

/// Whatever assets could be loaded. Missing ones are `None` and the page
/// furniture falls back to text.
#[derive(Debug, Clone, Default)]
pub struct ReportAssets {
    pub font: Option<SharedResourceData>,
    pub logo: Option<Arc<RasterImage>>,
    pub qr_code: Option<Arc<RasterImage>>,
}

impl ReportAssets {
    pub fn load(provider: &dyn ResourceProvider, paths: &AssetPaths) -> Self {
        let assets = Self {
            font: try_load_asset(provider, &paths.font),
            logo: try_load_image(provider, &paths.logo),
            qr_code: try_load_image(provider, &paths.qr_code),
        };
        log::debug!(
            "Report assets: font={}, logo={}, qr={}",
            assets.font.is_some(),
            assets.logo.is_some(),
            assets.qr_code.is_some()
        );
        assets
    }

    /// The standard fonts, plus the cell font when it was found and parses.
    pub fn font_registry(&self) -> FontRegistry {
        let mut fonts = FontRegistry::with_standard_fonts();
        let Some(program) = &self.font else {
            log::warn!("{} font not found, table text falls back to Helvetica", CELL_FONT_FAMILY);
            return fonts;
        };
        let registered = fonts
            .register_truetype(CELL_FONT_FAMILY, FontWeight::Regular, program.clone())
            .map(|_| ());
        match registered {
            Ok(_) => fonts.set_text_family(CELL_FONT_FAMILY),
            Err(e) => log::warn!("Could not use {} font: {}", CELL_FONT_FAMILY, e),
        }
        fonts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assessor_resource::InMemoryResourceProvider;

    #[test]
    fn missing_assets_fall_back() {
        let provider = InMemoryResourceProvider::new();
        let assets = ReportAssets::load(&provider, &AssetPaths::default());
        assert!(assets.font.is_none() && assets.logo.is_none() && assets.qr_code.is_none());
        assert_eq!(assets.font_registry().text_family(), "Helvetica");
    }

    #[test]
    fn unparseable_fonts_are_skipped() {
        let provider = InMemoryResourceProvider::new();
        let paths = AssetPaths::default();
        provider.add(paths.font.clone(), b"not a font".to_vec()).unwrap();
        let assets = ReportAssets::load(&provider, &paths);
        assert!(assets.font.is_some());
        let fonts = assets.font_registry();
        assert_eq!(fonts.text_family(), "Helvetica");
        assert_eq!(fonts.faces().len(), 2);
    }
}
