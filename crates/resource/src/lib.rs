//! Read-only asset store for the report generator.
//!
//! Assets (fonts, logo, QR code) are loaded through the [`ResourceProvider`]
//! trait. Missing assets are never fatal: [`try_load_asset`] and
//! [`try_load_image`] return `None` and log a warning so callers can branch
//! on presence and substitute a fallback.
//!
//! ## Available Providers
//!
//! - [`FilesystemResourceProvider`]: Loads assets relative to a base directory
//! - [`InMemoryResourceProvider`]: Pre-populated in-memory storage

mod filesystem;
mod provider;
mod raster;

pub use filesystem::FilesystemResourceProvider;
pub use provider::{InMemoryResourceProvider, ResourceError, ResourceProvider, SharedResourceData};
pub use raster::decode_raster;

use assessor_types::RasterImage;
use std::sync::Arc;

/// Loads an asset, logging a warning and returning `None` when it is unavailable.
pub fn try_load_asset(provider: &dyn ResourceProvider, path: &str) -> Option<SharedResourceData> {
    match provider.load(path) {
        Ok(data) => Some(data),
        Err(e) => {
            log::warn!("Asset '{}' unavailable via {}: {}", path, provider.name(), e);
            None
        }
    }
}

/// Loads and decodes an image asset. Undecodable data is treated like a missing file.
pub fn try_load_image(provider: &dyn ResourceProvider, path: &str) -> Option<Arc<RasterImage>> {
    let data = try_load_asset(provider, path)?;
    match decode_raster(path, &data) {
        Ok(image) => Some(Arc::new(image)),
        Err(e) => {
            log::warn!("Asset '{}' could not be decoded: {}", path, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_assets_are_none() {
        let provider = InMemoryResourceProvider::new();
        assert!(try_load_asset(&provider, "static/fonts/DejaVuSans.ttf").is_none());
        assert!(try_load_image(&provider, "static/images/qr_code.png").is_none());
    }

    #[test]
    fn garbage_images_are_none() {
        let provider = InMemoryResourceProvider::new();
        provider.add("logo.png", b"not a png".to_vec()).unwrap();
        assert!(try_load_asset(&provider, "logo.png").is_some());
        assert!(try_load_image(&provider, "logo.png").is_none());
    }
}
