//! Decoded raster images ready to be embedded as PDF image XObjects.

/// Pixel payload of a raster image.
#[derive(Debug, Clone, PartialEq)]
pub enum RasterData {
    /// A baseline JPEG file, embedded verbatim.
    Jpeg { data: Vec<u8>, grayscale: bool },
    /// 8-bit RGB samples, row-major, with an optional 8-bit alpha channel.
    Rgb { pixels: Vec<u8>, alpha: Option<Vec<u8>> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    /// Stable identity used to embed an image only once per document.
    pub key: String,
    pub width_px: u32,
    pub height_px: u32,
    pub data: RasterData,
}
