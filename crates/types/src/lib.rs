pub mod color;
pub mod geometry;
pub mod raster;

pub use color::Color;
pub use geometry::{Rect, Size};
pub use raster::{RasterData, RasterImage};
