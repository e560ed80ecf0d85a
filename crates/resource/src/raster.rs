use crate::provider::ResourceError;
use assessor_types::{RasterData, RasterImage};
use image::GenericImageView;

/// Decodes PNG, JPEG or GIF bytes into an embeddable [`RasterImage`].
///
/// JPEG files are kept as-is so the PDF can carry them with `DCTDecode`;
/// everything else is expanded to RGB plus an alpha channel when one is used.
pub fn decode_raster(key: &str, data: &[u8]) -> Result<RasterImage, ResourceError> {
    let format = image::guess_format(data).ok();
    let decoded = image::load_from_memory(data)
        .map_err(|e| ResourceError::InvalidFormat(format!("{}: {}", key, e)))?;
    let (width, height) = decoded.dimensions();

    if matches!(format, Some(image::ImageFormat::Jpeg)) {
        let grayscale = matches!(
            decoded.color(),
            image::ColorType::L8 | image::ColorType::La8
        );
        return Ok(RasterImage {
            key: key.to_string(),
            width_px: width,
            height_px: height,
            data: RasterData::Jpeg {
                data: data.to_vec(),
                grayscale,
            },
        });
    }

    let rgba = decoded.to_rgba8();
    let mut pixels = Vec::with_capacity((width * height * 3) as usize);
    let mut alpha = Vec::with_capacity((width * height) as usize);
    let mut has_alpha = false;
    for pixel in rgba.pixels() {
        let [r, g, b, a] = pixel.0;
        has_alpha |= a != 255;
        pixels.extend_from_slice(&[r, g, b]);
        alpha.push(a);
    }

    Ok(RasterImage {
        key: key.to_string(),
        width_px: width,
        height_px: height,
        data: RasterData::Rgb {
            pixels,
            alpha: has_alpha.then_some(alpha),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, ImageFormat, Rgba};
    use std::io::Cursor;

    fn png_bytes(alpha: u8) -> Vec<u8> {
        let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
            ImageBuffer::from_pixel(2, 3, Rgba([10, 20, 30, alpha]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn decodes_opaque_png_to_rgb() {
        let image = decode_raster("logo.png", &png_bytes(255)).unwrap();
        assert_eq!((image.width_px, image.height_px), (2, 3));
        match image.data {
            RasterData::Rgb { pixels, alpha } => {
                assert_eq!(pixels.len(), 2 * 3 * 3);
                assert_eq!(&pixels[..3], &[10, 20, 30]);
                assert!(alpha.is_none());
            }
            other => panic!("expected RGB data, got {:?}", other),
        }
    }

    #[test]
    fn keeps_alpha_channel_when_used() {
        let image = decode_raster("logo.png", &png_bytes(128)).unwrap();
        assert!(matches!(image.data, RasterData::Rgb { alpha: Some(_), .. }));
    }

    #[test]
    fn rejects_unknown_bytes() {
        assert!(matches!(
            decode_raster("qr.png", b"definitely not an image"),
            Err(ResourceError::InvalidFormat(_))
        ));
    }
}
