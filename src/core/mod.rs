use std::io::Cursor;

use image::{codecs::jpeg::JpegEncoder, DynamicImage, ImageError, ImageReader};
use thiserror::Error;

pub mod algorithm;
pub mod composite;
pub mod key;

pub use algorithm::ingest;
pub use composite::{composite, OverlaySpec};
pub use key::key_of;

/// Longest side an upload may keep without being shrunk.
pub const MAX_SIDE: u32 = 1200;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("decode failed: {0}")]
    Decode(#[source] ImageError),

    #[error("encode failed: {0}")]
    Encode(#[source] ImageError),

    #[error("resize failed: {0}")]
    Resize(String),
}

/// Decodes raw bytes of any supported raster format, guessing the format
/// from the content rather than trusting a filename or content type.
pub fn decode(data: &[u8]) -> Result<DynamicImage, TransformError> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| TransformError::Decode(ImageError::IoError(e)))?;

    reader.decode().map_err(TransformError::Decode)
}

/// Encodes as baseline JPEG at the encoder's default quality.
pub fn encode_jpeg(image: &DynamicImage) -> Result<Vec<u8>, TransformError> {
    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new(&mut buffer);

    // JPEG has no alpha channel
    image
        .to_rgb8()
        .write_with_encoder(encoder)
        .map_err(TransformError::Encode)?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};

    pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([200, 120, 40]));
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut buffer, ImageFormat::Png)
            .unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_decode_png() {
        let img = decode(&png_bytes(12, 7)).unwrap();
        assert_eq!(img.width(), 12);
        assert_eq!(img.height(), 7);
    }

    #[test]
    fn test_decode_garbage() {
        let result = decode(b"definitely not an image");
        assert!(matches!(result, Err(TransformError::Decode(_))));
    }

    #[test]
    fn test_encode_jpeg_magic() {
        let img = DynamicImage::new_rgba8(10, 10);
        let data = encode_jpeg(&img).unwrap();
        assert_eq!(&data[0..2], &[0xFF, 0xD8]);
    }
}
