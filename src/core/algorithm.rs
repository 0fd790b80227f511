use fast_image_resize::{images::Image, FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};
use image::{DynamicImage, RgbImage};
use tracing::debug;

use super::{decode, encode_jpeg, TransformError, MAX_SIDE};

/// Decodes an upload, shrinks it if it is too large and re-encodes it as JPEG.
///
/// Anything up to `MAX_SIDE` on both sides passes through untouched. Larger
/// images are smoothly resized to fit `MAX_SIDE / 2`; gigantic ones (over
/// twice `MAX_SIDE`) get a cheap nearest-neighbour pass down to `MAX_SIDE`
/// first, and the smooth resize irons out the roughness.
pub fn ingest(data: &[u8]) -> Result<Vec<u8>, TransformError> {
    let image = decode(data)?;
    let image = shrink(image)?;

    encode_jpeg(&image)
}

pub fn shrink(image: DynamicImage) -> Result<DynamicImage, TransformError> {
    let (width, height) = (image.width(), image.height());
    if width <= MAX_SIDE && height <= MAX_SIDE {
        return Ok(image);
    }

    let mut image = image;
    if width > 2 * MAX_SIDE || height > 2 * MAX_SIDE {
        let (w, h) = fit_within(width, height, MAX_SIDE);
        debug!(width, height, w, h, "downsampling");
        image = downsample(&image, w, h)?;
    }

    let (w, h) = fit_within(image.width(), image.height(), MAX_SIDE / 2);
    debug!(width = image.width(), height = image.height(), w, h, "resizing");
    resize(&image, w, h)
}

/// Target size for fitting `width` x `height` into a `max` square. The longer
/// side becomes `max`, the shorter one is scaled down and rounded down.
pub fn fit_within(width: u32, height: u32, max: u32) -> (u32, u32) {
    let (w, h) = if width > height {
        (max, scale(height, max, width))
    } else {
        (scale(width, max, height), max)
    };

    (w.max(1), h.max(1))
}

fn scale(side: u32, numerator: u32, denominator: u32) -> u32 {
    (u64::from(side) * u64::from(numerator) / u64::from(denominator)) as u32
}

/// Fast nearest-neighbour reduction.
pub fn downsample(
    image: &DynamicImage,
    target_width: u32,
    target_height: u32,
) -> Result<DynamicImage, TransformError> {
    resize_with(image, target_width, target_height, ResizeAlg::Nearest)
}

/// Smooth reduction with a Lanczos3 convolution.
pub fn resize(
    image: &DynamicImage,
    target_width: u32,
    target_height: u32,
) -> Result<DynamicImage, TransformError> {
    resize_with(
        image,
        target_width,
        target_height,
        ResizeAlg::Convolution(FilterType::Lanczos3),
    )
}

fn resize_with(
    image: &DynamicImage,
    target_width: u32,
    target_height: u32,
    algorithm: ResizeAlg,
) -> Result<DynamicImage, TransformError> {
    // The output is JPEG anyway, so alpha is dropped up front.
    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();

    let src_image = Image::from_vec_u8(width, height, rgb.into_raw(), PixelType::U8x3)
        .map_err(|e| TransformError::Resize(format!("failed to create source image: {e}")))?;
    let mut dst_image = Image::new(target_width, target_height, PixelType::U8x3);

    let mut resizer = Resizer::new();
    resizer
        .resize(
            &src_image,
            &mut dst_image,
            &ResizeOptions::new().resize_alg(algorithm),
        )
        .map_err(|e| TransformError::Resize(e.to_string()))?;

    let resized = RgbImage::from_raw(target_width, target_height, dst_image.into_vec())
        .ok_or_else(|| TransformError::Resize("resized buffer has the wrong size".to_string()))?;

    Ok(DynamicImage::ImageRgb8(resized))
}
