use image::{imageops, DynamicImage, Rgba, RgbaImage};

use super::{decode, encode_jpeg, TransformError};

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Where to put the bar and how big to make it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlaySpec {
    pub x: i32,
    pub y: i32,
    pub size: u32,
}

impl OverlaySpec {
    /// Bar dimensions grow in steps of 50x10 per size unit.
    pub fn bar_size(&self) -> (i64, i64) {
        let step = i64::from(self.size) + 1;
        (step * 50, step * 10)
    }
}

/// Paints a black bar onto stored image bytes and re-encodes as JPEG.
pub fn composite(data: &[u8], overlay: &OverlaySpec) -> Result<Vec<u8>, TransformError> {
    let image = decode(data)?;
    let painted = blackbar(image, overlay);

    encode_jpeg(&DynamicImage::ImageRgba8(painted))
}

pub fn blackbar(image: DynamicImage, overlay: &OverlaySpec) -> RgbaImage {
    let mut dst = into_rgba(image);

    let (x, y) = (i64::from(overlay.x), i64::from(overlay.y));
    if let Some((px, py)) = within(&dst, x, y) {
        dst.put_pixel(px, py, BLACK);
    }

    // x == 0 means no coordinates were given
    if overlay.x > 0 {
        let (w, h) = overlay.bar_size();
        let (x0, y0) = (x - w / 2, y - h / 2);
        let (x1, y1) = (x + w / 2, y + h / 2);

        // Only the part inside the image is ever allocated.
        let cx0 = x0.max(0);
        let cy0 = y0.max(0);
        let cx1 = x1.min(i64::from(dst.width()));
        let cy1 = y1.min(i64::from(dst.height()));

        if cx0 < cx1 && cy0 < cy1 {
            let bar = RgbaImage::from_pixel((cx1 - cx0) as u32, (cy1 - cy0) as u32, BLACK);
            imageops::replace(&mut dst, &bar, cx0, cy0);
        }
    }

    dst
}

/// RGBA view of the image, copying only when the pixels are in another format.
fn into_rgba(image: DynamicImage) -> RgbaImage {
    match image {
        DynamicImage::ImageRgba8(buffer) => buffer,
        other => other.to_rgba8(),
    }
}

fn within(image: &RgbaImage, x: i64, y: i64) -> Option<(u32, u32)> {
    let in_bounds = x >= 0
        && y >= 0
        && x < i64::from(image.width())
        && y < i64::from(image.height());

    in_bounds.then_some((x as u32, y as u32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ingest, tests::png_bytes};

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn white(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, WHITE))
    }

    fn black_pixels(image: &RgbaImage) -> usize {
        image.pixels().filter(|p| **p == BLACK).count()
    }

    #[test]
    fn test_zero_x_only_marks_pixel() {
        let out = blackbar(white(50, 50), &OverlaySpec { x: 0, y: 5, size: 2 });

        assert_eq!(*out.get_pixel(0, 5), BLACK);
        assert_eq!(black_pixels(&out), 1);
    }

    #[test]
    fn test_bar_centered_on_point() {
        let out = blackbar(white(300, 300), &OverlaySpec { x: 100, y: 100, size: 0 });

        assert_eq!(*out.get_pixel(75, 95), BLACK);
        assert_eq!(*out.get_pixel(124, 104), BLACK);
        assert_eq!(*out.get_pixel(74, 95), WHITE);
        assert_eq!(*out.get_pixel(125, 100), WHITE);
        assert_eq!(*out.get_pixel(100, 105), WHITE);
        assert_eq!(*out.get_pixel(100, 94), WHITE);
        assert_eq!(black_pixels(&out), 50 * 10);
    }

    #[test]
    fn test_bar_scales_with_size() {
        let overlay = OverlaySpec { x: 150, y: 100, size: 2 };
        assert_eq!(overlay.bar_size(), (150, 30));

        let out = blackbar(white(400, 300), &overlay);
        assert_eq!(*out.get_pixel(75, 85), BLACK);
        assert_eq!(*out.get_pixel(224, 114), BLACK);
        assert_eq!(black_pixels(&out), 150 * 30);
    }

    #[test]
    fn test_bar_clipped_at_edges() {
        let out = blackbar(white(40, 20), &OverlaySpec { x: 5, y: 2, size: 0 });

        // [-20, 30) x [-3, 7) clipped to [0, 30) x [0, 7)
        assert_eq!(*out.get_pixel(0, 0), BLACK);
        assert_eq!(*out.get_pixel(29, 6), BLACK);
        assert_eq!(*out.get_pixel(30, 0), WHITE);
        assert_eq!(*out.get_pixel(0, 7), WHITE);
        assert_eq!(black_pixels(&out), 30 * 7);
    }

    #[test]
    fn test_bar_entirely_outside() {
        let out = blackbar(white(40, 20), &OverlaySpec { x: 500, y: 500, size: 1 });
        assert_eq!(black_pixels(&out), 0);
    }

    #[test]
    fn test_negative_y_does_not_panic() {
        let out = blackbar(white(100, 100), &OverlaySpec { x: 50, y: -2, size: 0 });
        // [25, 75) x [-7, 3)
        assert_eq!(black_pixels(&out), 50 * 3);
    }

    #[test]
    fn test_rgb_source_is_converted() {
        let src = DynamicImage::new_rgb8(10, 10);
        let out = blackbar(src, &OverlaySpec { x: 0, y: 0, size: 0 });
        assert_eq!(out.dimensions(), (10, 10));
        assert_eq!(*out.get_pixel(0, 0), BLACK);
    }

    #[test]
    fn test_ingest_then_composite_round_trip() {
        let stored = ingest(&png_bytes(1500, 900)).unwrap();
        let out = composite(&stored, &OverlaySpec { x: 300, y: 180, size: 1 }).unwrap();

        let img = decode(&out).unwrap();
        assert_eq!((img.width(), img.height()), (600, 360));
    }

    #[test]
    fn test_composite_rejects_garbage() {
        let result = composite(b"nope", &OverlaySpec::default());
        assert!(matches!(result, Err(TransformError::Decode(_))));
    }
}
