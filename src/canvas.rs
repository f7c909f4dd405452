use image::{imageops, Rgba, RgbaImage};

/// Top-left placement of a `width` x `height` image on a square canvas of
/// side `size`. Integer division floors, so an odd difference lands one
/// pixel closer to the top-left corner than to the bottom-right.
pub fn centered_offset(size: u32, width: u32, height: u32) -> (u32, u32) {
    ((size - width) / 2, (size - height) / 2)
}

/// Composite `source` onto a square canvas sized to its longer dimension.
///
/// The canvas is filled with `background` and the source is alpha-blended
/// at the centered offset, so translucent source pixels mix with the
/// background instead of replacing it. The source is never scaled.
pub fn squared_canvas(source: &RgbaImage, background: Rgba<u8>) -> RgbaImage {
    let (width, height) = source.dimensions();
    let size = width.max(height);

    let mut canvas = RgbaImage::from_pixel(size, size, background);
    let (x, y) = centered_offset(size, width, height);
    imageops::overlay(&mut canvas, source, x as i64, y as i64);

    canvas
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_centers_even_difference() {
        assert_eq!(centered_offset(100, 100, 50), (0, 25));
    }

    #[test]
    fn test_offset_odd_difference_biases_top_left() {
        assert_eq!(centered_offset(51, 51, 50), (0, 0));
        assert_eq!(centered_offset(5, 2, 5), (1, 0));
    }

    #[test]
    fn test_canvas_side_is_longer_dimension() {
        let img = RgbaImage::from_pixel(200, 100, Rgba([10, 20, 30, 255]));
        let canvas = squared_canvas(&img, Rgba([255, 255, 255, 255]));
        assert_eq!(canvas.dimensions(), (200, 200));
    }

    #[test]
    fn test_content_and_background_regions() {
        let img = RgbaImage::from_pixel(4, 2, Rgba([255, 0, 0, 255]));
        let canvas = squared_canvas(&img, Rgba([0, 0, 0, 0]));

        // Content occupies rows 1..3; the rest stays background.
        assert_eq!(canvas.get_pixel(0, 1), &Rgba([255, 0, 0, 255]));
        assert_eq!(canvas.get_pixel(3, 2), &Rgba([255, 0, 0, 255]));
        assert_eq!(canvas.get_pixel(0, 0), &Rgba([0, 0, 0, 0]));
        assert_eq!(canvas.get_pixel(3, 3), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_crop_back_reproduces_opaque_source() {
        // Position-dependent palette so a misplaced offset shows up.
        let img = RgbaImage::from_fn(3, 5, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([255, 0, 255, 255])
            } else {
                Rgba([0, 255, 0, 255])
            }
        });
        let canvas = squared_canvas(&img, Rgba([0, 0, 0, 0]));

        let (dx, dy) = centered_offset(5, 3, 5);
        for y in 0..5 {
            for x in 0..3 {
                assert_eq!(canvas.get_pixel(x + dx, y + dy), img.get_pixel(x, y));
            }
        }
    }

    #[test]
    fn test_translucent_source_blends_with_white() {
        let img = RgbaImage::from_pixel(2, 1, Rgba([255, 0, 0, 128]));
        let canvas = squared_canvas(&img, Rgba([255, 255, 255, 255]));

        // Half-transparent red over white lands near (255, 127, 127).
        let pixel = canvas.get_pixel(0, 0);
        assert!(pixel[3] >= 254);
        assert!((pixel[0] as i32 - 255).abs() <= 1);
        assert!((pixel[1] as i32 - 127).abs() <= 2);
        assert!((pixel[2] as i32 - 127).abs() <= 2);
    }

    #[test]
    fn test_transparent_background_keeps_source_alpha() {
        let img = RgbaImage::from_pixel(1, 2, Rgba([60, 120, 180, 128]));
        let canvas = squared_canvas(&img, Rgba([0, 0, 0, 0]));

        let pixel = canvas.get_pixel(0, 0);
        assert!((pixel[3] as i32 - 128).abs() <= 1);
        assert!((pixel[0] as i32 - 60).abs() <= 1);
        assert!((pixel[1] as i32 - 120).abs() <= 1);
        assert!((pixel[2] as i32 - 180).abs() <= 1);
    }
}
