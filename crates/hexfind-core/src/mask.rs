//! Text-likelihood mask construction.
//!
//! Both strategies threshold a per-pixel score at a percentile of the
//! score distribution over the whole image, so no absolute brightness or
//! contrast calibration is needed.

use image::{GrayImage, Luma};

/// Mask foreground value; background is 0.
pub const MASK_FOREGROUND: u8 = 255;

/// Linear-interpolated percentile of `values` (sorts in place).
///
/// `p` is in [0, 100]. With `n` samples the rank is `p/100 * (n - 1)` and
/// the result interpolates between the two bracketing order statistics.
pub fn percentile(values: &mut [f32], p: f64) -> f32 {
    debug_assert!(!values.is_empty());
    debug_assert!((0.0..=100.0).contains(&p));
    values.sort_unstable_by(f32::total_cmp);
    let n = values.len();
    if n == 1 {
        return values[0];
    }
    let rank = p / 100.0 * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let frac = (rank - lo as f64) as f32;
    if lo + 1 >= n {
        return values[n - 1];
    }
    values[lo] + frac * (values[lo + 1] - values[lo])
}

/// Build a mask of high-gradient pixels (candidate text edges).
///
/// Sobel magnitude is thresholded at `edge_percentile` of its own
/// distribution; pixels strictly above the threshold become foreground.
/// Returns `None` when the gradient field is degenerate (flat image or
/// degenerate dimensions), signaling the caller to degrade to
/// [`intensity_mask`].
pub fn gradient_mask(gray: &GrayImage, edge_percentile: f64) -> Option<GrayImage> {
    let (w, h) = gray.dimensions();
    if w < 3 || h < 3 {
        return None;
    }

    let gx = imageproc::gradients::horizontal_sobel(gray);
    let gy = imageproc::gradients::vertical_sobel(gray);
    let magnitude: Vec<f32> = gx
        .as_raw()
        .iter()
        .zip(gy.as_raw().iter())
        .map(|(&gxv, &gyv)| {
            let gxv = gxv as f32;
            let gyv = gyv as f32;
            (gxv * gxv + gyv * gyv).sqrt()
        })
        .collect();

    let max_mag = magnitude.iter().fold(0.0f32, |m, &v| m.max(v));
    if max_mag < 1e-6 {
        return None;
    }

    let mut sorted = magnitude.clone();
    let threshold = percentile(&mut sorted, edge_percentile);

    let stride = w as usize;
    Some(GrayImage::from_fn(w, h, |x, y| {
        let v = magnitude[y as usize * stride + x as usize];
        if v > threshold {
            Luma([MASK_FOREGROUND])
        } else {
            Luma([0])
        }
    }))
}

/// Build a mask of dark pixels (candidate text on a lighter board).
///
/// Intensity is thresholded at `intensity_percentile` of its own
/// distribution; pixels strictly below the threshold become foreground.
/// On a uniform image the strict comparison selects nothing.
pub fn intensity_mask(gray: &GrayImage, intensity_percentile: f64) -> GrayImage {
    let (w, h) = gray.dimensions();
    if w == 0 || h == 0 {
        return GrayImage::new(w, h);
    }

    let mut values: Vec<f32> = gray.as_raw().iter().map(|&p| p as f32).collect();
    let threshold = percentile(&mut values, intensity_percentile);

    GrayImage::from_fn(w, h, |x, y| {
        if (gray.get_pixel(x, y)[0] as f32) < threshold {
            Luma([MASK_FOREGROUND])
        } else {
            Luma([0])
        }
    })
}

/// Count mask foreground pixels.
pub fn foreground_count(mask: &GrayImage) -> u64 {
    mask.as_raw().iter().filter(|&&p| p != 0).count() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Bright background with a dark axis-aligned square.
    fn make_square_image(w: u32, h: u32, x0: u32, y0: u32, side: u32) -> GrayImage {
        GrayImage::from_fn(w, h, |x, y| {
            if x >= x0 && x < x0 + side && y >= y0 && y < y0 + side {
                Luma([30u8])
            } else {
                Luma([200u8])
            }
        })
    }

    #[test]
    fn percentile_matches_linear_interpolation() {
        let mut v = [1.0f32, 2.0, 3.0, 4.0];
        assert!((percentile(&mut v, 25.0) - 1.75).abs() < 1e-6);
        let mut v = [1.0f32, 2.0, 3.0, 4.0];
        assert!((percentile(&mut v, 0.0) - 1.0).abs() < 1e-6);
        let mut v = [1.0f32, 2.0, 3.0, 4.0];
        assert!((percentile(&mut v, 100.0) - 4.0).abs() < 1e-6);
        let mut v = [7.0f32];
        assert!((percentile(&mut v, 50.0) - 7.0).abs() < 1e-6);
    }

    #[test]
    fn percentile_ignores_input_order() {
        let mut a = [4.0f32, 1.0, 3.0, 2.0];
        let mut b = [1.0f32, 2.0, 3.0, 4.0];
        assert_eq!(percentile(&mut a, 85.0), percentile(&mut b, 85.0));
    }

    #[test]
    fn intensity_mask_selects_dark_square() {
        let img = make_square_image(100, 100, 48, 48, 5);
        let mask = intensity_mask(&img, 20.0);
        // Dark pixels are far below the 20th percentile of a mostly-bright
        // image; exactly the 25 square pixels are foreground.
        assert_eq!(foreground_count(&mask), 25);
        assert_eq!(mask.get_pixel(50, 50)[0], MASK_FOREGROUND);
        assert_eq!(mask.get_pixel(10, 10)[0], 0);
    }

    #[test]
    fn intensity_mask_empty_on_uniform_image() {
        let img = GrayImage::from_pixel(64, 64, Luma([128u8]));
        let mask = intensity_mask(&img, 20.0);
        assert_eq!(foreground_count(&mask), 0);
    }

    #[test]
    fn gradient_mask_none_on_flat_image() {
        let img = GrayImage::from_pixel(64, 64, Luma([128u8]));
        assert!(gradient_mask(&img, 85.0).is_none());
    }

    #[test]
    fn gradient_mask_none_on_degenerate_dimensions() {
        let img = GrayImage::new(2, 100);
        assert!(gradient_mask(&img, 85.0).is_none());
    }

    #[test]
    fn gradient_mask_marks_square_boundary() {
        let img = make_square_image(100, 100, 40, 40, 20);
        let mask = gradient_mask(&img, 85.0).expect("non-flat image");
        let n = foreground_count(&mask);
        assert!(n > 0);
        // Only the boundary band carries gradient; the mask must stay far
        // smaller than the image.
        assert!(n < 100 * 100 / 4);
        // Interior of the square and far background are edge-free.
        assert_eq!(mask.get_pixel(50, 50)[0], 0);
        assert_eq!(mask.get_pixel(5, 5)[0], 0);
    }
}
