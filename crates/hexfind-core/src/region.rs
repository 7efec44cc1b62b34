//! Connected-component extraction and size filtering.

use std::collections::HashMap;

use image::{GrayImage, Luma};
use imageproc::region_labelling::connected_components;

use crate::config::Connectivity;

/// A connected mask component.
#[derive(Debug, Clone, Copy)]
pub struct Region {
    /// Number of foreground pixels in the component.
    pub pixel_count: u32,
    /// Mean (x, y) of the component's pixels, in pixel coordinates.
    pub centroid: [f64; 2],
}

#[derive(Default, Clone, Copy)]
struct Accumulator {
    count: u64,
    sum_x: f64,
    sum_y: f64,
}

/// Extract connected foreground components from a binary mask.
///
/// Components are returned in raster-scan discovery order (ordered by
/// their first pixel, top-to-bottom then left-to-right).
pub fn extract_regions(mask: &GrayImage, connectivity: Connectivity) -> Vec<Region> {
    let (w, h) = mask.dimensions();
    if w == 0 || h == 0 {
        return Vec::new();
    }

    let labeled = connected_components(mask, connectivity.to_imageproc(), Luma([0u8]));

    let mut accum: HashMap<u32, Accumulator> = HashMap::new();
    let mut discovery_order: Vec<u32> = Vec::new();
    for (x, y, px) in labeled.enumerate_pixels() {
        let label = px[0];
        if label == 0 {
            continue;
        }
        let entry = accum.entry(label).or_insert_with(|| {
            discovery_order.push(label);
            Accumulator::default()
        });
        entry.count += 1;
        entry.sum_x += x as f64;
        entry.sum_y += y as f64;
    }

    discovery_order
        .iter()
        .map(|label| {
            let acc = &accum[label];
            let n = acc.count as f64;
            Region {
                pixel_count: acc.count as u32,
                centroid: [acc.sum_x / n, acc.sum_y / n],
            }
        })
        .collect()
}

/// Keep regions whose pixel count lies strictly inside (`min_px`, `max_px`).
///
/// Both bounds are exclusive: a region of exactly `min_px` pixels is
/// noise, one of exactly `max_px` pixels is a filled area.
pub fn filter_by_size(regions: Vec<Region>, min_px: u32, max_px: u32) -> Vec<Region> {
    regions
        .into_iter()
        .filter(|r| r.pixel_count > min_px && r.pixel_count < max_px)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::MASK_FOREGROUND;

    fn mask_with_squares(w: u32, h: u32, squares: &[(u32, u32, u32)]) -> GrayImage {
        let mut mask = GrayImage::new(w, h);
        for &(x0, y0, side) in squares {
            for y in y0..y0 + side {
                for x in x0..x0 + side {
                    mask.put_pixel(x, y, Luma([MASK_FOREGROUND]));
                }
            }
        }
        mask
    }

    fn region(pixel_count: u32) -> Region {
        Region {
            pixel_count,
            centroid: [0.0, 0.0],
        }
    }

    #[test]
    fn extracts_separate_squares_with_centroids() {
        let mask = mask_with_squares(100, 100, &[(10, 10, 4), (60, 70, 6)]);
        let regions = extract_regions(&mask, Connectivity::Four);
        assert_eq!(regions.len(), 2);

        // Raster-scan discovery order: the y=10 square first.
        assert_eq!(regions[0].pixel_count, 16);
        assert!((regions[0].centroid[0] - 11.5).abs() < 1e-9);
        assert!((regions[0].centroid[1] - 11.5).abs() < 1e-9);

        assert_eq!(regions[1].pixel_count, 36);
        assert!((regions[1].centroid[0] - 62.5).abs() < 1e-9);
        assert!((regions[1].centroid[1] - 72.5).abs() < 1e-9);
    }

    #[test]
    fn connectivity_decides_diagonal_merging() {
        // Two pixels touching only at a corner.
        let mut mask = GrayImage::new(10, 10);
        mask.put_pixel(3, 3, Luma([MASK_FOREGROUND]));
        mask.put_pixel(4, 4, Luma([MASK_FOREGROUND]));

        assert_eq!(extract_regions(&mask, Connectivity::Four).len(), 2);
        assert_eq!(extract_regions(&mask, Connectivity::Eight).len(), 1);
    }

    #[test]
    fn empty_mask_yields_no_regions() {
        let mask = GrayImage::new(50, 50);
        assert!(extract_regions(&mask, Connectivity::Four).is_empty());
    }

    #[test]
    fn size_filter_bounds_are_exclusive() {
        let regions = vec![region(10), region(11), region(499), region(500)];
        let kept = filter_by_size(regions, 10, 500);
        let counts: Vec<u32> = kept.iter().map(|r| r.pixel_count).collect();
        assert_eq!(counts, vec![11, 499]);
    }
}
