//! High-level detection API.
//!
//! [`Detector`] is the primary entry point: it wraps a [`DetectConfig`]
//! and runs the Mask → Label → Filter → Normalize pipeline on grayscale
//! images.

use image::GrayImage;

use crate::config::{DetectConfig, MaskStrategy};
use crate::{mask, region, DetectionResult, RegionCoordinate, RegionStats};

/// Primary detection interface.
///
/// Create once, detect on many images.
///
/// # Examples
///
/// ```no_run
/// use hexfind_core::Detector;
/// use image::GrayImage;
///
/// let detector = Detector::new();
/// let image = GrayImage::new(640, 480);
/// let result = detector.detect(&image);
/// println!("Found {} regions", result.regions.len());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Detector {
    config: DetectConfig,
}

impl Detector {
    /// Create a detector with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with full config control.
    pub fn with_config(config: DetectConfig) -> Self {
        Self { config }
    }

    /// Access the current configuration.
    pub fn config(&self) -> &DetectConfig {
        &self.config
    }

    /// Mutable access to configuration for post-construction tuning.
    pub fn config_mut(&mut self) -> &mut DetectConfig {
        &mut self.config
    }

    /// Detect candidate label regions in a grayscale image.
    ///
    /// Never panics on degenerate input: a flat or empty image yields an
    /// empty region list. When the configured strategy is
    /// [`MaskStrategy::Gradient`] and the gradient field is degenerate,
    /// the result is empty with the image size still populated.
    pub fn detect(&self, gray: &GrayImage) -> DetectionResult {
        let (w, h) = gray.dimensions();
        let cfg = &self.config;

        let (mask, strategy) = match cfg.strategy {
            MaskStrategy::Gradient => match mask::gradient_mask(gray, cfg.edge_percentile) {
                Some(m) => (m, MaskStrategy::Gradient),
                None => {
                    let mut result = DetectionResult::empty(w, h);
                    result.stats.strategy = MaskStrategy::Gradient;
                    return result;
                }
            },
            MaskStrategy::Intensity => (
                mask::intensity_mask(gray, cfg.intensity_percentile),
                MaskStrategy::Intensity,
            ),
            MaskStrategy::Auto => match mask::gradient_mask(gray, cfg.edge_percentile) {
                Some(m) => (m, MaskStrategy::Gradient),
                None => (
                    mask::intensity_mask(gray, cfg.intensity_percentile),
                    MaskStrategy::Intensity,
                ),
            },
        };

        let mask_pixels = mask::foreground_count(&mask);
        let found = region::extract_regions(&mask, cfg.connectivity);
        let regions_found = found.len();
        let kept = region::filter_by_size(found, cfg.min_region_px, cfg.max_region_px);
        let regions_kept = kept.len();

        let width = w as f64;
        let height = h as f64;
        let regions = kept
            .iter()
            .take(cfg.max_regions)
            .enumerate()
            .map(|(i, r)| RegionCoordinate {
                label: format!("REGION_{}", i + 1),
                x_percent: r.centroid[0] / width * 100.0,
                y_percent: r.centroid[1] / height * 100.0,
            })
            .collect();

        DetectionResult {
            regions,
            image_size: [w, h],
            stats: RegionStats {
                strategy,
                mask_pixels,
                regions_found,
                regions_kept,
            },
        }
    }
}
