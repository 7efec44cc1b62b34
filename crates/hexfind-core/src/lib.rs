//! hexfind-core — locate candidate label regions on a static board image.
//!
//! The pipeline stages are:
//!
//! 1. **Mask** – classify text-like pixels, either by Sobel gradient
//!    magnitude (strong edges) or by raw intensity (dark pixels), with a
//!    percentile threshold over the whole distribution.
//! 2. **Label** – connected-component labeling of the mask.
//! 3. **Filter** – discard components too small (noise specks) or too
//!    large (filled areas) to be a single printed label.
//! 4. **Normalize** – report each surviving component's centroid as a
//!    percentage of image width/height, so results are
//!    resolution-independent.
//!
//! Reported labels are synthetic ranks (`REGION_1`, `REGION_2`, ...), not
//! verified identities: mapping them to the real board labels is the
//! caller's job.
//!
//! # Public API
//! - [`Detector`] as the primary entry point
//! - [`DetectConfig`] for tuning thresholds, size gates, and strategy

pub mod config;
pub mod detector;
pub mod mask;
pub mod region;

pub use config::{Connectivity, DetectConfig, MaskStrategy};
pub use detector::Detector;

/// A candidate label position, normalized to percentage coordinates.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RegionCoordinate {
    /// Synthetic placeholder label (`REGION_i`, 1-based rank in discovery
    /// order). Not matched against real board labels.
    pub label: String,
    /// Centroid x as a percentage of image width, in [0, 100].
    pub x_percent: f64,
    /// Centroid y as a percentage of image height, in [0, 100].
    pub y_percent: f64,
}

/// Per-run diagnostics for one detection pass.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct RegionStats {
    /// Mask strategy that actually produced the mask. `Auto` means the
    /// run ended before any strategy was applied.
    pub strategy: MaskStrategy,
    /// Number of mask foreground (text-like) pixels.
    pub mask_pixels: u64,
    /// Connected components found before size filtering.
    pub regions_found: usize,
    /// Components surviving the size filter, before the report cap.
    pub regions_kept: usize,
}

/// Full detection result for a single image.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DetectionResult {
    /// Surviving regions in raster-scan discovery order, capped at
    /// [`DetectConfig::max_regions`](config::DetectConfig::max_regions).
    pub regions: Vec<RegionCoordinate>,
    /// Image dimensions [width, height].
    pub image_size: [u32; 2],
    /// Pipeline diagnostics.
    pub stats: RegionStats,
}

impl DetectionResult {
    /// Construct an empty result for an image with the provided dimensions.
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            regions: Vec::new(),
            image_size: [width, height],
            stats: RegionStats::default(),
        }
    }
}
