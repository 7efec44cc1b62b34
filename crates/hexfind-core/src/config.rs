//! Detection configuration.

/// How the text-likelihood mask is built.
///
/// This is an ordered strategy selection: gradient masking is preferred
/// because printed labels have sharp edges, intensity masking is the
/// degraded path that only assumes labels are darker than the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskStrategy {
    /// Try gradient masking, fall back to intensity masking when the
    /// gradient field is degenerate (e.g. a uniform image).
    #[default]
    Auto,
    /// Gradient masking only; produces no mask on a flat image.
    Gradient,
    /// Intensity masking only.
    Intensity,
}

/// Pixel connectivity used for component labeling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Connectivity {
    /// Edge-adjacent neighbors only.
    #[default]
    Four,
    /// Edge- and corner-adjacent neighbors.
    Eight,
}

impl Connectivity {
    pub(crate) fn to_imageproc(self) -> imageproc::region_labelling::Connectivity {
        match self {
            Self::Four => imageproc::region_labelling::Connectivity::Four,
            Self::Eight => imageproc::region_labelling::Connectivity::Eight,
        }
    }
}

/// Configuration for label region detection.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DetectConfig {
    /// Mask construction strategy.
    pub strategy: MaskStrategy,
    /// Percentile of the gradient-magnitude distribution used as the edge
    /// threshold; pixels strictly above it become mask foreground.
    pub edge_percentile: f64,
    /// Percentile of the intensity distribution used as the darkness
    /// threshold; pixels strictly below it become mask foreground.
    pub intensity_percentile: f64,
    /// Components with at most this many pixels are discarded as noise.
    pub min_region_px: u32,
    /// Components with at least this many pixels are discarded as filled
    /// areas too large to be a single label.
    pub max_region_px: u32,
    /// Maximum number of regions reported, taken in discovery order.
    pub max_regions: usize,
    /// Pixel connectivity for component labeling.
    pub connectivity: Connectivity,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            strategy: MaskStrategy::Auto,
            edge_percentile: 85.0,
            intensity_percentile: 20.0,
            min_region_px: 10,
            max_region_px: 500,
            max_regions: 50,
            connectivity: Connectivity::Four,
        }
    }
}
