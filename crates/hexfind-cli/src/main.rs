//! hexfind CLI — locate candidate label regions on a board image.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use hexfind_core::{Connectivity, DetectConfig, Detector, MaskStrategy};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "hexfind")]
#[command(about = "Locate candidate label positions on a static board image")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect candidate label regions in a board image.
    Detect(CliDetectArgs),
}

#[derive(Debug, Clone, Args)]
struct CliDetectArgs {
    /// Path to the board image.
    #[arg(long, default_value = "gameboard.png")]
    image: PathBuf,

    /// Path to write detection results (JSON). Console summary is printed
    /// either way.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Mask construction strategy.
    #[arg(long, value_enum, default_value_t = StrategyArg::Auto)]
    strategy: StrategyArg,

    /// Percentile of gradient magnitude kept as candidate text edges.
    #[arg(long, default_value = "85.0")]
    edge_percentile: f64,

    /// Percentile of intensity below which pixels count as dark text.
    #[arg(long, default_value = "20.0")]
    intensity_percentile: f64,

    /// Discard components with at most this many pixels (noise specks).
    #[arg(long, default_value = "10")]
    min_region_px: u32,

    /// Discard components with at least this many pixels (filled areas).
    #[arg(long, default_value = "500")]
    max_region_px: u32,

    /// Maximum number of regions to report.
    #[arg(long, default_value = "50")]
    max_regions: usize,

    /// Pixel connectivity for component labeling.
    #[arg(long, value_enum, default_value_t = ConnectivityArg::Four)]
    connectivity: ConnectivityArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    Auto,
    Gradient,
    Intensity,
}

impl StrategyArg {
    fn to_core(self) -> MaskStrategy {
        match self {
            Self::Auto => MaskStrategy::Auto,
            Self::Gradient => MaskStrategy::Gradient,
            Self::Intensity => MaskStrategy::Intensity,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ConnectivityArg {
    Four,
    Eight,
}

impl ConnectivityArg {
    fn to_core(self) -> Connectivity {
        match self {
            Self::Four => Connectivity::Four,
            Self::Eight => Connectivity::Eight,
        }
    }
}

impl CliDetectArgs {
    fn to_config(&self) -> DetectConfig {
        DetectConfig {
            strategy: self.strategy.to_core(),
            edge_percentile: self.edge_percentile,
            intensity_percentile: self.intensity_percentile,
            min_region_px: self.min_region_px,
            max_region_px: self.max_region_px,
            max_regions: self.max_regions,
            connectivity: self.connectivity.to_core(),
        }
    }
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Detect(args) => run_detect(&args),
    }
}

// ── detect ─────────────────────────────────────────────────────────────

fn run_detect(args: &CliDetectArgs) -> CliResult<()> {
    tracing::info!("Loading image: {}", args.image.display());

    // Detection failure is not an error exit: the tool prints guidance and
    // terminates normally so it can be re-run after fixing the input.
    let img = match image::open(&args.image) {
        Ok(img) => img,
        Err(e) => {
            tracing::error!("Failed to open image {}: {}", args.image.display(), e);
            println!("Automatic detection not available: {}", e);
            println!(
                "Place the board snapshot at {} and re-run, or pick positions manually.",
                args.image.display()
            );
            return Ok(());
        }
    };
    let gray = img.to_luma8();
    let (w, h) = gray.dimensions();

    tracing::info!("Analyzing board: {}x{} pixels", w, h);

    let detector = Detector::with_config(args.to_config());
    let result = detector.detect(&gray);

    tracing::info!(
        "Mask strategy {:?}: {} candidate pixels",
        result.stats.strategy,
        result.stats.mask_pixels,
    );
    tracing::info!(
        "Found {} potential text regions ({} within size limits)",
        result.stats.regions_found,
        result.stats.regions_kept,
    );

    println!("Detected {} potential label positions:", result.regions.len());
    for r in &result.regions {
        println!("  {}: x={:.2}% y={:.2}%", r.label, r.x_percent, r.y_percent);
    }
    println!();
    println!("Note: positions are estimates and labels are placeholders.");
    println!("Manual verification against the real board labels is required.");

    if let Some(out) = &args.out {
        let json = serde_json::to_string_pretty(&result)?;
        std::fs::write(out, &json)?;
        tracing::info!("Results written to {}", out.display());
    }

    Ok(())
}
