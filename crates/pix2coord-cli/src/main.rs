//! pix2coord CLI — calibrate a camera against two reference markers and
//! report machine coordinates of markers seen afterwards.

use clap::{Args, Parser, Subcommand};
use pix2coord::{
    image_source_from_config, read_image_file, segment, FixedPosition, ImageSink, NullSink,
    PngDirSink, SegmentConfig, Session, SessionConfig,
};
use std::path::PathBuf;

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "pix2coord")]
#[command(about = "Pixel to machine coordinate calibration from two red reference markers")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calibrate on the first image, then locate markers in the test images.
    Run(CliRunArgs),

    /// Segment a single image and print the detected red blobs.
    Segment(CliSegmentArgs),
}

#[derive(Debug, Clone, Args)]
struct CliRunArgs {
    /// Session configuration (JSON).
    #[arg(long)]
    config: PathBuf,

    /// Path to write the session report (JSON).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Directory for annotated images.
    #[arg(long, default_value = "annotated")]
    annotated_dir: PathBuf,

    /// Override the number of rotation convergence rounds.
    #[arg(long)]
    iterations: Option<usize>,

    /// Do not write annotated images.
    #[arg(long)]
    no_display: bool,
}

#[derive(Debug, Clone, Args)]
struct CliSegmentArgs {
    /// Path to the input image.
    #[arg(long)]
    image: PathBuf,

    /// Path to write the annotated image (PNG).
    #[arg(long)]
    annotated: Option<PathBuf>,
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
        Commands::Run(args) => run_session(&args),
        Commands::Segment(args) => run_segment(&args),
    }
}

// ── run ────────────────────────────────────────────────────────────────

fn run_session(args: &CliRunArgs) -> CliResult<()> {
    tracing::info!("Loading config: {}", args.config.display());
    let mut config = SessionConfig::from_json_file(&args.config)?;
    if let Some(n) = args.iterations {
        config.calibration.iterations = n;
    }
    if args.no_display {
        config.display = false;
    }

    let mut source = image_source_from_config(&config.source);
    let mut position = FixedPosition(config.machine_position);
    let mut sink: Box<dyn ImageSink> = if config.display {
        Box::new(PngDirSink::new(&args.annotated_dir, "pix2coord"))
    } else {
        Box::new(NullSink)
    };

    let report = Session::new(&config, source.as_mut(), &mut position, sink.as_mut())?.run()?;

    let cal = &report.calibration;
    tracing::info!(
        "Scale: x={:.4} y={:.4} per pixel",
        cal.scale.scale_x,
        cal.scale.scale_y
    );
    if cal.rotation_deg != 0.0 {
        println!("Rotation Required = {:.2} degrees", cal.rotation_deg);
    }
    for (i, pass) in report.tests.iter().enumerate() {
        tracing::info!(
            "Test pass {}: machine at ({:.1}, {:.1}), {} markers",
            i,
            pass.machine_position[0],
            pass.machine_position[1],
            pass.coordinates.len()
        );
        println!("Detected object machine coordinates:");
        for c in &pass.coordinates {
            println!("    {}", c);
        }
    }

    if let Some(out) = &args.out {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(out, &json)?;
        tracing::info!("Report written to {}", out.display());
    }

    Ok(())
}

// ── segment ────────────────────────────────────────────────────────────

fn run_segment(args: &CliSegmentArgs) -> CliResult<()> {
    tracing::info!("Loading image: {}", args.image.display());
    let img = read_image_file(&args.image)?;
    tracing::info!("Image size: {}x{}", img.width(), img.height());

    let seg = segment(&img, &SegmentConfig::default());
    let center = seg.locations.center();
    println!(
        "Image center: ({:.1}, {:.1})",
        center.center_x, center.center_y
    );
    println!("Detected {} red objects", seg.locations.markers().len());
    for (i, m) in seg.locations.markers().iter().enumerate() {
        println!(
            "  [{}] center=({:.1}, {:.1}) radius={:.1}",
            i + 1,
            m.center_x,
            m.center_y,
            m.radius
        );
    }

    if let Some(path) = &args.annotated {
        seg.annotated.save(path).map_err(|e| -> CliError {
            format!("Failed to write {}: {}", path.display(), e).into()
        })?;
        tracing::info!("Annotated image written to {}", path.display());
    }

    Ok(())
}
