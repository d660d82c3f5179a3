//! Tilematch: spatial candidate-pair selection for mosaic tile matching.
//!
//! A large mosaic (a microscopy montage, say) is acquired as overlapping
//! tiles. Before feature correspondences can be computed, something has to
//! decide *which* pairs of tiles are worth matching at all: exactly those
//! whose bounding boxes overlap. Tilematch is that something: it reads
//! tile specifications, runs the spatial candidate search, and hands the
//! selected pairs to an external matching engine.
//!
//! # Modules
//!
//! - [`geom`]: the validated [`BoundingBox`](geom::BoundingBox) value type
//! - [`select`]: candidate-pair selection (exhaustive scan and grid index)
//! - [`tiles`]: tile-specification model and JSON I/O
//! - [`validation`]: tile-set validation and issue reporting
//! - [`engine`]: the external matching-engine boundary
//! - [`error`]: error types for tilematch operations

pub mod engine;
pub mod error;
pub mod geom;
pub mod select;
pub mod tiles;
pub mod validation;

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use error::TilematchError;

/// The tilematch CLI application.
#[derive(Parser)]
#[command(name = "tilematch")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Select candidate tile pairs whose bounding boxes overlap.
    Pairs(PairsArgs),

    /// Validate a tile-specification file for errors and warnings.
    Validate(ValidateArgs),
}

/// Arguments for the pairs subcommand.
#[derive(clap::Args)]
struct PairsArgs {
    /// Tile-specification JSON file.
    input: PathBuf,

    /// Pair-search strategy ('grid' or 'exhaustive').
    #[arg(long, default_value = "grid")]
    strategy: String,

    /// Exclude tiles with invalid bounds instead of failing the batch.
    #[arg(long)]
    skip_invalid: bool,

    /// Feature JSON file; labels each pair with feature-set indices.
    #[arg(long)]
    features: Option<PathBuf>,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,

    /// Write the JSON report to this file (stdout keeps the text summary).
    #[arg(short = 'o', long)]
    out_file: Option<PathBuf>,
}

/// Arguments for the validate subcommand.
#[derive(clap::Args)]
struct ValidateArgs {
    /// Tile-specification file to validate.
    input: PathBuf,

    /// Treat warnings as errors (exit non-zero if any warnings).
    #[arg(long)]
    strict: bool,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Run the tilematch CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), TilematchError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Pairs(args)) => run_pairs(args),
        Some(Commands::Validate(args)) => run_validate(args),
        None => {
            println!("tilematch {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Spatial candidate-pair selection for mosaic tile matching.");
            println!();
            println!("Run 'tilematch --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the pairs subcommand.
fn run_pairs(args: PairsArgs) -> Result<(), TilematchError> {
    let strategy = match args.strategy.as_str() {
        "grid" => select::Strategy::Grid,
        "exhaustive" | "naive" => select::Strategy::Exhaustive,
        other => {
            return Err(TilematchError::UnsupportedStrategy(format!(
                "'{}' (supported: grid, exhaustive)",
                other
            )));
        }
    };

    let tiles = tiles::io_json::read_tiles_json(&args.input)?;
    tracing::debug!(tiles = tiles.len(), "loaded tile specs");

    let opts = select::SelectOptions {
        strategy,
        on_invalid: if args.skip_invalid {
            select::InvalidBoundsPolicy::Skip
        } else {
            select::InvalidBoundsPolicy::Fail
        },
    };
    let selection = select::select_tile_pairs(&tiles, &opts)?;

    let feature_index = match &args.features {
        Some(path) => {
            let features = tiles::io_json::read_features_json(path)?;
            Some(tiles::feature_index_by_url(&features))
        }
        None => None,
    };

    let report = select::SelectionReport::build(&tiles, &selection, feature_index.as_ref());

    if let Some(path) = &args.out_file {
        let file = File::create(path).map_err(TilematchError::Io)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &report).map_err(|source| {
            TilematchError::JsonWrite {
                path: path.clone(),
                source,
            }
        })?;
        print!("{}", report);
        return Ok(());
    }

    match args.output.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&report).map_err(|source| {
                TilematchError::JsonWrite {
                    path: PathBuf::from("<stdout>"),
                    source,
                }
            })?;
            println!("{}", json);
        }
        "text" => print!("{}", report),
        other => {
            return Err(TilematchError::UnsupportedOutput(format!(
                "'{}' (supported: text, json)",
                other
            )));
        }
    }

    Ok(())
}

/// Execute the validate subcommand.
fn run_validate(args: ValidateArgs) -> Result<(), TilematchError> {
    let tiles = tiles::io_json::read_tiles_json(&args.input)?;

    let opts = validation::ValidateOptions {
        strict: args.strict,
    };
    let report = validation::validate_tiles(&tiles, &opts);

    match args.output.as_str() {
        "json" => {
            let payload = serde_json::json!({
                "error_count": report.error_count(),
                "warning_count": report.warning_count(),
                "issues": &report.issues,
            });
            let json = serde_json::to_string_pretty(&payload).map_err(|source| {
                TilematchError::JsonWrite {
                    path: PathBuf::from("<stdout>"),
                    source,
                }
            })?;
            println!("{}", json);
        }
        "text" => print!("{}", report),
        other => {
            return Err(TilematchError::UnsupportedOutput(format!(
                "'{}' (supported: text, json)",
                other
            )));
        }
    }

    let has_errors = report.error_count() > 0;
    let has_warnings = report.warning_count() > 0;

    if has_errors || (args.strict && has_warnings) {
        Err(TilematchError::ValidationFailed {
            error_count: report.error_count(),
            warning_count: report.warning_count(),
            report,
        })
    } else {
        Ok(())
    }
}
