//! pointreduce command-line tool.
//!
//! Reduces a point file with one of the clustering strategies, or compares
//! all of them on the same input.
#![allow(
    clippy::uninlined_format_args,
    clippy::cast_precision_loss,
    clippy::too_many_lines
)]

use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, info};
use pointreduce_algorithms::{reduce_with, Strategy};
use pointreduce_core::{Point, Reduction, ReductionConfig};
use pointreduce_io::{read_points, ReductionWriter};
use rayon::prelude::*;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;

/// Result type for CLI operations.
type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
enum CliError {
    #[error("{0}")]
    PointIo(#[from] pointreduce_io::Error),

    #[error("{0}")]
    Core(#[from] pointreduce_core::Error),
}

/// Clustering strategy selection.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Algorithm {
    /// Grid bucketing (fast, coarse)
    Grid,
    /// Radius-connected components
    Hierarchical,
    /// Constrained k-means
    Kmeans,
    /// Voronoi partitioning with merge and split
    Voronoi,
}

impl From<Algorithm> for Strategy {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Grid => Strategy::Grid,
            Algorithm::Hierarchical => Strategy::Hierarchical,
            Algorithm::Kmeans => Strategy::KMeans,
            Algorithm::Voronoi => Strategy::Voronoi,
        }
    }
}

/// Output encoding.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// Plain-text summary
    Report,
    /// `x,y,weight` rows
    Csv,
    /// Full reduction as JSON
    Json,
    /// 24-byte little-endian records
    Bin,
}

impl Format {
    fn from_extension(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .as_deref()
        {
            Some("csv") => Format::Csv,
            Some("json") => Format::Json,
            Some("bin" | "dat") => Format::Bin,
            _ => Format::Report,
        }
    }
}

/// Radius-constrained point clustering.
#[derive(Parser)]
#[command(name = "pointreduce")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reduce a point file to weighted cluster representatives
    Reduce {
        /// Input point file (.csv, .txt or .json)
        input: PathBuf,

        /// Cluster radius
        #[arg(short, long)]
        radius: f64,

        /// Clustering strategy to use
        #[arg(short, long, value_enum, default_value = "grid")]
        strategy: Algorithm,

        /// Iteration cap for kmeans/voronoi
        #[arg(long)]
        max_iterations: Option<usize>,

        /// Seed for reproducible site selection
        #[arg(long)]
        seed: Option<u64>,

        /// Fail if any point is left out of the result
        #[arg(long)]
        strict: bool,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (defaults to the output file extension, else report)
        #[arg(short, long, value_enum)]
        format: Option<Format>,
    },

    /// Run every strategy on the same input and compare the results
    Compare {
        /// Input point file
        input: PathBuf,

        /// Cluster radius
        #[arg(short, long)]
        radius: f64,

        /// Seed for reproducible site selection
        #[arg(long)]
        seed: Option<u64>,

        /// Iteration cap for kmeans/voronoi
        #[arg(long)]
        max_iterations: Option<usize>,
    },

    /// Show information about a point file
    Info {
        /// Input point file
        input: PathBuf,
    },
}

fn build_config(radius: f64, max_iterations: Option<usize>, seed: Option<u64>) -> ReductionConfig {
    ReductionConfig {
        radius,
        max_iterations,
        seed,
        ..ReductionConfig::default()
    }
}

fn write_reduction(reduction: &Reduction, output: Option<&Path>, format: Format) -> Result<()> {
    match output {
        Some(path) => {
            let mut writer = ReductionWriter::create(path)?;
            write_format(&mut writer, reduction, format)
        }
        None => {
            let stdout = io::stdout();
            let mut writer = ReductionWriter::new(BufWriter::new(stdout.lock()));
            write_format(&mut writer, reduction, format)
        }
    }
}

fn write_format<W: io::Write>(
    writer: &mut ReductionWriter<W>,
    reduction: &Reduction,
    format: Format,
) -> Result<()> {
    match format {
        Format::Report => writer.write_report(reduction)?,
        Format::Csv => writer.write_csv(reduction)?,
        Format::Json => writer.write_json(reduction)?,
        Format::Bin => writer.write_binary(reduction)?,
    }
    Ok(())
}

fn load(input: &Path) -> Result<Vec<Point>> {
    let points = read_points(input)?;
    info!("read {} points from {}", points.len(), input.display());
    Ok(points)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Reduce {
            input,
            radius,
            strategy,
            max_iterations,
            seed,
            strict,
            output,
            format,
        } => {
            let points = load(&input)?;
            let strategy = Strategy::from(strategy);
            let config = build_config(radius, max_iterations, seed).with_strict(strict);
            debug!("{strategy} with {config:?}");

            let start = Instant::now();
            let reduction = reduce_with(&points, strategy, &config)?;
            info!(
                "{}: {} points -> {} clusters in {:.2?}",
                strategy,
                points.len(),
                reduction.len(),
                start.elapsed()
            );

            let format = format.unwrap_or_else(|| {
                output
                    .as_deref()
                    .map_or(Format::Report, Format::from_extension)
            });
            write_reduction(&reduction, output.as_deref(), format)?;
        }

        Commands::Compare {
            input,
            radius,
            seed,
            max_iterations,
        } => {
            let points = load(&input)?;
            let config = build_config(radius, max_iterations, seed);

            let results: Vec<(Strategy, Result<Reduction>, f64)> = Strategy::ALL
                .par_iter()
                .map(|&strategy| {
                    let start = Instant::now();
                    let result = reduce_with(&points, strategy, &config).map_err(CliError::from);
                    (strategy, result, start.elapsed().as_secs_f64() * 1000.0)
                })
                .collect();

            println!(
                "{:<13} | {:>8} | {:>8} | {:>8} | {:>10} | {:>10}",
                "Strategy", "Clusters", "Weight", "Dropped", "Iterations", "Time (ms)"
            );
            println!("{:-<72}", "");

            for (strategy, result, elapsed_ms) in results {
                let reduction = result?;
                println!(
                    "{:<13} | {:>8} | {:>8} | {:>8} | {:>10} | {:>10.2}",
                    strategy.as_str(),
                    reduction.len(),
                    reduction.total_weight(),
                    reduction.dropped,
                    reduction.iterations,
                    elapsed_ms
                );
            }
        }

        Commands::Info { input } => {
            let points = load(&input)?;

            println!("File: {}", input.display());
            println!("Points: {}", points.len());

            if !points.is_empty() {
                let (min_x, max_x, min_y, max_y) = points.iter().fold(
                    (
                        f64::INFINITY,
                        f64::NEG_INFINITY,
                        f64::INFINITY,
                        f64::NEG_INFINITY,
                    ),
                    |(min_x, max_x, min_y, max_y), p| {
                        (min_x.min(p.x), max_x.max(p.x), min_y.min(p.y), max_y.max(p.y))
                    },
                );
                println!("X range: {} - {}", min_x, max_x);
                println!("Y range: {} - {}", min_y, max_y);
                println!(
                    "Bounding diagonal: {:.4}",
                    Point::new(min_x, min_y).distance(&Point::new(max_x, max_y))
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert!(matches!(
            Format::from_extension(Path::new("out.CSV")),
            Format::Csv
        ));
        assert!(matches!(
            Format::from_extension(Path::new("out.json")),
            Format::Json
        ));
        assert!(matches!(
            Format::from_extension(Path::new("out.dat")),
            Format::Bin
        ));
        assert!(matches!(
            Format::from_extension(Path::new("out")),
            Format::Report
        ));
    }

    #[test]
    fn test_cli_parses_reduce() {
        let cli = Cli::try_parse_from([
            "pointreduce",
            "reduce",
            "points.csv",
            "--radius",
            "0.5",
            "--strategy",
            "voronoi",
            "--seed",
            "7",
        ])
        .unwrap();

        match cli.command {
            Commands::Reduce {
                radius,
                strategy,
                seed,
                strict,
                ..
            } => {
                assert!((radius - 0.5).abs() < f64::EPSILON);
                assert_eq!(Strategy::from(strategy), Strategy::Voronoi);
                assert_eq!(seed, Some(7));
                assert!(!strict);
            }
            _ => panic!("expected reduce command"),
        }
    }

    #[test]
    fn test_load_missing_file_reports_point_io_error() {
        let err = load(Path::new("does-not-exist.csv")).unwrap_err();
        assert!(matches!(err, CliError::PointIo(pointreduce_io::Error::Io(_))));
    }

    #[test]
    fn test_invalid_radius_reports_core_error() {
        let config = build_config(-1.0, None, None);
        let err = CliError::from(reduce_with(&[], Strategy::Grid, &config).unwrap_err());
        assert!(matches!(
            err,
            CliError::Core(pointreduce_core::Error::InvalidRadius(_))
        ));
    }

    #[test]
    fn test_build_config() {
        let config = build_config(2.0, Some(5), None);
        assert_eq!(config.max_iterations, Some(5));
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }
}
