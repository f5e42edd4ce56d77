//! Command-line interface components.

use crate::config::{CompressionAlgorithm, CtraceConfig, ParquetOptions};
use crate::constants::columns::{GAS, SECTOR};
use crate::models::{GasSelector, YearSelector};
use crate::processor::DatasetProcessor;
use crate::processor::recast::recast_parquet;
use crate::vocab::Gas;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use polars::prelude::{DataFrame, DataType, IntoLazy, ParquetReader, SerReader, col, len};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "ctrace")]
#[command(about = "Convert Climate TRACE emissions archives to typed Parquet partitions")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Directory for downloaded archives and mirrored files
    #[arg(long, global = true, value_name = "PATH")]
    pub cache_dir: Option<PathBuf>,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only report errors, no progress bars or summaries
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Download the sector package archives into the cache
    Fetch {
        /// Gases to fetch, comma separated (default: all)
        #[arg(short, long = "gas", value_delimiter = ',')]
        gases: Vec<Gas>,

        /// Download from this base URL instead of the official one
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,
    },

    /// Compact the emission source tables into yearly Parquet partitions
    Compact {
        /// Gases to compact, comma separated (default: all)
        #[arg(short, long = "gas", value_delimiter = ',')]
        gases: Vec<Gas>,

        /// Years to write, comma separated (default: all)
        #[arg(short, long = "year", value_delimiter = ',')]
        years: Vec<i32>,

        /// Read archives from <DIR>/<gas>/<package> instead of the cache
        #[arg(long, value_name = "DIR")]
        archives: Option<PathBuf>,

        /// Output directory for the partitions
        #[arg(short, long, default_value = "parquet")]
        output: PathBuf,

        /// Directory for intermediate partitions
        #[arg(long, value_name = "DIR")]
        temp_dir: Option<PathBuf>,

        /// Parquet compression algorithm (snappy, zstd, lz4, none)
        #[arg(long, default_value = "zstd")]
        compression: CompressionAlgorithm,

        /// Fail on categorical values outside their vocabulary
        #[arg(long)]
        strict: bool,
    },

    /// Build the country emissions table
    Countries {
        /// Gases to include, comma separated (default: all)
        #[arg(short, long = "gas", value_delimiter = ',')]
        gases: Vec<Gas>,

        /// Read archives from <DIR>/<gas>/<package> instead of the cache
        #[arg(long, value_name = "DIR")]
        archives: Option<PathBuf>,

        /// Output directory for the country table
        #[arg(short, long, default_value = "parquet")]
        output: PathBuf,
    },

    /// Summarize a Parquet file written by this tool
    Summary {
        /// Parquet file to inspect
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
}

impl Args {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Progress bars and coloured summaries are shown unless quiet
    pub fn interactive(&self) -> bool {
        !self.quiet
    }

    /// Base configuration with the global overrides applied
    pub fn config(&self) -> CtraceConfig {
        let config = CtraceConfig::default();
        match &self.cache_dir {
            Some(dir) => config.with_cache_dir(dir),
            None => config,
        }
    }
}

/// Set up `tracing` output on stderr
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ctrace_processor={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Run the selected command
pub async fn run(args: Args) -> Result<()> {
    setup_logging(&args)?;
    let interactive = args.interactive();
    let config = args.config();

    match args.command {
        Command::Fetch { gases, base_url } => {
            let config = match base_url {
                Some(url) => config.with_download_base_url(url),
                None => config,
            };
            let processor = DatasetProcessor::new(config)?.with_interactive(interactive);
            let stats = processor
                .fetch(&GasSelector::Many(gases))
                .await
                .context("Failed to fetch archives")?;
            if interactive {
                println!(
                    "{} {} archives in {}",
                    "Cached".bright_green().bold(),
                    stats.files_processed,
                    processor.config().cache_dir.display()
                );
            }
        }
        Command::Compact {
            gases,
            years,
            archives,
            output,
            temp_dir,
            compression,
            strict,
        } => {
            let mut config = config.with_parquet_options(ParquetOptions {
                compression_algorithm: compression,
                ..Default::default()
            });
            if let Some(dir) = temp_dir {
                config = config.with_temp_dir(dir);
            }
            if strict {
                config = config.with_strict_categories();
            }

            let processor = with_archives(DatasetProcessor::new(config)?, archives)
                .with_interactive(interactive);
            processor
                .compact_sources(&GasSelector::Many(gases), &YearSelector::Many(years), &output)
                .await
                .context("Failed to compact source emissions")?;
        }
        Command::Countries {
            gases,
            archives,
            output,
        } => {
            let processor = with_archives(DatasetProcessor::new(config)?, archives)
                .with_interactive(interactive);
            processor
                .build_country_table(&GasSelector::Many(gases), &output)
                .await
                .context("Failed to build the country table")?;
        }
        Command::Summary { path } => {
            let df = read_summary_frame(&path).await?;
            print_frame_summary(&path, &df)?;
        }
    }
    Ok(())
}

fn with_archives(processor: DatasetProcessor, archives: Option<PathBuf>) -> DatasetProcessor {
    match archives {
        Some(dir) => processor.with_archive_dir(dir),
        None => processor,
    }
}

async fn read_summary_frame(path: &Path) -> Result<DataFrame> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let df = tokio::task::spawn_blocking(move || ParquetReader::new(file).finish())
        .await?
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(recast_parquet(df, true)?)
}

/// Row counts per distinct value of a column, nulls under "null"
pub fn value_counts(df: &DataFrame, column: &str) -> Result<BTreeMap<String, usize>> {
    let counts = df
        .clone()
        .lazy()
        .group_by([col(column)])
        .agg([len().alias("rows")])
        .select([
            col(column).cast(DataType::String),
            col("rows").cast(DataType::UInt64),
        ])
        .collect()?;

    let values = counts.column(column)?.as_materialized_series().str()?;
    let rows = counts.column("rows")?.as_materialized_series().u64()?;
    Ok(values
        .into_iter()
        .zip(rows.into_iter())
        .map(|(value, n)| (value.unwrap_or("null").to_string(), n.unwrap_or(0) as usize))
        .collect())
}

fn print_frame_summary(path: &Path, df: &DataFrame) -> Result<()> {
    println!("{} {}", "Summary of".bright_green().bold(), path.display());
    println!(
        "  {} {}",
        "Rows:".bright_cyan(),
        df.height().to_string().bright_white().bold()
    );
    println!(
        "  {} {}",
        "Columns:".bright_cyan(),
        df.width().to_string().bright_white()
    );

    for column in [GAS, SECTOR] {
        if df.get_column_index(column).is_none() {
            continue;
        }
        println!("\n  {}", format!("Rows per {column}").bright_yellow());
        for (value, count) in value_counts(df, column)? {
            println!("    {:<24} {}", value, count);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::encode_column;
    use polars::prelude::df;

    #[test]
    fn test_parse_compact_arguments() {
        let args = Args::parse_from([
            "ctrace",
            "--cache-dir",
            "/tmp/ct",
            "-vv",
            "compact",
            "--gas",
            "co2,ch4",
            "--year",
            "2022",
            "--compression",
            "snappy",
        ]);

        assert_eq!(args.get_log_level(), "debug");
        assert_eq!(args.config().cache_dir, PathBuf::from("/tmp/ct"));
        match args.command {
            Command::Compact {
                gases,
                years,
                compression,
                output,
                ..
            } => {
                assert_eq!(gases, vec![Gas::Co2, Gas::Ch4]);
                assert_eq!(years, vec![2022]);
                assert_eq!(compression, CompressionAlgorithm::Snappy);
                assert_eq!(output, PathBuf::from("parquet"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_unknown_gas_is_rejected() {
        let result = Args::try_parse_from(["ctrace", "fetch", "--gas", "helium"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_quiet_mode() {
        let args = Args::parse_from(["ctrace", "--quiet", "summary", "out.parquet"]);
        assert_eq!(args.get_log_level(), "error");
        assert!(!args.interactive());
    }

    #[test]
    fn test_value_counts() {
        let df = df! {
            "gas" => &[Some("co2"), Some("ch4"), Some("co2"), None],
        }
        .unwrap();
        let counts = value_counts(&df, "gas").unwrap();
        assert_eq!(counts.get("co2"), Some(&2));
        assert_eq!(counts.get("ch4"), Some(&1));
        assert_eq!(counts.get("null"), Some(&1));
        assert_eq!(counts.len(), 3);
    }

    #[test]
    fn test_value_counts_of_encoded_column() {
        let mut df = df! {
            "gas" => &["n2o", "n2o", "co2e_20yr", "n2o"],
        }
        .unwrap();
        encode_column::<Gas>(&mut df, "gas", true).unwrap();

        let counts = value_counts(&df, "gas").unwrap();
        assert_eq!(
            counts.into_iter().collect::<Vec<_>>(),
            vec![("co2e_20yr".to_string(), 1), ("n2o".to_string(), 3)]
        );
    }
}
