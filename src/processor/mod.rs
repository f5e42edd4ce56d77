//! Compaction pipeline.
//!
//! Drives resolver → normalizer → joiner → writer over every gas, sector
//! package and source file, then splits the intermediate partitions by
//! (year, gas) into the published partition files. Also builds the country
//! table.

pub mod join;
pub mod normalize;
pub mod recast;
pub mod writer;

#[cfg(test)]
pub mod tests;

use self::{
    join::ConfidenceJoiner, normalize::SchemaNormalizer, recast::recast_parquet,
    writer::ParquetWriter,
};

use crate::config::CtraceConfig;
use crate::constants::COUNTRY_ENTRY_SUFFIX;
use crate::constants::columns::{CT_FILE, CT_PACKAGE, START_TIME};
use crate::error::{CtraceError, Result};
use crate::models::{GasSelector, ProcessingStats, TableKind, YearSelector};
use crate::registry::{self, SectorPackage};
use crate::resolver::{ArchiveHandle, ArchiveResolver};
use crate::vocab::{Gas, Vocabulary};

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use polars::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::task;
use tracing::{debug, info, warn};

/// Main processor for Climate TRACE archives
#[derive(Debug, Clone)]
pub struct DatasetProcessor {
    config: CtraceConfig,
    resolver: ArchiveResolver,
    normalizer: SchemaNormalizer,
    joiner: ConfidenceJoiner,
    writer: ParquetWriter,
    archive_dir: Option<PathBuf>,
    interactive: bool,
}

impl DatasetProcessor {
    /// Create a processor from a validated configuration
    pub fn new(config: CtraceConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            resolver: ArchiveResolver::from_config(&config),
            normalizer: SchemaNormalizer::from_config(&config),
            joiner: ConfidenceJoiner::new(),
            writer: ParquetWriter::from_config(&config),
            archive_dir: None,
            interactive: false,
            config,
        })
    }

    /// Read archives from `<dir>/<gas>/<package>` instead of the cache
    pub fn with_archive_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.archive_dir = Some(dir.into());
        self
    }

    /// Show progress bars and print coloured summaries
    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self.writer = self.writer.with_progress(interactive);
        self
    }

    pub fn config(&self) -> &CtraceConfig {
        &self.config
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.interactive {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new(len);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        bar
    }

    /// Open the archive of `package`.
    ///
    /// Packages absent from an explicit archive directory are skipped.
    async fn open_archive(&self, package: &SectorPackage) -> Result<Option<ArchiveHandle>> {
        if let Some(dir) = &self.archive_dir {
            let path = dir.join(package.gas.as_str()).join(package.file_name);
            if !tokio::fs::try_exists(&path).await? {
                warn!("Skipping {}: not found in {}", package.file_name, dir.display());
                return Ok(None);
            }
        }
        let handle = self
            .resolver
            .resolve(package.gas, package.file_name, self.archive_dir.as_deref())
            .await?;
        Ok(Some(handle))
    }

    /// Download every archive of the selected gases into the cache
    pub async fn fetch(&self, gases: &GasSelector) -> Result<ProcessingStats> {
        let start_time = Instant::now();
        let gases = registry::check_gases(gases)?;
        let packages: Vec<&'static SectorPackage> =
            gases.iter().flat_map(|gas| registry::packages(*gas)).collect();

        let progress_bar = self.progress_bar(packages.len() as u64);
        let mut stats = ProcessingStats::default();
        for package in packages {
            progress_bar.set_message(format!("{}/{}", package.gas, package.file_name));
            let path = self.resolver.ensure_cached(package).await?;
            stats.files_processed += 1;
            stats.output_paths.push(path);
            progress_bar.inc(1);
        }
        progress_bar.finish_and_clear();

        stats.processing_time_ms = start_time.elapsed().as_millis();
        info!(
            "{} archives available in {}",
            stats.files_processed,
            self.resolver.cache_dir().display()
        );
        Ok(stats)
    }

    /// Compact every source file of the selected gases into yearly partitions
    /// under `output_dir`.
    pub async fn compact_sources(
        &self,
        gases: &GasSelector,
        years: &YearSelector,
        output_dir: &Path,
    ) -> Result<ProcessingStats> {
        let start_time = Instant::now();
        let gases = registry::check_gases(gases)?;
        let years = registry::check_years(years)?;

        if self.interactive {
            println!("{}", "Starting Climate TRACE compaction".bright_green().bold());
            println!("  {} {}", "Version:".bright_cyan(), self.config.version);
            println!("  {} {}", "Output:".bright_cyan(), output_dir.display());
        }

        let mut stats = ProcessingStats::default();
        let mut intermediates: BTreeMap<Gas, Vec<PathBuf>> = BTreeMap::new();

        let packages: Vec<&'static SectorPackage> =
            gases.iter().flat_map(|gas| registry::packages(*gas)).collect();
        let progress_bar = self.progress_bar(packages.len() as u64);

        for package in packages {
            progress_bar.set_message(format!("{}/{}", package.gas, package.name()));
            let Some(handle) = self.open_archive(package).await? else {
                progress_bar.inc(1);
                continue;
            };
            let written = self.compact_archive(handle).await?;

            for (path, rows) in written {
                stats.files_processed += 1;
                debug!("Intermediate partition {} ({} rows)", path.display(), rows);
                intermediates.entry(package.gas).or_default().push(path);
            }
            progress_bar.inc(1);
        }
        progress_bar.finish_and_clear();

        if self.interactive {
            println!("\n{}", "Splitting partitions by year...".bright_yellow());
        }

        for gas in &gases {
            let Some(files) = intermediates.get(gas) else {
                debug!("No source files for {}", gas);
                continue;
            };
            for year in &years {
                let path = output_dir.join(registry::sources_partition_name(
                    &self.config.version,
                    *year,
                    *gas,
                ));
                let rows = self.write_year_partition(files, *year, &path).await?;
                info!("Wrote {} rows for {} {} to {}", rows, gas, year, path.display());
                stats.total_rows += rows;
                stats.output_paths.push(path);
            }
        }

        stats.processing_time_ms = start_time.elapsed().as_millis();
        if self.interactive {
            self.print_summary(&stats);
        }
        Ok(stats)
    }

    /// Normalize, join and write every source file of one archive to the
    /// intermediate directory
    async fn compact_archive(&self, mut handle: ArchiveHandle) -> Result<Vec<(PathBuf, usize)>> {
        let package = handle.package();
        let target_dir = self
            .config
            .temp_dir
            .join(&self.config.version)
            .join(package.gas.as_str())
            .join(package.name());
        let normalizer = self.normalizer;
        let joiner = self.joiner;
        let writer = self.writer.clone();

        task::spawn_blocking(move || -> Result<Vec<(PathBuf, usize)>> {
            let mut written = Vec::new();
            for pair in handle.source_pairs() {
                debug!("Opening {} and {}", pair.sources, pair.confidence);
                let sources = normalizer.load(handle.read_entry(&pair.sources)?, TableKind::Sources)?;
                let confidence =
                    normalizer.load(handle.read_entry(&pair.confidence)?, TableKind::Confidence)?;

                let mut df = joiner.join(sources, confidence)?;
                let height = df.height();
                let stem = pair.stem();
                df.with_column(Series::new(CT_PACKAGE.into(), vec![package.name(); height]))?;
                df.with_column(Series::new(CT_FILE.into(), vec![stem.as_str(); height]))?;

                let path = target_dir.join(format!("{stem}.parquet"));
                let rows = writer.write_frame(df, &path)?;
                written.push((path, rows));
            }
            Ok(written)
        })
        .await?
    }

    /// Concatenate intermediate partitions and keep the rows of one year
    async fn write_year_partition(&self, files: &[PathBuf], year: i32, path: &Path) -> Result<usize> {
        let frames = files
            .iter()
            .map(|file| LazyFrame::scan_parquet(file, Default::default()))
            .collect::<PolarsResult<Vec<_>>>()?;
        let frame = concat_lf_diagonal(frames, UnionArgs::default())?;

        self.writer
            .write_filtered(frame, col(START_TIME).dt().year().eq(lit(year)), path)
            .await
    }

    /// Load every country table of the selected gases from the archives.
    ///
    /// V2 and V3 tables are concatenated diagonally, so columns missing from
    /// one generation are null.
    pub async fn load_country_tables(&self, gases: &GasSelector) -> Result<DataFrame> {
        let gases = registry::check_gases(gases)?;
        let mut frames: Vec<LazyFrame> = Vec::new();

        for gas in &gases {
            for package in registry::packages(*gas) {
                let Some(mut handle) = self.open_archive(package).await? else {
                    continue;
                };
                let normalizer = self.normalizer;

                let tables = task::spawn_blocking(move || -> Result<Vec<DataFrame>> {
                    let mut tables = Vec::new();
                    for entry in handle.entries_with_suffix(COUNTRY_ENTRY_SUFFIX) {
                        debug!("Opening {}", entry);
                        let df = normalizer.load(handle.read_entry(&entry)?, TableKind::Country)?;
                        tables.push(ParquetWriter::prepare(df)?);
                    }
                    Ok(tables)
                })
                .await??;

                frames.extend(tables.into_iter().map(|df| df.lazy()));
            }
        }

        if frames.is_empty() {
            return Err(CtraceError::data_validation(
                "no country tables found in the selected archives",
            ));
        }

        let df = task::spawn_blocking(move || {
            concat_lf_diagonal(frames, UnionArgs::default())?.collect()
        })
        .await??;
        recast_parquet(df, false)
    }

    /// Build the country table of the selected gases under `output_dir`
    pub async fn build_country_table(
        &self,
        gases: &GasSelector,
        output_dir: &Path,
    ) -> Result<ProcessingStats> {
        let start_time = Instant::now();
        if self.interactive {
            println!("{}", "Building country table".bright_green().bold());
        }

        let df = self.load_country_tables(gases).await?;
        let path = output_dir.join(registry::countries_file_name(&self.config.version));
        let rows = self.writer.write_frame_async(df, path.clone()).await?;

        let stats = ProcessingStats {
            files_processed: 1,
            total_rows: rows,
            output_paths: vec![path],
            processing_time_ms: start_time.elapsed().as_millis(),
        };
        if self.interactive {
            self.print_summary(&stats);
        }
        Ok(stats)
    }

    fn print_summary(&self, stats: &ProcessingStats) {
        println!("\n{}", "Processing Summary".bright_green().bold());
        println!(
            "  {} {}ms",
            "Time elapsed:".bright_cyan(),
            stats.processing_time_ms.to_string().bright_white()
        );
        println!(
            "  {} {}",
            "Files processed:".bright_cyan(),
            stats.files_processed.to_string().bright_white()
        );
        println!(
            "  {} {}",
            "Total rows:".bright_cyan(),
            stats.total_rows.to_string().bright_white().bold()
        );
        for path in &stats.output_paths {
            println!("  {} {}", "Wrote".bright_green(), path.display());
        }
    }
}
