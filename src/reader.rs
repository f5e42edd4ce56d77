//! Readers for published Parquet partitions and country tables.
//!
//! Files come from an explicit location when one is given, otherwise from
//! the remote mirror through the cache directory. Every table is recast to
//! its vocabularies and filtered to the requested gases.

use crate::config::CtraceConfig;
use crate::constants::columns::GAS;
use crate::error::{CtraceError, Result};
use crate::models::{GasSelector, YearSelector};
use crate::processor::DatasetProcessor;
use crate::processor::recast::recast_parquet;
use crate::registry;
use crate::resolver::download_to;
use crate::vocab::{Gas, Vocabulary};

use polars::prelude::*;
use reqwest::Client;
use std::path::{Path, PathBuf};
use tokio::task;
use tracing::{debug, info};

/// Read the source emissions of the selected gases and years.
///
/// With `path` the partitions are read from
/// `<path>/<version>/climate_trace-sources_<version>_<year>_<gas>.parquet`;
/// otherwise they are fetched from the mirror into the cache directory.
/// Confidence columns are recast to confidence levels.
pub async fn read_source_emissions(
    gas: impl Into<GasSelector>,
    year: impl Into<YearSelector>,
    path: Option<&Path>,
    config: &CtraceConfig,
) -> Result<DataFrame> {
    let gases = registry::check_gases(&gas.into())?;
    let years = registry::check_years(&year.into())?;

    let mut files = Vec::with_capacity(gases.len() * years.len());
    for gas in &gases {
        for year in &years {
            let name = registry::sources_partition_name(&config.version, *year, *gas);
            let file = match path {
                Some(dir) => dir.join(&name),
                None => fetch_mirror_file(config, &name).await?,
            };
            files.push(file);
        }
    }

    let df = read_partitions(files, &gases).await?;
    info!(
        "Read {} source rows for {} gas(es) and {} year(s)",
        df.height(),
        gases.len(),
        years.len()
    );
    recast_parquet(df, true)
}

/// Read the country emissions of the selected gases.
///
/// Sources, in order of precedence: an explicit Parquet file, the
/// `*_country_emissions.csv` entries of the archives under `archive_path`,
/// and the mirrored country table.
pub async fn read_country_emissions(
    gas: impl Into<GasSelector>,
    archive_path: Option<&Path>,
    parquet_path: Option<&Path>,
    config: &CtraceConfig,
) -> Result<DataFrame> {
    let selector = gas.into();
    let gases = registry::check_gases(&selector)?;

    let file = match (parquet_path, archive_path) {
        (Some(file), _) => file.to_path_buf(),
        (None, Some(archives)) => {
            let processor = DatasetProcessor::new(config.clone())?.with_archive_dir(archives);
            let df = processor.load_country_tables(&selector).await?;
            return Ok(df.lazy().filter(gas_filter(&gases)).collect()?);
        }
        (None, None) => {
            fetch_mirror_file(config, &registry::countries_file_name(&config.version)).await?
        }
    };

    let df = read_partitions(vec![file], &gases).await?;
    info!("Read {} country rows", df.height());
    recast_parquet(df, false)
}

/// Local copy of a mirrored file, downloaded into the cache on first use
async fn fetch_mirror_file(config: &CtraceConfig, name: &str) -> Result<PathBuf> {
    let dest = config.mirror_cache_dir().join(name);
    if tokio::fs::try_exists(&dest).await? {
        debug!("Using mirrored copy {}", dest.display());
        return Ok(dest);
    }

    let url = format!("{}/{}", config.mirror_base_url.trim_end_matches('/'), name);
    download_to(&Client::new(), &url, &dest, None).await?;
    Ok(dest)
}

/// Read Parquet files eagerly, keep the rows of `gases` and concatenate
/// them diagonally
async fn read_partitions(files: Vec<PathBuf>, gases: &[Gas]) -> Result<DataFrame> {
    let gases = gases.to_vec();
    task::spawn_blocking(move || -> Result<DataFrame> {
        let mut frames = Vec::with_capacity(files.len());
        for file in &files {
            debug!("Reading {}", file.display());
            let df = ParquetReader::new(std::fs::File::open(file)?).finish()?;
            frames.push(df.lazy().filter(gas_filter(&gases)));
        }
        if frames.is_empty() {
            return Err(CtraceError::data_validation("no Parquet files to read"));
        }
        Ok(concat_lf_diagonal(frames, UnionArgs::default())?.collect()?)
    })
    .await?
}

/// Predicate keeping the rows whose gas is one of `gases`
fn gas_filter(gases: &[Gas]) -> Expr {
    let names: Vec<&str> = gases.iter().map(|gas| gas.as_str()).collect();
    col(GAS)
        .cast(DataType::String)
        .is_in(lit(Series::new("gases".into(), names)).implode(), false)
}
