//! Parquet writing for normalized tables.
//!
//! Categorical columns are stored as plain strings since Parquet does not
//! keep the closed vocabularies; readers restore them with
//! [`recast_parquet`](crate::processor::recast::recast_parquet). Zero-length
//! strings are nulled before every write.

use crate::config::{CtraceConfig, ParquetOptions};
use crate::error::Result;
use crate::processor::normalize::blank_to_null;

use indicatif::{ProgressBar, ProgressStyle};
use polars::prelude::{
    DataFrame, DataType, Expr, LazyFrame, ParquetWriteOptions,
    ParquetWriter as PolarsParquetWriter, SinkTarget, len,
};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Parquet writer applying the configured compression and row groups
#[derive(Debug, Clone)]
pub struct ParquetWriter {
    options: ParquetOptions,
    show_progress: bool,
}

impl ParquetWriter {
    pub fn new(options: ParquetOptions) -> Self {
        Self {
            options,
            show_progress: false,
        }
    }

    pub fn from_config(config: &CtraceConfig) -> Self {
        Self::new(config.parquet.clone())
    }

    /// Show a spinner while streaming partitions
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    fn write_options(&self) -> ParquetWriteOptions {
        ParquetWriteOptions {
            compression: self.options.compression_algorithm.to_polars_compression(),
            statistics: self.options.statistics(),
            row_group_size: Some(self.options.row_group_size),
            ..Default::default()
        }
    }

    /// Null blank strings and turn categoricals and enums back into strings
    pub fn prepare(mut df: DataFrame) -> Result<DataFrame> {
        let categorical: Vec<String> = df
            .get_columns()
            .iter()
            .filter(|c| matches!(c.dtype(), DataType::Categorical(_, _) | DataType::Enum(_, _)))
            .map(|c| c.name().to_string())
            .collect();

        for name in &categorical {
            let cast = df
                .column(name)?
                .as_materialized_series()
                .cast(&DataType::String)?;
            df.with_column(cast)?;
        }

        let blanks = blank_to_null(&mut df)?;
        if blanks > 0 {
            debug!("Replaced {} blank string(s) with null before writing", blanks);
        }
        Ok(df)
    }

    /// Write one eager frame, returning the number of rows written
    pub fn write_frame(&self, df: DataFrame, output_path: &Path) -> Result<usize> {
        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut df = Self::prepare(df)?;
        let rows = df.height();

        let file = std::fs::File::create(output_path)?;
        PolarsParquetWriter::new(file)
            .with_compression(self.options.compression_algorithm.to_polars_compression())
            .with_statistics(self.options.statistics())
            .with_row_group_size(Some(self.options.row_group_size))
            .finish(&mut df)?;

        debug!("Wrote {} rows to {}", rows, output_path.display());
        Ok(rows)
    }

    /// Write one eager frame on the blocking pool
    pub async fn write_frame_async(&self, df: DataFrame, output_path: PathBuf) -> Result<usize> {
        let writer = self.clone();
        tokio::task::spawn_blocking(move || writer.write_frame(df, &output_path)).await?
    }

    /// Stream a lazy frame to `output_path`.
    ///
    /// The frame is expected to hold plain string columns, as produced by
    /// scanning files written with [`write_frame`](Self::write_frame).
    ///
    /// Falls back to collecting the frame when the streaming sink cannot be
    /// built for the query. Returns the number of rows in the written file.
    pub async fn write_lazy(&self, frame: LazyFrame, output_path: &Path) -> Result<usize> {
        if let Some(parent) = output_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let progress_bar = if self.show_progress {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} [{elapsed_precise}] {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner())
                    .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "),
            );
            bar.enable_steady_tick(std::time::Duration::from_millis(120));
            bar
        } else {
            ProgressBar::hidden()
        };
        progress_bar.set_message(format!("Writing {}", output_path.display()));

        let target = output_path.to_path_buf();
        match frame.clone().sink_parquet(
            SinkTarget::Path(target.clone().into()),
            self.write_options(),
            None,
            Default::default(),
        ) {
            Ok(sink_frame) => {
                tokio::task::spawn_blocking(move || sink_frame.collect()).await??;
            }
            Err(e) => {
                warn!("Streaming sink failed ({}), falling back to collect+write", e);
                progress_bar.set_message("Collecting partition");
                let df = tokio::task::spawn_blocking(move || frame.collect()).await??;
                self.write_frame_async(df, target.clone()).await?;
            }
        }

        let count_frame = LazyFrame::scan_parquet(&target, Default::default())?;
        let count_df =
            tokio::task::spawn_blocking(move || count_frame.select([len()]).collect()).await??;
        let total_rows = count_df.column("len")?.get(0)?.try_extract::<usize>()?;

        progress_bar.finish_and_clear();
        debug!("Streamed {} rows to {}", total_rows, target.display());
        Ok(total_rows)
    }

    /// Write only the rows of a lazy frame matching `predicate`
    pub async fn write_filtered(
        &self,
        frame: LazyFrame,
        predicate: Expr,
        output_path: &Path,
    ) -> Result<usize> {
        self.write_lazy(frame.filter(predicate), output_path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompressionAlgorithm;
    use crate::vocab::{Gas, encode_column, encode_free_column};
    use polars::prelude::{NamedFrom, ParquetReader, SerReader, Series, col, df, lit};
    use tempfile::TempDir;

    fn sample_frame() -> DataFrame {
        let mut df = df! {
            "gas" => &["co2", "ch4", "co2"],
            "source_name" => &[Some("Plant A"), Some(""), None],
            "emissions_quantity" => &[1.0f64, 2.0, 3.0],
        }
        .unwrap();
        encode_column::<Gas>(&mut df, "gas", false).unwrap();
        df
    }

    #[test]
    fn test_prepare_strips_categoricals_and_blanks() {
        let mut frame = sample_frame();
        frame
            .with_column(Series::new("units".into(), &["t", "t", "t"]))
            .unwrap();
        encode_free_column(&mut frame, "units").unwrap();
        assert!(matches!(frame.column("gas").unwrap().dtype(), DataType::Enum(_, _)));

        let df = ParquetWriter::prepare(frame).unwrap();
        assert_eq!(df.column("gas").unwrap().dtype(), &DataType::String);
        assert_eq!(df.column("units").unwrap().dtype(), &DataType::String);
        assert_eq!(df.column("source_name").unwrap().null_count(), 2);
    }

    #[test]
    fn test_write_frame() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("out.parquet");
        let writer = ParquetWriter::new(ParquetOptions {
            compression_algorithm: CompressionAlgorithm::Snappy,
            ..Default::default()
        });

        let rows = writer.write_frame(sample_frame(), &path).unwrap();
        assert_eq!(rows, 3);

        let read = ParquetReader::new(std::fs::File::open(&path).unwrap())
            .finish()
            .unwrap();
        assert_eq!(read.height(), 3);
        assert_eq!(read.column("gas").unwrap().dtype(), &DataType::String);
        assert_eq!(read.column("source_name").unwrap().null_count(), 2);
    }

    #[tokio::test]
    async fn test_write_lazy_counts_rows() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("input.parquet");
        let output = temp_dir.path().join("output.parquet");
        let writer = ParquetWriter::new(ParquetOptions::default());
        writer.write_frame(sample_frame(), &input).unwrap();

        let frame = LazyFrame::scan_parquet(&input, Default::default()).unwrap();
        let rows = writer
            .write_filtered(frame, col("gas").eq(lit("co2")), &output)
            .await
            .unwrap();

        assert_eq!(rows, 2);
        assert!(output.exists());
    }
}
