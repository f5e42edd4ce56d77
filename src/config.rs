//! Configuration management and validation.
//!
//! Provides the processing configuration: where archives are cached, where
//! intermediate partitions are written, which release is targeted, how
//! strictly categorical columns are validated and how Parquet files are
//! written.

use crate::constants::PARQUET_ROW_GROUP_SIZE;
use crate::error::{CtraceError, Result};
use crate::registry;
use polars::prelude::{ParquetCompression, StatisticsOptions};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Supported compression algorithms for parquet files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompressionAlgorithm {
    /// Snappy compression - good balance of speed and compression
    Snappy,
    /// ZSTD compression - better compression ratio, slower
    Zstd,
    /// LZ4 compression - fastest, lower compression ratio
    Lz4,
    /// No compression
    Uncompressed,
}

impl CompressionAlgorithm {
    /// Convert to polars ParquetCompression type
    pub fn to_polars_compression(&self) -> ParquetCompression {
        match self {
            CompressionAlgorithm::Snappy => ParquetCompression::Snappy,
            CompressionAlgorithm::Zstd => ParquetCompression::Zstd(None),
            CompressionAlgorithm::Lz4 => ParquetCompression::Lz4Raw,
            CompressionAlgorithm::Uncompressed => ParquetCompression::Uncompressed,
        }
    }
}

impl std::str::FromStr for CompressionAlgorithm {
    type Err = CtraceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "snappy" => Ok(CompressionAlgorithm::Snappy),
            "zstd" => Ok(CompressionAlgorithm::Zstd),
            "lz4" => Ok(CompressionAlgorithm::Lz4),
            "none" | "uncompressed" => Ok(CompressionAlgorithm::Uncompressed),
            other => Err(CtraceError::invalid_argument(
                "compression",
                other,
                ["snappy", "zstd", "lz4", "none"],
            )),
        }
    }
}

/// Parquet writing options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParquetOptions {
    /// Compression algorithm selection
    pub compression_algorithm: CompressionAlgorithm,

    /// Enable column statistics for query pruning
    pub enable_statistics: bool,

    /// Rows per row group
    pub row_group_size: usize,
}

impl Default for ParquetOptions {
    fn default() -> Self {
        Self {
            compression_algorithm: CompressionAlgorithm::Zstd,
            enable_statistics: true,
            row_group_size: PARQUET_ROW_GROUP_SIZE,
        }
    }
}

impl ParquetOptions {
    pub fn statistics(&self) -> StatisticsOptions {
        if self.enable_statistics {
            StatisticsOptions::full()
        } else {
            StatisticsOptions::empty()
        }
    }
}

/// Global configuration for Climate TRACE processing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CtraceConfig {
    /// Directory holding downloaded archives and mirrored partitions
    pub cache_dir: PathBuf,

    /// Directory for intermediate partitions written during compaction
    pub temp_dir: PathBuf,

    /// Version string of the derived dataset
    pub version: String,

    /// Base URL of the sector packages
    pub download_base_url: String,

    /// Base URL of the pre-built Parquet mirror
    pub mirror_base_url: String,

    /// Fail on categorical values outside their vocabulary instead of
    /// replacing them with null
    pub strict_categories: bool,

    /// Parquet writing options
    pub parquet: ParquetOptions,
}

impl Default for CtraceConfig {
    fn default() -> Self {
        let cache_dir = dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("ctrace");

        Self {
            cache_dir,
            temp_dir: std::env::temp_dir().join("ctrace"),
            version: registry::VERSION.to_string(),
            download_base_url: registry::DOWNLOAD_BASE_URL.to_string(),
            mirror_base_url: registry::MIRROR_BASE_URL.to_string(),
            strict_categories: false,
            parquet: ParquetOptions::default(),
        }
    }
}

impl CtraceConfig {
    /// Use a custom archive cache directory
    pub fn with_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = cache_dir.into();
        self
    }

    /// Use a custom directory for intermediate partitions
    pub fn with_temp_dir(mut self, temp_dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = temp_dir.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_download_base_url(mut self, url: impl Into<String>) -> Self {
        self.download_base_url = url.into();
        self
    }

    pub fn with_mirror_base_url(mut self, url: impl Into<String>) -> Self {
        self.mirror_base_url = url.into();
        self
    }

    /// Enable strict categorical validation
    pub fn with_strict_categories(mut self) -> Self {
        self.strict_categories = true;
        self
    }

    /// Configure parquet writing options
    pub fn with_parquet_options(mut self, parquet: ParquetOptions) -> Self {
        self.parquet = parquet;
        self
    }

    /// Check the configuration before any work starts
    pub fn validate(&self) -> Result<()> {
        if self.version.trim().is_empty() {
            return Err(CtraceError::configuration("dataset version must not be empty"));
        }
        if self.parquet.row_group_size == 0 {
            return Err(CtraceError::configuration("row group size must be positive"));
        }
        for (name, url) in [
            ("download base URL", &self.download_base_url),
            ("mirror base URL", &self.mirror_base_url),
        ] {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(CtraceError::configuration(format!(
                    "{name} must be an http(s) URL, got '{url}'"
                )));
            }
        }
        debug!("Configuration validated: {:?}", self);
        Ok(())
    }

    /// Cache directory of mirrored Parquet partitions
    pub fn mirror_cache_dir(&self) -> PathBuf {
        self.cache_dir.join("mirror")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CtraceConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.version, registry::VERSION);
        assert_eq!(config.parquet.row_group_size, 2_000_000);
        assert_eq!(config.parquet.compression_algorithm, CompressionAlgorithm::Zstd);
        assert!(!config.strict_categories);
    }

    #[test]
    fn test_builder_methods() {
        let config = CtraceConfig::default()
            .with_cache_dir("/tmp/ct-cache")
            .with_temp_dir("/tmp/ct-tmp")
            .with_strict_categories();

        assert_eq!(config.cache_dir, PathBuf::from("/tmp/ct-cache"));
        assert_eq!(config.mirror_cache_dir(), PathBuf::from("/tmp/ct-cache/mirror"));
        assert!(config.strict_categories);
    }

    #[test]
    fn test_invalid_config() {
        let config = CtraceConfig::default().with_mirror_base_url("ftp://example.org");
        assert!(matches!(
            config.validate(),
            Err(CtraceError::Configuration { .. })
        ));

        let config = CtraceConfig::default().with_download_base_url("downloads.example.org");
        assert!(config.validate().is_err());

        let config = CtraceConfig::default().with_parquet_options(ParquetOptions {
            row_group_size: 0,
            ..Default::default()
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_compression_parsing() {
        assert_eq!(
            "ZSTD".parse::<CompressionAlgorithm>().unwrap(),
            CompressionAlgorithm::Zstd
        );
        assert_eq!(
            "none".parse::<CompressionAlgorithm>().unwrap(),
            CompressionAlgorithm::Uncompressed
        );
        assert!("brotli".parse::<CompressionAlgorithm>().is_err());
    }
}
