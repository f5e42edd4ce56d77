//! Climate TRACE Processor Library
//!
//! Converts the Climate TRACE sector package archives (ZIP files of CSV
//! tables, one per gas and sector) into typed Apache Parquet partitions.
//!
//! This library provides tools for:
//! - Fetching and caching archives with SHA-256 integrity checks
//! - Normalizing the V2 and V3 CSV schemas into one canonical schema
//! - Joining per-source confidence levels onto the emission rows
//! - Writing yearly Parquet partitions and a country table
//! - Reading partitions back with their closed vocabularies restored

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod processor;
pub mod reader;
pub mod registry;
pub mod resolver;
pub mod schema;
pub mod vocab;

pub use config::{CompressionAlgorithm, CtraceConfig, ParquetOptions};
pub use error::{CtraceError, Result};
pub use models::{GasSelector, ProcessingStats, SchemaVersion, TableKind, YearSelector};
pub use processor::DatasetProcessor;
pub use processor::join::ConfidenceJoiner;
pub use processor::normalize::SchemaNormalizer;
pub use processor::recast::recast_parquet;
pub use processor::writer::ParquetWriter;
pub use reader::{read_country_emissions, read_source_emissions};
pub use resolver::{ArchiveHandle, ArchiveResolver};
pub use schema::TableSchema;
pub use vocab::{
    ConfidenceLevel, Gas, Iso3Country, OriginalInventorySector, Sector, Subsector,
    TemporalGranularity, Vocabulary,
};
