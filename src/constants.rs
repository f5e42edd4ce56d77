//! Application constants for the Climate TRACE processor
//!
//! This module contains column names, the column groups that drive type
//! casting, file naming patterns and Parquet defaults used throughout the
//! processor.

// =============================================================================
// Column Name Constants
// =============================================================================

/// Column names used in the source, confidence and country CSV files
pub mod columns {
    // Record identity
    pub const SOURCE_ID: &str = "source_id";
    pub const ISO3_COUNTRY: &str = "iso3_country";
    pub const START_TIME: &str = "start_time";
    pub const END_TIME: &str = "end_time";
    pub const GAS: &str = "gas";

    // Classification
    pub const SECTOR: &str = "sector";
    pub const SUBSECTOR: &str = "subsector";
    pub const ORIGINAL_INVENTORY_SECTOR: &str = "original_inventory_sector";
    pub const TEMPORAL_GRANULARITY: &str = "temporal_granularity";

    // Quantities and their units
    pub const EMISSIONS_QUANTITY: &str = "emissions_quantity";
    pub const EMISSIONS_QUANTITY_UNITS: &str = "emissions_quantity_units";
    pub const EMISSIONS_FACTOR: &str = "emissions_factor";
    pub const EMISSIONS_FACTOR_UNITS: &str = "emissions_factor_units";
    pub const CAPACITY: &str = "capacity";
    pub const CAPACITY_UNITS: &str = "capacity_units";
    pub const CAPACITY_FACTOR: &str = "capacity_factor";
    pub const ACTIVITY: &str = "activity";
    pub const ACTIVITY_UNITS: &str = "activity_units";

    // Bookkeeping
    pub const CREATED_DATE: &str = "created_date";
    pub const MODIFIED_DATE: &str = "modified_date";

    // Source description
    pub const SOURCE_NAME: &str = "source_name";
    pub const SOURCE_TYPE: &str = "source_type";
    pub const LAT: &str = "lat";
    pub const LON: &str = "lon";
    pub const GEOMETRY_REF: &str = "geometry_ref";

    // Archive provenance added by the processor
    pub const CT_PACKAGE: &str = "ct_package";
    pub const CT_FILE: &str = "ct_file";

    /// Generic attribute slots `other1..other12`
    pub const OTHER: [&str; 12] = [
        "other1", "other2", "other3", "other4", "other5", "other6", "other7", "other8", "other9",
        "other10", "other11", "other12",
    ];

    /// Definitions of the generic attribute slots
    pub const OTHER_DEF: [&str; 12] = [
        "other1_def",
        "other2_def",
        "other3_def",
        "other4_def",
        "other5_def",
        "other6_def",
        "other7_def",
        "other8_def",
        "other9_def",
        "other10_def",
        "other11_def",
        "other12_def",
    ];

    // Confidence columns, one per quantitative field of a source record
    pub const CONF_SOURCE_TYPE: &str = "conf_source_type";
    pub const CONF_CAPACITY: &str = "conf_capacity";
    pub const CONF_CAPACITY_FACTOR: &str = "conf_capacity_factor";
    pub const CONF_ACTIVITY: &str = "conf_activity";
    pub const CONF_EMISSIONS_FACTOR: &str = "conf_emissions_factor";
    pub const CONF_EMISSIONS_QUANTITY: &str = "conf_emissions_quantity";
}

use columns::*;

// =============================================================================
// Column Groups
// =============================================================================

/// Fields of a source record that carry a confidence level, paired with the
/// name of the confidence column they produce
pub const CONFIDENCE_FIELDS: [(&str, &str); 6] = [
    (SOURCE_TYPE, CONF_SOURCE_TYPE),
    (CAPACITY, CONF_CAPACITY),
    (CAPACITY_FACTOR, CONF_CAPACITY_FACTOR),
    (ACTIVITY, CONF_ACTIVITY),
    (EMISSIONS_FACTOR, CONF_EMISSIONS_FACTOR),
    (EMISSIONS_QUANTITY, CONF_EMISSIONS_QUANTITY),
];

/// Date columns, all in [`DATETIME_FORMAT`]
pub const DATE_COLUMNS: &[&str] = &[START_TIME, END_TIME, CREATED_DATE, MODIFIED_DATE];

/// Date columns whose parse failures are fatal
pub const REQUIRED_DATE_COLUMNS: &[&str] = &[START_TIME, END_TIME];

/// Numeric columns of source and country tables, cast non-strictly to f64
pub const FLOAT_COLUMNS: &[&str] = &[
    EMISSIONS_QUANTITY,
    EMISSIONS_FACTOR,
    CAPACITY,
    CAPACITY_FACTOR,
    ACTIVITY,
    LAT,
    LON,
];

/// Identifier columns, cast strictly to u64
pub const ID_COLUMNS: &[&str] = &[SOURCE_ID];

/// Key used to keep the first of several confidence rows
pub const CONFIDENCE_DEDUP_KEY: [&str; 4] = [START_TIME, END_TIME, ISO3_COUNTRY, SOURCE_ID];

/// Key of the left join between source and confidence rows
pub const CONFIDENCE_JOIN_KEY: [&str; 5] = [START_TIME, END_TIME, ISO3_COUNTRY, SOURCE_ID, GAS];

/// Confidence columns that duplicate values already held by the source table
pub const CONFIDENCE_REDUNDANT_COLUMNS: &[&str] = &[
    CREATED_DATE,
    MODIFIED_DATE,
    SECTOR,
    SUBSECTOR,
    ORIGINAL_INVENTORY_SECTOR,
];

// =============================================================================
// Archive Entry Patterns
// =============================================================================

/// Suffix of the per-subsector source emissions entries
pub const SOURCES_ENTRY_SUFFIX: &str = "_emissions_sources.csv";

/// Suffix of the matching confidence entries
pub const CONFIDENCE_ENTRY_SUFFIX: &str = "_emissions_sources_confidence.csv";

/// Suffix of the country aggregate entries
pub const COUNTRY_ENTRY_SUFFIX: &str = "_country_emissions.csv";

// =============================================================================
// Output Naming
// =============================================================================

/// Prefix of the yearly source partitions
pub const SOURCES_PARTITION_PREFIX: &str = "climate_trace-sources";

/// Prefix of the country table
pub const COUNTRIES_FILE_PREFIX: &str = "climate-trace-countries";

// =============================================================================
// Parsing and Parquet Defaults
// =============================================================================

/// Format of every date column in the CSV files (UTC)
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Rows per row group. Groups are large because the yearly split re-chunks them.
pub const PARQUET_ROW_GROUP_SIZE: usize = 2_000_000;
