//! Versioned column-set descriptors for the CSV tables.
//!
//! Every table kind has one descriptor per upstream release generation. A
//! descriptor lists the canonical columns in output order and the subset that
//! may be absent from a file (and is then filled with nulls). The release
//! generation is detected from the CSV header.

use crate::constants::columns::*;
use crate::error::{CtraceError, Result};
use crate::models::{SchemaVersion, TableKind};
use std::collections::HashSet;
use tracing::debug;

/// Canonical column set of one table kind in one release generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub table: TableKind,
    pub version: SchemaVersion,
    /// Canonical columns, in output order
    pub columns: &'static [&'static str],
    /// Columns allowed to be missing from the input
    pub optional: &'static [&'static str],
}

const SOURCE_COLUMNS: &[&str] = &const_concat::<48>(&[
    &[
        SOURCE_ID,
        ISO3_COUNTRY,
        SECTOR,
        SUBSECTOR,
        ORIGINAL_INVENTORY_SECTOR,
        START_TIME,
        END_TIME,
        TEMPORAL_GRANULARITY,
        GAS,
        EMISSIONS_QUANTITY,
        EMISSIONS_FACTOR,
        EMISSIONS_FACTOR_UNITS,
        CAPACITY,
        CAPACITY_UNITS,
        CAPACITY_FACTOR,
        ACTIVITY,
        ACTIVITY_UNITS,
        CREATED_DATE,
        MODIFIED_DATE,
        SOURCE_NAME,
        SOURCE_TYPE,
        LAT,
        LON,
    ],
    &OTHER,
    &OTHER_DEF,
    &[GEOMETRY_REF],
]);

const SOURCE_OPTIONAL_V3: &[&str] = &const_concat::<36>(&[
    &[
        ACTIVITY,
        ACTIVITY_UNITS,
        EMISSIONS_QUANTITY,
        EMISSIONS_FACTOR,
        EMISSIONS_FACTOR_UNITS,
        CAPACITY_UNITS,
        CAPACITY,
        CAPACITY_FACTOR,
        GEOMETRY_REF,
        LAT,
        LON,
        ORIGINAL_INVENTORY_SECTOR,
    ],
    &OTHER,
    &OTHER_DEF,
]);

const SOURCE_OPTIONAL_V2: &[&str] = &const_concat::<38>(&[
    &[
        ACTIVITY,
        ACTIVITY_UNITS,
        EMISSIONS_QUANTITY,
        EMISSIONS_FACTOR,
        EMISSIONS_FACTOR_UNITS,
        CAPACITY_UNITS,
        CAPACITY,
        CAPACITY_FACTOR,
        GEOMETRY_REF,
        LAT,
        LON,
        ORIGINAL_INVENTORY_SECTOR,
    ],
    &OTHER,
    &OTHER_DEF,
    &[SECTOR, SUBSECTOR],
]);

const CONFIDENCE_COLUMNS: &[&str] = &[
    SOURCE_ID,
    ISO3_COUNTRY,
    SECTOR,
    SUBSECTOR,
    START_TIME,
    END_TIME,
    GAS,
    CREATED_DATE,
    MODIFIED_DATE,
    SOURCE_TYPE,
    CAPACITY,
    CAPACITY_FACTOR,
    ACTIVITY,
    EMISSIONS_FACTOR,
    EMISSIONS_QUANTITY,
];

const COUNTRY_COLUMNS_V3: &[&str] = &[
    ISO3_COUNTRY,
    START_TIME,
    END_TIME,
    GAS,
    SECTOR,
    SUBSECTOR,
    EMISSIONS_QUANTITY,
    EMISSIONS_QUANTITY_UNITS,
    TEMPORAL_GRANULARITY,
    CREATED_DATE,
    MODIFIED_DATE,
];

const COUNTRY_COLUMNS_V2: &[&str] = &[
    ISO3_COUNTRY,
    START_TIME,
    END_TIME,
    ORIGINAL_INVENTORY_SECTOR,
    GAS,
    EMISSIONS_QUANTITY,
    EMISSIONS_QUANTITY_UNITS,
    TEMPORAL_GRANULARITY,
    CREATED_DATE,
    MODIFIED_DATE,
];

/// Concatenate column lists at compile time
const fn const_concat<const N: usize>(parts: &[&[&'static str]]) -> [&'static str; N] {
    let mut out = [""; N];
    let mut n = 0;
    let mut p = 0;
    while p < parts.len() {
        let mut i = 0;
        while i < parts[p].len() {
            out[n] = parts[p][i];
            n += 1;
            i += 1;
        }
        p += 1;
    }
    assert!(n == N, "column list length mismatch");
    out
}

pub const SOURCES_V3: TableSchema = TableSchema {
    table: TableKind::Sources,
    version: SchemaVersion::V3,
    columns: SOURCE_COLUMNS,
    optional: SOURCE_OPTIONAL_V3,
};

pub const SOURCES_V2: TableSchema = TableSchema {
    table: TableKind::Sources,
    version: SchemaVersion::V2,
    columns: SOURCE_COLUMNS,
    optional: SOURCE_OPTIONAL_V2,
};

pub const CONFIDENCE_V3: TableSchema = TableSchema {
    table: TableKind::Confidence,
    version: SchemaVersion::V3,
    columns: CONFIDENCE_COLUMNS,
    optional: &[],
};

pub const CONFIDENCE_V2: TableSchema = TableSchema {
    table: TableKind::Confidence,
    version: SchemaVersion::V2,
    columns: CONFIDENCE_COLUMNS,
    optional: &[SECTOR, SUBSECTOR],
};

pub const COUNTRY_V3: TableSchema = TableSchema {
    table: TableKind::Country,
    version: SchemaVersion::V3,
    columns: COUNTRY_COLUMNS_V3,
    optional: &[],
};

pub const COUNTRY_V2: TableSchema = TableSchema {
    table: TableKind::Country,
    version: SchemaVersion::V2,
    columns: COUNTRY_COLUMNS_V2,
    optional: &[],
};

impl TableSchema {
    /// Descriptor of `table` in release generation `version`
    pub fn lookup(table: TableKind, version: SchemaVersion) -> &'static TableSchema {
        match (table, version) {
            (TableKind::Sources, SchemaVersion::V3) => &SOURCES_V3,
            (TableKind::Sources, SchemaVersion::V2) => &SOURCES_V2,
            (TableKind::Confidence, SchemaVersion::V3) => &CONFIDENCE_V3,
            (TableKind::Confidence, SchemaVersion::V2) => &CONFIDENCE_V2,
            (TableKind::Country, SchemaVersion::V3) => &COUNTRY_V3,
            (TableKind::Country, SchemaVersion::V2) => &COUNTRY_V2,
        }
    }

    /// Pick the descriptor matching a CSV header
    pub fn detect<S: AsRef<str>>(table: TableKind, header: &[S]) -> &'static TableSchema {
        let version = detect_version(header);
        debug!("Detected {:?} schema for {} table", version, table);
        Self::lookup(table, version)
    }

    pub fn is_optional(&self, column: &str) -> bool {
        self.optional.contains(&column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.columns.contains(&column)
    }

    /// Compare a header against the canonical set.
    ///
    /// Returns the optional columns that are absent and must be filled with
    /// nulls. Fails with `SchemaMismatch` when a required column is absent.
    /// Extra columns are not an error.
    pub fn reconcile<S: AsRef<str>>(&self, header: &[S]) -> Result<Vec<&'static str>> {
        let present: HashSet<&str> = header.iter().map(|c| c.as_ref()).collect();

        let (fillable, missing): (Vec<&'static str>, Vec<&'static str>) = self
            .columns
            .iter()
            .copied()
            .filter(|column| !present.contains(column))
            .partition(|column| self.is_optional(column));

        let mut unexpected: Vec<String> = header
            .iter()
            .map(|c| c.as_ref())
            .filter(|column| !self.contains(column))
            .map(str::to_string)
            .collect();
        unexpected.sort();

        if !missing.is_empty() {
            return Err(CtraceError::SchemaMismatch {
                table: self.table.to_string(),
                missing: missing.into_iter().map(str::to_string).collect(),
                unexpected,
            });
        }

        if !unexpected.is_empty() {
            debug!(
                "Ignoring {} unrecognized column(s) in {} table: {:?}",
                unexpected.len(),
                self.table,
                unexpected
            );
        }
        Ok(fillable)
    }
}

/// Release generation of a table, from its header
pub fn detect_version<S: AsRef<str>>(header: &[S]) -> SchemaVersion {
    let has = |name: &str| header.iter().any(|c| c.as_ref() == name);
    // Either column marks the newer generation, whose reconcile then
    // reports the other one if it is missing
    if has(SECTOR) || has(SUBSECTOR) {
        SchemaVersion::V3
    } else {
        SchemaVersion::V2
    }
}
