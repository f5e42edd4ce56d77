//! Schema normalization for the raw CSV tables.
//!
//! Turns an all-string CSV table into the canonical column set with semantic
//! types: missing optional columns become nulls, dates are parsed with the
//! fixed upstream format, numeric and identifier columns are cast, and
//! categorical columns are validated against their vocabularies.

use crate::constants::columns::*;
use crate::constants::{
    CONFIDENCE_FIELDS, DATE_COLUMNS, DATETIME_FORMAT, FLOAT_COLUMNS, ID_COLUMNS,
    REQUIRED_DATE_COLUMNS,
};
use crate::error::{CtraceError, Result};
use crate::models::TableKind;
use crate::schema::TableSchema;
use crate::processor::recast::encode_categories;
use polars::prelude::*;
use std::io::Cursor;
use tracing::{debug, warn};

/// Read CSV bytes with every column kept as a string
pub fn read_csv(bytes: Vec<u8>) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()?;
    debug!("Read CSV table: {} rows x {} columns", df.height(), df.width());
    Ok(df)
}

/// Millisecond UTC timestamps, the dtype of every date column
pub fn utc_datetime() -> DataType {
    DataType::Datetime(TimeUnit::Milliseconds, Some(TimeZone::UTC))
}

fn null_total(df: &DataFrame, columns: &[PlSmallStr]) -> Result<usize> {
    let mut total = 0usize;
    for name in columns {
        total += df.column(name)?.null_count();
    }
    Ok(total)
}

/// Replace zero-length strings with null in every string column.
///
/// Returns the number of values replaced.
pub fn blank_to_null(df: &mut DataFrame) -> Result<usize> {
    let string_columns: Vec<PlSmallStr> = df
        .get_columns()
        .iter()
        .filter(|c| c.dtype() == &DataType::String)
        .map(|c| c.name().clone())
        .collect();
    if string_columns.is_empty() {
        return Ok(0);
    }

    let before = null_total(df, &string_columns)?;
    let cleaned: Vec<Expr> = string_columns
        .iter()
        .map(|name| {
            when(col(name.clone()).str().len_bytes().eq(lit(0u32)))
                .then(lit(NULL))
                .otherwise(col(name.clone()))
                .alias(name.clone())
        })
        .collect();
    *df = df.clone().lazy().with_columns(cleaned).collect()?;

    Ok(null_total(df, &string_columns)? - before)
}

pub(crate) fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_index(name).is_some()
}

/// Parse a string column in [`DATETIME_FORMAT`] into UTC millisecond
/// datetimes.
///
/// A value that fails to parse is fatal when `required`, null otherwise.
/// Returns the number of values nulled.
fn parse_date_column(df: &mut DataFrame, column: &str, required: bool) -> Result<usize> {
    let options = StrptimeOptions {
        format: Some(DATETIME_FORMAT.into()),
        strict: false,
        exact: true,
        cache: true,
    };
    let parsed = col(column)
        .str()
        .strptime(utc_datetime(), options, lit("raise"));

    if required {
        let unparsed = df
            .clone()
            .lazy()
            .filter(col(column).is_not_null().and(parsed.clone().is_null()))
            .select([col(column)])
            .collect()?;
        if let Some(value) = unparsed.column(column)?.as_materialized_series().str()?.get(0) {
            return Err(CtraceError::DateParse {
                column: column.to_string(),
                value: value.to_string(),
            });
        }
    }

    let nulls_before = df.column(column)?.null_count();
    *df = df.clone().lazy().with_column(parsed.alias(column)).collect()?;
    let failures = df.column(column)?.null_count() - nulls_before;

    if failures > 0 {
        warn!(
            "{} unparseable value(s) in optional date column '{}' set to null",
            failures, column
        );
    }
    Ok(failures)
}

/// Count rows whose start time is after their end time
pub fn inverted_periods(df: &DataFrame) -> Result<usize> {
    if !has_column(df, START_TIME) || !has_column(df, END_TIME) {
        return Ok(0);
    }
    let inverted = df
        .clone()
        .lazy()
        .filter(col(START_TIME).gt(col(END_TIME)))
        .select([len()])
        .collect()?;
    let count = inverted
        .column("len")?
        .as_materialized_series()
        .cast(&DataType::UInt64)?
        .u64()?
        .get(0)
        .unwrap_or(0);
    Ok(count as usize)
}

/// Normalizes raw CSV tables into the canonical schema
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaNormalizer {
    strict: bool,
}

impl SchemaNormalizer {
    /// Create a normalizer. With `strict`, out-of-vocabulary categorical
    /// values and inverted time periods are errors.
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }

    pub fn from_config(config: &crate::config::CtraceConfig) -> Self {
        Self::new(config.strict_categories)
    }

    /// Read and normalize one CSV entry
    pub fn load(&self, bytes: Vec<u8>, table: TableKind) -> Result<DataFrame> {
        let raw = read_csv(bytes)?;
        self.normalize(raw, table)
    }

    /// Normalize a raw table, detecting its release generation from the header
    pub fn normalize(&self, raw: DataFrame, table: TableKind) -> Result<DataFrame> {
        let header: Vec<String> = raw
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect();
        let schema = TableSchema::detect(table, &header);
        self.normalize_with(raw, schema)
    }

    /// Normalize a raw table against an explicit descriptor
    pub fn normalize_with(&self, mut raw: DataFrame, schema: &TableSchema) -> Result<DataFrame> {
        let header: Vec<String> = raw
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect();

        let fillable = schema.reconcile(&header)?;
        let height = raw.height();
        for column in &fillable {
            raw.with_column(Series::full_null((*column).into(), height, &DataType::String))?;
        }
        if !fillable.is_empty() {
            debug!(
                "Filled {} missing optional column(s) with nulls: {:?}",
                fillable.len(),
                fillable
            );
        }

        let mut df = raw.select(schema.columns.iter().copied())?;
        blank_to_null(&mut df)?;

        if schema.table == TableKind::Confidence {
            for (field, conf_field) in CONFIDENCE_FIELDS {
                df.rename(field, conf_field.into())?;
            }
        }

        for column in DATE_COLUMNS {
            if has_column(&df, column) {
                parse_date_column(&mut df, column, REQUIRED_DATE_COLUMNS.contains(column))?;
            }
        }

        for column in FLOAT_COLUMNS {
            if has_column(&df, column) {
                let cast = df
                    .column(column)?
                    .as_materialized_series()
                    .cast(&DataType::Float64)?;
                df.with_column(cast)?;
            }
        }

        for column in ID_COLUMNS {
            if has_column(&df, column) {
                let cast = df
                    .column(column)?
                    .as_materialized_series()
                    .strict_cast(&DataType::UInt64)
                    .map_err(|e| {
                        CtraceError::data_validation(format!(
                            "identifier column '{column}' is not an unsigned integer: {e}"
                        ))
                    })?;
                df.with_column(cast)?;
            }
        }

        self.encode_categories(&mut df)?;
        self.check_periods(&df)?;

        debug!(
            "Normalized {} table ({:?}): {} rows x {} columns",
            schema.table,
            schema.version,
            df.height(),
            df.width()
        );
        Ok(df)
    }

    /// Encode every categorical column present in `df`
    pub fn encode_categories(&self, df: &mut DataFrame) -> Result<usize> {
        encode_categories(df, self.strict, true)
    }

    fn check_periods(&self, df: &DataFrame) -> Result<()> {
        let inverted = inverted_periods(df)?;
        if inverted == 0 {
            return Ok(());
        }
        if self.strict {
            return Err(CtraceError::data_validation(format!(
                "{inverted} row(s) have start_time after end_time"
            )));
        }
        warn!("{} row(s) have start_time after end_time", inverted);
        Ok(())
    }
}
