//! Confidence annotation join.
//!
//! Some upstream confidence files repeat the same record several times. The
//! first row of each (start_time, end_time, iso3_country, source_id) group is
//! kept, in file order, then the confidence levels are left-joined onto the
//! source rows. Which duplicate survives depends on the upstream row order.

use crate::constants::{CONFIDENCE_DEDUP_KEY, CONFIDENCE_JOIN_KEY, CONFIDENCE_REDUNDANT_COLUMNS};
use crate::error::{CtraceError, Result};
use polars::prelude::*;
use tracing::{debug, warn};

/// Joins normalized confidence tables onto normalized source tables
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfidenceJoiner;

impl ConfidenceJoiner {
    pub fn new() -> Self {
        Self
    }

    /// Keep the first confidence row of every deduplication key.
    ///
    /// Returns the deduplicated table and the number of rows dropped.
    pub fn deduplicate(&self, confidence: &DataFrame) -> Result<(DataFrame, usize)> {
        let keys: Vec<String> = CONFIDENCE_DEDUP_KEY.iter().map(|k| k.to_string()).collect();
        let kept =
            confidence.unique_stable(Some(keys.as_slice()), UniqueKeepStrategy::First, None)?;

        let dropped = confidence.height() - kept.height();
        if dropped > 0 {
            warn!(
                "Dropped {} duplicated confidence row(s), keeping the first of each key",
                dropped
            );
        }
        Ok((kept, dropped))
    }

    /// Left-join confidence levels onto `sources`.
    ///
    /// The result has exactly one row per source row.
    pub fn join(&self, sources: DataFrame, confidence: DataFrame) -> Result<DataFrame> {
        let source_rows = sources.height();
        let (confidence, _) = self.deduplicate(&confidence)?;

        let redundant: Vec<&str> = CONFIDENCE_REDUNDANT_COLUMNS
            .iter()
            .copied()
            .filter(|column| confidence.get_column_index(column).is_some())
            .collect();
        let confidence = confidence.drop_many(redundant);

        // Both sides carry the same closed Enum dtypes on the key columns
        let on: Vec<Expr> = CONFIDENCE_JOIN_KEY.iter().map(|column| col(*column)).collect();
        let joined = sources
            .lazy()
            .join(
                confidence.lazy(),
                on.clone(),
                on,
                JoinArgs::new(JoinType::Left),
            )
            .collect()?;

        if joined.height() != source_rows {
            return Err(CtraceError::data_validation(format!(
                "confidence join changed the row count from {} to {}",
                source_rows,
                joined.height()
            )));
        }

        debug!(
            "Joined confidence levels onto {} source rows ({} columns)",
            joined.height(),
            joined.width()
        );
        Ok(joined)
    }
}
