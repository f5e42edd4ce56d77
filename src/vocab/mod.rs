//! Closed vocabularies for the categorical columns of the dataset.
//!
//! Every categorical column (country, gas, sector, subsector,
//! original inventory sector, temporal granularity, confidence level) is
//! validated against one of the enums defined here before it is encoded as a
//! polars `Enum` whose categories are exactly the vocabulary. Values outside
//! the vocabulary become null, or fail the whole table when strict casting is
//! requested.

use crate::error::{CtraceError, Result};
use polars::prelude::*;
use tracing::{debug, warn};

/// A closed set of string values with a canonical spelling
pub trait Vocabulary: Copy + Eq + 'static {
    /// Human readable name, used in error messages
    const NAME: &'static str;

    /// Every member, in declaration order
    const ALL: &'static [Self];

    /// Canonical spelling as found in the CSV files
    fn as_str(&self) -> &'static str;

    /// Look up a raw value by its exact spelling
    fn parse(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|member| member.as_str() == raw)
    }

    fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|member| member.as_str()).collect()
    }
}

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident($label:literal) {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        $vis enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $crate::vocab::Vocabulary for $name {
            const NAME: &'static str = $label;
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::vocab::Vocabulary::as_str(self))
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::CtraceError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                <Self as $crate::vocab::Vocabulary>::parse(s).ok_or_else(|| {
                    $crate::error::CtraceError::invalid_argument(
                        $label,
                        s,
                        <Self as $crate::vocab::Vocabulary>::names(),
                    )
                })
            }
        }
    };
}

mod countries;
mod sectors;

pub use countries::Iso3Country;
pub use sectors::{OriginalInventorySector, Sector, Subsector};

vocabulary! {
    /// Greenhouse gas (or CO2-equivalent aggregate) reported by a record
    pub enum Gas("gas") {
        Co2 => "co2",
        Ch4 => "ch4",
        N2o => "n2o",
        Co2e100yr => "co2e_100yr",
        Co2e20yr => "co2e_20yr",
    }
}

vocabulary! {
    /// Reporting period unit of a record
    pub enum TemporalGranularity("temporal granularity") {
        Annual => "annual",
        Month => "month",
        Week => "week",
        Day => "day",
        Hour => "hour",
        Other => "other",
    }
}

vocabulary! {
    /// Qualitative certainty attached to a quantitative field
    pub enum ConfidenceLevel("confidence level") {
        VeryHigh => "very high",
        High => "high",
        Medium => "medium",
        Low => "low",
        VeryLow => "very low",
    }
}

/// Closed `Enum` dtype whose categories are the members of `V`, in
/// declaration order
pub fn enum_dtype<V: Vocabulary>() -> DataType {
    let categories =
        StringChunked::from_slice(PlSmallStr::from_static(V::NAME), V::names().as_slice());
    create_enum_dtype(categories.rechunk().downcast_as_array().clone())
}

/// Validate `column` against vocabulary `V` and encode it as an `Enum`.
///
/// Returns the number of non-blank values that fell outside the vocabulary
/// and were replaced by null. With `strict` the first such value is an error.
pub fn encode_column<V: Vocabulary>(
    df: &mut DataFrame,
    column: &str,
    strict: bool,
) -> Result<usize> {
    let names = Series::new(PlSmallStr::from_static(V::NAME), V::names());
    let raw = col(column).cast(DataType::String);
    let known = raw.clone().is_in(lit(names).implode(), false);

    let unknown = df
        .clone()
        .lazy()
        .select([raw.clone()])
        .filter(
            raw.clone()
                .is_not_null()
                .and(raw.clone().neq(lit("")))
                .and(known.clone().not()),
        )
        .collect()?;
    let rejected = unknown.height();

    if strict {
        let first = unknown.column(column)?.as_materialized_series().str()?.get(0);
        if let Some(value) = first {
            return Err(CtraceError::Vocabulary {
                vocabulary: V::NAME.to_string(),
                column: column.to_string(),
                value: value.to_string(),
            });
        }
    }
    if rejected > 0 {
        warn!(
            "{} value(s) in column '{}' are not a valid {}, replaced by null",
            rejected,
            column,
            V::NAME
        );
    }

    *df = df
        .clone()
        .lazy()
        .with_column(
            when(known)
                .then(raw)
                .otherwise(lit(NULL))
                .cast(enum_dtype::<V>())
                .alias(column),
        )
        .collect()?;

    debug!("Encoded column '{}' as {}", column, V::NAME);
    Ok(rejected)
}

/// Encode a free-form string column as an open categorical without
/// validation
pub fn encode_free_column(df: &mut DataFrame, column: &str) -> Result<()> {
    let series = df
        .column(column)?
        .as_materialized_series()
        .cast(&DataType::String)?
        .cast(&DataType::Categorical(None, CategoricalOrdering::Physical))?;
    df.with_column(series)?;
    Ok(())
}

/// Decode an encoded column back into typed vocabulary members
pub fn decode_column<V: Vocabulary>(df: &DataFrame, column: &str) -> Result<Vec<Option<V>>> {
    let raw = df
        .column(column)?
        .as_materialized_series()
        .cast(&DataType::String)?;
    Ok(raw.str()?.into_iter().map(|value| value.and_then(V::parse)).collect())
}
