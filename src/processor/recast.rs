//! Restores categorical typing on tables read back from Parquet.

use crate::constants::CONFIDENCE_FIELDS;
use crate::constants::columns::*;
use crate::error::Result;
use crate::processor::normalize::has_column;
use crate::vocab::{
    self, ConfidenceLevel, Gas, Iso3Country, OriginalInventorySector, Sector, Subsector,
    TemporalGranularity,
};
use polars::prelude::DataFrame;
use tracing::debug;

/// Encode the categorical columns present in `df`.
///
/// `conf` controls whether the `conf_*` confidence columns are encoded.
/// Returns the number of values that fell outside their vocabulary.
pub(crate) fn encode_categories(df: &mut DataFrame, strict: bool, conf: bool) -> Result<usize> {
    let mut rejected = 0usize;

    if has_column(df, ISO3_COUNTRY) {
        rejected += vocab::encode_column::<Iso3Country>(df, ISO3_COUNTRY, strict)?;
    }
    if has_column(df, GAS) {
        rejected += vocab::encode_column::<Gas>(df, GAS, strict)?;
    }
    if has_column(df, SECTOR) {
        rejected += vocab::encode_column::<Sector>(df, SECTOR, strict)?;
    }
    if has_column(df, SUBSECTOR) {
        rejected += vocab::encode_column::<Subsector>(df, SUBSECTOR, strict)?;
    }
    if has_column(df, ORIGINAL_INVENTORY_SECTOR) {
        rejected += vocab::encode_column::<OriginalInventorySector>(
            df,
            ORIGINAL_INVENTORY_SECTOR,
            strict,
        )?;
    }
    if has_column(df, TEMPORAL_GRANULARITY) {
        rejected += vocab::encode_column::<TemporalGranularity>(df, TEMPORAL_GRANULARITY, strict)?;
    }
    // Country tables only; always tonnes so far
    if has_column(df, EMISSIONS_QUANTITY_UNITS) {
        vocab::encode_free_column(df, EMISSIONS_QUANTITY_UNITS)?;
    }
    if conf {
        for (_, conf_field) in CONFIDENCE_FIELDS {
            if has_column(df, conf_field) {
                rejected += vocab::encode_column::<ConfidenceLevel>(df, conf_field, strict)?;
            }
        }
    }
    Ok(rejected)
}

/// Reapply the vocabulary casts lost when a table went through Parquet.
///
/// Casts are non-strict: values outside a vocabulary become null. Columns
/// absent from the table are skipped. With `conf` the six confidence level
/// columns are recast too.
pub fn recast_parquet(mut df: DataFrame, conf: bool) -> Result<DataFrame> {
    let rejected = encode_categories(&mut df, false, conf)?;
    debug!(
        "Recast {} rows ({} value(s) outside their vocabulary)",
        df.height(),
        rejected
    );
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::writer::ParquetWriter;
    use crate::vocab::decode_column;
    use polars::prelude::*;

    fn annotated_frame() -> DataFrame {
        df! {
            "iso3_country" => &["USA", "FRA"],
            "gas" => &["co2", "co2e_100yr"],
            "sector" => &["power", "waste"],
            "subsector" => &["electricity-generation", "solid-waste-disposal"],
            "temporal_granularity" => &["annual", "month"],
            "conf_capacity" => &[Some("high"), None],
            "conf_emissions_quantity" => &["very low", "medium"],
        }
        .unwrap()
    }

    #[test]
    fn test_recast_restores_vocabularies() {
        let df = recast_parquet(annotated_frame(), true).unwrap();

        for column in df.get_columns() {
            assert!(
                matches!(column.dtype(), DataType::Enum(_, _)),
                "{} not an enum",
                column.name()
            );
        }
        assert_eq!(
            decode_column::<Sector>(&df, SECTOR).unwrap(),
            vec![Some(Sector::Power), Some(Sector::Waste)]
        );
        assert_eq!(
            decode_column::<ConfidenceLevel>(&df, CONF_EMISSIONS_QUANTITY).unwrap(),
            vec![Some(ConfidenceLevel::VeryLow), Some(ConfidenceLevel::Medium)]
        );
    }

    #[test]
    fn test_recast_without_conf_leaves_levels_alone() {
        let df = recast_parquet(annotated_frame(), false).unwrap();
        assert_eq!(df.column(CONF_CAPACITY).unwrap().dtype(), &DataType::String);
        assert_eq!(df.column(GAS).unwrap().dtype(), &vocab::enum_dtype::<Gas>());
    }

    #[test]
    fn test_recast_is_non_strict() {
        let df = df! {
            "gas" => &["co2", "helium"],
            "emissions_quantity_units" => &["t", "t"],
        }
        .unwrap();
        let df = recast_parquet(df, false).unwrap();
        assert_eq!(df.column(GAS).unwrap().null_count(), 1);
        assert_eq!(df.column(GAS).unwrap().dtype(), &vocab::enum_dtype::<Gas>());
        assert!(matches!(
            df.column(EMISSIONS_QUANTITY_UNITS).unwrap().dtype(),
            DataType::Categorical(_, _)
        ));
    }

    #[test]
    fn test_parquet_round_trip_keeps_values() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("round_trip.parquet");
        let before = recast_parquet(annotated_frame(), true).unwrap();

        ParquetWriter::new(Default::default())
            .write_frame(before.clone(), &path)
            .unwrap();
        let read = ParquetReader::new(std::fs::File::open(&path).unwrap())
            .finish()
            .unwrap();
        let after = recast_parquet(read, true).unwrap();

        assert_eq!(
            decode_column::<Iso3Country>(&before, ISO3_COUNTRY).unwrap(),
            decode_column::<Iso3Country>(&after, ISO3_COUNTRY).unwrap()
        );
        assert_eq!(
            decode_column::<Subsector>(&before, SUBSECTOR).unwrap(),
            decode_column::<Subsector>(&after, SUBSECTOR).unwrap()
        );
        assert_eq!(
            decode_column::<ConfidenceLevel>(&before, CONF_CAPACITY).unwrap(),
            decode_column::<ConfidenceLevel>(&after, CONF_CAPACITY).unwrap()
        );
    }
}
