//! Basic pipeline tests

use super::fixtures::{Workspace, write_power_package};
use crate::constants::columns::*;
use crate::models::{GasSelector, YearSelector};
use crate::processor::normalize::utc_datetime;
use crate::processor::recast::recast_parquet;
use crate::vocab::{ConfidenceLevel, Gas, Iso3Country, decode_column};
use polars::prelude::*;

fn read_parquet(path: &std::path::Path) -> DataFrame {
    ParquetReader::new(std::fs::File::open(path).unwrap())
        .finish()
        .unwrap()
}

#[tokio::test]
async fn test_compact_sources_writes_yearly_partitions() {
    let workspace = Workspace::new();
    write_power_package(&workspace.archives());

    let stats = workspace
        .processor()
        .compact_sources(
            &GasSelector::One(Gas::Co2),
            &YearSelector::Many(vec![2021, 2022]),
            &workspace.output(),
        )
        .await
        .unwrap();

    assert_eq!(stats.files_processed, 1);
    assert_eq!(stats.total_rows, 3);
    assert_eq!(stats.output_paths.len(), 2);

    let version = crate::registry::VERSION;
    let partition_2021 = workspace.output().join(format!(
        "{version}/climate_trace-sources_{version}_2021_co2.parquet"
    ));
    let partition_2022 = workspace.output().join(format!(
        "{version}/climate_trace-sources_{version}_2022_co2.parquet"
    ));
    assert!(partition_2021.exists());
    assert!(partition_2022.exists());

    assert_eq!(read_parquet(&partition_2021).height(), 1);
    let df = recast_parquet(read_parquet(&partition_2022), true).unwrap();
    assert_eq!(df.height(), 2);

    let countries = decode_column::<Iso3Country>(&df, ISO3_COUNTRY).unwrap();
    let levels = decode_column::<ConfidenceLevel>(&df, CONF_EMISSIONS_QUANTITY).unwrap();
    for (country, level) in countries.iter().zip(levels.iter()) {
        match country {
            // First of the two duplicated confidence rows wins
            Some(Iso3Country::Usa) => assert_eq!(*level, Some(ConfidenceLevel::VeryHigh)),
            Some(Iso3Country::Fra) => assert_eq!(*level, None),
            other => panic!("unexpected country {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_partitions_carry_provenance_and_no_blank_strings() {
    let workspace = Workspace::new();
    write_power_package(&workspace.archives());

    workspace
        .processor()
        .compact_sources(&GasSelector::One(Gas::Co2), &YearSelector::One(2022), &workspace.output())
        .await
        .unwrap();

    let version = crate::registry::VERSION;
    let df = read_parquet(&workspace.output().join(format!(
        "{version}/climate_trace-sources_{version}_2022_co2.parquet"
    )));

    let packages: Vec<Option<&str>> = df
        .column(CT_PACKAGE)
        .unwrap()
        .as_materialized_series()
        .str()
        .unwrap()
        .into_iter()
        .collect();
    assert!(packages.iter().all(|p| *p == Some("power")));

    let files = df.column(CT_FILE).unwrap().as_materialized_series().clone();
    assert_eq!(
        files.str().unwrap().get(0),
        Some("electricity-generation_emissions_sources")
    );

    for column in df.get_columns() {
        if column.dtype() == &DataType::String {
            let series = column.as_materialized_series();
            assert!(
                series.str().unwrap().into_iter().all(|v| v != Some("")),
                "blank string in {}",
                column.name()
            );
        }
    }

    // Optional columns absent from the CSV are present and null
    assert_eq!(df.column("other12_def").unwrap().null_count(), df.height());
}

#[tokio::test]
async fn test_build_country_table() {
    let workspace = Workspace::new();
    write_power_package(&workspace.archives());

    let stats = workspace
        .processor()
        .build_country_table(&GasSelector::One(Gas::Co2), &workspace.output())
        .await
        .unwrap();

    assert_eq!(stats.total_rows, 2);
    let path = &stats.output_paths[0];
    assert!(path.ends_with(format!(
        "climate-trace-countries-{}.parquet",
        crate::registry::VERSION
    )));

    let df = recast_parquet(read_parquet(path), false).unwrap();
    assert_eq!(
        decode_column::<Gas>(&df, GAS).unwrap(),
        vec![Some(Gas::Co2), Some(Gas::Co2)]
    );
    assert!(matches!(
        df.column(EMISSIONS_QUANTITY_UNITS).unwrap().dtype(),
        DataType::Categorical(_, _)
    ));
    assert!(matches!(df.column(GAS).unwrap().dtype(), DataType::Enum(_, _)));
    for column in [START_TIME, END_TIME, CREATED_DATE] {
        assert_eq!(
            df.column(column).unwrap().dtype(),
            &utc_datetime(),
            "{column} should be a UTC timestamp"
        );
    }
}
