//! Error handling tests

use super::fixtures::{
    CONFIDENCE_HEADER, SOURCES_HEADER, Workspace, power_sources, write_package,
};
use crate::config::CtraceConfig;
use crate::error::CtraceError;
use crate::models::{GasSelector, YearSelector};
use crate::processor::DatasetProcessor;
use crate::vocab::Gas;

#[tokio::test]
async fn test_invalid_configuration_is_rejected() {
    let config = CtraceConfig::default().with_version("  ");
    let result = DatasetProcessor::new(config);
    assert!(matches!(result, Err(CtraceError::Configuration { .. })));
}

#[tokio::test]
async fn test_invalid_year_lists_valid_years() {
    let workspace = Workspace::new();
    let result = workspace
        .processor()
        .compact_sources(&GasSelector::All, &YearSelector::One(2019), &workspace.output())
        .await;

    match result.unwrap_err() {
        CtraceError::InvalidArgument {
            argument, valid, ..
        } => {
            assert_eq!(argument, "year");
            assert!(valid.contains(&"2024".to_string()));
        }
        other => panic!("Expected InvalidArgument, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_confidence_entry() {
    let workspace = Workspace::new();
    write_package(
        &workspace.archives(),
        "co2",
        "power.zip",
        &[(
            "DATA/power/electricity-generation_emissions_sources.csv",
            power_sources(),
        )],
    );

    let result = workspace
        .processor()
        .compact_sources(&GasSelector::One(Gas::Co2), &YearSelector::All, &workspace.output())
        .await;

    match result.unwrap_err() {
        CtraceError::ArchiveEntryNotFound { entry, .. } => {
            assert!(entry.ends_with("_emissions_sources_confidence.csv"));
        }
        other => panic!("Expected ArchiveEntryNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_required_source_column() {
    let workspace = Workspace::new();
    let header = SOURCES_HEADER.replace("source_name,", "");
    let sources = format!(
        "{header}\n42,coal,USA,power,electricity-generation,2022-01-01 00:00:00,2022-12-31 00:00:00,annual,co2,1,,,,,,,,,,,,,,"
    );
    write_package(
        &workspace.archives(),
        "co2",
        "power.zip",
        &[
            ("DATA/power/electricity-generation_emissions_sources.csv", sources),
            (
                "DATA/power/electricity-generation_emissions_sources_confidence.csv",
                CONFIDENCE_HEADER.to_string(),
            ),
        ],
    );

    let result = workspace
        .processor()
        .compact_sources(&GasSelector::One(Gas::Co2), &YearSelector::All, &workspace.output())
        .await;

    match result.unwrap_err() {
        CtraceError::SchemaMismatch { table, missing, .. } => {
            assert_eq!(table, "sources");
            assert_eq!(missing, vec!["source_name".to_string()]);
        }
        other => panic!("Expected SchemaMismatch, got {other:?}"),
    }
}

#[tokio::test]
async fn test_no_country_tables() {
    let workspace = Workspace::new();
    std::fs::create_dir_all(workspace.archives()).unwrap();

    let result = workspace
        .processor()
        .build_country_table(&GasSelector::One(Gas::Ch4), &workspace.output())
        .await;
    assert!(matches!(result, Err(CtraceError::DataValidation { .. })));
}

#[tokio::test]
async fn test_gas_without_packages_is_rejected() {
    let workspace = Workspace::new();
    let result = workspace
        .processor()
        .fetch(&GasSelector::One(Gas::Co2e20yr))
        .await;

    match result.unwrap_err() {
        CtraceError::InvalidArgument { argument, value, .. } => {
            assert_eq!(argument, "gas");
            assert_eq!(value, "co2e_20yr");
        }
        other => panic!("Expected InvalidArgument, got {other:?}"),
    }
}
