//! Mixing release generations in one run

use super::fixtures::{
    Workspace, legacy_country, power_country, write_package, write_package_with_duplicate,
    write_power_package,
};
use crate::constants::columns::*;
use crate::models::GasSelector;
use crate::vocab::{Gas, OriginalInventorySector, Sector, decode_column};

#[tokio::test]
async fn test_country_tables_from_both_generations_are_unioned() {
    let workspace = Workspace::new();
    write_power_package(&workspace.archives());
    write_package(
        &workspace.archives(),
        "co2",
        "manufacturing.zip",
        &[(
            "DATA/manufacturing/cement_country_emissions.csv",
            legacy_country(),
        )],
    );

    let df = workspace
        .processor()
        .load_country_tables(&GasSelector::One(Gas::Co2))
        .await
        .unwrap();

    assert_eq!(df.height(), 3);
    for column in [SECTOR, SUBSECTOR, ORIGINAL_INVENTORY_SECTOR] {
        assert!(df.get_column_index(column).is_some(), "{column} missing");
    }

    // Registry order: manufacturing comes before power
    let sectors = decode_column::<Sector>(&df, SECTOR).unwrap();
    let legacy = decode_column::<OriginalInventorySector>(&df, ORIGINAL_INVENTORY_SECTOR).unwrap();
    assert_eq!(sectors, vec![None, Some(Sector::Power), Some(Sector::Power)]);
    assert_eq!(legacy[0], Some(OriginalInventorySector::Cement));
    assert_eq!(legacy[1], None);
}

#[tokio::test]
async fn test_duplicate_zip_entries_are_read_once() {
    let workspace = Workspace::new();
    let entry = "DATA/power/electricity-generation_country_emissions.csv";
    let archive = write_package_with_duplicate(
        &workspace.archives(),
        "co2",
        "power.zip",
        entry,
        &power_country(),
    );

    let raw = std::fs::read(&archive).unwrap();
    let copies = raw
        .windows(entry.len())
        .filter(|window| *window == entry.as_bytes())
        .count();
    assert_eq!(copies, 4, "two local headers and two central directory records");

    let df = workspace
        .processor()
        .load_country_tables(&GasSelector::One(Gas::Co2))
        .await
        .unwrap();
    assert_eq!(df.height(), 2);
}
