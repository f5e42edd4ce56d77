//! Sector package fixtures

use crate::config::CtraceConfig;
use crate::processor::DatasetProcessor;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

pub const SOURCES_HEADER: &str = "source_id,source_name,source_type,iso3_country,sector,subsector,start_time,end_time,temporal_granularity,gas,emissions_quantity,emissions_factor,emissions_factor_units,capacity,capacity_units,capacity_factor,activity,activity_units,created_date,modified_date,lat,lon,other1,other1_def,geometry_ref";

pub const CONFIDENCE_HEADER: &str = "source_id,iso3_country,sector,subsector,start_time,end_time,gas,created_date,modified_date,source_type,capacity,capacity_factor,activity,emissions_factor,emissions_quantity";

pub const COUNTRY_V3_HEADER: &str = "iso3_country,start_time,end_time,gas,sector,subsector,emissions_quantity,emissions_quantity_units,temporal_granularity,created_date,modified_date";

pub const COUNTRY_V2_HEADER: &str = "iso3_country,start_time,end_time,original_inventory_sector,gas,emissions_quantity,emissions_quantity_units,temporal_granularity,created_date,modified_date";

/// One power plant reporting co2 in 2021 and 2022
pub fn power_sources() -> String {
    [
        SOURCES_HEADER,
        "42,Plant A,coal,USA,power,electricity-generation,2021-01-01 00:00:00,2021-12-31 00:00:00,annual,co2,100.0,0.9,t/MWh,500,MW,0.5,2190,MWh,2024-10-01 00:00:00,,40.1,-75.2,,,",
        "42,Plant A,coal,USA,power,electricity-generation,2022-01-01 00:00:00,2022-12-31 00:00:00,annual,co2,110.0,0.9,t/MWh,500,MW,0.55,2409,MWh,2024-10-01 00:00:00,,40.1,-75.2,,,",
        "43,Plant B,gas,FRA,power,electricity-generation,2022-01-01 00:00:00,2022-12-31 00:00:00,annual,co2,50.0,,,,,,,,2024-10-01 00:00:00,,,,unit,unit count,",
    ]
    .join("\n")
}

/// Confidence rows for [`power_sources`], with one duplicated key
pub fn power_confidence() -> String {
    [
        CONFIDENCE_HEADER,
        "42,USA,power,electricity-generation,2021-01-01 00:00:00,2021-12-31 00:00:00,co2,,,high,high,medium,medium,low,high",
        "42,USA,power,electricity-generation,2022-01-01 00:00:00,2022-12-31 00:00:00,co2,,,high,high,medium,medium,low,very high",
        "42,USA,power,electricity-generation,2022-01-01 00:00:00,2022-12-31 00:00:00,co2,,,low,low,low,low,low,very low",
    ]
    .join("\n")
}

pub fn power_country() -> String {
    [
        COUNTRY_V3_HEADER,
        "USA,2022-01-01 00:00:00,2022-12-31 00:00:00,co2,power,electricity-generation,1500000.0,t,annual,2024-10-01 00:00:00,",
        "FRA,2022-01-01 00:00:00,2022-12-31 00:00:00,co2,power,electricity-generation,30000.0,t,annual,2024-10-01 00:00:00,",
    ]
    .join("\n")
}

pub fn legacy_country() -> String {
    [
        COUNTRY_V2_HEADER,
        "DEU,2021-01-01 00:00:00,2021-12-31 00:00:00,cement,co2,2000.0,t,annual,2023-10-01 00:00:00,2023-10-02 00:00:00",
    ]
    .join("\n")
}

/// Write a ZIP archive under `<dir>/<gas>/<file_name>`
pub fn write_package(dir: &Path, gas: &str, file_name: &str, entries: &[(&str, String)]) -> PathBuf {
    let gas_dir = dir.join(gas);
    fs::create_dir_all(&gas_dir).unwrap();
    let path = gas_dir.join(file_name);

    let mut writer = zip::ZipWriter::new(File::create(&path).unwrap());
    for (name, content) in entries {
        writer.start_file(*name, SimpleFileOptions::default()).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap();
    path
}

/// Write a ZIP archive holding the entry `name` twice.
///
/// `ZipWriter` refuses duplicate names, so the second copy is written under a
/// placeholder name of the same length which is then patched in place, in
/// both the local header and the central directory.
pub fn write_package_with_duplicate(
    dir: &Path,
    gas: &str,
    file_name: &str,
    name: &str,
    content: &str,
) -> PathBuf {
    let placeholder = format!("Q{}", &name[1..]);
    let gas_dir = dir.join(gas);
    fs::create_dir_all(&gas_dir).unwrap();
    let path = gas_dir.join(file_name);

    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for entry in [name, placeholder.as_str()] {
        writer.start_file(entry, options).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    let mut bytes = writer.finish().unwrap().into_inner();

    let (from, to) = (placeholder.as_bytes(), name.as_bytes());
    let mut patched = 0;
    let mut i = 0;
    while i + from.len() <= bytes.len() {
        if &bytes[i..i + from.len()] == from {
            bytes[i..i + from.len()].copy_from_slice(to);
            patched += 1;
            i += from.len();
        } else {
            i += 1;
        }
    }
    assert_eq!(patched, 2, "placeholder should appear in two headers");

    fs::write(&path, bytes).unwrap();
    path
}

/// The co2 power package
pub fn write_power_package(dir: &Path) -> PathBuf {
    write_package(
        dir,
        "co2",
        "power.zip",
        &[
            (
                "DATA/power/electricity-generation_emissions_sources.csv",
                power_sources(),
            ),
            (
                "DATA/power/electricity-generation_emissions_sources_confidence.csv",
                power_confidence(),
            ),
            (
                "DATA/power/electricity-generation_country_emissions.csv",
                power_country(),
            ),
        ],
    )
}

/// Temporary workspace with an archive directory, a temp directory and an
/// output directory
pub struct Workspace {
    pub root: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            root: TempDir::new().unwrap(),
        }
    }

    pub fn archives(&self) -> PathBuf {
        self.root.path().join("archives")
    }

    pub fn output(&self) -> PathBuf {
        self.root.path().join("output")
    }

    pub fn config(&self) -> CtraceConfig {
        CtraceConfig::default()
            .with_cache_dir(self.root.path().join("cache"))
            .with_temp_dir(self.root.path().join("tmp"))
    }

    pub fn processor(&self) -> DatasetProcessor {
        DatasetProcessor::new(self.config())
            .unwrap()
            .with_archive_dir(self.archives())
    }
}
