//! Release registry for the published Climate TRACE archives.
//!
//! Static description of one dataset release: its version string, the years
//! it covers, the sector packages published for every gas together with
//! their SHA-256 checksums, and the naming scheme of the Parquet partitions
//! derived from it.

use crate::error::{CtraceError, Result};
use crate::models::{GasSelector, YearSelector};
use crate::vocab::{Gas, Vocabulary};
use std::ops::RangeInclusive;

/// Version of the derived dataset: upstream release, release year, then the
/// revision of the conversion.
pub const VERSION: &str = "v3-2024-ct5";

/// Years covered by the release
pub const YEARS: RangeInclusive<i32> = 2021..=2024;

/// Where the sector packages are published
pub const DOWNLOAD_BASE_URL: &str = "https://downloads.climatetrace.org/v3/sector_packages";

/// Where pre-built Parquet partitions are mirrored
pub const MIRROR_BASE_URL: &str =
    "https://huggingface.co/datasets/tjhunter/climate-trace/resolve/main";

/// One ZIP archive published for a gas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectorPackage {
    pub gas: Gas,
    pub file_name: &'static str,
    sha256: &'static str,
}

impl SectorPackage {
    /// Expected hex digest of the archive
    pub fn sha256(&self) -> &'static str {
        self.sha256.trim_start_matches("sha256:")
    }

    /// Package name without the archive extension, e.g. `power`
    pub fn name(&self) -> &'static str {
        self.file_name.trim_end_matches(".zip")
    }

    /// Download URL of the archive.
    ///
    /// The registry uses dashed names while the server publishes underscored
    /// ones.
    pub fn download_url(&self, base_url: &str) -> String {
        format!(
            "{}/{}/{}",
            base_url.trim_end_matches('/'),
            self.gas,
            self.file_name.replace('-', "_")
        )
    }
}

macro_rules! packages {
    ($($gas:ident => [$($file:literal => $sum:literal),+ $(,)?]),+ $(,)?) => {
        &[$($(SectorPackage { gas: Gas::$gas, file_name: $file, sha256: $sum },)+)+]
    };
}

// TODO: add the co2e_20yr packages once their checksums have been computed.
const PACKAGES: &[SectorPackage] = packages! {
    Ch4 => [
        "agriculture.zip" => "sha256:17408922af42ef9c6e662ebfd64752d8559accfe7258b2a72fb99fcb96ecbf63",
        "buildings.zip" => "sha256:027cd2cf50ced82d86fbe6fefe4e77894afc23b9ef68cf3d1cb98b0b8a3ee186",
        "fluorinated_gases.zip" => "sha256:ef0b53830e5ed55c590ac07b5e9c8797fec6c371245ca28ed3326d162fdd3b7e",
        "forestry-and-land-use.zip" => "sha256:76660b3a30a0cee85281895f7bb7ad1b5bf2df51925b1b382d43c84a7ceb08ec",
        "fossil-fuel-operations.zip" => "sha256:70d46c8fce9de01f375ab696e35f001fb825482d0a8e87a66b19bd2cf6c4db71",
        "manufacturing.zip" => "sha256:2115f3a0bf5206bf3b2a901e30a0668bbb84d1b5db64565fe5b996cf59c80c34",
        "mineral-extraction.zip" => "sha256:4cf8245f62828d01868360066d1d20ceb3ec7082bd05e5714c0dd7bb239dc544",
        "power.zip" => "sha256:b5d1fb94190132866c8f5ccef538cc414233932dcaee046071f453fe58ca2003",
        "transportation.zip" => "sha256:992b525d00d953170fda89d4f381c576da1435a1fec588595da132154507d693",
        "waste.zip" => "sha256:492091e28e8ea8c5a1b3c197c5a1dacdce5391a4ee2b5c934319f852448101a9",
    ],
    N2o => [
        "agriculture.zip" => "sha256:0d77cd43d47bfc76f1b7de60f64e7c3b4202ea5d69bd381408d03c8340cabb58",
        "buildings.zip" => "sha256:e9fedcda3ce8f9cf94bc81cf9c7ec04235150799ce39c19107acf67e52c6847c",
        "fluorinated-gases.zip" => "sha256:aadcdcd962355db93784784e91a801533d5ac20da3dfa8daccd5e8e31c7bcbad",
        "forestry-and-land-use.zip" => "sha256:6f76414c0cfd2e17d354c09cf3510cdca8c012cf1a91e2ddc044ff7e5e316c78",
        "fossil-fuel-operations.zip" => "sha256:fd7abb79d747ac408ce96cd81ab73eaaed225bdf5c56fc97f14637abcee922fd",
        "manufacturing.zip" => "sha256:0a4a4fdbbe2f1fe2b757dddee829b2abbe0ebebd331a46e97a9e7e07992ef7fc",
        "mineral-extraction.zip" => "sha256:e30aabe4088581714d59295767bcd3debeb7de43f6c9e5f96632275acc3d2b54",
        "power.zip" => "sha256:d9bbbc0faada288d9b8eca0d2158cdb69ce426c9a341b3fa83c6f5f5eaad7cb9",
        "transportation.zip" => "sha256:3debbfeccb4cee32ecb3225186f65f1ed06cf442fe45f277ec8b71456439c1da",
        "waste.zip" => "sha256:721661d9a8706595116ee1ab7c6ccc6a22c692f105cb9e51be38f4551abe6287",
    ],
    Co2 => [
        "agriculture.zip" => "sha256:fdd01821f1ccee672650c83bbf42e0675d752ec96c0261b5e1963f91b201b32f",
        "buildings.zip" => "sha256:5f1386632116f4e58df96aa6b228870034e3531b976f85616aa6a746d660d425",
        "fluorinated-gases.zip" => "sha256:ca01fa9c4549d46ba101bdbc097d70198c0967dd00e5e17e6fe8ae4505ec12ff",
        "forestry-and-land-use.zip" => "sha256:b1ab80083389c934cae62ea41614233cd55eeca05750d0debb9e4661aa849196",
        "fossil-fuel-operations.zip" => "sha256:cca1ac9adee693e90aa3c0215f8bac14958f995febf2e4a3e8425991d95d7054",
        "manufacturing.zip" => "sha256:0e402700ad9b37b0c51b0c592b42111370e5a5b54dec36f01ac1531f2929b18f",
        "mineral-extraction.zip" => "sha256:a37aa5e5811cf649e2f958da40df2ecb53f156e8516a8d8c6b9575fefbe6a873",
        "power.zip" => "sha256:36d08445199f10402559bea41866d8179eb89818ba380bea12b69e0438b96773",
        "transportation.zip" => "sha256:063954edbf13fb0bc0dd1621ecb28b3238451b8acf0a808534adc39f905a49e2",
        "waste.zip" => "sha256:54b9f9c6a924c3dafefea39848e835d4fb24bb427e352540c0615ba2dc8e4186",
    ],
    Co2e100yr => [
        "agriculture.zip" => "sha256:683122af6819687ea2b95277a2615e58577521e0aae449f3c47fbef25ee8c20a",
        "buildings.zip" => "sha256:02728636c1cd13e99cf701e325b1ee0805e3e35fa7f14ea435f71f2f9a394323",
        "fluorinated-gases.zip" => "sha256:16a20b7d4c16d37455170fe95dfeffc256846fb03db7a7d95a171e6bc6476004",
        "forestry-and-land-use.zip" => "sha256:aa318afc41e7cf70497148d64e6b5abcdfd23daad75fca16c40ab4228baf7195",
        "fossil-fuel-operations.zip" => "sha256:eb720e38d990179e6ef2bc1c9949ab368d1c681ee6f65550c71c4e5e9416c70f",
        "manufacturing.zip" => "sha256:a4f28ef3a7def17ec493550289ea00bb3093526f7546d65d51d54973ea5aaacd",
        "mineral-extraction.zip" => "sha256:0d2fe9e61753c60bbc7688b99ed794eac2fe7e808a1829ae07105c7f8371e815",
        "power.zip" => "sha256:aa5189c413a0d9e2c606952ff2271bbb0abafc6a35632612374dc3a44d3417ac",
        "transportation.zip" => "sha256:90117bbce92793b6ea205ff18f50220e709fa5229d0a66789f29ec53f6064ca7",
        "waste.zip" => "sha256:092034816686c1170c269aacf23ccbaf6abeb6f38be7eaf4d07ff24b536cc3cd",
    ],
};

/// Gases with published packages, in registry order
pub fn supported_gases() -> Vec<Gas> {
    let mut gases: Vec<Gas> = Vec::new();
    for package in PACKAGES {
        if !gases.contains(&package.gas) {
            gases.push(package.gas);
        }
    }
    gases
}

/// Every package published for `gas`
pub fn packages(gas: Gas) -> impl Iterator<Item = &'static SectorPackage> {
    PACKAGES.iter().filter(move |package| package.gas == gas)
}

/// Look up a single package by archive file name
pub fn package(gas: Gas, file_name: &str) -> Result<&'static SectorPackage> {
    packages(gas)
        .find(|package| package.file_name == file_name)
        .ok_or_else(|| CtraceError::UnknownPackage {
            gas: gas.to_string(),
            package: file_name.to_string(),
        })
}

/// Resolve a gas selector, rejecting gases without published packages
pub fn check_gases(selector: &GasSelector) -> Result<Vec<Gas>> {
    let supported = supported_gases();
    let gases = match selector {
        GasSelector::All => return Ok(supported),
        GasSelector::One(gas) => vec![*gas],
        GasSelector::Many(gases) if gases.is_empty() => return Ok(supported),
        GasSelector::Many(gases) => gases.clone(),
    };

    for gas in &gases {
        if !supported.contains(gas) {
            return Err(CtraceError::invalid_argument(
                "gas",
                gas,
                supported.iter().map(|g| g.as_str()),
            ));
        }
    }
    Ok(gases)
}

/// Resolve a year selector, rejecting years outside the release
pub fn check_years(selector: &YearSelector) -> Result<Vec<i32>> {
    let years = match selector {
        YearSelector::All => return Ok(YEARS.collect()),
        YearSelector::One(year) => vec![*year],
        YearSelector::Many(years) if years.is_empty() => return Ok(YEARS.collect()),
        YearSelector::Many(years) => years.clone(),
    };

    for year in &years {
        if !YEARS.contains(year) {
            return Err(CtraceError::invalid_argument("year", year, YEARS));
        }
    }
    Ok(years)
}

/// Relative path of a yearly source partition, e.g.
/// `v3-2024-ct5/climate_trace-sources_v3-2024-ct5_2022_co2.parquet`
pub fn sources_partition_name(version: &str, year: i32, gas: Gas) -> String {
    format!(
        "{version}/{}_{version}_{year}_{gas}.parquet",
        crate::constants::SOURCES_PARTITION_PREFIX
    )
}

/// File name of the country table
pub fn countries_file_name(version: &str) -> String {
    format!(
        "{}-{version}.parquet",
        crate::constants::COUNTRIES_FILE_PREFIX
    )
}
