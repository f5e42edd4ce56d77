//! Archive resolution: local cache, integrity checks and downloads.
//!
//! Maps a (gas, sector package) pair to a ZIP archive on disk. Archives live
//! under `<cache_dir>/climate_trace_<gas>/<package>` and are only downloaded
//! when missing or when their SHA-256 digest does not match the registry.

use crate::constants::{CONFIDENCE_ENTRY_SUFFIX, SOURCES_ENTRY_SUFFIX};
use crate::error::{CtraceError, Result};
use crate::models::SourceEntryPair;
use crate::registry::{self, SectorPackage};
use crate::vocab::{Gas, Vocabulary};
use futures::StreamExt;
use reqwest::Client;
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};
use zip::ZipArchive;
use zip::result::ZipError;

/// Hex SHA-256 digest of a file on disk
pub async fn sha256_file(path: &Path) -> Result<String> {
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || -> Result<String> {
        let mut file = File::open(&path)?;
        let mut hasher = Sha256::new();
        std::io::copy(&mut file, &mut hasher)?;
        Ok(hex::encode(hasher.finalize()))
    })
    .await?
}

/// Download `url` to `dest`, returning the hex SHA-256 digest of the body.
///
/// The body is streamed to a temporary file next to `dest` which is only
/// moved into place once complete. When `expected` is given and does not
/// match, the temporary file is discarded and `Integrity` is returned.
pub async fn download_to(
    client: &Client,
    url: &str,
    dest: &Path,
    expected: Option<&str>,
) -> Result<String> {
    let dir = dest.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).await?;

    info!("Downloading {}", url);
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| CtraceError::Network {
            url: url.to_string(),
            source,
        })?;

    let response = match response.error_for_status() {
        Ok(response) => response,
        Err(e) => {
            warn!("HTTP error for {}: {:?}", url, e);
            return Err(match e.status() {
                Some(status) => CtraceError::HttpStatus {
                    url: url.to_string(),
                    status,
                },
                None => CtraceError::Network {
                    url: url.to_string(),
                    source: e,
                },
            });
        }
    };

    let temp = tempfile::Builder::new()
        .prefix(".download-")
        .tempfile_in(dir)?;
    let (std_file, temp_path) = temp.into_parts();
    let mut file = fs::File::from_std(std_file);

    let mut hasher = Sha256::new();
    let mut written = 0u64;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|source| CtraceError::Network {
            url: url.to_string(),
            source,
        })?;
        hasher.update(&chunk);
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;
    drop(file);

    let actual = hex::encode(hasher.finalize());
    if let Some(expected) = expected {
        if actual != expected {
            // Dropping the temp path deletes the partial download
            return Err(CtraceError::Integrity {
                path: dest.to_path_buf(),
                expected: expected.to_string(),
                actual,
            });
        }
    }

    temp_path.persist(dest).map_err(|e| e.error)?;
    info!("Downloaded {} bytes to {}", written, dest.display());
    Ok(actual)
}

/// Resolves sector packages to opened archives
#[derive(Debug, Clone)]
pub struct ArchiveResolver {
    cache_dir: PathBuf,
    base_url: String,
    client: Client,
}

impl ArchiveResolver {
    pub fn new(cache_dir: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            base_url: base_url.into(),
            client: Client::new(),
        }
    }

    pub fn from_config(config: &crate::config::CtraceConfig) -> Self {
        Self::new(config.cache_dir.clone(), config.download_base_url.clone())
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Cached location of a package
    pub fn cache_path(&self, package: &SectorPackage) -> PathBuf {
        self.cache_dir
            .join(format!("climate_trace_{}", package.gas))
            .join(package.file_name)
    }

    /// Open the archive of `file_name` for `gas`.
    ///
    /// With `explicit_base` the archive is read from
    /// `<explicit_base>/<gas>/<file_name>` without any integrity check.
    /// Otherwise it comes from the cache, downloaded first if needed.
    pub async fn resolve(
        &self,
        gas: Gas,
        file_name: &str,
        explicit_base: Option<&Path>,
    ) -> Result<ArchiveHandle> {
        let package = registry::package(gas, file_name)?;

        let path = match explicit_base {
            Some(base) => {
                let path = base.join(gas.as_str()).join(file_name);
                debug!("Using explicit archive {}", path.display());
                path
            }
            None => self.ensure_cached(package).await?,
        };

        ArchiveHandle::open(&path, package)
    }

    /// Make sure the cached copy of `package` exists and matches its checksum
    pub async fn ensure_cached(&self, package: &SectorPackage) -> Result<PathBuf> {
        let path = self.cache_path(package);
        let url = package.download_url(&self.base_url);
        self.fetch_verified(&url, &path, package.sha256()).await?;
        Ok(path)
    }

    /// Fetch `url` into `path` unless a file with digest `expected` is
    /// already there
    pub async fn fetch_verified(&self, url: &str, path: &Path, expected: &str) -> Result<()> {
        if fs::try_exists(path).await? {
            let actual = sha256_file(path).await?;
            if actual == expected {
                debug!("Cache hit for {}", path.display());
                return Ok(());
            }
            warn!(
                "Cached file {} has digest {}, expected {}. Downloading again",
                path.display(),
                actual,
                expected
            );
            fs::remove_file(path).await?;
        }

        download_to(&self.client, url, path, Some(expected)).await?;
        Ok(())
    }
}

/// An opened sector package
pub struct ArchiveHandle {
    path: PathBuf,
    package: &'static SectorPackage,
    archive: ZipArchive<File>,
}

impl std::fmt::Debug for ArchiveHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchiveHandle")
            .field("path", &self.path)
            .field("package", &self.package.file_name)
            .field("entries", &self.archive.len())
            .finish()
    }
}

impl ArchiveHandle {
    pub fn open(path: &Path, package: &'static SectorPackage) -> Result<Self> {
        let file = File::open(path)?;
        let archive = ZipArchive::new(file)?;
        debug!(
            "Opened {} with {} entries",
            path.display(),
            archive.len()
        );
        Ok(Self {
            path: path.to_path_buf(),
            package,
            archive,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn package(&self) -> &'static SectorPackage {
        self.package
    }

    /// Entry names ending with `suffix`, sorted and without the duplicates
    /// found in some upstream archives
    pub fn entries_with_suffix(&self, suffix: &str) -> Vec<String> {
        let names: BTreeSet<&str> = self
            .archive
            .file_names()
            .filter(|name| name.ends_with(suffix))
            .collect();
        names.into_iter().map(str::to_string).collect()
    }

    /// Sources entries paired with their confidence companions
    pub fn source_pairs(&self) -> Vec<SourceEntryPair> {
        self.entries_with_suffix(SOURCES_ENTRY_SUFFIX)
            .iter()
            .filter(|name| !name.ends_with(CONFIDENCE_ENTRY_SUFFIX))
            .map(|name| SourceEntryPair::from_sources_entry(name))
            .collect()
    }

    /// Read a whole entry into memory
    pub fn read_entry(&mut self, name: &str) -> Result<Vec<u8>> {
        let mut entry = match self.archive.by_name(name) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => {
                return Err(CtraceError::ArchiveEntryNotFound {
                    archive: self.path.clone(),
                    entry: name.to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        let mut buffer = Vec::new();
        entry.read_to_end(&mut buffer)?;
        debug!("Read {} bytes from {}", buffer.len(), name);
        Ok(buffer)
    }
}
