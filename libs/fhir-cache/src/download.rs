//! Downloader seam for fetching specification artifacts

use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Fetches a remote artifact into a local directory.
///
/// Failures (non-2xx status, transport errors) propagate unchanged; no
/// retry or backoff happens at this level.
pub trait Downloader {
    /// Download `url` into `dest_dir`, returning the path of the written file.
    fn fetch(&self, url: &str, dest_dir: &Path) -> Result<PathBuf>;
}

/// Plain HTTP(S) GET downloader.
pub struct HttpDownloader {
    client: reqwest::blocking::Client,
}

impl HttpDownloader {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(300))
            .build()?;
        Ok(Self { client })
    }
}

impl Downloader for HttpDownloader {
    fn fetch(&self, url: &str, dest_dir: &Path) -> Result<PathBuf> {
        let filename = url.rsplit('/').next().unwrap_or(url);
        let path = dest_dir.join(filename);

        let mut response = self.client.get(url).send()?;
        if !response.status().is_success() {
            return Err(Error::Download {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let mut file = fs::File::create(&path)?;
        response.copy_to(&mut file)?;
        Ok(path)
    }
}

/// Downloader for manual and air-gapped workflows.
///
/// Never touches the network; every fetch fails with a message telling the
/// operator to place the artifact in the cache directory themselves.
pub struct OfflineDownloader;

impl Downloader for OfflineDownloader {
    fn fetch(&self, url: &str, _dest_dir: &Path) -> Result<PathBuf> {
        Err(Error::Offline(url.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offline_downloader_always_fails_and_names_the_url() {
        let dir = tempfile::tempdir().unwrap();
        let err = OfflineDownloader
            .fetch("http://hl7.org/fhir/R4/version.info", dir.path())
            .unwrap_err();
        assert!(matches!(err, Error::Offline(_)));
        assert!(err.to_string().contains("http://hl7.org/fhir/R4/version.info"));
    }
}
