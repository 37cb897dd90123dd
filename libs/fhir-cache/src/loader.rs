//! Cache-aware acquisition of specification artifacts.

use crate::archive;
use crate::download::Downloader;
use crate::error::{Error, Result};
use crate::manifest::{Artifact, DEFAULT_MANIFEST};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

/// Makes sure all the files needed by the generator are present in the
/// local cache, downloading and expanding the ones that are missing.
///
/// The cache may be partially populated; each manifest artifact is checked
/// independently and only missing ones are fetched. Presence is the only
/// integrity check, cached files are trusted as-is.
pub struct SpecLoader<D> {
    base_url: String,
    cache_dir: PathBuf,
    manifest: &'static [Artifact],
    downloader: D,
}

impl<D: Downloader> SpecLoader<D> {
    pub fn new(
        base_url: impl Into<String>,
        cache_dir: impl Into<PathBuf>,
        downloader: D,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            cache_dir: cache_dir.into(),
            manifest: DEFAULT_MANIFEST,
            downloader,
        }
    }

    /// Replace the artifact manifest.
    pub fn with_manifest(mut self, manifest: &'static [Artifact]) -> Self {
        self.manifest = manifest;
        self
    }

    /// Make sure every manifest artifact is present and expanded.
    ///
    /// `force_download` wipes the cache directory first; `force_cache`
    /// forbids any fetch and fails on the first missing artifact. The two
    /// are mutually exclusive.
    ///
    /// Returns the cache directory containing all artifacts.
    pub fn load(&self, force_download: bool, force_cache: bool) -> Result<PathBuf> {
        if force_download && force_cache {
            return Err(Error::ConflictingFlags);
        }

        if force_download && self.cache_dir.exists() {
            fs::remove_dir_all(&self.cache_dir)?;
        }
        fs::create_dir_all(&self.cache_dir)?;

        let mut uses_cache = false;
        for artifact in self.manifest {
            let local_path = self.cache_dir.join(artifact.local);
            if local_path.exists() {
                debug!(artifact = artifact.local, "already cached");
                uses_cache = true;
                continue;
            }
            if force_cache {
                return Err(Error::MissingCacheArtifact(artifact.local.to_string()));
            }

            info!(artifact = artifact.remote, "downloading");
            let url = format!("{}/{}", self.base_url, artifact.remote);
            let fetched = self.downloader.fetch(&url, &self.cache_dir)?;

            if fetched.extension().is_some_and(|ext| ext == "zip") {
                info!(archive = %fetched.display(), "extracting");
                let target = match artifact.expand_dir {
                    Some(sub) => {
                        let dir = self.cache_dir.join(sub);
                        if !dir.exists() {
                            fs::create_dir(&dir)?;
                        }
                        dir
                    }
                    None => self.cache_dir.clone(),
                };
                archive::expand(&fetched, &target)?;
            }
        }

        if uses_cache {
            info!("using cached resources, pass --force-download to re-download");
        }

        Ok(self.cache_dir.clone())
    }
}
