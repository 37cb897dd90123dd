//! FHIR specification artifact cache
//!
//! Downloads the artifacts a published FHIR specification consists of (the
//! version marker, the example resources and the core definitions),
//! materializes them into a local cache directory and normalizes archive
//! layout so downstream parsing always sees the same tree.
//!
//! # Example
//!
//! ```rust,no_run
//! use amboss_cache::{HttpDownloader, SpecLoader};
//!
//! # fn example() -> amboss_cache::Result<()> {
//! let downloader = HttpDownloader::new()?;
//! let loader = SpecLoader::new("http://hl7.org/fhir/R4", "downloads/R4", downloader);
//! let cache_dir = loader.load(false, false)?;
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod download;
pub mod error;
pub mod loader;
pub mod manifest;
pub mod version;

pub use download::{Downloader, HttpDownloader, OfflineDownloader};
pub use error::{Error, Result};
pub use loader::SpecLoader;
pub use manifest::{Artifact, DEFAULT_MANIFEST};
pub use version::VersionInfo;
