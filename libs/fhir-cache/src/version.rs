//! The cached `version.info` marker file.

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Version metadata of a cached specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    /// Build version, e.g. `4.0.1-9346c8cc45`.
    pub version: String,
    /// Published FHIR version, e.g. `4.0.1`.
    pub fhir_version: String,
}

impl VersionInfo {
    /// Read and parse `version.info` from `cache_dir`.
    pub fn read(cache_dir: &Path) -> Result<Self> {
        let contents = fs::read_to_string(cache_dir.join("version.info"))?;
        Self::parse(&contents)
    }

    /// Parse the INI-like marker: an optional leading comment line, then a
    /// `[FHIR]` section carrying `version` and `FhirVersion` keys.
    pub fn parse(contents: &str) -> Result<Self> {
        let mut in_fhir_section = false;
        let mut version = None;
        let mut fhir_version = None;

        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }
            if let Some(section) = line.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
                in_fhir_section = section.eq_ignore_ascii_case("FHIR");
                continue;
            }
            if !in_fhir_section {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                match key.trim().to_ascii_lowercase().as_str() {
                    "version" => version = Some(value.trim().to_string()),
                    "fhirversion" => fhir_version = Some(value.trim().to_string()),
                    _ => {}
                }
            }
        }

        match (version, fhir_version) {
            (Some(version), Some(fhir_version)) => Ok(Self {
                version,
                fhir_version,
            }),
            _ => Err(Error::MalformedVersionInfo(
                "missing version or FhirVersion under [FHIR]".to_string(),
            )),
        }
    }
}
