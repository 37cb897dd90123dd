//! ZIP extraction with top-level wrapper normalization.
//!
//! Specification archives are inconsistently packaged: some releases wrap
//! all content in a single versioned folder, others do not. Extraction
//! strips a lone wrapper directory so downstream consumers always see the
//! same layout.

use crate::error::Result;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use zip::ZipArchive;

/// Entries injected by macOS archiving tools; never extracted.
const MACOS_NOISE_PREFIX: &str = "__MACOSX/";

/// Expand the ZIP file at `archive_path` into `target_dir`.
///
/// If every entry lives under a single top-level directory, that wrapper
/// is stripped; otherwise entries keep their archive-relative paths.
/// `target_dir` is created if needed.
pub fn expand(archive_path: &Path, target_dir: &Path) -> Result<()> {
    assert!(
        archive_path.is_file(),
        "archive is not a regular file: {}",
        archive_path.display()
    );

    fs::create_dir_all(target_dir)?;

    let file = fs::File::open(archive_path)?;
    let mut archive = ZipArchive::new(file)?;
    let wrapper = single_root(&archive);

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        if entry.name().starts_with(MACOS_NOISE_PREFIX) {
            continue;
        }
        // entries that would escape the target directory are skipped
        let Some(entry_path) = entry.enclosed_name() else {
            continue;
        };

        let relative = match &wrapper {
            Some(root) => match entry_path.strip_prefix(root) {
                // the wrapper directory entry itself
                Ok(rest) if rest.as_os_str().is_empty() => continue,
                Ok(rest) => rest.to_path_buf(),
                // not under the wrapper
                Err(_) => continue,
            },
            None => entry_path,
        };

        let out_path = target_dir.join(relative);
        if entry.is_dir() {
            fs::create_dir_all(&out_path)?;
        } else {
            if let Some(parent) = out_path.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut out = fs::File::create(&out_path)?;
            io::copy(&mut entry, &mut out)?;
        }
    }

    Ok(())
}

/// The single top-level path segment shared by all non-noise entries, if any.
fn single_root<R: io::Read + io::Seek>(archive: &ZipArchive<R>) -> Option<PathBuf> {
    let roots: BTreeSet<&str> = archive
        .file_names()
        .filter(|name| !name.starts_with(MACOS_NOISE_PREFIX))
        .filter_map(|name| name.split('/').find(|part| !part.is_empty()))
        .collect();

    if roots.len() == 1 {
        roots.into_iter().next().map(PathBuf::from)
    } else {
        None
    }
}
