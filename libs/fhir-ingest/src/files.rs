//! Enumeration and parsing of implementation-guide resource files.

use crate::error::Result;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// List the `.json` resource files of an unpacked FHIR npm package.
///
/// Resources live directly under the package's `package/` subdirectory.
/// The list is sorted so diagnostics stay deterministic across runs.
pub fn package_files(package_root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(package_root.join("package"))? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Read raw resource records from `files`.
///
/// Files that are not valid JSON or lack a `resourceType` are dropped with
/// a warning; neither is fatal.
pub fn read_resources(files: &[PathBuf]) -> Result<Vec<Value>> {
    let mut records = Vec::new();
    for file in files {
        let contents = fs::read_to_string(file)?;
        let parsed: Value = match serde_json::from_str(&contents) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!(file = %file.display(), error = %err, "resource file is not valid JSON, skipping");
                continue;
            }
        };
        if parsed.get("resourceType").and_then(Value::as_str).is_none() {
            warn!(file = %file.display(), "expecting \"resourceType\" to be present, skipping");
            continue;
        }
        records.push(parsed);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write_package_file(root: &Path, name: &str, contents: &str) {
        let package = root.join("package");
        fs::create_dir_all(&package).unwrap();
        fs::write(package.join(name), contents).unwrap();
    }

    #[test]
    fn only_json_files_under_package_are_listed_sorted() {
        let dir = tempfile::tempdir().unwrap();
        write_package_file(dir.path(), "b.json", "{}");
        write_package_file(dir.path(), "a.json", "{}");
        write_package_file(dir.path(), "readme.md", "not a resource");

        let files = package_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.json", "b.json"]);
    }

    #[test]
    fn unparseable_and_untyped_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write_package_file(dir.path(), "bad.json", "{ not json");
        write_package_file(dir.path(), "untyped.json", r#"{ "url": "http://x" }"#);
        write_package_file(
            dir.path(),
            "good.json",
            &json!({ "resourceType": "ValueSet", "url": "http://x/vs/1" }).to_string(),
        );

        let files = package_files(dir.path()).unwrap();
        let records = read_resources(&files).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["resourceType"], "ValueSet");
    }

    #[test]
    fn missing_package_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(package_files(dir.path()).is_err());
    }
}
