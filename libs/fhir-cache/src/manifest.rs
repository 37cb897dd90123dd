//! The artifact manifest: what a complete specification cache must contain.

/// A single named file the cache must hold, and how to obtain it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Artifact {
    /// File name expected in the cache directory.
    pub local: &'static str,
    /// File name on the specification server.
    pub remote: &'static str,
    /// Subdirectory of the cache an archive artifact expands into.
    /// `None` expands into the cache root.
    pub expand_dir: Option<&'static str>,
}

/// The artifacts a published FHIR specification consists of: the version
/// marker, the example resources and the core definitions.
pub const DEFAULT_MANIFEST: &[Artifact] = &[
    Artifact {
        local: "version.info",
        remote: "version.info",
        expand_dir: None,
    },
    Artifact {
        local: "examples-json.zip",
        remote: "examples-json.zip",
        expand_dir: Some("examples"),
    },
    Artifact {
        local: "definitions.json.zip",
        remote: "definitions.json.zip",
        expand_dir: Some("definitions"),
    },
];
