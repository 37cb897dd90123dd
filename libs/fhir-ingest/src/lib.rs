//! FHIR resource ingestion
//!
//! Turns an arbitrary tree of nested resource bundles into flat, typed
//! collections ready for semantic processing: value sets, code systems and
//! profile candidates for the downstream code generator.
//!
//! The generator's semantic model is injected through the
//! [`model::SpecificationModel`] seam; the pipeline itself only performs
//! minimal structural checks (discriminator present, canonical URL present
//! where required) and routes resources accordingly.
//!
//! # Example
//!
//! ```rust,ignore
//! use amboss_ingest::{files, flatten, Classifier, ClassifierOptions};
//!
//! let listed = files::package_files(&ig_dir)?;
//! let records = files::read_resources(&listed)?;
//! let leaves = flatten::flatten(records);
//! let classified = Classifier::new(&mut model)?.run(leaves, ClassifierOptions::default())?;
//! ```

pub mod classify;
pub mod error;
pub mod files;
pub mod flatten;
pub mod model;

pub use classify::{Classified, Classifier, ClassifierOptions, IngestReport};
pub use error::{Error, Result};
pub use flatten::flatten;
pub use model::{ProfileCandidate, SpecificationModel};
