//! Seam to the downstream specification model.
//!
//! The semantic engine that turns admitted profiles into generated code is
//! an external collaborator. The ingestion pipeline only needs the small
//! surface below, which also keeps the classifier testable against a fake
//! model.

use crate::error::Result;
use serde_json::Value;

/// A structure-definition candidate handed over for semantic processing.
///
/// Construction wraps the raw record; everything beyond this surface stays
/// opaque to the ingestion pipeline.
pub trait ProfileCandidate {
    /// Canonical URL of the underlying structure definition.
    fn url(&self) -> Option<&str>;

    /// Computed name of the profile.
    fn name(&self) -> Option<&str>;

    /// Target identifier used for the generated artifact. Starts out as
    /// the generator-assigned suffix.
    fn target_name(&self) -> &str;
    fn set_target_name(&mut self, target: String);

    /// Semantic processing of an admitted candidate.
    fn process(&mut self) -> Result<()>;

    /// Final semantic pass once all collections are populated.
    fn finalize(&mut self) -> Result<()>;

    /// Order of the profile's top-level elements, if the model computed one.
    fn element_sequence(&self) -> &[String];
    fn set_element_sequence(&mut self, sequence: Vec<String>);
}

/// Object-wide surface of the downstream specification model.
pub trait SpecificationModel {
    type Profile: ProfileCandidate;

    /// Wrap a raw StructureDefinition record into a candidate.
    fn build_profile(&mut self, resource: &Value) -> Self::Profile;

    /// Register a candidate with the model. `false` means the model
    /// refused it per its own rules.
    fn found_profile(&mut self, profile: &Self::Profile) -> bool;

    /// Generate unit-test fixtures from the populated model.
    fn parse_unit_tests(&mut self) -> Result<()>;
}
