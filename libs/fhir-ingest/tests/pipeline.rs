//! Full pipeline test: package directory to classified collections.

use amboss_ingest::model::{ProfileCandidate, SpecificationModel};
use amboss_ingest::{files, flatten, Classifier, ClassifierOptions, Result};
use serde_json::{json, Value};
use std::fs;

/// Minimal model that admits everything.
#[derive(Default)]
struct AdmitAll {
    admitted: Vec<String>,
}

struct Candidate {
    url: Option<String>,
    name: Option<String>,
    target_name: String,
    element_sequence: Vec<String>,
}

impl ProfileCandidate for Candidate {
    fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
    fn target_name(&self) -> &str {
        &self.target_name
    }
    fn set_target_name(&mut self, target: String) {
        self.target_name = target;
    }
    fn process(&mut self) -> Result<()> {
        Ok(())
    }
    fn finalize(&mut self) -> Result<()> {
        Ok(())
    }
    fn element_sequence(&self) -> &[String] {
        &self.element_sequence
    }
    fn set_element_sequence(&mut self, sequence: Vec<String>) {
        self.element_sequence = sequence;
    }
}

impl SpecificationModel for AdmitAll {
    type Profile = Candidate;

    fn build_profile(&mut self, resource: &Value) -> Candidate {
        Candidate {
            url: resource.get("url").and_then(Value::as_str).map(String::from),
            name: resource.get("name").and_then(Value::as_str).map(String::from),
            target_name: "Type".to_string(),
            element_sequence: Vec::new(),
        }
    }

    fn found_profile(&mut self, profile: &Candidate) -> bool {
        if let Some(name) = profile.name() {
            self.admitted.push(name.to_string());
        }
        true
    }

    fn parse_unit_tests(&mut self) -> Result<()> {
        Ok(())
    }
}

#[test]
fn package_directory_flows_through_to_classified_collections() {
    let dir = tempfile::tempdir().unwrap();
    let package = dir.path().join("package");
    fs::create_dir_all(&package).unwrap();

    // a bundle wrapping a value set and a profile, plus a loose code system
    let bundle = json!({
        "resourceType": "Bundle",
        "type": "collection",
        "entry": [
            { "resource": {
                "resourceType": "ValueSet",
                "url": "http://example.org/fhir/ValueSet/vital-signs",
            }},
            { "resource": {
                "resourceType": "StructureDefinition",
                "url": "http://example.org/fhir/StructureDefinition/bp",
                "name": "BloodPressure",
            }},
        ],
    });
    let code_system = json!({
        "resourceType": "CodeSystem",
        "url": "http://example.org/fhir/CodeSystem/obs-status",
        "content": "complete",
        "concept": [{ "code": "final" }],
    });
    fs::write(package.join("bundle.json"), bundle.to_string()).unwrap();
    fs::write(package.join("codesystem.json"), code_system.to_string()).unwrap();

    let listed = files::package_files(dir.path()).unwrap();
    let records = files::read_resources(&listed).unwrap();
    let leaves = flatten(records);

    let mut model = AdmitAll::default();
    let classified = Classifier::new(&mut model)
        .unwrap()
        .run(leaves, ClassifierOptions::default())
        .unwrap();

    assert_eq!(classified.report.value_sets, 1);
    assert_eq!(classified.report.code_systems, 1);
    assert_eq!(classified.report.profiles_admitted, 1);
    assert!(classified
        .value_sets
        .contains_key("http://example.org/fhir/ValueSet/vital-signs"));
    assert!(classified
        .code_systems
        .contains_key("http://example.org/fhir/CodeSystem/obs-status"));
    assert_eq!(model.admitted, vec!["BloodPressure"]);
}
