//! Routes flattened resources into typed collections and drives profile
//! admission for the downstream model.

use crate::error::{Error, Result};
use crate::model::{ProfileCandidate, SpecificationModel};
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Canonical URL patterns of profiles this pipeline refuses to process.
const UNSUPPORTED_PROFILES: &[&str] = &[r"SimpleQuantity"];

/// Classifier configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassifierOptions {
    /// Generate unit-test fixtures from the populated model afterwards.
    pub write_unittests: bool,
}

/// Summary counts of one classification run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub value_sets: usize,
    pub code_systems: usize,
    /// Code systems dropped for carrying no enumerated concepts.
    pub code_systems_skipped: usize,
    pub profiles_admitted: usize,
    /// Profiles skipped by the unsupported-profile denylist.
    pub profiles_denied: usize,
    /// Profiles the model itself refused.
    pub profiles_rejected: usize,
    /// Resources with an unrecognized discriminator.
    pub unknown_types: usize,
    /// Records without a discriminator at all.
    pub missing_type: usize,
}

/// Typed collections produced by a classification run, keyed by canonical
/// URL. Later resources silently overwrite earlier ones with the same key.
#[derive(Debug, Default)]
pub struct Classified {
    pub value_sets: HashMap<String, Value>,
    pub code_systems: HashMap<String, Value>,
    pub report: IngestReport,
}

/// Routes leaf resources by their discriminator and hands admitted
/// structure definitions to the specification model.
pub struct Classifier<'m, M: SpecificationModel> {
    model: &'m mut M,
    denylist: Vec<Regex>,
    value_sets: HashMap<String, Value>,
    code_systems: HashMap<String, Value>,
    report: IngestReport,
}

impl<'m, M: SpecificationModel> Classifier<'m, M> {
    pub fn new(model: &'m mut M) -> Result<Self> {
        let denylist = UNSUPPORTED_PROFILES
            .iter()
            .map(|pattern| Regex::new(pattern))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self {
            model,
            denylist,
            value_sets: HashMap::new(),
            code_systems: HashMap::new(),
            report: IngestReport::default(),
        })
    }

    /// Classify `leaves` and drive admitted profiles through the model.
    ///
    /// Value sets and code systems land in keyed collections; structure
    /// definitions are collected and run through denylist filtering, the
    /// model's admission check and semantic processing. Unrecognized
    /// resource types are dropped with a warning.
    pub fn run(mut self, leaves: Vec<Value>, options: ClassifierOptions) -> Result<Classified> {
        let mut profiles = Vec::new();

        for record in leaves {
            match record.get("resourceType").and_then(Value::as_str) {
                None => {
                    warn!("expecting \"resourceType\" to be present, dropping record");
                    self.report.missing_type += 1;
                    continue;
                }
                Some("StructureDefinition") => {}
                Some("ValueSet") => {
                    self.insert_value_set(record)?;
                    continue;
                }
                Some("CodeSystem") => {
                    self.insert_code_system(record)?;
                    continue;
                }
                Some(other) => {
                    warn!(resource_type = other, "unknown resourceType, dropping");
                    self.report.unknown_types += 1;
                    continue;
                }
            }
            profiles.push(record);
        }

        info!(
            value_sets = self.value_sets.len(),
            code_systems = self.code_systems.len(),
            "classified terminology resources"
        );

        for resource in &profiles {
            self.process_profile(resource)?;
        }

        if options.write_unittests {
            self.model.parse_unit_tests()?;
        }

        self.report.value_sets = self.value_sets.len();
        self.report.code_systems = self.code_systems.len();
        Ok(Classified {
            value_sets: self.value_sets,
            code_systems: self.code_systems,
            report: self.report,
        })
    }

    fn insert_value_set(&mut self, record: Value) -> Result<()> {
        let url = record
            .get("url")
            .and_then(Value::as_str)
            .ok_or(Error::MissingField("ValueSet.url"))?
            .to_string();
        if self.value_sets.insert(url.clone(), record).is_some() {
            debug!(url = %url, "duplicate ValueSet, keeping the later one");
        }
        Ok(())
    }

    fn insert_code_system(&mut self, record: Value) -> Result<()> {
        let url = record
            .get("url")
            .and_then(Value::as_str)
            .ok_or(Error::MissingField("CodeSystem.url"))?
            .to_string();

        let has_concepts = record.get("content").is_some()
            && record
                .get("concept")
                .and_then(Value::as_array)
                .is_some_and(|concepts| !concepts.is_empty());
        if !has_concepts {
            warn!(url = %url, "CodeSystem with no concepts, skipping");
            self.report.code_systems_skipped += 1;
            return Ok(());
        }

        if self.code_systems.insert(url.clone(), record).is_some() {
            debug!(url = %url, "duplicate CodeSystem, keeping the later one");
        }
        Ok(())
    }

    fn process_profile(&mut self, resource: &Value) -> Result<()> {
        let mut profile = self.model.build_profile(resource);

        let url = profile
            .url()
            .ok_or(Error::MissingField("StructureDefinition.url"))?
            .to_string();
        if self.denylist.iter().any(|pattern| pattern.is_match(&url)) {
            info!(url = %url, "skipping unsupported profile");
            self.report.profiles_denied += 1;
            return Ok(());
        }

        let name = match profile.name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => return Err(Error::MalformedProfile { url }),
        };

        if !self.model.found_profile(&profile) {
            debug!(url = %url, "model refused profile");
            self.report.profiles_rejected += 1;
            return Ok(());
        }

        profile.process()?;
        let target = format!("{}{}", name, profile.target_name());
        profile.set_target_name(target.clone());
        info!(profile = %name, target = %target, "profile admitted");

        profile.finalize()?;
        if profile.element_sequence().is_empty() {
            profile.set_element_sequence(snapshot_order(resource));
        }

        self.report.profiles_admitted += 1;
        Ok(())
    }
}

/// Fallback element ordering for profiles whose model did not compute one:
/// the second path segment of every element id in the resolved snapshot,
/// skipping the root element.
fn snapshot_order(resource: &Value) -> Vec<String> {
    resource
        .get("snapshot")
        .and_then(|snapshot| snapshot.get("element"))
        .and_then(Value::as_array)
        .map(|elements| {
            elements
                .iter()
                .skip(1)
                .filter_map(|element| element.get("id").and_then(Value::as_str))
                .filter_map(|id| id.split('.').nth(1))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
