//! Specification ingestion driver
//!
//! Downloads the FHIR specification artifacts into the local cache and
//! runs implementation-guide packages through the flatten/classify
//! pipeline. The semantic model consuming admitted profiles lives in the
//! generator; this binary wires the pipeline against a recording stand-in
//! and reports what would be generated.

use anyhow::Context;
use clap::Parser;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use amboss_cache::{Downloader, HttpDownloader, OfflineDownloader, SpecLoader, VersionInfo};
use amboss_ingest::model::{ProfileCandidate, SpecificationModel};
use amboss_ingest::{files, flatten, Classifier, ClassifierOptions};
use serde_json::Value;

#[derive(Parser, Debug)]
#[command(
    name = "amboss",
    about = "Download and classify FHIR specification resources",
    version
)]
struct Args {
    /// Force a re-download of the specification
    #[arg(short = 'f', long, conflicts_with = "cache_only")]
    force_download: bool,

    /// Fail instead of downloading when an artifact is missing from the cache
    #[arg(short = 'c', long)]
    cache_only: bool,

    /// Only download the specification, skip parsing
    #[arg(short = 'l', long)]
    load_only: bool,

    /// Load and classify but skip the unit-test fixture pass
    #[arg(short = 'd', long)]
    dry_run: bool,

    /// Never touch the network; artifacts must be pre-placed in the cache
    #[arg(long)]
    offline: bool,

    /// FHIR release the cache is keyed by
    #[arg(long, default_value = "R4")]
    release: String,

    /// Base URL of the published specification (defaults to the hl7.org
    /// location of the chosen release)
    #[arg(long)]
    spec_url: Option<String>,

    /// Cache directory for downloaded artifacts
    #[arg(long, default_value = "downloads")]
    cache_dir: PathBuf,

    /// Generate unit-test fixtures from the classified resources
    #[arg(long)]
    write_unittests: bool,

    /// Implementation-guide package directories to ingest
    #[arg(value_name = "IG_DIR")]
    ig_dirs: Vec<PathBuf>,
}

/// Configuration surface consumed by the pipeline.
struct Settings {
    specification_url: String,
    cache_dir: PathBuf,
    write_unittests: bool,
}

impl Settings {
    fn from_args(args: &Args) -> Self {
        let specification_url = args
            .spec_url
            .clone()
            .unwrap_or_else(|| format!("http://hl7.org/fhir/{}", args.release));
        Self {
            specification_url,
            cache_dir: args.cache_dir.join(&args.release),
            write_unittests: args.write_unittests,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let settings = Settings::from_args(&args);

    let cache_dir = if args.offline {
        load(&settings, OfflineDownloader, &args)
    } else {
        let downloader = HttpDownloader::new().context("building HTTP client")?;
        load(&settings, downloader, &args)
    }
    .context("loading specification artifacts")?;

    match VersionInfo::read(&cache_dir) {
        Ok(info) => tracing::info!(
            version = %info.version,
            fhir_version = %info.fhir_version,
            "specification cache ready"
        ),
        Err(err) => tracing::warn!(error = %err, "version.info missing or unreadable"),
    }

    if args.load_only {
        return Ok(());
    }

    let mut records = Vec::new();
    for dir in &args.ig_dirs {
        let listed = files::package_files(dir)
            .with_context(|| format!("listing package files in {}", dir.display()))?;
        let resources = files::read_resources(&listed)
            .with_context(|| format!("reading resources from {}", dir.display()))?;
        records.extend(resources);
    }
    let leaves = flatten(records);

    let mut model = RecordingModel::default();
    let options = ClassifierOptions {
        write_unittests: settings.write_unittests && !args.dry_run,
    };
    let classified = Classifier::new(&mut model)
        .context("building classifier")?
        .run(leaves, options)
        .context("classifying resources")?;

    let report = &classified.report;
    println!(
        "{} value sets, {} code systems, {} profiles admitted ({} denied, {} rejected)",
        report.value_sets,
        report.code_systems,
        report.profiles_admitted,
        report.profiles_denied,
        report.profiles_rejected
    );
    for target in model.targets.borrow().iter() {
        println!("  -> {target}");
    }

    Ok(())
}

fn load<D: Downloader>(
    settings: &Settings,
    downloader: D,
    args: &Args,
) -> amboss_cache::Result<PathBuf> {
    SpecLoader::new(
        settings.specification_url.as_str(),
        settings.cache_dir.as_path(),
        downloader,
    )
    .load(args.force_download, args.cache_only)
}

/// Stand-in for the generator's semantic model: admits every candidate and
/// records the target identifiers that admission produced.
#[derive(Default)]
struct RecordingModel {
    targets: Rc<RefCell<Vec<String>>>,
}

struct RecordingProfile {
    url: Option<String>,
    name: Option<String>,
    target_name: String,
    element_sequence: Vec<String>,
    targets: Rc<RefCell<Vec<String>>>,
}

impl ProfileCandidate for RecordingProfile {
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
        self.targets.borrow_mut().push(target.clone());
        self.target_name = target;
    }
    fn process(&mut self) -> amboss_ingest::Result<()> {
        Ok(())
    }
    fn finalize(&mut self) -> amboss_ingest::Result<()> {
        Ok(())
    }
    fn element_sequence(&self) -> &[String] {
        &self.element_sequence
    }
    fn set_element_sequence(&mut self, sequence: Vec<String>) {
        self.element_sequence = sequence;
    }
}

impl SpecificationModel for RecordingModel {
    type Profile = RecordingProfile;

    fn build_profile(&mut self, resource: &Value) -> RecordingProfile {
        RecordingProfile {
            url: resource.get("url").and_then(Value::as_str).map(String::from),
            name: resource.get("name").and_then(Value::as_str).map(String::from),
            target_name: "Type".to_string(),
            element_sequence: Vec::new(),
            targets: Rc::clone(&self.targets),
        }
    }

    fn found_profile(&mut self, _profile: &RecordingProfile) -> bool {
        true
    }

    fn parse_unit_tests(&mut self) -> amboss_ingest::Result<()> {
        tracing::info!("unit-test fixture generation is handled by the generator");
        Ok(())
    }
}
