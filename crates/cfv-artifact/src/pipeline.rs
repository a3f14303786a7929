//! # Artifact Validation Pipeline
//!
//! Runs every check against one artifact directory, strictly in order:
//!
//! 1. the directory itself
//! 2. `index.yml` → [`validate_index`], yielding `code`
//! 3. `package.json` → [`validate_manifest`] with `code`
//! 4. `.npmrc` (existence only)
//! 5. `elements.yml` → [`validate_elements`], only if present
//!
//! The first failure is returned and nothing after it runs. Stage
//! completions are reported through a callback as they happen, so a caller
//! can show partial progress before a later stage fails.

use std::fmt;
use std::path::Path;

use cfv_core::{
    ensure_directory, ensure_file, is_regular_file, is_truthy, read_document, ArtifactError,
    ArtifactResult, ComplianceFeatureTypes,
};
use serde_json::Value;

use crate::{validate_elements, validate_index, validate_manifest};

/// Index descriptor file name.
pub const INDEX_FILE: &str = "index.yml";
/// Package manifest file name.
pub const PACKAGE_FILE: &str = "package.json";
/// Registry config marker file name.
pub const NPMRC_FILE: &str = ".npmrc";
/// Optional elements list file name.
pub const ELEMENTS_FILE: &str = "elements.yml";

/// A completed pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Index descriptor validated.
    Index,
    /// Package manifest validated.
    Package,
    /// Registry marker found.
    Npmrc,
    /// Elements list validated.
    Elements,
}

impl Stage {
    /// Label used in progress output.
    ///
    /// The index stage has always been announced as `index.json` by the
    /// catalog tooling, and build logs are matched against that text.
    pub fn label(self) -> &'static str {
        match self {
            Self::Index => "index.json",
            Self::Package => PACKAGE_FILE,
            Self::Npmrc => NPMRC_FILE,
            Self::Elements => ELEMENTS_FILE,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSummary {
    /// The artifact code from the index descriptor.
    pub code: String,
    /// Stages completed, in order.
    pub stages: Vec<Stage>,
}

/// Validates artifact directories against a fixed reference vocabulary.
#[derive(Debug, Clone, Copy)]
pub struct ArtifactValidator<'a> {
    types: &'a ComplianceFeatureTypes,
}

impl<'a> ArtifactValidator<'a> {
    /// Create a validator bound to the given reference types.
    pub fn new(types: &'a ComplianceFeatureTypes) -> Self {
        Self { types }
    }

    /// Validate `dir`, calling `on_stage` after each stage succeeds.
    ///
    /// # Errors
    ///
    /// Returns the first [`ArtifactError`] encountered.
    pub fn validate(
        &self,
        dir: &Path,
        mut on_stage: impl FnMut(Stage),
    ) -> ArtifactResult<ArtifactSummary> {
        let mut stages = Vec::new();
        let mut complete = |stage: Stage| {
            tracing::info!(stage = %stage, "stage validated");
            on_stage(stage);
            stages.push(stage);
        };

        ensure_directory(dir)?;
        tracing::debug!(dir = %dir.display(), "validating artifact");

        let index = load_required(dir, INDEX_FILE)?;
        let code = validate_index(&index, self.types)?;
        complete(Stage::Index);

        let manifest = load_required(dir, PACKAGE_FILE)?;
        validate_manifest(&manifest, &code)?;
        complete(Stage::Package);

        ensure_file(dir, NPMRC_FILE)?;
        complete(Stage::Npmrc);

        let elements_path = dir.join(ELEMENTS_FILE);
        if is_regular_file(&elements_path) {
            let elements = parse_truthy(ELEMENTS_FILE, &elements_path)?;
            validate_elements(&elements)?;
            complete(Stage::Elements);
        } else {
            tracing::debug!("no {ELEMENTS_FILE}; skipping elements validation");
        }

        Ok(ArtifactSummary { code, stages })
    }
}

fn load_required(dir: &Path, file: &str) -> ArtifactResult<Value> {
    let path = ensure_file(dir, file)?;
    parse_truthy(file, &path)
}

fn parse_truthy(file: &str, path: &Path) -> ArtifactResult<Value> {
    let doc = read_document(file, path)?;
    if is_truthy(&doc) {
        Ok(doc)
    } else {
        Err(ArtifactError::Unparseable {
            file: file.to_string(),
        })
    }
}
