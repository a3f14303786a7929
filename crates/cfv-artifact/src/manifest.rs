//! # Package Manifest Validation
//!
//! `package.json` must publish the artifact under names derived from the
//! index `code`, and its `auditmation` section must tell the catalog loader
//! what kind of artifact it is importing.

use cfv_core::{ArtifactError, ArtifactResult};
use serde_json::Value;

use crate::fields::present;

/// npm scope every compliance feature package is published under.
pub const PACKAGE_SCOPE: &str = "@zerobias-org";

/// Organization prefix of the catalog package identifier.
pub const PACKAGE_ORG: &str = "zerobias";

/// `auditmation.import-artifact` value for compliance features.
pub const IMPORT_ARTIFACT: &str = "compliance_feature";

/// Expected npm package name for `code`.
pub fn expected_package_name(code: &str) -> String {
    format!("{PACKAGE_SCOPE}/{IMPORT_ARTIFACT}-{PACKAGE_ORG}-{code}")
}

/// Expected `auditmation.package` identifier for `code`.
pub fn expected_catalog_package(code: &str) -> String {
    format!("{PACKAGE_ORG}.{code}.{IMPORT_ARTIFACT}")
}

/// Validate a parsed package manifest against the artifact `code`.
pub fn validate_manifest(doc: &Value, code: &str) -> ArtifactResult<()> {
    if present(doc, "name").and_then(Value::as_str) != Some(expected_package_name(code).as_str())
    {
        return Err(ArtifactError::invalid(format!(
            "package.json missing name or not set to {PACKAGE_SCOPE}/{IMPORT_ARTIFACT}-{PACKAGE_ORG}-<code>"
        )));
    }

    let description = present(doc, "description")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            ArtifactError::invalid("package.json missing description or needs replacement from {name}")
        })?;
    if description.contains("{name}") {
        return Err(ArtifactError::invalid(
            "package.json description needs replacement from {name}",
        ));
    }

    let auditmation = match doc.get("auditmation") {
        Some(section @ Value::Object(_)) => section,
        _ => {
            return Err(ArtifactError::invalid(
                "package.json missing auditmation section",
            ))
        }
    };

    if present(auditmation, "import-artifact").and_then(Value::as_str) != Some(IMPORT_ARTIFACT) {
        return Err(ArtifactError::invalid(format!(
            "package.json auditmation section missing import-artifact or not set to {IMPORT_ARTIFACT}"
        )));
    }

    if present(auditmation, "package").and_then(Value::as_str)
        != Some(expected_catalog_package(code).as_str())
    {
        return Err(ArtifactError::invalid(format!(
            "package.json auditmation section missing package or not set to {PACKAGE_ORG}.<code>.{IMPORT_ARTIFACT}"
        )));
    }

    if present(auditmation, "dataloader-version").is_none() {
        return Err(ArtifactError::invalid(
            "package.json auditmation section missing dataloader-version",
        ));
    }

    tracing::debug!(code, "package manifest fields validated");
    Ok(())
}
