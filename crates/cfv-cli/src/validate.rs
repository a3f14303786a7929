//! # Validate Handler
//!
//! Loads the reference vocabulary, runs the artifact pipeline, and writes
//! the progress lines build logs are matched against:
//!
//! ```text
//! Validated index.json
//! Validated package.json
//! Validated .npmrc
//! Validated elements.yml
//! Validation of artifact completed successfully.
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Args;

use cfv_artifact::{ArtifactSummary, ArtifactValidator};
use cfv_core::{reference_path_for_tool, ComplianceFeatureTypes};

/// Arguments for artifact validation.
#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Artifact directory to validate.
    #[arg(value_name = "DIRECTORY", default_value = ".")]
    pub directory: PathBuf,

    /// Compliance feature type reference file.
    /// Defaults to ../complianceFeatureTypes/index.yml relative to the tool.
    #[arg(long, value_name = "PATH")]
    pub reference: Option<PathBuf>,
}

/// Validate one artifact directory, writing progress to `out`.
pub fn run_validate(args: &ValidateArgs, out: &mut impl Write) -> Result<ArtifactSummary> {
    let reference = match &args.reference {
        Some(path) => path.clone(),
        None => default_reference_path()?,
    };
    tracing::debug!(reference = %reference.display(), "resolved reference file");

    let types = ComplianceFeatureTypes::load(&reference)?;

    let mut write_error = None;
    let summary = ArtifactValidator::new(&types).validate(&args.directory, |stage| {
        if let Err(e) = writeln!(out, "Validated {stage}") {
            if write_error.is_none() {
                write_error = Some(e);
            }
        }
    })?;
    if let Some(e) = write_error {
        return Err(e).context("failed to write progress output");
    }

    writeln!(out, "Validation of artifact completed successfully.")
        .context("failed to write progress output")?;
    Ok(summary)
}

/// Reference file location when `--reference` is not given.
fn default_reference_path() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("failed to locate the validator executable")?;
    let tool_dir = exe
        .parent()
        .ok_or_else(|| anyhow!("executable path has no parent: {}", exe.display()))?;
    reference_from_tool_dir(tool_dir)
}

/// The fixed reference path next to `tool_dir`, which must exist.
///
/// Symlinks are followed: only artifact files are held to the plain-file rule.
fn reference_from_tool_dir(tool_dir: &Path) -> Result<PathBuf> {
    let path = reference_path_for_tool(tool_dir);
    if path.is_file() {
        Ok(path)
    } else {
        Err(anyhow!(
            "compliance feature type reference file not found at {}",
            path.display()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE_YML: &str = "complianceFeatureTypes:\n  - name: policy\n  - name: procedure\n";

    const INDEX_YML: &str = "\
code: access_control
id: 5f0c4b1e-8a3d-4c2e-9b7a-2d1e6f3a9c40
name: Access Control
description: Restricts access to systems and data.
imageUrl: https://cdn.example.com/icons/access.png
externalId: AC-1
aliases: [AC]
complianceFeatureTypes: [policy]
";

    const PACKAGE_JSON: &str = r#"{
  "name": "@zerobias-org/compliance_feature-zerobias-access_control",
  "description": "Access Control compliance feature",
  "auditmation": {
    "import-artifact": "compliance_feature",
    "package": "zerobias.access_control.compliance_feature",
    "dataloader-version": "2.1.0"
  }
}"#;

    struct Fixture {
        root: tempfile::TempDir,
        artifact: PathBuf,
        reference: PathBuf,
    }

    fn fixture() -> Fixture {
        let root = tempfile::tempdir().unwrap();
        let reference_dir = root.path().join("complianceFeatureTypes");
        let artifact = root.path().join("access_control");
        std::fs::create_dir_all(&reference_dir).unwrap();
        std::fs::create_dir_all(&artifact).unwrap();

        let reference = reference_dir.join("index.yml");
        std::fs::write(&reference, REFERENCE_YML).unwrap();
        std::fs::write(artifact.join("index.yml"), INDEX_YML).unwrap();
        std::fs::write(artifact.join("package.json"), PACKAGE_JSON).unwrap();
        std::fs::write(artifact.join(".npmrc"), b"").unwrap();

        Fixture {
            root,
            artifact,
            reference,
        }
    }

    fn args(fx: &Fixture) -> ValidateArgs {
        ValidateArgs {
            directory: fx.artifact.clone(),
            reference: Some(fx.reference.clone()),
        }
    }

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn minimal_artifact_prints_three_stages_and_success() {
        let fx = fixture();
        let mut buf = Vec::new();
        let summary = run_validate(&args(&fx), &mut buf).unwrap();
        assert_eq!(summary.code, "access_control");
        assert_eq!(
            output(buf),
            "Validated index.json\nValidated package.json\nValidated .npmrc\n\
             Validation of artifact completed successfully.\n"
        );
    }

    #[test]
    fn elements_line_printed_when_present() {
        let fx = fixture();
        std::fs::write(fx.artifact.join("elements.yml"), "elements:\n  - id: ac-1\n").unwrap();
        let mut buf = Vec::new();
        run_validate(&args(&fx), &mut buf).unwrap();
        assert!(output(buf).contains("Validated elements.yml\n"));
    }

    #[test]
    fn failure_keeps_partial_progress() {
        let fx = fixture();
        std::fs::remove_file(fx.artifact.join(".npmrc")).unwrap();
        let mut buf = Vec::new();
        let err = run_validate(&args(&fx), &mut buf).unwrap_err();
        assert!(err.to_string().starts_with(".npmrc file not found"));
        let out = output(buf);
        assert!(out.contains("Validated package.json"));
        assert!(!out.contains("completed successfully"));
    }

    #[test]
    fn unreadable_reference_is_fatal_before_validation() {
        let fx = fixture();
        let mut a = args(&fx);
        a.reference = Some(fx.artifact.join("missing.yml"));
        let mut buf = Vec::new();
        let err = run_validate(&a, &mut buf).unwrap_err();
        assert!(err
            .to_string()
            .contains("failed to load compliance feature types"));
        assert!(buf.is_empty());
    }

    #[test]
    fn reference_found_next_to_tool_dir() {
        let fx = fixture();
        let tool_dir = fx.root.path().join("scripts");
        std::fs::create_dir_all(&tool_dir).unwrap();
        assert_eq!(reference_from_tool_dir(&tool_dir).unwrap(), fx.reference);
    }

    #[test]
    fn reference_missing_at_fixed_path_is_error() {
        let root = tempfile::tempdir().unwrap();
        let tool_dir = root.path().join("bin");
        std::fs::create_dir_all(&tool_dir).unwrap();
        let err = reference_from_tool_dir(&tool_dir).unwrap_err();
        assert!(err.to_string().contains(
            &root
                .path()
                .join("complianceFeatureTypes")
                .join("index.yml")
                .display()
                .to_string()
        ));
    }

    #[test]
    fn reference_higher_up_is_not_used() {
        let fx = fixture();
        let tool_dir = fx.root.path().join("a").join("b").join("scripts");
        std::fs::create_dir_all(&tool_dir).unwrap();
        assert!(reference_from_tool_dir(&tool_dir).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_reference_is_accepted() {
        let root = tempfile::tempdir().unwrap();
        let real = root.path().join("types.yml");
        std::fs::write(&real, REFERENCE_YML).unwrap();
        let reference_dir = root.path().join("complianceFeatureTypes");
        std::fs::create_dir_all(&reference_dir).unwrap();
        std::os::unix::fs::symlink(&real, reference_dir.join("index.yml")).unwrap();
        let tool_dir = root.path().join("scripts");
        std::fs::create_dir_all(&tool_dir).unwrap();

        let path = reference_from_tool_dir(&tool_dir).unwrap();
        assert_eq!(path, reference_dir.join("index.yml"));
        assert_eq!(ComplianceFeatureTypes::load(&path).unwrap().len(), 2);
    }
}
