//! # Compliance Feature Type Reference Set
//!
//! The vocabulary of valid `complianceFeatureTypes` names. It is read once
//! from a YAML reference file of the shape
//!
//! ```yaml
//! complianceFeatureTypes:
//!   - name: policy
//!     description: ...
//!   - name: procedure
//! ```
//!
//! and then passed by reference into the index descriptor validator. Only
//! the `name` of each entry is kept.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ArtifactError, ArtifactResult};

/// Location of the reference file relative to a catalog root.
pub const REFERENCE_RELATIVE_PATH: &str = "complianceFeatureTypes/index.yml";

#[derive(Debug, Deserialize)]
struct ReferenceFile {
    #[serde(rename = "complianceFeatureTypes")]
    compliance_feature_types: Vec<ReferenceEntry>,
}

#[derive(Debug, Deserialize)]
struct ReferenceEntry {
    name: String,
}

/// Immutable set of valid compliance feature type names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplianceFeatureTypes {
    names: BTreeSet<String>,
}

impl ComplianceFeatureTypes {
    /// Load the set from a reference file on disk.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError::Reference`] if the file cannot be read, is not
    /// valid YAML, lacks the `complianceFeatureTypes` list, or has an entry
    /// without a string `name`.
    pub fn load(path: &Path) -> ArtifactResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ArtifactError::Reference {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let types = Self::from_yaml_str(&content, path)?;
        tracing::info!(
            path = %path.display(),
            count = types.len(),
            "loaded compliance feature types"
        );
        Ok(types)
    }

    /// Parse the set from reference file text. `path` is used for error context.
    pub fn from_yaml_str(content: &str, path: &Path) -> ArtifactResult<Self> {
        let file: ReferenceFile =
            serde_yaml::from_str(content).map_err(|e| ArtifactError::Reference {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        Ok(file
            .compliance_feature_types
            .into_iter()
            .map(|entry| entry.name)
            .collect())
    }

    /// Whether `name` is a valid compliance feature type.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of known types.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Known names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Render the set for error messages: `{a | b | c}`.
    pub fn describe(&self) -> String {
        format!("{{{}}}", self.iter().collect::<Vec<_>>().join(" | "))
    }
}

impl<S: Into<String>> FromIterator<S> for ComplianceFeatureTypes {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// The reference file a tool installed in `tool_dir` reads:
/// `<tool_dir>/../complianceFeatureTypes/index.yml`.
pub fn reference_path_for_tool(tool_dir: &Path) -> PathBuf {
    tool_dir
        .parent()
        .unwrap_or(tool_dir)
        .join(REFERENCE_RELATIVE_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE_YAML: &str = "\
complianceFeatureTypes:
  - name: policy
    description: A governing policy
  - name: procedure
  - name: control
";

    #[test]
    fn parses_names_and_ignores_other_fields() {
        let types =
            ComplianceFeatureTypes::from_yaml_str(REFERENCE_YAML, Path::new("ref.yml")).unwrap();
        assert_eq!(types.len(), 3);
        assert!(types.contains("policy"));
        assert!(types.contains("procedure"));
        assert!(!types.contains("description"));
    }

    #[test]
    fn describe_lists_sorted_names() {
        let types: ComplianceFeatureTypes = ["procedure", "control", "policy"].into_iter().collect();
        assert_eq!(types.describe(), "{control | policy | procedure}");
    }

    #[test]
    fn empty_set_describes_as_braces() {
        let types = ComplianceFeatureTypes::default();
        assert!(types.is_empty());
        assert_eq!(types.describe(), "{}");
    }

    #[test]
    fn missing_list_is_reference_error() {
        let err = ComplianceFeatureTypes::from_yaml_str("other: []\n", Path::new("ref.yml"))
            .unwrap_err();
        assert!(matches!(err, ArtifactError::Reference { .. }));
    }

    #[test]
    fn entry_without_name_is_reference_error() {
        let err = ComplianceFeatureTypes::from_yaml_str(
            "complianceFeatureTypes:\n  - description: nameless\n",
            Path::new("ref.yml"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("ref.yml"));
    }

    #[test]
    fn load_missing_file_is_reference_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ComplianceFeatureTypes::load(&dir.path().join("index.yml")).unwrap_err();
        assert!(matches!(err, ArtifactError::Reference { .. }));
    }

    #[test]
    fn load_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.yml");
        std::fs::write(&path, REFERENCE_YAML).unwrap();
        let types = ComplianceFeatureTypes::load(&path).unwrap();
        assert_eq!(types.len(), 3);
    }

    #[test]
    fn tool_path_is_sibling_of_tool_dir() {
        assert_eq!(
            reference_path_for_tool(Path::new("/catalog/scripts")),
            Path::new("/catalog/complianceFeatureTypes/index.yml")
        );
    }

    #[cfg(unix)]
    #[test]
    fn load_follows_symlinked_reference() {
        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("types.yml");
        std::fs::write(&real, REFERENCE_YAML).unwrap();
        let reference_dir = dir.path().join("complianceFeatureTypes");
        std::fs::create_dir_all(&reference_dir).unwrap();
        std::os::unix::fs::symlink(&real, reference_dir.join("index.yml")).unwrap();

        let types = ComplianceFeatureTypes::load(&reference_dir.join("index.yml")).unwrap();
        assert!(types.contains("control"));
    }
}
