//! Extension-driven document loading.
//!
//! Artifact files are parsed into a generic [`serde_json::Value`] regardless
//! of their source format, so every validator works against one value model.
//! YAML documents go through serde_yaml first and are then converted:
//! mapping keys are stringified and tags are stripped.

use std::path::Path;

use serde_json::Value;

use crate::error::{ArtifactError, ArtifactResult};

/// Parser selected for an artifact file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// `.yml` files.
    Yaml,
    /// `.json` files.
    Json,
}

impl DocumentFormat {
    /// Pick the parser from the file name's extension, ignoring case.
    ///
    /// Returns `None` for anything other than `.yml` or `.json`.
    pub fn from_file_name(file: &str) -> Option<Self> {
        let lower = file.to_ascii_lowercase();
        if lower.ends_with(".yml") {
            Some(Self::Yaml)
        } else if lower.ends_with(".json") {
            Some(Self::Json)
        } else {
            None
        }
    }

    /// Parse document text in this format.
    ///
    /// `path` is only used for error context.
    pub fn parse(self, content: &str, path: &Path) -> ArtifactResult<Value> {
        match self {
            Self::Yaml => {
                let yaml: serde_yaml::Value =
                    serde_yaml::from_str(content).map_err(|e| ArtifactError::YamlParse {
                        path: path.to_path_buf(),
                        source: e,
                    })?;
                Ok(yaml_to_json_value(yaml))
            }
            Self::Json => serde_json::from_str(content).map_err(|e| ArtifactError::JsonParse {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }
}

/// Read and parse an artifact file.
///
/// `file` is the name used to pick the parser and to report errors;
/// `path` is the resolved location on disk. The extension is checked before
/// the file is touched, so an unsupported file is rejected even if it is
/// unreadable.
pub fn read_document(file: &str, path: &Path) -> ArtifactResult<Value> {
    let format =
        DocumentFormat::from_file_name(file).ok_or_else(|| ArtifactError::UnsupportedFileType {
            file: file.to_string(),
        })?;

    tracing::debug!(file, path = %path.display(), ?format, "reading artifact document");

    let content = std::fs::read_to_string(path).map_err(|e| ArtifactError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    format.parse(&content, path)
}

/// Truthiness of an untyped document value.
///
/// `null`, `false`, zero, and the empty string are falsy. Everything else,
/// including empty arrays and empty mappings, is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn yaml_to_json_value(yaml: serde_yaml::Value) -> Value {
    match yaml {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                // NaN and infinities have no JSON representation.
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map_or(Value::Null, Value::Number)
            }
        }
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(seq) => {
            Value::Array(seq.into_iter().map(yaml_to_json_value).collect())
        }
        serde_yaml::Value::Mapping(map) => {
            let obj = map
                .into_iter()
                .map(|(k, v)| (yaml_key_to_string(k), yaml_to_json_value(v)))
                .collect();
            Value::Object(obj)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(tagged.value),
    }
}

fn yaml_key_to_string(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Null => "null".to_string(),
        serde_yaml::Value::Tagged(tagged) => yaml_key_to_string(tagged.value),
        other => yaml_to_json_value(other).to_string(),
    }
}
