//! # Error Hierarchy
//!
//! Structured error type for the validator, built with `thiserror`.
//!
//! Variants fall into three classes: I/O failures (missing path, wrong path
//! kind, unreadable file), parse failures (malformed YAML/JSON, a document
//! that parses to nothing), and rule violations. Rule violations carry the
//! full user-facing message, which always names the offending field and file.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort an artifact validation run.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// The artifact root is missing or is not a plain directory.
    #[error("Path given is not found or not a directory: {}", .path.display())]
    NotADirectory {
        /// The path that was checked.
        path: PathBuf,
    },

    /// A required file is missing or is not a plain file.
    #[error("{file} file not found or {} file in directory: {}", not_file_phrase(.file), .dir.display())]
    MissingFile {
        /// File name relative to the artifact root.
        file: String,
        /// The artifact root that was searched.
        dir: PathBuf,
    },

    /// The file extension maps to no known document parser.
    #[error("File type not supported: {file}")]
    UnsupportedFileType {
        /// The offending file name.
        file: String,
    },

    /// The file exists but could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// YAML parsing failed.
    #[error("failed to parse YAML at {}: {source}", .path.display())]
    YamlParse {
        /// Path of the malformed document.
        path: PathBuf,
        /// Underlying parser error.
        source: serde_yaml::Error,
    },

    /// JSON parsing failed.
    #[error("failed to parse JSON at {}: {source}", .path.display())]
    JsonParse {
        /// Path of the malformed document.
        path: PathBuf,
        /// Underlying parser error.
        source: serde_json::Error,
    },

    /// The document parsed, but to an empty or falsy value.
    #[error("Unable to parse {file}")]
    Unparseable {
        /// The file name.
        file: String,
    },

    /// The compliance feature type reference file could not be loaded.
    #[error("failed to load compliance feature types from {}: {reason}", .path.display())]
    Reference {
        /// Path of the reference file.
        path: PathBuf,
        /// Human-readable reason.
        reason: String,
    },

    /// A field-level rule was violated.
    #[error("{0}")]
    Invalid(String),
}

impl ArtifactError {
    /// Build a rule violation from a message.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}

// index.yml has always been reported as "not file"; build logs match both forms.
fn not_file_phrase(file: &str) -> &'static str {
    if file == "index.yml" {
        "not"
    } else {
        "is not"
    }
}

/// Result type alias for validator operations.
pub type ArtifactResult<T> = Result<T, ArtifactError>;
