#![deny(missing_docs)]

//! # cfv-core: Foundational Types for the Artifact Validator
//!
//! Everything the validation stages share lives here:
//!
//! - [`ArtifactError`]: the structured error hierarchy. Every failure the
//!   validator can report is one variant, and its `Display` output is the
//!   exact message shown to the artifact author.
//! - [`document`]: extension-based YAML/JSON loading into an untyped
//!   [`serde_json::Value`], plus the truthiness rule used by field checks.
//! - [`paths`]: non-dereferencing directory/file kind checks.
//! - [`reference`]: the [`ComplianceFeatureTypes`] vocabulary loaded once
//!   from the reference file and passed explicitly to validators.
//!
//! ## Crate Policy
//!
//! - Artifact documents are never deserialized into typed records. Field
//!   checks over the generic value model are the contract.
//! - No `.unwrap()` outside tests.

pub mod document;
pub mod error;
pub mod paths;
pub mod reference;

// Re-export primary types at crate root for ergonomic imports.
pub use document::{is_truthy, read_document, DocumentFormat};
pub use error::{ArtifactError, ArtifactResult};
pub use paths::{ensure_directory, ensure_file, is_regular_file};
pub use reference::{reference_path_for_tool, ComplianceFeatureTypes, REFERENCE_RELATIVE_PATH};
