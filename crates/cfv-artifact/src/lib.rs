//! # cfv-artifact: Compliance Feature Artifact Validation
//!
//! An artifact is a directory of declarative metadata describing one
//! compliance feature. Before it is published into the catalog it must pass:
//!
//! 1. **Index descriptor** ([`index`]): identity, naming, and classification
//!    fields of `index.yml`. Produces the artifact `code`.
//! 2. **Package manifest** ([`manifest`]): publishing metadata in
//!    `package.json`, whose names are derived from `code`.
//! 3. **Registry marker**: `.npmrc` must exist.
//! 4. **Elements list** ([`elements`]): optional `elements.yml`.
//!
//! [`ArtifactValidator`] runs these in order and stops at the first failure.
//! Documents stay untyped ([`serde_json::Value`]); each rule is an explicit
//! field check.

mod fields;

pub mod elements;
pub mod index;
pub mod manifest;
pub mod pipeline;

pub use elements::validate_elements;
pub use index::validate_index;
pub use manifest::validate_manifest;
pub use pipeline::{
    ArtifactSummary, ArtifactValidator, Stage, ELEMENTS_FILE, INDEX_FILE, NPMRC_FILE,
    PACKAGE_FILE,
};
