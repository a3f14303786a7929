//! # cfv-cli: Artifact Validation Gate
//!
//! Provides the `cfv-validate` binary. Run from inside an artifact directory
//! with no arguments, it loads the compliance feature type reference file
//! that sits beside the tool, validates the directory, and exits `0` on
//! success or `1` on the first failure:
//!
//! ```bash
//! cd complianceFeatures/access_control
//! cfv-validate
//! ```
//!
//! Argument parsing lives in `main.rs`; [`validate::run_validate`] holds the
//! handler so it can be driven in-process by tests.

pub mod validate;
