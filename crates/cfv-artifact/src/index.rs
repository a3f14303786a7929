//! # Index Descriptor Validation
//!
//! `index.yml` carries the identity of a compliance feature. Rules run in a
//! fixed order and the first violation aborts:
//!
//! | field                    | rule                                               |
//! |--------------------------|----------------------------------------------------|
//! | `code`                   | required string, not `{code}`                      |
//! | `id`                     | required, not `{id}`, parses as a UUID             |
//! | `name`                   | required string, not `{name}`                      |
//! | `description`            | required string, not `{description}`               |
//! | `imageUrl`               | optional, absolute URL when present                |
//! | `externalId`             | required string, not `{externalId}`                |
//! | `aliases`                | optional `string[]`                                |
//! | `complianceFeatureTypes` | optional `string[]`, each a known reference type   |

use cfv_core::{ArtifactError, ArtifactResult, ComplianceFeatureTypes};
use serde_json::Value;
use url::Url;
use uuid::Uuid;

use crate::fields::{filled_in, optional_array, present, required_string};
use crate::pipeline::INDEX_FILE;

/// Validate a parsed index descriptor and return its `code`.
///
/// `types` is the reference vocabulary that every `complianceFeatureTypes`
/// entry must belong to.
pub fn validate_index(doc: &Value, types: &ComplianceFeatureTypes) -> ArtifactResult<String> {
    let code = required_string(doc, "code", INDEX_FILE)?;

    let id = validate_id(doc)?;
    let name = required_string(doc, "name", INDEX_FILE)?;
    required_string(doc, "description", INDEX_FILE)?;
    let image_url = validate_image_url(doc)?;
    required_string(doc, "externalId", INDEX_FILE)?;
    validate_aliases(doc)?;
    validate_feature_types(doc, types)?;

    tracing::debug!(
        code,
        %id,
        name,
        image_url = ?image_url.as_ref().map(Url::as_str),
        "index descriptor fields validated"
    );
    Ok(code.to_string())
}

fn validate_id(doc: &Value) -> ArtifactResult<Uuid> {
    let value = filled_in(doc, "id")
        .ok_or_else(|| ArtifactError::invalid(format!("id not found in {INDEX_FILE}")))?;
    value
        .as_str()
        .filter(|s| is_hyphenated_uuid(s))
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| {
            ArtifactError::invalid(format!(
                "id in {INDEX_FILE} is not a valid UUID: {}",
                render(value)
            ))
        })
}

/// Only the 8-4-4-4-12 form is an artifact id; `Uuid::parse_str` also takes
/// simple, braced, and URN forms.
fn is_hyphenated_uuid(s: &str) -> bool {
    s.len() == 36
        && s.char_indices().all(|(i, c)| match i {
            8 | 13 | 18 | 23 => c == '-',
            _ => c.is_ascii_hexdigit(),
        })
}

fn validate_image_url(doc: &Value) -> ArtifactResult<Option<Url>> {
    let Some(value) = present(doc, "imageUrl") else {
        return Ok(None);
    };
    value
        .as_str()
        .and_then(|s| Url::parse(s).ok())
        .map(Some)
        .ok_or_else(|| {
            ArtifactError::invalid(format!(
                "imageUrl in {INDEX_FILE} is not a valid URL: {}",
                render(value)
            ))
        })
}

fn validate_aliases(doc: &Value) -> ArtifactResult<()> {
    let not_strings =
        || ArtifactError::invalid(format!("aliases in {INDEX_FILE} needs to be a string[]"));
    let aliases = optional_array(doc, "aliases").map_err(|_| not_strings())?;
    if aliases.iter().all(Value::is_string) {
        Ok(())
    } else {
        Err(not_strings())
    }
}

fn validate_feature_types(doc: &Value, types: &ComplianceFeatureTypes) -> ArtifactResult<()> {
    let entries = optional_array(doc, "complianceFeatureTypes").map_err(|_| {
        ArtifactError::invalid(format!(
            "complianceFeatureTypes in {INDEX_FILE} needs to be an array"
        ))
    })?;

    for entry in entries {
        let Some(name) = entry.as_str() else {
            return Err(ArtifactError::invalid(format!(
                "complianceFeatureTypes in {INDEX_FILE} needs to be a string[]"
            )));
        };
        if !types.contains(name) {
            return Err(ArtifactError::invalid(format!(
                "complianceFeatureType {name} not a valid compliance feature type - {}",
                types.describe()
            )));
        }
    }
    Ok(())
}

fn render(value: &Value) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}
