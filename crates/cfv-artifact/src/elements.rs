//! Elements list validation for the optional `elements.yml`.

use cfv_core::{is_truthy, ArtifactError, ArtifactResult};
use serde_json::Value;

use crate::fields::present;

/// Validate a parsed elements list.
///
/// Every element needs a truthy `id`, or a truthy `standardAlias` together
/// with a truthy `elementAlias`. The first element that has neither aborts
/// validation; later elements are not examined.
pub fn validate_elements(doc: &Value) -> ArtifactResult<()> {
    let elements = present(doc, "elements")
        .ok_or_else(|| ArtifactError::invalid("elements.yml missing elements array."))?
        .as_array()
        .ok_or_else(|| ArtifactError::invalid("elements.yml elements should be an array."))?;

    if let Some(element) = elements.iter().find(|e| !has_identity(e)) {
        return Err(ArtifactError::invalid(format!(
            "elements.yml element item {element} must have either id or both standardAlias and elementAlias."
        )));
    }

    tracing::debug!(count = elements.len(), "elements validated");
    Ok(())
}

fn has_identity(element: &Value) -> bool {
    let truthy = |field: &str| element.get(field).is_some_and(is_truthy);
    truthy("id") || (truthy("standardAlias") && truthy("elementAlias"))
}
