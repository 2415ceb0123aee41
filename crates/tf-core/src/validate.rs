use crate::document::Document;
use crate::errors::ValidationError;

/// Check the required fields of the document's entry type.
///
/// A required key that is absent, not text, or the empty string counts as
/// missing. Any other value, whitespace included, is accepted. All
/// missing keys are reported in one error, in declaration order.
///
/// # Errors
///
/// Returns `ValidationError::MissingRequiredFields` if any required key is missing.
pub fn validate(document: &Document) -> Result<&Document, ValidationError> {
    let missing: Vec<&'static str> = document
        .entry_type()
        .required_fields()
        .iter()
        .copied()
        .filter(|key| document.text(key).is_none_or(str::is_empty))
        .collect();

    if missing.is_empty() {
        Ok(document)
    } else {
        tracing::debug!(entry_type = %document.entry_type(), ?missing, "document failed validation");
        Err(ValidationError::MissingRequiredFields { missing })
    }
}
