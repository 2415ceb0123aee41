use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One labeled input as the form layer renders it.
///
/// `label` is the text displayed immediately before the input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub struct Field {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub value: String,
    /// Free-text area (word-wrapped, multi-line input).
    #[serde(default)]
    pub multiline: bool,
}

impl Field {
    /// A single-line input preceded by `label`.
    #[must_use]
    pub fn line(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            multiline: false,
        }
    }

    /// A free-text area preceded by `label`.
    #[must_use]
    pub fn text_area(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            multiline: true,
        }
    }
}

/// Ordered fields making up one occurrence of a repeatable block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub struct FieldGroup {
    pub fields: Vec<Field>,
}

impl FieldGroup {
    #[must_use]
    pub const fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Vec<Field>> for FieldGroup {
    fn from(fields: Vec<Field>) -> Self {
        Self::new(fields)
    }
}

impl FromIterator<Field> for FieldGroup {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
