//! Sub-records: the `{Name, URL, Description}` triples published inside
//! `SubImages` and `RelatedEvents`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::extract::{LabelScheme, extract_group};
use crate::field::FieldGroup;

/// Semantic record recovered from one repeatable block.
///
/// Keys that were never set are omitted from the JSON output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SubRecord {
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "URL", default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "Description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SubRecord {
    /// True when no key has been recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.url.is_none() && self.description.is_none()
    }

    /// Number of recorded keys.
    #[must_use]
    pub fn len(&self) -> usize {
        [&self.name, &self.url, &self.description]
            .into_iter()
            .filter(|value| value.is_some())
            .count()
    }
}

/// Sub-record built directly by the form layer, without label inspection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SubRecordInput {
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "URL", default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "Description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<SubRecordInput> for SubRecord {
    fn from(input: SubRecordInput) -> Self {
        Self {
            name: input.name,
            url: input.url,
            description: input.description,
        }
    }
}

/// One repeatable block as stored in a draft: either the raw field group the
/// form rendered, or a typed input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum SubRecordBlock {
    Fields(FieldGroup),
    Typed(SubRecordInput),
}

impl SubRecordBlock {
    /// Recover the record for this block. Blocks that yield no key are
    /// returned as an empty record; callers decide whether to drop them.
    #[must_use]
    pub fn to_record(&self, scheme: &LabelScheme) -> SubRecord {
        match self {
            Self::Fields(group) => extract_group(group, scheme),
            Self::Typed(input) => SubRecord::from(input.clone()),
        }
    }

    /// Set the URL this block publishes, in whichever shape the block has.
    ///
    /// A field group without a URL input gets one appended under the
    /// scheme's URL label.
    pub fn set_url(&mut self, scheme: &LabelScheme, url: impl Into<String>) {
        let url = url.into();
        match self {
            Self::Fields(group) => {
                let existing = group
                    .fields
                    .iter_mut()
                    .rev()
                    .find(|field| !field.multiline && field.label == scheme.url_label);
                match existing {
                    Some(field) => field.value = url,
                    None => group
                        .fields
                        .push(crate::field::Field::line(scheme.url_label, url)),
                }
            }
            Self::Typed(input) => input.url = Some(url),
        }
    }
}

impl Default for SubRecordBlock {
    fn default() -> Self {
        Self::Typed(SubRecordInput::default())
    }
}
