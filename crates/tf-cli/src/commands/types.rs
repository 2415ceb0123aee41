use std::path::PathBuf;

use serde::Serialize;
use tf_core::{EntryType, SubRecord};

#[derive(Debug, Serialize)]
pub struct NewDraftResponse {
    pub draft: PathBuf,
    pub entry_type: EntryType,
    pub unique_id: String,
}

#[derive(Debug, Serialize)]
pub struct SubImageAddedResponse {
    pub draft: PathBuf,
    pub seq: u32,
}

#[derive(Debug, Serialize)]
pub struct SubImageRemovedResponse {
    pub draft: PathBuf,
    pub removed: u32,
    pub remaining: usize,
}

/// Sub-records as they would appear in the published document.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExtractResponse {
    pub sub_images: Vec<SubRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_events: Option<Vec<SubRecord>>,
}

#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub entry_type: EntryType,
    pub unique_id: String,
    pub missing: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub draft: PathBuf,
    pub key: String,
    pub url: String,
}
