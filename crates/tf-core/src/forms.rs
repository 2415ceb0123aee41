//! Entry forms and the drafts that persist them.
//!
//! A form holds exactly what the authoring screen for one entry type holds:
//! scalar inputs, repeatable blocks, and any local image files chosen for
//! upload. [`Draft`] is the `EntryType`-tagged union written to disk between
//! editing steps. Each form assembles itself into a [`Document`] whose key
//! order is the published order.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::document::{AttachmentKind, AttachmentTarget, Document, PendingAttachment};
use crate::entry::{EntryType, keys};
use crate::errors::CoreError;
use crate::extract::{LabelScheme, extract_blocks};
use crate::record::{SubRecord, SubRecordBlock};

const fn first_seq() -> u32 {
    1
}

/// One sub-image block and the sequence number it was given when added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub struct SubImageBlock {
    pub seq: u32,
    /// Local image waiting to be uploaded for this block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_file: Option<PathBuf>,
    #[serde(default)]
    pub entry: SubRecordBlock,
}

/// Sub-image blocks of a form.
///
/// Sequence numbers are handed out from `next_seq` when a block is added and
/// never change afterwards; removing a block leaves a gap. Upload keys are
/// derived from these numbers, so a block keeps its remote key however the
/// other blocks are edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub struct SubImageList {
    #[serde(default = "first_seq")]
    next_seq: u32,
    #[serde(default)]
    blocks: Vec<SubImageBlock>,
}

impl Default for SubImageList {
    fn default() -> Self {
        Self {
            next_seq: first_seq(),
            blocks: Vec::new(),
        }
    }
}

impl SubImageList {
    /// Append a block and return its sequence number.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::SubImageSequenceExhausted` once the numbers
    /// (possibly edited by hand in a draft) have reached `u32::MAX`.
    pub fn add(
        &mut self,
        entry: SubRecordBlock,
        image_file: Option<PathBuf>,
    ) -> Result<u32, CoreError> {
        let max_seen = self.blocks.iter().map(|block| block.seq).max().unwrap_or(0);
        let seq = max_seen
            .checked_add(1)
            .map(|after_max| self.next_seq.max(after_max))
            .ok_or(CoreError::SubImageSequenceExhausted)?;
        self.next_seq = seq
            .checked_add(1)
            .ok_or(CoreError::SubImageSequenceExhausted)?;
        self.blocks.push(SubImageBlock {
            seq,
            image_file,
            entry,
        });
        Ok(seq)
    }

    /// Remove the block with `seq`. Other blocks keep their numbers.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::SubImageNotFound` if no block has that number.
    pub fn remove(&mut self, seq: u32) -> Result<SubImageBlock, CoreError> {
        let index = self
            .blocks
            .iter()
            .position(|block| block.seq == seq)
            .ok_or(CoreError::SubImageNotFound(seq))?;
        Ok(self.blocks.remove(index))
    }

    #[must_use]
    pub fn get(&self, seq: u32) -> Option<&SubImageBlock> {
        self.blocks.iter().find(|block| block.seq == seq)
    }

    pub fn get_mut(&mut self, seq: u32) -> Option<&mut SubImageBlock> {
        self.blocks.iter_mut().find(|block| block.seq == seq)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SubImageBlock> {
        self.blocks.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Records as published, without attachment bookkeeping.
    #[must_use]
    pub fn records(&self) -> Vec<SubRecord> {
        extract_blocks(self.blocks.iter().map(|block| &block.entry), &LabelScheme::SUB_IMAGE)
    }

    /// Extract the `SubImages` records into `doc`, registering an attachment
    /// for every block that has a local image.
    ///
    /// A block with an image is kept even when it recognizes no field, since
    /// the upload fills its `URL`.
    fn assemble_into(&self, doc: &mut Document) {
        let mut records = Vec::with_capacity(self.blocks.len());
        for block in &self.blocks {
            let record = block.entry.to_record(&LabelScheme::SUB_IMAGE);
            if record.is_empty() && block.image_file.is_none() {
                tracing::debug!(seq = block.seq, "dropping empty sub image block");
                continue;
            }
            if let Some(path) = &block.image_file {
                doc.attach(PendingAttachment {
                    kind: AttachmentKind::SubImage { seq: block.seq },
                    local_path: path.clone(),
                    target: AttachmentTarget::RecordUrl {
                        collection: keys::SUB_IMAGES,
                        position: records.len(),
                    },
                });
            }
            records.push(record);
        }
        doc.insert_records(keys::SUB_IMAGES, records);
    }
}

fn attach_main_image(doc: &mut Document, file: Option<&Path>) {
    if let Some(path) = file {
        doc.attach(PendingAttachment {
            kind: AttachmentKind::Main,
            local_path: path.to_path_buf(),
            target: AttachmentTarget::Field(keys::MAIN_IMAGE_PATH),
        });
    }
}

/// Inputs of the Event screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "PascalCase", default)]
pub struct EventForm {
    pub creation_date: String,
    pub event_name: String,
    pub event_date: String,
    #[serde(rename = "RelatedTripURL")]
    pub related_trip_url: String,
    #[serde(rename = "UniqueEventID")]
    pub unique_event_id: String,
    #[serde(rename = "UniqueReportURL")]
    pub unique_report_url: String,
    #[serde(rename = "UniqueKomootURL")]
    pub unique_komoot_url: String,
    pub main_image_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_image_file: Option<PathBuf>,
    pub description: String,
    pub costs: String,
    pub transportation: String,
    pub equipment: String,
    pub sub_images: SubImageList,
}

impl EventForm {
    #[must_use]
    pub fn assemble(&self) -> Document {
        let mut doc = Document::new(EntryType::Event);
        doc.insert_text(keys::CREATION_DATE, &self.creation_date);
        doc.insert_text(keys::ENTRY_TYPE, EntryType::Event.as_str());
        doc.insert_text(keys::EVENT_NAME, &self.event_name);
        doc.insert_text(keys::EVENT_DATE, &self.event_date);
        doc.insert_text(keys::RELATED_TRIP_URL, &self.related_trip_url);
        doc.insert_text(keys::UNIQUE_EVENT_ID, &self.unique_event_id);
        doc.insert_text(keys::UNIQUE_REPORT_URL, &self.unique_report_url);
        doc.insert_text(keys::UNIQUE_KOMOOT_URL, &self.unique_komoot_url);
        doc.insert_text(keys::MAIN_IMAGE_PATH, &self.main_image_path);
        attach_main_image(&mut doc, self.main_image_file.as_deref());
        doc.insert_text(keys::DESCRIPTION, &self.description);
        doc.insert_text(keys::COSTS, &self.costs);
        doc.insert_text(keys::TRANSPORTATION, &self.transportation);
        doc.insert_text(keys::EQUIPMENT, &self.equipment);
        self.sub_images.assemble_into(&mut doc);
        doc
    }
}

/// Inputs of the Trip screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "PascalCase", default)]
pub struct TripForm {
    pub creation_date: String,
    pub trip_name: String,
    pub trip_start_date: String,
    pub trip_end_date: String,
    #[serde(rename = "UniqueTripID")]
    pub unique_trip_id: String,
    #[serde(rename = "UniqueGoogleMapURL")]
    pub unique_google_map_url: String,
    #[serde(rename = "UniqueReportURL")]
    pub unique_report_url: String,
    pub main_image_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_image_file: Option<PathBuf>,
    pub description: String,
    pub costs: String,
    pub transportation: String,
    pub equipment: String,
    pub accommodation: String,
    pub related_events: Vec<SubRecordBlock>,
    pub sub_images: SubImageList,
}

impl TripForm {
    #[must_use]
    pub fn assemble(&self) -> Document {
        let mut doc = Document::new(EntryType::Trip);
        doc.insert_text(keys::CREATION_DATE, &self.creation_date);
        doc.insert_text(keys::ENTRY_TYPE, EntryType::Trip.as_str());
        doc.insert_text(keys::TRIP_NAME, &self.trip_name);
        doc.insert_text(keys::TRIP_START_DATE, &self.trip_start_date);
        doc.insert_text(keys::TRIP_END_DATE, &self.trip_end_date);
        doc.insert_text(keys::UNIQUE_TRIP_ID, &self.unique_trip_id);
        doc.insert_text(keys::UNIQUE_GOOGLE_MAP_URL, &self.unique_google_map_url);
        doc.insert_text(keys::UNIQUE_REPORT_URL, &self.unique_report_url);
        doc.insert_text(keys::MAIN_IMAGE_PATH, &self.main_image_path);
        attach_main_image(&mut doc, self.main_image_file.as_deref());
        doc.insert_text(keys::DESCRIPTION, &self.description);
        doc.insert_text(keys::COSTS, &self.costs);
        doc.insert_text(keys::TRANSPORTATION, &self.transportation);
        doc.insert_text(keys::EQUIPMENT, &self.equipment);
        doc.insert_text(keys::ACCOMMODATION, &self.accommodation);
        doc.insert_records(
            keys::RELATED_EVENTS,
            extract_blocks(&self.related_events, &LabelScheme::RELATED_EVENT),
        );
        self.sub_images.assemble_into(&mut doc);
        doc
    }
}

/// Inputs of the Report screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "PascalCase", default)]
pub struct ReportForm {
    pub report_date: String,
    /// `Event` or `Trip`.
    pub report_type: String,
    pub report_name: String,
    #[serde(rename = "RelatedTripURL")]
    pub related_trip_url: String,
    #[serde(rename = "RelatedEventURL")]
    pub related_event_url: String,
    #[serde(rename = "UniqueReportID")]
    pub unique_report_id: String,
    #[serde(rename = "GoogleMapURL")]
    pub google_map_url: String,
    pub main_image_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_image_file: Option<PathBuf>,
    pub description: String,
    pub sub_images: SubImageList,
}

impl ReportForm {
    #[must_use]
    pub fn assemble(&self) -> Document {
        let mut doc = Document::new(EntryType::Report);
        doc.insert_text(keys::ENTRY_TYPE, EntryType::Report.as_str());
        doc.insert_text(keys::REPORT_DATE, &self.report_date);
        doc.insert_text(keys::REPORT_TYPE, &self.report_type);
        doc.insert_text(keys::REPORT_NAME, &self.report_name);
        doc.insert_text(keys::RELATED_TRIP_URL, &self.related_trip_url);
        doc.insert_text(keys::RELATED_EVENT_URL, &self.related_event_url);
        doc.insert_text(keys::UNIQUE_REPORT_ID, &self.unique_report_id);
        doc.insert_text(keys::GOOGLE_MAP_URL, &self.google_map_url);
        doc.insert_text(keys::MAIN_IMAGE_PATH, &self.main_image_path);
        attach_main_image(&mut doc, self.main_image_file.as_deref());
        doc.insert_text(keys::DESCRIPTION, &self.description);
        self.sub_images.assemble_into(&mut doc);
        doc
    }
}

/// Persisted form state for one entry, tagged by `EntryType`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "EntryType")]
pub enum Draft {
    Event(EventForm),
    Trip(TripForm),
    Report(ReportForm),
}

impl Draft {
    /// A blank draft. Event and Trip drafts get `created` as their
    /// `CreationDate` (`YYYY-MM-DD`).
    #[must_use]
    pub fn new(entry_type: EntryType, created: NaiveDate) -> Self {
        let creation_date = created.format("%Y-%m-%d").to_string();
        match entry_type {
            EntryType::Event => Self::Event(EventForm {
                creation_date,
                ..EventForm::default()
            }),
            EntryType::Trip => Self::Trip(TripForm {
                creation_date,
                ..TripForm::default()
            }),
            EntryType::Report => Self::Report(ReportForm::default()),
        }
    }

    #[must_use]
    pub const fn entry_type(&self) -> EntryType {
        match self {
            Self::Event(_) => EntryType::Event,
            Self::Trip(_) => EntryType::Trip,
            Self::Report(_) => EntryType::Report,
        }
    }

    #[must_use]
    pub fn assemble(&self) -> Document {
        match self {
            Self::Event(form) => form.assemble(),
            Self::Trip(form) => form.assemble(),
            Self::Report(form) => form.assemble(),
        }
    }

    #[must_use]
    pub fn unique_id(&self) -> &str {
        match self {
            Self::Event(form) => &form.unique_event_id,
            Self::Trip(form) => &form.unique_trip_id,
            Self::Report(form) => &form.unique_report_id,
        }
    }

    pub fn set_unique_id(&mut self, id: impl Into<String>) {
        let id = id.into();
        match self {
            Self::Event(form) => form.unique_event_id = id,
            Self::Trip(form) => form.unique_trip_id = id,
            Self::Report(form) => form.unique_report_id = id,
        }
    }

    #[must_use]
    pub const fn sub_images(&self) -> &SubImageList {
        match self {
            Self::Event(form) => &form.sub_images,
            Self::Trip(form) => &form.sub_images,
            Self::Report(form) => &form.sub_images,
        }
    }

    pub fn sub_images_mut(&mut self) -> &mut SubImageList {
        match self {
            Self::Event(form) => &mut form.sub_images,
            Self::Trip(form) => &mut form.sub_images,
            Self::Report(form) => &mut form.sub_images,
        }
    }

    /// Related-event blocks; only trips have them.
    #[must_use]
    pub fn related_events(&self) -> &[SubRecordBlock] {
        match self {
            Self::Trip(form) => &form.related_events,
            Self::Event(_) | Self::Report(_) => &[],
        }
    }

    /// Record an uploaded main image, as the upload button does.
    pub fn set_main_image_url(&mut self, url: impl Into<String>) {
        let url = url.into();
        let (path, file) = match self {
            Self::Event(form) => (&mut form.main_image_path, &mut form.main_image_file),
            Self::Trip(form) => (&mut form.main_image_path, &mut form.main_image_file),
            Self::Report(form) => (&mut form.main_image_path, &mut form.main_image_file),
        };
        *path = url;
        *file = None;
    }

    /// Record an uploaded sub image for block `seq`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::SubImageNotFound` if no block has that number.
    pub fn set_sub_image_url(&mut self, seq: u32, url: impl Into<String>) -> Result<(), CoreError> {
        let block = self
            .sub_images_mut()
            .get_mut(seq)
            .ok_or(CoreError::SubImageNotFound(seq))?;
        block.entry.set_url(&LabelScheme::SUB_IMAGE, url);
        block.image_file = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{Field, FieldGroup};
    use crate::record::SubRecordInput;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
    }

    #[test]
    fn event_keys_follow_declaration_order() {
        let doc = EventForm::default().assemble();
        let keys: Vec<_> = doc.keys().collect();
        assert_eq!(
            keys,
            vec![
                "CreationDate",
                "EntryType",
                "EventName",
                "EventDate",
                "RelatedTripURL",
                "UniqueEventID",
                "UniqueReportURL",
                "UniqueKomootURL",
                "MainImagePath",
                "Description",
                "Costs",
                "Transportation",
                "Equipment",
                "SubImages",
            ]
        );
    }

    #[test]
    fn trip_keys_follow_declaration_order() {
        let doc = TripForm::default().assemble();
        let keys: Vec<_> = doc.keys().collect();
        assert_eq!(
            keys,
            vec![
                "CreationDate",
                "EntryType",
                "TripName",
                "TripStartDate",
                "TripEndDate",
                "UniqueTripID",
                "UniqueGoogleMapURL",
                "UniqueReportURL",
                "MainImagePath",
                "Description",
                "Costs",
                "Transportation",
                "Equipment",
                "Accommodation",
                "RelatedEvents",
                "SubImages",
            ]
        );
    }

    #[test]
    fn report_keys_follow_declaration_order() {
        let doc = ReportForm::default().assemble();
        let keys: Vec<_> = doc.keys().collect();
        assert_eq!(
            keys,
            vec![
                "EntryType",
                "ReportDate",
                "ReportType",
                "ReportName",
                "RelatedTripURL",
                "RelatedEventURL",
                "UniqueReportID",
                "GoogleMapURL",
                "MainImagePath",
                "Description",
                "SubImages",
            ]
        );
    }

    #[test]
    fn new_draft_sets_creation_date_and_entry_type() {
        let draft = Draft::new(EntryType::Trip, date());
        let Draft::Trip(form) = &draft else {
            panic!("expected trip draft");
        };
        assert_eq!(form.creation_date, "2024-05-17");
        assert_eq!(draft.assemble().text("EntryType"), Some("Trip"));
    }

    #[test]
    fn sequence_numbers_survive_removal() {
        let mut list = SubImageList::default();
        let a = list.add(SubRecordBlock::default(), None).unwrap();
        let b = list.add(SubRecordBlock::default(), None).unwrap();
        let c = list.add(SubRecordBlock::default(), None).unwrap();
        assert_eq!((a, b, c), (1, 2, 3));

        list.remove(b).unwrap();
        let d = list.add(SubRecordBlock::default(), None).unwrap();
        assert_eq!(d, 4);
        let seqs: Vec<_> = list.iter().map(|block| block.seq).collect();
        assert_eq!(seqs, vec![1, 3, 4]);
    }

    #[test]
    fn removing_unknown_sequence_fails() {
        let mut list = SubImageList::default();
        assert!(matches!(list.remove(9), Err(CoreError::SubImageNotFound(9))));
    }

    #[test]
    fn add_skips_past_hand_written_sequence_numbers() {
        let json = r#"{"Blocks":[{"Seq":7,"Entry":{"Name":"x"}}]}"#;
        let mut list: SubImageList = serde_json::from_str(json).unwrap();
        assert_eq!(list.add(SubRecordBlock::default(), None).unwrap(), 8);
    }

    #[rstest]
    #[case(r#"{"NextSeq":4294967295,"Blocks":[]}"#)]
    #[case(r#"{"Blocks":[{"Seq":4294967295,"Entry":{"Name":"x"}}]}"#)]
    fn exhausted_sequence_is_an_error(#[case] json: &str) {
        let mut list: SubImageList = serde_json::from_str(json).unwrap();
        let before = list.clone();
        let err = list.add(SubRecordBlock::default(), None).unwrap_err();
        assert!(matches!(err, CoreError::SubImageSequenceExhausted));
        assert_eq!(list, before);
    }

    #[test]
    fn last_representable_number_is_handed_out_once() {
        let json = r#"{"NextSeq":4294967294,"Blocks":[]}"#;
        let mut list: SubImageList = serde_json::from_str(json).unwrap();
        assert_eq!(list.add(SubRecordBlock::default(), None).unwrap(), u32::MAX - 1);
        assert!(list.add(SubRecordBlock::default(), None).is_err());
    }

    #[test]
    fn image_blocks_register_attachments_at_record_position() {
        let mut form = EventForm {
            unique_event_id: "hike42".into(),
            main_image_file: Some(PathBuf::from("/pics/main.webp")),
            ..EventForm::default()
        };
        form.sub_images.add(SubRecordBlock::default(), None).unwrap();
        form.sub_images.add(
            SubRecordBlock::Fields(FieldGroup::new(vec![Field::line(
                "Sub Image Name:",
                "Ridge",
            )])),
            Some(PathBuf::from("/pics/ridge.webp")),
        ).unwrap();

        let doc = form.assemble();
        assert_eq!(doc.records(keys::SUB_IMAGES).unwrap().len(), 1);
        assert_eq!(
            doc.pending_attachments(),
            &[
                PendingAttachment {
                    kind: AttachmentKind::Main,
                    local_path: PathBuf::from("/pics/main.webp"),
                    target: AttachmentTarget::Field(keys::MAIN_IMAGE_PATH),
                },
                PendingAttachment {
                    kind: AttachmentKind::SubImage { seq: 2 },
                    local_path: PathBuf::from("/pics/ridge.webp"),
                    target: AttachmentTarget::RecordUrl {
                        collection: keys::SUB_IMAGES,
                        position: 0,
                    },
                },
            ]
        );
    }

    #[test]
    fn image_only_block_is_kept_for_its_upload() {
        let mut form = ReportForm::default();
        form.sub_images
            .add(SubRecordBlock::default(), Some(PathBuf::from("a.png"))).unwrap();
        let doc = form.assemble();
        assert_eq!(doc.records(keys::SUB_IMAGES).unwrap().len(), 1);
        assert_eq!(doc.pending_attachments().len(), 1);
    }

    #[test]
    fn trip_related_events_use_event_labels() {
        let form = TripForm {
            related_events: vec![
                SubRecordBlock::Fields(FieldGroup::new(vec![
                    Field::line("Event Name:", "Summit"),
                    Field::text_area("Event Description:", "early start"),
                    Field::line("Event URL:", "https://site/e/summit"),
                ])),
                SubRecordBlock::Fields(FieldGroup::default()),
            ],
            ..TripForm::default()
        };
        let doc = form.assemble();
        assert_eq!(
            doc.records(keys::RELATED_EVENTS).unwrap(),
            &[SubRecord {
                name: Some("Summit".into()),
                url: Some("https://site/e/summit".into()),
                description: Some("early start".into()),
            }]
        );
    }

    #[test]
    fn uploaded_urls_replace_local_files_in_draft() {
        let mut draft = Draft::new(EntryType::Event, date());
        draft.sub_images_mut().add(
            SubRecordBlock::Typed(SubRecordInput {
                name: Some("Ridge".into()),
                ..Default::default()
            }),
            Some(PathBuf::from("ridge.webp")),
        ).unwrap();
        draft.set_sub_image_url(1, "https://cdn/ridge.webp").unwrap();
        draft.set_main_image_url("https://cdn/main.webp");

        let doc = draft.assemble();
        assert!(!doc.has_pending_attachments());
        assert_eq!(doc.text(keys::MAIN_IMAGE_PATH), Some("https://cdn/main.webp"));
        assert_eq!(
            doc.records(keys::SUB_IMAGES).unwrap()[0].url.as_deref(),
            Some("https://cdn/ridge.webp")
        );
        assert!(matches!(
            draft.set_sub_image_url(5, "x"),
            Err(CoreError::SubImageNotFound(5))
        ));
    }

    #[test]
    fn draft_json_is_tagged_by_entry_type() {
        let draft = Draft::new(EntryType::Report, date());
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["EntryType"], "Report");
        let back: Draft = serde_json::from_value(value).unwrap();
        assert_eq!(back, draft);
    }
}
