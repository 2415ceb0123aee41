//! Entry types and the document field names each one publishes.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

/// Top-level document keys, exactly as they appear in published JSON.
pub mod keys {
    pub const CREATION_DATE: &str = "CreationDate";
    pub const ENTRY_TYPE: &str = "EntryType";
    pub const DESCRIPTION: &str = "Description";
    pub const MAIN_IMAGE_PATH: &str = "MainImagePath";
    pub const SUB_IMAGES: &str = "SubImages";
    pub const RELATED_EVENTS: &str = "RelatedEvents";
    pub const RELATED_TRIP_URL: &str = "RelatedTripURL";
    pub const UNIQUE_REPORT_URL: &str = "UniqueReportURL";
    pub const COSTS: &str = "Costs";
    pub const TRANSPORTATION: &str = "Transportation";
    pub const EQUIPMENT: &str = "Equipment";

    pub const EVENT_NAME: &str = "EventName";
    pub const EVENT_DATE: &str = "EventDate";
    pub const UNIQUE_EVENT_ID: &str = "UniqueEventID";
    pub const UNIQUE_KOMOOT_URL: &str = "UniqueKomootURL";

    pub const TRIP_NAME: &str = "TripName";
    pub const TRIP_START_DATE: &str = "TripStartDate";
    pub const TRIP_END_DATE: &str = "TripEndDate";
    pub const UNIQUE_TRIP_ID: &str = "UniqueTripID";
    pub const UNIQUE_GOOGLE_MAP_URL: &str = "UniqueGoogleMapURL";
    pub const ACCOMMODATION: &str = "Accommodation";

    pub const REPORT_DATE: &str = "ReportDate";
    pub const REPORT_TYPE: &str = "ReportType";
    pub const REPORT_NAME: &str = "ReportName";
    pub const RELATED_EVENT_URL: &str = "RelatedEventURL";
    pub const UNIQUE_REPORT_ID: &str = "UniqueReportID";
    pub const GOOGLE_MAP_URL: &str = "GoogleMapURL";
}

/// The kind of record being authored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum EntryType {
    Event,
    Trip,
    Report,
}

impl EntryType {
    pub const ALL: [Self; 3] = [Self::Event, Self::Trip, Self::Report];

    /// The value written to the `EntryType` field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Event => "Event",
            Self::Trip => "Trip",
            Self::Report => "Report",
        }
    }

    /// Keys that must be present and non-empty before publishing, in
    /// declaration order.
    #[must_use]
    pub const fn required_fields(self) -> &'static [&'static str] {
        match self {
            Self::Event => &[
                keys::EVENT_NAME,
                keys::EVENT_DATE,
                keys::UNIQUE_EVENT_ID,
                keys::UNIQUE_KOMOOT_URL,
                keys::DESCRIPTION,
                keys::TRANSPORTATION,
            ],
            Self::Trip => &[
                keys::TRIP_NAME,
                keys::TRIP_START_DATE,
                keys::TRIP_END_DATE,
                keys::UNIQUE_TRIP_ID,
                keys::DESCRIPTION,
                keys::TRANSPORTATION,
                keys::ACCOMMODATION,
            ],
            Self::Report => &[
                keys::REPORT_DATE,
                keys::REPORT_TYPE,
                keys::REPORT_NAME,
                keys::UNIQUE_REPORT_ID,
            ],
        }
    }

    /// Key holding the unique identifier used for output names and upload keys.
    #[must_use]
    pub const fn id_field(self) -> &'static str {
        match self {
            Self::Event => keys::UNIQUE_EVENT_ID,
            Self::Trip => keys::UNIQUE_TRIP_ID,
            Self::Report => keys::UNIQUE_REPORT_ID,
        }
    }

    /// Subdirectory of the output root that receives documents of this type.
    ///
    /// Reports are written directly into the output root.
    #[must_use]
    pub const fn output_subdir(self) -> Option<&'static str> {
        match self {
            Self::Event => Some("events"),
            Self::Trip => Some("trips"),
            Self::Report => None,
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|entry| entry.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::UnknownEntryType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("event".parse::<EntryType>().unwrap(), EntryType::Event);
        assert_eq!("TRIP".parse::<EntryType>().unwrap(), EntryType::Trip);
        assert_eq!("Report".parse::<EntryType>().unwrap(), EntryType::Report);
    }

    #[test]
    fn rejects_unknown_entry_type() {
        let err = "hike".parse::<EntryType>().unwrap_err();
        assert!(err.to_string().contains("hike"));
    }

    #[test]
    fn id_field_is_always_required() {
        for entry in EntryType::ALL {
            assert!(entry.required_fields().contains(&entry.id_field()));
        }
    }

    #[test]
    fn serializes_as_plain_name() {
        let json = serde_json::to_string(&EntryType::Trip).unwrap();
        assert_eq!(json, "\"Trip\"");
    }
}
