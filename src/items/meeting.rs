use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::text::{clean_title, slugify, STATUS_MARKERS};

/// Governmental category of a meeting body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Classification {
    #[serde(rename = "Advisory Committee")]
    AdvisoryCommittee,
    Board,
    #[serde(rename = "City Council")]
    CityCouncil,
    Commission,
    Committee,
    Forum,
    #[serde(rename = "Police Beat")]
    PoliceBeat,
    #[serde(rename = "Not classified")]
    NotClassified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MeetingStatus {
    Cancelled,
    Tentative,
    Confirmed,
    Passed,
}

impl fmt::Display for MeetingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MeetingStatus::Cancelled => "cancelled",
            MeetingStatus::Tentative => "tentative",
            MeetingStatus::Confirmed => "confirmed",
            MeetingStatus::Passed => "passed",
        };
        f.write_str(label)
    }
}

/// Venue of a meeting. Both fields may be empty when the source does not
/// say.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Location {
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub title: String,
    pub href: String,
}

/// A normalized public-meeting record.
///
/// `status` and `id` are derived in [`MeetingDraft::finalize`]; records
/// are not mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Meeting {
    pub title: String,
    pub description: String,
    pub classification: Classification,
    pub start: NaiveDateTime,
    pub end: Option<NaiveDateTime>,
    pub all_day: bool,
    pub time_notes: String,
    pub location: Location,
    pub links: Vec<Link>,
    pub source: String,
    pub status: MeetingStatus,
    pub id: String,
}

/// The caller-supplied fields of a meeting, before the derived ones are
/// computed.
#[derive(Debug, Clone, PartialEq)]
pub struct MeetingDraft {
    pub title: String,
    pub description: String,
    pub classification: Classification,
    pub start: NaiveDateTime,
    pub end: Option<NaiveDateTime>,
    pub all_day: bool,
    pub time_notes: String,
    pub location: Location,
    pub links: Vec<Link>,
    pub source: String,
}

impl MeetingDraft {
    /// Derive `status` and `id` and seal the record. Pure: the same draft,
    /// spider name, and reference time always yield an identical record.
    pub fn finalize(self, spider_name: &str, now: NaiveDateTime) -> Meeting {
        let status = self.derive_status(now);
        let id = self.derive_id(spider_name);
        Meeting {
            title: self.title,
            description: self.description,
            classification: self.classification,
            start: self.start,
            end: self.end,
            all_day: self.all_day,
            time_notes: self.time_notes,
            location: self.location,
            links: self.links,
            source: self.source,
            status,
            id,
        }
    }

    fn derive_status(&self, now: NaiveDateTime) -> MeetingStatus {
        let text = format!("{} {}", self.title, self.description).to_lowercase();
        if STATUS_MARKERS.iter().any(|marker| text.contains(marker)) {
            MeetingStatus::Cancelled
        } else if self.start < now {
            MeetingStatus::Passed
        } else {
            MeetingStatus::Tentative
        }
    }

    // The "x" path segment is a placeholder for a per-source meeting
    // identifier no tracked source provides.
    fn derive_id(&self, spider_name: &str) -> String {
        format!(
            "{}/{}/x/{}",
            spider_name,
            self.start.format("%Y%m%d%H%M"),
            slugify(&clean_title(&self.title))
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    fn draft(title: &str, description: &str, start: NaiveDateTime) -> MeetingDraft {
        MeetingDraft {
            title: title.to_string(),
            description: description.to_string(),
            classification: Classification::Commission,
            start,
            end: None,
            all_day: false,
            time_notes: String::new(),
            location: Location::default(),
            links: Vec::new(),
            source: "https://example.com/meetings".to_string(),
        }
    }

    #[test]
    fn test_status_cancellation_marker_wins_over_past_start() {
        let now = at(2025, 1, 2, 0, 0);
        let meeting = draft(
            "Board of Commissioners Meeting - RESCHEDULED",
            "CANCELLED! Rescheduled for Thursday, August 22.",
            at(2024, 8, 20, 18, 0),
        )
        .finalize("example", now);
        assert_eq!(meeting.status, MeetingStatus::Cancelled);
    }

    #[test]
    fn test_status_past_start_is_passed() {
        let now = at(2025, 1, 2, 0, 0);
        let meeting = draft(
            "Annual & Board of Commissioners Meetings",
            "",
            at(2024, 12, 17, 17, 45),
        )
        .finalize("example", now);
        assert_eq!(meeting.status, MeetingStatus::Passed);
    }

    #[test]
    fn test_status_future_start_is_tentative() {
        let now = at(2024, 11, 6, 0, 0);
        let meeting = draft("Commission Meeting", "", at(2024, 11, 7, 0, 0)).finalize("example", now);
        assert_eq!(meeting.status, MeetingStatus::Tentative);
    }

    #[test]
    fn test_id_is_namespaced_and_slugged() {
        let now = at(2024, 11, 6, 0, 0);
        let meeting = draft(
            "November 7, 2024 Civil Service Commission",
            "",
            at(2024, 11, 7, 0, 0),
        )
        .finalize("cinoh_civil_service", now);
        assert_eq!(
            meeting.id,
            "cinoh_civil_service/202411070000/x/november_7_2024_civil_service_commission"
        );
    }

    #[test]
    fn test_id_drops_status_suffix_from_title() {
        let now = at(2025, 1, 2, 0, 0);
        let meeting = draft(
            "Board of Commissioners Meeting - RESCHEDULED",
            "",
            at(2024, 8, 20, 18, 0),
        )
        .finalize("cinoh_metro_housing_authority", now);
        assert_eq!(
            meeting.id,
            "cinoh_metro_housing_authority/202408201800/x/board_of_commissioners_meeting"
        );
    }

    #[test]
    fn test_finalize_is_idempotent() {
        let now = at(2024, 11, 6, 0, 0);
        let draft = draft("Commission Meeting", "agenda posted", at(2024, 11, 7, 9, 30));
        let first = draft.clone().finalize("example", now);
        let second = draft.finalize("example", now);
        assert_eq!(first, second);
    }

    #[test]
    fn test_serialized_shape() {
        let value = serde_json::to_value(MeetingStatus::Tentative).unwrap();
        assert_eq!(value, json!("tentative"));
        let value = serde_json::to_value(Classification::AdvisoryCommittee).unwrap();
        assert_eq!(value, json!("Advisory Committee"));
    }
}
