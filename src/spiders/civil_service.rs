use chrono::NaiveDateTime;
use log::warn;
use serde::Deserialize;
use url::Url;

use crate::core::{Spider, SpiderConfig};
use crate::dates::DateWindow;
use crate::http::{HttpRequest, HttpResponse};
use crate::items::{Classification, Link, Location, Meeting, MeetingDraft};
use crate::ScraperResult;

// The public board page drives its meetings tab from this endpoint; we
// query it directly instead of rendering the page.
const MEETINGS_API: &str = "https://go.boarddocs.com/oh/csc/Board.nsf/BD-GetMeetingsList";
const BOARD_PAGE: &str = "https://go.boarddocs.com/oh/csc/Board.nsf/vpublic?open#tab-meetings";
const AGENDA_API: &str = "https://go.boarddocs.com/oh/csc/Board.nsf/Download-AgendaDetailed";
const COMMITTEE_ID: &str = "A9HCN931D6BA";

const MEETING_WINDOW: DateWindow = DateWindow::CurrentYear;

/// Rows returned by the BoardDocs meetings-list endpoint. Only the fields
/// the scraper reads are modeled; the rest of the payload is ignored.
#[derive(Debug, Deserialize)]
struct BoardDocsRow {
    name: Option<String>,
    numberdate: Option<String>,
    unique: Option<String>,
}

pub struct CivilServiceSpider {
    config: SpiderConfig,
}

impl CivilServiceSpider {
    pub fn new() -> Self {
        Self {
            config: SpiderConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SpiderConfig) -> Self {
        self.config = config;
        self
    }

    fn agenda_links(row: &BoardDocsRow) -> Vec<Link> {
        match &row.unique {
            Some(unique) => vec![Link {
                title: "Agenda".to_string(),
                href: format!(
                    "{}?open&id={}&current_committee_id={}",
                    AGENDA_API, unique, COMMITTEE_ID
                ),
            }],
            None => Vec::new(),
        }
    }
}

impl Default for CivilServiceSpider {
    fn default() -> Self {
        Self::new()
    }
}

impl Spider for CivilServiceSpider {
    fn name(&self) -> &'static str {
        "cinoh_civil_service"
    }

    fn agency(&self) -> &'static str {
        "Cincinnati Civil Service Commission"
    }

    fn timezone(&self) -> &'static str {
        "America/Chicago"
    }

    fn config(&self) -> &SpiderConfig {
        &self.config
    }

    fn start_requests(&self, _now: NaiveDateTime) -> Vec<HttpRequest> {
        vec![HttpRequest::post(Url::parse(MEETINGS_API).expect("static URL"))
            .with_form(&[("current_committee_id", COMMITTEE_ID)])]
    }

    fn parse(&self, response: &HttpResponse, now: NaiveDateTime) -> ScraperResult<Vec<Meeting>> {
        let rows: Vec<BoardDocsRow> = response.json()?;

        let mut meetings = Vec::new();
        for row in rows {
            let Some(start) = MEETING_WINDOW.admit(row.numberdate.as_deref(), now) else {
                continue;
            };
            let links = Self::agenda_links(&row);
            let Some(title) = row.name else {
                warn!("{}: dropping a row without a meeting name", self.name());
                continue;
            };

            let draft = MeetingDraft {
                title,
                description: String::new(),
                classification: Classification::Commission,
                start,
                end: None,
                all_day: false,
                time_notes: String::new(),
                location: Location {
                    name: "Cincinnati Civil Service Commission".to_string(),
                    address: "805 Central Ave, Suite 200, Cincinnati, OH 45202".to_string(),
                },
                links,
                // The API itself is not navigable; point people at the
                // public board page instead.
                source: BOARD_PAGE.to_string(),
            };
            meetings.push(draft.finalize(self.name(), now));
        }
        Ok(meetings)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::items::MeetingStatus;

    const FIXTURE: &str = include_str!("fixtures/civil_service_meetings.json");

    fn fixture_response() -> HttpResponse {
        HttpResponse {
            url: Url::parse(MEETINGS_API).unwrap(),
            status: 200,
            headers: Default::default(),
            body: FIXTURE.to_string(),
            timestamp: chrono::Utc::now(),
        }
    }

    fn frozen_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 11, 6)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn parsed_items() -> Vec<Meeting> {
        CivilServiceSpider::new()
            .parse(&fixture_response(), frozen_now())
            .unwrap()
    }

    #[test]
    fn test_count_keeps_current_year_only() {
        // 14 rows in the fixture: one from 2023 and one with no date.
        assert_eq!(parsed_items().len(), 12);
    }

    #[test]
    fn test_title() {
        assert_eq!(
            parsed_items()[0].title,
            "November 7, 2024 Civil Service Commission"
        );
    }

    #[test]
    fn test_description() {
        assert_eq!(parsed_items()[0].description, "");
    }

    #[test]
    fn test_start() {
        assert_eq!(
            parsed_items()[0].start,
            NaiveDate::from_ymd_opt(2024, 11, 7)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_end() {
        assert_eq!(parsed_items()[0].end, None);
    }

    #[test]
    fn test_time_notes() {
        assert_eq!(parsed_items()[0].time_notes, "");
    }

    #[test]
    fn test_id() {
        assert_eq!(
            parsed_items()[0].id,
            "cinoh_civil_service/202411070000/x/november_7_2024_civil_service_commission"
        );
    }

    #[test]
    fn test_status() {
        let items = parsed_items();
        assert_eq!(items[0].status, MeetingStatus::Tentative);
        for item in &items {
            if item.start < frozen_now() {
                assert_eq!(item.status, MeetingStatus::Passed, "{}", item.id);
            }
        }
    }

    #[test]
    fn test_location() {
        assert_eq!(
            parsed_items()[0].location,
            Location {
                name: "Cincinnati Civil Service Commission".to_string(),
                address: "805 Central Ave, Suite 200, Cincinnati, OH 45202".to_string(),
            }
        );
    }

    #[test]
    fn test_source() {
        assert_eq!(
            parsed_items()[0].source,
            "https://go.boarddocs.com/oh/csc/Board.nsf/vpublic?open#tab-meetings"
        );
    }

    #[test]
    fn test_links() {
        assert_eq!(
            parsed_items()[0].links,
            vec![Link {
                title: "Agenda".to_string(),
                href: "https://go.boarddocs.com/oh/csc/Board.nsf/Download-AgendaDetailed?open&id=CZQLFH5631AD&current_committee_id=A9HCN931D6BA".to_string(),
            }]
        );
    }

    #[test]
    fn test_classification() {
        assert_eq!(parsed_items()[0].classification, Classification::Commission);
    }

    #[test]
    fn test_all_day() {
        assert!(parsed_items().iter().all(|item| !item.all_day));
    }

    #[test]
    fn test_start_requests_post_form() {
        let requests = CivilServiceSpider::new().start_requests(frozen_now());
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, reqwest::Method::POST);
        assert_eq!(
            requests[0].form,
            Some(vec![(
                "current_committee_id".to_string(),
                "A9HCN931D6BA".to_string()
            )])
        );
    }
}
