use chrono::NaiveDateTime;
use log::warn;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::core::{Spider, SpiderConfig};
use crate::dates::parse_date;
use crate::http::{HttpRequest, HttpResponse};
use crate::items::{Classification, Link, Location, Meeting, MeetingDraft};
use crate::ScraperResult;

const AGENDA_CENTER: &str = "https://www.hcdoes.org/AgendaCenter/";
const SITE_BASE: &str = "https://www.hcdoes.org/";

// Every agenda on record convenes at 3 pm; the listing only carries dates.
const MEETING_HOUR: u32 = 15;

pub struct SolidWasteSpider {
    config: SpiderConfig,
}

impl SolidWasteSpider {
    pub fn new() -> Self {
        Self {
            config: SpiderConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SpiderConfig) -> Self {
        self.config = config;
        self
    }

    fn fixed_location() -> Location {
        Location {
            name: "Hamilton County Environmental Services".to_string(),
            address: "250 William Howard Taft Road, First Floor, Cincinnati, OH 45219"
                .to_string(),
        }
    }

    /// The row's `strong` label reads "Agenda for {date}".
    fn row_start(row: &ElementRef, label_selector: &Selector) -> Option<NaiveDateTime> {
        let label = row.select(label_selector).next()?.value().attr("aria-label")?;
        let (_, date) = label.split_once(" for ")?;
        parse_date(date).and_then(|date| date.and_hms_opt(MEETING_HOUR, 0, 0))
    }

    fn row_links(row: &ElementRef, link_selector: &Selector, base: &Url) -> Vec<Link> {
        let mut links = Vec::new();
        for anchor in row.select(link_selector) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            let Ok(absolute) = base.join(href) else {
                continue;
            };
            links.push(Link {
                title: anchor
                    .value()
                    .attr("aria-label")
                    .unwrap_or_default()
                    .to_string(),
                href: absolute.to_string(),
            });
        }
        links
    }
}

impl Default for SolidWasteSpider {
    fn default() -> Self {
        Self::new()
    }
}

impl Spider for SolidWasteSpider {
    fn name(&self) -> &'static str {
        "cinoh_hamilton_solid_waste"
    }

    fn agency(&self) -> &'static str {
        "Hamilton County Solid Waste Policy Committee"
    }

    fn timezone(&self) -> &'static str {
        "America/New_York"
    }

    fn config(&self) -> &SpiderConfig {
        &self.config
    }

    fn start_requests(&self, _now: NaiveDateTime) -> Vec<HttpRequest> {
        vec![HttpRequest::get(Url::parse(AGENDA_CENTER).expect("static URL"))]
    }

    fn parse(&self, response: &HttpResponse, now: NaiveDateTime) -> ScraperResult<Vec<Meeting>> {
        let document = Html::parse_document(&response.body);
        let row_selector = Selector::parse("tbody tr").unwrap();
        let label_selector = Selector::parse("strong").unwrap();
        let link_selector = Selector::parse(".minutes a, .media a, .popout a").unwrap();
        let base = Url::parse(SITE_BASE).expect("static URL");

        let mut meetings = Vec::new();
        for row in document.select(&row_selector) {
            let Some(start) = Self::row_start(&row, &label_selector) else {
                warn!("{}: dropping a row without a meeting date", self.name());
                continue;
            };

            let draft = MeetingDraft {
                title: "Solid Waste Policy Committee".to_string(),
                description: String::new(),
                classification: Classification::Committee,
                start,
                end: None,
                all_day: false,
                time_notes: String::new(),
                location: Self::fixed_location(),
                links: Self::row_links(&row, &link_selector, &base),
                source: response.url.to_string(),
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

    const FIXTURE: &str = include_str!("fixtures/solid_waste_agenda_center.html");

    fn frozen_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 11, 6)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn fixture_response() -> HttpResponse {
        HttpResponse {
            url: Url::parse(AGENDA_CENTER).unwrap(),
            status: 200,
            headers: Default::default(),
            body: FIXTURE.to_string(),
            timestamp: chrono::Utc::now(),
        }
    }

    fn parsed_items() -> Vec<Meeting> {
        SolidWasteSpider::new()
            .parse(&fixture_response(), frozen_now())
            .unwrap()
    }

    #[test]
    fn test_count_drops_rows_without_dates() {
        // Three body rows in the fixture; the filter-control row has no
        // "Agenda for ..." label.
        assert_eq!(parsed_items().len(), 2);
    }

    #[test]
    fn test_title_is_fixed() {
        assert!(parsed_items()
            .iter()
            .all(|item| item.title == "Solid Waste Policy Committee"));
    }

    #[test]
    fn test_start_is_three_pm() {
        let items = parsed_items();
        assert_eq!(
            items[0].start,
            NaiveDate::from_ymd_opt(2025, 1, 9)
                .unwrap()
                .and_hms_opt(15, 0, 0)
                .unwrap()
        );
        assert_eq!(
            items[1].start,
            NaiveDate::from_ymd_opt(2024, 10, 10)
                .unwrap()
                .and_hms_opt(15, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_status() {
        let items = parsed_items();
        assert_eq!(items[0].status, MeetingStatus::Tentative);
        assert_eq!(items[1].status, MeetingStatus::Passed);
    }

    #[test]
    fn test_links_are_absolute() {
        let items = parsed_items();
        assert_eq!(
            items[0].links,
            vec![
                Link {
                    title: "Download January 9, 2025 Agenda".to_string(),
                    href: "https://www.hcdoes.org/AgendaCenter/ViewFile/Agenda/_01092025-214"
                        .to_string(),
                },
                Link {
                    title: "Minutes for January 9, 2025".to_string(),
                    href: "https://www.hcdoes.org/AgendaCenter/ViewFile/Minutes/_01092025-214"
                        .to_string(),
                },
            ]
        );
        assert_eq!(items[1].links.len(), 2);
    }

    #[test]
    fn test_location_is_fixed() {
        assert_eq!(parsed_items()[0].location, SolidWasteSpider::fixed_location());
    }

    #[test]
    fn test_classification() {
        assert_eq!(parsed_items()[0].classification, Classification::Committee);
    }

    #[test]
    fn test_source_is_fetched_url() {
        assert_eq!(parsed_items()[0].source, AGENDA_CENTER);
    }

    #[test]
    fn test_id() {
        assert_eq!(
            parsed_items()[0].id,
            "cinoh_hamilton_solid_waste/202501091500/x/solid_waste_policy_committee"
        );
    }
}
