use chrono::NaiveDateTime;
use log::warn;
use serde::Deserialize;
use url::Url;

use crate::core::{Spider, SpiderConfig};
use crate::dates::{parse_datetime, DateWindow};
use crate::http::{HttpRequest, HttpResponse};
use crate::items::{Classification, Link, Location, Meeting, MeetingDraft};
use crate::text::split_location;
use crate::ScraperResult;

const CALENDAR_API: &str = "https://cintimha.com/wp-admin/admin-ajax.php";
const CALENDAR_PAGE: &str = "https://cintimha.com/calendar/";
const EVENT_CATEGORY: &str = "executive-office-1466450825";

// The calendar endpoint itself expects epoch bounds, so the window doubles
// as the request horizon.
const EVENT_WINDOW: DateWindow = DateWindow::Surrounding { months: 6 };

const BOARDROOM_STREET: &str = "1635 Western Avenue";

/// One event from the WordPress calendar-events endpoint.
#[derive(Debug, Deserialize)]
struct CalendarEvent {
    title: Option<String>,
    start: Option<String>,
    end: Option<String>,
    #[serde(rename = "allDay", default)]
    all_day: bool,
    #[serde(default)]
    description: String,
    url: Option<String>,
}

pub struct MetroHousingSpider {
    config: SpiderConfig,
}

impl MetroHousingSpider {
    pub fn new() -> Self {
        Self {
            config: SpiderConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SpiderConfig) -> Self {
        self.config = config;
        self
    }
}

impl Default for MetroHousingSpider {
    fn default() -> Self {
        Self::new()
    }
}

/// The boardroom's street address is written a different way in nearly
/// every event, so it gets a canonical rendering before the generic split
/// is attempted.
fn event_location(text: &str) -> Location {
    if text.contains(BOARDROOM_STREET) {
        Location {
            name: "CMHA Boardroom".to_string(),
            address: "1635 Western Ave, Cincinnati, OH 45214".to_string(),
        }
    } else {
        split_location(text)
    }
}

fn event_links(url: Option<String>) -> Vec<Link> {
    match url {
        Some(href) => vec![Link {
            title: "Event Link".to_string(),
            href,
        }],
        None => Vec::new(),
    }
}

impl Spider for MetroHousingSpider {
    fn name(&self) -> &'static str {
        "cinoh_metro_housing_authority"
    }

    fn agency(&self) -> &'static str {
        "Cincinnati Metro Housing Authority"
    }

    fn timezone(&self) -> &'static str {
        "America/New_York"
    }

    fn config(&self) -> &SpiderConfig {
        &self.config
    }

    fn start_requests(&self, now: NaiveDateTime) -> Vec<HttpRequest> {
        let (earliest, latest) = EVENT_WINDOW.bounds(now);
        let start_date = earliest.unwrap_or(now).and_utc().timestamp();
        let end_date = latest.unwrap_or(now).and_utc().timestamp();
        let url = format!(
            "{}?action=get_calendar_events&noheader=true&start_date={}&end_date={}\
             &show_expired=true&event_category_id={}",
            CALENDAR_API, start_date, end_date, EVENT_CATEGORY
        );

        vec![HttpRequest::get(Url::parse(&url).expect("calendar URL"))]
    }

    fn parse(&self, response: &HttpResponse, now: NaiveDateTime) -> ScraperResult<Vec<Meeting>> {
        let events: Vec<CalendarEvent> = response.json()?;

        let mut meetings = Vec::new();
        for event in events {
            let Some(title) = event.title else {
                warn!("{}: dropping an event without a title", self.name());
                continue;
            };
            let Some(start) = event.start.as_deref().and_then(parse_datetime) else {
                warn!(
                    "{}: dropping \"{}\", no parseable start",
                    self.name(),
                    title
                );
                continue;
            };

            let draft = MeetingDraft {
                description: event.description.replace('\n', ""),
                location: event_location(&event.description),
                links: event_links(event.url),
                title,
                classification: Classification::Commission,
                start,
                end: event.end.as_deref().and_then(parse_datetime),
                all_day: event.all_day,
                time_notes: String::new(),
                source: CALENDAR_PAGE.to_string(),
            };
            meetings.push(draft.finalize(self.name(), now));
        }
        Ok(meetings)
    }
}
