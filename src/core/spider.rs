use chrono::NaiveDateTime;

use crate::http::{HttpRequest, HttpResponse};
use crate::items::Meeting;
use crate::ScraperResult;

const DEFAULT_CONCURRENCY: usize = 4;

#[derive(Debug, Clone)]
pub struct SpiderConfig {
    pub max_concurrency: usize,
    pub headers: Vec<(String, String)>,
}

impl Default for SpiderConfig {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_CONCURRENCY,
            headers: Vec::new(),
        }
    }
}

impl SpiderConfig {
    pub fn with_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    pub fn with_headers(mut self, headers: Vec<(&str, &str)>) -> Self {
        self.headers = headers
            .into_iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        self
    }
}

/// One public-meetings source: which requests to issue and how to turn a
/// fetched payload into normalized [`Meeting`] records.
///
/// `parse` is synchronous and side-effect free. The reference time is
/// injected at both call sites so window filtering and status derivation
/// are reproducible under test.
pub trait Spider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Human-readable name of the governmental body.
    fn agency(&self) -> &'static str;

    /// IANA timezone the source publishes times in.
    fn timezone(&self) -> &'static str {
        "America/New_York"
    }

    fn config(&self) -> &SpiderConfig;

    fn start_requests(&self, now: NaiveDateTime) -> Vec<HttpRequest>;

    fn parse(&self, response: &HttpResponse, now: NaiveDateTime) -> ScraperResult<Vec<Meeting>>;
}
