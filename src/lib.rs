pub mod core;
pub mod dates;
pub mod fetchers;
pub mod http;
pub mod items;
pub mod sinks;
pub mod spiders;
pub mod stats;
pub mod text;

pub use crate::core::{Crawler, ScraperError, ScraperResult, Spider, SpiderConfig};
pub use crate::fetchers::{Fetcher, HttpFetcher};
pub use crate::http::{HttpRequest, HttpResponse};
pub use crate::items::{Meeting, MeetingStatus};
pub use crate::sinks::MeetingSink;
pub use crate::stats::StatsTracker;
