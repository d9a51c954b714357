mod crawler;
mod errors;
mod spider;

pub use crawler::Crawler;
pub use errors::{ScraperError, ScraperResult};
pub use spider::{Spider, SpiderConfig};
