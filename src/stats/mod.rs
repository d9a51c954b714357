use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;

use crate::items::Meeting;

#[derive(Debug, Clone, Serialize)]
pub struct ScrapeStats {
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub total_requests: usize,
    pub successful_requests: usize,
    pub failed_requests: usize,
    pub bytes_downloaded: usize,
    pub parse_errors: usize,
    pub meetings_scraped: usize,
    pub status_counts: HashMap<String, usize>,
}

#[derive(Debug, Clone)]
pub struct StatsTracker {
    stats: Arc<RwLock<ScrapeStats>>,
}

impl StatsTracker {
    pub fn new() -> Self {
        Self {
            stats: Arc::new(RwLock::new(ScrapeStats {
                start_time: Utc::now(),
                end_time: None,
                total_requests: 0,
                successful_requests: 0,
                failed_requests: 0,
                bytes_downloaded: 0,
                parse_errors: 0,
                meetings_scraped: 0,
                status_counts: HashMap::new(),
            })),
        }
    }

    pub fn record_request(&self, status: u16, size: usize) {
        let mut stats = self.stats.write();
        stats.total_requests += 1;
        if status < 400 {
            stats.successful_requests += 1;
        } else {
            stats.failed_requests += 1;
        }
        stats.bytes_downloaded += size;
    }

    pub fn record_transport_error(&self) {
        let mut stats = self.stats.write();
        stats.total_requests += 1;
        stats.failed_requests += 1;
    }

    pub fn record_parse_error(&self) {
        self.stats.write().parse_errors += 1;
    }

    pub fn record_meeting(&self, meeting: &Meeting) {
        let mut stats = self.stats.write();
        stats.meetings_scraped += 1;
        *stats
            .status_counts
            .entry(meeting.status.to_string())
            .or_insert(0) += 1;
    }

    pub fn finish(&self) {
        self.stats.write().end_time = Some(Utc::now());
    }

    pub fn get_stats(&self) -> ScrapeStats {
        self.stats.read().clone()
    }

    pub fn print_summary(&self) {
        let stats = self.stats.read();
        let duration = stats
            .end_time
            .unwrap_or_else(Utc::now)
            .signed_duration_since(stats.start_time);

        println!("\nScraping Statistics:");
        println!("===================");
        println!("Duration: {} seconds", duration.num_seconds());
        println!("Total Requests: {}", stats.total_requests);
        println!("Successful Requests: {}", stats.successful_requests);
        println!("Failed Requests: {}", stats.failed_requests);
        println!("Parse Errors: {}", stats.parse_errors);
        println!("Meetings Scraped: {}", stats.meetings_scraped);
        println!(
            "Data Downloaded: {:.2} MB",
            stats.bytes_downloaded as f64 / 1_000_000.0
        );

        if !stats.status_counts.is_empty() {
            println!("\nMeeting Statuses:");
            for (status, count) in &stats.status_counts {
                println!("  {}: {}", status, count);
            }
        }
    }
}

impl Default for StatsTracker {
    fn default() -> Self {
        Self::new()
    }
}
