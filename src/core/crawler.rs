use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use futures::stream::{FuturesUnordered, StreamExt};
use log::{debug, info, warn};
use tokio::spawn;

use crate::fetchers::Fetcher;
use crate::sinks::MeetingSink;
use crate::stats::StatsTracker;
use crate::{ScraperResult, Spider};

pub struct Crawler {
    fetcher: Box<dyn Fetcher>,
    stats: Arc<StatsTracker>,
}

impl Crawler {
    pub fn new(fetcher: Box<dyn Fetcher>) -> Self {
        info!("Initializing crawler");
        Self {
            fetcher,
            stats: Arc::new(StatsTracker::new()),
        }
    }

    pub fn stats(&self) -> &StatsTracker {
        &self.stats
    }

    /// Run `spider` against the live clock.
    pub async fn run<S: Spider>(&self, spider: &S, sink: &mut dyn MeetingSink) -> ScraperResult<()> {
        self.run_at(spider, sink, Local::now().naive_local()).await
    }

    /// Run `spider` with an explicit reference time.
    ///
    /// Every meeting the spider yields is forwarded to `sink` as it is
    /// produced. A failed request or an unparseable payload drops that
    /// response and the run continues; only a sink failure ends it.
    pub async fn run_at<S: Spider>(
        &self,
        spider: &S,
        sink: &mut dyn MeetingSink,
        now: NaiveDateTime,
    ) -> ScraperResult<()> {
        info!(
            "Starting spider: {} ({}, {})",
            spider.name(),
            spider.agency(),
            spider.timezone()
        );

        let mut futures = FuturesUnordered::new();
        let mut pending = spider.start_requests(now).into_iter();

        loop {
            while futures.len() < spider.config().max_concurrency {
                let Some(request) = pending.next() else { break };
                debug!("Fetching {} {}", request.method, request.url);
                let fetcher = self.fetcher.box_clone();
                let config = spider.config().clone();
                futures.push(spawn(async move { fetcher.fetch(request, &config).await }));
            }

            let Some(joined) = futures.next().await else { break };

            match joined {
                Ok(Ok(response)) => {
                    self.stats.record_request(response.status, response.body.len());
                    match spider.parse(&response, now) {
                        Ok(meetings) => {
                            debug!(
                                "{}: {} meetings from {}",
                                spider.name(),
                                meetings.len(),
                                response.url
                            );
                            for meeting in meetings {
                                self.stats.record_meeting(&meeting);
                                sink.emit(meeting)?;
                            }
                        }
                        Err(e) => {
                            self.stats.record_parse_error();
                            warn!("{}: failed to parse {}: {}", spider.name(), response.url, e);
                        }
                    }
                }
                Ok(Err(e)) => {
                    self.stats.record_transport_error();
                    warn!("{}: request failed: {}", spider.name(), e);
                }
                Err(e) => warn!("Task error: {}", e),
            }
        }

        info!("Spider {} completed", spider.name());
        Ok(())
    }
}
