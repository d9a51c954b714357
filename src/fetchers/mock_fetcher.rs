use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::Fetcher;
use crate::core::SpiderConfig;
use crate::http::{HttpRequest, HttpResponse};
use crate::ScraperResult;

#[derive(Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
}

/// Serves canned responses in round-robin order.
#[derive(Clone)]
pub struct MockFetcher {
    responses: Arc<Vec<MockResponse>>,
    cursor: Arc<AtomicUsize>,
}

impl MockFetcher {
    pub fn new(responses: Vec<MockResponse>) -> Self {
        Self {
            responses: Arc::new(responses),
            cursor: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(
        &self,
        request: HttpRequest,
        _config: &SpiderConfig,
    ) -> ScraperResult<HttpResponse> {
        let index = self.cursor.fetch_add(1, Ordering::SeqCst);
        let canned = &self.responses[index % self.responses.len()];

        Ok(HttpResponse {
            url: request.url,
            status: canned.status,
            headers: HashMap::new(),
            body: canned.body.clone(),
            timestamp: Utc::now(),
        })
    }

    fn box_clone(&self) -> Box<dyn Fetcher> {
        Box::new(self.clone())
    }
}
