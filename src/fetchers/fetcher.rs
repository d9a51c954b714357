use async_trait::async_trait;

use crate::core::SpiderConfig;
use crate::http::{HttpRequest, HttpResponse};
use crate::ScraperResult;

/// Executes one already-built request. Everything above this trait only
/// transforms payloads; client policy (TLS, proxies, user agents) lives
/// behind it.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, request: HttpRequest, config: &SpiderConfig)
        -> ScraperResult<HttpResponse>;

    fn box_clone(&self) -> Box<dyn Fetcher>;
}
