use muniscrape::sinks::JsonLinesSink;
use muniscrape::spiders::{CivilServiceSpider, MetroHousingSpider, SolidWasteSpider};
use muniscrape::{Crawler, HttpFetcher, ScraperResult, SpiderConfig};

#[tokio::main]
async fn main() -> ScraperResult<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .filter_module("selectors", log::LevelFilter::Warn)
        .filter_module("html5ever", log::LevelFilter::Error)
        .init();

    let config = SpiderConfig::default().with_concurrency(4);

    let crawler = Crawler::new(Box::new(HttpFetcher::new()?));
    let mut sink = JsonLinesSink::new(std::io::stdout());

    let civil_service = CivilServiceSpider::new().with_config(config.clone());
    let metro_housing = MetroHousingSpider::new().with_config(config.clone());
    let solid_waste = SolidWasteSpider::new().with_config(config);

    crawler.run(&civil_service, &mut sink).await?;
    crawler.run(&metro_housing, &mut sink).await?;
    crawler.run(&solid_waste, &mut sink).await?;

    crawler.stats().finish();
    crawler.stats().print_summary();

    Ok(())
}
