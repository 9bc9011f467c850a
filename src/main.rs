//! # Gorla News
//!
//! A periodic ingestion job that scrapes the "Novità" listing of the Gorla
//! Minore municipal website and publishes it as a JSON feed for the
//! Gorlanews front-end.
//!
//! ## Usage
//!
//! ```sh
//! gorla_news
//! gorla_news --config gorla_news.yaml --output public/news.json
//! ```
//!
//! ## Architecture
//!
//! The job is a single sequential pipeline:
//! 1. **Fetching**: Download the listing page once, with a timeout
//! 2. **Extraction**: Read news blocks with the configured layout strategy
//! 3. **Ordering**: Dedupe, sort newest first, truncate, tag home news, assign ids
//! 4. **Output**: Overwrite the JSON feed
//!
//! A run that finds no news leaves the previous feed untouched. A failed
//! fetch aborts the run before anything is written.

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod collection;
mod config;
mod dates;
mod error;
mod models;
mod outputs;
mod scrapers;
mod utils;

use cli::Cli;
use collection::CollectionBuilder;
use config::SiteConfig;
use error::NewsError;
use models::Origin;
use outputs::json;
use scrapers::fetch::{FetchPage, HttpFetcher};
use utils::truncate_for_log;

/// How a run ended when it did not fail.
#[derive(Debug, PartialEq, Eq)]
enum RunOutcome {
    /// The feed was rewritten with this many records.
    Written(usize),
    /// No news blocks were found; nothing was written.
    Empty,
}

/// Fetch, order and persist the news feed described by `config`.
#[instrument(level = "info", skip_all, fields(output = %config.output_path.display()))]
async fn run_update<F: FetchPage>(config: SiteConfig, fetcher: F) -> Result<RunOutcome, NewsError> {
    let builder = CollectionBuilder::new(config, fetcher)?;
    let records = builder.build().await?;

    if records.is_empty() {
        info!("No news found; keeping the existing feed");
        return Ok(RunOutcome::Empty);
    }

    for record in records.iter().filter(|r| r.origin == Origin::Home) {
        debug!(id = %record.id, title = %truncate_for_log(&record.title, 80), "Home news");
    }

    let path = &builder.config().output_path;
    json::write_news(&records, path).await?;
    info!(count = records.len(), path = %path.display(), "Saved news feed");
    Ok(RunOutcome::Written(records.len()))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("gorla_news starting up");

    let args = Cli::parse();
    debug!(?args.config, ?args.output, "Parsed CLI arguments");

    let mut config = SiteConfig::load(args.config.as_deref()).await?;
    if let Some(output) = args.output {
        config.output_path = output;
    }
    info!(
        listing = %config.listing_url,
        max_news = config.max_news,
        home_count = config.home_count,
        layout = config.layout.name(),
        "Configuration ready"
    );

    let fetcher = HttpFetcher::new(config.timeout(), &config.user_agent)?;
    let outcome = match run_update(config, fetcher).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(error = %e, "News update failed; feed not written");
            return Err(e.into());
        }
    };

    let elapsed = start_time.elapsed();
    info!(
        ?outcome,
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewsRecord;
    use crate::scrapers::fetch::tests::{serve_once, serve_silently};
    use std::path::Path;
    use std::time::Duration;

    const LISTING: &str = r#"<html><body>
        <div class="card"><h3 class="card-title"><a href="/novita/mercato">Mercato settimanale</a></h3><span class="data">05/03/2026</span></div>
        <div class="card"><h3 class="card-title"><a href="/novita/biblioteca">Orari biblioteca</a></h3><span class="data">01/03/2026</span></div>
        <div class="card"><h3 class="card-title"><a href="/novita/elezioni">Elezioni comunali</a></h3><span class="data">10/03/2026</span></div>
        <div class="card"><p>Nessun titolo qui</p></div>
    </body></html>"#;

    fn config_for(url: &url::Url, output: &Path) -> SiteConfig {
        SiteConfig {
            base_url: url.origin().ascii_serialization(),
            listing_url: url.path().to_string(),
            home_count: 2,
            output_path: output.to_path_buf(),
            ..SiteConfig::default()
        }
    }

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(Duration::from_secs(5), "gorla_news-test").unwrap()
    }

    #[tokio::test]
    async fn test_run_writes_ordered_feed() {
        let url = serve_once("200 OK", LISTING).await;
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("news.json");

        let outcome = run_update(config_for(&url, &output), fetcher()).await.unwrap();
        assert_eq!(outcome, RunOutcome::Written(3));

        let feed: Vec<NewsRecord> =
            serde_json::from_str(&tokio::fs::read_to_string(&output).await.unwrap()).unwrap();
        let titles: Vec<&str> = feed.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["Elezioni comunali", "Mercato settimanale", "Orari biblioteca"]);
        let ids: Vec<&str> = feed.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
        let origins: Vec<Origin> = feed.iter().map(|r| r.origin).collect();
        assert_eq!(origins, [Origin::Home, Origin::Home, Origin::Novita]);
        assert!(feed.iter().all(|r| r.url.starts_with(&url.origin().ascii_serialization())));
    }

    #[tokio::test]
    async fn test_server_error_leaves_feed_untouched() {
        let url = serve_once("500 Internal Server Error", "errore").await;
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("news.json");
        tokio::fs::write(&output, "[\"previous\"]").await.unwrap();

        let result = run_update(config_for(&url, &output), fetcher()).await;
        assert!(matches!(result, Err(NewsError::Http(_))));
        assert_eq!(tokio::fs::read_to_string(&output).await.unwrap(), "[\"previous\"]");
    }

    #[tokio::test]
    async fn test_timeout_leaves_feed_untouched() {
        let url = serve_silently().await;
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("news.json");
        tokio::fs::write(&output, "[\"previous\"]").await.unwrap();

        let config = SiteConfig {
            timeout_secs: 1,
            ..config_for(&url, &output)
        };
        let fetcher = HttpFetcher::new(config.timeout(), "gorla_news-test").unwrap();
        match run_update(config, fetcher).await {
            Err(NewsError::Http(e)) => assert!(e.is_timeout(), "{e}"),
            other => panic!("expected a timeout, got {other:?}"),
        }
        assert_eq!(tokio::fs::read_to_string(&output).await.unwrap(), "[\"previous\"]");
    }

    #[tokio::test]
    async fn test_server_error_creates_no_file() {
        let url = serve_once("503 Service Unavailable", "").await;
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("news.json");

        assert!(run_update(config_for(&url, &output), fetcher()).await.is_err());
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_no_news_writes_nothing() {
        let url = serve_once("200 OK", "<html><body><p>Pagina in manutenzione</p></body></html>").await;
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("news.json");

        let outcome = run_update(config_for(&url, &output), fetcher()).await.unwrap();
        assert_eq!(outcome, RunOutcome::Empty);
        assert!(!output.exists());
    }
}
