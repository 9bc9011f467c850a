//! Build the ordered news collection.
//!
//! The [`CollectionBuilder`] fetches the listing page once, extracts the
//! candidates and applies the publication policy:
//!
//! 1. drop duplicate URLs, keeping the first occurrence
//! 2. default missing dates to the run timestamp
//! 3. stable sort by publication date, newest first
//! 4. truncate to `max_news`
//! 5. tag the first `home_count` records as home-page featured
//! 6. give unlabelled records the placeholder category of their origin
//! 7. assign ids `"1"..="N"`

use crate::config::SiteConfig;
use crate::error::NewsError;
use crate::models::{NewsCandidate, NewsRecord, Origin};
use crate::scrapers::extract::RecordExtractor;
use crate::scrapers::fetch::FetchPage;
use chrono::{NaiveDateTime, SubsecRound, Utc};
use itertools::Itertools;
use std::cmp::Reverse;
use tracing::{info, instrument};

pub struct CollectionBuilder<F> {
    config: SiteConfig,
    extractor: RecordExtractor,
    fetcher: F,
}

impl<F: FetchPage> CollectionBuilder<F> {
    pub fn new(config: SiteConfig, fetcher: F) -> Result<Self, NewsError> {
        let extractor = RecordExtractor::from_config(&config)?;
        Ok(Self {
            config,
            extractor,
            fetcher,
        })
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Fetch, extract and order the news. An empty vector means the page
    /// had no usable news blocks.
    #[instrument(level = "info", skip_all)]
    pub async fn build(&self) -> Result<Vec<NewsRecord>, NewsError> {
        let listing = self.config.listing()?;
        let html = self.fetcher.fetch(&listing).await?;
        let candidates = self.extractor.extract_html(&html);
        info!(count = candidates.len(), url = %listing, "Found news candidates");

        let run_time = Utc::now().naive_utc().trunc_subsecs(6);
        Ok(finalize(candidates, run_time, &self.config))
    }
}

/// Apply dedupe, date defaulting, ordering, truncation, origin tagging,
/// category defaulting and id assignment to extracted candidates.
pub fn finalize(candidates: Vec<NewsCandidate>, run_time: NaiveDateTime, config: &SiteConfig) -> Vec<NewsRecord> {
    let max_news = config.max_news;
    let total = candidates.len();
    let mut records = candidates
        .into_iter()
        .unique_by(|c| c.url.clone())
        .map(|c| NewsRecord::from_candidate(c, run_time))
        .collect::<Vec<_>>();
    if records.len() < total {
        info!(duplicates = total - records.len(), "Dropped duplicate news links");
    }

    // `sort_by_key` is stable, so equal dates keep extraction order.
    records.sort_by_key(|r| Reverse(r.published_at));

    if records.len() > max_news {
        info!(dropped = records.len() - max_news, max_news, "Truncating news list");
        records.truncate(max_news);
    }

    for (idx, record) in records.iter_mut().enumerate() {
        record.origin = if idx < config.home_count { Origin::Home } else { Origin::Novita };
        if record.category_defaulted {
            record.category = match record.origin {
                Origin::Home => config.home_category.clone(),
                Origin::Novita => config.listing_category.clone(),
            };
        }
        record.id = (idx + 1).to_string();
    }

    let defaulted = records.iter().filter(|r| r.date_defaulted).count();
    info!(count = records.len(), defaulted_dates = defaulted, "Finalized news collection");
    records
}
