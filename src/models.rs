//! Data models for scraped news blocks and the published feed.
//!
//! - [`NewsCandidate`]: one news block as read from the listing markup
//! - [`NewsRecord`]: a finalized entry of the JSON feed
//! - [`Origin`]: home-page spotlight vs. general listing tag
//!
//! The JSON field names (`titolo`, `dataPubblicazione`, ...) are the contract
//! with the Gorlanews front-end and must not change.

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Where a record is shown by the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Featured in the home-page spotlight.
    Home,
    /// General "Novità" listing only.
    Novita,
}

/// A news block extracted from the listing page, before ordering.
///
/// `published` and `category` stay `None` when the block carried no usable
/// value; the collection builder decides the defaults once ordering and
/// origin are known.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsCandidate {
    pub title: String,
    pub url: String,
    pub published: Option<NaiveDateTime>,
    /// Category label of the block, `None` when the block has none.
    pub category: Option<String>,
    /// Absolute image URL, or empty when the block has no image.
    pub image: String,
}

/// One entry of the persisted news feed.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NewsRecord {
    #[serde(rename = "titolo")]
    pub title: String,
    pub url: String,
    #[serde(
        rename = "dataPubblicazione",
        serialize_with = "serialize_timestamp",
        deserialize_with = "deserialize_timestamp"
    )]
    pub published_at: NaiveDateTime,
    /// `true` when `published_at` is the run timestamp rather than a date
    /// read from the page.
    #[serde(skip)]
    pub date_defaulted: bool,
    #[serde(rename = "origine")]
    pub origin: Origin,
    #[serde(rename = "categoria")]
    pub category: String,
    /// `true` when `category` is the origin placeholder rather than a label
    /// read from the page.
    #[serde(skip)]
    pub category_defaulted: bool,
    #[serde(rename = "immagine")]
    pub image: String,
    pub id: String,
}

impl NewsRecord {
    /// Build a record from a candidate, falling back to `run_time` when the
    /// candidate has no publication date. `origin`, `id` and a missing
    /// `category` are placeholders until the builder assigns them by position.
    pub fn from_candidate(candidate: NewsCandidate, run_time: NaiveDateTime) -> Self {
        Self {
            title: candidate.title,
            url: candidate.url,
            published_at: candidate.published.unwrap_or(run_time),
            date_defaulted: candidate.published.is_none(),
            origin: Origin::Novita,
            category_defaulted: candidate.category.is_none(),
            category: candidate.category.unwrap_or_default(),
            image: candidate.image,
            id: String::new(),
        }
    }
}

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Whole seconds print without a fraction, anything else with exactly six
/// fractional digits.
fn serialize_timestamp<S: Serializer>(dt: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
    let format = if dt.nanosecond() == 0 {
        "%Y-%m-%dT%H:%M:%S"
    } else {
        "%Y-%m-%dT%H:%M:%S%.6f"
    };
    s.collect_str(&dt.format(format))
}

fn deserialize_timestamp<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
    let raw = String::deserialize(d)?;
    NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
}
