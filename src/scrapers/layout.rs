//! Named block-selection strategies for the listing page.
//!
//! Municipal sites change their markup often, so each known page layout is a
//! [`Layout`] variant with its own selector set. Supporting a new layout means
//! adding a variant here; the extractor itself stays the same.
//!
//! | Layout | Candidate blocks | Notes |
//! |--------|------------------|-------|
//! | [`Layout::Cards`] | `div.card`, `article.card` | Bootstrap Italia cards, the precise strategy |
//! | [`Layout::Anchors`] | `a[href*="/novita/"]` | Fields are read from the nearest enclosing container |
//! | [`Layout::Generic`] | `article`, `li`, `div.card`, `div.novita-item` | Broad structural fallback |

use crate::error::NewsError;
use scraper::Selector;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    Cards,
    Anchors,
    Generic,
}

/// One step of the prioritized title lookup.
#[derive(Debug)]
pub enum TitleLookup {
    /// First descendant of the block matching the selector.
    Select(Selector),
    /// The candidate block itself (used when blocks are anchors).
    Block,
}

/// Compiled selectors for a [`Layout`].
#[derive(Debug)]
pub struct LayoutSelectors {
    pub blocks: Selector,
    /// Tried in order; the first lookup yielding a title and a link wins.
    pub titles: Vec<TitleLookup>,
    pub date: Selector,
    pub category: Selector,
    pub image: Selector,
    /// Tags of the enclosing container searched for date, category and
    /// image. Empty means the block itself is searched.
    pub container_tags: &'static [&'static str],
}

fn parse(selector: &str) -> Result<Selector, NewsError> {
    Selector::parse(selector).map_err(|e| NewsError::Selector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

fn select_all(selectors: &[&str]) -> Result<Vec<TitleLookup>, NewsError> {
    selectors
        .iter()
        .map(|s| parse(s).map(TitleLookup::Select))
        .collect()
}

impl Layout {
    pub fn name(self) -> &'static str {
        match self {
            Layout::Cards => "cards",
            Layout::Anchors => "anchors",
            Layout::Generic => "generic",
        }
    }

    /// Compile the selector set for this layout.
    pub fn selectors(self) -> Result<LayoutSelectors, NewsError> {
        match self {
            Layout::Cards => Ok(LayoutSelectors {
                blocks: parse("div.card, article.card")?,
                titles: select_all(&[
                    ".card-title a[href]",
                    ".card-title",
                    "h3 a[href]",
                    "h2 a[href]",
                    "a[href]",
                ])?,
                date: parse("span.data, .card-date, time, .data, .date")?,
                category: parse(".category, .categoria, .badge, .tag")?,
                image: parse("img")?,
                container_tags: &[],
            }),
            Layout::Anchors => {
                let mut titles = select_all(&["h2", "h3", "h4", ".card-title"])?;
                titles.push(TitleLookup::Block);
                Ok(LayoutSelectors {
                    blocks: parse(r#"a[href*="/novita/"]"#)?,
                    titles,
                    date: parse("time, .data, .date")?,
                    category: parse(".categoria, .category, .tag, .badge")?,
                    image: parse("img")?,
                    container_tags: &["article", "li", "div"],
                })
            }
            Layout::Generic => Ok(LayoutSelectors {
                blocks: parse("article, li, div.card, div.novita-item")?,
                titles: select_all(&["h2 a[href]", "h3 a[href]", "a, h2, h3", "a[href]"])?,
                date: parse("time, .data, .date")?,
                category: parse(".categoria, .tag, .badge")?,
                image: parse("img")?,
                container_tags: &[],
            }),
        }
    }
}
