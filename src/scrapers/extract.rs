//! Turn listing markup into [`NewsCandidate`]s.
//!
//! Each candidate block is read field by field. Only a missing title or a
//! missing link drops the block. A missing date or category is left absent
//! for the collection builder to default once the record's origin is known;
//! a missing image becomes an empty string.

use crate::config::SiteConfig;
use crate::dates;
use crate::error::NewsError;
use crate::models::NewsCandidate;
use crate::scrapers::layout::{Layout, LayoutSelectors, TitleLookup};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument};
use url::Url;

/// Extracts candidate records with a chain of layout strategies.
///
/// The first layout that yields at least one candidate wins; the others are
/// only tried when the previous ones found nothing.
#[derive(Debug)]
pub struct RecordExtractor {
    base: Url,
    chain: Vec<(Layout, LayoutSelectors)>,
}

impl RecordExtractor {
    pub fn new(base: Url, layouts: &[Layout]) -> Result<Self, NewsError> {
        let chain = layouts
            .iter()
            .map(|&layout| layout.selectors().map(|s| (layout, s)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { base, chain })
    }

    pub fn from_config(config: &SiteConfig) -> Result<Self, NewsError> {
        Self::new(config.base()?, &config.layouts())
    }

    /// Extract candidates from `document`, in document order.
    #[instrument(level = "info", skip_all)]
    pub fn extract(&self, document: &Html) -> Vec<NewsCandidate> {
        for (layout, selectors) in &self.chain {
            let candidates = extract_layout(document, selectors, &self.base);
            info!(layout = layout.name(), count = candidates.len(), "Extracted news candidates");
            if !candidates.is_empty() {
                return candidates;
            }
        }
        Vec::new()
    }

    /// Parse raw markup and extract from it.
    pub fn extract_html(&self, html: &str) -> Vec<NewsCandidate> {
        let document = Html::parse_document(html);
        self.extract(&document)
    }
}

fn extract_layout(document: &Html, selectors: &LayoutSelectors, base: &Url) -> Vec<NewsCandidate> {
    document
        .select(&selectors.blocks)
        .filter_map(|block| read_block(block, selectors, base))
        .collect()
}

fn read_block(block: ElementRef<'_>, selectors: &LayoutSelectors, base: &Url) -> Option<NewsCandidate> {
    let Some((title, url)) = title_and_link(block, &selectors.titles, base) else {
        debug!(tag = block.value().name(), "Skipping block without title or link");
        return None;
    };

    let scope = container(block, selectors.container_tags);

    let published = scope
        .select(&selectors.date)
        .find_map(|el| dates::normalize(&element_text(el)));

    let category = scope
        .select(&selectors.category)
        .map(element_text)
        .find(|text| !text.is_empty());

    let image = scope
        .select(&selectors.image)
        .find_map(|img| image_source(img, base))
        .map(String::from)
        .unwrap_or_default();

    Some(NewsCandidate {
        title,
        url,
        published,
        category,
        image,
    })
}

/// Resolve an image source, preferring the lazy-loading `data-src` over
/// `src`. Inline `data:` placeholders are not image URLs.
fn image_source(img: ElementRef<'_>, base: &Url) -> Option<Url> {
    ["data-src", "src"].into_iter().find_map(|attr| {
        let src = img.value().attr(attr)?.trim();
        if src.is_empty() || src.starts_with("data:") {
            return None;
        }
        base.join(src).ok()
    })
}

/// Run the prioritized title lookups, returning the title and the
/// absolute link of the first one that yields both.
fn title_and_link(block: ElementRef<'_>, lookups: &[TitleLookup], base: &Url) -> Option<(String, String)> {
    for lookup in lookups {
        let found = match lookup {
            TitleLookup::Block => Some(block),
            TitleLookup::Select(selector) => block.select(selector).next(),
        };
        let Some(el) = found else { continue };

        let title = element_text(el);
        if title.is_empty() {
            continue;
        }
        if let Some(url) = link_for(el, block).and_then(|href| resolve_link(base, href)) {
            return Some((title, url));
        }
    }
    None
}

/// Locate the link of a title element: its own `href`, an anchor inside it,
/// an enclosing anchor up to the block, or any anchor in the block.
fn link_for<'a>(el: ElementRef<'a>, block: ElementRef<'a>) -> Option<&'a str> {
    static ANCHOR: once_cell::sync::Lazy<Selector> =
        once_cell::sync::Lazy::new(|| Selector::parse("a[href]").expect("static selector"));

    if let Some(href) = el.value().attr("href") {
        return Some(href);
    }
    if let Some(href) = el.select(&ANCHOR).find_map(|a| a.value().attr("href")) {
        return Some(href);
    }
    if el != block {
        for ancestor in el.ancestors().filter_map(ElementRef::wrap) {
            if let Some(href) = ancestor.value().attr("href") {
                return Some(href);
            }
            if ancestor == block {
                break;
            }
        }
    }
    block.select(&ANCHOR).find_map(|a| a.value().attr("href"))
}

/// Resolve `href` against `base`, keeping only links on the same origin.
fn resolve_link(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }
    let url = base.join(href).ok()?;
    if url.origin() != base.origin() {
        debug!(%url, "Skipping link outside the site");
        return None;
    }
    Some(url.to_string())
}

/// Nearest ancestor of `block` whose tag is in `tags`, or the block itself.
fn container<'a>(block: ElementRef<'a>, tags: &[&str]) -> ElementRef<'a> {
    if tags.is_empty() {
        return block;
    }
    block
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| tags.contains(&el.value().name()))
        .unwrap_or(block)
}

/// Element text with whitespace runs collapsed to single spaces.
fn element_text(el: ElementRef<'_>) -> String {
    el.text().flat_map(str::split_whitespace).collect::<Vec<_>>().join(" ")
}
