//! Listing page scraping.
//!
//! Scraping happens in two steps:
//!
//! 1. **Fetching**: download the listing page markup ([`fetch`])
//! 2. **Extraction**: locate candidate news blocks with a named layout
//!    strategy and read their fields ([`layout`], [`extract`])
//!
//! # Layout strategies
//!
//! | Layout | Method | Notes |
//! |--------|--------|-------|
//! | `cards` | Precise selectors | Bootstrap Italia card grid |
//! | `anchors` | News links + enclosing container | For pages where links sit outside the card body |
//! | `generic` | Broad structural selectors | Fallback when the layout is unknown |
//!
//! The configured primary layout runs first; the fallback only runs when the
//! primary finds nothing.

pub mod extract;
pub mod fetch;
pub mod layout;
