//! Output generation.
//!
//! # Submodules
//!
//! - [`json`]: Writes the news feed consumed by the front-end
//!
//! # Output Structure
//!
//! ```text
//! news.json   # array of news records, newest first, ids "1".."N"
//! ```

pub mod json;
