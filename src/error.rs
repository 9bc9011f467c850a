//! Typed errors for the news update job.
//!
//! Only transport, configuration and persistence failures surface as
//! [`NewsError`]. Missing fields inside a news block are never errors: the
//! extractor absorbs them into defaults or skips the block.

use thiserror::Error;

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum NewsError {
    /// Network failure, timeout or non-2xx response from the listing page.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured base origin or listing URL is not a valid URL.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A layout strategy selector failed to compile.
    #[error("invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },

    /// Reading the config file or writing the output file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing the news collection failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The YAML configuration could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] serde_yaml::Error),
}
