//! Command-line interface definitions for Gorla News.
//!
//! The job needs no arguments: a bare invocation scrapes the built-in site
//! and writes `news.json`. The options below only override that default.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the news update job.
///
/// # Examples
///
/// ```sh
/// # Scrape with the built-in configuration
/// gorla_news
///
/// # Use a YAML config and write the feed elsewhere
/// gorla_news --config gorla_news.yaml --output public/news.json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML site configuration
    #[arg(short, long, env = "GORLA_NEWS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the output file of the news feed
    #[arg(short, long, env = "GORLA_NEWS_OUTPUT")]
    pub output: Option<PathBuf>,
}
