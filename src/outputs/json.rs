//! JSON feed output for the Gorlanews front-end.
//!
//! The feed is a single pretty-printed JSON array of [`NewsRecord`]s. It is
//! rewritten from scratch on every successful run; non-ASCII characters such
//! as `à` are kept literally.

use crate::error::NewsError;
use crate::models::NewsRecord;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, instrument};

/// Write `records` to `path`, replacing any previous feed.
///
/// Missing parent directories are created first.
///
/// # Output Shape
///
/// ```text
/// [
///   {
///     "titolo": "...",
///     "url": "https://...",
///     "dataPubblicazione": "2026-03-10T00:00:00",
///     "origine": "home",
///     "categoria": "Avviso",
///     "immagine": "",
///     "id": "1"
///   }
/// ]
/// ```
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_news(records: &[NewsRecord], path: &Path) -> Result<(), NewsError> {
    let json = serde_json::to_string_pretty(records)?;

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(dir).await {
            error!(dir = %dir.display(), error = %e, "Failed to create output dir");
            return Err(e.into());
        }
    }

    fs::write(path, json).await?;
    info!(count = records.len(), "Wrote news feed");
    Ok(())
}
