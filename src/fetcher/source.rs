use reqwest::StatusCode;
use tracing::{info, instrument, warn};

use crate::{extractor::extract_readable_text, fetcher::client::fetch};

/// Fetch a page discovered inside a post and return its readable text.
///
/// Every failure is logged and reported as `None`: the source article only
/// enriches the analysis, it is never required.
#[instrument(skip_all, fields(url = %url))]
pub async fn fetch_source_text(url: &str) -> Option<String> {
    let page = match fetch(url).await {
        Ok(page) => page,
        Err(e) => {
            warn!(error = %e, "Failed to fetch source URL");
            return None;
        }
    };

    if page.status != StatusCode::OK {
        warn!(status = %page.status, "Source URL did not answer 200");
        return None;
    }

    let text = extract_readable_text(&page.body_utf8);
    if text.is_empty() {
        warn!("Source page had no readable text");
        return None;
    }

    info!(chars = text.chars().count(), "Scraped and cleaned source content");
    Some(text)
}
