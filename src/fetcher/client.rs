use crate::fetcher::{errors::FetchError, pipeline::decode_page, types::FetchedPage};
use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder, header};
use std::time::Duration;
use tracing::instrument;

const MAX_BODY_SIZE: u64 = 5 * 1024 * 1024; // 5MB
const USER_AGENT: &str = "PttProofread/0.1 (+https://github.com/ptt-proofread)";

/// Both the forum page and discovered source pages get the same budget.
pub const SCRAPE_TIMEOUT: Duration = Duration::from_secs(10);

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .connect_timeout(SCRAPE_TIMEOUT)
        .timeout(SCRAPE_TIMEOUT)
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(10))
        .default_headers({
            let mut headers = header::HeaderMap::new();
            headers.insert(
                header::ACCEPT,
                header::HeaderValue::from_static(
                    "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
                ),
            );
            headers
        })
        .build()
        .unwrap_or_else(|_| Client::new())
});

/// GET an HTML page and decode it to UTF-8.
pub async fn fetch(url: &str) -> Result<FetchedPage, FetchError> {
    fetch_page(url, None).await
}

/// GET an HTML page, sending `cookie` verbatim as the `Cookie` header.
pub async fn fetch_with_cookie(url: &str, cookie: &str) -> Result<FetchedPage, FetchError> {
    fetch_page(url, Some(cookie)).await
}

#[instrument(skip_all, fields(url = %url))]
async fn fetch_page(url: &str, cookie: Option<&str>) -> Result<FetchedPage, FetchError> {
    let parsed_url = url::Url::parse(url)?;

    let mut request = HTTP_CLIENT.get(parsed_url).timeout(SCRAPE_TIMEOUT);
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }

    let response = request.send().await?;

    // Check content length before downloading
    if let Some(size) = response.content_length()
        && size > MAX_BODY_SIZE
    {
        return Err(FetchError::BodyTooLarge {
            size,
            limit: MAX_BODY_SIZE,
        });
    }

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Http { status });
    }

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .unwrap_or("text/html")
        .to_string();
    if !content_type.contains("text/html") && !content_type.contains("application/xhtml") {
        return Err(FetchError::UnsupportedContentType(content_type));
    }

    let final_url = response.url().clone();
    let body = response
        .bytes()
        .await
        .map_err(|e| FetchError::Body(e.to_string()))?;

    // Content-Length may be missing or wrong
    let size = body.len() as u64;
    if size > MAX_BODY_SIZE {
        return Err(FetchError::BodyTooLarge {
            size,
            limit: MAX_BODY_SIZE,
        });
    }

    decode_page(final_url, status, &content_type, &body)
}
