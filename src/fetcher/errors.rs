use reqwest::StatusCode;
use thiserror::Error;

/// Why a page could not be fetched and decoded.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("timed out waiting for the page")]
    Timeout,

    #[error("could not reach the site: {0}")]
    Connect(String),

    #[error("too many redirects")]
    RedirectLoop,

    #[error("site answered {status}")]
    Http { status: StatusCode },

    #[error("page is {size} bytes, over the {limit} byte limit")]
    BodyTooLarge { size: u64, limit: u64 },

    #[error("not an HTML page: {0}")]
    UnsupportedContentType(String),

    #[error("page is not valid {encoding}")]
    Charset { encoding: &'static str },

    #[error("failed to read the page: {0}")]
    Body(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_redirect() {
            Self::RedirectLoop
        } else if let Some(status) = err.status() {
            Self::Http { status }
        } else if err.is_connect() || err.is_request() {
            Self::Connect(err.to_string())
        } else {
            Self::Body(err.to_string())
        }
    }
}
