pub mod client;
pub mod errors;
pub mod pipeline;
pub mod source;
pub mod types;

pub use client::{SCRAPE_TIMEOUT, fetch, fetch_with_cookie};
pub use errors::FetchError;
pub use source::fetch_source_text;
pub use types::{Charset, FetchedPage};
