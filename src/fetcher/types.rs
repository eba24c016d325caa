use encoding_rs::Encoding;
use reqwest::StatusCode;
use url::Url;

/// Encoding a page was decoded from. PTT serves UTF-8; older Taiwanese
/// sites linked from posts still serve Big5.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Charset {
    Utf8,
    Big5,
    Other(&'static str),
}

impl From<&'static Encoding> for Charset {
    fn from(encoding: &'static Encoding) -> Self {
        if encoding == encoding_rs::UTF_8 {
            Self::Utf8
        } else if encoding == encoding_rs::BIG5 {
            Self::Big5
        } else {
            Self::Other(encoding.name())
        }
    }
}

/// A fetched HTML page, already decoded to UTF-8.
#[derive(Debug)]
pub struct FetchedPage {
    pub url_final: Url,
    pub status: StatusCode,
    pub body_utf8: String,
    pub charset: Charset,
}
