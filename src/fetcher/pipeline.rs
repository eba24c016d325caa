use crate::fetcher::{
    errors::FetchError,
    types::{Charset, FetchedPage},
};
use encoding_rs::Encoding;
use regex::Regex;
use reqwest::StatusCode;
use std::sync::LazyLock;
use url::Url;

static CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

static META_CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>]+)"#).unwrap());

/// How far into the body a `<meta charset>` declaration is looked for.
const SNIFF_LEN: usize = 4096;

/// Decode a downloaded body into a [`FetchedPage`].
pub fn decode_page(
    url_final: Url,
    status: StatusCode,
    content_type: &str,
    body: &[u8],
) -> Result<FetchedPage, FetchError> {
    let encoding = detect_encoding(content_type, body);
    let body_utf8 = decode_to_utf8(body, encoding)?;

    Ok(FetchedPage {
        url_final,
        status,
        body_utf8,
        charset: Charset::from(encoding),
    })
}

fn label_to_encoding(regex: &Regex, haystack: &str) -> Option<&'static Encoding> {
    let label = regex.captures(haystack)?.get(1)?.as_str().to_lowercase();
    Encoding::for_label(label.as_bytes())
}

/// Header charset first, then `<meta>` in the first few KB, then a guess.
fn detect_encoding(content_type: &str, body_bytes: &[u8]) -> &'static Encoding {
    if let Some(encoding) = label_to_encoding(&CHARSET_REGEX, content_type) {
        return encoding;
    }

    let search_bytes = &body_bytes[..body_bytes.len().min(SNIFF_LEN)];
    let search_str = String::from_utf8_lossy(search_bytes);
    if let Some(encoding) = label_to_encoding(&META_CHARSET_REGEX, &search_str) {
        return encoding;
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(search_bytes, false);
    detector.guess(None, true)
}

fn decode_to_utf8(body_bytes: &[u8], encoding: &'static Encoding) -> Result<String, FetchError> {
    let (decoded, _encoding, had_errors) = encoding.decode(body_bytes);

    if had_errors {
        return Err(FetchError::Charset {
            encoding: encoding.name(),
        });
    }

    Ok(decoded.into_owned())
}
