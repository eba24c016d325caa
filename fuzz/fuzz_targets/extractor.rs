#![no_main]

use libfuzzer_sys::fuzz_target;

use ptt_proofread::extractor::{extract_post_text, extract_readable_text, find_first_url};

fuzz_target!(|data: &[u8]| {
    // Convert raw bytes to string, handling invalid UTF-8 gracefully
    let html = String::from_utf8_lossy(data);

    // Neither extractor should panic regardless of input
    if let Ok(text) = extract_post_text(&html) {
        let _ = find_first_url(&text);
    }
    let _ = extract_readable_text(&html);
});
