use std::fs;

use crate::extractor::{extract_post_text, extract_readable_text, find_first_url};

fn fixture(name: &str) -> String {
    fs::read_to_string(format!("src/extractor/tests/fixtures/{name}"))
        .expect("Failed to read test fixture")
}

#[test]
fn test_extract_ptt_article() {
    let text = extract_post_text(&fixture("ptt_article.html")).unwrap();

    assert!(text.starts_with("1.媒體來源:"));
    assert!(text.contains("一項新研究發現,每天喝二到三杯咖啡的人,\n死亡風險比不喝咖啡的人低。"));
    assert!(text.ends_with("https://i.imgur.example/abc.jpg"));

    // Metadata, signature and pushes are all gone
    assert!(!text.contains("coffeelover"));
    assert!(!text.contains("Tue Nov 14"));
    assert!(!text.contains("發信站"));
    assert!(!text.contains("文章網址"));
    assert!(!text.contains("tealover"));
    assert!(!text.contains("睡不著"));
}

#[test]
fn test_first_url_in_ptt_article_is_the_source() {
    let text = extract_post_text(&fixture("ptt_article.html")).unwrap();
    assert_eq!(
        find_first_url(&text),
        Some("https://www.sciencedaily.example/releases/2023/11/coffee.htm")
    );
}

#[test]
fn test_extract_source_article() {
    let text = extract_readable_text(&fixture("source_article.html"));

    assert_eq!(
        text,
        "Coffee drinkers may live longer, study finds By Staff People who drink two to three cups of coffee a day have a lower risk of death than those who do not drink coffee. Researchers followed more than half a million participants."
    );
}

#[test]
fn test_extract_source_without_body() {
    assert_eq!(extract_readable_text(""), "");
}

#[test]
fn test_malformed_ptt_html() {
    let html = r#"<div id="main-content">Unclosed <b>tags<div>More content
--
sig"#;
    let text = extract_post_text(html).unwrap();
    assert!(text.contains("Unclosed"));
    assert!(text.contains("More content"));
    assert!(!text.contains("sig"));
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_extract_never_panics(html in ".*") {
            let _ = extract_post_text(&html);
            let _ = extract_readable_text(&html);
        }

        #[test]
        fn test_post_text_is_trimmed(body in "[^<>&]*") {
            let html = format!("<div id=\"main-content\">{body}</div>");
            let text = extract_post_text(&html).unwrap();
            prop_assert_eq!(text.trim(), text.as_str());
            prop_assert!(!text.lines().any(|line| line.trim() == "--"));
        }
    }
}
