use ptt_proofread::fetcher::{Charset, FetchError, fetch, fetch_source_text, fetch_with_cookie};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

#[tokio::test]
async fn test_fetch_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/test"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(
                    "<html><head><title>Test</title></head><body>你好 World</body></html>"
                        .as_bytes(),
                )
                .insert_header("Content-Type", "text/html; charset=utf-8"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/test", mock_server.uri());
    let result = fetch(&url).await.unwrap();

    assert!(result.status.is_success());
    assert!(result.body_utf8.contains("你好 World"));
    assert_eq!(result.charset, Charset::Utf8);
    assert_eq!(result.url_final.as_str(), url);
}

#[tokio::test]
async fn test_fetch_sends_age_cookie() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bbs/Gossiping/M.1.A.2.html"))
        .and(header("cookie", "over18=1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes("<div id=\"main-content\">ok</div>".as_bytes())
                .insert_header("Content-Type", "text/html"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/bbs/Gossiping/M.1.A.2.html", mock_server.uri());
    let result = fetch_with_cookie(&url, "over18=1").await.unwrap();

    assert!(result.body_utf8.contains("main-content"));
}

#[tokio::test]
async fn test_fetch_big5_page() {
    let mock_server = MockServer::start().await;
    let (body, _, _) = encoding_rs::BIG5.encode("<html><body>繁體中文內容</body></html>");

    Mock::given(method("GET"))
        .and(path("/big5"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(body.into_owned())
                .insert_header("Content-Type", "text/html; charset=big5"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/big5", mock_server.uri());
    let result = fetch(&url).await.unwrap();

    assert_eq!(result.charset, Charset::Big5);
    assert!(result.body_utf8.contains("繁體中文內容"));
}

#[tokio::test]
async fn test_fetch_404() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/notfound"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let url = format!("{}/notfound", mock_server.uri());
    let result = fetch(&url).await;

    match result {
        Err(FetchError::Http { status }) => assert_eq!(status.as_u16(), 404),
        _ => panic!("Expected HTTP 404 error"),
    }
}

#[tokio::test]
async fn test_fetch_redirect() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/redirect"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/final"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/final"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes("<html><body>Final page</body></html>".as_bytes())
                .insert_header("Content-Type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/redirect", mock_server.uri());
    let result = fetch(&url).await.unwrap();

    assert!(result.body_utf8.contains("Final page"));
    assert!(result.url_final.as_str().ends_with("/final"));
}

#[tokio::test]
async fn test_fetch_gzip_compression() {
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    let original_content =
        "<html><head><title>Compressed</title></head><body>This content is gzipped!</body></html>";

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(original_content.as_bytes()).unwrap();
    let compressed_data = encoder.finish().unwrap();

    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gzipped"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(compressed_data)
                .insert_header("Content-Type", "text/html; charset=utf-8")
                .insert_header("Content-Encoding", "gzip"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/gzipped", mock_server.uri());
    let result = fetch(&url).await.unwrap();

    assert!(result.body_utf8.contains("This content is gzipped!"));
}

#[tokio::test]
async fn test_fetch_unsupported_content_type() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/image"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(vec![0xFF, 0xD8, 0xFF]) // JPEG header
                .insert_header("Content-Type", "image/jpeg"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/image", mock_server.uri());
    let result = fetch(&url).await;

    match result {
        Err(FetchError::UnsupportedContentType(content_type)) => {
            assert_eq!(content_type, "image/jpeg");
        }
        _ => panic!("Expected UnsupportedContentType error"),
    }
}

#[tokio::test]
async fn test_fetch_body_too_large() {
    let mock_server = MockServer::start().await;

    // 6MB > 5MB limit
    let large_body = "x".repeat(6 * 1024 * 1024);

    Mock::given(method("GET"))
        .and(path("/large"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(large_body.as_bytes())
                .insert_header("Content-Type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/large", mock_server.uri());
    let result = fetch(&url).await;

    match result {
        Err(FetchError::BodyTooLarge { size, limit }) => {
            assert_eq!(size, 6 * 1024 * 1024);
            assert_eq!(limit, 5 * 1024 * 1024);
        }
        _ => panic!("Expected BodyTooLarge error"),
    }
}

#[tokio::test]
async fn test_fetch_invalid_url() {
    let result = fetch("not-a-valid-url").await;

    match result {
        Err(FetchError::InvalidUrl(_)) => {}
        _ => panic!("Expected InvalidUrl error"),
    }
}

#[tokio::test]
async fn test_source_text_uses_content_selector() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/news/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(
                    "<html><body><nav>Menu</nav><article><h1>Headline</h1>\n<p>Body   text.</p></article></body></html>"
                        .as_bytes(),
                )
                .insert_header("Content-Type", "text/html; charset=utf-8"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/news/1", mock_server.uri());
    assert_eq!(
        fetch_source_text(&url).await.as_deref(),
        Some("Headline Body text.")
    );
}

#[tokio::test]
async fn test_source_text_soft_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/accepted"))
        .respond_with(
            ResponseTemplate::new(203)
                .set_body_bytes("<html><body>not quite ok</body></html>".as_bytes())
                .insert_header("Content-Type", "text/html"),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/blank"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes("<html><body>  \n </body></html>".as_bytes())
                .insert_header("Content-Type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    for page in ["/gone", "/accepted", "/blank"] {
        let url = format!("{}{}", mock_server.uri(), page);
        assert_eq!(fetch_source_text(&url).await, None, "{page}");
    }
    assert_eq!(fetch_source_text("http://127.0.0.1:1/unreachable").await, None);
}
