//! End-to-end crawl over HTTP
//!
//! These tests use wiremock to serve listing and detail pages and run the
//! full crawl, including the file output, against it.

use crate::support::{detail_page, listing_page, test_config};
use ketab_crawler::browser::{Browser, BrowserError, HttpBrowser};
use ketab_crawler::config::UserAgentConfig;
use ketab_crawler::crawler::crawl;
use ketab_crawler::record::BookRecord;
use ketab_crawler::state::{ItemState, PageState, StopSignal};
use ketab_crawler::text::UNKNOWN;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_html(server: &MockServer, route: &str, page: Option<&str>, body: String) {
    let mock = Mock::given(method("GET")).and(path(route));
    let mock = match page {
        Some(p) => mock.and(query_param("p", p)),
        None => mock,
    };
    mock.respond_with(
        ResponseTemplate::new(200)
            .set_body_string(body)
            .insert_header("content-type", "text/html; charset=utf-8"),
    )
    .mount(server)
    .await;
}

#[tokio::test]
async fn test_full_crawl_writes_all_formats() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/tag/484-finance",
        Some("1"),
        listing_page(&["/book/1-a", "/book/2-b", "/book/1-a"]),
    )
    .await;
    mount_html(
        &mock_server,
        "/book/1-a",
        None,
        detail_page("پدر پولدار پدر بی‌پول", "978-964-00-0001-1", "۱۸۵,۰۰۰"),
    )
    .await;
    mount_html(
        &mock_server,
        "/book/2-b",
        None,
        "<html><head><title>هوش مالی | ایران کتاب</title></head><body></body></html>".to_string(),
    )
    .await;
    // Page 2 is not mounted and answers 404

    let out_dir = TempDir::new().expect("Failed to create temp dir");
    let mut config = test_config(&base_url, 2);
    config.output.directory = out_dir.path().to_path_buf();

    let outcome = crawl(config, StopSignal::new()).await.expect("Crawl failed");

    let stats = &outcome.statistics;
    assert_eq!(stats.pages(PageState::Loaded), 1);
    assert_eq!(stats.pages(PageState::Failed), 1);
    assert_eq!(stats.items(ItemState::Saved), 2);
    assert_eq!(outcome.report.files.len(), 3);

    // JSON holds the records in crawl order
    let json_path = out_dir.path().join("books_finance_all.json");
    let json = std::fs::read_to_string(&json_path).expect("Missing JSON output");
    let records: Vec<BookRecord> = serde_json::from_str(&json).expect("Invalid JSON output");
    assert_eq!(records.len(), 2);

    assert_eq!(records[0].name, "پدر پولدار پدر بی‌پول");
    assert_eq!(records[0].sku, "978-964-00-0001-1");
    assert_eq!(records[0].price, 185_000);
    assert_eq!(records[0].pages, Some(200));
    assert_eq!(records[0].year_shamsi, Some(1401));
    assert_eq!(records[0].category, "مالی");

    assert_eq!(records[1].name, "هوش مالی");
    assert_eq!(records[1].writer, UNKNOWN);
    assert_eq!(records[1].price, 0);
    assert_eq!(records[1].pages, None);

    // CSV starts with a BOM and a header row
    let csv_bytes = std::fs::read(out_dir.path().join("books_finance_all.csv")).expect("Missing CSV");
    assert!(csv_bytes.starts_with(b"\xEF\xBB\xBF"));
    let csv_text = String::from_utf8(csv_bytes[3..].to_vec()).expect("CSV is not UTF-8");
    let mut lines = csv_text.lines();
    assert!(lines.next().unwrap_or_default().starts_with("name,writer,translator"));
    assert_eq!(lines.count(), 2);

    let xlsx = std::fs::metadata(out_dir.path().join("books_finance_all.xlsx")).expect("Missing XLSX");
    assert!(xlsx.len() > 0);
}

#[tokio::test]
async fn test_unreachable_site_still_writes_empty_output() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let out_dir = TempDir::new().expect("Failed to create temp dir");
    let mut config = test_config(&base_url, 2);
    config.output.directory = out_dir.path().join("nested");
    config.output.basename = "empty_run".to_string();

    let outcome = crawl(config, StopSignal::new()).await.expect("Crawl failed");

    assert_eq!(outcome.statistics.pages_failed(), 2);
    assert_eq!(outcome.report.after, 0);

    let json = std::fs::read_to_string(out_dir.path().join("nested/empty_run.json"))
        .expect("Missing JSON output");
    let records: Vec<BookRecord> = serde_json::from_str(&json).expect("Invalid JSON output");
    assert!(records.is_empty());
    assert!(out_dir.path().join("nested/empty_run.xlsx").exists());
}

#[tokio::test]
async fn test_slow_page_reports_timeout() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body>late</body></html>")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let mut browser = HttpBrowser::new(&UserAgentConfig::default(), Duration::from_secs(30))
        .expect("Failed to build browser");
    let url = format!("{}/slow", mock_server.uri());

    let result = browser.navigate(&url, Duration::from_millis(200)).await;

    match result {
        Err(e @ BrowserError::Timeout { .. }) => assert!(e.is_timeout()),
        other => panic!("Expected a timeout, got {:?}", other),
    }
    // The timed-out page is not left queryable
    assert!(matches!(browser.page_source().await, Err(BrowserError::NoDocument)));
}

#[tokio::test]
async fn test_missing_page_reports_http_status() {
    let mock_server = MockServer::start().await;
    let mut browser = HttpBrowser::new(&UserAgentConfig::default(), Duration::from_secs(5))
        .expect("Failed to build browser");
    let url = format!("{}/book/404-missing", mock_server.uri());

    let result = browser.navigate(&url, Duration::from_secs(5)).await;

    match result {
        Err(e @ BrowserError::Http { status: 404, .. }) => assert!(!e.is_timeout()),
        other => panic!("Expected HTTP 404, got {:?}", other),
    }
}

#[tokio::test]
async fn test_loaded_page_is_queryable() {
    let mock_server = MockServer::start().await;
    mount_html(
        &mock_server,
        "/tag/484-finance",
        Some("1"),
        listing_page(&["/book/1-a"]),
    )
    .await;

    let mut browser = HttpBrowser::new(&UserAgentConfig::default(), Duration::from_secs(5))
        .expect("Failed to build browser");
    let url = format!("{}/tag/484-finance?p=1", mock_server.uri());

    browser
        .navigate(&url, Duration::from_secs(5))
        .await
        .expect("Navigation failed");
    browser
        .wait_for_selector("a.card.product-card-simple", Duration::from_secs(1))
        .await
        .expect("Card not found");

    let missing = browser.wait_for_selector("strong.toman", Duration::from_secs(1)).await;
    assert!(matches!(missing, Err(BrowserError::SelectorTimeout { .. })));
    assert_eq!(browser.current_url().await.expect("No URL"), url);
}
