//! Crawl loop behavior against a scripted browser

use crate::support::*;
use ketab_crawler::crawler::Coordinator;
use ketab_crawler::state::{ItemState, PageState, StopSignal};
use ketab_crawler::KetabError;

#[tokio::test]
async fn test_links_seen_on_earlier_pages_are_skipped() {
    let browser = ScriptedBrowser::new()
        .page(listing_url(1), listing_page(&["/book/1-a", "/book/2-b"]))
        .page(listing_url(2), listing_page(&["/book/2-b", "/book/3-c"]))
        .page(book_url("1-a"), detail_page("الف", "111", "۱۰۰"))
        .page(book_url("2-b"), detail_page("ب", "222", "۲۰۰"))
        .page(book_url("3-c"), detail_page("ج", "333", "۳۰۰"));
    let log = browser.log();
    let sink = CapturingSink::default();

    let outcome = Coordinator::new(test_config(BASE_URL, 2), browser, sink.clone(), StopSignal::new())
        .run()
        .await
        .expect("Crawl failed");

    let names: Vec<_> = outcome.report.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["الف", "ب", "ج"]);
    assert_eq!(outcome.report.records[2].price, 300);

    let stats = &outcome.statistics;
    assert_eq!(stats.pages(PageState::Loaded), 2);
    assert_eq!(stats.items(ItemState::Saved), 3);
    assert_eq!(stats.items(ItemState::AlreadySeen), 1);
    assert_eq!(stats.links_found, 4);
    assert!(!stats.stopped_early);

    let log = log.lock().unwrap();
    assert_eq!(log.visits(&book_url("2-b")), 1);
    assert_eq!(log.quits, 1);
    assert_eq!(sink.writes.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_repeated_cards_on_one_page_are_visited_once() {
    let browser = ScriptedBrowser::new()
        .page(
            listing_url(1),
            listing_page(&["/book/1-a", "/book/1-a/", "/book/1-a#reviews"]),
        )
        .page(book_url("1-a"), detail_page("الف", "111", "۱۰۰"));
    let log = browser.log();

    let outcome = Coordinator::new(
        test_config(BASE_URL, 1),
        browser,
        CapturingSink::default(),
        StopSignal::new(),
    )
    .run()
    .await
    .expect("Crawl failed");

    assert_eq!(outcome.statistics.links_found, 1);
    assert_eq!(outcome.report.after, 1);
    assert_eq!(log.lock().unwrap().visits(&book_url("1-a")), 1);
}

#[tokio::test]
async fn test_item_retries_then_succeeds() {
    let browser = ScriptedBrowser::new()
        .page(listing_url(1), listing_page(&["/book/1-a"]))
        .page(book_url("1-a"), detail_page("الف", "111", "۱۰۰"))
        .fail_times(book_url("1-a"), 2);
    let log = browser.log();

    let outcome = Coordinator::new(
        test_config(BASE_URL, 1),
        browser,
        CapturingSink::default(),
        StopSignal::new(),
    )
    .run()
    .await
    .expect("Crawl failed");

    assert_eq!(outcome.statistics.items(ItemState::Saved), 1);
    assert_eq!(log.lock().unwrap().visits(&book_url("1-a")), 3);
}

#[tokio::test]
async fn test_exhausted_item_is_skipped_and_crawl_continues() {
    let browser = ScriptedBrowser::new()
        .page(listing_url(1), listing_page(&["/book/1-a", "/book/2-b"]))
        .page(book_url("1-a"), detail_page("الف", "111", "۱۰۰"))
        .page(book_url("2-b"), detail_page("ب", "222", "۲۰۰"))
        .fail_times(book_url("1-a"), 10);
    let log = browser.log();

    let outcome = Coordinator::new(
        test_config(BASE_URL, 1),
        browser,
        CapturingSink::default(),
        StopSignal::new(),
    )
    .run()
    .await
    .expect("Crawl failed");

    assert_eq!(outcome.statistics.items(ItemState::Skipped), 1);
    assert_eq!(outcome.statistics.items(ItemState::Saved), 1);
    assert_eq!(outcome.report.records[0].name, "ب");
    assert_eq!(log.lock().unwrap().visits(&book_url("1-a")), 3);
}

#[tokio::test]
async fn test_listing_failures_do_not_end_the_run() {
    let browser = ScriptedBrowser::new()
        .time_out(listing_url(1))
        .page(listing_url(3), listing_page(&["/book/1-a"]))
        .page(book_url("1-a"), detail_page("الف", "111", "۱۰۰"));

    let outcome = Coordinator::new(
        test_config(BASE_URL, 3),
        browser,
        CapturingSink::default(),
        StopSignal::new(),
    )
    .run()
    .await
    .expect("Crawl failed");

    let stats = &outcome.statistics;
    assert_eq!(stats.pages(PageState::TimedOut), 1);
    assert_eq!(stats.pages(PageState::Failed), 1);
    assert_eq!(stats.pages(PageState::Loaded), 1);
    assert_eq!(outcome.report.after, 1);
}

#[tokio::test]
async fn test_listing_without_cards_times_out_and_cards_without_links_are_empty() {
    let browser = ScriptedBrowser::new()
        .page(listing_url(1), "<html><body><p>هیچ کتابی یافت نشد</p></body></html>")
        .page(
            listing_url(2),
            r#"<html><body><a class="card product-card-simple">بدون پیوند</a></body></html>"#,
        );

    let outcome = Coordinator::new(
        test_config(BASE_URL, 2),
        browser,
        CapturingSink::default(),
        StopSignal::new(),
    )
    .run()
    .await
    .expect("Crawl failed");

    assert_eq!(outcome.statistics.pages(PageState::TimedOut), 1);
    assert_eq!(outcome.statistics.pages(PageState::Empty), 1);
    assert_eq!(outcome.report.before, 0);
}

#[tokio::test]
async fn test_manual_stop_finishes_current_item_then_finalizes() {
    let stop = StopSignal::new();
    let browser = ScriptedBrowser::new()
        .page(
            listing_url(1),
            listing_page(&["/book/1-a", "/book/2-b", "/book/3-c"]),
        )
        .page(listing_url(2), listing_page(&["/book/4-d"]))
        .page(book_url("1-a"), detail_page("الف", "111", "۱۰۰"))
        .page(book_url("2-b"), detail_page("ب", "222", "۲۰۰"))
        .page(book_url("3-c"), detail_page("ج", "333", "۳۰۰"))
        .page(book_url("4-d"), detail_page("د", "444", "۴۰۰"))
        .stop_on(book_url("2-b"), stop.clone());
    let log = browser.log();
    let sink = CapturingSink::default();

    let outcome = Coordinator::new(test_config(BASE_URL, 2), browser, sink.clone(), stop)
        .run()
        .await
        .expect("Crawl failed");

    let names: Vec<_> = outcome.report.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["الف", "ب"]);
    assert!(outcome.statistics.stopped_early);

    let log = log.lock().unwrap();
    assert_eq!(log.visits(&book_url("3-c")), 0);
    assert_eq!(log.visits(&listing_url(2)), 0);
    assert_eq!(log.quits, 1);
    assert_eq!(sink.writes.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_stop_before_start_still_writes_empty_output() {
    let stop = StopSignal::new();
    stop.request_stop();
    let browser = ScriptedBrowser::new();
    let log = browser.log();
    let sink = CapturingSink::default();

    let outcome = Coordinator::new(test_config(BASE_URL, 3), browser, sink.clone(), stop)
        .run()
        .await
        .expect("Crawl failed");

    assert_eq!(outcome.statistics.pages_attempted(), 0);
    assert!(log.lock().unwrap().navigations.is_empty());
    assert_eq!(log.lock().unwrap().quits, 1);
    let writes = sink.writes.lock().unwrap();
    assert_eq!(writes.len(), 1);
    assert!(writes[0].is_empty());
}

#[tokio::test]
async fn test_duplicate_books_are_removed_before_writing() {
    let browser = ScriptedBrowser::new()
        .page(listing_url(1), listing_page(&["/book/1-a", "/book/1-a-reprint"]))
        .page(book_url("1-a"), detail_page("الف", "111", "۱۰۰"))
        .page(book_url("1-a-reprint"), detail_page("الف", "111", "۱۵۰"));
    let sink = CapturingSink::default();

    let outcome = Coordinator::new(test_config(BASE_URL, 1), browser, sink.clone(), StopSignal::new())
        .run()
        .await
        .expect("Crawl failed");

    assert_eq!(outcome.report.before, 2);
    assert_eq!(outcome.report.after, 1);

    let writes = sink.writes.lock().unwrap();
    assert_eq!(writes[0].len(), 1);
    assert_eq!(writes[0][0].price, 100);
}

#[tokio::test]
async fn test_sink_failure_is_reported_after_release() {
    let browser = ScriptedBrowser::new()
        .page(listing_url(1), listing_page(&["/book/1-a"]))
        .page(book_url("1-a"), detail_page("الف", "111", "۱۰۰"));
    let log = browser.log();

    let result = Coordinator::new(
        test_config(BASE_URL, 1),
        browser,
        CapturingSink::failing(),
        StopSignal::new(),
    )
    .run()
    .await;

    assert!(matches!(result, Err(KetabError::Output(_))));
    assert_eq!(log.lock().unwrap().quits, 1);
}
