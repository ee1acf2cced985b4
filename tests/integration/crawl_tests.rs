//! Integration tests for the crawler
//!
//! These tests use wiremock to stand in for the storefront and run the
//! fetcher and the full crawl loop against it.

use cellar_crawl::config::Config;
use cellar_crawl::crawler::{crawl, CrawlDriver, HttpPageFetcher, PageSource};
use cellar_crawl::output::CsvSink;
use cellar_crawl::{CellarError, CrawlState};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.catalog.base_url = format!("{}/lcbo/", server.uri());
    config.http.timeout_secs = 5;
    config
}

/// Wraps list items in the listing structure the storefront serves
fn listing_page(items: &[(&str, &str, &str, &str)]) -> String {
    let items: String = items
        .iter()
        .map(|(name, href, price, score)| {
            format!(
                r#"<li class="product"><div class="productChart">
                    <div class="product_name"><a href="{}">{}</a></div>
                    <div class="product_price"><span class="price">{}</span></div>
                    <div class="product_score"><span class="score">{}</span></div>
                </div></li>"#,
                href, name, price, score
            )
        })
        .collect();

    format!(
        r#"<html><head><title>Wine</title></head><body>
        <div id="content"><div class="productListingWidget">
        <div class="product_listing_container"><ul>{}</ul></div>
        </div></div></body></html>"#,
        items
    )
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html")
}

async fn mount_page(server: &MockServer, offset: &str, body: String) {
    Mock::given(method("GET"))
        .and(path("/lcbo/wine-14"))
        .and(query_param("beginIndex", offset))
        .respond_with(html(body))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_sends_query_dialect() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/lcbo/wine-14"))
        .and(query_param("pageView", "grid"))
        .and(query_param("facet_1", "vintagesonly:\"VINTAGES ONLY\""))
        .and(query_param("facet_2", "instoreonly:\"IN STORE ONLY\""))
        .and(query_param("facetName_1", "VINTAGES ONLY"))
        .and(query_param("facetName_2", "IN STORE ONLY"))
        .and(query_param("beginIndex", "12"))
        .respond_with(html(listing_page(&[(
            "Wine A", "/a", "$10.00", "4.5",
        )])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = HttpPageFetcher::from_config(&create_test_config(&mock_server))
        .expect("Failed to build fetcher");
    let records = fetcher.fetch("wine-14", 12).await.expect("Fetch failed");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name(), "Wine A");
    assert_eq!(records[0].link(), "/a");
    assert_eq!(records[0].price(), "10.00");
    assert_eq!(records[0].score(), "4.5");
}

#[tokio::test]
async fn test_fetch_bad_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let fetcher = HttpPageFetcher::from_config(&create_test_config(&mock_server))
        .expect("Failed to build fetcher");
    let result = fetcher.fetch("wine-14", 0).await;

    match result {
        Err(CellarError::Status { status, url }) => {
            assert_eq!(status, "404 Not Found");
            assert!(url.contains("beginIndex=0"));
        }
        other => panic!("Expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_empty_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(html(listing_page(&[])))
        .mount(&mock_server)
        .await;

    let fetcher = HttpPageFetcher::from_config(&create_test_config(&mock_server))
        .expect("Failed to build fetcher");
    let records = fetcher.fetch("wine-14", 0).await.expect("Fetch failed");

    assert!(records.is_empty());
}

#[tokio::test]
async fn test_fetch_connection_refused() {
    let mut config = Config::default();
    // Nothing listens on the reserved port
    config.catalog.base_url = "http://127.0.0.1:1/lcbo/".to_string();
    config.http.timeout_secs = 5;

    let fetcher = HttpPageFetcher::from_config(&config).expect("Failed to build fetcher");
    let result = fetcher.fetch("wine-14", 0).await;

    assert!(matches!(result, Err(CellarError::Http { .. })));
}

#[tokio::test]
async fn test_full_crawl_end_to_end() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "0",
        listing_page(&[
            ("Wine A", "/a", "$10.00", "4.5"),
            ("Bad", "/b", "n/a", "3.0"),
        ]),
    )
    .await;
    mount_page(&mock_server, "2", listing_page(&[])).await;

    let fetcher = HttpPageFetcher::from_config(&create_test_config(&mock_server))
        .expect("Failed to build fetcher");
    let mut driver = CrawlDriver::new(fetcher, "wine-14");
    let mut sink = CsvSink::new(Vec::new());

    let summary = driver.run(&mut sink).await.expect("Crawl failed");

    let output = String::from_utf8(sink.into_inner().expect("Flush failed")).unwrap();
    assert_eq!(output, "price,score,name,link\n10.00,4.5,Wine A,/a\n");
    assert_eq!(summary.pages_fetched, 2);
    assert_eq!(driver.state(), CrawlState::Done);

    // Each page mock expects exactly one request
    mock_server.verify().await;
}

#[tokio::test]
async fn test_multi_page_crawl_to_file() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "0",
        listing_page(&[
            ("Wine A", "/a", "$10.00", "4.5"),
            ("Wine B", "/b", "$22.95", "91"),
            ("Unscored", "/u", "$15.00", ""),
        ]),
    )
    .await;
    mount_page(
        &mock_server,
        "3",
        listing_page(&[("Wine C", "/c", "8.50", "88")]),
    )
    .await;
    mount_page(&mock_server, "4", listing_page(&[])).await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let out_path = dir.path().join("vintages.csv");

    let mut config = create_test_config(&mock_server);
    config.output.path = Some(out_path.display().to_string());

    let summary = crawl(&config).await.expect("Crawl failed");

    let content = std::fs::read_to_string(&out_path).expect("Failed to read output");
    assert_eq!(
        content,
        "price,score,name,link\n\
         10.00,4.5,Wine A,/a\n\
         22.95,91,Wine B,/b\n\
         8.50,88,Wine C,/c\n"
    );
    assert_eq!(summary.candidates_seen, 4);
    assert_eq!(summary.records_accepted, 3);
    assert_eq!(summary.records_rejected, 1);
    assert_eq!(summary.final_offset, 4);

    mock_server.verify().await;
}

#[tokio::test]
async fn test_crawl_aborts_on_server_error() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "0",
        listing_page(&[("Wine A", "/a", "$10.00", "4.5")]),
    )
    .await;
    Mock::given(method("GET"))
        .and(query_param("beginIndex", "1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let out_path = dir.path().join("partial.csv");

    let mut config = create_test_config(&mock_server);
    config.output.path = Some(out_path.display().to_string());

    let result = crawl(&config).await;
    assert!(matches!(result, Err(CellarError::Status { .. })));

    // The first page was flushed before the failing request
    let content = std::fs::read_to_string(&out_path).expect("Failed to read output");
    assert_eq!(content, "price,score,name,link\n10.00,4.5,Wine A,/a\n");

    mock_server.verify().await;
}

#[tokio::test]
async fn test_crawl_respects_page_limit() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "0",
        listing_page(&[("Wine A", "/a", "10", "4.5")]),
    )
    .await;
    // Never requested: the limit stops the crawl first
    Mock::given(method("GET"))
        .and(query_param("beginIndex", "1"))
        .respond_with(html(listing_page(&[])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let fetcher = HttpPageFetcher::from_config(&create_test_config(&mock_server))
        .expect("Failed to build fetcher");
    let mut driver = CrawlDriver::new(fetcher, "wine-14").with_max_pages(Some(1));
    let mut sink = CsvSink::new(Vec::new());

    let summary = driver.run(&mut sink).await.expect("Crawl failed");

    assert!(summary.stopped_by_limit);
    assert_eq!(driver.state(), CrawlState::Running { offset: 1 });

    mock_server.verify().await;
}
