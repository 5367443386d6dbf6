//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use scope_crawler::config::{load_config, Config};
use scope_crawler::crawler::{crawl, Crawler};
use scope_crawler::output::{CrawlReport, JsonFileSink, OutputError, ReportSink};
use scope_crawler::{ConfigError, CrawlError};
use std::io::Write;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration for the given seed
fn create_test_config(seed: &str, max_depth: u32) -> Config {
    let mut config = Config::default();
    config.crawler.seed_url = Some(seed.to_string());
    config.crawler.max_depth = max_depth;
    config.crawler.requests_per_second = 100.0;
    config.crawler.request_timeout = 5;
    config.user_agent.crawler_name = "TestBot".to_string();
    config.user_agent.crawler_version = "1.0.0".to_string();
    config
}

/// An HTML page with a title and the given anchors
fn html_page(title: &str, hrefs: &[String]) -> ResponseTemplate {
    let anchors: String = hrefs
        .iter()
        .map(|href| format!(r#"<a href="{}">link</a>"#, href))
        .collect();
    ResponseTemplate::new(200)
        .set_body_string(format!(
            "<html><head><title>{}</title></head><body>{}</body></html>",
            title, anchors
        ))
        .insert_header("content-type", "text/html")
}

async fn mount_page(server: &MockServer, route: &str, title: &str, hrefs: &[String], times: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html_page(title, hrefs))
        .expect(times)
        .mount(server)
        .await;
}

async fn run(config: &Config) -> CrawlReport {
    tokio::time::timeout(Duration::from_secs(30), crawl(config.clone()))
        .await
        .expect("crawl should terminate")
        .expect("crawl should start")
        .report
}

#[tokio::test]
async fn test_full_crawl_single_domain() {
    let site = MockServer::start().await;
    let other = MockServer::start().await;
    let base = site.uri();

    mount_page(
        &site,
        "/",
        "Home",
        &["/b".to_string(), format!("{}/", other.uri())],
        1,
    )
    .await;
    mount_page(&site, "/b", "Page B", &[], 1).await;

    // Same IP, different port: a different site, never fetched
    mount_page(&other, "/", "Elsewhere", &[], 0).await;

    let report = run(&create_test_config(&format!("{}/", base), 2)).await;

    assert_eq!(report.base_url, format!("{}/", base));
    assert_eq!(report.max_depth, 2);
    assert_eq!(report.total_pages, 2);

    let home = report.page(&format!("{}/", base)).unwrap();
    assert_eq!(home.title, "Home");
    assert_eq!(home.depth, 0);
    assert_eq!(home.status_code, 200);
    assert_eq!(
        home.links,
        vec![format!("{}/b", base), format!("{}/", other.uri())]
    );

    let page_b = report.page(&format!("{}/b", base)).unwrap();
    assert_eq!(page_b.title, "Page B");
    assert_eq!(page_b.depth, 1);
    assert!(page_b.links.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_cyclic_links_fetch_each_page_once() {
    let site = MockServer::start().await;
    let base = site.uri();

    mount_page(
        &site,
        "/",
        "A",
        &["/b".to_string(), "/b#top".to_string(), "/".to_string()],
        1,
    )
    .await;
    mount_page(&site, "/b", "B", &["/".to_string(), "/b".to_string()], 1).await;

    let report = run(&create_test_config(&format!("{}/", base), 10)).await;

    assert_eq!(report.total_pages, 2);
    // Fetch counts are checked by wiremock when the server drops
}

#[tokio::test]
async fn test_max_depth_zero_fetches_only_seed() {
    let site = MockServer::start().await;
    let base = site.uri();

    mount_page(&site, "/", "Home", &["/b".to_string(), "/c".to_string()], 1).await;
    mount_page(&site, "/b", "B", &[], 0).await;
    mount_page(&site, "/c", "C", &[], 0).await;

    let report = run(&create_test_config(&format!("{}/", base), 0)).await;

    assert_eq!(report.total_pages, 1);
    assert_eq!(report.pages[0].depth, 0);
    assert_eq!(report.pages[0].links.len(), 2);
}

#[tokio::test]
async fn test_failed_page_is_isolated() {
    let site = MockServer::start().await;
    let base = site.uri();

    mount_page(
        &site,
        "/",
        "Home",
        &["/broken".to_string(), "/ok".to_string()],
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&site)
        .await;
    mount_page(&site, "/ok", "OK", &["/deeper".to_string()], 1).await;
    mount_page(&site, "/deeper", "Deeper", &[], 1).await;

    let completed = Crawler::from_config(&create_test_config(&format!("{}/", base), 3))
        .unwrap()
        .run()
        .await;

    let report = &completed.report;
    assert_eq!(report.total_pages, 3);
    assert!(report.page(&format!("{}/broken", base)).is_none());
    assert_eq!(report.page(&format!("{}/deeper", base)).unwrap().depth, 2);

    // The failed URL still appears in its parent's links
    let home = report.page(&format!("{}/", base)).unwrap();
    assert!(home.links.contains(&format!("{}/broken", base)));

    assert_eq!(completed.statistics.pages_visited, 4);
    assert_eq!(completed.statistics.pages_failed, 1);
}

#[tokio::test]
async fn test_unreachable_seed_produces_empty_report() {
    // Bind and immediately release a port so nothing is listening on it
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let report = run(&create_test_config(&format!("http://127.0.0.1:{}/", port), 2)).await;

    assert_eq!(report.total_pages, 0);
    assert!(report.pages.is_empty());
    assert!(report.end_time >= report.start_time);
}

#[tokio::test]
async fn test_invalid_seed_aborts_before_crawling() {
    let result = crawl(create_test_config("not a url", 2)).await;
    assert!(matches!(
        result,
        Err(CrawlError::Config(ConfigError::InvalidUrl(_)))
    ));

    let mut config = create_test_config("https://example.com/", 2);
    config.crawler.seed_url = None;
    assert!(matches!(
        crawl(config).await,
        Err(CrawlError::Config(ConfigError::MissingSeed))
    ));
}

#[tokio::test]
async fn test_rate_limit_spaces_requests() {
    let site = MockServer::start().await;
    let base = site.uri();
    let children: Vec<String> = (1..=4).map(|i| format!("/p{}", i)).collect();

    mount_page(&site, "/", "Home", &children, 1).await;
    for child in &children {
        mount_page(&site, child, child, &[], 1).await;
    }

    let mut config = create_test_config(&format!("{}/", base), 1);
    config.crawler.requests_per_second = 10.0;

    let started = std::time::Instant::now();
    let report = run(&config).await;

    // 5 fetch starts at 10/s span at least 4 periods of 100ms
    assert_eq!(report.total_pages, 5);
    assert!(started.elapsed() >= Duration::from_millis(390));
}

#[tokio::test]
async fn test_report_written_to_json_file() {
    let site = MockServer::start().await;
    let base = site.uri();

    mount_page(&site, "/", "Home", &["/b".to_string()], 1).await;
    mount_page(&site, "/b", "B", &[], 1).await;

    let dir = tempfile::tempdir().unwrap();
    let results_path = dir.path().join("crawl_results.json");

    let report = run(&create_test_config(&format!("{}/", base), 1)).await;
    let sink = JsonFileSink::new(&results_path);
    sink.write_report(&report).unwrap();

    let text = std::fs::read_to_string(&results_path).unwrap();
    assert!(text.ends_with('\n'));
    assert!(text.contains("\n  \"base_url\""));

    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["total_pages"], 2);
    assert_eq!(json["max_depth"], 1);
    assert_eq!(json["pages"].as_array().unwrap().len(), 2);
    for key in ["base_url", "start_time", "end_time"] {
        assert!(json[key].is_string(), "missing {}", key);
    }
    for page in json["pages"].as_array().unwrap() {
        for key in [
            "url",
            "title",
            "links",
            "depth",
            "crawled_at",
            "response_time_ms",
            "status_code",
        ] {
            assert!(!page[key].is_null(), "page missing {}", key);
        }
    }

    let parsed: CrawlReport = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed.total_pages, parsed.pages.len());
}

#[tokio::test]
async fn test_unwritable_results_path_keeps_report() {
    let site = MockServer::start().await;
    mount_page(&site, "/", "Home", &[], 1).await;

    let report = run(&create_test_config(&format!("{}/", site.uri()), 0)).await;

    let dir = tempfile::tempdir().unwrap();
    let sink = JsonFileSink::new(dir.path().join("missing").join("out.json"));

    assert!(matches!(
        sink.write_report(&report),
        Err(OutputError::Io { .. })
    ));
    assert_eq!(report.total_pages, 1);
}

#[tokio::test]
async fn test_crawl_from_config_file() {
    let site = MockServer::start().await;
    let base = site.uri();
    mount_page(&site, "/", "Home", &["/b".to_string()], 1).await;
    mount_page(&site, "/b", "B", &[], 1).await;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[crawler]
seed-url = "{}/"
max-depth = 1
requests-per-second = 50.0

[user-agent]
crawler-name = "FileBot"
crawler-version = "2.0"
"#,
        base
    )
    .unwrap();

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.user_agent.header_value(), "FileBot/2.0");

    let report = run(&config).await;
    assert_eq!(report.total_pages, 2);
}
