use std::time::Duration;

use entryflow_engine::{FailureKind, FetchSettings, Fetcher, ReqwestFetcher};
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn parse(url: String) -> Url {
    Url::parse(&url).expect("test url")
}

#[tokio::test]
async fn fetcher_returns_html_and_sends_ajax_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/thread"))
        .and(header("X-Requested-With", "XMLHttpRequest"))
        .and(header("Cache-Control", "no-cache"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<html>ok</html>", "text/html; charset=utf-8"),
        )
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default()).expect("client");
    let url = parse(format!("{}/thread", server.uri()));

    let output = fetcher.fetch(&url).await.expect("fetch ok");
    assert_eq!(output.bytes, b"<html>ok</html>");
    assert_eq!(output.final_url, url.as_str());
    assert!(output.content_type.unwrap().starts_with("text/html"));
}

#[tokio::test]
async fn fetcher_attaches_configured_session_cookie() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/thread"))
        .and(header("Cookie", "session=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let settings = FetchSettings {
        session_cookie: Some("session=abc123".to_string()),
        ..FetchSettings::default()
    };
    let fetcher = ReqwestFetcher::new(settings).expect("client");
    let url = parse(format!("{}/thread", server.uri()));

    fetcher.fetch(&url).await.expect("fetch ok");
}

#[tokio::test]
async fn fetcher_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default()).expect("client");
    let url = parse(format!("{}/missing", server.uri()));

    let err = fetcher.fetch(&url).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(404));
}

#[tokio::test]
async fn fetcher_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string("slow"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..FetchSettings::default()
    };
    let fetcher = ReqwestFetcher::new(settings).expect("client");
    let url = parse(format!("{}/slow", server.uri()));

    let err = fetcher.fetch(&url).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn fetcher_rejects_too_large_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/large"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "text/html")
                .insert_header("Content-Length", "11")
                .set_body_string("01234567890"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 10,
        ..FetchSettings::default()
    };
    let fetcher = ReqwestFetcher::new(settings).expect("client");
    let url = parse(format!("{}/large", server.uri()));

    let err = fetcher.fetch(&url).await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(11)
        }
    );
}
