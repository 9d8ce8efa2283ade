//! Dataset loading over a loopback HTTP server and from disk.
//!
//! Run: cargo test --test fetch_test

#![allow(clippy::unwrap_used)]

use std::io::Write;
use std::time::Duration;

use climate_heatmap::fetch::{load_file, Fetcher, Source};
use climate_heatmap::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const BODY: &str = r#"{"baseTemperature":8.66,"monthlyVariance":[{"year":1753,"month":1,"variance":-1.366},{"year":1753,"month":2,"variance":-2.223}]}"#;

/// Serve a single canned response on an ephemeral port and return its URL.
async fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = stream.read(&mut buf).await.unwrap();
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.unwrap();
    });

    format!("http://{addr}/global-temperature.json")
}

#[tokio::test]
async fn test_fetch_success() {
    let url = serve_once("200 OK", BODY).await;
    let fetcher = Fetcher::new(Duration::from_secs(5)).unwrap();

    let dataset = fetcher.fetch(&url).await.unwrap();

    assert_eq!(dataset.len(), 2);
    assert!((dataset.base_temperature() - 8.66).abs() < 1e-12);
    assert_eq!(dataset.year_extent(), Some((1753, 1753)));
}

#[tokio::test]
async fn test_fetch_not_found_reports_status() {
    let url = serve_once("404 Not Found", "").await;
    let fetcher = Fetcher::new(Duration::from_secs(5)).unwrap();

    match fetcher.fetch(&url).await {
        Err(Error::HttpStatus { status, url: failed }) => {
            assert_eq!(status, 404);
            assert_eq!(failed, url);
        }
        other => panic!("expected HttpStatus error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_malformed_body() {
    let url = serve_once("200 OK", r#"{"baseTemperature": "warm"}"#).await;
    let fetcher = Fetcher::new(Duration::from_secs(5)).unwrap();

    assert!(matches!(fetcher.fetch(&url).await, Err(Error::Json(_))));
}

#[tokio::test]
async fn test_fetch_connection_refused() {
    // Bind then drop so the port is very likely closed.
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let fetcher = Fetcher::new(Duration::from_secs(2)).unwrap();

    assert!(matches!(fetcher.fetch(&format!("http://{addr}/")).await, Err(Error::Http(_))));
}

#[tokio::test]
async fn test_load_dispatches_on_source() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(BODY.as_bytes()).unwrap();
    let fetcher = Fetcher::new(Duration::from_secs(5)).unwrap();

    let from_file = fetcher.load(&Source::File(file.path().to_path_buf())).await.unwrap();
    let url = serve_once("200 OK", BODY).await;
    let from_url = fetcher.load(&Source::Url(url)).await.unwrap();

    assert_eq!(from_file, from_url);
}

#[tokio::test]
async fn test_load_file_missing() {
    let result = load_file("/nonexistent/global-temperature.json").await;

    assert!(matches!(result, Err(Error::Io(_))));
}
