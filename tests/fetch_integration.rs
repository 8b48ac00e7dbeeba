//! Integration tests for the archive fetcher.
//!
//! These tests verify the atomic placement guarantees: a destination path
//! either holds the complete body or does not exist.

use std::path::Path;

use fetch16c_core::ErrorKind;
use fetch16c_core::download::{DownloadError, HttpClient, NoProgress};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

mod support;
use support::socket_guard::{should_skip_socket_bound_test, start_mock_server_or_skip};

fn part_path(destination: &Path) -> std::path::PathBuf {
    let mut name = destination.as_os_str().to_owned();
    name.push(".part");
    name.into()
}

#[tokio::test]
async fn test_fetch_preserves_binary_content() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    let body: Vec<u8> = (0..=255u8).cycle().take(64 * 1024).collect();
    Mock::given(method("GET"))
        .and(path("/archive/1996/pack.zip"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.clone()))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let destination = temp.path().join("pack.zip");
    let client = HttpClient::new().unwrap();
    let written = client
        .fetch_to_file(
            &format!("{}/archive/1996/pack.zip", server.uri()),
            &destination,
            &NoProgress,
        )
        .await
        .unwrap();

    assert_eq!(written, body.len() as u64);
    assert_eq!(std::fs::read(&destination).unwrap(), body);
    assert!(!part_path(&destination).exists());
}

#[tokio::test]
async fn test_fetch_replaces_existing_destination() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/new.zip"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"fresh".to_vec()))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let destination = temp.path().join("new.zip");
    std::fs::write(&destination, b"stale content").unwrap();

    let client = HttpClient::new().unwrap();
    client
        .fetch_to_file(&format!("{}/new.zip", server.uri()), &destination, &NoProgress)
        .await
        .unwrap();

    assert_eq!(std::fs::read(&destination).unwrap(), b"fresh");
}

#[tokio::test]
async fn test_fetch_http_error_leaves_no_files() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/gone.zip"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let destination = temp.path().join("gone.zip");
    let client = HttpClient::new().unwrap();
    let err = client
        .fetch_to_file(&format!("{}/gone.zip", server.uri()), &destination, &NoProgress)
        .await
        .unwrap_err();

    assert!(matches!(err, DownloadError::HttpStatus { status: 404, .. }), "{err:?}");
    assert_eq!(err.kind(), ErrorKind::Network);
    assert!(!destination.exists());
    assert!(!part_path(&destination).exists());
}

#[tokio::test]
async fn test_fetch_truncated_body_leaves_no_files() {
    if should_skip_socket_bound_test() {
        return;
    }
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    // Announces 1000 bytes, sends 10, then hangs up.
    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 1024];
        let _ = socket.read(&mut request).await.unwrap();
        socket
            .write_all(
                b"HTTP/1.1 200 OK\r\nContent-Type: application/zip\r\nContent-Length: 1000\r\n\r\n0123456789",
            )
            .await
            .unwrap();
        socket.flush().await.unwrap();
        drop(socket);
    });

    let temp = TempDir::new().unwrap();
    let destination = temp.path().join("cut.zip");
    let client = HttpClient::new().unwrap();
    let err = client
        .fetch_to_file(&format!("http://{addr}/cut.zip"), &destination, &NoProgress)
        .await
        .unwrap_err();
    server.await.unwrap();

    assert_eq!(err.kind(), ErrorKind::Network, "{err:?}");
    assert!(!destination.exists());
    assert!(!part_path(&destination).exists());
}

#[tokio::test]
async fn test_fetch_unwritable_destination_is_filesystem_error() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/a.zip"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"data".to_vec()))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let destination = temp.path().join("missing-dir").join("a.zip");
    let client = HttpClient::new().unwrap();
    let err = client
        .fetch_to_file(&format!("{}/a.zip", server.uri()), &destination, &NoProgress)
        .await
        .unwrap_err();

    assert!(err.is_filesystem(), "{err:?}");
    assert_eq!(err.kind(), ErrorKind::Filesystem);
}
