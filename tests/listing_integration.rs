//! Integration tests for the year listing client.

use fetch16c_core::download::HttpClient;
use fetch16c_core::{ErrorKind, ListingClient, ListingError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

mod support;
use support::fixtures::{api_base, mount_listing};
use support::socket_guard::start_mock_server_or_skip;

#[tokio::test]
async fn test_listing_preserves_order_and_fields() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_listing(
        &server,
        1996,
        &[("acid-0796", "acid-0796.zip"), ("ice-9607", "ice-9607.lha")],
    )
    .await;

    let http = HttpClient::new().unwrap();
    let client = ListingClient::with_base_url(&http, api_base(&server));
    let listing = client.fetch_year_listing(1996).await.unwrap();

    assert_eq!(listing.year, 1996);
    assert_eq!(listing.len(), 2);
    assert_eq!(listing.entries[0].name, "acid-0796");
    assert_eq!(listing.entries[1].name, "ice-9607");
    assert_eq!(listing.entries[1].archive_filename, "ice-9607.lha");
    assert_eq!(
        listing.entries[0].download_url,
        format!("{}/archive/1996/acid-0796.zip", server.uri())
    );
    assert_eq!(listing.page.total, 2);
}

#[tokio::test]
async fn test_listing_empty_results_is_ok() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_listing(&server, 1989, &[]).await;

    let http = HttpClient::new().unwrap();
    let client = ListingClient::with_base_url(&http, api_base(&server));
    let listing = client.fetch_year_listing(1989).await.unwrap();

    assert!(listing.is_empty());
}

#[tokio::test]
async fn test_listing_wrong_shape_is_decode_error() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/v1/year/1997"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"results": {"name": 1}}"#))
        .mount(&server)
        .await;

    let http = HttpClient::new().unwrap();
    let client = ListingClient::with_base_url(&http, api_base(&server));
    let err = client.fetch_year_listing(1997).await.unwrap_err();

    assert!(
        matches!(err, ListingError::Decode { year: 1997, .. }),
        "{err:?}"
    );
    assert_eq!(err.kind(), ErrorKind::Decode);
}

#[tokio::test]
async fn test_listing_server_error_is_network_kind() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/v1/year/1998"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let http = HttpClient::new().unwrap();
    let client = ListingClient::with_base_url(&http, api_base(&server));
    let err = client.fetch_year_listing(1998).await.unwrap_err();

    assert!(matches!(err, ListingError::HttpStatus { status: 500, .. }), "{err:?}");
    assert_eq!(err.kind(), ErrorKind::Network);
}

#[tokio::test]
async fn test_listing_unreachable_host_is_network_kind() {
    let http = HttpClient::new().unwrap();
    // Port 9 (discard) is closed on any sane test host.
    let client = ListingClient::with_base_url(&http, "http://127.0.0.1:9/v1");
    let err = client.fetch_year_listing(1999).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Network);
}
