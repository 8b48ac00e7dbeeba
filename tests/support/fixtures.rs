//! In-memory archives and listing payloads.

use std::io::{Cursor, Write};

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds a zip archive containing `entries` (name, content).
///
/// Names ending in `/` become directory entries.
pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::FileOptions::default();
    for (name, content) in entries {
        if name.ends_with('/') {
            writer.add_directory(*name, options).unwrap();
        } else {
            writer.start_file(*name, options).unwrap();
            writer.write_all(content).unwrap();
        }
    }
    writer.finish().unwrap().into_inner()
}

/// Listing JSON for `year` whose packs download from `server`'s `/archive/<year>/<file>`.
pub fn listing_body(server: &MockServer, year: i32, packs: &[(&str, &str)]) -> String {
    let results: Vec<String> = packs
        .iter()
        .map(|(name, file)| {
            format!(
                r#"{{"name": "{name}", "archive": "{file}", "download": "{}/archive/{year}/{file}", "year": {year}, "gallery": "https://16colo.rs/pack/{name}", "groups": []}}"#,
                server.uri()
            )
        })
        .collect();
    format!(
        r#"{{"page": {{"total": {n}, "sort": "name", "order": "asc", "pagesize": 100, "page": 1, "pages": 1, "offset": 0}}, "results": [{}]}}"#,
        results.join(","),
        n = packs.len()
    )
}

/// Mounts the listing for `year` at `/v1/year/<year>`.
pub async fn mount_listing(server: &MockServer, year: i32, packs: &[(&str, &str)]) {
    Mock::given(method("GET"))
        .and(path(format!("/v1/year/{year}")))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_body(server, year, packs)))
        .mount(server)
        .await;
}

/// Mounts `bytes` at `/archive/<year>/<file>`.
pub async fn mount_archive(server: &MockServer, year: i32, file: &str, bytes: Vec<u8>) {
    Mock::given(method("GET"))
        .and(path(format!("/archive/{year}/{file}")))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(bytes))
        .mount(server)
        .await;
}

/// API base URL for `server` as the listing client expects it.
pub fn api_base(server: &MockServer) -> String {
    format!("{}/v1", server.uri())
}
