/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

mod common;
use common::*;

use biblio_core::EntryKind;
use biblio_resolver::{CrossrefSource, MetadataSource, SpecrefSource};
use reqwest::Client;

const SPECREF_BODY: &str = r#"{
    "RFC2119": {
        "authors": ["S. Bradner"],
        "href": "https://www.rfc-editor.org/rfc/rfc2119",
        "title": "Key words for use in RFCs to Indicate Requirement Levels",
        "status": "Best Current Practice",
        "publisher": "IETF",
        "date": "March 1997"
    },
    "HTML5": {"aliasOf": "html"},
    "html": {"title": "HTML Standard", "href": "https://html.spec.whatwg.org/multipage/"}
}"#;

#[tokio::test]
async fn test_specref_success() {
    let server = serve(
        200,
        &[("expires", "Wed, 21 Oct 2037 07:28:00 GMT")],
        SPECREF_BODY,
    )
    .await;
    let source = SpecrefSource::new(Client::new(), server.url("/bibrefs"));

    let batch = source
        .fetch(&keys(&["RFC2119", "HTML5"]))
        .await
        .expect("request should succeed");

    assert_eq!(batch.entries.len(), 3);
    assert_eq!(batch.entries["HTML5"].kind(), EntryKind::Alias);
    assert_eq!(batch.entries["RFC2119"].kind(), EntryKind::ShortForm);
    assert_eq!(
        batch.expires.map(|e| e.to_rfc3339()).as_deref(),
        Some("2037-10-21T07:28:00+00:00")
    );

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].starts_with("GET /bibrefs?refs=RFC2119%2CHTML5 "));
}

#[tokio::test]
async fn test_specref_non_success_status_is_no_data() {
    let server = serve(404, &[], r#"{"error": "nope"}"#).await;
    let source = SpecrefSource::new(Client::new(), server.url("/bibrefs"));
    assert!(source.fetch(&keys(&["RFC2119"])).await.is_none());

    let server = serve(304, &[], "").await;
    let source = SpecrefSource::new(Client::new(), server.url("/bibrefs"));
    assert!(source.fetch(&keys(&["RFC2119"])).await.is_none());
}

#[tokio::test]
async fn test_specref_unreachable_is_no_data() {
    let source = SpecrefSource::new(Client::new(), dead_url().await);
    assert!(source.fetch(&keys(&["RFC2119"])).await.is_none());
}

#[tokio::test]
async fn test_specref_invalid_json_is_no_data() {
    let server = serve(200, &[], "<html>oops</html>").await;
    let source = SpecrefSource::new(Client::new(), server.url("/bibrefs"));
    assert!(source.fetch(&keys(&["RFC2119"])).await.is_none());
}

#[tokio::test]
async fn test_empty_batches_skip_the_network() {
    let source = SpecrefSource::new(Client::new(), dead_url().await);
    let batch = source.fetch(&[]).await.unwrap();
    assert!(batch.is_empty());

    let source = CrossrefSource::new(Client::new(), dead_url().await);
    let batch = source.fetch(&keys(&["not-a-doi"])).await.unwrap();
    assert!(batch.is_empty());
}

#[tokio::test]
async fn test_crossref_drops_items_without_doi() {
    let body = r#"{
        "status": "ok",
        "message": {
            "items": [
                {"title": ["Anonymous item"], "publisher": "Nobody"},
                {
                    "DOI": "10.1145/3133956",
                    "title": ["A Good Paper"],
                    "author": [{"given": "Grace", "family": "Hopper"}],
                    "publisher": "ACM",
                    "issued": {"date-parts": [[2017, 10, 30]]},
                    "type": "proceedings-article"
                }
            ]
        }
    }"#;
    let server = serve(200, &[], body).await;
    let source = CrossrefSource::new(Client::new(), server.url("/works"));

    let batch = source
        .fetch(&keys(&["doi:10.1145/3133956", "doi:10.9999/missing"]))
        .await
        .unwrap();

    assert_eq!(batch.entries.len(), 1);
    let entry = &batch.entries["doi:10.1145/3133956"];
    assert_eq!(entry.kind(), EntryKind::LongForm);
    assert_eq!(entry.title(), Some("A Good Paper"));
    assert!(!batch.entries.contains_key("doi:10.9999/missing"));

    let requests = server.requests();
    assert!(requests[0].contains("filter=doi%3A10.1145%2F3133956%2Cdoi%3A10.9999%2Fmissing"));
}

#[tokio::test]
async fn test_crossref_server_error_is_no_data() {
    let server = serve(500, &[], "{}").await;
    let source = CrossrefSource::new(Client::new(), server.url("/works"));
    assert!(source.fetch(&keys(&["doi:10.1/a"])).await.is_none());
}
