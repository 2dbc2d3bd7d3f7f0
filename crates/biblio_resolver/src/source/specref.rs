/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Short-form source (Specref API).
//!
//! One `GET <endpoint>?refs=A,B,C` per batch; the response is a JSON object
//! keyed by reference id. Entries carrying `aliasOf` become aliases.

use super::{get_json, FetchedBatch, MetadataSource};
use crate::error::{ResolverError, Result};
use async_trait::async_trait;
use biblio_core::{BiblioEntry, EntryKind, ReferenceKey};
use indexmap::IndexMap;
use reqwest::Client;
use serde_json::Value;
use tracing::warn;
use url::Url;

#[derive(Debug, Clone)]
pub struct SpecrefSource {
    client: Client,
    endpoint: Url,
}

impl SpecrefSource {
    pub fn new(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    pub fn request_url(&self, keys: &[ReferenceKey]) -> Url {
        let refs = keys
            .iter()
            .map(ReferenceKey::as_str)
            .collect::<Vec<_>>()
            .join(",");
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("refs", &refs);
        url
    }
}

/// Decode a Specref response body into entries keyed by reference id.
///
/// Items that cannot be decoded are skipped with a warning.
pub fn parse_response(body: Value) -> Result<IndexMap<ReferenceKey, BiblioEntry>> {
    let Value::Object(items) = body else {
        return Err(ResolverError::MalformedResponse {
            origin: "specref",
            message: "expected a JSON object keyed by reference id".to_string(),
        });
    };

    let mut entries = IndexMap::with_capacity(items.len());
    for (id, item) in items {
        let kind = if item.get("aliasOf").is_some() {
            EntryKind::Alias
        } else {
            EntryKind::ShortForm
        };
        match BiblioEntry::from_value_as(item, kind) {
            Ok(entry) => {
                entries.insert(ReferenceKey::new(id), entry);
            }
            Err(e) => warn!(key = %id, error = %e, "skipping malformed specref entry"),
        }
    }
    Ok(entries)
}

#[async_trait]
impl MetadataSource for SpecrefSource {
    fn name(&self) -> &'static str {
        "specref"
    }

    async fn fetch(&self, keys: &[ReferenceKey]) -> Option<FetchedBatch> {
        if keys.is_empty() {
            return Some(FetchedBatch::default());
        }

        let url = self.request_url(keys);
        let (body, expires) = match get_json(&self.client, url).await {
            Ok(response) => response,
            Err(e) => {
                warn!(source = self.name(), keys = keys.len(), error = %e, "request failed");
                return None;
            }
        };

        match parse_response(body) {
            Ok(entries) => Some(FetchedBatch { entries, expires }),
            Err(e) => {
                warn!(source = self.name(), error = %e, "unusable response");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_url_joins_keys() {
        let source = SpecrefSource::new(
            Client::new(),
            Url::parse("https://api.specref.org/bibrefs").unwrap(),
        );
        let url = source.request_url(&[ReferenceKey::from("RFC2119"), ReferenceKey::from("HTML")]);
        let refs: Vec<_> = url
            .query_pairs()
            .filter(|(k, _)| k == "refs")
            .map(|(_, v)| v.into_owned())
            .collect();
        assert_eq!(refs, vec!["RFC2119,HTML".to_string()]);
    }

    #[test]
    fn test_parse_response_aliases_and_content() {
        let body = json!({
            "HTML5": {"aliasOf": "html"},
            "html": {
                "title": "HTML Standard",
                "href": "https://html.spec.whatwg.org/multipage/",
                "authors": ["Anne van Kesteren", "Domenic Denicola"],
                "etAl": true,
                "publisher": "WHATWG",
                "status": "Living Standard"
            },
            "broken": 42
        });
        let entries = parse_response(body).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries.get("HTML5").and_then(|e| e.alias_of()).map(|k| k.as_str()),
            Some("html")
        );
        assert_eq!(entries.get("html").and_then(|e| e.title()), Some("HTML Standard"));
        assert!(!entries.contains_key("broken"));
    }

    #[test]
    fn test_parse_response_rejects_non_object() {
        assert!(matches!(
            parse_response(json!([1, 2, 3])),
            Err(ResolverError::MalformedResponse { .. })
        ));
    }
}
