/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Long-form source (Crossref works API).
//!
//! One `GET <endpoint>?filter=doi:A,doi:B&rows=N` per batch of `doi:` keys.
//! Results are nested under `message.items`; every item must carry a `DOI`.

use super::{get_json, FetchedBatch, MetadataSource};
use crate::error::{ResolverError, Result};
use async_trait::async_trait;
use biblio_core::{BiblioEntry, EntryKind, ReferenceKey, DOI_PREFIX};
use indexmap::IndexMap;
use reqwest::Client;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, error, warn};
use url::Url;

#[derive(Debug, Clone)]
pub struct CrossrefSource {
    client: Client,
    endpoint: Url,
    mailto: Option<String>,
}

impl CrossrefSource {
    pub fn new(client: Client, endpoint: Url) -> Self {
        Self {
            client,
            endpoint,
            mailto: None,
        }
    }

    pub fn with_mailto(mut self, mailto: Option<String>) -> Self {
        self.mailto = mailto;
        self
    }

    pub fn request_url(&self, keys: &[ReferenceKey]) -> Url {
        let filter = keys
            .iter()
            .filter_map(ReferenceKey::doi)
            .map(|doi| format!("{}{}", DOI_PREFIX, doi))
            .collect::<Vec<_>>()
            .join(",");
        let mut url = self.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("filter", &filter);
            query.append_pair("rows", &keys.len().to_string());
            if let Some(mailto) = &self.mailto {
                query.append_pair("mailto", mailto);
            }
        }
        url
    }
}

/// Decode a Crossref response into entries keyed by the requested `doi:` key.
///
/// Items without a `DOI` are malformed: they are logged and dropped. Items
/// for DOIs nobody asked for are ignored.
pub fn parse_response(
    requested: &[ReferenceKey],
    body: Value,
) -> Result<IndexMap<ReferenceKey, BiblioEntry>> {
    let items = body
        .get("message")
        .and_then(|m| m.get("items"))
        .and_then(Value::as_array)
        .ok_or_else(|| ResolverError::MalformedResponse {
            origin: "crossref",
            message: "missing message.items array".to_string(),
        })?;

    // DOIs are case-insensitive.
    let by_doi: HashMap<String, &ReferenceKey> = requested
        .iter()
        .filter_map(|key| key.doi().map(|doi| (doi.to_lowercase(), key)))
        .collect();

    let mut entries = IndexMap::with_capacity(items.len());
    for item in items {
        let Some(doi) = item.get("DOI").and_then(Value::as_str) else {
            let title = item
                .get("title")
                .map(|t| t.to_string())
                .unwrap_or_else(|| "<untitled>".to_string());
            error!(title = %title, "long-form metadata has no DOI; dropping item");
            continue;
        };

        let Some(key) = by_doi.get(&doi.to_lowercase()) else {
            debug!(doi = %doi, "ignoring unrequested DOI");
            continue;
        };

        match BiblioEntry::from_value_as(item.clone(), EntryKind::LongForm) {
            Ok(entry) => {
                entries.insert((*key).clone(), entry);
            }
            Err(e) => warn!(doi = %doi, error = %e, "skipping malformed crossref item"),
        }
    }
    Ok(entries)
}

#[async_trait]
impl MetadataSource for CrossrefSource {
    fn name(&self) -> &'static str {
        "crossref"
    }

    async fn fetch(&self, keys: &[ReferenceKey]) -> Option<FetchedBatch> {
        let keys: Vec<ReferenceKey> = keys.iter().filter(|k| k.is_doi()).cloned().collect();
        if keys.is_empty() {
            return Some(FetchedBatch::default());
        }

        let url = self.request_url(&keys);
        let (body, expires) = match get_json(&self.client, url).await {
            Ok(response) => response,
            Err(e) => {
                warn!(source = self.name(), keys = keys.len(), error = %e, "request failed");
                return None;
            }
        };

        match parse_response(&keys, body) {
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

    fn keys(list: &[&str]) -> Vec<ReferenceKey> {
        list.iter().map(|k| ReferenceKey::from(*k)).collect()
    }

    #[test]
    fn test_request_url() {
        let source = CrossrefSource::new(
            Client::new(),
            Url::parse("https://api.crossref.org/works").unwrap(),
        )
        .with_mailto(Some("team@example.org".to_string()));
        let url = source.request_url(&keys(&["doi:10.1/a", "DOI:10.2/B"]));
        let pairs: HashMap<String, String> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs["filter"], "doi:10.1/a,doi:10.2/B");
        assert_eq!(pairs["rows"], "2");
        assert_eq!(pairs["mailto"], "team@example.org");
    }

    #[test]
    fn test_items_are_keyed_by_requested_key() {
        let requested = keys(&["doi:10.1000/ABC"]);
        let body = json!({"message": {"items": [
            {"DOI": "10.1000/abc", "title": ["Case Study"], "issued": {"date-parts": [[2021]]}}
        ]}});
        let entries = parse_response(&requested, body).unwrap();
        let entry = entries.get("doi:10.1000/ABC").unwrap();
        assert_eq!(entry.title(), Some("Case Study"));
    }

    #[test]
    fn test_item_without_doi_is_dropped() {
        let requested = keys(&["doi:10.1/a", "doi:10.1/b"]);
        let body = json!({"message": {"items": [
            {"title": ["No identifier"]},
            {"DOI": "10.1/b", "title": ["Has identifier"]},
            {"DOI": "10.9/unrequested", "title": ["Stray"]}
        ]}});
        let entries = parse_response(&requested, body).unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries.contains_key("doi:10.1/b"));
        assert!(!entries.contains_key("doi:10.1/a"));
    }

    #[test]
    fn test_missing_items_is_malformed() {
        let err = parse_response(&keys(&["doi:10.1/a"]), json!({"status": "ok"})).unwrap_err();
        assert!(matches!(err, ResolverError::MalformedResponse { origin: "crossref", .. }));
    }
}
