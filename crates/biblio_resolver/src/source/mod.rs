/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Network sources of bibliographic metadata.
//!
//! Every source is a pure request/response function over a batch of keys:
//! it returns the entries it found, or `None` when the whole request failed.
//! Failures are logged here and never propagate past this boundary.

pub mod crossref;
pub mod specref;

use crate::config::SourcesConfig;
use crate::error::{ResolverError, Result};
use async_trait::async_trait;
use biblio_core::{BiblioEntry, ReferenceKey};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use reqwest::header::{HeaderMap, ACCEPT, EXPIRES};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

pub use crossref::CrossrefSource;
pub use specref::SpecrefSource;

/// Entries returned by one source request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchedBatch {
    pub entries: IndexMap<ReferenceKey, BiblioEntry>,
    /// The source's own `Expires` value, when it sent one.
    pub expires: Option<DateTime<Utc>>,
}

impl FetchedBatch {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A metadata source for one key namespace.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Fetch entries for `keys`; `None` on total failure.
    async fn fetch(&self, keys: &[ReferenceKey]) -> Option<FetchedBatch>;
}

/// Build the shared HTTP client for both sources.
pub fn build_client(config: &SourcesConfig) -> Result<Client> {
    Ok(Client::builder()
        .timeout(Duration::from_millis(config.timeout_ms))
        .user_agent(config.user_agent.clone())
        .build()?)
}

/// GET `url` and decode a JSON body, along with any `Expires` header.
///
/// Any non-2xx status is an error.
pub(crate) async fn get_json(
    client: &Client,
    url: Url,
) -> Result<(Value, Option<DateTime<Utc>>)> {
    debug!(url = %url, "fetching reference metadata");
    let response = client
        .get(url.clone())
        .header(ACCEPT, "application/json")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ResolverError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let expires = parse_expires(response.headers());
    let body: Value = response.json().await?;
    Ok((body, expires))
}

/// Parse an HTTP-date `Expires` header; invalid values are ignored.
pub(crate) fn parse_expires(headers: &HeaderMap) -> Option<DateTime<Utc>> {
    let value = headers.get(EXPIRES)?.to_str().ok()?;
    DateTime::parse_from_rfc2822(value.trim())
        .ok()
        .map(|d| d.with_timezone(&Utc))
}
