/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! The resolution pass.
//!
//! Merge order is fixed and is what gives overrides their precedence:
//!
//! 1. normalize the two key sets (normative wins case-insensitive ties),
//! 2. compute the keys that need external data,
//! 3. apply fresh cache hits,
//! 4. fetch the misses from both sources, write them back to the cache and
//!    apply them,
//! 5. apply the local overrides,
//! 6. mark the store ready.
//!
//! Source and cache failures only leave keys without data; steps 5 and 6
//! always run.

use crate::cache::CacheGateway;
use crate::config::ResolverConfig;
use crate::error::Result;
use crate::source::{build_client, CrossrefSource, MetadataSource, SpecrefSource};
use crate::store::ReferenceStore;
use biblio_core::{BiblioEntry, ReferenceKey};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

/// The keys a document cites and the author's local entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceRequest {
    #[serde(default)]
    pub normative: Vec<ReferenceKey>,
    #[serde(default)]
    pub informative: Vec<ReferenceKey>,
    /// Author-supplied entries; never fetched, always applied last.
    #[serde(default)]
    pub local: IndexMap<ReferenceKey, BiblioEntry>,
}

impl ReferenceRequest {
    pub fn new<N, I>(normative: N, informative: I) -> Self
    where
        N: IntoIterator,
        N::Item: Into<ReferenceKey>,
        I: IntoIterator,
        I::Item: Into<ReferenceKey>,
    {
        Self {
            normative: normative.into_iter().map(Into::into).collect(),
            informative: informative.into_iter().map(Into::into).collect(),
            local: IndexMap::new(),
        }
    }

    pub fn with_local(mut self, local: IndexMap<ReferenceKey, BiblioEntry>) -> Self {
        self.local = local;
        self
    }

    /// Drop informative keys that are also normative, ignoring case.
    pub fn normalize(&mut self) {
        let normative: HashSet<String> = self.normative.iter().map(ReferenceKey::folded).collect();
        self.informative
            .retain(|key| !normative.contains(&key.folded()));
    }

    /// Keys that need cache or network data, in document order.
    ///
    /// Keys defined locally are excluded, but targets of local aliases that
    /// point outside the local table are included.
    pub fn needed_keys(&self) -> Vec<ReferenceKey> {
        let mut needed: IndexSet<ReferenceKey> = self
            .normative
            .iter()
            .chain(&self.informative)
            .filter(|key| !self.local.contains_key(*key))
            .cloned()
            .collect();
        for target in self.local.values().filter_map(BiblioEntry::alias_of) {
            if !self.local.contains_key(target) {
                needed.insert(target.clone());
            }
        }
        needed.into_iter().collect()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveOptions {
    /// Skip the cache lookup and refetch every needed key.
    pub force_update: bool,
}

/// What one pass did.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResolutionReport {
    pub needed: Vec<ReferenceKey>,
    pub cache_hits: Vec<ReferenceKey>,
    pub fetched: Vec<ReferenceKey>,
    pub overrides: usize,
    /// Needed keys that ended the pass without any entry.
    pub unresolved: Vec<ReferenceKey>,
}

pub struct Resolver {
    short_form: Arc<dyn MetadataSource>,
    long_form: Arc<dyn MetadataSource>,
    cache: CacheGateway,
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("short_form", &self.short_form.name())
            .field("long_form", &self.long_form.name())
            .field("cache", &self.cache)
            .finish()
    }
}

impl Resolver {
    pub fn new(
        short_form: Arc<dyn MetadataSource>,
        long_form: Arc<dyn MetadataSource>,
        cache: CacheGateway,
    ) -> Self {
        Self {
            short_form,
            long_form,
            cache,
        }
    }

    /// Build the network sources and open the cache from configuration.
    pub async fn from_config(config: &ResolverConfig) -> Result<Self> {
        let client = build_client(&config.sources)?;
        let specref = SpecrefSource::new(client.clone(), Url::parse(&config.sources.specref_url)?);
        let crossref = CrossrefSource::new(client, Url::parse(&config.sources.crossref_url)?)
            .with_mailto(config.sources.mailto.clone());
        let cache = CacheGateway::open(&config.cache).await;
        Ok(Self::new(Arc::new(specref), Arc::new(crossref), cache))
    }

    pub fn with_cache(mut self, cache: CacheGateway) -> Self {
        self.cache = cache;
        self
    }

    pub fn cache(&self) -> &CacheGateway {
        &self.cache
    }

    /// Fetch `keys` from both sources, split by namespace, and write the
    /// merged batch to the cache. `None` only when every source that was
    /// asked failed.
    pub async fn update_from_network(
        &self,
        keys: &[ReferenceKey],
    ) -> Option<IndexMap<ReferenceKey, BiblioEntry>> {
        let (doi_keys, plain_keys): (Vec<ReferenceKey>, Vec<ReferenceKey>) =
            keys.iter().cloned().partition(ReferenceKey::is_doi);

        let fetched_at = self.cache.now();
        let (short, long) = tokio::join!(
            async {
                if plain_keys.is_empty() {
                    None
                } else {
                    Some(self.short_form.fetch(&plain_keys).await)
                }
            },
            async {
                if doi_keys.is_empty() {
                    None
                } else {
                    Some(self.long_form.fetch(&doi_keys).await)
                }
            },
        );

        // Outer `None`: source not asked. Inner `None`: source failed.
        let attempts: Vec<_> = [short, long].into_iter().flatten().collect();
        if !attempts.is_empty() && attempts.iter().all(Option::is_none) {
            return None;
        }

        let mut merged = IndexMap::new();
        let mut expires = None;
        for batch in attempts.into_iter().flatten() {
            expires = match (expires, batch.expires) {
                (Some(a), Some(b)) => Some(std::cmp::min(a, b)),
                (a, b) => a.or(b),
            };
            merged.extend(batch.entries);
        }

        let expires_at = self.cache.expiry_for(fetched_at, expires);
        self.cache.add_all(&merged, expires_at).await;
        Some(merged)
    }

    /// Cache hits for `keys`, following alias targets found in the cache so
    /// cached aliases do not dangle. Returns hits and remaining misses.
    async fn lookup_cache(
        &self,
        keys: &[ReferenceKey],
    ) -> (IndexMap<ReferenceKey, BiblioEntry>, Vec<ReferenceKey>) {
        let (mut hits, mut misses) = self.cache.find_all(keys).await;
        let mut seen: HashSet<ReferenceKey> = keys.iter().cloned().collect();
        let mut pending: Vec<ReferenceKey> = alias_targets(&hits, &mut seen);
        while !pending.is_empty() {
            let (more_hits, more_misses) = self.cache.find_all(&pending).await;
            pending = alias_targets(&more_hits, &mut seen);
            hits.extend(more_hits);
            misses.extend(more_misses);
        }
        (hits, misses)
    }

    /// Run one resolution pass into `store` and mark it ready.
    pub async fn resolve(
        &self,
        request: &mut ReferenceRequest,
        store: &ReferenceStore,
        options: ResolveOptions,
    ) -> Result<ResolutionReport> {
        store.begin()?;

        request.normalize();
        let needed = request.needed_keys();
        let mut report = ResolutionReport {
            needed: needed.clone(),
            ..Default::default()
        };

        let misses = if options.force_update || needed.is_empty() {
            needed.clone()
        } else {
            let (hits, misses) = self.lookup_cache(&needed).await;
            report.cache_hits = hits.keys().cloned().collect();
            store.apply(hits)?;
            misses
        };

        if !misses.is_empty() {
            debug!(count = misses.len(), "fetching cache misses");
            if let Some(fetched) = self.update_from_network(&misses).await {
                report.fetched = fetched.keys().cloned().collect();
                store.apply(fetched)?;
            }
        }

        report.overrides = store.apply(request.local.clone())?;
        store.mark_ready()?;

        report.unresolved = needed
            .iter()
            .filter(|key| !store.contains(key.as_str()))
            .cloned()
            .collect();

        info!(
            needed = report.needed.len(),
            cache_hits = report.cache_hits.len(),
            fetched = report.fetched.len(),
            overrides = report.overrides,
            unresolved = report.unresolved.len(),
            "references resolved"
        );
        Ok(report)
    }
}

fn alias_targets(
    entries: &IndexMap<ReferenceKey, BiblioEntry>,
    seen: &mut HashSet<ReferenceKey>,
) -> Vec<ReferenceKey> {
    entries
        .values()
        .filter_map(BiblioEntry::alias_of)
        .filter(|target| seen.insert((*target).clone()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(list: &[&str]) -> Vec<ReferenceKey> {
        list.iter().map(|k| ReferenceKey::from(*k)).collect()
    }

    #[test]
    fn test_normalize_normative_wins() {
        let mut request = ReferenceRequest::new(["RFC2119"], ["rfc2119", "HTML5"]);
        request.normalize();
        assert_eq!(request.normative, keys(&["RFC2119"]));
        assert_eq!(request.informative, keys(&["HTML5"]));
    }

    #[test]
    fn test_needed_keys_excludes_local_but_includes_external_alias_targets() {
        let mut local = IndexMap::new();
        local.insert(ReferenceKey::from("LOCAL"), BiblioEntry::alias("doi:10.1/x"));
        local.insert(ReferenceKey::from("INNER"), BiblioEntry::alias("LOCAL"));
        let request = ReferenceRequest::new(["LOCAL", "HTML"], ["INNER", "HTML"]).with_local(local);
        assert_eq!(request.needed_keys(), keys(&["HTML", "doi:10.1/x"]));
    }
}
