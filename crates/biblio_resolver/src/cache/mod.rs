/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Local cache of fetched entries.
//!
//! The cache is an optimization, never a source of truth. The
//! [`CacheGateway`] hides every backend failure: a broken or unavailable
//! cache simply answers "miss" for every key, and failed writes are logged
//! and forgotten.

pub mod file;
pub mod memory;

use crate::config::CacheConfig;
use crate::error::Result;
use async_trait::async_trait;
use biblio_core::{BiblioEntry, ReferenceKey};
use chrono::{DateTime, Duration, Utc};
use futures::future::join_all;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

pub use file::FileCache;
pub use memory::MemoryCache;

/// A cached entry and the instant it stops being usable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheRecord {
    pub key: ReferenceKey,
    pub data: BiblioEntry,
    pub expires_at: DateTime<Utc>,
}

impl CacheRecord {
    /// Usable only while `now < expires_at`.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Persistent storage behind the gateway.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    async fn get(&self, key: &ReferenceKey) -> Result<Option<CacheRecord>>;

    async fn put_all(&self, records: Vec<CacheRecord>) -> Result<()>;

    async fn clear(&self) -> Result<()>;
}

/// Source of the current time; replaceable in tests.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

pub struct CacheGateway {
    backend: Option<Arc<dyn CacheBackend>>,
    degraded: AtomicBool,
    clock: Clock,
    max_age: Duration,
}

impl std::fmt::Debug for CacheGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheGateway")
            .field("available", &self.is_available())
            .field("max_age", &self.max_age)
            .finish()
    }
}

impl CacheGateway {
    pub fn new(backend: Arc<dyn CacheBackend>) -> Self {
        Self {
            backend: Some(backend),
            degraded: AtomicBool::new(false),
            clock: Arc::new(Utc::now),
            max_age: Duration::hours(1),
        }
    }

    /// A gateway with no backend: every lookup misses, every write is dropped.
    pub fn disabled() -> Self {
        Self {
            backend: None,
            degraded: AtomicBool::new(false),
            clock: Arc::new(Utc::now),
            max_age: Duration::hours(1),
        }
    }

    /// Open the file cache described by `config`.
    ///
    /// Initialization failures yield a disabled gateway.
    pub async fn open(config: &CacheConfig) -> Self {
        if !config.enabled {
            return Self::disabled().with_max_age(config.max_age());
        }
        let Some(path) = config.resolved_path() else {
            warn!("no cache directory available; caching disabled");
            return Self::disabled().with_max_age(config.max_age());
        };
        match FileCache::open(&path).await {
            Ok(cache) => Self::new(Arc::new(cache)).with_max_age(config.max_age()),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cache initialization failed; caching disabled");
                Self::disabled().with_max_age(config.max_age())
            }
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_some() && !self.degraded.load(Ordering::Relaxed)
    }

    fn backend(&self) -> Option<&Arc<dyn CacheBackend>> {
        if self.degraded.load(Ordering::Relaxed) {
            None
        } else {
            self.backend.as_ref()
        }
    }

    /// A fresh record for `key`; expired, absent and unreadable are all misses.
    pub async fn find(&self, key: &ReferenceKey) -> Option<CacheRecord> {
        let backend = self.backend()?;
        match backend.get(key).await {
            Ok(Some(record)) if record.is_fresh(self.now()) => Some(record),
            Ok(Some(_)) => {
                debug!(key = %key, "cache record expired");
                None
            }
            Ok(None) => None,
            Err(e) => {
                warn!(key = %key, error = %e, "cache read failed; treating cache as empty");
                self.degraded.store(true, Ordering::Relaxed);
                None
            }
        }
    }

    /// Partition `keys` into fresh hits and misses, preserving key order.
    pub async fn find_all(
        &self,
        keys: &[ReferenceKey],
    ) -> (IndexMap<ReferenceKey, BiblioEntry>, Vec<ReferenceKey>) {
        let records = join_all(keys.iter().map(|key| self.find(key))).await;
        let mut hits = IndexMap::new();
        let mut misses = Vec::new();
        for (key, record) in keys.iter().zip(records) {
            match record {
                Some(record) => {
                    hits.insert(key.clone(), record.data);
                }
                None => misses.push(key.clone()),
            }
        }
        (hits, misses)
    }

    /// Store a batch with one expiry. Returns whether the write succeeded.
    pub async fn add_all(
        &self,
        entries: &IndexMap<ReferenceKey, BiblioEntry>,
        expires_at: DateTime<Utc>,
    ) -> bool {
        let Some(backend) = self.backend() else {
            return false;
        };
        if entries.is_empty() {
            return true;
        }
        let records = entries
            .iter()
            .map(|(key, data)| CacheRecord {
                key: key.clone(),
                data: data.clone(),
                expires_at,
            })
            .collect();
        match backend.put_all(records).await {
            Ok(()) => true,
            Err(e) => {
                warn!(count = entries.len(), error = %e, "cache write failed");
                false
            }
        }
    }

    /// Expiry for a batch fetched at `fetched_at`: the earlier of the
    /// configured maximum age and the source's own `Expires`.
    pub fn expiry_for(
        &self,
        fetched_at: DateTime<Utc>,
        source_expires: Option<DateTime<Utc>>,
    ) -> DateTime<Utc> {
        let ceiling = fetched_at
            .checked_add_signed(self.max_age)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        match source_expires {
            Some(expires) => ceiling.min(expires),
            None => ceiling,
        }
    }

    /// Empty the cache; best effort.
    pub async fn clear(&self) -> bool {
        let Some(backend) = self.backend.as_ref() else {
            return false;
        };
        match backend.clear().await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "cache clear failed");
                false
            }
        }
    }
}
