/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! JSON file cache backend.
//!
//! The whole cache is one JSON document mapping key to [`CacheRecord`]. It is
//! read once on open and rewritten (via a temporary file and rename) on every
//! batch write.

use super::{CacheBackend, CacheRecord};
use crate::error::Result;
use async_trait::async_trait;
use biblio_core::ReferenceKey;
use chrono::Utc;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

#[derive(Debug)]
pub struct FileCache {
    path: PathBuf,
    records: Mutex<BTreeMap<ReferenceKey, CacheRecord>>,
}

impl FileCache {
    /// Open (or create) the cache at `path`.
    ///
    /// A missing file is an empty cache; an unreadable document is discarded
    /// with a warning and replaced on the next write.
    pub async fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let records = match fs::read(path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(records) => records,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "discarding unreadable cache file");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), records = records.len(), "opened reference cache");

        Ok(Self {
            path: path.to_path_buf(),
            records: Mutex::new(records),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, records: &BTreeMap<ReferenceKey, CacheRecord>) -> Result<()> {
        let content = serde_json::to_vec_pretty(records)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl CacheBackend for FileCache {
    async fn get(&self, key: &ReferenceKey) -> Result<Option<CacheRecord>> {
        Ok(self.records.lock().await.get(key).cloned())
    }

    async fn put_all(&self, records: Vec<CacheRecord>) -> Result<()> {
        let mut map = self.records.lock().await;
        let now = Utc::now();
        let mut next = map.clone();
        next.retain(|_, record| record.is_fresh(now));
        for record in records {
            next.insert(record.key.clone(), record);
        }
        // Memory only changes once the file does.
        self.persist(&next).await?;
        *map = next;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let mut map = self.records.lock().await;
        map.clear();
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
