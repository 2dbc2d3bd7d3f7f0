/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! In-process cache backend.

use super::{CacheBackend, CacheRecord};
use crate::error::Result;
use async_trait::async_trait;
use biblio_core::ReferenceKey;
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct MemoryCache {
    records: RwLock<HashMap<ReferenceKey, CacheRecord>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[async_trait]
impl CacheBackend for MemoryCache {
    async fn get(&self, key: &ReferenceKey) -> Result<Option<CacheRecord>> {
        Ok(self.records.read().get(key).cloned())
    }

    async fn put_all(&self, records: Vec<CacheRecord>) -> Result<()> {
        let mut map = self.records.write();
        for record in records {
            map.insert(record.key.clone(), record);
        }
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.records.write().clear();
        Ok(())
    }
}
