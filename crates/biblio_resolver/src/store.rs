/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! The per-render reference store.
//!
//! A store starts [`StoreState::Empty`], is filled by exactly one resolution
//! pass ([`StoreState::Populating`]) and is then sealed as
//! [`StoreState::Ready`]. Readiness is a one-shot broadcast: every waiter,
//! present or future, is released once and the store stays read-only.
//! A new render needs a new store.

use crate::error::{ResolverError, Result};
use biblio_core::{BiblioEntry, ReferenceKey};
use parking_lot::RwLock;
use std::collections::HashMap;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    Empty,
    Populating,
    Ready,
}

#[derive(Debug)]
pub struct ReferenceStore {
    entries: RwLock<HashMap<ReferenceKey, BiblioEntry>>,
    state: watch::Sender<StoreState>,
}

impl Default for ReferenceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceStore {
    pub fn new() -> Self {
        let (state, _) = watch::channel(StoreState::Empty);
        Self {
            entries: RwLock::new(HashMap::new()),
            state,
        }
    }

    pub fn state(&self) -> StoreState {
        *self.state.borrow()
    }

    pub fn is_ready(&self) -> bool {
        self.state() == StoreState::Ready
    }

    /// Enter the populating phase. Fails once the store is ready.
    pub fn begin(&self) -> Result<()> {
        let mut sealed = false;
        self.state.send_if_modified(|state| match state {
            StoreState::Empty => {
                *state = StoreState::Populating;
                true
            }
            StoreState::Populating => false,
            StoreState::Ready => {
                sealed = true;
                false
            }
        });
        if sealed {
            Err(ResolverError::StoreSealed)
        } else {
            Ok(())
        }
    }

    /// Merge entries into the store; later applications overwrite earlier
    /// ones for the same key. Content entries without an id get the
    /// lowercase of their key.
    pub fn apply<I>(&self, entries: I) -> Result<usize>
    where
        I: IntoIterator<Item = (ReferenceKey, BiblioEntry)>,
    {
        self.begin()?;
        let mut map = self.entries.write();
        let mut count = 0;
        for (key, entry) in entries {
            let entry = entry.with_default_id(&key);
            map.insert(key, entry);
            count += 1;
        }
        Ok(count)
    }

    /// Seal the store and release every waiter. Signals at most once.
    pub fn mark_ready(&self) -> Result<()> {
        let mut already = false;
        self.state.send_if_modified(|state| {
            if *state == StoreState::Ready {
                already = true;
                false
            } else {
                *state = StoreState::Ready;
                true
            }
        });
        if already {
            Err(ResolverError::AlreadyReady)
        } else {
            Ok(())
        }
    }

    /// Wait until the store is ready.
    pub async fn wait_ready(&self) {
        let mut rx = self.state.subscribe();
        // The sender lives as long as `self`, so this cannot observe a close.
        let _ = rx.wait_for(|state| *state == StoreState::Ready).await;
    }

    /// Wait for readiness, then look up `key` exactly.
    pub async fn get(&self, key: &str) -> Option<BiblioEntry> {
        self.wait_ready().await;
        self.lookup(key)
    }

    /// Look up `key` without waiting.
    pub fn lookup(&self, key: &str) -> Option<BiblioEntry> {
        self.entries.read().get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.read().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn keys(&self) -> Vec<ReferenceKey> {
        self.entries.read().keys().cloned().collect()
    }
}
