/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

#![allow(dead_code)]

use biblio_core::{BiblioEntry, CslName, IssuedDate, LongFormEntry, ReferenceKey, ShortFormEntry};
use biblio_resolver::ReferenceStore;

// --- Helper Functions for Test Data Construction ---

pub fn key(k: &str) -> ReferenceKey {
    ReferenceKey::from(k)
}

pub fn keys(list: &[&str]) -> Vec<ReferenceKey> {
    list.iter().map(|k| ReferenceKey::from(*k)).collect()
}

pub fn short(title: &str) -> BiblioEntry {
    BiblioEntry::from(ShortFormEntry {
        title: title.to_string(),
        publisher: Some("W3C".to_string()),
        ..Default::default()
    })
}

pub fn short_with_id(id: &str, title: &str) -> BiblioEntry {
    BiblioEntry::from(ShortFormEntry {
        id: Some(id.to_string()),
        title: title.to_string(),
        ..Default::default()
    })
}

pub fn long(doi: &str, title: &str) -> BiblioEntry {
    BiblioEntry::from(LongFormEntry {
        title: title.to_string(),
        author: vec![CslName::new("Hopper", "Grace")],
        issued: Some(IssuedDate::year(2020)),
        doi: Some(doi.to_string()),
        ..Default::default()
    })
}

/// A store already filled and sealed.
pub fn ready_store(entries: Vec<(&str, BiblioEntry)>) -> ReferenceStore {
    let store = ReferenceStore::new();
    store
        .apply(entries.into_iter().map(|(k, e)| (key(k), e)))
        .unwrap();
    store.mark_ready().unwrap();
    store
}
