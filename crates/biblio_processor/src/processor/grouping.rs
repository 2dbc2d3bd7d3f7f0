/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Good/bad classification and deduplication by canonical id.

use super::aliases::{resolve_alias, Resolution};
use super::ListedReference;
use crate::diagnostics::Diagnostic;
use biblio_core::ReferenceKey;
use biblio_resolver::ReferenceStore;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Normative,
    Informative,
}

#[derive(Debug, Default)]
pub struct Grouping {
    pub normative: Vec<ListedReference>,
    pub informative: Vec<ListedReference>,
    /// Keys without an entry, in document order.
    pub bad: Vec<ReferenceKey>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Grouping {
    fn section_mut(&mut self, section: Section) -> &mut Vec<ListedReference> {
        match section {
            Section::Normative => &mut self.normative,
            Section::Informative => &mut self.informative,
        }
    }
}

/// Resolve every key and fold keys sharing a canonical id into the entry of
/// the first one, in document order (normative keys before informative).
///
/// Keys compare case-insensitively: a key missing from the store takes the
/// entry of a resolved key that differs from it only in case, and case
/// variants of a bad key are listed once.
pub fn group(
    store: &ReferenceStore,
    normative: &[ReferenceKey],
    informative: &[ReferenceKey],
) -> Grouping {
    let mut seen: HashSet<&ReferenceKey> = HashSet::new();
    let resolved: Vec<(Section, &ReferenceKey, Resolution)> = normative
        .iter()
        .map(|k| (Section::Normative, k))
        .chain(informative.iter().map(|k| (Section::Informative, k)))
        .filter(|(_, key)| seen.insert(*key))
        .map(|(section, key)| (section, key, resolve_alias(store, key)))
        .collect();

    let mut by_folded: HashMap<String, usize> = HashMap::new();
    for (index, (_, key, resolution)) in resolved.iter().enumerate() {
        if resolution.is_resolved() {
            by_folded.entry(key.folded()).or_insert(index);
        }
    }

    let mut grouping = Grouping::default();
    let mut listed: HashMap<String, (Section, usize)> = HashMap::new();
    let mut bad_folded: HashSet<String> = HashSet::new();

    for (section, key, resolution) in &resolved {
        let resolution = match resolution {
            Resolution::Missing => match by_folded.get(&key.folded()) {
                Some(&index) => &resolved[index].2,
                None => resolution,
            },
            _ => resolution,
        };
        match resolution {
            Resolution::Resolved { canonical, entry } => {
                let id = entry
                    .id()
                    .map(str::to_string)
                    .unwrap_or_else(|| canonical.folded());
                if let Some(&(first_section, index)) = listed.get(&id) {
                    grouping.section_mut(first_section)[index]
                        .aliases
                        .push((*key).clone());
                    continue;
                }
                let list = grouping.section_mut(*section);
                listed.insert(id.clone(), (*section, list.len()));
                list.push(ListedReference {
                    key: (*key).clone(),
                    id: Some(id),
                    entry: Some(entry.clone()),
                    aliases: vec![(*key).clone()],
                });
            }
            Resolution::Missing | Resolution::Circular(_) => {
                if let Resolution::Circular(diagnostic) = resolution {
                    grouping.diagnostics.push(diagnostic.clone());
                }
                if !bad_folded.insert(key.folded()) {
                    continue;
                }
                grouping.bad.push((*key).clone());
                grouping
                    .section_mut(*section)
                    .push(ListedReference::unresolved(key));
            }
        }
    }
    grouping
}
