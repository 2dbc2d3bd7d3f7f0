/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Following `aliasOf` chains to a canonical entry.

use crate::diagnostics::Diagnostic;
use biblio_core::{BiblioEntry, ReferenceKey};
use biblio_resolver::ReferenceStore;
use std::collections::HashSet;
use tracing::warn;

/// Outcome of resolving one key.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// A content entry, with the key it is stored under.
    Resolved {
        canonical: ReferenceKey,
        entry: BiblioEntry,
    },
    /// No entry, or an alias pointing at nothing.
    Missing,
    /// The chain revisits a key.
    Circular(Diagnostic),
}

impl Resolution {
    pub fn entry(&self) -> Option<&BiblioEntry> {
        match self {
            Resolution::Resolved { entry, .. } => Some(entry),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved { .. })
    }
}

/// Follow aliases from `key` until a content entry or a dead end.
///
/// A cycle is reported against `key` and the last key of the chain, the one
/// whose `aliasOf` points back into it.
pub fn resolve_alias(store: &ReferenceStore, key: &ReferenceKey) -> Resolution {
    let mut visited: HashSet<ReferenceKey> = HashSet::from([key.clone()]);
    let mut current = key.clone();
    loop {
        match store.lookup(current.as_str()) {
            None => return Resolution::Missing,
            Some(BiblioEntry::Alias(alias)) => {
                if !visited.insert(alias.alias_of.clone()) {
                    warn!(key = %key, last = %current, "circular alias");
                    return Resolution::Circular(Diagnostic::circular_alias(key, &current));
                }
                current = alias.alias_of;
            }
            Some(entry) => {
                let entry = entry.with_default_id(&current);
                return Resolution::Resolved {
                    canonical: current,
                    entry,
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use biblio_core::ShortFormEntry;
    use crate::diagnostics::DiagnosticKind;

    fn store(entries: Vec<(&str, BiblioEntry)>) -> ReferenceStore {
        let store = ReferenceStore::new();
        store
            .apply(entries.into_iter().map(|(k, e)| (ReferenceKey::from(k), e)))
            .unwrap();
        store.mark_ready().unwrap();
        store
    }

    fn short(title: &str) -> BiblioEntry {
        BiblioEntry::from(ShortFormEntry {
            title: title.into(),
            ..Default::default()
        })
    }

    #[test]
    fn test_follows_chain() {
        let store = store(vec![
            ("A", BiblioEntry::alias("B")),
            ("B", BiblioEntry::alias("C")),
            ("C", short("Target")),
        ]);
        let Resolution::Resolved { canonical, entry } = resolve_alias(&store, &"A".into()) else {
            panic!("expected a resolved entry");
        };
        assert_eq!(canonical.as_str(), "C");
        assert_eq!(entry.id(), Some("c"));
    }

    #[test]
    fn test_cycle_terminates_with_diagnostic() {
        let store = store(vec![("A", BiblioEntry::alias("B")), ("B", BiblioEntry::alias("A"))]);
        let Resolution::Circular(diagnostic) = resolve_alias(&store, &"A".into()) else {
            panic!("expected a cycle");
        };
        assert_eq!(diagnostic.kind, DiagnosticKind::CircularAlias);
        assert_eq!(
            diagnostic.message,
            "Circular reference in biblio DB between [`A`] and [`B`]."
        );
    }

    #[test]
    fn test_self_alias_and_dangling_alias() {
        let store = store(vec![("SELF", BiblioEntry::alias("SELF")), ("GONE", BiblioEntry::alias("NOWHERE"))]);
        assert!(matches!(resolve_alias(&store, &"SELF".into()), Resolution::Circular(_)));
        assert_eq!(resolve_alias(&store, &"GONE".into()), Resolution::Missing);
        assert_eq!(resolve_alias(&store, &"ABSENT".into()), Resolution::Missing);
    }
}
