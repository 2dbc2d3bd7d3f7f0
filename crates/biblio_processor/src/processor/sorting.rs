/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use super::ListedReference;
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Primary sort key: compatibility-decomposed, accents stripped, lowercased.
pub fn sort_key(key: &str) -> String {
    key.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Case- and accent-insensitive ordering of reference keys. Ties fall back
/// to the lowercased key and then the key itself, so the order is total.
pub fn compare_keys(a: &str, b: &str) -> Ordering {
    sort_key(a)
        .cmp(&sort_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

/// Order a reference list by the keys the author wrote.
pub fn sort_references(references: &mut [ListedReference]) {
    references.sort_by(|a, b| compare_keys(a.key.as_str(), b.key.as_str()));
}
