/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Author-supplied reference keys.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Prefix marking keys that resolve through the long-form (DOI) source.
pub const DOI_PREFIX: &str = "doi:";

/// A reference key as written by the author, e.g. `RFC2119` or `doi:10.1/xyz`.
///
/// Equality and hashing are exact; use [`ReferenceKey::folded`] or
/// [`ReferenceKey::eq_ignore_case`] for duplicate detection. Display always
/// preserves the original casing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceKey(String);

impl ReferenceKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for keys in the `doi:` namespace (case-insensitive prefix).
    pub fn is_doi(&self) -> bool {
        self.0
            .get(..DOI_PREFIX.len())
            .is_some_and(|p| p.eq_ignore_ascii_case(DOI_PREFIX))
    }

    /// The DOI part of a `doi:` key.
    pub fn doi(&self) -> Option<&str> {
        if self.is_doi() {
            Some(&self.0[DOI_PREFIX.len()..])
        } else {
            None
        }
    }

    /// Lowercase form used for duplicate detection and default ids.
    pub fn folded(&self) -> String {
        self.0.to_lowercase()
    }

    pub fn eq_ignore_case(&self, other: &str) -> bool {
        self.folded() == other.to_lowercase()
    }
}

impl fmt::Display for ReferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ReferenceKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ReferenceKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ReferenceKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for ReferenceKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}
