/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Rendering options (the `[render]` configuration table).

use biblio_core::ReferenceKey;
use serde::{Deserialize, Serialize};
use url::form_urlencoded::byte_serialize;

pub const DEFAULT_ANCHOR_PREFIX: &str = "bib-";
pub const DEFAULT_SEARCH_URL: &str = "https://www.specref.org/?q={key}";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatOptions {
    /// Prefix of reference-list anchors: `bib-rfc2119`.
    #[serde(default = "default_anchor_prefix")]
    pub anchor_prefix: String,

    /// Where to send authors looking for a missing reference; `{key}` is
    /// replaced by the URL-encoded key.
    #[serde(default = "default_search_url")]
    pub search_url: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            anchor_prefix: default_anchor_prefix(),
            search_url: default_search_url(),
        }
    }
}

fn default_anchor_prefix() -> String {
    DEFAULT_ANCHOR_PREFIX.to_string()
}

fn default_search_url() -> String {
    DEFAULT_SEARCH_URL.to_string()
}

impl FormatOptions {
    /// Anchor id for a canonical entry id.
    pub fn anchor(&self, id: &str) -> String {
        format!("{}{}", self.anchor_prefix, id)
    }

    /// Link target an inline citation of `key` points at before rewriting.
    pub fn href_for_key(&self, key: &ReferenceKey) -> String {
        format!("#{}", self.anchor(&key.folded()))
    }

    pub fn search_url_for(&self, key: &ReferenceKey) -> String {
        let encoded: String = byte_serialize(key.as_str().as_bytes()).collect();
        self.search_url.replace("{key}", &encoded)
    }
}
