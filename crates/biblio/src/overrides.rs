/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Author-supplied override files.

use anyhow::{Context, Result};
use biblio_core::{BiblioEntry, ReferenceKey};
use indexmap::IndexMap;
use serde_json::Value;
use std::path::Path;

/// Read a YAML or JSON mapping of key to entry. `.json` files are parsed as
/// JSON, anything else as YAML.
pub fn load_overrides(path: &Path) -> Result<IndexMap<ReferenceKey, BiblioEntry>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read overrides {}", path.display()))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    parse_overrides(&content, is_json)
        .with_context(|| format!("invalid overrides {}", path.display()))
}

pub fn parse_overrides(content: &str, is_json: bool) -> Result<IndexMap<ReferenceKey, BiblioEntry>> {
    let raw: IndexMap<String, Value> = if is_json {
        serde_json::from_str(content)?
    } else if content.trim().is_empty() {
        IndexMap::new()
    } else {
        serde_yaml::from_str(content)?
    };
    raw.into_iter()
        .map(|(key, value)| {
            let entry = BiblioEntry::from_value(value)
                .with_context(|| format!("entry \"{}\"", key))?;
            Ok((ReferenceKey::new(key), entry))
        })
        .collect()
}
