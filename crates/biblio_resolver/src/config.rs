/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Resolver configuration (`[sources]` and `[cache]` tables).

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_SPECREF_URL: &str = "https://api.specref.org/bibrefs";
pub const DEFAULT_CROSSREF_URL: &str = "https://api.crossref.org/works";

/// Upper bound on how long a fetched batch stays fresh.
pub const DEFAULT_MAX_AGE_SECS: u64 = 60 * 60;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ResolverConfig {
    #[serde(default)]
    pub sources: SourcesConfig,

    #[serde(default)]
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    #[serde(default = "default_specref_url")]
    pub specref_url: String,

    #[serde(default = "default_crossref_url")]
    pub crossref_url: String,

    /// Contact address sent to Crossref for its polite pool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mailto: Option<String>,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    #[serde(default = "default_max_age_secs")]
    pub max_age_secs: u64,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            specref_url: default_specref_url(),
            crossref_url: default_crossref_url(),
            mailto: None,
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
            max_age_secs: default_max_age_secs(),
        }
    }
}

fn default_specref_url() -> String {
    DEFAULT_SPECREF_URL.to_string()
}

fn default_crossref_url() -> String {
    DEFAULT_CROSSREF_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_user_agent() -> String {
    format!("biblio/{}", env!("CARGO_PKG_VERSION"))
}

fn default_max_age_secs() -> u64 {
    DEFAULT_MAX_AGE_SECS
}

fn default_true() -> bool {
    true
}

impl CacheConfig {
    pub fn max_age(&self) -> chrono::Duration {
        // chrono rejects spans above i64::MAX milliseconds.
        let secs = i64::try_from(self.max_age_secs)
            .unwrap_or(i64::MAX)
            .min(i64::MAX / 1000);
        chrono::Duration::seconds(secs)
    }

    /// The configured path, or `<cache dir>/biblio/references.json`.
    pub fn resolved_path(&self) -> Option<PathBuf> {
        self.path
            .clone()
            .or_else(|| dirs::cache_dir().map(|d| d.join("biblio").join("references.json")))
    }
}

impl ResolverConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
