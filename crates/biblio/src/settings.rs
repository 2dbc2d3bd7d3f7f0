/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use anyhow::{Context, Result};
use biblio_processor::FormatOptions;
use biblio_resolver::{CacheConfig, ResolverConfig, SourcesConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File names looked for in the working directory, in order.
pub const CONFIG_FILE_NAMES: [&str; 2] = [".biblio.toml", "biblio.toml"];

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub sources: SourcesConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub render: FormatOptions,
}

impl Settings {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load `explicit`, or the first config file found in `dir`, or defaults.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => discover(dir),
        };
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let settings = Self::from_toml_str(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(settings)
    }

    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            sources: self.sources.clone(),
            cache: self.cache.clone(),
        }
    }
}

fn discover(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_tables() {
        let settings = Settings::from_toml_str(
            r#"
[sources]
specref_url = "http://localhost:8080/bibrefs"
mailto = "editor@example.org"

[cache]
max_age_secs = 600

[render]
anchor_prefix = "ref-"
"#,
        )
        .unwrap();
        assert_eq!(settings.sources.specref_url, "http://localhost:8080/bibrefs");
        assert_eq!(settings.sources.mailto.as_deref(), Some("editor@example.org"));
        assert_eq!(settings.cache.max_age_secs, 600);
        assert!(settings.cache.enabled);
        assert_eq!(settings.render.anchor_prefix, "ref-");
        assert_eq!(settings.render.search_url, "https://www.specref.org/?q={key}");
    }

    #[test]
    fn test_discovery_prefers_dotfile() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover(dir.path()).is_none());

        std::fs::write(dir.path().join("biblio.toml"), "[render]\nanchor_prefix = \"plain-\"\n").unwrap();
        let settings = Settings::load(None, dir.path()).unwrap();
        assert_eq!(settings.render.anchor_prefix, "plain-");

        std::fs::write(dir.path().join(".biblio.toml"), "[render]\nanchor_prefix = \"dot-\"\n").unwrap();
        let settings = Settings::load(None, dir.path()).unwrap();
        assert_eq!(settings.render.anchor_prefix, "dot-");
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(Settings::load(Some(missing.as_path()), dir.path()).is_err());
        assert_eq!(
            Settings::load(None, dir.path()).unwrap().render,
            FormatOptions::default()
        );
    }
}
