/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Bibliographic entries.
//!
//! An entry is either an alias pointing at another key, or content in one of
//! two shapes: the compact short form served by Specref-style sources, or the
//! CSL-like long form served by Crossref-style DOI sources.
//!
//! Serialized entries carry an explicit `kind` tag. Author-written entries may
//! omit it; see [`BiblioEntry::from_value`] for how the variant is chosen then.

use crate::csl::{first_string, first_string_opt, string_or_many, CslName, IssuedDate, StringOrNumber};
use crate::error::EntryError;
use crate::key::ReferenceKey;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Which variant an entry is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Alias,
    ShortForm,
    LongForm,
}

impl EntryKind {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "alias" => Some(EntryKind::Alias),
            "short-form" => Some(EntryKind::ShortForm),
            "long-form" => Some(EntryKind::LongForm),
            _ => None,
        }
    }
}

/// A bibliographic entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum BiblioEntry {
    Alias(AliasEntry),
    ShortForm(ShortFormEntry),
    LongForm(Box<LongFormEntry>),
}

/// A pointer to another key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasEntry {
    #[serde(rename = "aliasOf")]
    pub alias_of: ReferenceKey,
}

/// Compact, pre-summarized citation record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortFormEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub et_al: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Detailed CSL-like record keyed by DOI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongFormEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "first_string")]
    pub title: String,
    #[serde(
        default,
        deserialize_with = "first_string_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub subtitle: Option<String>,
    #[serde(
        rename = "container-title",
        default,
        deserialize_with = "first_string_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub container_title: Option<String>,
    #[serde(rename = "URL", default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub author: Vec<CslName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<StringOrNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue: Option<StringOrNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<StringOrNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued: Option<IssuedDate>,
    #[serde(rename = "DOI", default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(
        rename = "ISBN",
        default,
        deserialize_with = "string_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub isbn: Vec<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ref_type: Option<String>,
}

impl BiblioEntry {
    /// Build an entry from a JSON-like value.
    ///
    /// An explicit `kind` tag wins. Without one, an object with `aliasOf` is an
    /// alias, an object with a `DOI` field is long-form, and anything else is
    /// short-form.
    pub fn from_value(value: Value) -> Result<Self, EntryError> {
        let Value::Object(mut map) = value else {
            return Err(EntryError::NotAnObject);
        };
        let kind = match map.remove("kind") {
            Some(Value::String(tag)) => {
                EntryKind::from_tag(&tag).ok_or(EntryError::UnknownKind(tag))?
            }
            Some(other) => return Err(EntryError::UnknownKind(other.to_string())),
            None if map.contains_key("aliasOf") => EntryKind::Alias,
            None if map.contains_key("DOI") => EntryKind::LongForm,
            None => EntryKind::ShortForm,
        };
        Self::from_value_as(Value::Object(map), kind)
    }

    /// Build an entry of a known variant.
    pub fn from_value_as(value: Value, kind: EntryKind) -> Result<Self, EntryError> {
        Ok(match kind {
            EntryKind::Alias => BiblioEntry::Alias(serde_json::from_value(value)?),
            EntryKind::ShortForm => BiblioEntry::ShortForm(serde_json::from_value(value)?),
            EntryKind::LongForm => BiblioEntry::LongForm(Box::new(serde_json::from_value(value)?)),
        })
    }

    pub fn alias(target: impl Into<ReferenceKey>) -> Self {
        BiblioEntry::Alias(AliasEntry {
            alias_of: target.into(),
        })
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            BiblioEntry::Alias(_) => EntryKind::Alias,
            BiblioEntry::ShortForm(_) => EntryKind::ShortForm,
            BiblioEntry::LongForm(_) => EntryKind::LongForm,
        }
    }

    pub fn alias_of(&self) -> Option<&ReferenceKey> {
        match self {
            BiblioEntry::Alias(alias) => Some(&alias.alias_of),
            _ => None,
        }
    }

    pub fn is_content(&self) -> bool {
        !matches!(self, BiblioEntry::Alias(_))
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            BiblioEntry::Alias(_) => None,
            BiblioEntry::ShortForm(entry) => entry.id.as_deref(),
            BiblioEntry::LongForm(entry) => entry.id.as_deref(),
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            BiblioEntry::Alias(_) => None,
            BiblioEntry::ShortForm(entry) => Some(entry.title.as_str()),
            BiblioEntry::LongForm(entry) => Some(entry.title.as_str()),
        }
    }

    /// Give a content entry the lowercase of `key` as id when it has none.
    pub fn ensure_id(&mut self, key: &ReferenceKey) {
        let id = match self {
            BiblioEntry::Alias(_) => return,
            BiblioEntry::ShortForm(entry) => &mut entry.id,
            BiblioEntry::LongForm(entry) => &mut entry.id,
        };
        if id.as_deref().map(str::trim).unwrap_or_default().is_empty() {
            *id = Some(key.folded());
        }
    }

    pub fn with_default_id(mut self, key: &ReferenceKey) -> Self {
        self.ensure_id(key);
        self
    }
}

impl From<ShortFormEntry> for BiblioEntry {
    fn from(entry: ShortFormEntry) -> Self {
        BiblioEntry::ShortForm(entry)
    }
}

impl From<LongFormEntry> for BiblioEntry {
    fn from(entry: LongFormEntry) -> Self {
        BiblioEntry::LongForm(Box::new(entry))
    }
}

impl<'de> Deserialize<'de> for BiblioEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        BiblioEntry::from_value(value).map_err(serde::de::Error::custom)
    }
}
