/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! CSL-JSON building blocks used by long-form entries.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A CSL value that may arrive as either a string or a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringOrNumber {
    Number(i64),
    String(String),
}

impl StringOrNumber {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            StringOrNumber::Number(n) => Some(*n),
            StringOrNumber::String(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for StringOrNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StringOrNumber::Number(n) => write!(f, "{}", n),
            StringOrNumber::String(s) => f.write_str(s),
        }
    }
}

/// A CSL contributor name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CslName {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literal: Option<String>,
    #[serde(rename = "ORCID", default, skip_serializing_if = "Option::is_none")]
    pub orcid: Option<String>,
}

impl CslName {
    pub fn new(family: &str, given: &str) -> Self {
        Self {
            family: Some(family.to_string()),
            given: Some(given.to_string()),
            ..Default::default()
        }
    }

    pub fn literal(name: &str) -> Self {
        Self {
            literal: Some(name.to_string()),
            ..Default::default()
        }
    }

    /// "Given Family", then "Family", then the literal name.
    pub fn display_name(&self) -> Option<String> {
        let given = self.given.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let family = self.family.as_deref().map(str::trim).filter(|s| !s.is_empty());
        match (given, family) {
            (Some(given), Some(family)) => Some(format!("{} {}", given, family)),
            (None, Some(family)) => Some(family.to_string()),
            _ => self
                .literal
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        }
    }

    /// The ORCID as a resolvable URL.
    pub fn orcid_url(&self) -> Option<String> {
        let orcid = self.orcid.as_deref()?.trim();
        if orcid.is_empty() {
            None
        } else if orcid.starts_with("http://") || orcid.starts_with("https://") {
            Some(orcid.to_string())
        } else {
            Some(format!("https://orcid.org/{}", orcid))
        }
    }
}

/// A CSL date (`{"date-parts": [[2020, 5, 1]]}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedDate {
    #[serde(rename = "date-parts", default)]
    pub date_parts: Vec<Vec<Option<StringOrNumber>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literal: Option<String>,
}

impl IssuedDate {
    pub fn year(year: i64) -> Self {
        Self::from_parts(&[year])
    }

    pub fn from_parts(parts: &[i64]) -> Self {
        Self {
            date_parts: vec![parts
                .iter()
                .map(|p| Some(StringOrNumber::Number(*p)))
                .collect()],
            literal: None,
        }
    }

    fn part(&self, index: usize) -> Option<i64> {
        self.date_parts.first()?.get(index)?.as_ref()?.as_i64()
    }

    pub fn year_value(&self) -> Option<i64> {
        self.part(0)
    }

    pub fn month_value(&self) -> Option<i64> {
        self.part(1).filter(|m| (1..=12).contains(m))
    }

    pub fn day_value(&self) -> Option<i64> {
        self.part(2).filter(|d| (1..=31).contains(d))
    }

    /// `YYYY`, `YYYY-MM` or `YYYY-MM-DD`; falls back to the literal form.
    pub fn to_iso(&self) -> Option<String> {
        let Some(year) = self.year_value() else {
            return self.literal.clone().filter(|s| !s.trim().is_empty());
        };
        Some(match (self.month_value(), self.day_value()) {
            (Some(month), Some(day)) => format!("{:04}-{:02}-{:02}", year, month, day),
            (Some(month), None) => format!("{:04}-{:02}", year, month),
            _ => format!("{:04}", year),
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

/// Crossref sends `title` and friends as arrays; the first element wins.
pub(crate) fn first_string_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<OneOrMany>::deserialize(deserializer)? {
        None => None,
        Some(OneOrMany::One(s)) => Some(s),
        Some(OneOrMany::Many(v)) => v.into_iter().next(),
    };
    Ok(value.filter(|s| !s.trim().is_empty()))
}

pub(crate) fn first_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(first_string_opt(deserializer)?.unwrap_or_default())
}

pub(crate) fn string_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(s)) => vec![s],
        Some(OneOrMany::Many(v)) => v,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_fallbacks() {
        assert_eq!(
            CslName::new("Kuhn", "Thomas").display_name().as_deref(),
            Some("Thomas Kuhn")
        );
        let family_only = CslName {
            family: Some("Kuhn".to_string()),
            ..Default::default()
        };
        assert_eq!(family_only.display_name().as_deref(), Some("Kuhn"));
        assert_eq!(
            CslName::literal("W3C").display_name().as_deref(),
            Some("W3C")
        );
        assert_eq!(CslName::default().display_name(), None);
    }

    #[test]
    fn test_orcid_url() {
        let mut name = CslName::new("Doe", "Jane");
        name.orcid = Some("0000-0002-1825-0097".to_string());
        assert_eq!(
            name.orcid_url().as_deref(),
            Some("https://orcid.org/0000-0002-1825-0097")
        );
        name.orcid = Some("http://orcid.org/0000-0002-1825-0097".to_string());
        assert_eq!(
            name.orcid_url().as_deref(),
            Some("http://orcid.org/0000-0002-1825-0097")
        );
    }

    #[test]
    fn test_issued_date_iso() {
        assert_eq!(IssuedDate::year(1962).to_iso().as_deref(), Some("1962"));
        assert_eq!(
            IssuedDate::from_parts(&[2020, 5, 1]).to_iso().as_deref(),
            Some("2020-05-01")
        );

        let json = r#"{"date-parts": [["2019", "11"]]}"#;
        let date: IssuedDate = serde_json::from_str(json).unwrap();
        assert_eq!(date.to_iso().as_deref(), Some("2019-11"));

        let json = r#"{"date-parts": [[null]], "literal": "Spring 2001"}"#;
        let date: IssuedDate = serde_json::from_str(json).unwrap();
        assert_eq!(date.to_iso().as_deref(), Some("Spring 2001"));
    }
}
