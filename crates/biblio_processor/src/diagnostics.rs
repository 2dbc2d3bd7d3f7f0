/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Diagnostics returned to the caller instead of being reported directly.

use crate::document::ElementId;
use biblio_core::ReferenceKey;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    CircularAlias,
    UnresolvedReference,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// The key the author wrote.
    pub key: ReferenceKey,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Inline citations the diagnostic belongs to.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<ElementId>,
}

impl Diagnostic {
    pub fn circular_alias(key: &ReferenceKey, last: &ReferenceKey) -> Self {
        Self {
            kind: DiagnosticKind::CircularAlias,
            key: key.clone(),
            message: format!(
                "Circular reference in biblio DB between [`{}`] and [`{}`].",
                key, last
            ),
            hint: None,
            elements: Vec::new(),
        }
    }

    pub fn unresolved(key: &ReferenceKey, search_url: &str, elements: Vec<ElementId>) -> Self {
        Self {
            kind: DiagnosticKind::UnresolvedReference,
            key: key.clone(),
            message: format!("Couldn't find reference \"[[{}]]\".", key),
            hint: Some(format!(
                "Search for it at {} and add it to the local overrides if it is not there.",
                search_url
            )),
            elements,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, " {}", hint)?;
        }
        Ok(())
    }
}
