/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! The citation formatter.
//!
//! Works on a ready [`ReferenceStore`]: every requested key is resolved
//! through its alias chain, keys sharing a canonical entry are folded
//! together, each section is sorted by the keys the author wrote, and every
//! canonical entry is rendered once. Problems come back as [`Diagnostic`]s
//! rather than being reported anywhere.

pub mod aliases;
pub mod grouping;
pub mod links;
pub mod sorting;

use crate::diagnostics::Diagnostic;
use crate::document::{ElementId, InlineCitation};
use crate::error::ProcessorError;
use crate::options::FormatOptions;
use crate::render::render_entry;
use biblio_core::{BiblioEntry, ReferenceKey};
use biblio_resolver::{ReferenceRequest, ReferenceStore};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use self::aliases::{resolve_alias, Resolution};
use self::grouping::group;
use self::links::{link_rewrites, unresolved_warnings};
use self::sorting::sort_references;

/// One row of a rendered reference list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListedReference {
    /// The first key in document order that reached this entry.
    pub key: ReferenceKey,
    /// Canonical id; `None` when the key did not resolve.
    pub id: Option<String>,
    pub entry: Option<BiblioEntry>,
    /// Every requested key that resolved to this entry, `key` included.
    pub aliases: Vec<ReferenceKey>,
}

impl ListedReference {
    pub fn unresolved(key: &ReferenceKey) -> Self {
        Self {
            key: key.clone(),
            id: None,
            entry: None,
            aliases: Vec::new(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.entry.is_some()
    }
}

/// Redirect citations of `alias` to the canonical anchor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkRewrite {
    pub alias: ReferenceKey,
    pub from_href: String,
    pub target_href: String,
    pub elements: Vec<ElementId>,
    /// Tooltip: the canonical entry's title.
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormattedReferences {
    pub normative: Vec<ListedReference>,
    pub informative: Vec<ListedReference>,
    /// Canonical id to citation HTML.
    pub citations: IndexMap<String, String>,
    pub rewrites: Vec<LinkRewrite>,
    pub diagnostics: Vec<Diagnostic>,
}

impl FormattedReferences {
    pub fn citation(&self, id: &str) -> Option<&str> {
        self.citations.get(id).map(String::as_str)
    }

    pub fn unresolved(&self) -> impl Iterator<Item = &ReferenceKey> {
        self.normative
            .iter()
            .chain(&self.informative)
            .filter(|r| !r.is_resolved())
            .map(|r| &r.key)
    }
}

#[derive(Debug)]
pub struct Formatter<'a> {
    store: &'a ReferenceStore,
    options: FormatOptions,
}

impl<'a> Formatter<'a> {
    /// A formatter over a store that has finished resolving.
    pub fn new(store: &'a ReferenceStore) -> Result<Self, ProcessorError> {
        if !store.is_ready() {
            return Err(ProcessorError::StoreNotReady);
        }
        Ok(Self {
            store,
            options: FormatOptions::default(),
        })
    }

    /// Wait for the store to become ready.
    pub async fn when_ready(store: &'a ReferenceStore) -> Self {
        store.wait_ready().await;
        Self {
            store,
            options: FormatOptions::default(),
        }
    }

    pub fn with_options(mut self, options: FormatOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Follow `key`'s alias chain to a content entry.
    pub fn resolve(&self, key: &ReferenceKey) -> Resolution {
        resolve_alias(self.store, key)
    }

    /// Build both reference lists, the citation strings, the link rewrites
    /// and the diagnostics for one document.
    pub fn format(
        &self,
        normative: &[ReferenceKey],
        informative: &[ReferenceKey],
        inline: &[InlineCitation],
    ) -> FormattedReferences {
        let mut request = ReferenceRequest::new(normative.to_vec(), informative.to_vec());
        request.normalize();

        let mut grouping = group(self.store, &request.normative, &request.informative);
        sort_references(&mut grouping.normative);
        sort_references(&mut grouping.informative);

        let mut citations = IndexMap::new();
        for reference in grouping.normative.iter().chain(&grouping.informative) {
            if let (Some(id), Some(entry)) = (&reference.id, &reference.entry) {
                if let Some(html) = render_entry(id, entry) {
                    citations.insert(id.clone(), html);
                }
            }
        }

        let rewrites = link_rewrites(
            grouping.normative.iter().chain(&grouping.informative),
            inline,
            &self.options,
        );

        let mut diagnostics = grouping.diagnostics;
        diagnostics.extend(unresolved_warnings(
            &grouping.bad,
            inline,
            &rewrites,
            &self.options,
        ));

        debug!(
            normative = grouping.normative.len(),
            informative = grouping.informative.len(),
            citations = citations.len(),
            diagnostics = diagnostics.len(),
            "references formatted"
        );

        FormattedReferences {
            normative: grouping.normative,
            informative: grouping.informative,
            citations,
            rewrites,
            diagnostics,
        }
    }
}
