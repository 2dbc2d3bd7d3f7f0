/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Inline citation rewrites and unresolved-reference warnings.

use super::{LinkRewrite, ListedReference};
use crate::diagnostics::Diagnostic;
use crate::document::{ElementId, InlineCitation};
use crate::options::FormatOptions;
use biblio_core::ReferenceKey;
use std::collections::HashSet;

/// Point every citation of an alias at its canonical anchor. Aliases that
/// differ only in case share an href and yield a single rewrite.
pub fn link_rewrites<'r>(
    references: impl IntoIterator<Item = &'r ListedReference>,
    inline: &[InlineCitation],
    options: &FormatOptions,
) -> Vec<LinkRewrite> {
    let mut rewrites = Vec::new();
    let mut hrefs: HashSet<String> = HashSet::new();
    for reference in references {
        let (Some(id), Some(entry)) = (&reference.id, &reference.entry) else {
            continue;
        };
        let target_href = format!("#{}", options.anchor(id));
        let title = entry.title().map(str::to_string);
        for alias in &reference.aliases {
            let from_href = options.href_for_key(alias);
            if !hrefs.insert(from_href.clone()) {
                continue;
            }
            let elements: Vec<ElementId> = inline
                .iter()
                .filter(|citation| citation.href == from_href)
                .map(|citation| citation.element)
                .collect();
            rewrites.push(LinkRewrite {
                alias: alias.clone(),
                from_href,
                target_href: target_href.clone(),
                elements,
                title: title.clone(),
            });
        }
    }
    rewrites
}

/// One warning per bad key, attached to the citations that show the key.
/// Citations already redirected by `rewrites` are left alone.
pub fn unresolved_warnings(
    bad: &[ReferenceKey],
    inline: &[InlineCitation],
    rewrites: &[LinkRewrite],
    options: &FormatOptions,
) -> Vec<Diagnostic> {
    let covered: HashSet<ElementId> = rewrites
        .iter()
        .flat_map(|r| r.elements.iter().copied())
        .collect();
    bad.iter()
        .map(|key| {
            let elements = inline
                .iter()
                .filter(|citation| !covered.contains(&citation.element))
                .filter(|citation| key.eq_ignore_case(&citation.text))
                .map(|citation| citation.element)
                .collect();
            Diagnostic::unresolved(key, &options.search_url_for(key), elements)
        })
        .collect()
}
