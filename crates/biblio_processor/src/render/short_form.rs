/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Compact citations for Specref-style entries.

use super::{attr, join_and, link, text, Clauses};
use biblio_core::{status_text, ShortFormEntry};

/// Title (linked), authors, publisher, date, status, URL.
pub fn render_short_form(entry: &ShortFormEntry) -> String {
    let mut clauses = Clauses::default();

    let cite = format!("<cite>{}</cite>", text(&entry.title));
    clauses.push(match &entry.href {
        Some(href) => link(href, &cite),
        None => cite,
    });

    if !entry.authors.is_empty() {
        let names: Vec<String> = entry.authors.iter().map(|a| text(a)).collect();
        let mut authors = join_and(&names);
        if entry.et_al {
            authors.push_str(" et al");
        }
        clauses.push(authors);
    }

    clauses.push_opt(entry.publisher.as_deref().map(text));
    clauses.push_opt(entry.date.as_deref().map(text));
    clauses.push_opt(entry.status.as_deref().map(|s| text(status_text(s))));
    clauses.push_opt(
        entry
            .href
            .as_deref()
            .map(|href| format!(r#"URL: <a href="{}"><code>{}</code></a>"#, attr(href), text(href))),
    );

    clauses.finish()
}
