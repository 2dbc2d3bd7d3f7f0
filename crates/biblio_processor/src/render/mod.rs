/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! HTML citation strings.
//!
//! Both renderers are pure functions over entry fields. Text is escaped on
//! the way in, so the returned strings are safe to splice into a document.

pub mod long_form;
pub mod short_form;

use biblio_core::{BiblioEntry, CslName, IssuedDate, LongFormEntry, ShortFormEntry, DOI_PREFIX};

pub use long_form::render_long_form;
pub use short_form::render_short_form;

/// Render a content entry under its canonical `id`.
///
/// Ids starting with `doi:` use the long-form renderer, everything else the
/// short-form one; an entry whose shape disagrees with its id is converted
/// first. Aliases render as nothing.
pub fn render_entry(id: &str, entry: &BiblioEntry) -> Option<String> {
    let long = has_doi_prefix(id);
    match entry {
        BiblioEntry::Alias(_) => None,
        BiblioEntry::LongForm(entry) if long => Some(render_long_form(entry)),
        BiblioEntry::ShortForm(entry) if !long => Some(render_short_form(entry)),
        BiblioEntry::ShortForm(entry) => Some(render_long_form(&short_to_long(id, entry))),
        BiblioEntry::LongForm(entry) => Some(render_short_form(&long_to_short(entry))),
    }
}

fn has_doi_prefix(id: &str) -> bool {
    id.get(..DOI_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(DOI_PREFIX))
}

fn short_to_long(id: &str, entry: &ShortFormEntry) -> LongFormEntry {
    LongFormEntry {
        id: entry.id.clone(),
        title: entry.title.clone(),
        url: entry.href.clone(),
        author: entry.authors.iter().map(|a| CslName::literal(a)).collect(),
        publisher: entry.publisher.clone(),
        issued: entry.date.as_ref().map(|date| IssuedDate {
            literal: Some(date.clone()),
            ..Default::default()
        }),
        doi: Some(id[DOI_PREFIX.len()..].to_string()),
        ..Default::default()
    }
}

fn long_to_short(entry: &LongFormEntry) -> ShortFormEntry {
    let title = match &entry.subtitle {
        Some(subtitle) => format!("{}: {}", entry.title, subtitle),
        None => entry.title.clone(),
    };
    ShortFormEntry {
        id: entry.id.clone(),
        title,
        href: entry.url.clone(),
        authors: entry.author.iter().filter_map(CslName::display_name).collect(),
        publisher: entry.publisher.clone(),
        date: entry.issued.as_ref().and_then(IssuedDate::to_iso),
        ..Default::default()
    }
}

/// Terminate `text` with a period unless it already ends a sentence.
pub fn end_with_dot(text: &str) -> String {
    let trimmed = text.trim_end();
    if trimmed.ends_with(['.', '?', '!']) {
        trimmed.to_string()
    } else {
        format!("{}.", trimmed)
    }
}

/// `A`, `A and B`, `A, B, and C`.
pub fn join_and(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [one] => one.clone(),
        [first, second] => format!("{} and {}", first, second),
        [rest @ .., last] => format!("{}, and {}", rest.join(", "), last),
    }
}

pub(crate) fn text(value: &str) -> String {
    html_escape::encode_text(value).into_owned()
}

pub(crate) fn attr(value: &str) -> String {
    html_escape::encode_double_quoted_attribute(value).into_owned()
}

pub(crate) fn link(href: &str, inner: &str) -> String {
    format!(r#"<a href="{}">{}</a>"#, attr(href), inner)
}

/// A run of sentence-like clauses, each period-terminated, joined by spaces.
#[derive(Debug, Default)]
pub(crate) struct Clauses(Vec<String>);

impl Clauses {
    pub fn push(&mut self, clause: impl AsRef<str>) {
        let clause = clause.as_ref().trim();
        if !clause.is_empty() {
            self.0.push(end_with_dot(clause));
        }
    }

    pub fn push_opt(&mut self, clause: Option<impl AsRef<str>>) {
        if let Some(clause) = clause {
            self.push(clause);
        }
    }

    pub fn finish(self) -> String {
        self.0.join(" ")
    }
}
