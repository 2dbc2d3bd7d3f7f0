/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Detailed citations for CSL-like (DOI) entries.

use super::{attr, join_and, link, text, Clauses};
use biblio_core::{CslName, IssuedDate, LongFormEntry};

pub fn render_long_form(entry: &LongFormEntry) -> String {
    let mut clauses = Clauses::default();

    let mut title = text(&entry.title);
    if let Some(subtitle) = entry.subtitle.as_deref().filter(|s| !s.trim().is_empty()) {
        title = format!("{}: {}", title, text(subtitle));
    }
    let cite = format!("<cite>{}</cite>", title);
    clauses.push(match &entry.url {
        Some(url) => link(url, &cite),
        None => cite,
    });

    let names: Vec<String> = entry.author.iter().filter_map(render_name).collect();
    if !names.is_empty() {
        clauses.push(join_and(&names));
    }

    clauses.push(container(entry));
    clauses.push_opt(entry.publisher.as_deref().map(text));
    clauses.push_opt(entry.issued.as_ref().and_then(IssuedDate::to_iso).map(|d| text(&d)));

    if let Some(doi) = entry.doi.as_deref() {
        clauses.push(format!(
            "DOI: {}",
            link(&format!("https://doi.org/{}", doi), &text(doi))
        ));
    }
    if !entry.isbn.is_empty() {
        let isbns: Vec<String> = entry.isbn.iter().map(|i| text(i)).collect();
        clauses.push(format!("ISBN: {}", isbns.join(", ")));
    }
    if let Some(url) = entry.url.as_deref() {
        clauses.push(format!(
            r#"URL: <a href="{}"><code>{}</code></a>"#,
            attr(url),
            text(url)
        ));
    }

    clauses.finish()
}

fn render_name(name: &CslName) -> Option<String> {
    let display = text(&name.display_name()?);
    Some(match name.orcid_url() {
        Some(orcid) => format!(
            r#"{} <a class="orcid" href="{}">(ORCID)</a>"#,
            display,
            attr(&orcid)
        ),
        None => display,
    })
}

/// `<i>Journal</i>, vol. 3, no. 2, pp. 10-20`
fn container(entry: &LongFormEntry) -> String {
    let mut parts = Vec::new();
    if let Some(container) = entry.container_title.as_deref() {
        parts.push(format!("<i>{}</i>", text(container)));
    }
    if let Some(volume) = &entry.volume {
        parts.push(format!("vol. {}", text(&volume.to_string())));
    }
    if let Some(issue) = &entry.issue {
        parts.push(format!("no. {}", text(&issue.to_string())));
    }
    if let Some(page) = &entry.page {
        let page = page.to_string();
        let label = if page.contains(['-', '\u{2013}', ',']) { "pp." } else { "p." };
        parts.push(format!("{} {}", label, text(&page)));
    }
    parts.join(", ")
}
