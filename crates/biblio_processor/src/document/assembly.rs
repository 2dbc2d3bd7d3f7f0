/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use super::{DocumentScan, ElementId};
use crate::diagnostics::DiagnosticKind;
use crate::options::FormatOptions;
use crate::processor::{FormattedReferences, ListedReference};
use crate::render::{attr, text};
use std::collections::{HashMap, HashSet};
use std::fmt::Write;

struct Link<'a> {
    href: &'a str,
    title: Option<&'a str>,
}

/// Replace every citation in `content` with its link and append the
/// reference sections.
pub fn render_document(
    content: &str,
    scan: &DocumentScan,
    formatted: &FormattedReferences,
    options: &FormatOptions,
) -> String {
    let mut links: HashMap<ElementId, Link> = scan
        .citations
        .iter()
        .map(|c| (c.element, Link { href: &c.href, title: None }))
        .collect();
    for rewrite in &formatted.rewrites {
        for element in &rewrite.elements {
            links.insert(
                *element,
                Link {
                    href: &rewrite.target_href,
                    title: rewrite.title.as_deref(),
                },
            );
        }
    }
    let unresolved: HashSet<ElementId> = formatted
        .diagnostics
        .iter()
        .filter(|d| d.kind == DiagnosticKind::UnresolvedReference)
        .flat_map(|d| d.elements.iter().copied())
        .collect();

    // (start, end, replacement) in document order.
    let mut edits: Vec<(usize, usize, String)> = Vec::new();
    for citation in &scan.citations {
        let class = if unresolved.contains(&citation.element) {
            "bibref unresolved"
        } else {
            "bibref"
        };
        let (href, title) = links
            .get(&citation.element)
            .map(|l| (l.href, l.title))
            .unwrap_or((citation.href.as_str(), None));
        let mut anchor = format!(r#"<a class="{}" href="{}""#, class, attr(href));
        if let Some(title) = title {
            let _ = write!(anchor, r#" title="{}""#, attr(title));
        }
        let _ = write!(anchor, ">{}</a>", text(&citation.text));
        edits.push((citation.start, citation.end, format!("[{}]", anchor)));
    }
    for escaped in &scan.escaped {
        edits.push((escaped.start, escaped.end, format!("[[{}]]", escaped.key)));
    }
    edits.sort_by_key(|(start, _, _)| *start);

    let mut output = String::with_capacity(content.len());
    let mut last = 0;
    for (start, end, replacement) in edits {
        if start < last || end > content.len() {
            continue;
        }
        output.push_str(&content[last..start]);
        output.push_str(&replacement);
        last = end;
    }
    output.push_str(&content[last..]);

    for (id, heading, references) in [
        ("normative-references", "Normative references", &formatted.normative),
        ("informative-references", "Informative references", &formatted.informative),
    ] {
        if !references.is_empty() {
            output.push_str(&section(id, heading, references, formatted, options));
        }
    }
    output
}

fn section(
    id: &str,
    heading: &str,
    references: &[ListedReference],
    formatted: &FormattedReferences,
    options: &FormatOptions,
) -> String {
    let mut html = format!(
        "\n<section id=\"{}\">\n<h2>{}</h2>\n<dl class=\"bibliography\">\n",
        id, heading
    );
    for reference in references {
        let (anchor, body) = match (&reference.id, reference.id.as_deref().and_then(|i| formatted.citation(i))) {
            (Some(canonical), Some(citation)) => (options.anchor(canonical), citation.to_string()),
            _ => (
                options.anchor(&reference.key.folded()),
                "<em>Reference not found.</em>".to_string(),
            ),
        };
        let _ = writeln!(
            html,
            "<dt id=\"{}\">[{}]</dt>\n<dd>{}</dd>",
            attr(&anchor),
            text(reference.key.as_str()),
            body
        );
    }
    html.push_str("</dl>\n</section>\n");
    html
}
