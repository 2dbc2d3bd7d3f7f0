/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Document-level citation handling.
//!
//! Inline citations are written `[[KEY]]` (informative) or `[[!KEY]]`
//! (normative); `[[\KEY]]` stands for the literal text `[[KEY]]`.

mod assembly;

pub use assembly::render_document;

use crate::options::FormatOptions;
use biblio_core::ReferenceKey;
use indexmap::IndexSet;
use regex::Regex;
use serde::Serialize;

/// Position of an inline citation in document order.
pub type ElementId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CitationKind {
    Informative,
    Normative,
    Escaped,
}

/// One bracketed citation found by a parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitationMatch {
    pub start: usize,
    pub end: usize,
    pub key: ReferenceKey,
    pub kind: CitationKind,
}

/// A trait for document parsers that can identify citations.
pub trait CitationParser {
    /// Find citations in `content`, sorted by start offset.
    fn parse_citations(&self, content: &str) -> Vec<CitationMatch>;
}

pub struct BracketCitationParser {
    regex: Regex,
}

impl Default for BracketCitationParser {
    fn default() -> Self {
        Self {
            regex: Regex::new(r"\[\[(?P<flag>[!\\])?\s*(?P<key>[^\[\]\s]+)\s*\]\]").unwrap(),
        }
    }
}

impl CitationParser for BracketCitationParser {
    fn parse_citations(&self, content: &str) -> Vec<CitationMatch> {
        self.regex
            .captures_iter(content)
            .filter_map(|cap| {
                let whole = cap.get(0)?;
                let key = cap.name("key")?.as_str();
                let kind = match cap.name("flag").map(|f| f.as_str()) {
                    Some("!") => CitationKind::Normative,
                    Some(_) => CitationKind::Escaped,
                    None => CitationKind::Informative,
                };
                Some(CitationMatch {
                    start: whole.start(),
                    end: whole.end(),
                    key: ReferenceKey::from(key),
                    kind,
                })
            })
            .collect()
    }
}

/// A citation occurrence as seen by the formatter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineCitation {
    pub element: ElementId,
    /// Link target before any rewrite: `#<anchor prefix><lowercase key>`.
    pub href: String,
    /// Visible text: the key as written.
    pub text: String,
    pub normative: bool,
    #[serde(skip)]
    pub start: usize,
    #[serde(skip)]
    pub end: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentScan {
    /// Normative keys, first occurrence order, exact duplicates removed.
    pub normative: Vec<ReferenceKey>,
    pub informative: Vec<ReferenceKey>,
    pub citations: Vec<InlineCitation>,
    /// Escaped citations, kept so assembly can unescape them.
    #[serde(skip)]
    pub escaped: Vec<CitationMatch>,
}

/// Scan with the default `[[KEY]]` parser.
pub fn scan_document(content: &str, options: &FormatOptions) -> DocumentScan {
    scan_with(content, &BracketCitationParser::default(), options)
}

pub fn scan_with<P: CitationParser>(
    content: &str,
    parser: &P,
    options: &FormatOptions,
) -> DocumentScan {
    let mut normative = IndexSet::new();
    let mut informative = IndexSet::new();
    let mut scan = DocumentScan::default();

    for found in parser.parse_citations(content) {
        let normative_cite = match found.kind {
            CitationKind::Escaped => {
                scan.escaped.push(found);
                continue;
            }
            CitationKind::Normative => {
                normative.insert(found.key.clone());
                true
            }
            CitationKind::Informative => {
                informative.insert(found.key.clone());
                false
            }
        };
        scan.citations.push(InlineCitation {
            element: scan.citations.len(),
            href: options.href_for_key(&found.key),
            text: found.key.to_string(),
            normative: normative_cite,
            start: found.start,
            end: found.end,
        });
    }

    scan.normative = normative.into_iter().collect();
    scan.informative = informative.into_iter().collect();
    scan
}
