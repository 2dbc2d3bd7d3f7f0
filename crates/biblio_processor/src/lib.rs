/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Citation formatting for resolved references.
//!
//! Takes a ready [`biblio_resolver::ReferenceStore`] and produces the
//! ordered reference lists, one HTML citation string per canonical entry,
//! rewrite instructions for inline citation links, and diagnostics.
//!
//! # Example
//!
//! ```rust
//! use biblio_core::{BiblioEntry, ReferenceKey, ShortFormEntry};
//! use biblio_processor::{scan_document, render_document, FormatOptions, Formatter};
//! use biblio_resolver::ReferenceStore;
//!
//! let store = ReferenceStore::new();
//! store
//!     .apply([(
//!         ReferenceKey::from("HTML"),
//!         BiblioEntry::from(ShortFormEntry { title: "HTML Standard".into(), ..Default::default() }),
//!     )])
//!     .unwrap();
//! store.mark_ready().unwrap();
//!
//! let options = FormatOptions::default();
//! let text = "Built on [[HTML]].";
//! let scan = scan_document(text, &options);
//! let formatted = Formatter::new(&store)
//!     .unwrap()
//!     .format(&scan.normative, &scan.informative, &scan.citations);
//! let html = render_document(text, &scan, &formatted, &options);
//! assert!(html.contains(r#"<dt id="bib-html">[HTML]</dt>"#));
//! ```

pub mod diagnostics;
pub mod document;
pub mod error;
pub mod options;
pub mod processor;
pub mod render;

pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use document::{
    render_document, scan_document, scan_with, BracketCitationParser, CitationKind,
    CitationMatch, CitationParser, DocumentScan, ElementId, InlineCitation,
};
pub use error::ProcessorError;
pub use options::FormatOptions;
pub use processor::aliases::Resolution;
pub use processor::sorting::compare_keys;
pub use processor::{FormattedReferences, Formatter, LinkRewrite, ListedReference};
pub use render::{end_with_dot, render_entry, render_long_form, render_short_form};
