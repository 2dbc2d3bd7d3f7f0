/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Core data model for reference resolution.
//!
//! Authors cite works by short keys such as `RFC2119` or `doi:10.1/xyz`. This
//! crate defines those keys and the entries they resolve to; fetching,
//! caching and rendering live in `biblio_resolver` and `biblio_processor`.

pub mod csl;
pub mod entry;
pub mod error;
pub mod key;
pub mod status;

pub use csl::{CslName, IssuedDate, StringOrNumber};
pub use entry::{AliasEntry, BiblioEntry, EntryKind, LongFormEntry, ShortFormEntry};
pub use error::EntryError;
pub use key::{ReferenceKey, DOI_PREFIX};
pub use status::{status_label, status_text};
