/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use thiserror::Error;

/// Errors raised while building entries from raw metadata.
#[derive(Debug, Error)]
pub enum EntryError {
    #[error("entry is not an object")]
    NotAnObject,

    #[error("unknown entry kind: {0}")]
    UnknownKind(String),

    #[error("invalid entry: {0}")]
    Invalid(#[from] serde_json::Error),
}
