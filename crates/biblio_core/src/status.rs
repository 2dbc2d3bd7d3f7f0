/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Publication status codes used by short-form entries.

/// Human-readable label for a status code, if the code is known.
pub fn status_label(code: &str) -> Option<&'static str> {
    let label = match code {
        "CR" => "W3C Candidate Recommendation",
        "CRD" => "W3C Candidate Recommendation Draft",
        "CRY" => "W3C Candidate Recommendation Snapshot",
        "DNOTE" => "W3C Group Draft Note",
        "DRY" => "W3C Registry Draft",
        "ED" => "W3C Editor's Draft",
        "FPWD" => "W3C First Public Working Draft",
        "LCWD" => "W3C Last Call Working Draft",
        "NOTE" | "WG-NOTE" => "W3C Working Group Note",
        "PR" => "W3C Proposed Recommendation",
        "REC" => "W3C Recommendation",
        "RY" => "W3C Registry",
        "STMT" => "W3C Statement",
        "WD" => "W3C Working Draft",
        _ => return None,
    };
    Some(label)
}

/// The label for `code`, or the code itself when unknown.
pub fn status_text(code: &str) -> &str {
    status_label(code).unwrap_or(code)
}
