//! FSD segmentation and slice extraction
//!
//! Splits a flat Functional Specification Document into numbered sections
//! by scanning for `SECTION <n[.n...]>: <title>` header lines, and extracts
//! the concatenated slice relevant to one UDD section via the mapping table.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::mapping::SectionMapping;

/// Matches header lines such as:
///
/// ```text
/// SECTION 3: Purpose
/// SECTION 6.5 - Selection Screen
/// ```
static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mi)^\s*SECTION\s+(\d+(?:\.\d+)*)\s*[:\-]\s*(.*)$").expect("valid header regex"));

/// Segment an FSD text into a section-number -> body index
///
/// A section's body is everything strictly between the end of its header
/// line and the start of the next header line (or end of document), trimmed.
/// When the same number appears twice the later occurrence wins.
pub fn segment(fsd_text: &str) -> HashMap<String, String> {
    let headers: Vec<(String, usize, usize)> = HEADER_RE
        .captures_iter(fsd_text)
        .map(|caps| {
            let whole = caps.get(0).expect("match always has group 0");
            let number = caps.get(1).expect("header match has a number").as_str().trim().to_string();
            (number, whole.start(), whole.end())
        })
        .collect();

    let mut index = HashMap::new();
    for (i, (number, _, header_end)) in headers.iter().enumerate() {
        let body_end = headers.get(i + 1).map(|next| next.1).unwrap_or(fsd_text.len());
        let body = fsd_text[*header_end..body_end].trim().to_string();
        index.insert(number.clone(), body);
    }

    debug!(sections = index.len(), "segment: indexed FSD");
    index
}

/// Extract the FSD slice relevant to one UDD section
///
/// Mapped section bodies are concatenated in mapping order (not document
/// order), joined with a blank line. When nothing is mapped or none of the
/// mapped numbers exist in the document, the whole FSD text is returned so
/// the section still drafts with full context.
pub fn extract_relevant_slice(fsd_text: &str, udd_section: &str, mapping: &SectionMapping) -> String {
    let index = segment(fsd_text);

    let mut combined: Vec<&str> = Vec::new();
    for number in mapping.numbers_for(udd_section) {
        if let Some(body) = index.get(number.trim()) {
            combined.push(body);
        }
    }

    if combined.is_empty() {
        debug!(%udd_section, "extract_relevant_slice: no mapped sections matched, falling back to full FSD");
        fsd_text.to_string()
    } else {
        combined.join("\n\n")
    }
}
