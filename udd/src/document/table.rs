//! Markdown table parsing
//!
//! Drafted sections may contain markdown tables. A pipe-delimited block is
//! parsed into a header plus data rows; anything that does not parse cleanly
//! degrades to plain text, never to an error.

use tracing::debug;

/// A parsed markdown table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Heuristic check for a table chunk: trimmed, starts and ends with a pipe
pub fn looks_like_table(chunk: &str) -> bool {
    let trimmed = chunk.trim();
    trimmed.starts_with('|') && trimmed.ends_with('|')
}

/// Parse a markdown table block
///
/// The first pipe line is the header; alignment-separator rows (every cell
/// made only of `-`/`:` characters) are dropped; data rows are normalized to
/// the header's column count. Returns None when fewer than two pipe lines
/// are present - the caller renders the block as plain text instead.
pub fn parse_markdown_table(block: &str) -> Option<MarkdownTable> {
    let pipe_lines: Vec<&str> = block
        .trim()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && line.starts_with('|') && line.ends_with('|'))
        .collect();

    if pipe_lines.len() < 2 {
        debug!(lines = pipe_lines.len(), "parse_markdown_table: too few pipe lines, degrading to text");
        return None;
    }

    let mut parsed: Vec<Vec<String>> = pipe_lines.iter().map(|line| split_cells(line)).collect();
    let header = parsed.remove(0);
    let columns = header.len();

    let rows: Vec<Vec<String>> = parsed
        .into_iter()
        .filter(|cells| !is_alignment_row(cells))
        .map(|cells| normalize_row(cells, columns))
        .collect();

    Some(MarkdownTable { header, rows })
}

/// Split a pipe line into trimmed cell values
fn split_cells(line: &str) -> Vec<String> {
    line.trim_matches('|').split('|').map(|cell| cell.trim().to_string()).collect()
}

/// An alignment-separator row: every cell is only `-`/`:` characters
///
/// An empty cell counts as matching, so `| --- |  | :-: |` is still dropped.
fn is_alignment_row(cells: &[String]) -> bool {
    cells.iter().all(|cell| cell.chars().all(|ch| ch == '-' || ch == ':'))
}

/// Truncate extra cells and pad missing ones to the header's column count
fn normalize_row(mut cells: Vec<String>, columns: usize) -> Vec<String> {
    cells.truncate(columns);
    while cells.len() < columns {
        cells.push(String::new());
    }
    cells
}
