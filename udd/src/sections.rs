//! Section definition loading
//!
//! Parses the block-structured UDD section definition file into an ordered
//! list of section definitions. Each block starts with a `#Name` line and
//! carries `key: value` lines; values may continue across lines.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Matches a `key:` line inside a definition block (letters/underscore only)
static KEY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z_]+:").expect("valid key regex"));

/// Matches a bracketed field list like `[a, b, c]`
static BRACKET_LIST_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\[(.*)\]$").expect("valid list regex"));

/// Errors from section definition loading
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("Section definition file not found at: {0}")]
    MissingFile(PathBuf),

    #[error("Failed to read section definition file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed section definition: {0}")]
    Format(String),
}

/// How a section's drafted content is expected to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderType {
    Text,
    Table,
}

impl RenderType {
    /// Parse the `type:` value; anything that is not `table` renders as text
    pub fn from_keyword(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("table") {
            RenderType::Table
        } else {
            RenderType::Text
        }
    }
}

impl Default for RenderType {
    fn default() -> Self {
        RenderType::Text
    }
}

impl std::fmt::Display for RenderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderType::Text => write!(f, "text"),
            RenderType::Table => write!(f, "table"),
        }
    }
}

/// One UDD section definition, in source order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionDefinition {
    /// Section name (text after `#`, trimmed)
    pub name: String,

    /// Rendering type, defaults to text when the `type:` key is absent
    pub render_type: RenderType,

    /// What the section is about
    pub description: String,

    /// Authoring instructions passed to the drafting model
    pub instructions: String,

    /// Column names for table sections
    pub fields: Option<Vec<String>>,
}

/// Load section definitions from a file, failing fast when the path is missing
pub fn load_section_definitions(path: impl AsRef<Path>) -> Result<Vec<SectionDefinition>, DefinitionError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "load_section_definitions: called");
    if !path.exists() {
        return Err(DefinitionError::MissingFile(path.to_path_buf()));
    }
    let text = fs::read_to_string(path).map_err(|source| DefinitionError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_section_definitions(&text)
}

/// Parse section definition text into ordered definitions
///
/// Blocks start at lines whose first character is `#`. Order of the result
/// matches the order of blocks in the source and drives output order.
pub fn parse_section_definitions(text: &str) -> Result<Vec<SectionDefinition>, DefinitionError> {
    let mut blocks: Vec<Vec<&str>> = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.trim().lines() {
        if line.starts_with('#') && !current.is_empty() {
            blocks.push(std::mem::take(&mut current));
        }
        current.push(line);
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    let mut definitions = Vec::new();
    for block in blocks {
        if block.iter().all(|l| l.trim().is_empty()) {
            continue;
        }
        definitions.push(parse_block(&block)?);
    }

    debug!(count = definitions.len(), "parse_section_definitions: parsed");
    Ok(definitions)
}

/// Parse a single definition block
fn parse_block(block: &[&str]) -> Result<SectionDefinition, DefinitionError> {
    let lines: Vec<&str> = block.iter().map(|l| l.trim()).filter(|l| !l.is_empty()).collect();

    let first = lines.first().copied().unwrap_or("");
    if !first.starts_with('#') {
        return Err(DefinitionError::Format(format!(
            "block must start with '#Section Name', got: {}",
            first
        )));
    }
    let name = first[1..].trim().to_string();

    let mut keyvals: HashMap<String, String> = HashMap::new();
    let mut current_key: Option<String> = None;
    let mut current_val: Vec<String> = Vec::new();

    for line in &lines[1..] {
        if KEY_RE.is_match(line) {
            flush_key(&mut keyvals, &mut current_key, &mut current_val);
            let (key, value) = line.split_once(':').expect("key line contains a colon");
            current_key = Some(key.trim().to_string());
            current_val = vec![value.trim().to_string()];
        } else if current_key.is_some() {
            current_val.push(line.to_string());
        }
        // continuation lines before any key are dropped
    }
    flush_key(&mut keyvals, &mut current_key, &mut current_val);

    let render_type = keyvals.get("type").map(|t| RenderType::from_keyword(t)).unwrap_or_default();
    let description = keyvals.get("description").cloned().unwrap_or_default();
    let instructions = keyvals.get("prompt").cloned().unwrap_or_default();
    let fields = keyvals.get("fields").and_then(|raw| parse_fields(raw));

    Ok(SectionDefinition {
        name,
        render_type,
        description,
        instructions,
        fields,
    })
}

fn flush_key(keyvals: &mut HashMap<String, String>, current_key: &mut Option<String>, current_val: &mut Vec<String>) {
    if let Some(key) = current_key.take() {
        keyvals.insert(key, current_val.join(" ").trim().to_string());
        current_val.clear();
    }
}

/// Parse a `fields:` value - either `[a, b, c]` or a bare `a, b, c` list
///
/// Empty entries are dropped; a list with no surviving entries counts as
/// no fields at all.
fn parse_fields(raw: &str) -> Option<Vec<String>> {
    let raw = raw.trim();
    let inner = match BRACKET_LIST_RE.captures(raw) {
        Some(caps) => caps.get(1).map(|m| m.as_str()).unwrap_or(""),
        None => raw,
    };
    let fields: Vec<String> = inner
        .split(',')
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect();
    if fields.is_empty() { None } else { Some(fields) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_block_scenario() {
        let defs = parse_section_definitions("#Overview\ntype: text\nprompt: Summarize.\n").unwrap();
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].name, "Overview");
        assert_eq!(defs[0].render_type, RenderType::Text);
        assert_eq!(defs[0].instructions, "Summarize.");
    }

    #[test]
    fn test_type_defaults_to_text() {
        let defs = parse_section_definitions("#Risks\ndescription: Project risks.\n").unwrap();
        assert_eq!(defs[0].render_type, RenderType::Text);
    }

    #[test]
    fn test_table_type() {
        let defs = parse_section_definitions("#Interfaces\ntype: table\nfields: [Name, Direction, Protocol]\n").unwrap();
        assert_eq!(defs[0].render_type, RenderType::Table);
        assert_eq!(
            defs[0].fields,
            Some(vec!["Name".to_string(), "Direction".to_string(), "Protocol".to_string()])
        );
    }

    #[test]
    fn test_bare_field_list() {
        let defs = parse_section_definitions("#T\ntype: table\nfields: a, b,, c\n").unwrap();
        assert_eq!(
            defs[0].fields,
            Some(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );
    }

    #[test]
    fn test_empty_field_list_is_none() {
        let defs = parse_section_definitions("#T\nfields: [ , ]\n").unwrap();
        assert!(defs[0].fields.is_none());
    }

    #[test]
    fn test_multiline_value_is_space_joined() {
        let text = "#Scope\nprompt: Describe the scope\nof the change\nin detail.\n";
        let defs = parse_section_definitions(text).unwrap();
        assert_eq!(defs[0].instructions, "Describe the scope of the change in detail.");
    }

    #[test]
    fn test_blocks_preserve_source_order() {
        let text = "#Zeta\nprompt: z\n#Alpha\nprompt: a\n#Mid\nprompt: m\n";
        let defs = parse_section_definitions(text).unwrap();
        let names: Vec<&str> = defs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let defs = parse_section_definitions("#S\nowner: someone\nprompt: Write.\n").unwrap();
        assert_eq!(defs[0].instructions, "Write.");
    }

    #[test]
    fn test_leading_junk_is_format_error() {
        let result = parse_section_definitions("not a header\n#Overview\nprompt: x\n");
        assert!(matches!(result, Err(DefinitionError::Format(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = load_section_definitions("/nonexistent/path/sections.txt");
        assert!(matches!(result, Err(DefinitionError::MissingFile(_))));
    }

    #[test]
    fn test_load_from_file() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "#Overview\ntype: text\nprompt: Summarize.\n").unwrap();
        let defs = load_section_definitions(file.path()).unwrap();
        assert_eq!(defs[0].name, "Overview");
    }

    #[test]
    fn test_key_must_be_at_line_start_after_trim() {
        // a digit-prefixed line is a continuation, not a key
        let defs = parse_section_definitions("#S\nprompt: steps are\n1: do this\n").unwrap();
        assert_eq!(defs[0].instructions, "steps are 1: do this");
    }
}
