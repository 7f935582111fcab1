//! Document assembly: markdown table parsing and .docx rendering

pub mod assembler;
pub mod table;

pub use assembler::{RenderError, build_docx};
pub use table::{MarkdownTable, looks_like_table, parse_markdown_table};
