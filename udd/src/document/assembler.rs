//! Document assembly
//!
//! Renders drafted sections into a styled .docx: centered title, a native
//! table-of-contents field the viewer resolves on open, one level-1 heading
//! per section, paragraph/table chunks, and a "Page X of Y" footer built
//! from PAGE/NUMPAGES field codes.

use std::io::Cursor;

use docx_rs::{
    AlignmentType, BreakType, Docx, FieldCharType, Footer, InstrText, Paragraph, Run, Style, StyleType, Table,
    TableCell, TableOfContents, TableRow,
};
use thiserror::Error;
use tracing::debug;

use super::table::{MarkdownTable, looks_like_table, parse_markdown_table};
use crate::drafting::DraftedSection;

const TITLE_COLOR: &str = "1F4E79";
const HEADING_COLOR: &str = "2F5496";

/// Errors from document serialization
///
/// Malformed table chunks never land here - they degrade to plain paragraphs.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to serialize document: {0}")]
    Write(String),
}

/// Render drafted sections into a complete .docx byte sequence
pub fn build_docx(sections: &[DraftedSection], title: &str) -> Result<Vec<u8>, RenderError> {
    debug!(sections = sections.len(), %title, "build_docx: called");

    let mut docx = Docx::new()
        .add_style(heading_style())
        .add_paragraph(title_paragraph(title))
        .add_paragraph(toc_label_paragraph())
        .add_table_of_contents(TableOfContents::new().heading_styles_range(1, 3))
        .add_paragraph(page_break_paragraph());

    for section in sections {
        docx = docx.add_paragraph(heading_paragraph(&section.name));
        for chunk in section.content.split("\n\n") {
            if chunk.trim().is_empty() {
                continue;
            }
            if looks_like_table(chunk) {
                match parse_markdown_table(chunk) {
                    Some(table) => docx = docx.add_table(to_docx_table(&table)),
                    None => docx = docx.add_paragraph(body_paragraph(chunk)),
                }
            } else {
                docx = docx.add_paragraph(body_paragraph(chunk));
            }
        }
        // spacer between sections
        docx = docx.add_paragraph(Paragraph::new());
    }

    docx = docx.footer(Footer::new().add_paragraph(page_number_paragraph()));

    let mut buffer = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buffer)
        .map_err(|e| RenderError::Write(e.to_string()))?;
    Ok(buffer.into_inner())
}

fn heading_style() -> Style {
    Style::new("Heading1", StyleType::Paragraph)
        .name("Heading 1")
        .size(32)
        .bold()
        .color(HEADING_COLOR)
}

fn title_paragraph(title: &str) -> Paragraph {
    Paragraph::new()
        .align(AlignmentType::Center)
        .add_run(Run::new().add_text(title).size(40).bold().color(TITLE_COLOR))
}

fn toc_label_paragraph() -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text("Table of Contents").size(32).bold().color(TITLE_COLOR))
}

fn page_break_paragraph() -> Paragraph {
    Paragraph::new().add_run(Run::new().add_break(BreakType::Page))
}

fn heading_paragraph(name: &str) -> Paragraph {
    Paragraph::new()
        .style("Heading1")
        .add_run(Run::new().add_text(name).size(32).bold().color(HEADING_COLOR))
}

fn body_paragraph(chunk: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(chunk))
}

/// Centered "Page <PAGE> of <NUMPAGES>" built from field codes the viewer
/// resolves; page counts are never computed here.
fn page_number_paragraph() -> Paragraph {
    Paragraph::new()
        .align(AlignmentType::Center)
        .add_run(Run::new().add_text("Page "))
        .add_run(
            Run::new()
                .add_field_char(FieldCharType::Begin, false)
                .add_instr_text(InstrText::Unsupported("PAGE".to_string()))
                .add_field_char(FieldCharType::End, false),
        )
        .add_run(Run::new().add_text(" of "))
        .add_run(
            Run::new()
                .add_field_char(FieldCharType::Begin, false)
                .add_instr_text(InstrText::Unsupported("NUMPAGES".to_string()))
                .add_field_char(FieldCharType::End, false),
        )
}

fn to_docx_table(table: &MarkdownTable) -> Table {
    let mut rows = Vec::with_capacity(table.rows.len() + 1);
    rows.push(TableRow::new(
        table
            .header
            .iter()
            .map(|cell| TableCell::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text(cell).bold())))
            .collect(),
    ));
    for row in &table.rows {
        rows.push(TableRow::new(
            row.iter()
                .map(|cell| TableCell::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text(cell))))
                .collect(),
        ));
    }
    Table::new(rows)
}
