//! End-to-end document generation
//!
//! Wires the loaders, the drafting orchestrator and the assembler into one
//! pipeline: definitions + mapping + FSD text in, .docx bytes out. No error
//! is recovered here; everything propagates to the caller.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::config::Config;
use crate::document::{self, RenderError};
use crate::drafting::{self, DraftingError, DraftingOptions};
use crate::llm::LlmClient;
use crate::mapping::{MappingError, SectionMapping};
use crate::sections::{self, DefinitionError};

/// One document-generation request
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Full FSD plain text
    pub fsd_text: String,

    /// Override for the configured section definition file
    pub sections_path: Option<PathBuf>,

    /// Override for the configured mapping file
    pub mapping_path: Option<PathBuf>,

    /// Document title; the configured default applies when absent
    pub title: Option<String>,
}

impl GenerateRequest {
    pub fn new(fsd_text: impl Into<String>) -> Self {
        Self {
            fsd_text: fsd_text.into(),
            sections_path: None,
            mapping_path: None,
            title: None,
        }
    }
}

/// Errors from the generation pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Definitions(#[from] DefinitionError),

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Drafting(#[from] DraftingError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Generate a complete .docx from an FSD text
///
/// Input files are loaded before any drafting begins so a missing file fails
/// fast without spending completion calls.
pub async fn generate_document(
    config: &Config,
    llm: Arc<dyn LlmClient>,
    request: &GenerateRequest,
) -> Result<Vec<u8>, PipelineError> {
    let sections_path = request
        .sections_path
        .clone()
        .unwrap_or_else(|| config.paths.sections_file.clone());
    let mapping_path = request
        .mapping_path
        .clone()
        .unwrap_or_else(|| config.paths.mapping_file.clone());

    let definitions = sections::load_section_definitions(&sections_path)?;
    let mapping = SectionMapping::load(&mapping_path)?;
    info!(
        definitions = definitions.len(),
        mapped_sections = mapping.len(),
        fsd_chars = request.fsd_text.len(),
        "generate_document: inputs loaded"
    );

    let options = DraftingOptions::new(&config.drafting, config.llm.max_tokens);
    let drafted = drafting::draft_sections(&llm, &request.fsd_text, &definitions, &mapping, &options).await?;

    let title = request
        .title
        .clone()
        .unwrap_or_else(|| config.document.default_title.clone());
    let bytes = document::build_docx(&drafted, &title)?;
    info!(sections = drafted.len(), bytes = bytes.len(), "generate_document: assembled");
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::mock::MockLlmClient;
    use std::io::Write;

    fn write_inputs() -> (tempfile::NamedTempFile, tempfile::NamedTempFile) {
        let mut sections = tempfile::NamedTempFile::new().unwrap();
        write!(
            sections,
            "#Overview\ntype: text\nprompt: Summarize.\n#Interfaces\ntype: table\nfields: [Name, Protocol]\nprompt: List interfaces.\n"
        )
        .unwrap();

        let mut mapping = tempfile::NamedTempFile::new().unwrap();
        write!(mapping, r#"{{"Overview": ["3"]}}"#).unwrap();

        (sections, mapping)
    }

    #[tokio::test]
    async fn test_generate_document_end_to_end() {
        let (sections, mapping) = write_inputs();
        let llm: Arc<dyn LlmClient> = Arc::new(MockLlmClient::new(vec![
            "An overview.".to_string(),
            "| Name | Protocol |\n|---|---|\n| IF1 | RFC |".to_string(),
        ]));

        let mut request = GenerateRequest::new("SECTION 3: Purpose\nDoes X.\n");
        request.sections_path = Some(sections.path().to_path_buf());
        request.mapping_path = Some(mapping.path().to_path_buf());
        request.title = Some("My UDD".to_string());

        let bytes = generate_document(&Config::default(), llm, &request).await.unwrap();
        assert_eq!(&bytes[..4], b"PK\x03\x04");
    }

    #[tokio::test]
    async fn test_missing_sections_file_fails_before_drafting() {
        let (_, mapping) = write_inputs();
        let mock = Arc::new(MockLlmClient::new(vec![]));
        let llm: Arc<dyn LlmClient> = mock.clone();

        let mut request = GenerateRequest::new("irrelevant");
        request.sections_path = Some(PathBuf::from("/nonexistent/sections.txt"));
        request.mapping_path = Some(mapping.path().to_path_buf());

        let result = generate_document(&Config::default(), llm, &request).await;
        assert!(matches!(result, Err(PipelineError::Definitions(DefinitionError::MissingFile(_)))));
        assert_eq!(mock.call_count(), 0, "no completion call may happen");
    }

    #[tokio::test]
    async fn test_missing_mapping_file_fails_before_drafting() {
        let (sections, _) = write_inputs();
        let mock = Arc::new(MockLlmClient::new(vec![]));
        let llm: Arc<dyn LlmClient> = mock.clone();

        let mut request = GenerateRequest::new("irrelevant");
        request.sections_path = Some(sections.path().to_path_buf());
        request.mapping_path = Some(PathBuf::from("/nonexistent/mapping.json"));

        let result = generate_document(&Config::default(), llm, &request).await;
        assert!(matches!(result, Err(PipelineError::Mapping(MappingError::MissingFile(_)))));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_completion_error_propagates_out() {
        let (sections, mapping) = write_inputs();
        // no canned responses: the first completion call fails
        let llm: Arc<dyn LlmClient> = Arc::new(MockLlmClient::new(vec![]));

        let mut request = GenerateRequest::new("SECTION 3: Purpose\nDoes X.\n");
        request.sections_path = Some(sections.path().to_path_buf());
        request.mapping_path = Some(mapping.path().to_path_buf());

        let result = generate_document(&Config::default(), llm, &request).await;
        assert!(matches!(result, Err(PipelineError::Drafting(_))));
    }
}
