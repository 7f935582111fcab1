//! uddgen - FSD to Unified Design Document generator
//!
//! Converts a Functional Specification Document (FSD) into a styled Unified
//! Design Document (UDD): the FSD is segmented into numbered sections, a
//! mapping table selects the excerpt relevant to each UDD section, a
//! completion service drafts each section with a bounded rolling context of
//! earlier drafts, and the drafts are assembled into a .docx.
//!
//! # Modules
//!
//! - [`sections`] - section definition file loading
//! - [`mapping`] - UDD-to-FSD rule table loading
//! - [`fsd`] - FSD segmentation and slice extraction
//! - [`llm`] - completion-service client trait and providers
//! - [`prompts`] - drafting prompt templates
//! - [`drafting`] - sequential drafting orchestrator
//! - [`document`] - table parsing and .docx assembly
//! - [`pipeline`] - end-to-end generation
//! - [`jobs`] - submit/poll job facade
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod cli;
pub mod config;
pub mod document;
pub mod drafting;
pub mod fsd;
pub mod jobs;
pub mod llm;
pub mod mapping;
pub mod pipeline;
pub mod prompts;
pub mod sections;

// Re-export commonly used types
pub use config::{Config, DraftingConfig, LlmConfig};
pub use document::{MarkdownTable, RenderError, build_docx, parse_markdown_table};
pub use drafting::{DraftedSection, DraftingError, DraftingOptions, RollingContext, draft_sections};
pub use fsd::{extract_relevant_slice, segment};
pub use jobs::{JobOutcome, JobRecord, JobState, JobStore};
pub use llm::{AnthropicClient, CompletionRequest, CompletionResponse, LlmClient, LlmError, OpenAIClient, create_client};
pub use mapping::{MappingError, SectionMapping};
pub use pipeline::{GenerateRequest, PipelineError, generate_document};
pub use sections::{DefinitionError, RenderType, SectionDefinition, load_section_definitions, parse_section_definitions};
