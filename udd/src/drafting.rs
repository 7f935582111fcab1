//! Drafting orchestrator
//!
//! Turns (section definition, FSD slice) pairs into drafted text via the
//! completion service, carrying a bounded rolling context of earlier drafts
//! so later sections stay consistent with earlier ones. Sections are drafted
//! strictly sequentially in definition order: each draft depends on the
//! context window of the drafts before it.

use std::collections::VecDeque;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::DraftingConfig;
use crate::fsd;
use crate::llm::{CompletionRequest, LlmClient, LlmError, Message};
use crate::mapping::SectionMapping;
use crate::prompts::{DRAFT_SYSTEM, PromptBuilder, SectionPromptContext};
use crate::sections::SectionDefinition;

/// Errors from the drafting orchestrator
///
/// Completion failures are not retried here; they propagate to the caller.
#[derive(Debug, Error)]
pub enum DraftingError {
    #[error("Completion service error: {0}")]
    Completion(#[from] LlmError),

    #[error("Failed to render section prompt: {0}")]
    Template(#[from] handlebars::RenderError),
}

/// One drafted UDD section, in definition order
#[derive(Debug, Clone, Serialize)]
pub struct DraftedSection {
    pub name: String,
    pub content: String,
}

/// Tuning knobs for one drafting run
#[derive(Debug, Clone)]
pub struct DraftingOptions {
    /// How many previously drafted sections to carry as context
    pub context_window: usize,

    /// Character cap applied to each carried snippet
    pub snippet_max_chars: usize,

    /// Max tokens per completion response
    pub max_tokens: u32,
}

impl DraftingOptions {
    pub fn new(drafting: &DraftingConfig, max_tokens: u32) -> Self {
        Self {
            context_window: drafting.context_window,
            snippet_max_chars: drafting.snippet_max_chars,
            max_tokens,
        }
    }
}

/// Sliding window of previously drafted sections
///
/// Each entry is `[<name>] <content>` with the content truncated to the
/// character cap. Only the most recent `window` entries survive.
#[derive(Debug, Clone)]
pub struct RollingContext {
    entries: VecDeque<String>,
    window: usize,
    max_chars: usize,
}

impl RollingContext {
    pub fn new(window: usize, max_chars: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            window,
            max_chars,
        }
    }

    /// Record a drafted section, evicting the oldest entry past the window
    pub fn push(&mut self, name: &str, content: &str) {
        let entry = format!("[{}] {}", name, truncate_chars(content, self.max_chars));
        self.entries.push_back(entry);
        while self.entries.len() > self.window {
            self.entries.pop_front();
        }
    }

    /// The context block for the next prompt, or None when nothing is drafted yet
    pub fn as_block(&self) -> Option<String> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.entries.iter().cloned().collect::<Vec<_>>().join("\n\n"))
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Truncate to at most `max` characters (not bytes), respecting boundaries
fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Draft every section in definition order
///
/// Per section: compute the FSD slice, render the prompt with up to the last
/// `context_window` drafts, make exactly one completion call, and trim the
/// response. Any completion error propagates unchanged.
pub async fn draft_sections(
    llm: &Arc<dyn LlmClient>,
    fsd_text: &str,
    definitions: &[SectionDefinition],
    mapping: &SectionMapping,
    options: &DraftingOptions,
) -> Result<Vec<DraftedSection>, DraftingError> {
    debug!(sections = definitions.len(), "draft_sections: called");
    let builder = PromptBuilder::new();
    let mut context = RollingContext::new(options.context_window, options.snippet_max_chars);
    let mut drafted = Vec::with_capacity(definitions.len());

    for section in definitions {
        let slice = fsd::extract_relevant_slice(fsd_text, &section.name, mapping);
        let prompt_context = SectionPromptContext::new(section, &slice, context.as_block());
        let user_prompt = builder.render_section_prompt(&prompt_context)?;

        let request = CompletionRequest {
            system_prompt: DRAFT_SYSTEM.to_string(),
            messages: vec![Message::user(user_prompt)],
            max_tokens: options.max_tokens,
        };

        let response = llm.complete(request).await?;
        let content = response.content.trim().to_string();
        info!(
            section = %section.name,
            chars = content.len(),
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "draft_sections: drafted section"
        );

        context.push(&section.name, &content);
        drafted.push(DraftedSection {
            name: section.name.clone(),
            content,
        });
    }

    Ok(drafted)
}
