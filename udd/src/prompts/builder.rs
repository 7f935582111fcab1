//! Section prompt rendering
//!
//! Renders the embedded Handlebars template with one section's definition,
//! its FSD slice, and the optional rolling-context block.

use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

use super::embedded;
use crate::sections::SectionDefinition;

/// Context for rendering the per-section user prompt
#[derive(Debug, Clone, Serialize)]
pub struct SectionPromptContext {
    /// Section name
    pub name: String,
    /// Rendering type ("text" or "table")
    pub render_type: String,
    /// Section description
    pub description: String,
    /// Comma-joined field names, present only for table sections with fields
    pub fields: Option<String>,
    /// Authoring instructions
    pub instructions: String,
    /// FSD excerpt for this section (opaque to the template)
    pub fsd_slice: String,
    /// Previously drafted sections, already truncated and labelled
    pub prior_context: Option<String>,
}

impl SectionPromptContext {
    /// Build a prompt context from a section definition and its slice
    pub fn new(section: &SectionDefinition, fsd_slice: &str, prior_context: Option<String>) -> Self {
        debug!(section = %section.name, slice_len = fsd_slice.len(), "SectionPromptContext::new: called");
        Self {
            name: section.name.clone(),
            render_type: section.render_type.to_string(),
            description: section.description.clone(),
            fields: section.fields.as_ref().map(|fields| fields.join(", ")),
            instructions: section.instructions.clone(),
            fsd_slice: fsd_slice.to_string(),
            prior_context,
        }
    }
}

/// Renders section prompts from the embedded template
pub struct PromptBuilder {
    hbs: Handlebars<'static>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self { hbs: Handlebars::new() }
    }

    /// Render the user prompt for one section draft
    pub fn render_section_prompt(&self, context: &SectionPromptContext) -> Result<String, handlebars::RenderError> {
        debug!(section = %context.name, "PromptBuilder::render_section_prompt: called");
        self.hbs.render_template(embedded::SECTION_USER_TEMPLATE, context)
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}
