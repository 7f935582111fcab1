//! Prompt templates and rendering for section drafting

pub mod builder;
pub mod embedded;

pub use builder::{PromptBuilder, SectionPromptContext};
pub use embedded::DRAFT_SYSTEM;
