//! Prompt composition subdomain.
//!
//! - [`template`] — static per-document-type instruction templates
//! - [`composer`] — assembly of agent- and phase-specific prompts

pub mod composer;
pub mod template;

pub use composer::{build_batch_prompt, build_prompt, OutputFormat, Prompt, PromptOptions};
pub use template::PromptTemplates;
