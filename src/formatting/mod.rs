// src/formatting/mod.rs
//! Renders Notion blocks and document metadata into Markdown.

pub mod block_renderer;
mod front_matter;
mod mentions;
mod rich_text;

pub use block_renderer::BlockRenderer;
pub use front_matter::front_matter;
pub use mentions::MentionResolver;
pub use rich_text::{style_run, style_runs, style_text};
