// Rendering module.
// Builds a typed template context from fetched data and renders Markdown.

pub mod context;
pub mod markdown;

pub use context::{ProfileStats, TemplateContext};
pub use markdown::render;
