//! Data-driven memo page rendering.
//!
//! A memo page is declared by a JSON payload: which table layout to use,
//! the rows to show, and the page's metadata. The renderer fetches the
//! payload, fills the content container, and syncs document metadata —
//! always, even when no table was recognized.

pub mod metadata;
pub mod model;
pub mod renderer;
pub mod templates;

pub use metadata::sync_metadata;
pub use model::{MemoData, MemoItem, TableKind};
pub use renderer::{MemoRenderer, RenderConfig, RenderError};
pub use templates::TemplateEngine;
