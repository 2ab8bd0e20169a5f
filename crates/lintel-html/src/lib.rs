//! HTML document model for page assembly.
//!
//! String-scanning document manipulation tailored to the site's page
//! structure: placeholder lookup, whole-element content replacement, head
//! metadata rewrites, and script extraction from fragments.

pub mod document;
pub mod scripts;

mod scan;

pub use document::Document;
pub use scripts::{extract_scripts, Script};
