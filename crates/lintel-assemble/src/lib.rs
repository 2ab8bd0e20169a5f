//! Fragment loading and mount orchestration.
//!
//! Shared page regions (navbar, footer) live as HTML fragments outside the
//! pages that show them. The [`Assembler`] fills each placeholder mount
//! present in a document, re-creates fragment scripts at the end of the
//! body, and runs an optional callback once every load has settled.

pub mod assembler;

pub use assembler::{AssembleReport, Assembler, Mount};
