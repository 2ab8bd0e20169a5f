//! Resource sources for page assembly.
//!
//! Fragments and data payloads are addressed by site-relative URLs. A
//! [`Source`] resolves those URLs over HTTP, from a local directory, or
//! from memory (the test double). Query strings are treated as cache
//! hints and never participate in resolution.

pub mod cache;
pub mod source;

pub use cache::{append_param, cache_buster, with_cache_buster};
pub use source::{DirSource, FetchError, HttpSource, MemorySource, Source};
