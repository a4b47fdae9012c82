//! Deterministic JSON serialization for expansion reports.
//!
//! Output uses 2-space indentation and a trailing newline.

mod json;

pub use json::*;
