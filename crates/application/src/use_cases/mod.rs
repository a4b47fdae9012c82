//! Use cases
//!
//! Application-level operations that orchestrate the expansion engine.

mod expand_strings;

pub use expand_strings::{ExpandStrings, ExpandStringsInput, ExpandStringsOutput};
