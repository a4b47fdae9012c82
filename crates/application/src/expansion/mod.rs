//! Placeholder expansion
//!
//! Expands `${...}` tokens in configuration strings. Every pass scans the
//! current string with each namespace grammar, resolves the tokens into a
//! substitution map and applies it. Passes repeat until nothing changes,
//! a circular environment reference is found, or `MAX_PASSES` is reached.
//!
//! # Usage
//!
//! ```ignore
//! let engine = ExpansionEngine::new(ports);
//! let outcome = engine.expand_string("${sourceDir}/build", &context, None).await;
//! ```

mod batch;
pub mod engine;
pub mod resolvers;
pub mod scanner;
pub mod substitution;

pub use engine::{EnginePorts, ExpansionEngine, MAX_PASSES};
pub use resolvers::{NamespaceResolver, Pass};
pub use scanner::{DOLLAR_TOKEN, Grammar, grammars, scan};
pub use substitution::{Applied, SubstitutionMap, apply};
