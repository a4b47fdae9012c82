//! Varsub Application - Expansion engine and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for environment, workspace folders, commands)
//! - The multi-pass expansion engine
//! - Use case orchestration for batches of strings

pub mod error;
pub mod expansion;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{ExpansionError, ExpansionResult};
pub use expansion::{EnginePorts, ExpansionEngine, MAX_PASSES, NamespaceResolver, Pass};
pub use ports::{
    CommandError, CommandExecutor, EnvironmentError, EnvironmentSource, PathNormalizer,
    WorkspaceFolderRegistry,
};
pub use use_cases::{ExpandStrings, ExpandStringsInput, ExpandStringsOutput};
