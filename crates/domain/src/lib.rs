//! Varsub Domain - Core expansion types
//!
//! This crate defines the data model for `${...}` placeholder expansion.
//! All types here are pure Rust with no I/O dependencies.

pub mod context;
pub mod error;
pub mod outcome;
pub mod platform;
pub mod token;
pub mod variables;
pub mod workspace;

pub use context::{EnvironmentOverride, ExpansionContext, ExpansionContextBuilder, VariantTable};
pub use error::{DomainError, DomainResult};
pub use outcome::{
    CircularReference, ExpansionErrorEntry, ExpansionErrorKind, ExpansionErrorList,
    ExpansionOutcome, ExpansionStatus,
};
pub use platform::ENV_LIST_DELIMITER;
pub use token::{Namespace, Token};
pub use variables::{RequiredVariable, VariableTable};
pub use workspace::WorkspaceFolder;
