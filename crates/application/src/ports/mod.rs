//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the expansion core and the host.
//! Each port is a trait implemented by adapters in the infrastructure layer.

mod command_executor;
mod environment_source;
mod path_normalizer;
mod workspace_folders;

pub use command_executor::{CommandError, CommandExecutor};
pub use environment_source::{EnvironmentError, EnvironmentSource};
pub use path_normalizer::PathNormalizer;
pub use workspace_folders::WorkspaceFolderRegistry;
