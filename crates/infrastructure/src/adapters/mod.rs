//! Port adapters

mod environment;
mod path_normalizer;
mod shell_command_executor;
mod workspace_folders;

pub use environment::{InMemoryEnvironment, ProcessEnvironment};
pub use path_normalizer::{PathStyle, PlatformPathNormalizer};
pub use shell_command_executor::ShellCommandExecutor;
pub use workspace_folders::StaticWorkspaceFolders;
