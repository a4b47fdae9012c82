//! Command executor port

use async_trait::async_trait;

/// Errors that can occur while running a `${command:...}` token.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// No command is registered under this name.
    #[error("unknown command: {0}")]
    Unknown(String),

    /// The command ran but reported failure.
    #[error("command '{command}' failed: {message}")]
    Failed {
        /// Command name.
        command: String,
        /// Failure description.
        message: String,
    },

    /// I/O error while spawning or reading the command.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Runs named commands and returns their textual result.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Executes `command` for the given workspace folder.
    ///
    /// # Errors
    ///
    /// Returns an error if the command is unknown or fails.
    async fn execute(&self, command: &str, workspace_folder: &str) -> Result<String, CommandError>;
}
