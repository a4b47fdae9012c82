//! Shell command executor
//!
//! Maps command names used in `${command:name}` tokens to shell command
//! lines and runs them with the workspace folder as working directory.

use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;
use varsub_application::ports::{CommandError, CommandExecutor};

/// Runs registered shell command lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellCommandExecutor {
    commands: BTreeMap<String, String>,
}

impl ShellCommandExecutor {
    /// Creates an executor with the given name to command line table.
    #[must_use]
    pub const fn new(commands: BTreeMap<String, String>) -> Self {
        Self { commands }
    }

    /// Registers a command.
    pub fn register(&mut self, name: impl Into<String>, command_line: impl Into<String>) {
        self.commands.insert(name.into(), command_line.into());
    }

    fn shell(command_line: &str) -> Command {
        if cfg!(windows) {
            let mut command = Command::new("cmd");
            command.arg("/C").arg(command_line);
            command
        } else {
            let mut command = Command::new("sh");
            command.arg("-c").arg(command_line);
            command
        }
    }
}

#[async_trait]
impl CommandExecutor for ShellCommandExecutor {
    async fn execute(&self, command: &str, workspace_folder: &str) -> Result<String, CommandError> {
        let command_line = self
            .commands
            .get(command)
            .ok_or_else(|| CommandError::Unknown(command.to_string()))?;

        let mut process = Self::shell(command_line);
        if !workspace_folder.is_empty() && Path::new(workspace_folder).is_dir() {
            process.current_dir(workspace_folder);
        }

        debug!(command, command_line = %command_line, "running command");
        let output = process.output().await?;

        if !output.status.success() {
            return Err(CommandError::Failed {
                command: command.to_string(),
                message: format!(
                    "{}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.trim_end_matches(['\r', '\n']).to_string())
    }
}
