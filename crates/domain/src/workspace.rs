//! Workspace folder descriptor

use serde::{Deserialize, Serialize};

/// A named workspace root known to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceFolder {
    /// Display name used by `${workspaceFolder:name}` references.
    pub name: String,

    /// Absolute path of the folder.
    pub path: String,
}

impl WorkspaceFolder {
    /// Creates a new workspace folder.
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Returns true if `name` refers to this folder, ignoring case.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}
