//! Workspace folder registry port

use varsub_domain::WorkspaceFolder;

/// Lists the workspace folders known to the host.
pub trait WorkspaceFolderRegistry: Send + Sync {
    /// Returns the folders in host order. An empty list disables
    /// `${workspaceFolder:name}` resolution.
    fn folders(&self) -> Vec<WorkspaceFolder>;
}
