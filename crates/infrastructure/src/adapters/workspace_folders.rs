//! Static workspace folder registry

use varsub_application::ports::WorkspaceFolderRegistry;
use varsub_domain::WorkspaceFolder;

/// Registry over a fixed list of folders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticWorkspaceFolders {
    folders: Vec<WorkspaceFolder>,
}

impl StaticWorkspaceFolders {
    /// Creates a registry over `folders`.
    #[must_use]
    pub const fn new(folders: Vec<WorkspaceFolder>) -> Self {
        Self { folders }
    }
}

impl WorkspaceFolderRegistry for StaticWorkspaceFolders {
    fn folders(&self) -> Vec<WorkspaceFolder> {
        self.folders.clone()
    }
}
