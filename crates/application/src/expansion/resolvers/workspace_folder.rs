//! `${workspaceFolder:name}` resolver

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;
use varsub_domain::Namespace;

use super::{NamespaceResolver, Pass};
use crate::error::ExpansionResult;
use crate::expansion::scanner::scan;
use crate::ports::WorkspaceFolderRegistry;

/// Resolves named workspace folders to their paths.
pub struct WorkspaceFolderResolver {
    registry: Arc<dyn WorkspaceFolderRegistry>,
}

impl WorkspaceFolderResolver {
    /// Creates a resolver over the given registry.
    #[must_use]
    pub fn new(registry: Arc<dyn WorkspaceFolderRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl NamespaceResolver for WorkspaceFolderResolver {
    fn name(&self) -> &'static str {
        Namespace::WorkspaceFolder.as_str()
    }

    async fn resolve(&self, pass: &mut Pass<'_>) -> ExpansionResult<()> {
        let folders = self.registry.folders();
        if folders.is_empty() {
            return Ok(());
        }

        for token in scan(pass.input(), Namespace::WorkspaceFolder) {
            match folders.iter().find(|f| f.matches(&token.key)) {
                Some(folder) => pass.substitute(&token, folder.path.as_str()),
                None => warn!(
                    token = %token,
                    input = pass.input(),
                    "workspace folder not found"
                ),
            }
        }

        Ok(())
    }
}
