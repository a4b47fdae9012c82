//! Request file loading.
//!
//! A request file describes one expansion request: variables, optional
//! environment override and variants, workspace folders, shell commands and
//! the strings to expand.
//!
//! ```yaml
//! variables:
//!   generator: Ninja
//!   workspaceFolder: /work/app
//! environment_override:
//!   CC: clang
//!   CXX: null
//! workspace_folders:
//!   - name: app
//!     path: /work/app
//! commands:
//!   gitHead: git rev-parse HEAD
//! strings:
//!   - ${workspaceFolder}/build
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;
use varsub_application::ExpandStringsInput;
use varsub_domain::{
    DomainError, EnvironmentOverride, ExpansionContext, RequiredVariable, VariantTable,
    WorkspaceFolder,
};

use crate::adapters::{ShellCommandExecutor, StaticWorkspaceFolders};

/// Errors that can occur while loading a request file.
#[derive(Debug, thiserror::Error)]
pub enum RequestFileError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing failed.
    #[error("invalid JSON request: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing failed.
    #[error("invalid YAML request: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The request parsed but does not form a valid context.
    #[error("invalid request: {0}")]
    Invalid(#[from] DomainError),
}

/// Serialization format of a request file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestFormat {
    /// `.json` and anything without a YAML extension.
    Json,
    /// `.yml` or `.yaml`.
    Yaml,
}

impl RequestFormat {
    /// Picks the format from the file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

const fn default_recursive() -> bool {
    true
}

/// On-disk shape of an expansion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestFile {
    /// Plain variables.
    #[serde(default)]
    pub variables: BTreeMap<String, String>,

    /// Replaces the process environment when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_override: Option<EnvironmentOverride>,

    /// Build-variant values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variants: Option<VariantTable>,

    /// Re-expand until a fixpoint.
    #[serde(default = "default_recursive")]
    pub recursive: bool,

    /// Refuse `${command:...}` tokens.
    #[serde(default)]
    pub commands_disabled: bool,

    /// Known workspace folders.
    #[serde(default)]
    pub workspace_folders: Vec<WorkspaceFolder>,

    /// Command name to shell command line.
    #[serde(default)]
    pub commands: BTreeMap<String, String>,

    /// Strings to expand.
    #[serde(default)]
    pub strings: Vec<String>,
}

impl RequestFile {
    /// Parses a request from text.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid for `format`.
    pub fn parse(content: &str, format: RequestFormat) -> Result<Self, RequestFileError> {
        Ok(match format {
            RequestFormat::Json => serde_json::from_str(content)?,
            RequestFormat::Yaml => serde_yaml::from_str(content)?,
        })
    }

    /// Builds the use case input.
    ///
    /// A missing `userHome` variable defaults to the current user's home
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is still missing.
    pub fn to_input(&self) -> Result<ExpandStringsInput, RequestFileError> {
        let mut variables = self.variables.clone();
        let home_key = RequiredVariable::UserHome.key();
        if !variables.contains_key(home_key)
            && let Some(home) = dirs::home_dir()
        {
            variables.insert(home_key.to_string(), home.to_string_lossy().into_owned());
        }

        let mut builder = ExpansionContext::builder(variables)?
            .recursive(self.recursive)
            .commands_disabled(self.commands_disabled);
        if let Some(environment) = &self.environment_override {
            builder = builder.environment_override(environment.clone());
        }
        if let Some(variants) = &self.variants {
            builder = builder.variants(variants.clone());
        }

        Ok(ExpandStringsInput {
            context: builder.build(),
            strings: self.strings.clone(),
        })
    }

    /// Workspace folder registry described by this request.
    #[must_use]
    pub fn workspace_folders(&self) -> StaticWorkspaceFolders {
        StaticWorkspaceFolders::new(self.workspace_folders.clone())
    }

    /// Command executor described by this request.
    #[must_use]
    pub fn command_executor(&self) -> ShellCommandExecutor {
        ShellCommandExecutor::new(self.commands.clone())
    }
}

/// Loads request files from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestFileLoader;

impl RequestFileLoader {
    /// Creates a new loader.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Reads and parses the request at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub async fn load(&self, path: &Path) -> Result<RequestFile, RequestFileError> {
        let format = RequestFormat::from_path(path);
        debug!(path = %path.display(), ?format, "loading request file");

        let content = tokio::fs::read_to_string(path).await?;
        RequestFile::parse(&content, format)
    }
}
