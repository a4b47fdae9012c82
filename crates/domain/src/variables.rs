//! Plain-variable table
//!
//! Holds the values referenced by `${name}` tokens. A fixed set of keys is
//! required; any other key may be added on top, though only word-character
//! keys can ever be referenced.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Variables every table must define.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredVariable {
    /// Build system generator name.
    Generator,
    /// Path of the active workspace folder.
    WorkspaceFolder,
    /// Last path component of the active workspace folder.
    WorkspaceFolderBasename,
    /// Source directory of the project.
    SourceDir,
    /// Stable hash identifying the workspace.
    WorkspaceHash,
    /// Root of the workspace.
    WorkspaceRoot,
    /// Last path component of the workspace root.
    WorkspaceRootFolderName,
    /// Home directory of the current user.
    UserHome,
}

impl RequiredVariable {
    /// All required variables, in validation order.
    pub const ALL: [Self; 8] = [
        Self::Generator,
        Self::WorkspaceFolder,
        Self::WorkspaceFolderBasename,
        Self::SourceDir,
        Self::WorkspaceHash,
        Self::WorkspaceRoot,
        Self::WorkspaceRootFolderName,
        Self::UserHome,
    ];

    /// Returns the key used in `${key}` references.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Generator => "generator",
            Self::WorkspaceFolder => "workspaceFolder",
            Self::WorkspaceFolderBasename => "workspaceFolderBasename",
            Self::SourceDir => "sourceDir",
            Self::WorkspaceHash => "workspaceHash",
            Self::WorkspaceRoot => "workspaceRoot",
            Self::WorkspaceRootFolderName => "workspaceRootFolderName",
            Self::UserHome => "userHome",
        }
    }
}

impl fmt::Display for RequiredVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Alias of `sourceDir` used by consuming configuration.
pub const SOURCE_DIRECTORY_ALIAS: &str = "sourceDirectory";

/// Validated plain-variable table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct VariableTable {
    values: BTreeMap<String, String>,
}

impl VariableTable {
    /// Builds a table from raw key/value pairs.
    ///
    /// The `sourceDirectory` alias is always set to the `sourceDir` value.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingRequiredVariable` if a required key is
    /// absent.
    pub fn new<I, K, V>(entries: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut values: BTreeMap<String, String> = entries
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();

        for required in RequiredVariable::ALL {
            if !values.contains_key(required.key()) {
                return Err(DomainError::MissingRequiredVariable(required.key().to_string()));
            }
        }

        if let Some(source_dir) = values.get(RequiredVariable::SourceDir.key()).cloned() {
            values.insert(SOURCE_DIRECTORY_ALIAS.to_string(), source_dir);
        }

        Ok(Self { values })
    }

    /// Looks up a variable by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Returns the value of a required variable.
    #[must_use]
    pub fn required(&self, variable: RequiredVariable) -> &str {
        self.get(variable.key()).unwrap_or_default()
    }

    /// Returns the number of variables, including the `sourceDirectory` alias.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl TryFrom<BTreeMap<String, String>> for VariableTable {
    type Error = DomainError;

    fn try_from(values: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl From<VariableTable> for BTreeMap<String, String> {
    fn from(table: VariableTable) -> Self {
        table.values
    }
}
