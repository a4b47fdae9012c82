//! Tokens and namespaces

use std::fmt;

use serde::{Deserialize, Serialize};

/// Independently-syntaxed source of substitution values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Namespace {
    /// `${key}`
    Variable,
    /// `${env:key}`, `${env.key}` and `$env{key}`
    Environment,
    /// `$penv{key}`
    ParentEnvironment,
    /// `${workspaceFolder:name}`
    WorkspaceFolder,
    /// `${variant:key}`
    Variant,
    /// `${command:name}`
    Command,
}

impl Namespace {
    /// Resolution order within a pass. Later namespaces overwrite earlier
    /// ones for the same literal text.
    pub const ORDER: [Self; 6] = [
        Self::Variable,
        Self::Environment,
        Self::ParentEnvironment,
        Self::WorkspaceFolder,
        Self::Variant,
        Self::Command,
    ];

    /// Short name used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Variable => "variable",
            Self::Environment => "env",
            Self::ParentEnvironment => "penv",
            Self::WorkspaceFolder => "workspaceFolder",
            Self::Variant => "variant",
            Self::Command => "command",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A placeholder found in an input string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    /// Exact substring to replace, e.g. `${env:PATH}`.
    pub literal: String,

    /// Namespace whose grammar matched.
    pub namespace: Namespace,

    /// Inner identifier, e.g. `PATH`.
    pub key: String,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(literal: impl Into<String>, namespace: Namespace, key: impl Into<String>) -> Self {
        Self {
            literal: literal.into(),
            namespace,
            key: key.into(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal)
    }
}
