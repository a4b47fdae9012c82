//! Expansion context
//!
//! Immutable per-call configuration shared by every pass of an expansion.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::DomainResult;
use crate::variables::{RequiredVariable, VariableTable};

/// Environment table that replaces the process environment.
///
/// A `None` value marks a variable as explicitly absent; it resolves to an
/// empty string rather than falling through to the process environment.
pub type EnvironmentOverride = BTreeMap<String, Option<String>>;

/// Build-variant values referenced by `${variant:key}`.
pub type VariantTable = BTreeMap<String, String>;

/// Configuration for one logical expansion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionContext {
    variables: VariableTable,
    environment_override: Option<EnvironmentOverride>,
    variants: Option<VariantTable>,
    recursive: bool,
    commands_disabled: bool,
}

impl ExpansionContext {
    /// Creates a context with recursion enabled and commands allowed.
    #[must_use]
    pub const fn new(variables: VariableTable) -> Self {
        Self {
            variables,
            environment_override: None,
            variants: None,
            recursive: true,
            commands_disabled: false,
        }
    }

    /// Starts a builder from raw variable entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the entries do not form a valid `VariableTable`.
    pub fn builder<I, K, V>(variables: I) -> DomainResult<ExpansionContextBuilder>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Ok(ExpansionContextBuilder {
            context: Self::new(VariableTable::new(variables)?),
        })
    }

    /// Returns the plain-variable table.
    #[must_use]
    pub const fn variables(&self) -> &VariableTable {
        &self.variables
    }

    /// Returns the environment override, if one was supplied.
    #[must_use]
    pub const fn environment_override(&self) -> Option<&EnvironmentOverride> {
        self.environment_override.as_ref()
    }

    /// Returns the build-variant table, if one was supplied.
    #[must_use]
    pub const fn variants(&self) -> Option<&VariantTable> {
        self.variants.as_ref()
    }

    /// Whether passes repeat until a fixpoint.
    #[must_use]
    pub const fn is_recursive(&self) -> bool {
        self.recursive
    }

    /// Whether `${command:...}` tokens are refused.
    #[must_use]
    pub const fn commands_disabled(&self) -> bool {
        self.commands_disabled
    }

    /// Path handed to the command executor.
    #[must_use]
    pub fn workspace_folder(&self) -> &str {
        self.variables.required(RequiredVariable::WorkspaceFolder)
    }
}

/// Builder for `ExpansionContext`.
#[derive(Debug, Clone)]
pub struct ExpansionContextBuilder {
    context: ExpansionContext,
}

impl ExpansionContextBuilder {
    /// Replaces the process environment with the given table.
    #[must_use]
    pub fn environment_override(mut self, environment: EnvironmentOverride) -> Self {
        self.context.environment_override = Some(environment);
        self
    }

    /// Supplies build-variant values.
    #[must_use]
    pub fn variants(mut self, variants: VariantTable) -> Self {
        self.context.variants = Some(variants);
        self
    }

    /// Enables or disables re-expansion of substituted values.
    #[must_use]
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.context.recursive = recursive;
        self
    }

    /// Refuses `${command:...}` tokens when set.
    #[must_use]
    pub fn commands_disabled(mut self, disabled: bool) -> Self {
        self.context.commands_disabled = disabled;
        self
    }

    /// Finishes the builder.
    #[must_use]
    pub fn build(self) -> ExpansionContext {
        self.context
    }
}
