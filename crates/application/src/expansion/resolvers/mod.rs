//! Namespace resolvers
//!
//! Each resolver scans the pass input with its own grammars and records
//! replacements in the pass's substitution map. Resolvers run in a fixed
//! order; a later resolver overwrites an earlier one for the same literal.

mod command;
mod environment;
mod variable;
mod variant;
mod workspace_folder;

use async_trait::async_trait;
use varsub_domain::{ExpansionContext, ExpansionErrorKind, ExpansionErrorList, Token};

use super::substitution::SubstitutionMap;
use crate::error::ExpansionResult;

pub use command::CommandResolver;
pub use environment::{EnvironmentResolver, ParentEnvironmentResolver};
pub use variable::VariableResolver;
pub use variant::VariantResolver;
pub use workspace_folder::WorkspaceFolderResolver;

/// State shared by all resolvers during one pass.
#[derive(Debug)]
pub struct Pass<'a> {
    input: &'a str,
    context: &'a ExpansionContext,
    substitutions: SubstitutionMap,
    circular: Option<Token>,
    errors: ExpansionErrorList,
}

impl<'a> Pass<'a> {
    /// Starts a pass over `input`.
    #[must_use]
    pub fn new(input: &'a str, context: &'a ExpansionContext) -> Self {
        Self {
            input,
            context,
            substitutions: SubstitutionMap::new(),
            circular: None,
            errors: ExpansionErrorList::new(),
        }
    }

    /// String being expanded in this pass.
    #[must_use]
    pub const fn input(&self) -> &'a str {
        self.input
    }

    /// Context of the expansion.
    #[must_use]
    pub const fn context(&self) -> &'a ExpansionContext {
        self.context
    }

    /// Records a replacement for `token`.
    pub fn substitute(&mut self, token: &Token, replacement: impl Into<String>) {
        self.substitutions.insert(token, replacement);
    }

    /// Returns true if `literal` already has a replacement in this pass.
    #[must_use]
    pub fn is_substituted(&self, literal: &str) -> bool {
        self.substitutions.contains(literal)
    }

    /// Records a recoverable problem.
    pub fn report(&mut self, kind: ExpansionErrorKind, detail: impl Into<String>) {
        self.errors.push(kind, detail);
    }

    /// Flags `token` as a circular reference, ending the expansion after
    /// this pass.
    pub fn flag_circular(&mut self, token: Token) {
        self.circular = Some(token);
    }

    /// Token flagged as circular, if any.
    #[must_use]
    pub const fn circular(&self) -> Option<&Token> {
        self.circular.as_ref()
    }

    /// Replacements recorded so far.
    #[must_use]
    pub const fn substitutions(&self) -> &SubstitutionMap {
        &self.substitutions
    }

    /// Splits the pass into its substitutions, circular token and errors.
    #[must_use]
    pub fn finish(self) -> (SubstitutionMap, Option<Token>, ExpansionErrorList) {
        (self.substitutions, self.circular, self.errors)
    }
}

/// Resolves the tokens of one namespace.
#[async_trait]
pub trait NamespaceResolver: Send + Sync {
    /// Name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Resolves this namespace's tokens in `pass.input()`.
    ///
    /// # Errors
    ///
    /// Returns an error only for faults that must abort the expansion of the
    /// current string.
    async fn resolve(&self, pass: &mut Pass<'_>) -> ExpansionResult<()>;
}
