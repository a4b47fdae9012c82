//! `${command:name}` resolver

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;
use varsub_domain::{ExpansionErrorKind, Namespace};

use super::{NamespaceResolver, Pass};
use crate::error::ExpansionResult;
use crate::expansion::scanner::scan;
use crate::ports::CommandExecutor;

/// Resolves command tokens through the command executor.
///
/// Each distinct token runs at most once per pass.
pub struct CommandResolver {
    executor: Arc<dyn CommandExecutor>,
}

impl CommandResolver {
    /// Creates a resolver over the given executor.
    #[must_use]
    pub fn new(executor: Arc<dyn CommandExecutor>) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl NamespaceResolver for CommandResolver {
    fn name(&self) -> &'static str {
        Namespace::Command.as_str()
    }

    async fn resolve(&self, pass: &mut Pass<'_>) -> ExpansionResult<()> {
        let context = pass.context();
        let mut attempted = HashSet::new();

        for token in scan(pass.input(), Namespace::Command) {
            if context.commands_disabled() {
                warn!(input = pass.input(), "commands are not supported for this string");
                pass.report(ExpansionErrorKind::CommandsDisabled, token.literal);
                break;
            }
            if pass.is_substituted(&token.literal) || !attempted.insert(token.literal.clone()) {
                continue;
            }

            match self
                .executor
                .execute(&token.key, context.workspace_folder())
                .await
            {
                Ok(output) => pass.substitute(&token, output),
                Err(err) => {
                    warn!(token = %token, error = %err, "command execution failed");
                    pass.report(ExpansionErrorKind::CommandExecutionFailed, token.literal);
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingExecutor, context, context_without_commands};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_duplicate_tokens_execute_once() {
        let ctx = context();
        let executor = Arc::new(RecordingExecutor::new([("git.head", "abc123")]));
        let mut pass = Pass::new("${command:git.head}-${command:git.head}", &ctx);
        CommandResolver::new(executor.clone())
            .resolve(&mut pass)
            .await
            .expect("resolves");

        assert_eq!(executor.calls(), vec![("git.head".to_string(), "/work/app".to_string())]);
        assert_eq!(pass.substitutions().get("${command:git.head}"), Some("abc123"));
    }

    #[tokio::test]
    async fn test_failure_leaves_token_and_continues() {
        let ctx = context();
        let executor = Arc::new(RecordingExecutor::new([("ok", "fine")]));
        let mut pass = Pass::new("${command:broken} ${command:ok}", &ctx);
        CommandResolver::new(executor.clone())
            .resolve(&mut pass)
            .await
            .expect("resolves");

        assert!(!pass.is_substituted("${command:broken}"));
        assert_eq!(pass.substitutions().get("${command:ok}"), Some("fine"));
        let (_, _, errors) = pass.finish();
        assert_eq!(errors.count(ExpansionErrorKind::CommandExecutionFailed), 1);
    }

    #[tokio::test]
    async fn test_repeated_failing_command_runs_once() {
        let ctx = context();
        let executor = Arc::new(RecordingExecutor::default());
        let mut pass = Pass::new("${command:broken} ${command:broken}", &ctx);
        CommandResolver::new(executor.clone())
            .resolve(&mut pass)
            .await
            .expect("resolves");

        assert_eq!(executor.calls().len(), 1);
        let (_, _, errors) = pass.finish();
        assert_eq!(errors.count(ExpansionErrorKind::CommandExecutionFailed), 1);
    }

    #[tokio::test]
    async fn test_disabled_commands_are_not_executed() {
        let ctx = context_without_commands();
        let executor = Arc::new(RecordingExecutor::new([("a", "1"), ("b", "2")]));
        let mut pass = Pass::new("${command:a} ${command:b}", &ctx);
        CommandResolver::new(executor.clone())
            .resolve(&mut pass)
            .await
            .expect("resolves");

        assert!(executor.calls().is_empty());
        assert!(pass.substitutions().is_empty());
        let (_, _, errors) = pass.finish();
        assert_eq!(errors.count(ExpansionErrorKind::CommandsDisabled), 1);
        assert_eq!(errors.entries()[0].detail, "${command:a}");
    }
}
