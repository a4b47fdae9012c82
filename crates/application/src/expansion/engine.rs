//! Recursion driver
//!
//! Runs scan, resolve and apply passes over a string until it stops
//! changing. Deeper cycles such as `${a}` → `${b}` → `${a}` are not detected
//! directly; they end at `MAX_PASSES` and are reported as possible circular
//! references.

use std::sync::Arc;

use tracing::{debug, error};
use varsub_domain::{
    CircularReference, ExpansionContext, ExpansionErrorKind, ExpansionErrorList, ExpansionOutcome,
    ExpansionStatus, Token,
};

use super::resolvers::{
    CommandResolver, EnvironmentResolver, NamespaceResolver, ParentEnvironmentResolver, Pass,
    VariableResolver, VariantResolver, WorkspaceFolderResolver,
};
use super::scanner::DOLLAR_TOKEN;
use super::substitution::apply;
use crate::error::ExpansionResult;
use crate::ports::{CommandExecutor, EnvironmentSource, PathNormalizer, WorkspaceFolderRegistry};

/// Maximum number of passes over a single string.
pub const MAX_PASSES: usize = 10;

/// Collaborators the built-in resolvers depend on.
#[derive(Clone)]
pub struct EnginePorts {
    /// Real process environment.
    pub environment: Arc<dyn EnvironmentSource>,
    /// Normalizer applied to environment values.
    pub path_normalizer: Arc<dyn PathNormalizer>,
    /// Known workspace folders.
    pub workspace_folders: Arc<dyn WorkspaceFolderRegistry>,
    /// Runner for `${command:...}` tokens.
    pub commands: Arc<dyn CommandExecutor>,
}

/// Driver state between passes.
#[derive(Debug)]
enum DriverState {
    Running(usize),
    Done,
    DoneCircular(CircularReference),
    DoneMaxPasses,
}

/// Output of a single pass.
struct PassOutput {
    result: String,
    changed: bool,
    circular: Option<Token>,
    errors: ExpansionErrorList,
}

/// The expansion engine.
pub struct ExpansionEngine {
    resolvers: Vec<Box<dyn NamespaceResolver>>,
}

impl ExpansionEngine {
    /// Creates an engine with the built-in resolvers in their fixed order:
    /// variable, environment, parent environment, workspace folder, variant,
    /// command.
    #[must_use]
    pub fn new(ports: EnginePorts) -> Self {
        let EnginePorts {
            environment,
            path_normalizer,
            workspace_folders,
            commands,
        } = ports;

        Self {
            resolvers: vec![
                Box::new(VariableResolver),
                Box::new(EnvironmentResolver::new(
                    environment.clone(),
                    path_normalizer.clone(),
                )),
                Box::new(ParentEnvironmentResolver::new(environment, path_normalizer)),
                Box::new(WorkspaceFolderResolver::new(workspace_folders)),
                Box::new(VariantResolver),
                Box::new(CommandResolver::new(commands)),
            ],
        }
    }

    /// Appends a resolver that runs after the built-in ones.
    #[must_use]
    pub fn with_resolver(mut self, resolver: Box<dyn NamespaceResolver>) -> Self {
        self.resolvers.push(resolver);
        self
    }

    /// Names of the resolvers in evaluation order.
    #[must_use]
    pub fn resolver_names(&self) -> Vec<&'static str> {
        self.resolvers.iter().map(|r| r.name()).collect()
    }

    async fn run_pass(&self, input: &str, context: &ExpansionContext) -> ExpansionResult<PassOutput> {
        let mut pass = Pass::new(input, context);
        for resolver in &self.resolvers {
            resolver.resolve(&mut pass).await?;
        }

        let (substitutions, circular, errors) = pass.finish();
        let applied = apply(input, &substitutions);

        Ok(PassOutput {
            result: applied.result,
            changed: applied.changed,
            circular,
            errors,
        })
    }

    /// Expands `input`, propagating unexpected faults.
    ///
    /// Recoverable problems are appended to `errors`.
    ///
    /// # Errors
    ///
    /// Returns an error if a resolver hits a fault, such as an unreadable
    /// environment value.
    pub async fn try_expand(
        &self,
        input: &str,
        context: &ExpansionContext,
        errors: &mut ExpansionErrorList,
    ) -> ExpansionResult<ExpansionOutcome> {
        let mut current = input.to_string();
        let mut changed = false;
        let mut passes = 0;
        let mut state = DriverState::Running(0);

        while let DriverState::Running(index) = state {
            let pass = self.run_pass(&current, context).await?;
            debug!(pass = index, changed = pass.changed, "expansion pass finished");

            passes = index + 1;
            changed |= pass.changed;
            current = pass.result;
            errors.extend(pass.errors);

            state = if let Some(token) = pass.circular {
                DriverState::DoneCircular(CircularReference {
                    key: token.key,
                    token: token.literal,
                    input: input.to_string(),
                })
            } else if index + 1 == MAX_PASSES {
                DriverState::DoneMaxPasses
            } else if !context.is_recursive() || !pass.changed {
                DriverState::Done
            } else {
                DriverState::Running(index + 1)
            };
        }

        let (status, circular_reference) = match state {
            DriverState::DoneCircular(circular) => {
                error!(
                    token = %circular.token,
                    input,
                    "circular reference in string expansion"
                );
                errors.push(ExpansionErrorKind::CircularReference, circular.token.clone());
                (ExpansionStatus::CircularReference, Some(circular))
            }
            DriverState::DoneMaxPasses => {
                error!(
                    input,
                    result = %current,
                    "reached max string expansion recursion, possible circular reference"
                );
                errors.push(ExpansionErrorKind::MaxRecursionReached, current.clone());
                (ExpansionStatus::MaxRecursionReached, None)
            }
            DriverState::Done | DriverState::Running(_) => (ExpansionStatus::Complete, None),
        };

        Ok(ExpansionOutcome {
            result: current.replace(DOLLAR_TOKEN, "$"),
            changed,
            circular_reference,
            status,
            passes,
        })
    }

    /// Expands `input`.
    ///
    /// Never fails: an unexpected fault is logged, recorded as
    /// `UnexpectedFault` and `input` is returned unmodified. Problems are
    /// appended to `errors` when a sink is supplied.
    pub async fn expand_string(
        &self,
        input: &str,
        context: &ExpansionContext,
        errors: Option<&mut ExpansionErrorList>,
    ) -> ExpansionOutcome {
        let mut local = ExpansionErrorList::new();

        let outcome = match self.try_expand(input, context, &mut local).await {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(input, error = %err, "unexpected fault while expanding string");
                local.push(ExpansionErrorKind::UnexpectedFault, format!("{input}: {err}"));
                ExpansionOutcome::faulted(input)
            }
        };

        if let Some(sink) = errors {
            sink.extend(local);
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        FixedFolders, MapEnvironment, RecordingExecutor, context, context_with,
        context_without_commands, ports, ports_with, variables,
    };
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    fn engine() -> ExpansionEngine {
        ExpansionEngine::new(ports(MapEnvironment::new([
            ("HOME", "/home/dev"),
            ("PATH", "/usr/bin:$env{PATH}"),
        ])))
    }

    #[tokio::test]
    async fn test_no_tokens_is_identity() {
        let mut errors = ExpansionErrorList::new();
        let outcome = engine()
            .expand_string("plain {text} $ here", &context(), Some(&mut errors))
            .await;

        assert_eq!(outcome.result, "plain {text} $ here");
        assert!(!outcome.changed);
        assert_eq!(outcome.status, ExpansionStatus::Complete);
        assert_eq!(outcome.passes, 1);
        assert!(errors.is_empty());
    }

    #[tokio::test]
    async fn test_plain_variables_and_idempotence() {
        let engine = engine();
        let ctx = context();
        let outcome = engine
            .expand_string("${workspaceRoot}/${generator}", &ctx, None)
            .await;
        assert_eq!(outcome.result, "/work/Ninja");
        assert!(outcome.changed);

        let again = engine.expand_string(&outcome.result, &ctx, None).await;
        assert_eq!(again.result, outcome.result);
        assert!(!again.changed);
    }

    #[tokio::test]
    async fn test_unknown_variable_is_preserved() {
        let mut errors = ExpansionErrorList::new();
        let outcome = engine()
            .expand_string("${missing}/x", &context(), Some(&mut errors))
            .await;

        assert_eq!(outcome.result, "${missing}/x");
        assert!(errors.contains(ExpansionErrorKind::InvalidReference));
    }

    #[tokio::test]
    async fn test_self_referencing_environment_is_circular() {
        let mut errors = ExpansionErrorList::new();
        let input = "${env:PATH}:${env:HOME}";
        let outcome = engine()
            .expand_string(input, &context(), Some(&mut errors))
            .await;

        assert_eq!(outcome.status, ExpansionStatus::CircularReference);
        let circular = outcome.circular_reference.expect("descriptor");
        assert_eq!(circular.key, "PATH");
        assert_eq!(circular.input, input);
        assert!(errors.contains(ExpansionErrorKind::CircularReference));
        assert_eq!(outcome.result, input);
    }

    #[tokio::test]
    async fn test_chain_resolves_when_recursive() {
        let ctx = context_with([("a", "${b}"), ("b", "leaf")]);
        let outcome = engine().expand_string("${a}", &ctx, None).await;

        assert_eq!(outcome.result, "leaf");
        assert_eq!(outcome.status, ExpansionStatus::Complete);
        assert!(outcome.passes <= MAX_PASSES);
    }

    #[tokio::test]
    async fn test_chain_stops_after_one_level_when_not_recursive() {
        let mut entries = variables();
        entries.extend([("a", "${b}"), ("b", "leaf")]);
        let ctx = ExpansionContext::builder(entries)
            .expect("valid")
            .recursive(false)
            .build();

        let outcome = engine().expand_string("${a}", &ctx, None).await;
        assert_eq!(outcome.result, "${b}");
        assert_eq!(outcome.passes, 1);
    }

    #[tokio::test]
    async fn test_mutual_reference_hits_max_passes() {
        let mut errors = ExpansionErrorList::new();
        let ctx = context_with([("a", "${b}"), ("b", "${a}")]);
        let outcome = engine()
            .expand_string("${a}", &ctx, Some(&mut errors))
            .await;

        assert_eq!(outcome.status, ExpansionStatus::MaxRecursionReached);
        assert_eq!(outcome.passes, MAX_PASSES);
        assert_eq!(outcome.result, "${a}");
        assert!(errors.contains(ExpansionErrorKind::MaxRecursionReached));
    }

    #[tokio::test]
    async fn test_dollar_escape_is_replaced_once() {
        let ctx = ExpansionContext::builder(variables())
            .expect("valid")
            .recursive(false)
            .build();
        let outcome = engine()
            .expand_string("cost: ${dollar}{generator}", &ctx, None)
            .await;

        assert_eq!(outcome.result, "cost: ${generator}");
        assert!(!outcome.changed);
    }

    #[tokio::test]
    async fn test_dollar_escape_after_recursion() {
        let ctx = context_with([("price", "${dollar}5")]);
        let outcome = engine().expand_string("${price}", &ctx, None).await;
        assert_eq!(outcome.result, "$5");
    }

    #[tokio::test]
    async fn test_command_runs_once_per_pass() {
        let executor = Arc::new(RecordingExecutor::new([("build.dir", "/work/app/build")]));
        let engine = ExpansionEngine::new(EnginePorts {
            commands: executor.clone(),
            ..ports(MapEnvironment::default())
        });

        let outcome = engine
            .expand_string("${command:build.dir};${command:build.dir}", &context(), None)
            .await;

        assert_eq!(outcome.result, "/work/app/build;/work/app/build");
        assert_eq!(executor.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_disabled_commands_keep_literal() {
        let mut errors = ExpansionErrorList::new();
        let outcome = engine()
            .expand_string("${command:foo}", &context_without_commands(), Some(&mut errors))
            .await;

        assert_eq!(outcome.result, "${command:foo}");
        assert!(errors.contains(ExpansionErrorKind::CommandsDisabled));
    }

    #[tokio::test]
    async fn test_workspace_folder_and_variant_together() {
        let mut entries = variables();
        entries.push(("config", "${variant:buildType}"));
        let ctx = ExpansionContext::builder(entries)
            .expect("valid")
            .variants([("buildType".to_string(), "Debug".to_string())].into())
            .build();
        let engine = ExpansionEngine::new(ports_with(
            MapEnvironment::default(),
            FixedFolders::new([("foo", "/work/foo")]),
            RecordingExecutor::default(),
        ));

        let outcome = engine
            .expand_string("${workspaceFolder:Foo}/build/${config}", &ctx, None)
            .await;
        assert_eq!(outcome.result, "/work/foo/build/Debug");
    }

    #[tokio::test]
    async fn test_fault_returns_input_unmodified() {
        let mut errors = ExpansionErrorList::new();
        let engine = ExpansionEngine::new(ports(MapEnvironment::default().with_broken("BAD")));
        let outcome = engine
            .expand_string("${generator} ${env:BAD} ${dollar}", &context(), Some(&mut errors))
            .await;

        assert_eq!(outcome.result, "${generator} ${env:BAD} ${dollar}");
        assert_eq!(outcome.status, ExpansionStatus::Faulted);
        assert!(errors.contains(ExpansionErrorKind::UnexpectedFault));
    }

    struct UpperResolver;

    #[async_trait]
    impl NamespaceResolver for UpperResolver {
        fn name(&self) -> &'static str {
            "upper"
        }

        async fn resolve(&self, pass: &mut Pass<'_>) -> ExpansionResult<()> {
            let token = Token::new("${upper}", varsub_domain::Namespace::Variable, "upper");
            if pass.input().contains(&token.literal) {
                pass.substitute(&token, "UPPER");
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_custom_resolver_runs_last() {
        let engine = engine().with_resolver(Box::new(UpperResolver));
        assert_eq!(
            engine.resolver_names(),
            vec!["variable", "env", "penv", "workspaceFolder", "variant", "command", "upper"]
        );

        let outcome = engine.expand_string("${upper}", &context(), None).await;
        assert_eq!(outcome.result, "UPPER");
    }
}
