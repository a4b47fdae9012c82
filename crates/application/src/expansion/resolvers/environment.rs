//! `${env:key}`, `${env.key}`, `$env{key}` and `$penv{key}` resolvers

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use varsub_domain::Namespace;

use super::{NamespaceResolver, Pass};
use crate::error::ExpansionResult;
use crate::expansion::scanner::scan;
use crate::ports::{EnvironmentSource, PathNormalizer};

/// Resolves environment tokens from the override table, or from the process
/// environment when the context has no override.
pub struct EnvironmentResolver {
    process: Arc<dyn EnvironmentSource>,
    normalizer: Arc<dyn PathNormalizer>,
}

impl EnvironmentResolver {
    /// Creates a resolver backed by the given process environment.
    #[must_use]
    pub fn new(process: Arc<dyn EnvironmentSource>, normalizer: Arc<dyn PathNormalizer>) -> Self {
        Self {
            process,
            normalizer,
        }
    }
}

/// Returns true if `value` contains an environment token for `key`.
fn references_itself(value: &str, key: &str) -> bool {
    scan(value, Namespace::Environment)
        .iter()
        .any(|token| token.key == key)
}

#[async_trait]
impl NamespaceResolver for EnvironmentResolver {
    fn name(&self) -> &'static str {
        Namespace::Environment.as_str()
    }

    async fn resolve(&self, pass: &mut Pass<'_>) -> ExpansionResult<()> {
        let source: &dyn EnvironmentSource = match pass.context().environment_override() {
            Some(table) => table,
            None => self.process.as_ref(),
        };

        for token in scan(pass.input(), Namespace::Environment) {
            let raw = source.get(&token.key)?;
            let value = self.normalizer.normalize(raw.as_deref());

            if references_itself(&value, &token.key) {
                debug!(token = %token, "environment value references itself");
                pass.flag_circular(token);
                break;
            }
            pass.substitute(&token, value);
        }

        Ok(())
    }
}

/// Resolves `$penv{key}` from the process environment, ignoring any override.
pub struct ParentEnvironmentResolver {
    process: Arc<dyn EnvironmentSource>,
    normalizer: Arc<dyn PathNormalizer>,
}

impl ParentEnvironmentResolver {
    /// Creates a resolver backed by the given process environment.
    #[must_use]
    pub fn new(process: Arc<dyn EnvironmentSource>, normalizer: Arc<dyn PathNormalizer>) -> Self {
        Self {
            process,
            normalizer,
        }
    }
}

#[async_trait]
impl NamespaceResolver for ParentEnvironmentResolver {
    fn name(&self) -> &'static str {
        Namespace::ParentEnvironment.as_str()
    }

    async fn resolve(&self, pass: &mut Pass<'_>) -> ExpansionResult<()> {
        for token in scan(pass.input(), Namespace::ParentEnvironment) {
            let raw = self.process.get(&token.key)?;
            pass.substitute(&token, self.normalizer.normalize(raw.as_deref()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MapEnvironment, TrimNormalizer, context, context_with_override};
    use pretty_assertions::assert_eq;

    fn resolver(env: MapEnvironment) -> EnvironmentResolver {
        EnvironmentResolver::new(Arc::new(env), Arc::new(TrimNormalizer))
    }

    #[tokio::test]
    async fn test_all_forms_read_process_environment() {
        let ctx = context();
        let mut pass = Pass::new("${env:HOME} ${env.HOME} $env{HOME}", &ctx);
        resolver(MapEnvironment::new([("HOME", "/home/dev")]))
            .resolve(&mut pass)
            .await
            .expect("resolves");

        for literal in ["${env:HOME}", "${env.HOME}", "$env{HOME}"] {
            assert_eq!(pass.substitutions().get(literal), Some("/home/dev"));
        }
    }

    #[tokio::test]
    async fn test_missing_variable_is_empty() {
        let ctx = context();
        let mut pass = Pass::new("${env:NOPE}", &ctx);
        resolver(MapEnvironment::default())
            .resolve(&mut pass)
            .await
            .expect("resolves");

        assert_eq!(pass.substitutions().get("${env:NOPE}"), Some(""));
    }

    #[tokio::test]
    async fn test_override_replaces_process_environment() {
        let ctx = context_with_override([("CC", Some("clang")), ("CXX", None)]);
        let mut pass = Pass::new("${env:CC} ${env:CXX} ${env:HOME}", &ctx);
        resolver(MapEnvironment::new([
            ("CC", "gcc"),
            ("CXX", "g++"),
            ("HOME", "/home/dev"),
        ]))
        .resolve(&mut pass)
        .await
        .expect("resolves");

        assert_eq!(pass.substitutions().get("${env:CC}"), Some("clang"));
        assert_eq!(pass.substitutions().get("${env:CXX}"), Some(""));
        assert_eq!(pass.substitutions().get("${env:HOME}"), Some(""));
    }

    #[tokio::test]
    async fn test_values_are_normalized() {
        let ctx = context();
        let mut pass = Pass::new("${env:PADDED}", &ctx);
        resolver(MapEnvironment::new([("PADDED", "  /opt  ")]))
            .resolve(&mut pass)
            .await
            .expect("resolves");

        assert_eq!(pass.substitutions().get("${env:PADDED}"), Some("/opt"));
    }

    #[tokio::test]
    async fn test_self_reference_stops_environment_resolution() {
        let ctx = context();
        let mut pass = Pass::new("${env:PATH};${env:OTHER}", &ctx);
        resolver(MapEnvironment::new([
            ("PATH", "/usr/bin:$env{PATH}"),
            ("OTHER", "x"),
        ]))
        .resolve(&mut pass)
        .await
        .expect("resolves");

        let circular = pass.circular().expect("circular reference flagged");
        assert_eq!(circular.key, "PATH");
        assert_eq!(circular.literal, "${env:PATH}");
        assert!(!pass.is_substituted("${env:PATH}"));
        assert!(!pass.is_substituted("${env:OTHER}"));
    }

    #[tokio::test]
    async fn test_reference_to_other_variable_is_not_circular() {
        let ctx = context();
        let mut pass = Pass::new("${env:A}", &ctx);
        resolver(MapEnvironment::new([("A", "${env:B}")]))
            .resolve(&mut pass)
            .await
            .expect("resolves");

        assert!(pass.circular().is_none());
        assert_eq!(pass.substitutions().get("${env:A}"), Some("${env:B}"));
    }

    #[tokio::test]
    async fn test_lookup_fault_propagates() {
        let ctx = context();
        let mut pass = Pass::new("${env:BROKEN}", &ctx);
        let result = resolver(MapEnvironment::default().with_broken("BROKEN"))
            .resolve(&mut pass)
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_parent_environment_ignores_override() {
        let ctx = context_with_override([("PATH", Some("/override"))]);
        let mut pass = Pass::new("$penv{PATH}", &ctx);
        ParentEnvironmentResolver::new(
            Arc::new(MapEnvironment::new([("PATH", "/usr/bin")])),
            Arc::new(TrimNormalizer),
        )
        .resolve(&mut pass)
        .await
        .expect("resolves");

        assert_eq!(pass.substitutions().get("$penv{PATH}"), Some("/usr/bin"));
    }
}
