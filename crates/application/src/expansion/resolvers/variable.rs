//! `${key}` resolver

use async_trait::async_trait;
use tracing::warn;
use varsub_domain::{ExpansionErrorKind, Namespace};

use super::{NamespaceResolver, Pass};
use crate::error::ExpansionResult;
use crate::expansion::scanner::scan;

/// Resolves plain variables from the context's variable table.
#[derive(Debug, Clone, Copy, Default)]
pub struct VariableResolver;

#[async_trait]
impl NamespaceResolver for VariableResolver {
    fn name(&self) -> &'static str {
        Namespace::Variable.as_str()
    }

    async fn resolve(&self, pass: &mut Pass<'_>) -> ExpansionResult<()> {
        let variables = pass.context().variables();

        for token in scan(pass.input(), Namespace::Variable) {
            if let Some(value) = variables.get(&token.key) {
                pass.substitute(&token, value);
            } else {
                // Left in place so the caller can see what failed.
                warn!(
                    token = %token,
                    input = pass.input(),
                    "invalid variable reference"
                );
                pass.report(ExpansionErrorKind::InvalidReference, token.literal);
            }
        }

        Ok(())
    }
}
