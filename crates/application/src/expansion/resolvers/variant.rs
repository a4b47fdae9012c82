//! `${variant:key}` resolver

use async_trait::async_trait;
use varsub_domain::Namespace;

use super::{NamespaceResolver, Pass};
use crate::error::ExpansionResult;
use crate::expansion::scanner::scan;

/// Resolves build-variant values. Inactive when the context has no
/// variant table.
#[derive(Debug, Clone, Copy, Default)]
pub struct VariantResolver;

#[async_trait]
impl NamespaceResolver for VariantResolver {
    fn name(&self) -> &'static str {
        Namespace::Variant.as_str()
    }

    async fn resolve(&self, pass: &mut Pass<'_>) -> ExpansionResult<()> {
        let Some(variants) = pass.context().variants() else {
            return Ok(());
        };

        for token in scan(pass.input(), Namespace::Variant) {
            let value = variants.get(&token.key).map_or("", String::as_str);
            pass.substitute(&token, value);
        }

        Ok(())
    }
}
