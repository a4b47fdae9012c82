//! Token scanner
//!
//! Each namespace owns one or more grammars. Grammars are kept in a fixed,
//! ordered table so scanning and precedence stay deterministic.

use std::sync::LazyLock;

use regex::Regex;
use varsub_domain::{Namespace, Token};

/// Escape for a literal `$`, replaced once after all passes.
pub const DOLLAR_TOKEN: &str = "${dollar}";

const DOLLAR_KEY: &str = "dollar";

/// A compiled token grammar for one namespace.
#[derive(Debug)]
pub struct Grammar {
    namespace: Namespace,
    regex: Regex,
}

impl Grammar {
    fn new(namespace: Namespace, pattern: &str) -> Self {
        Self {
            namespace,
            regex: Regex::new(pattern).expect("valid regex"),
        }
    }

    /// Namespace this grammar belongs to.
    #[must_use]
    pub const fn namespace(&self) -> Namespace {
        self.namespace
    }

    /// Returns non-overlapping matches in left-to-right order.
    pub fn scan<'a>(&'a self, input: &'a str) -> impl Iterator<Item = Token> + 'a {
        self.regex.captures_iter(input).filter_map(move |caps| {
            let full = caps.get(0)?;
            let key = caps.get(1)?;
            if self.namespace == Namespace::Variable && key.as_str() == DOLLAR_KEY {
                return None;
            }
            Some(Token::new(full.as_str(), self.namespace, key.as_str()))
        })
    }
}

// Inner keys are lazy (`.+?`) so `${env:A}${env:B}` yields two tokens.
static GRAMMARS: LazyLock<Vec<Grammar>> = LazyLock::new(|| {
    vec![
        Grammar::new(Namespace::Variable, r"\$\{(\w+)\}"),
        Grammar::new(Namespace::Environment, r"\$\{env:(.+?)\}"),
        Grammar::new(Namespace::Environment, r"\$\{env\.(.+?)\}"),
        Grammar::new(Namespace::Environment, r"\$env\{(.+?)\}"),
        Grammar::new(Namespace::ParentEnvironment, r"\$penv\{(.+?)\}"),
        Grammar::new(Namespace::WorkspaceFolder, r"\$\{workspaceFolder:(.+?)\}"),
        Grammar::new(Namespace::Variant, r"\$\{variant:(.+?)\}"),
        Grammar::new(Namespace::Command, r"\$\{command:(.+?)\}"),
    ]
});

/// All grammars in evaluation order.
#[must_use]
pub fn grammars() -> &'static [Grammar] {
    &GRAMMARS
}

/// Scans `input` with every grammar of `namespace`, grammar by grammar.
#[must_use]
pub fn scan(input: &str, namespace: Namespace) -> Vec<Token> {
    grammars()
        .iter()
        .filter(|g| g.namespace == namespace)
        .flat_map(|g| g.scan(input))
        .collect()
}
