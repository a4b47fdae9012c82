//! Substitution map and applier

use std::collections::HashMap;

use varsub_domain::Token;

/// Replacements accumulated during one pass, keyed by literal token text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionMap {
    entries: HashMap<String, String>,
}

impl SubstitutionMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the replacement for a token. The last writer wins.
    pub fn insert(&mut self, token: &Token, replacement: impl Into<String>) {
        self.entries
            .insert(token.literal.clone(), replacement.into());
    }

    /// Returns the replacement recorded for a literal token text.
    #[must_use]
    pub fn get(&self, literal: &str) -> Option<&str> {
        self.entries.get(literal).map(String::as_str)
    }

    /// Returns true if the literal text already has a replacement.
    #[must_use]
    pub fn contains(&self, literal: &str) -> bool {
        self.entries.contains_key(literal)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose replacement differs from their literal text.
    fn qualifying(&self) -> Vec<(&str, &str)> {
        self.entries
            .iter()
            .filter(|(literal, replacement)| literal != replacement)
            .map(|(l, r)| (l.as_str(), r.as_str()))
            .collect()
    }
}

/// Result of applying a substitution map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    /// Rewritten string.
    pub result: String,

    /// Whether any entry with a replacement different from its own
    /// literal text existed.
    pub changed: bool,
}

/// Replaces every occurrence of each literal token text with its replacement.
///
/// The input is rewritten in a single left-to-right sweep, so replacement
/// text is never rescanned within the same call. When two literals start at
/// the same position the longer one wins.
#[must_use]
pub fn apply(input: &str, substitutions: &SubstitutionMap) -> Applied {
    let entries = substitutions.qualifying();
    if entries.is_empty() {
        return Applied {
            result: input.to_string(),
            changed: false,
        };
    }

    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    loop {
        let next = entries
            .iter()
            .filter_map(|(literal, replacement)| {
                rest.find(literal).map(|at| (at, *literal, *replacement))
            })
            .min_by(|a, b| a.0.cmp(&b.0).then_with(|| b.1.len().cmp(&a.1.len())));

        match next {
            Some((at, literal, replacement)) => {
                result.push_str(&rest[..at]);
                result.push_str(replacement);
                rest = &rest[at + literal.len()..];
            }
            None => {
                result.push_str(rest);
                break;
            }
        }
    }

    Applied {
        result,
        changed: true,
    }
}
