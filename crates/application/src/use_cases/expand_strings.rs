//! Expand strings use case

use varsub_domain::{ExpansionContext, ExpansionErrorList, ExpansionOutcome, ExpansionStatus};

use crate::expansion::ExpansionEngine;

/// Input for expanding a list of strings.
#[derive(Debug, Clone)]
pub struct ExpandStringsInput {
    /// Context shared by every string.
    pub context: ExpansionContext,
    /// Strings to expand, in order.
    pub strings: Vec<String>,
}

/// Output containing the expanded strings and what went wrong.
#[derive(Debug, Clone)]
pub struct ExpandStringsOutput {
    /// Expanded strings, same order and count as the input.
    pub results: Vec<String>,
    /// Per-string outcomes.
    pub outcomes: Vec<ExpansionOutcome>,
    /// Problems recorded for each string, same order as the input.
    pub string_errors: Vec<ExpansionErrorList>,
    /// Problems recorded across the batch.
    pub errors: ExpansionErrorList,
    /// Whether every string reached a fixpoint without problems.
    pub is_complete: bool,
}

impl ExpandStringsOutput {
    /// Number of strings that did not finish with `Complete`.
    #[must_use]
    pub fn incomplete_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status != ExpansionStatus::Complete)
            .count()
    }
}

/// Expands every string of a request.
pub struct ExpandStrings {
    engine: ExpansionEngine,
}

impl ExpandStrings {
    /// Creates a new `ExpandStrings` use case.
    #[must_use]
    pub const fn new(engine: ExpansionEngine) -> Self {
        Self { engine }
    }

    /// Executes the use case.
    pub async fn execute(&self, input: &ExpandStringsInput) -> ExpandStringsOutput {
        let (outcomes, string_errors): (Vec<_>, Vec<_>) = self
            .engine
            .expand_each(&input.strings, &input.context)
            .await
            .into_iter()
            .unzip();

        let mut errors = ExpansionErrorList::new();
        for local in &string_errors {
            errors.extend(local.clone());
        }

        let results = outcomes.iter().map(|o| o.result.clone()).collect();
        let is_complete = errors.is_empty() && outcomes.iter().all(ExpansionOutcome::is_complete);

        ExpandStringsOutput {
            results,
            outcomes,
            string_errors,
            errors,
            is_complete,
        }
    }
}
