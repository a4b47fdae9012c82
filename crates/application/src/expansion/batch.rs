//! Batch expansion

use varsub_domain::{ExpansionContext, ExpansionErrorList, ExpansionOutcome};

use super::engine::ExpansionEngine;

impl ExpansionEngine {
    /// Expands each input in order, pairing every outcome with the problems
    /// recorded for that input alone.
    ///
    /// Strings are expanded one after another, so command side effects
    /// happen in input order. A circular reference, the pass cap or a fault
    /// on one string does not affect the others.
    pub async fn expand_each<I, S>(
        &self,
        inputs: I,
        context: &ExpansionContext,
    ) -> Vec<(ExpansionOutcome, ExpansionErrorList)>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut expanded = Vec::new();
        for input in inputs {
            let mut errors = ExpansionErrorList::new();
            let outcome = self
                .expand_string(input.as_ref(), context, Some(&mut errors))
                .await;
            expanded.push((outcome, errors));
        }
        expanded
    }

    /// Expands each input in order and returns the full outcomes.
    pub async fn expand_outcomes<I, S>(
        &self,
        inputs: I,
        context: &ExpansionContext,
        mut errors: Option<&mut ExpansionErrorList>,
    ) -> Vec<ExpansionOutcome>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.expand_each(inputs, context)
            .await
            .into_iter()
            .map(|(outcome, local)| {
                if let Some(sink) = errors.as_deref_mut() {
                    sink.extend(local);
                }
                outcome
            })
            .collect()
    }

    /// Expands each input in order and returns the expanded strings.
    pub async fn expand_strings<I, S>(
        &self,
        inputs: I,
        context: &ExpansionContext,
        errors: Option<&mut ExpansionErrorList>,
    ) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.expand_outcomes(inputs, context, errors)
            .await
            .into_iter()
            .map(|outcome| outcome.result)
            .collect()
    }
}
