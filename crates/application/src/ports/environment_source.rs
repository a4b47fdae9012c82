//! Environment source port

use std::collections::BTreeMap;

/// Errors that can occur while reading an environment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvironmentError {
    /// The value exists but is not valid unicode.
    #[error("environment variable is not valid unicode: {0}")]
    NotUnicode(String),
}

/// Read access to a set of environment variables.
pub trait EnvironmentSource: Send + Sync {
    /// Looks up a variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the value exists but cannot be read.
    fn get(&self, name: &str) -> Result<Option<String>, EnvironmentError>;
}

/// An override table answers every lookup itself; entries marked absent and
/// keys missing from the table both read as unset.
impl EnvironmentSource for BTreeMap<String, Option<String>> {
    fn get(&self, name: &str) -> Result<Option<String>, EnvironmentError> {
        Ok(Self::get(self, name).cloned().flatten())
    }
}
