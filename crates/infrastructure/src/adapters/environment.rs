//! Environment adapters

use std::collections::HashMap;
use std::env::{self, VarError};

use varsub_application::ports::{EnvironmentError, EnvironmentSource};

/// Reads the real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl ProcessEnvironment {
    /// Creates a new process environment adapter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl EnvironmentSource for ProcessEnvironment {
    fn get(&self, name: &str) -> Result<Option<String>, EnvironmentError> {
        // Names containing '=' or NUL are not valid keys; treat them as unset.
        if name.is_empty() || name.contains(['=', '\0']) {
            return Ok(None);
        }
        match env::var(name) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(_)) => Err(EnvironmentError::NotUnicode(name.to_string())),
        }
    }
}

/// Fixed environment captured up front, e.g. from a host process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryEnvironment {
    values: HashMap<String, String>,
}

impl InMemoryEnvironment {
    /// Creates an environment from key/value pairs.
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvironmentSource for InMemoryEnvironment {
    fn get(&self, name: &str) -> Result<Option<String>, EnvironmentError> {
        Ok(self.values.get(name).cloned())
    }
}
