//! Expansion outcomes and error reporting

use std::fmt;

use serde::{Deserialize, Serialize};

/// How an expansion finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpansionStatus {
    /// Reached a fixpoint, or ran the single pass of a non-recursive expansion.
    Complete,
    /// Stopped on a self-referencing environment value.
    CircularReference,
    /// Stopped at the pass cap.
    MaxRecursionReached,
    /// Hit an unexpected fault; the input was returned unmodified.
    Faulted,
}

/// Descriptor of a detected circular reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircularReference {
    /// Key that referenced itself.
    pub key: String,

    /// Token text that triggered the detection, e.g. `${env:PATH}`.
    pub token: String,

    /// Input string as handed to the expansion.
    pub input: String,
}

impl fmt::Display for CircularReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in string: {}", self.token, self.input)
    }
}

/// Result of expanding a single string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionOutcome {
    /// The expanded string. Partially expanded when the status is not `Complete`.
    pub result: String,

    /// Whether any pass replaced something.
    pub changed: bool,

    /// Set when the expansion stopped on a circular reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circular_reference: Option<CircularReference>,

    /// Terminal status.
    pub status: ExpansionStatus,

    /// Number of passes that ran.
    pub passes: usize,
}

impl ExpansionOutcome {
    /// Outcome returning `input` untouched after a fault.
    #[must_use]
    pub fn faulted(input: &str) -> Self {
        Self {
            result: input.to_string(),
            changed: false,
            circular_reference: None,
            status: ExpansionStatus::Faulted,
            passes: 0,
        }
    }

    /// Returns true if the expansion reached a fixpoint.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status == ExpansionStatus::Complete
    }
}

/// Kinds of problems reported during expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpansionErrorKind {
    /// `${key}` with no such plain variable.
    InvalidReference,
    /// `${command:...}` under a commands-disabled context.
    CommandsDisabled,
    /// The command executor failed.
    CommandExecutionFailed,
    /// An environment value referenced itself.
    CircularReference,
    /// The pass cap was reached.
    MaxRecursionReached,
    /// Any other failure while expanding one string.
    UnexpectedFault,
}

impl fmt::Display for ExpansionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::InvalidReference => "invalid reference",
            Self::CommandsDisabled => "commands disabled",
            Self::CommandExecutionFailed => "command execution failed",
            Self::CircularReference => "circular reference",
            Self::MaxRecursionReached => "max recursion reached",
            Self::UnexpectedFault => "unexpected fault",
        };
        f.write_str(s)
    }
}

/// One recorded problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionErrorEntry {
    /// What went wrong.
    pub kind: ExpansionErrorKind,

    /// Token or string the problem refers to.
    pub detail: String,
}

/// Caller-supplied sink collecting problems across expansions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionErrorList {
    entries: Vec<ExpansionErrorEntry>,
}

impl ExpansionErrorList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a problem.
    pub fn push(&mut self, kind: ExpansionErrorKind, detail: impl Into<String>) {
        self.entries.push(ExpansionErrorEntry {
            kind,
            detail: detail.into(),
        });
    }

    /// Appends all entries of another list.
    pub fn extend(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }

    /// Returns all recorded entries in order.
    #[must_use]
    pub fn entries(&self) -> &[ExpansionErrorEntry] {
        &self.entries
    }

    /// Returns true if an entry of `kind` was recorded.
    #[must_use]
    pub fn contains(&self, kind: ExpansionErrorKind) -> bool {
        self.entries.iter().any(|e| e.kind == kind)
    }

    /// Counts entries of `kind`.
    #[must_use]
    pub fn count(&self, kind: ExpansionErrorKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
