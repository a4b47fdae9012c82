//! Path normalization port

/// Normalizes environment-sourced values before substitution.
pub trait PathNormalizer: Send + Sync {
    /// Returns the normalized value. Absent and empty inputs yield `""`.
    fn normalize(&self, raw: Option<&str>) -> String;
}
