//! Platform constants

/// Delimiter for environment-style lists such as `PATH`.
///
/// Exposed for callers that build delimited values; expansion itself never
/// splits on it.
#[cfg(windows)]
pub const ENV_LIST_DELIMITER: char = ';';

/// Delimiter for environment-style lists such as `PATH`.
///
/// Exposed for callers that build delimited values; expansion itself never
/// splits on it.
#[cfg(not(windows))]
pub const ENV_LIST_DELIMITER: char = ':';
