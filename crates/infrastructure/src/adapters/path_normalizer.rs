//! Platform path normalizer
//!
//! On Windows, backslashes inside drive-letter paths are turned into forward
//! slashes so values survive later escaping. Other platforms pass values
//! through unchanged.

use std::sync::LazyLock;

use regex::Regex;
use varsub_application::ports::PathNormalizer;

static DRIVE_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)[a-z]:(?:\\[^<>:"/\\|?*;\r\n]+)*\\?"#).expect("valid regex")
});

/// Path convention used when normalizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStyle {
    /// Drive-letter paths with backslash separators.
    Windows,
    /// Slash-separated paths.
    Posix,
}

impl PathStyle {
    /// Style of the platform this binary was built for.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(windows) { Self::Windows } else { Self::Posix }
    }
}

/// Normalizes environment values for the configured path style.
#[derive(Debug, Clone, Copy)]
pub struct PlatformPathNormalizer {
    style: PathStyle,
}

impl PlatformPathNormalizer {
    /// Creates a normalizer for the given style.
    #[must_use]
    pub const fn new(style: PathStyle) -> Self {
        Self { style }
    }

    /// Creates a normalizer for the current platform.
    #[must_use]
    pub const fn for_current_platform() -> Self {
        Self::new(PathStyle::current())
    }
}

impl Default for PlatformPathNormalizer {
    fn default() -> Self {
        Self::for_current_platform()
    }
}

impl PathNormalizer for PlatformPathNormalizer {
    fn normalize(&self, raw: Option<&str>) -> String {
        let Some(raw) = raw.filter(|v| !v.is_empty()) else {
            return String::new();
        };

        match self.style {
            PathStyle::Posix => raw.to_string(),
            PathStyle::Windows => DRIVE_PATH
                .replace_all(raw, |caps: &regex::Captures<'_>| caps[0].replace('\\', "/"))
                .into_owned(),
        }
    }
}
