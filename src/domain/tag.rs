use crate::error::{Result, XutlError};
use semver::Version;

/// Tag naming pattern (e.g., "v{version}", "release-{version}")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPattern {
    pub pattern: String,
}

impl TagPattern {
    pub const PLACEHOLDER: &'static str = "{version}";

    /// Create a new tag pattern, rejecting patterns without a `{version}` placeholder
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        if !pattern.contains(Self::PLACEHOLDER) {
            return Err(XutlError::config(format!(
                "tag pattern '{}' must contain {{version}} placeholder",
                pattern
            )));
        }
        Ok(TagPattern { pattern })
    }

    /// Format a version according to pattern
    /// Example: pattern="v{version}", version=1.2.3 -> "v1.2.3"
    pub fn format(&self, version: &Version) -> String {
        self.pattern.replace(Self::PLACEHOLDER, &version.to_string())
    }
}

impl Default for TagPattern {
    fn default() -> Self {
        TagPattern {
            pattern: "v{version}".to_string(),
        }
    }
}
