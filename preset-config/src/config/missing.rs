//! Missing translation policy.

use std::{fmt, str::FromStr};

use ngpreset_core::Severity;
use serde::{Deserialize, Serialize};

/// How a missing translation is reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingTranslation {
    /// Record an error; the build must fail.
    Error,
    /// Record a warning; the build continues.
    Warning,
    /// Fall back to the source text silently.
    #[default]
    Ignore,
}

impl MissingTranslation {
    /// Returns the policy identifier as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            MissingTranslation::Error => "error",
            MissingTranslation::Warning => "warning",
            MissingTranslation::Ignore => "ignore",
        }
    }

    /// Severity used when recording a missing translation.
    pub fn severity(&self) -> Severity {
        match self {
            MissingTranslation::Error => Severity::Error,
            MissingTranslation::Warning => Severity::Warning,
            MissingTranslation::Ignore => Severity::Ignore,
        }
    }
}

impl fmt::Display for MissingTranslation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MissingTranslation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(MissingTranslation::Error),
            "warning" | "warn" => Ok(MissingTranslation::Warning),
            "ignore" => Ok(MissingTranslation::Ignore),
            _ => Err(format!(
                "unknown missing translation policy '{}', expected 'error', 'warning' or 'ignore'",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_ignore() {
        assert_eq!(MissingTranslation::default(), MissingTranslation::Ignore);
    }

    #[test]
    fn test_severity_mapping() {
        assert_eq!(MissingTranslation::Error.severity(), Severity::Error);
        assert_eq!(MissingTranslation::Warning.severity(), Severity::Warning);
        assert!(MissingTranslation::Ignore.severity().is_ignored());
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "Warning".parse::<MissingTranslation>().unwrap(),
            MissingTranslation::Warning
        );
        assert!("fail".parse::<MissingTranslation>().is_err());
    }
}
