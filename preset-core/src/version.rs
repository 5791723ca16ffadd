use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// A semantic version as published in a package manifest.
///
/// Pre-release tags (`7.0.0-beta.4`) are kept verbatim; build metadata is
/// not supported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Version {
    major: u32,
    minor: u32,
    patch: u32,
    pre: Option<String>,
}

/// Error returned when a version string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("invalid version '{0}', expected 'X.Y.Z'")]
    Format(String),
    #[error("invalid {part} component in version '{version}'")]
    Component { version: String, part: &'static str },
}

impl TryFrom<String> for Version {
    type Error = VersionError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl Version {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            pre: None,
        }
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn pre(&self) -> Option<&str> {
        self.pre.as_deref()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.pre {
            write!(f, "-{}", pre)?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (core, pre) = match s.split_once('-') {
            Some((core, pre)) if !pre.is_empty() => (core, Some(pre.to_string())),
            Some(_) => return Err(VersionError::Format(s.to_string())),
            None => (s, None),
        };

        let parts: Vec<&str> = core.split('.').collect();
        if parts.len() != 3 {
            return Err(VersionError::Format(s.to_string()));
        }

        let component = |value: &str, part: &'static str| {
            value.parse::<u32>().map_err(|_| VersionError::Component {
                version: s.to_string(),
                part,
            })
        };

        Ok(Self {
            major: component(parts[0], "major")?,
            minor: component(parts[1], "minor")?,
            patch: component(parts[2], "patch")?,
            pre,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Version::new(7, 26, 10).to_string(), "7.26.10");
        assert_eq!(Version::default().to_string(), "0.0.0");
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "7.26.10".parse::<Version>().unwrap(),
            Version::new(7, 26, 10)
        );
        let beta = "7.0.0-beta.44".parse::<Version>().unwrap();
        assert_eq!(beta.pre(), Some("beta.44"));
        assert_eq!(beta.to_string(), "7.0.0-beta.44");
    }

    #[test]
    fn test_from_str_invalid() {
        assert!(matches!(
            "7.26".parse::<Version>(),
            Err(VersionError::Format(_))
        ));
        assert!(matches!(
            "7.x.0".parse::<Version>(),
            Err(VersionError::Component { part: "minor", .. })
        ));
        assert!("7.0.0-".parse::<Version>().is_err());
        assert!("".parse::<Version>().is_err());
    }

    #[test]
    fn test_serde() {
        #[derive(Serialize, Deserialize)]
        struct Package {
            version: Version,
        }
        let package: Package = serde_json::from_str(r#"{"version":"7.24.1"}"#).unwrap();
        assert_eq!(package.version, Version::new(7, 24, 1));
        assert_eq!(
            serde_json::to_string(&package).unwrap(),
            r#"{"version":"7.24.1"}"#
        );
    }
}
