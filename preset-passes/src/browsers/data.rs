//! Built-in browser release tables and query resolution.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use thiserror::Error;

use super::BrowserResolver;

/// Error returned when a browser query cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BrowserQueryError {
    #[error("unknown browser query '{0}'")]
    Syntax(String),
    #[error("unknown browser '{0}'")]
    UnknownBrowser(String),
    #[error("invalid version '{version}' in query '{query}'")]
    Version { query: String, version: String },
    #[error("unknown version '{version}' of {browser}")]
    UnknownVersion { browser: String, version: String },
}

const SAFARI: &[&str] = &[
    "3.1", "3.2", "4", "5", "5.1", "6", "6.1", "7", "7.1", "8", "9", "9.1", "10", "10.1", "11",
    "11.1", "12", "12.1", "13", "13.1", "14", "14.1", "15", "15.1", "15.2-15.3", "15.4", "15.5",
    "15.6", "16.0", "16.1", "16.2", "16.3", "16.4", "16.5", "16.6", "17.0", "17.1", "17.2",
    "17.3", "17.4", "17.5", "17.6", "18.0", "18.1", "18.2", "18.3",
];

const IOS_SAF: &[&str] = &[
    "3.2", "4.0-4.1", "4.2-4.3", "5.0-5.1", "6.0-6.1", "7.0-7.1", "8", "8.1-8.4", "9.0-9.2",
    "9.3", "10.0-10.2", "10.3", "11.0-11.2", "11.3-11.4", "12.0-12.1", "12.2-12.5", "13.0-13.1",
    "13.2", "13.3", "13.4-13.7", "14.0-14.4", "14.5-14.8", "15.0-15.1", "15.2-15.3", "15.4",
    "15.5", "15.6-15.8", "16.0", "16.1", "16.2", "16.3", "16.4", "16.5", "16.6-16.7", "17.0",
    "17.1", "17.2", "17.3", "17.4", "17.5", "17.6-17.7", "18.0", "18.1", "18.2", "18.3",
];

/// Release tables for the browsers the pipeline targets.
///
/// Identifiers follow browserslist (`safari 15`, `ios_saf 15.0-15.1`).
#[derive(Debug, Clone)]
pub struct BrowserData {
    releases: IndexMap<&'static str, Vec<String>>,
}

impl Default for BrowserData {
    fn default() -> Self {
        let mut releases = IndexMap::new();
        releases.insert("safari", SAFARI.iter().map(|v| v.to_string()).collect());
        releases.insert("ios_saf", IOS_SAF.iter().map(|v| v.to_string()).collect());

        let chrome = (4..=131).map(|v: u32| v.to_string()).collect();
        releases.insert("chrome", chrome);

        let edge = (12..=18).chain(79..=131).map(|v: u32| v.to_string()).collect();
        releases.insert("edge", edge);

        let mut firefox: Vec<String> = (2..=3).map(|v: u32| v.to_string()).collect();
        firefox.extend(["3.5".to_string(), "3.6".to_string()]);
        firefox.extend((4..=133).map(|v: u32| v.to_string()));
        releases.insert("firefox", firefox);

        Self { releases }
    }
}

impl BrowserData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonical browser name for an alias, case-insensitive.
    pub fn canonical_name(name: &str) -> Option<&'static str> {
        match name.to_ascii_lowercase().as_str() {
            "safari" => Some("safari"),
            "ios" | "ios_saf" => Some("ios_saf"),
            "chrome" => Some("chrome"),
            "edge" => Some("edge"),
            "firefox" | "ff" => Some("firefox"),
            _ => None,
        }
    }

    /// Released versions of a canonical browser, oldest first.
    pub fn releases(&self, browser: &str) -> Option<&[String]> {
        self.releases.get(browser).map(Vec::as_slice)
    }

    fn query(&self, query: &str) -> Result<Vec<String>, BrowserQueryError> {
        let syntax = || BrowserQueryError::Syntax(query.to_string());
        let mut parts = query.split_whitespace();
        let (Some(name), Some(second)) = (parts.next(), parts.next()) else {
            return Err(syntax());
        };

        let browser = Self::canonical_name(name)
            .ok_or_else(|| BrowserQueryError::UnknownBrowser(name.to_string()))?;
        let releases = self
            .releases(browser)
            .ok_or_else(|| BrowserQueryError::UnknownBrowser(name.to_string()))?;

        // The operator may be attached to the version (`<=15`) or stand alone.
        let (op, version) = match split_operator(second) {
            (Some(op), "") => (Some(op), parts.next().ok_or_else(syntax)?),
            (op, version) => (op, version),
        };
        if parts.next().is_some() {
            return Err(syntax());
        }

        let Some(op) = op else {
            return releases
                .iter()
                .find(|release| release_contains(release, version))
                .map(|release| vec![format!("{browser} {release}")])
                .ok_or_else(|| BrowserQueryError::UnknownVersion {
                    browser: browser.to_string(),
                    version: version.to_string(),
                });
        };

        let bound = leading_float(version).ok_or_else(|| BrowserQueryError::Version {
            query: query.to_string(),
            version: version.to_string(),
        })?;

        Ok(releases
            .iter()
            .filter(|release| matches_bound(release, op, bound))
            .map(|release| format!("{browser} {release}"))
            .collect())
    }
}

impl BrowserResolver for BrowserData {
    fn resolve(&self, queries: &[&str]) -> Result<Vec<String>, BrowserQueryError> {
        let mut resolved = BTreeSet::new();
        for query in queries {
            resolved.extend(self.query(query)?);
        }
        Ok(resolved.into_iter().collect())
    }
}

/// Split a leading comparison operator off a query token.
fn split_operator(token: &str) -> (Option<&'static str>, &str) {
    ["<=", ">=", "<", ">"]
        .into_iter()
        .find_map(|op| token.strip_prefix(op).map(|rest| (Some(op), rest)))
        .unwrap_or((None, token))
}

/// `<` and `<=` compare the start of a range, `>` and `>=` its end.
fn matches_bound(release: &str, op: &str, bound: f64) -> bool {
    let start = leading_float(release);
    let end = leading_float(release.split_once('-').map_or(release, |(_, end)| end));
    match (op, start, end) {
        ("<", Some(start), _) => start < bound,
        ("<=", Some(start), _) => start <= bound,
        (">", _, Some(end)) => end > bound,
        (">=", _, Some(end)) => end >= bound,
        _ => false,
    }
}

fn release_contains(release: &str, version: &str) -> bool {
    if release == version {
        return true;
    }
    let Some((start, end)) = release.split_once('-') else {
        return false;
    };
    match (leading_float(start), leading_float(end), leading_float(version)) {
        (Some(start), Some(end), Some(version)) => start <= version && version <= end,
        _ => false,
    }
}

/// The numeric prefix of a version, e.g. `15.2` for `15.2-15.3`.
fn leading_float(version: &str) -> Option<f64> {
    let mut seen_dot = false;
    let end = version
        .char_indices()
        .find(|&(_, c)| {
            if c == '.' && !seen_dot {
                seen_dot = true;
                false
            } else {
                !c.is_ascii_digit()
            }
        })
        .map_or(version.len(), |(i, _)| i);
    version[..end].trim_end_matches('.').parse().ok()
}
