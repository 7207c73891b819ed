//! Prerelease handling for the `pre` bump axis
//!
//! A prerelease series is identified by its leading identifier (the prefix,
//! e.g. `dev` in `1.2.4-dev.3`) and advanced through its trailing numeric
//! counter. See https://semver.org/#spec-item-9 for the identifier grammar.

use std::fmt;
use std::str::FromStr;

use semver::Prerelease;

use crate::error::{Result, SemverError};

/// Prerelease prefix token (e.g. "dev", "rc")
///
/// Must be a single prerelease identifier: ASCII alphanumerics and hyphens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrereleasePrefix(String);

impl PrereleasePrefix {
    /// Parse a prefix token
    ///
    /// # Returns
    /// * `Ok(PrereleasePrefix)` - Valid identifier
    /// * `Err(SemverError::InvalidPrefix)` - Empty, dotted or containing other characters
    pub fn parse(s: &str) -> Result<Self> {
        s.parse()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for PrereleasePrefix {
    type Err = SemverError;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() || !s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(SemverError::InvalidPrefix(s.to_string()));
        }
        Ok(PrereleasePrefix(s.to_string()))
    }
}

impl fmt::Display for PrereleasePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// When a release version first enters a prerelease, decides whether PATCH
/// is incremented before the prerelease is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchPolicy {
    /// Always start from the next patch: `5.1.3` -> `5.1.4-dev.1`
    Always,
    /// Only start from the next patch when PATCH is zero: `4.8.0` -> `4.8.1-dev.1`,
    /// `5.1.3` -> `5.1.3-dev.1`
    WhenZero,
}

impl PatchPolicy {
    pub fn applies(&self, patch: u64) -> bool {
        match self {
            PatchPolicy::Always => true,
            PatchPolicy::WhenZero => patch == 0,
        }
    }
}

/// Policy used by `bump pre`
pub const PRERELEASE_PATCH_POLICY: PatchPolicy = PatchPolicy::Always;

/// First dot-separated identifier of a prerelease string
pub fn leading_identifier(prerelease: &str) -> &str {
    prerelease.split('.').next().unwrap_or_default()
}

/// Fail when the current prerelease belongs to a different prefix
///
/// No-op when either side is empty. Comparison is case-insensitive and only
/// looks at the leading identifier of `current`.
pub fn check_prerelease(current: &str, prefix: &str) -> Result<()> {
    if current.is_empty() || prefix.is_empty() {
        return Ok(());
    }
    let current_prefix = leading_identifier(current);
    if !current_prefix.eq_ignore_ascii_case(prefix) {
        return Err(SemverError::PrereleaseMismatch {
            current: current_prefix.to_string(),
            prefix: prefix.to_string(),
        });
    }
    Ok(())
}

/// Next prerelease in the series of `prefix`
///
/// An empty prerelease starts the series at `<prefix>.1`. Otherwise the
/// trailing numeric identifier is incremented, or `.1` is appended when the
/// last identifier is not numeric. Existing identifiers keep their spelling.
pub fn next_prerelease(current: &Prerelease, prefix: &PrereleasePrefix) -> Result<Prerelease> {
    let next = if current.is_empty() {
        format!("{}.1", prefix)
    } else {
        let mut identifiers: Vec<String> = current.as_str().split('.').map(str::to_string).collect();
        match identifiers.last().and_then(|last| last.parse::<u64>().ok()) {
            Some(counter) => {
                let counter = counter.checked_add(1).ok_or_else(|| SemverError::Overflow {
                    axis: "pre".to_string(),
                    version: current.to_string(),
                })?;
                if let Some(last) = identifiers.last_mut() {
                    *last = counter.to_string();
                }
            }
            None => identifiers.push("1".to_string()),
        }
        identifiers.join(".")
    };

    Prerelease::new(&next).map_err(|_| SemverError::InvalidPrefix(prefix.to_string()))
}
