use crate::error::{SemverError, Result};

/// Semantic version value as stored in the version branch
pub type SemanticVersion = semver::Version;

/// Parse a stored version string (surrounding whitespace is ignored)
pub fn parse(text: &str) -> Result<SemanticVersion> {
    let trimmed = text.trim();
    SemanticVersion::parse(trimmed).map_err(|_| SemverError::parse(trimmed))
}

/// Build a version with no prerelease or build metadata
pub fn release(major: u64, minor: u64, patch: u64) -> SemanticVersion {
    SemanticVersion::new(major, minor, patch)
}
