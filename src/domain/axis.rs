use std::fmt;
use std::str::FromStr;

use crate::error::SemverError;

/// Version component selected by a bump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpAxis {
    Major,
    Minor,
    Patch,
    /// Start or continue a prerelease
    Pre,
    /// Drop the prerelease, keeping MAJOR.MINOR.PATCH
    Final,
}

impl BumpAxis {
    pub fn as_str(&self) -> &'static str {
        match self {
            BumpAxis::Major => "major",
            BumpAxis::Minor => "minor",
            BumpAxis::Patch => "patch",
            BumpAxis::Pre => "pre",
            BumpAxis::Final => "final",
        }
    }
}

impl FromStr for BumpAxis {
    type Err = SemverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "major" => Ok(BumpAxis::Major),
            "minor" => Ok(BumpAxis::Minor),
            "patch" => Ok(BumpAxis::Patch),
            "pre" => Ok(BumpAxis::Pre),
            "final" => Ok(BumpAxis::Final),
            other => Err(SemverError::operation(format!(
                "bump axis not supported: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for BumpAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
