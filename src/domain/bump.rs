use tracing::debug;

use crate::domain::axis::BumpAxis;
use crate::domain::prerelease::{
    check_prerelease, leading_identifier, next_prerelease, PatchPolicy, PrereleasePrefix,
    PRERELEASE_PATCH_POLICY,
};
use crate::domain::version::{release, SemanticVersion};
use crate::error::{Result, SemverError};

/// Derive the next version along `axis`
///
/// - **major**: major += 1, minor = 0, patch = 0
/// - **minor**: minor += 1, patch = 0
/// - **patch**: patch += 1
/// - **final**: numeric components unchanged
/// - **pre**: start or continue the prerelease series of `prefix`; without a
///   prefix the current series is continued
///
/// Prerelease is cleared by every axis except `pre`; build metadata is always dropped.
///
/// # Example
/// ```
/// use git_semver::domain::{bump, parse, BumpAxis};
///
/// let v = parse("0.1.0").unwrap();
/// let v = bump(&v, BumpAxis::Pre, Some("dev")).unwrap();
/// assert_eq!(v.to_string(), "0.1.1-dev.1");
/// let v = bump(&v, BumpAxis::Final, None).unwrap();
/// assert_eq!(v.to_string(), "0.1.1");
/// ```
pub fn bump(
    version: &SemanticVersion,
    axis: BumpAxis,
    prefix: Option<&str>,
) -> Result<SemanticVersion> {
    bump_with_policy(version, axis, prefix, PRERELEASE_PATCH_POLICY)
}

/// Same as [`bump`], with an explicit patch policy for entering a prerelease
pub fn bump_with_policy(
    version: &SemanticVersion,
    axis: BumpAxis,
    prefix: Option<&str>,
    policy: PatchPolicy,
) -> Result<SemanticVersion> {
    let increment = |value: u64| {
        value.checked_add(1).ok_or_else(|| SemverError::Overflow {
            axis: axis.to_string(),
            version: version.to_string(),
        })
    };

    let next = match axis {
        BumpAxis::Major => release(increment(version.major)?, 0, 0),
        BumpAxis::Minor => release(version.major, increment(version.minor)?, 0),
        BumpAxis::Patch => release(version.major, version.minor, increment(version.patch)?),
        BumpAxis::Final => release(version.major, version.minor, version.patch),
        BumpAxis::Pre => {
            let prefix = match prefix {
                Some(prefix) => PrereleasePrefix::parse(prefix)?,
                None => PrereleasePrefix::parse(leading_identifier(version.pre.as_str()))?,
            };
            check_prerelease(version.pre.as_str(), prefix.as_str())?;

            let patch = if version.pre.is_empty() && policy.applies(version.patch) {
                increment(version.patch)?
            } else {
                version.patch
            };

            let mut next = release(version.major, version.minor, patch);
            next.pre = next_prerelease(&version.pre, &prefix)?;
            next
        }
    };

    debug!(from = %version, to = %next, axis = %axis, "bumped version");
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::version::parse;

    fn bumped(from: &str, axis: BumpAxis, prefix: Option<&str>) -> String {
        bump(&parse(from).unwrap(), axis, prefix).unwrap().to_string()
    }

    #[test]
    fn test_bump_release_axes() {
        assert_eq!(bumped("1.2.3", BumpAxis::Major, None), "2.0.0");
        assert_eq!(bumped("1.2.3", BumpAxis::Minor, None), "1.3.0");
        assert_eq!(bumped("1.2.3", BumpAxis::Patch, None), "1.2.4");
    }

    #[test]
    fn test_bump_release_axes_clear_prerelease() {
        assert_eq!(bumped("1.2.3-dev.4", BumpAxis::Major, None), "2.0.0");
        assert_eq!(bumped("1.2.3-dev.4", BumpAxis::Minor, None), "1.3.0");
        assert_eq!(bumped("1.2.3-dev.4", BumpAxis::Patch, None), "1.2.4");
        assert_eq!(bumped("0.0.1-test.1", BumpAxis::Major, None), "1.0.0");
        assert_eq!(bumped("0.1.0-test.1", BumpAxis::Minor, None), "0.2.0");
    }

    #[test]
    fn test_bump_drops_build_metadata() {
        assert_eq!(bumped("1.2.3+build.5", BumpAxis::Patch, None), "1.2.4");
        assert_eq!(bumped("1.2.3-dev.1+build.5", BumpAxis::Pre, Some("dev")), "1.2.3-dev.2");
    }

    #[test]
    fn test_bump_final() {
        assert_eq!(bumped("0.1.1-dev.2", BumpAxis::Final, None), "0.1.1");
        assert_eq!(bumped("1.2.3-dev.4", BumpAxis::Final, None), "1.2.3");
        // already final: unchanged
        assert_eq!(bumped("2.0.0", BumpAxis::Final, None), "2.0.0");
    }

    #[test]
    fn test_bump_pre_starts_from_next_patch() {
        assert_eq!(bumped("0.1.0", BumpAxis::Pre, Some("dev")), "0.1.1-dev.1");
        assert_eq!(bumped("4.8.0", BumpAxis::Pre, Some("dev")), "4.8.1-dev.1");
        assert_eq!(bumped("5.1.3", BumpAxis::Pre, Some("dev")), "5.1.4-dev.1");
        assert_eq!(bumped("1.0.0", BumpAxis::Pre, Some("dev")), "1.0.1-dev.1");
        assert_eq!(bumped("1.0.1", BumpAxis::Pre, Some("dev")), "1.0.2-dev.1");
        assert_eq!(bumped("1.2.3", BumpAxis::Pre, Some("bug")), "1.2.4-bug.1");
    }

    #[test]
    fn test_bump_pre_continues_series() {
        assert_eq!(bumped("0.1.1-dev.1", BumpAxis::Pre, Some("dev")), "0.1.1-dev.2");
        assert_eq!(bumped("1.2.3-dev.4", BumpAxis::Pre, Some("dev")), "1.2.3-dev.5");
        assert_eq!(bumped("1.2.3-DEV.4", BumpAxis::Pre, Some("dev")), "1.2.3-DEV.5");
    }

    #[test]
    fn test_bump_pre_prefix_mismatch() {
        let v = parse("0.1.1-dev.1").unwrap();
        let err = bump(&v, BumpAxis::Pre, Some("rc")).unwrap_err();
        assert!(matches!(err, SemverError::PrereleaseMismatch { .. }));
        assert!(err.to_string().contains("mismatch between current prerelease dev and bump rc"));
    }

    #[test]
    fn test_bump_pre_requires_prefix() {
        let v = parse("1.2.3").unwrap();
        assert!(matches!(
            bump(&v, BumpAxis::Pre, None),
            Err(SemverError::InvalidPrefix(_))
        ));
        assert!(matches!(
            bump(&v, BumpAxis::Pre, Some("")),
            Err(SemverError::InvalidPrefix(_))
        ));
    }

    #[test]
    fn test_bump_pre_without_prefix_continues_series() {
        assert_eq!(bumped("2.0.2-dev.1", BumpAxis::Pre, None), "2.0.2-dev.2");
    }

    #[test]
    fn test_bump_pre_when_zero_policy() {
        let pre = |from: &str| {
            bump_with_policy(&parse(from).unwrap(), BumpAxis::Pre, Some("dev"), PatchPolicy::WhenZero)
                .unwrap()
                .to_string()
        };
        assert_eq!(pre("4.8.0"), "4.8.1-dev.1");
        assert_eq!(pre("5.1.3"), "5.1.3-dev.1");
        assert_eq!(pre("5.1.3-dev.1"), "5.1.3-dev.2");
    }

    #[test]
    fn test_bump_overflow() {
        let max = u64::MAX;
        for (text, axis) in [
            (format!("{max}.0.0"), BumpAxis::Major),
            (format!("0.{max}.0"), BumpAxis::Minor),
            (format!("0.0.{max}"), BumpAxis::Patch),
            (format!("0.0.{max}"), BumpAxis::Pre),
        ] {
            let v = parse(&text).unwrap();
            assert!(
                matches!(bump(&v, axis, Some("dev")), Err(SemverError::Overflow { .. })),
                "{text} {axis} should overflow"
            );
        }
    }

    #[test]
    fn test_bump_long_chain() {
        let steps = [
            (BumpAxis::Pre, Some("dev"), "1.0.2-dev.1"),
            (BumpAxis::Pre, Some("dev"), "1.0.2-dev.2"),
            (BumpAxis::Patch, None, "1.0.3"),
            (BumpAxis::Pre, Some("dev"), "1.0.4-dev.1"),
            (BumpAxis::Minor, None, "1.1.0"),
            (BumpAxis::Pre, Some("dev"), "1.1.1-dev.1"),
            (BumpAxis::Major, None, "2.0.0"),
            (BumpAxis::Pre, Some("dev"), "2.0.1-dev.1"),
            (BumpAxis::Final, None, "2.0.1"),
            (BumpAxis::Pre, Some("dev"), "2.0.2-dev.1"),
            (BumpAxis::Pre, None, "2.0.2-dev.2"),
        ];
        let mut v = parse("1.0.1").unwrap();
        for (axis, prefix, expected) in steps {
            v = bump(&v, axis, prefix).unwrap();
            assert_eq!(v.to_string(), expected);
        }
    }

    #[test]
    fn test_bump_chain() {
        let steps = [
            (BumpAxis::Pre, Some("dev"), "1.0.0-dev.2"),
            (BumpAxis::Patch, None, "1.0.1"),
            (BumpAxis::Minor, None, "1.1.0"),
            (BumpAxis::Major, None, "2.0.0"),
            // the zero patch is bumped first, so 2.0.0-tst.1 cannot follow 2.0.0
            (BumpAxis::Pre, Some("tst"), "2.0.1-tst.1"),
            (BumpAxis::Final, None, "2.0.1"),
        ];
        let mut v = parse("1.0.0-dev.1").unwrap();
        for (axis, prefix, expected) in steps {
            v = bump(&v, axis, prefix).unwrap();
            assert_eq!(v.to_string(), expected);
        }
    }
}
