use crate::domain::version::{parse, SemanticVersion};

/// Prefix of version tags
pub const TAG_PREFIX: char = 'v';

/// Glob matching version tags
pub const TAG_GLOB: &str = "v*";

/// Tag name for a version (e.g. "1.2.3" -> "v1.2.3")
pub fn tag_name(version: &str) -> String {
    format!("{}{}", TAG_PREFIX, version)
}

/// Version carried by a tag name, if it is a version tag
///
/// "v1.2.3-dev.1" -> Some(1.2.3-dev.1); "release-1.2.3" and "v1.2" -> None
pub fn version_from_tag(tag: &str) -> Option<SemanticVersion> {
    tag.strip_prefix(TAG_PREFIX).and_then(|rest| parse(rest).ok())
}
