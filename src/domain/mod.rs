//! Domain logic - pure semantic-version rules independent of git operations

pub mod axis;
pub mod bump;
pub mod prerelease;
pub mod tag;
pub mod version;

pub use axis::BumpAxis;
pub use bump::{bump, bump_with_policy};
pub use prerelease::{check_prerelease, PatchPolicy, PrereleasePrefix, PRERELEASE_PATCH_POLICY};
pub use tag::{tag_name, version_from_tag, TAG_GLOB};
pub use version::{parse, SemanticVersion};
