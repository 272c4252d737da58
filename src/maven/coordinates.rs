//! Maven coordinates
//!
//! The (group, artifact, version) triple identifying a fetchable artifact.
//! Identity is the full triple; coordinates are immutable once constructed.

use std::fmt;

/// Identifier of a single Maven artifact
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MavenCoordinates {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl MavenCoordinates {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
        }
    }

    /// Dependency query string: `group:artifact:version`.
    pub fn gav(&self) -> String {
        format!("{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }

    /// Directory of this artifact relative to a repository root.
    pub fn repository_dir(&self) -> String {
        format!(
            "{}/{}/{}",
            self.group_id.replace('.', "/"),
            self.artifact_id,
            self.version
        )
    }

    /// Conventional file name for the given extension, e.g. `camel-catalog-4.8.0.jar`.
    pub fn file_name(&self, extension: &str) -> String {
        format!("{}-{}.{}", self.artifact_id, self.version, extension)
    }

    /// Whether the version targets the snapshot (pre-release) channel.
    pub fn is_snapshot(&self) -> bool {
        self.version.ends_with("SNAPSHOT")
    }
}

impl fmt::Display for MavenCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.gav())
    }
}
