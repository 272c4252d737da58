//! Maven repository downloader
//!
//! Fetches an artifact and its transitive dependency closure from the
//! registered repositories, caching every file locally in Maven repository
//! layout. The downloader never touches shared state: it returns the resolved
//! local jar paths and leaves classpath mutation to the caller, so a failed
//! resolution changes nothing.
//!
//! The closure is always transitive. Some runtime providers only declare
//! their schema dependency transitively, so fetching just the named artifact
//! would leave the YAML DSL schema unreachable.

use std::collections::HashSet;
use std::path::PathBuf;

use tracing::debug;

use crate::error::{Result, resolution_failed};
use crate::http::HttpFetcher;
use crate::maven::{MavenCoordinates, pom};

/// Resolves artifacts against an ordered list of repository base URLs
pub struct MavenDownloader<'a> {
    fetcher: &'a dyn HttpFetcher,
    repositories: Vec<String>,
    use_snapshots: bool,
    cache_root: PathBuf,
}

impl<'a> MavenDownloader<'a> {
    pub fn new(
        fetcher: &'a dyn HttpFetcher,
        repositories: Vec<String>,
        use_snapshots: bool,
        cache_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            fetcher,
            repositories,
            use_snapshots,
            cache_root: cache_root.into(),
        }
    }

    /// Resolve `coords` plus its transitive closure and return the local jar
    /// paths, root first.
    ///
    /// The root artifact must resolve; transitive dependencies fail soft (a
    /// missing jar or unreadable POM prunes that subtree with a debug log).
    pub fn resolve_transitive(&self, coords: &MavenCoordinates) -> Result<Vec<PathBuf>> {
        let mut visited = HashSet::new();
        let mut files = Vec::new();
        self.resolve_into(coords, true, &mut visited, &mut files)?;
        Ok(files)
    }

    fn resolve_into(
        &self,
        coords: &MavenCoordinates,
        required: bool,
        visited: &mut HashSet<(String, String)>,
        files: &mut Vec<PathBuf>,
    ) -> Result<()> {
        // First version encountered wins; no conflict mediation.
        let key = (coords.group_id.clone(), coords.artifact_id.clone());
        if !visited.insert(key) {
            return Ok(());
        }

        if !required && coords.is_snapshot() && !self.use_snapshots {
            debug!(gav = %coords.gav(), "snapshot channel disabled, skipping");
            return Ok(());
        }

        let pom_path = match self.fetch_artifact(coords, "pom") {
            Ok(path) => Some(path),
            Err(e) if required => return Err(e),
            Err(e) => {
                debug!(gav = %coords.gav(), error = %e, "no POM, pruning subtree");
                None
            }
        };

        match self.fetch_artifact(coords, "jar") {
            Ok(path) => files.push(path),
            Err(e) if required => return Err(e),
            // Tolerated: pom-packaged dependencies ship no jar.
            Err(e) => debug!(gav = %coords.gav(), error = %e, "no jar for dependency"),
        }

        let Some(pom_path) = pom_path else {
            return Ok(());
        };

        let pom_xml = std::fs::read_to_string(&pom_path)?;
        let project = match pom::parse_project(&pom_xml) {
            Ok(project) => project,
            Err(e) if required => return Err(e),
            Err(e) => {
                debug!(gav = %coords.gav(), error = %e, "unreadable POM, pruning subtree");
                return Ok(());
            }
        };

        for dependency in pom::runtime_dependencies(&project) {
            self.resolve_into(&dependency, false, visited, files)?;
        }

        Ok(())
    }

    /// Fetch one file of the artifact (`pom` or `jar`), trying each
    /// repository in registration order. Cache hits skip the network.
    fn fetch_artifact(&self, coords: &MavenCoordinates, extension: &str) -> Result<PathBuf> {
        let cache_dir = self.cache_root.join(coords.repository_dir());
        let cache_path = cache_dir.join(coords.file_name(extension));
        if cache_path.is_file() {
            debug!(path = %cache_path.display(), "artifact cache hit");
            return Ok(cache_path);
        }

        let mut last_reason = "no repositories configured".to_string();
        for repository in &self.repositories {
            let base = repository.trim_end_matches('/');
            let file_name = self.remote_file_name(coords, extension, base);
            let url = format!("{}/{}/{}", base, coords.repository_dir(), file_name);

            match self.fetcher.fetch(&url) {
                Ok(bytes) => {
                    std::fs::create_dir_all(&cache_dir)?;
                    std::fs::write(&cache_path, bytes)?;
                    return Ok(cache_path);
                }
                Err(e) => last_reason = e.to_string(),
            }
        }

        Err(resolution_failed(coords.gav(), last_reason))
    }

    /// Remote file name, resolving the timestamped snapshot name from
    /// `maven-metadata.xml` when the snapshot channel is active. Falls back
    /// to the literal `-SNAPSHOT` name when no metadata is published.
    fn remote_file_name(&self, coords: &MavenCoordinates, extension: &str, base: &str) -> String {
        if coords.is_snapshot() && self.use_snapshots {
            let metadata_url = format!("{}/{}/maven-metadata.xml", base, coords.repository_dir());
            if let Ok(metadata_xml) = self.fetcher.fetch_text(&metadata_url) {
                if let Some(name) = pom::snapshot_file_name(coords, extension, &metadata_xml) {
                    return name;
                }
            }
        }

        coords.file_name(extension)
    }

    #[cfg(test)]
    pub(crate) fn cache_root(&self) -> &std::path::Path {
        &self.cache_root
    }
}
