//! Resolution session
//!
//! One session is owned by one build invocation. It holds the growable
//! classpath, the repository registry and the two version markers, so
//! concurrent builds in one process cannot cross-contaminate each other's
//! resolution state. Nothing here is a process-wide singleton.
//!
//! The two markers drive version-aware resource lookup: resolving an artifact
//! whose name contains `catalog` records the catalog version, anything else
//! records the runtime-provider version. When a resource name exists in more
//! than one loaded artifact (a generic catalog and a runtime-specific provider
//! both ship the same document), the provider's copy must win without knowing
//! where it sits in the merged classpath.

use std::path::PathBuf;

use tracing::warn;

use crate::classpath::Classpath;
use crate::error::Result;
use crate::http::HttpFetcher;
use crate::maven::{MavenCoordinates, MavenDownloader, RepositoryRegistry, cache};

/// Invocation-scoped resolution state
pub struct ResolutionSession<'a> {
    fetcher: &'a dyn HttpFetcher,
    classpath: Classpath,
    repositories: RepositoryRegistry,
    catalog_version: Option<String>,
    runtime_provider_version: Option<String>,
    cache_root: Option<PathBuf>,
    verbose: bool,
}

impl<'a> ResolutionSession<'a> {
    pub fn new(fetcher: &'a dyn HttpFetcher, verbose: bool) -> Self {
        Self {
            fetcher,
            classpath: Classpath::new(),
            repositories: RepositoryRegistry::new(),
            catalog_version: None,
            runtime_provider_version: None,
            cache_root: None,
            verbose,
        }
    }

    /// Override the artifact cache root (tests; defaults to the user cache dir).
    pub fn with_cache_root(mut self, cache_root: impl Into<PathBuf>) -> Self {
        self.cache_root = Some(cache_root.into());
        self
    }

    pub fn classpath(&self) -> &Classpath {
        &self.classpath
    }

    /// Append a location directly, e.g. a local resource root.
    pub fn add_classpath_location(&mut self, path: impl Into<PathBuf>) {
        self.classpath.add_location(path);
    }

    pub fn repositories(&self) -> &RepositoryRegistry {
        &self.repositories
    }

    /// Ensure the repositories appropriate for `version` are registered.
    pub fn configure_repositories(&mut self, version: &str) {
        self.repositories.configure(version);
    }

    /// Version of the last successfully resolved catalog artifact.
    pub fn catalog_version(&self) -> Option<&str> {
        self.catalog_version.as_deref()
    }

    /// Version of the last successfully resolved runtime-provider artifact.
    pub fn runtime_provider_version(&self) -> Option<&str> {
        self.runtime_provider_version.as_deref()
    }

    /// Resolve `coords` and its transitive closure onto the classpath.
    ///
    /// On success every resolved file is appended and the matching version
    /// marker is updated. On failure nothing is mutated; the diagnostic is
    /// logged at warn level only when the session is verbose.
    pub fn load_version(&mut self, coords: &MavenCoordinates) -> bool {
        match self.try_load(coords) {
            Ok(()) => true,
            Err(e) => {
                if self.verbose {
                    warn!(gav = %coords.gav(), error = %e, "cannot load version");
                }
                false
            }
        }
    }

    fn try_load(&mut self, coords: &MavenCoordinates) -> Result<()> {
        // First use of the resolver guarantees the default repository.
        self.repositories.configure(&coords.version);

        let cache_root = match &self.cache_root {
            Some(root) => root.clone(),
            None => cache::artifacts_dir()?,
        };

        let downloader = MavenDownloader::new(
            self.fetcher,
            self.repositories.urls().map(String::from).collect(),
            coords.is_snapshot(),
            cache_root,
        );

        let files = downloader.resolve_transitive(coords)?;
        for file in files {
            self.classpath.add_location(file);
        }

        if coords.artifact_id.contains("catalog") {
            self.catalog_version = Some(coords.version.clone());
        } else {
            self.runtime_provider_version = Some(coords.version.clone());
        }

        Ok(())
    }

    /// Version-aware resource lookup.
    ///
    /// Search order: locations whose path carries the runtime-provider
    /// version, then locations carrying the catalog version, then the first
    /// registered match with no filter. Absence is `None`, never an error.
    pub fn resource_as_bytes(&self, name: &str) -> Option<Vec<u8>> {
        if let Some(version) = &self.runtime_provider_version {
            if let Some(bytes) = self.versioned_lookup(name, version) {
                return Some(bytes);
            }
        }

        if let Some(version) = &self.catalog_version {
            if let Some(bytes) = self.versioned_lookup(name, version) {
                return Some(bytes);
            }
        }

        self.classpath.read_first(name)
    }

    /// Version-aware lookup decoded as UTF-8 text.
    pub fn resource_as_string(&self, name: &str) -> Option<String> {
        let bytes = self.resource_as_bytes(name)?;
        match String::from_utf8(bytes) {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(resource = %name, error = %e, "resource is not valid UTF-8");
                None
            }
        }
    }

    fn versioned_lookup(&self, name: &str, version: &str) -> Option<Vec<u8>> {
        for location in self.classpath.find_resource(name) {
            if location.path().to_string_lossy().contains(version) {
                if let Ok(bytes) = location.read(name) {
                    return Some(bytes);
                }
            }
        }
        None
    }
}
