//! Local artifact cache
//!
//! Resolved artifacts are cached on local disk in Maven repository layout:
//!
//! ```text
//! ~/.cache/catalogen/
//! └── artifacts/
//!     └── org/apache/camel/camel-catalog/4.8.0/
//!         ├── camel-catalog-4.8.0.pom
//!         └── camel-catalog-4.8.0.jar
//! ```
//!
//! Cached files persist across build invocations; a cache hit skips the
//! download entirely.

use std::path::PathBuf;

use crate::error::{Result, cache_failed};

/// Cache directory name under the user's cache directory
const CACHE_DIR: &str = "catalogen";

/// Artifacts subdirectory within the cache
const ARTIFACTS_DIR: &str = "artifacts";

/// Get the cache directory path.
///
/// Returns `~/.cache/catalogen` on Unix or the platform equivalent.
/// Can be overridden with the `CATALOGEN_CACHE_DIR` environment variable.
pub fn cache_dir() -> Result<PathBuf> {
    if let Ok(cache_dir) = std::env::var("CATALOGEN_CACHE_DIR") {
        return Ok(PathBuf::from(cache_dir));
    }

    let base = dirs::cache_dir()
        .ok_or_else(|| cache_failed("Could not determine cache directory"))?;

    Ok(base.join(CACHE_DIR))
}

/// Get the artifact cache directory path.
pub fn artifacts_dir() -> Result<PathBuf> {
    Ok(cache_dir()?.join(ARTIFACTS_DIR))
}
