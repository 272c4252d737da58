//! Error types and handling for catalogen
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Resolution and bootstrap steps fail soft: they convert these errors into a
//! boolean outcome plus a log line and let the build continue. The variants
//! below exist so the adapters that do surface errors (output writing, the
//! binary itself) produce actionable diagnostics.

use miette::Diagnostic;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Main error type for catalogen operations
#[derive(Error, Diagnostic, Debug)]
pub enum CatalogError {
    // Artifact resolution errors
    #[error("Failed to resolve artifact '{gav}': {reason}")]
    #[diagnostic(
        code(catalogen::maven::resolution_failed),
        help("Check that the coordinate exists in one of the configured repositories")
    )]
    ResolutionFailed { gav: String, reason: String },

    // Classpath errors
    #[error("Resource not found on the classpath: {name}")]
    #[diagnostic(code(catalogen::classpath::resource_not_found))]
    ResourceNotFound { name: String },

    #[error("Failed to read archive '{path}': {reason}")]
    #[diagnostic(
        code(catalogen::classpath::archive_failed),
        help("The file may not be a valid jar/zip archive")
    )]
    ArchiveFailed { path: String, reason: String },

    // Resource content errors
    #[error("Malformed resource '{name}': {reason}")]
    #[diagnostic(code(catalogen::resource::malformed))]
    MalformedResource { name: String, reason: String },

    // Network errors
    #[error("Request failed for {url}: {reason}")]
    #[diagnostic(
        code(catalogen::http::network_failed),
        help("Check connectivity and proxy settings; requests are single-shot with no retry")
    )]
    NetworkFailed { url: String, reason: String },

    // Cache errors
    #[error("Cache operation failed: {message}")]
    #[diagnostic(code(catalogen::cache::operation_failed))]
    CacheFailed { message: String },

    // Output errors
    #[error("Failed to write output file '{path}'")]
    #[diagnostic(code(catalogen::output::write_failed))]
    OutputWriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(code(catalogen::io))]
    Io(#[from] std::io::Error),
}

/// Create a `ResolutionFailed` error
pub fn resolution_failed(gav: impl Into<String>, reason: impl Into<String>) -> CatalogError {
    CatalogError::ResolutionFailed {
        gav: gav.into(),
        reason: reason.into(),
    }
}

/// Create a `ResourceNotFound` error
pub fn resource_not_found(name: impl Into<String>) -> CatalogError {
    CatalogError::ResourceNotFound { name: name.into() }
}

/// Create an `ArchiveFailed` error
pub fn archive_failed(path: impl Into<String>, reason: impl Into<String>) -> CatalogError {
    CatalogError::ArchiveFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Create a `MalformedResource` error
pub fn malformed_resource(name: impl Into<String>, reason: impl Into<String>) -> CatalogError {
    CatalogError::MalformedResource {
        name: name.into(),
        reason: reason.into(),
    }
}

/// Create a `NetworkFailed` error
pub fn network_failed(url: impl Into<String>, reason: impl Into<String>) -> CatalogError {
    CatalogError::NetworkFailed {
        url: url.into(),
        reason: reason.into(),
    }
}

/// Create a `CacheFailed` error
pub fn cache_failed(message: impl Into<String>) -> CatalogError {
    CatalogError::CacheFailed {
        message: message.into(),
    }
}
