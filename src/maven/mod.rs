//! Maven artifact resolution
//!
//! This module covers everything between a coordinate and a populated
//! classpath:
//! - [`coordinates`]: the (group, artifact, version) triple and its
//!   repository-layout paths
//! - [`repository`]: the insertion-ordered repository registry
//! - [`pom`]: the POM/metadata subset the resolver reads
//! - [`cache`]: the on-disk artifact cache
//! - [`downloader`]: transitive resolution against the registered repositories
//! - [`session`]: the invocation-scoped resolution session (classpath,
//!   version markers, version-aware resource access)

pub mod cache;
pub mod coordinates;
pub mod downloader;
pub mod pom;
pub mod repository;
pub mod session;

pub use coordinates::MavenCoordinates;
pub use downloader::MavenDownloader;
pub use repository::RepositoryRegistry;
pub use session::ResolutionSession;
