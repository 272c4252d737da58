//! catalogen - Camel catalog build pipeline
//!
//! Compiles metadata describing Apache Camel components into static schema
//! artifacts. The heart of the crate is versioned artifact resolution and
//! resource extraction: fetching Maven artifacts with their transitive
//! closure, appending them to a growable classpath mid-process, and reading
//! named resources back with version-aware collision handling.
//!
//! Module map:
//! - [`classpath`]: append-only set of searchable archive/directory locations
//! - [`maven`]: coordinates, repositories, downloader and the per-build
//!   resolution session
//! - [`resource`]: folder scanning across classpath locations
//! - [`catalog`]: the bootstrap sequence producing a [`catalog::ResourceBundle`]
//! - [`http`]: injectable blocking transport
//! - [`output`]: persists a bundle for the schema transformation layer
//! - [`cli`], [`error`]: binary surface and diagnostics

pub mod catalog;
pub mod classpath;
pub mod cli;
pub mod error;
pub mod http;
pub mod maven;
pub mod output;
pub mod resource;
