//! CLI definitions using clap derive API

use clap::Parser;
use std::path::PathBuf;

use crate::catalog::CatalogRuntime;

/// catalogen - Camel catalog build pipeline
///
/// Resolves versioned Camel artifacts, extracts their schema resources and
/// writes the resulting bundle for downstream catalog tooling.
#[derive(Parser, Debug)]
#[command(
    name = "catalogen",
    author,
    version,
    about = "Compile Apache Camel catalog metadata into static schema artifacts",
    long_about = "Catalogen resolves a Camel catalog, its runtime provider overlay and the \
                  related schema artifacts from Maven repositories, extracts their textual \
                  resources and persists the bundle for the schema transformation layer."
)]
pub struct Cli {
    /// Runtime provider overlay backing the catalog
    #[arg(long, short = 'r', value_enum, default_value_t = CatalogRuntime::Main)]
    pub runtime: CatalogRuntime,

    /// Camel catalog version to resolve (omit to use what is already loaded)
    #[arg(long, short = 'c')]
    pub catalog_version: Option<String>,

    /// Kamelets catalog version to resolve
    #[arg(long, short = 'k')]
    pub kamelets_version: Option<String>,

    /// Camel K CRDs version to resolve
    #[arg(long)]
    pub crds_version: Option<String>,

    /// Local resource roots scanned for schemas, patterns and boundaries
    #[arg(long = "resources", value_name = "DIR")]
    pub resource_roots: Vec<PathBuf>,

    /// Output directory
    #[arg(long, short = 'o', default_value = "dist", env = "CATALOGEN_OUTPUT")]
    pub output: PathBuf,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}
