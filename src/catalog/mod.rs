//! Catalog bootstrap and runtime selection
//!
//! [`CatalogRuntime`] is the three-way selector deciding which artifact names
//! back the catalog and the YAML DSL schema; [`bootstrap`] runs the fixed
//! per-build load sequence.

pub mod bootstrap;

pub use bootstrap::{BuildRequest, CatalogBootstrap, ResourceBundle, StepOutcomes};

use crate::maven::MavenCoordinates;

pub const APACHE_CAMEL_ORG: &str = "org.apache.camel";
pub const APACHE_CAMEL_KAMELETS_ORG: &str = "org.apache.camel.kamelets";
pub const APACHE_CAMEL_K_ORG: &str = "org.apache.camel.k";

pub const KAMELETS_PACKAGE: &str = "camel-kamelets";
pub const CAMEL_K_CRDS_PACKAGE: &str = "camel-k-crds";
pub const CAMEL_YAML_DSL_PACKAGE: &str = "camel-yaml-dsl";

/// Well-known schema file shipped by every YAML DSL artifact
pub const CAMEL_YAML_DSL_SCHEMA: &str = "schema/camelYamlDsl.json";

/// Kubernetes OpenAPI document fetched verbatim over the network
pub const KUBERNETES_SCHEMA_URL: &str =
    "https://raw.githubusercontent.com/kubernetes/kubernetes/master/api/openapi-spec/v3/api__v1_openapi.json";

/// CRD documents read from the Camel K CRDs artifact, in output order
pub const CAMEL_K_CRDS: &[&str] = &[
    "crd/bases/camel.apache.org_builds.yaml",
    "crd/bases/camel.apache.org_camelcatalogs.yaml",
    "crd/bases/camel.apache.org_integrationkits.yaml",
    "crd/bases/camel.apache.org_integrationplatforms.yaml",
    "crd/bases/camel.apache.org_integrationprofiles.yaml",
    "crd/bases/camel.apache.org_integrations.yaml",
    "crd/bases/camel.apache.org_kamelets.yaml",
    "crd/bases/camel.apache.org_pipes.yaml",
];

pub const KAMELETS_FOLDER: &str = "kamelets";
pub const KAMELET_BOUNDARIES_FOLDER: &str = "kamelet-boundaries";
pub const LOCAL_SCHEMAS_FOLDER: &str = "schemas";
pub const KAOTO_PATTERNS_FOLDER: &str = "kaoto-patterns";

pub const KAMELET_SUFFIX: &str = ".kamelet.yaml";
pub const JSON_SUFFIX: &str = ".json";

/// Runtime provider overlay backing the catalog and YAML DSL artifacts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum CatalogRuntime {
    #[default]
    Main,
    Quarkus,
    SpringBoot,
}

impl CatalogRuntime {
    /// Coordinate of the catalog artifact for this runtime.
    pub fn catalog_coordinates(self, version: &str) -> MavenCoordinates {
        match self {
            Self::Main => MavenCoordinates::new(APACHE_CAMEL_ORG, "camel-catalog", version),
            Self::Quarkus => MavenCoordinates::new(
                format!("{APACHE_CAMEL_ORG}.quarkus"),
                "camel-quarkus-catalog",
                version,
            ),
            Self::SpringBoot => MavenCoordinates::new(
                format!("{APACHE_CAMEL_ORG}.springboot"),
                "camel-catalog-provider-springboot",
                version,
            ),
        }
    }

    /// Coordinate of the YAML DSL artifact for this runtime.
    pub fn yaml_dsl_coordinates(self, version: &str) -> MavenCoordinates {
        match self {
            Self::Main => MavenCoordinates::new(APACHE_CAMEL_ORG, CAMEL_YAML_DSL_PACKAGE, version),
            Self::Quarkus => MavenCoordinates::new(
                format!("{APACHE_CAMEL_ORG}.quarkus"),
                "camel-quarkus-yaml-dsl",
                version,
            ),
            Self::SpringBoot => MavenCoordinates::new(
                format!("{APACHE_CAMEL_ORG}.springboot"),
                "camel-yaml-dsl-starter",
                version,
            ),
        }
    }
}
