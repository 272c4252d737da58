//! Catalog bootstrap
//!
//! Runs the fixed per-build load sequence: resolve the catalog artifact,
//! resolve the YAML DSL schema, fetch the Kubernetes OpenAPI document, then
//! the artifact-backed and local folder scans. Every step is independently
//! fallible and independently logged; no failure aborts a later step. The
//! caller decides whether a partially populated bundle is acceptable.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{error, warn};

use crate::catalog::{
    APACHE_CAMEL_K_ORG, APACHE_CAMEL_KAMELETS_ORG, CAMEL_K_CRDS, CAMEL_K_CRDS_PACKAGE,
    CAMEL_YAML_DSL_SCHEMA, CatalogRuntime, JSON_SUFFIX, KAMELET_BOUNDARIES_FOLDER, KAMELET_SUFFIX,
    KAMELETS_FOLDER, KAMELETS_PACKAGE, KAOTO_PATTERNS_FOLDER, KUBERNETES_SCHEMA_URL,
    LOCAL_SCHEMAS_FOLDER,
};
use crate::http::HttpFetcher;
use crate::maven::{MavenCoordinates, ResolutionSession};
use crate::resource::scan_folder;

/// Versions requested for one build invocation.
///
/// A `None` version means "use whatever is already on the classpath".
#[derive(Debug, Clone, Default)]
pub struct BuildRequest {
    pub catalog_version: Option<String>,
    pub kamelets_version: Option<String>,
    pub crds_version: Option<String>,
}

/// Per-step boolean outcomes, recorded but never acted on here
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct StepOutcomes {
    pub catalog: bool,
    pub yaml_dsl_schema: bool,
    pub kubernetes_schema: bool,
    pub crds: bool,
    pub kamelets: bool,
    pub kamelet_boundaries: bool,
    pub local_schemas: bool,
    pub kaoto_patterns: bool,
}

/// Aggregate output of one bootstrap invocation, read-only downstream
#[derive(Debug, Default)]
pub struct ResourceBundle {
    pub yaml_dsl_schema: Option<String>,
    pub kubernetes_schema: Option<String>,
    pub crds: Vec<String>,
    pub kamelets: BTreeMap<String, String>,
    pub kamelet_boundaries: BTreeMap<String, String>,
    pub local_schemas: BTreeMap<String, String>,
    pub kaoto_patterns: BTreeMap<String, String>,
}

/// Orchestrates one build invocation over an owned resolution session
pub struct CatalogBootstrap<'a> {
    session: ResolutionSession<'a>,
    fetcher: &'a dyn HttpFetcher,
    runtime: CatalogRuntime,
    bundle: ResourceBundle,
}

impl<'a> CatalogBootstrap<'a> {
    pub fn new(runtime: CatalogRuntime, fetcher: &'a dyn HttpFetcher, verbose: bool) -> Self {
        Self {
            session: ResolutionSession::new(fetcher, verbose),
            fetcher,
            runtime,
            bundle: ResourceBundle::default(),
        }
    }

    /// Replace the session (tests: cache roots, pre-seeded classpaths).
    pub fn with_session(mut self, session: ResolutionSession<'a>) -> Self {
        self.session = session;
        self
    }

    pub fn runtime(&self) -> CatalogRuntime {
        self.runtime
    }

    pub fn session(&self) -> &ResolutionSession<'a> {
        &self.session
    }

    /// Register a local resource root (loose `schemas/`, `kaoto-patterns/`,
    /// `kamelet-boundaries/` trees) on the classpath.
    pub fn add_local_root(&mut self, path: impl Into<std::path::PathBuf>) {
        self.session.add_classpath_location(path);
    }

    /// Run the whole fixed sequence and record per-step outcomes.
    pub fn run(&mut self, request: &BuildRequest) -> StepOutcomes {
        StepOutcomes {
            catalog: self.load_camel_catalog(request.catalog_version.as_deref()),
            yaml_dsl_schema: self.load_camel_yaml_dsl(request.catalog_version.as_deref()),
            kubernetes_schema: self.load_kubernetes_schema(),
            crds: self.load_camel_k_crds(request.crds_version.as_deref()),
            kamelets: self.load_kamelets(request.kamelets_version.as_deref()),
            kamelet_boundaries: self.load_kamelet_boundaries(),
            local_schemas: self.load_local_schemas(),
            kaoto_patterns: self.load_kaoto_patterns(),
        }
    }

    /// Consume the bootstrap, yielding the bundle for the transformation layer.
    pub fn into_bundle(self) -> ResourceBundle {
        self.bundle
    }

    /// Step 1: configure repositories and resolve the runtime-selected
    /// catalog artifact.
    pub fn load_camel_catalog(&mut self, version: Option<&str>) -> bool {
        if let Some(version) = version {
            self.session.configure_repositories(version);
            let coords = self.runtime.catalog_coordinates(version);
            self.session.load_version(&coords);
        }

        self.session.catalog_version().is_some()
    }

    /// Step 2: resolve the runtime-selected YAML DSL artifact and read the
    /// well-known schema file from the expanded classpath.
    ///
    /// The resolution outcome is deliberately ignored: some providers only
    /// declare the schema artifact transitively, so the lookup is what counts.
    pub fn load_camel_yaml_dsl(&mut self, version: Option<&str>) -> bool {
        if let Some(version) = version {
            let coords = self.runtime.yaml_dsl_coordinates(version);
            self.session.load_version(&coords);
        }

        match self.session.resource_as_string(CAMEL_YAML_DSL_SCHEMA) {
            Some(schema) => {
                self.bundle.yaml_dsl_schema = Some(schema);
                true
            }
            None => {
                error!("No {CAMEL_YAML_DSL_SCHEMA} file found in the classpath");
                false
            }
        }
    }

    /// Step 3: single fetch of the Kubernetes OpenAPI document. No retry.
    pub fn load_kubernetes_schema(&mut self) -> bool {
        match self.fetcher.fetch_text(KUBERNETES_SCHEMA_URL) {
            Ok(schema) => {
                self.bundle.kubernetes_schema = Some(schema);
                true
            }
            Err(e) => {
                error!(error = %e, "could not fetch the Kubernetes schema");
                false
            }
        }
    }

    /// Step 4: resolve the Camel K CRDs artifact and read the fixed CRD list.
    ///
    /// A missing CRD fails the step; a CRD that is not valid YAML is skipped.
    pub fn load_camel_k_crds(&mut self, version: Option<&str>) -> bool {
        let resolved = match version {
            Some(version) => {
                let coords =
                    MavenCoordinates::new(APACHE_CAMEL_K_ORG, CAMEL_K_CRDS_PACKAGE, version);
                self.session.load_version(&coords)
            }
            None => false,
        };

        for crd in CAMEL_K_CRDS {
            let Some(content) = self.session.resource_as_string(crd) else {
                error!(resource = %crd, "CRD not found in the classpath");
                return false;
            };

            if let Err(e) = serde_yaml::from_str::<serde_yaml::Value>(&content) {
                warn!(resource = %crd, error = %e, "skipping malformed CRD");
                continue;
            }

            self.bundle.crds.push(content);
        }

        resolved
    }

    /// Step 5: resolve the kamelets artifact when a version is supplied, then
    /// scan the kamelets folder.
    pub fn load_kamelets(&mut self, version: Option<&str>) -> bool {
        if let Some(version) = version {
            let coords =
                MavenCoordinates::new(APACHE_CAMEL_KAMELETS_ORG, KAMELETS_PACKAGE, version);
            self.session.load_version(&coords);
        }

        let scan = scan_folder(self.session.classpath(), KAMELETS_FOLDER, KAMELET_SUFFIX);
        self.bundle.kamelets = scan.resources;
        !self.bundle.kamelets.is_empty()
    }

    /// Step 6: scan kamelet boundaries; purely local, no resolution.
    pub fn load_kamelet_boundaries(&mut self) -> bool {
        let scan = scan_folder(
            self.session.classpath(),
            KAMELET_BOUNDARIES_FOLDER,
            KAMELET_SUFFIX,
        );
        self.bundle.kamelet_boundaries = scan.resources;
        !self.bundle.kamelet_boundaries.is_empty()
    }

    /// Step 7: scan local JSON schemas.
    pub fn load_local_schemas(&mut self) -> bool {
        let scan = scan_folder(self.session.classpath(), LOCAL_SCHEMAS_FOLDER, JSON_SUFFIX);
        self.bundle.local_schemas = retain_valid_json(scan.resources);
        !self.bundle.local_schemas.is_empty()
    }

    /// Step 8: scan the UI pattern documents.
    pub fn load_kaoto_patterns(&mut self) -> bool {
        let scan = scan_folder(self.session.classpath(), KAOTO_PATTERNS_FOLDER, JSON_SUFFIX);
        self.bundle.kaoto_patterns = retain_valid_json(scan.resources);
        !self.bundle.kaoto_patterns.is_empty()
    }
}

/// Drop entries that are not valid JSON, logging each as malformed.
fn retain_valid_json(mut resources: BTreeMap<String, String>) -> BTreeMap<String, String> {
    resources.retain(|name, content| match serde_json::from_str::<serde_json::Value>(content) {
        Ok(_) => true,
        Err(e) => {
            warn!(resource = %name, error = %e, "skipping malformed JSON resource");
            false
        }
    });
    resources
}
