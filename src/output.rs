//! Output persistence
//!
//! Thin adapter writing a [`ResourceBundle`] to an output directory for the
//! schema transformation layer. Layout:
//!
//! ```text
//! <out>/
//! ├── manifest.json
//! ├── camelYamlDsl.json
//! ├── kubernetes-schema.json
//! ├── crds/crd-00.yaml ...
//! ├── kamelets/<key>.kamelet.yaml ...
//! ├── kamelet-boundaries/<key>.kamelet.yaml ...
//! ├── schemas/<key>.json ...
//! └── kaoto-patterns/<key>.json ...
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use crate::catalog::{
    JSON_SUFFIX, KAMELET_BOUNDARIES_FOLDER, KAMELET_SUFFIX, KAMELETS_FOLDER, KAOTO_PATTERNS_FOLDER,
    LOCAL_SCHEMAS_FOLDER, ResourceBundle, StepOutcomes,
};
use crate::error::{CatalogError, Result};

/// Top-level description of what one build produced
#[derive(Debug, Serialize)]
struct Manifest<'a> {
    outcomes: &'a StepOutcomes,
    counts: Counts,
}

#[derive(Debug, Serialize)]
struct Counts {
    crds: usize,
    kamelets: usize,
    kamelet_boundaries: usize,
    local_schemas: usize,
    kaoto_patterns: usize,
}

/// Write the bundle and a manifest under `out_dir`, creating it as needed.
pub fn write_bundle(out_dir: &Path, bundle: &ResourceBundle, outcomes: &StepOutcomes) -> Result<()> {
    std::fs::create_dir_all(out_dir)?;

    if let Some(schema) = &bundle.yaml_dsl_schema {
        write_file(&out_dir.join("camelYamlDsl.json"), schema)?;
    }
    if let Some(schema) = &bundle.kubernetes_schema {
        write_file(&out_dir.join("kubernetes-schema.json"), schema)?;
    }

    if !bundle.crds.is_empty() {
        let crds_dir = out_dir.join("crds");
        std::fs::create_dir_all(&crds_dir)?;
        for (index, crd) in bundle.crds.iter().enumerate() {
            write_file(&crds_dir.join(format!("crd-{index:02}.yaml")), crd)?;
        }
    }

    write_map(out_dir, KAMELETS_FOLDER, KAMELET_SUFFIX, &bundle.kamelets)?;
    write_map(
        out_dir,
        KAMELET_BOUNDARIES_FOLDER,
        KAMELET_SUFFIX,
        &bundle.kamelet_boundaries,
    )?;
    write_map(out_dir, LOCAL_SCHEMAS_FOLDER, JSON_SUFFIX, &bundle.local_schemas)?;
    write_map(out_dir, KAOTO_PATTERNS_FOLDER, JSON_SUFFIX, &bundle.kaoto_patterns)?;

    let manifest = Manifest {
        outcomes,
        counts: Counts {
            crds: bundle.crds.len(),
            kamelets: bundle.kamelets.len(),
            kamelet_boundaries: bundle.kamelet_boundaries.len(),
            local_schemas: bundle.local_schemas.len(),
            kaoto_patterns: bundle.kaoto_patterns.len(),
        },
    };
    let manifest_json = serde_json::to_string_pretty(&manifest)
        .map_err(|e| crate::error::cache_failed(format!("manifest serialization: {e}")))?;
    write_file(&out_dir.join("manifest.json"), &manifest_json)?;

    Ok(())
}

/// Write one folder map; keys may carry nested paths from archive scans.
fn write_map(
    out_dir: &Path,
    folder: &str,
    suffix: &str,
    resources: &BTreeMap<String, String>,
) -> Result<()> {
    if resources.is_empty() {
        return Ok(());
    }

    let dir = out_dir.join(folder);
    for (key, content) in resources {
        let path = dir.join(format!("{key}{suffix}"));
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        write_file(&path, content)?;
    }

    Ok(())
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|source| CatalogError::OutputWriteFailed {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bundle() -> ResourceBundle {
        let mut bundle = ResourceBundle {
            yaml_dsl_schema: Some("{\"$schema\": \"dsl\"}".to_string()),
            kubernetes_schema: Some("{\"openapi\": \"3.0.0\"}".to_string()),
            crds: vec!["kind: CustomResourceDefinition".to_string()],
            ..ResourceBundle::default()
        };
        bundle
            .kamelets
            .insert("nested/bar".to_string(), "spec: bar".to_string());
        bundle
            .kaoto_patterns
            .insert("kaoto-datamapper".to_string(), "{}".to_string());
        bundle
    }

    #[test]
    fn writes_all_populated_sections_plus_manifest() {
        let temp = tempfile::TempDir::new().expect("tempdir");
        let out = temp.path().join("dist");

        let bundle = sample_bundle();
        let outcomes = StepOutcomes {
            yaml_dsl_schema: true,
            kubernetes_schema: true,
            crds: true,
            kamelets: true,
            kaoto_patterns: true,
            ..StepOutcomes::default()
        };

        write_bundle(&out, &bundle, &outcomes).expect("write");

        assert!(out.join("camelYamlDsl.json").is_file());
        assert!(out.join("kubernetes-schema.json").is_file());
        assert!(out.join("crds/crd-00.yaml").is_file());
        // Nested archive keys become nested output paths.
        assert!(out.join("kamelets/nested/bar.kamelet.yaml").is_file());
        assert!(out.join("kaoto-patterns/kaoto-datamapper.json").is_file());

        let manifest: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out.join("manifest.json")).expect("read"))
                .expect("parse");
        assert_eq!(manifest["counts"]["kamelets"], 1);
        assert_eq!(manifest["outcomes"]["kubernetes_schema"], true);
    }

    #[test]
    fn empty_bundle_still_produces_a_manifest() {
        let temp = tempfile::TempDir::new().expect("tempdir");
        let out = temp.path().join("dist");

        write_bundle(&out, &ResourceBundle::default(), &StepOutcomes::default()).expect("write");

        assert!(out.join("manifest.json").is_file());
        assert!(!out.join("camelYamlDsl.json").exists());
        assert!(!out.join("crds").exists());
    }
}
