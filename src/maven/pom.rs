//! POM and repository-metadata parsing
//!
//! Deserializes the subset of `pom.xml` and `maven-metadata.xml` the resolver
//! needs: coordinates, parent, properties, and the dependency list. Everything
//! else in a POM is ignored.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::{Result, malformed_resource};
use crate::maven::MavenCoordinates;

/// `<project>` root of a POM
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub packaging: Option<String>,
    pub parent: Option<Parent>,
    pub properties: Option<HashMap<String, String>>,
    pub dependencies: Option<Dependencies>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parent {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Dependencies {
    #[serde(default, rename = "dependency")]
    pub dependency: Vec<Dependency>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
    pub scope: Option<String>,
    pub optional: Option<String>,
    #[serde(rename = "type")]
    pub dep_type: Option<String>,
}

/// `maven-metadata.xml` root
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub versioning: Option<Versioning>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Versioning {
    pub snapshot: Option<Snapshot>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub timestamp: Option<String>,
    pub build_number: Option<u32>,
}

/// Parse a POM document.
pub fn parse_project(pom_xml: &str) -> Result<Project> {
    quick_xml::de::from_str(pom_xml).map_err(|e| malformed_resource("pom.xml", e.to_string()))
}

/// Extract the dependencies of a POM that belong on the runtime classpath.
///
/// Skips test/provided/system/import scopes, optional dependencies and
/// non-jar types. `${property}` references are interpolated against the POM's
/// properties plus the implicit `project.*` keys; a dependency whose version
/// cannot be determined is dropped (Maven would consult dependencyManagement,
/// which this resolver does not model).
pub fn runtime_dependencies(project: &Project) -> Vec<MavenCoordinates> {
    let properties = effective_properties(project);

    let Some(dependencies) = &project.dependencies else {
        return Vec::new();
    };

    let mut coordinates = Vec::new();
    for dependency in &dependencies.dependency {
        if !is_runtime_scope(dependency.scope.as_deref()) {
            continue;
        }
        if dependency.optional.as_deref() == Some("true") {
            continue;
        }
        if !matches!(dependency.dep_type.as_deref(), None | Some("jar")) {
            continue;
        }

        let Some(raw_version) = &dependency.version else {
            tracing::debug!(
                group = %dependency.group_id,
                artifact = %dependency.artifact_id,
                "dependency without explicit version, skipping"
            );
            continue;
        };

        let version = interpolate(raw_version, &properties);
        if version.contains("${") {
            tracing::debug!(
                group = %dependency.group_id,
                artifact = %dependency.artifact_id,
                version = %version,
                "unresolvable version property, skipping"
            );
            continue;
        }

        coordinates.push(MavenCoordinates::new(
            interpolate(&dependency.group_id, &properties),
            dependency.artifact_id.clone(),
            version,
        ));
    }

    coordinates
}

/// Timestamped snapshot file name from repository metadata, e.g.
/// `camel-catalog-4.9.0-20240101.120000-3.jar`.
pub fn snapshot_file_name(
    coords: &MavenCoordinates,
    extension: &str,
    metadata_xml: &str,
) -> Option<String> {
    let metadata: Metadata = quick_xml::de::from_str(metadata_xml).ok()?;
    let snapshot = metadata.versioning?.snapshot?;
    let timestamp = snapshot.timestamp?;
    let build_number = snapshot.build_number?;
    let base = coords.version.strip_suffix("-SNAPSHOT")?;

    Some(format!(
        "{}-{}-{}-{}.{}",
        coords.artifact_id, base, timestamp, build_number, extension
    ))
}

fn is_runtime_scope(scope: Option<&str>) -> bool {
    matches!(scope, None | Some("compile") | Some("runtime"))
}

/// POM properties plus the implicit `project.version` / `project.groupId`
/// keys, with parent values filling the gaps.
fn effective_properties(project: &Project) -> HashMap<String, String> {
    let mut properties = project.properties.clone().unwrap_or_default();

    let version = project
        .version
        .clone()
        .or_else(|| project.parent.as_ref().and_then(|p| p.version.clone()));
    if let Some(version) = version {
        properties.insert("project.version".to_string(), version);
    }

    let group = project
        .group_id
        .clone()
        .or_else(|| project.parent.as_ref().and_then(|p| p.group_id.clone()));
    if let Some(group) = group {
        properties.insert("project.groupId".to_string(), group);
    }

    properties
}

/// Replace `${key}` references with known property values; unknown keys are
/// left in place so callers can detect them.
fn interpolate(value: &str, properties: &HashMap<String, String>) -> String {
    let mut output = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        output.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let key = &after[..end];
                match properties.get(key) {
                    Some(resolved) => output.push_str(resolved),
                    None => {
                        output.push_str("${");
                        output.push_str(key);
                        output.push('}');
                    }
                }
                rest = &after[end + 1..];
            }
            None => {
                output.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    output.push_str(rest);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    const POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project>
  <groupId>org.apache.camel.quarkus</groupId>
  <artifactId>camel-quarkus-catalog</artifactId>
  <version>3.20.0</version>
  <properties>
    <camel.version>4.9.0</camel.version>
  </properties>
  <dependencies>
    <dependency>
      <groupId>org.apache.camel</groupId>
      <artifactId>camel-yaml-dsl</artifactId>
      <version>${camel.version}</version>
    </dependency>
    <dependency>
      <groupId>${project.groupId}</groupId>
      <artifactId>camel-quarkus-support</artifactId>
      <version>${project.version}</version>
      <scope>runtime</scope>
    </dependency>
    <dependency>
      <groupId>org.junit.jupiter</groupId>
      <artifactId>junit-jupiter</artifactId>
      <version>5.10.0</version>
      <scope>test</scope>
    </dependency>
    <dependency>
      <groupId>org.example</groupId>
      <artifactId>optional-thing</artifactId>
      <version>1.0.0</version>
      <optional>true</optional>
    </dependency>
    <dependency>
      <groupId>org.example</groupId>
      <artifactId>bom-thing</artifactId>
      <version>1.0.0</version>
      <type>pom</type>
    </dependency>
    <dependency>
      <groupId>org.example</groupId>
      <artifactId>managed-elsewhere</artifactId>
    </dependency>
  </dependencies>
</project>
"#;

    #[test]
    fn runtime_dependencies_filter_scopes_and_optionals() {
        let project = parse_project(POM).expect("parse");
        let deps = runtime_dependencies(&project);

        assert_eq!(deps.len(), 2);
        assert_eq!(deps[0].gav(), "org.apache.camel:camel-yaml-dsl:4.9.0");
        assert_eq!(
            deps[1].gav(),
            "org.apache.camel.quarkus:camel-quarkus-support:3.20.0"
        );
    }

    #[test]
    fn parent_version_backs_project_version() {
        let pom = r#"<project>
  <parent>
    <groupId>org.example</groupId>
    <artifactId>parent</artifactId>
    <version>2.0.0</version>
  </parent>
  <artifactId>child</artifactId>
  <dependencies>
    <dependency>
      <groupId>org.example</groupId>
      <artifactId>sibling</artifactId>
      <version>${project.version}</version>
    </dependency>
  </dependencies>
</project>"#;

        let project = parse_project(pom).expect("parse");
        let deps = runtime_dependencies(&project);
        assert_eq!(deps, vec![MavenCoordinates::new("org.example", "sibling", "2.0.0")]);
    }

    #[test]
    fn pom_without_dependencies_yields_nothing() {
        let project = parse_project("<project><artifactId>leaf</artifactId></project>").expect("parse");
        assert!(runtime_dependencies(&project).is_empty());
    }

    #[test]
    fn invalid_xml_is_a_malformed_resource() {
        assert!(parse_project("this is not xml").is_err());
    }

    #[test]
    fn interpolate_leaves_unknown_keys_in_place() {
        let properties = HashMap::from([("known".to_string(), "yes".to_string())]);
        assert_eq!(interpolate("${known}-${unknown}", &properties), "yes-${unknown}");
        assert_eq!(interpolate("plain", &properties), "plain");
    }

    #[test]
    fn snapshot_file_name_from_metadata() {
        let coords = MavenCoordinates::new("org.apache.camel", "camel-catalog", "4.9.0-SNAPSHOT");
        let metadata = r#"<metadata>
  <versioning>
    <snapshot>
      <timestamp>20240101.120000</timestamp>
      <buildNumber>3</buildNumber>
    </snapshot>
  </versioning>
</metadata>"#;

        let name = snapshot_file_name(&coords, "jar", metadata).expect("name");
        assert_eq!(name, "camel-catalog-4.9.0-20240101.120000-3.jar");
    }

    #[test]
    fn snapshot_file_name_requires_snapshot_metadata() {
        let coords = MavenCoordinates::new("g", "a", "1.0.0-SNAPSHOT");
        assert!(snapshot_file_name(&coords, "jar", "<metadata/>").is_none());
    }
}
