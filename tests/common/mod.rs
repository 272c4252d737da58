//! Common test utilities for catalogen integration tests

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use catalogen::error::{Result, network_failed};
use catalogen::http::HttpFetcher;
use catalogen::maven::MavenCoordinates;

/// Base URL the bootstrap resolves against (the default central repository)
pub const REPO: &str = "https://repo1.maven.org/maven2";

/// In-memory transport serving canned bodies keyed by exact URL
#[derive(Default)]
pub struct FakeFetcher {
    responses: HashMap<String, Vec<u8>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, url: impl Into<String>, body: impl Into<Vec<u8>>) {
        self.responses.insert(url.into(), body.into());
    }

    /// Publish an artifact (POM plus optional jar) under [`REPO`].
    pub fn publish(&mut self, coords: &MavenCoordinates, pom: &str, jar: Option<Vec<u8>>) {
        let dir = format!("{}/{}", REPO, coords.repository_dir());
        self.insert(format!("{}/{}", dir, coords.file_name("pom")), pom.as_bytes().to_vec());
        if let Some(jar) = jar {
            self.insert(format!("{}/{}", dir, coords.file_name("jar")), jar);
        }
    }
}

impl HttpFetcher for FakeFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| network_failed(url, "HTTP 404"))
    }
}

/// Build an in-memory jar from (entry name, content) pairs.
pub fn jar_bytes(files: &[(&str, &str)]) -> Vec<u8> {
    let mut cursor = std::io::Cursor::new(Vec::new());
    let mut writer = zip::ZipWriter::new(&mut cursor);
    let options = zip::write::SimpleFileOptions::default();
    for (name, content) in files {
        writer.start_file(*name, options).expect("start entry");
        writer.write_all(content.as_bytes()).expect("write entry");
    }
    writer.finish().expect("finish jar");
    cursor.into_inner()
}

/// POM with no dependencies.
pub fn leaf_pom(coords: &MavenCoordinates) -> String {
    format!(
        "<project><groupId>{}</groupId><artifactId>{}</artifactId><version>{}</version></project>",
        coords.group_id, coords.artifact_id, coords.version
    )
}

/// POM declaring the given runtime dependencies.
pub fn pom_with_dependencies(coords: &MavenCoordinates, dependencies: &[&MavenCoordinates]) -> String {
    let deps: String = dependencies
        .iter()
        .map(|dep| {
            format!(
                "<dependency><groupId>{}</groupId><artifactId>{}</artifactId><version>{}</version></dependency>",
                dep.group_id, dep.artifact_id, dep.version
            )
        })
        .collect();

    format!(
        "<project><groupId>{}</groupId><artifactId>{}</artifactId><version>{}</version>\
         <dependencies>{}</dependencies></project>",
        coords.group_id, coords.artifact_id, coords.version, deps
    )
}

/// Create a loose resource tree: `<root>/<folder>/<file>` per entry.
pub fn write_local_tree(root: &Path, entries: &[(&str, &str, &str)]) {
    for (folder, file, content) in entries {
        let dir = root.join(folder);
        std::fs::create_dir_all(&dir).expect("create folder");
        std::fs::write(dir.join(file), content).expect("write file");
    }
}
