//! Resource folder scanning
//!
//! Enumerates every classpath location exposing a logical folder and builds a
//! map from derived key to decoded text content, filtered by a required file
//! name suffix. Two enumerator variants back one contract:
//!
//! - [`ArchiveScanner`]: walks archive entries under `folder/`, keeping the
//!   nested path (minus folder prefix and suffix) as the key
//! - [`DirectoryScanner`]: walks the loose directory tree, keying by file name
//!   with the last extension stripped; archives retain the nested path for
//!   disambiguation
//!
//! Results merge across locations in registration order. A key claimed twice
//! resolves last-write-wins; every collision is counted and logged so the
//! nondeterminism boundary stays observable. A resource that fails to decode
//! is logged and omitted; it never aborts the scan.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::classpath::{Classpath, ClasspathLocation};

/// Result of one folder scan
#[derive(Debug, Default)]
pub struct FolderScan {
    /// Logical key → decoded text content
    pub resources: BTreeMap<String, String>,
    /// Number of keys that were claimed by more than one resource
    pub collisions: u32,
}

impl FolderScan {
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }
}

/// One enumerator per classpath-location shape
trait FolderEnumerator {
    fn enumerate(&self, folder: &str, suffix: &str) -> Vec<(String, String)>;
}

/// Scan every location exposing `folder`, merging into one map.
pub fn scan_folder(classpath: &Classpath, folder: &str, suffix: &str) -> FolderScan {
    let mut scan = FolderScan::default();

    for location in classpath.find_resource(folder) {
        let enumerator: Box<dyn FolderEnumerator> = match location {
            ClasspathLocation::Archive { path, .. } => Box::new(ArchiveScanner { path }),
            ClasspathLocation::Directory { path } => {
                Box::new(DirectoryScanner { root: path.as_path() })
            }
        };

        for (key, content) in enumerator.enumerate(folder, suffix) {
            if scan.resources.insert(key.clone(), content).is_some() {
                scan.collisions += 1;
                warn!(%key, folder, "duplicate logical key, keeping the later entry");
            }
        }
    }

    scan
}

/// Enumerates entries of a packaged archive
struct ArchiveScanner<'a> {
    path: &'a PathBuf,
}

impl FolderEnumerator for ArchiveScanner<'_> {
    fn enumerate(&self, folder: &str, suffix: &str) -> Vec<(String, String)> {
        let mut results = Vec::new();

        let Ok(file) = File::open(self.path) else {
            warn!(path = %self.path.display(), "archive no longer reachable");
            return results;
        };
        let mut archive = match zip::ZipArchive::new(file) {
            Ok(archive) => archive,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "cannot open archive");
                return results;
            }
        };

        let prefix = format!("{folder}/");
        for index in 0..archive.len() {
            let Ok(mut entry) = archive.by_index(index) else {
                continue;
            };
            if entry.is_dir() {
                continue;
            }
            let name = entry.name().to_string();
            if !name.starts_with(&prefix) || !name.ends_with(suffix) {
                continue;
            }

            debug!(entry = %name, "parsing");
            let mut content = String::new();
            match entry.read_to_string(&mut content) {
                Ok(_) => {
                    let stripped = name.strip_prefix(&prefix).unwrap_or(&name);
                    let key = stripped.strip_suffix(suffix).unwrap_or(stripped).to_string();
                    results.push((key, content));
                }
                Err(e) => warn!(entry = %name, error = %e, "skipping undecodable resource"),
            }
        }

        results
    }
}

/// Enumerates a loose directory tree
struct DirectoryScanner<'a> {
    root: &'a Path,
}

impl FolderEnumerator for DirectoryScanner<'_> {
    fn enumerate(&self, folder: &str, suffix: &str) -> Vec<(String, String)> {
        let mut results = Vec::new();

        let folder_root = self.root.join(folder);
        for entry in WalkDir::new(&folder_root)
            .into_iter()
            .filter_map(std::result::Result::ok)
        {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if !path.to_string_lossy().ends_with(suffix) {
                continue;
            }

            debug!(path = %path.display(), "parsing");
            match std::fs::read_to_string(path) {
                Ok(content) => {
                    let key = path
                        .file_stem()
                        .map(|stem| stem.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    results.push((key, content));
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping undecodable resource");
                }
            }
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_jar(path: &Path, files: &[(&str, &[u8])]) {
        let file = File::create(path).expect("create jar");
        let mut writer = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default();
        for (name, content) in files {
            writer.start_file(*name, options).expect("start entry");
            writer.write_all(content).expect("write entry");
        }
        writer.finish().expect("finish jar");
    }

    #[test]
    fn archive_scan_strips_folder_prefix_and_suffix() {
        let temp = tempfile::TempDir::new().expect("tempdir");
        let jar = temp.path().join("kamelets.jar");
        write_jar(
            &jar,
            &[
                ("kamelets/foo.kamelet.yaml", b"spec: foo"),
                ("kamelets/nested/bar.kamelet.yaml", b"spec: bar"),
                ("kamelets/readme.txt", b"not a kamelet"),
                ("other/baz.kamelet.yaml", b"wrong folder"),
            ],
        );

        let mut classpath = Classpath::new();
        classpath.add_location(&jar);

        let scan = scan_folder(&classpath, "kamelets", ".kamelet.yaml");
        assert_eq!(scan.len(), 2);
        assert_eq!(scan.resources.get("foo").map(String::as_str), Some("spec: foo"));
        // Archives keep the nested path for disambiguation.
        assert_eq!(scan.resources.get("nested/bar").map(String::as_str), Some("spec: bar"));
        assert_eq!(scan.collisions, 0);
    }

    #[test]
    fn directory_scan_keys_by_file_stem() {
        let temp = tempfile::TempDir::new().expect("tempdir");
        let patterns = temp.path().join("kaoto-patterns");
        std::fs::create_dir_all(&patterns).expect("mkdir");
        std::fs::write(patterns.join("kaoto-datamapper.json"), "{}").expect("write");
        std::fs::write(patterns.join("notes.md"), "skip me").expect("write");

        let mut classpath = Classpath::new();
        classpath.add_location(temp.path());

        let scan = scan_folder(&classpath, "kaoto-patterns", ".json");
        assert_eq!(scan.len(), 1);
        assert!(scan.resources.contains_key("kaoto-datamapper"));
    }

    #[test]
    fn loose_kamelet_keys_keep_the_inner_extension() {
        // file_stem strips only the last extension, mirroring the loose-file
        // asymmetry: foo.kamelet.yaml -> foo.kamelet
        let temp = tempfile::TempDir::new().expect("tempdir");
        let kamelets = temp.path().join("kamelets");
        std::fs::create_dir_all(&kamelets).expect("mkdir");
        std::fs::write(kamelets.join("foo.kamelet.yaml"), "spec: {}").expect("write");

        let mut classpath = Classpath::new();
        classpath.add_location(temp.path());

        let scan = scan_folder(&classpath, "kamelets", ".kamelet.yaml");
        assert!(scan.resources.contains_key("foo.kamelet"));
    }

    #[test]
    fn collisions_are_counted_and_last_write_wins() {
        let temp = tempfile::TempDir::new().expect("tempdir");
        let first = temp.path().join("first.jar");
        let second = temp.path().join("second.jar");
        write_jar(&first, &[("schemas/route.json", b"{\"from\": 1}")]);
        write_jar(&second, &[("schemas/route.json", b"{\"from\": 2}")]);

        let mut classpath = Classpath::new();
        classpath.add_location(&first);
        classpath.add_location(&second);

        let scan = scan_folder(&classpath, "schemas", ".json");
        assert_eq!(scan.len(), 1);
        assert_eq!(scan.collisions, 1);
        assert_eq!(
            scan.resources.get("route").map(String::as_str),
            Some("{\"from\": 2}")
        );
    }

    #[test]
    fn undecodable_entries_are_skipped_not_fatal() {
        let temp = tempfile::TempDir::new().expect("tempdir");
        let jar = temp.path().join("mixed.jar");
        write_jar(
            &jar,
            &[
                ("schemas/good.json", b"{}"),
                ("schemas/bad.json", &[0xff, 0xfe, 0x00, 0x01]),
            ],
        );

        let mut classpath = Classpath::new();
        classpath.add_location(&jar);

        let scan = scan_folder(&classpath, "schemas", ".json");
        assert_eq!(scan.len(), 1);
        assert!(scan.resources.contains_key("good"));
    }

    #[test]
    fn scan_of_absent_folder_is_empty() {
        let classpath = Classpath::new();
        let scan = scan_folder(&classpath, "kamelets", ".kamelet.yaml");
        assert!(scan.is_empty());
        assert_eq!(scan.collisions, 0);
    }
}
