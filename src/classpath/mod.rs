//! Growable classpath
//!
//! A set of searchable locations that only grows over the process lifetime:
//! locations are appended, never removed, and become visible to every lookup
//! performed after the append returns. Each location is classified up front as
//! either an archive (jar/zip) or a loose directory tree, so later lookups
//! dispatch on capability instead of sniffing path shapes.
//!
//! Archive entry names are indexed once at append time; content reads reopen
//! the backing file and surface `ResourceNotFound` if it has since vanished
//! (e.g. a deleted temp file).

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{Result, archive_failed, resource_not_found};

/// A single searchable location: a packaged archive or a directory root
#[derive(Debug)]
pub enum ClasspathLocation {
    /// A jar/zip file, with its entry names indexed at registration time
    Archive { path: PathBuf, entries: Vec<String> },

    /// A loose directory tree; resources are relative paths beneath it
    Directory { path: PathBuf },
}

impl ClasspathLocation {
    /// The file or directory backing this location.
    pub fn path(&self) -> &Path {
        match self {
            Self::Archive { path, .. } | Self::Directory { path } => path,
        }
    }

    /// Whether this location exposes `name`, as a file or as a folder prefix.
    pub fn exposes(&self, name: &str) -> bool {
        let trimmed = name.trim_end_matches('/');
        match self {
            Self::Archive { entries, .. } => {
                let folder = format!("{trimmed}/");
                entries
                    .iter()
                    .any(|entry| entry == name || entry.starts_with(&folder))
            }
            Self::Directory { path } => path.join(trimmed).exists(),
        }
    }

    /// Read the bytes behind `name`.
    ///
    /// Returns `ResourceNotFound` when the entry is absent or the backing
    /// file is no longer reachable.
    pub fn read(&self, name: &str) -> Result<Vec<u8>> {
        match self {
            Self::Archive { path, .. } => {
                let file = File::open(path).map_err(|_| resource_not_found(name))?;
                let mut archive = zip::ZipArchive::new(file)
                    .map_err(|e| archive_failed(path.display().to_string(), e.to_string()))?;
                let mut entry = archive
                    .by_name(name)
                    .map_err(|_| resource_not_found(name))?;

                let mut buffer = Vec::with_capacity(usize::try_from(entry.size()).unwrap_or(0));
                entry.read_to_end(&mut buffer)?;
                Ok(buffer)
            }
            Self::Directory { path } => {
                let full = path.join(name);
                if !full.is_file() {
                    return Err(resource_not_found(name));
                }
                Ok(std::fs::read(full)?)
            }
        }
    }
}

/// Append-only collection of classpath locations
#[derive(Debug, Default)]
pub struct Classpath {
    locations: Vec<ClasspathLocation>,
}

impl Classpath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a location. Append is the only mutator; nothing is ever evicted.
    ///
    /// Directories are registered as loose trees, anything else as an archive.
    /// An unreadable archive is still registered (with an empty index) so the
    /// location count stays an accurate record of what was appended.
    pub fn add_location(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        let location = if path.is_dir() {
            ClasspathLocation::Directory { path }
        } else {
            let entries = index_archive(&path).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "could not index archive");
                Vec::new()
            });
            ClasspathLocation::Archive { path, entries }
        };
        self.locations.push(location);
    }

    /// Every location exposing `name`, in registration order (oldest first).
    pub fn find_resource(&self, name: &str) -> Vec<&ClasspathLocation> {
        self.locations
            .iter()
            .filter(|location| location.exposes(name))
            .collect()
    }

    /// Content of `name` from the first registered location exposing it.
    pub fn read_first(&self, name: &str) -> Option<Vec<u8>> {
        for location in self.find_resource(name) {
            if let Ok(bytes) = location.read(name) {
                return Some(bytes);
            }
        }
        None
    }

    pub fn locations(&self) -> &[ClasspathLocation] {
        &self.locations
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

fn index_archive(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path)?;
    let archive = zip::ZipArchive::new(file)
        .map_err(|e| archive_failed(path.display().to_string(), e.to_string()))?;
    Ok(archive.file_names().map(String::from).collect())
}
