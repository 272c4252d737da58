//! Maven repository registry
//!
//! Insertion-ordered mapping from repository name to base URL. Registration is
//! idempotent: a name, once inserted, is never overwritten by a later call.
//! After first use the registry always contains the central repository; the
//! Red Hat GA repository is added only for versions carrying the vendor marker.

/// Default repository, always present after [`RepositoryRegistry::configure`]
pub const CENTRAL_NAME: &str = "central";
pub const CENTRAL_URL: &str = "https://repo1.maven.org/maven2/";

/// Vendor repository, added only for `redhat` versions
pub const REDHAT_NAME: &str = "maven.redhat.ga";
pub const REDHAT_URL: &str = "https://maven.repository.redhat.com/ga/";

const REDHAT_MARKER: &str = "redhat";

/// Insertion-ordered, write-once repository name → URL registry
#[derive(Debug, Clone, Default)]
pub struct RepositoryRegistry {
    entries: Vec<(String, String)>,
}

impl RepositoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a repository. Returns `false` (and changes nothing) when the
    /// name is already present.
    pub fn add(&mut self, name: impl Into<String>, url: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.entries.push((name, url.into()));
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, url)| url.as_str())
    }

    /// Base URLs in registration order.
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, url)| url.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ensure the repositories appropriate for `version` are registered.
    pub fn configure(&mut self, version: &str) {
        self.add(CENTRAL_NAME, CENTRAL_URL);

        if version.contains(REDHAT_MARKER) {
            self.add(REDHAT_NAME, REDHAT_URL);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configure_plain_version_registers_only_central() {
        let mut registry = RepositoryRegistry::new();
        registry.configure("1.0.0");

        assert!(registry.contains(CENTRAL_NAME));
        assert!(!registry.contains(REDHAT_NAME));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn configure_redhat_version_registers_both() {
        let mut registry = RepositoryRegistry::new();
        registry.configure("1.0.0-redhat-00001");

        assert!(registry.contains(CENTRAL_NAME));
        assert_eq!(registry.get(REDHAT_NAME), Some(REDHAT_URL));
    }

    #[test]
    fn registration_is_idempotent_first_write_wins() {
        let mut registry = RepositoryRegistry::new();
        assert!(registry.add(CENTRAL_NAME, "original-url"));
        registry.configure("1.0.0");

        assert_eq!(registry.get(CENTRAL_NAME), Some("original-url"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn vendor_entry_is_not_overwritten_either() {
        let mut registry = RepositoryRegistry::new();
        registry.add(REDHAT_NAME, "original-url");
        registry.configure("1.0.0-redhat-00001");

        assert_eq!(registry.get(REDHAT_NAME), Some("original-url"));
    }

    #[test]
    fn urls_preserve_insertion_order() {
        let mut registry = RepositoryRegistry::new();
        registry.add("first", "https://a.example/");
        registry.add("second", "https://b.example/");

        let urls: Vec<&str> = registry.urls().collect();
        assert_eq!(urls, vec!["https://a.example/", "https://b.example/"]);
    }
}
