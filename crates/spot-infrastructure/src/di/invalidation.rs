//! Source path → address index used for change-driven eviction

use std::path::Path;

use dashmap::DashMap;
use spot_domain::Address;

/// Reverse map from extension-less source path to the address built from it
#[derive(Debug, Default)]
pub struct InvalidationIndex {
    files: DashMap<String, Address>,
}

impl InvalidationIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `address` was resolved from `source_path`
    pub fn record<P: Into<String>>(&self, source_path: P, address: Address) {
        self.files.insert(source_path.into(), address);
    }

    /// Address recorded for `source_path`
    pub fn lookup(&self, source_path: &str) -> Option<Address> {
        self.files.get(source_path).map(|address| address.clone())
    }

    /// Drop the entry for `source_path`
    pub fn forget(&self, source_path: &str) -> Option<Address> {
        self.files.remove(source_path).map(|(_, address)| address)
    }

    /// Tracked source paths, sorted
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.files.iter().map(|entry| entry.key().clone()).collect();
        paths.sort();
        paths
    }

    /// Number of tracked paths
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether no path is tracked
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// `path` without the extension of its last component
///
/// Paths whose last component has no extension (including dotfiles such as
/// `.env`) are returned unchanged.
pub fn strip_extension(path: &str) -> &str {
    match Path::new(path).extension() {
        Some(extension) => &path[..path.len() - extension.len() - 1],
        None => path,
    }
}
