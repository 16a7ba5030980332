//! Named constructors for source-defined blueprints
//!
//! A source file selects its constructor by name (`blueprint = "posts"`).
//! The catalog maps those names to blueprints registered in code.

use std::sync::Arc;

use dashmap::DashMap;
use spot_domain::Blueprint;

/// Shared name → blueprint table; clones see the same entries
#[derive(Clone, Default)]
pub struct ConstructorCatalog {
    constructors: Arc<DashMap<String, Arc<dyn Blueprint>>>,
}

impl ConstructorCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `blueprint` under `name`, replacing any previous entry
    pub fn register<S: Into<String>>(&self, name: S, blueprint: Arc<dyn Blueprint>) {
        self.constructors.insert(name.into(), blueprint);
    }

    /// Constructor registered under `name`
    pub fn get(&self, name: &str) -> Option<Arc<dyn Blueprint>> {
        self.constructors.get(name).map(|entry| entry.value().clone())
    }

    /// Whether no constructor is registered
    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .constructors
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        names.sort();
        names
    }
}

impl std::fmt::Debug for ConstructorCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstructorCatalog")
            .field("names", &self.names())
            .finish()
    }
}
