//! Null resolver

use std::sync::Arc;

use serde_json::Value;
use spot_domain::{Address, Blueprint, Error, Resolution, Resolver, Result};

/// Resolver with no sources; every lookup is not found
#[derive(Debug, Clone, Copy, Default)]
pub struct NullResolver;

impl NullResolver {
    /// Create a null resolver
    pub fn new() -> Self {
        Self
    }
}

impl Resolver for NullResolver {
    fn name(&self) -> &str {
        "null"
    }

    fn resolve_blueprint(&self, address: &Address) -> Result<Resolution<Arc<dyn Blueprint>>> {
        Err(Error::not_found(address.to_string()))
    }

    fn resolve_module(&self, address: &Address) -> Result<Resolution<Arc<Value>>> {
        Err(Error::not_found(address.to_string()))
    }

    fn drop_cache(&self, _source_path: &str) {}
}
