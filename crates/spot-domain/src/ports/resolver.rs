//! Resolver port
//!
//! Maps an address to a blueprint or plain module value and reports the
//! source path it came from. The container records that path so a later
//! change notification can evict what was built from it.

use std::sync::Arc;

use serde_json::Value;

use crate::error::Result;
use crate::ports::blueprint::Blueprint;
use crate::value_objects::Address;

/// A resolved value together with its originating source path
#[derive(Debug, Clone)]
pub struct Resolution<T> {
    /// The resolved blueprint or module
    pub value: T,
    /// Source path, without extension
    pub source_path: String,
}

impl<T> Resolution<T> {
    /// Create a resolution
    pub fn new<P: Into<String>>(value: T, source_path: P) -> Self {
        Self {
            value,
            source_path: source_path.into(),
        }
    }
}

/// Discovers blueprints and modules from source artifacts
pub trait Resolver: Send + Sync {
    /// Resolver name for diagnostics
    fn name(&self) -> &str;

    /// Blueprint discovered for `address`
    ///
    /// Fails with [`crate::Error::NotFound`] when nothing exists at the
    /// location computed for the address.
    fn resolve_blueprint(&self, address: &Address) -> Result<Resolution<Arc<dyn Blueprint>>>;

    /// Plain module value discovered for `address`
    fn resolve_module(&self, address: &Address) -> Result<Resolution<Arc<Value>>>;

    /// Forget any parsed or loaded state held for `source_path`
    fn drop_cache(&self, source_path: &str);
}
