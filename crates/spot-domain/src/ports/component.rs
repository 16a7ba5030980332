//! Component contract
//!
//! Components receive injected dependencies through [`Component::inject`]
//! instead of reflective property writes. A component either matches on the
//! field name itself or embeds a [`Dependencies`] map and delegates to it.

use std::collections::BTreeMap;

use downcast_rs::{Downcast, impl_downcast};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::ports::instance::Instance;

/// A value produced by a [`crate::Blueprint`]
pub trait Component: Downcast + Send + Sync {
    /// Attach `dependency` under `field`
    ///
    /// Called once per injection rule, after construction and before the
    /// component is shared. The default accepts no fields.
    fn inject(&mut self, field: &str, dependency: Instance) -> Result<()> {
        let _ = dependency;
        Err(Error::unknown_field(field, std::any::type_name::<Self>()))
    }
}
impl_downcast!(Component);

/// Field map for components that accept arbitrary injected dependencies
#[derive(Debug, Clone, Default)]
pub struct Dependencies {
    fields: BTreeMap<String, Instance>,
}

impl Dependencies {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `field`, returning the previous instance if any
    pub fn set<F: Into<String>>(&mut self, field: F, instance: Instance) -> Option<Instance> {
        self.fields.insert(field.into(), instance)
    }

    /// Instance attached under `field`
    pub fn get(&self, field: &str) -> Option<&Instance> {
        self.fields.get(field)
    }

    /// Component attached under `field`, downcast to `T`
    pub fn get_as<T: Component>(&self, field: &str) -> Option<&T> {
        self.get(field).and_then(Instance::downcast_ref::<T>)
    }

    /// Whether `field` has been set
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Number of attached fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no field has been attached
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Attached field names in sorted order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

/// Generic data-backed component
///
/// Produced for source files that do not name a constructor. Holds the
/// file's properties and accepts any injected field.
#[derive(Debug, Clone, Default)]
pub struct Record {
    properties: Value,
    dependencies: Dependencies,
}

impl Record {
    /// Create a record from its properties
    pub fn new(properties: Value) -> Self {
        Self {
            properties,
            dependencies: Dependencies::new(),
        }
    }

    /// Properties the record was built from
    pub fn properties(&self) -> &Value {
        &self.properties
    }

    /// Single property by key
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Injected dependencies
    pub fn dependencies(&self) -> &Dependencies {
        &self.dependencies
    }
}

impl Component for Record {
    fn inject(&mut self, field: &str, dependency: Instance) -> Result<()> {
        self.dependencies.set(field, dependency);
        Ok(())
    }
}
