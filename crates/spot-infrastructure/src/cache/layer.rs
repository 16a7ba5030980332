//! Kind-partitioned address cache

use std::collections::HashMap;

use dashmap::DashMap;
use spot_domain::{Address, Name};

/// Address-keyed store partitioned by kind
///
/// Kind sub-maps are created on first [`CacheLayer::set`]. A cleared slot is
/// removed outright, so it reads exactly like a slot that was never filled.
pub struct CacheLayer<V> {
    label: &'static str,
    kinds: DashMap<String, HashMap<Name, V>>,
}

impl<V: Clone> CacheLayer<V> {
    /// Create an empty layer; `label` names it in diagnostics
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            kinds: DashMap::new(),
        }
    }

    /// Layer label
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Cached value at `address`
    pub fn get(&self, address: &Address) -> Option<V> {
        self.kinds
            .get(address.kind())
            .and_then(|names| names.get(address.name()).cloned())
    }

    /// Store `value` at `address`, replacing any previous value
    pub fn set(&self, address: &Address, value: V) {
        self.kinds
            .entry(address.kind().to_string())
            .or_default()
            .insert(address.name().clone(), value);
    }

    /// Remove the value at `address`, returning it if present
    pub fn clear(&self, address: &Address) -> Option<V> {
        self.kinds
            .get_mut(address.kind())
            .and_then(|mut names| names.remove(address.name()))
    }

    /// Whether `address` holds a value
    pub fn contains(&self, address: &Address) -> bool {
        self.kinds
            .get(address.kind())
            .is_some_and(|names| names.contains_key(address.name()))
    }

    /// Number of cached values across all kinds
    pub fn len(&self) -> usize {
        self.kinds.iter().map(|names| names.len()).sum()
    }

    /// Whether the layer holds no values
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cached addresses, sorted
    pub fn addresses(&self) -> Vec<Address> {
        let mut addresses: Vec<Address> = self
            .kinds
            .iter()
            .flat_map(|entry| {
                let kind = entry.key().clone();
                entry
                    .value()
                    .keys()
                    .map(|name| Address::new(kind.clone(), name.clone()))
                    .collect::<Vec<_>>()
            })
            .collect();
        addresses.sort();
        addresses
    }
}

impl<V> std::fmt::Debug for CacheLayer<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheLayer")
            .field("label", &self.label)
            .field("kinds", &self.kinds.len())
            .finish()
    }
}
