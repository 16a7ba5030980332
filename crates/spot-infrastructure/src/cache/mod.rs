//! Cache layers
//!
//! The container keeps three independent [`CacheLayer`]s (blueprints,
//! instances, modules), each partitioned first by kind and then by name.

pub mod layer;

pub use layer::CacheLayer;
