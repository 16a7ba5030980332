//! Dependency injection container
//!
//! ## Lookup flow
//!
//! ```text
//! find_instance(kind, name)
//!   │  instance cache hit ──────────────────────────────► Instance
//!   ▼
//! find_factory(kind, name)
//!   │  blueprint cache hit ─────────┐
//!   ▼                               │
//! registration │ Resolver discovery │  (discovery records source path)
//!   ▼                               │
//! compose(raw, injection rules) ────┤
//!                                   ▼
//!                      instantiate → inject providers (find_instance each)
//!                                   ▼
//!                      attach Meta → instance cache ─► Instance
//! ```
//!
//! `file_did_change(path)` evicts the blueprint, instance and module slots
//! of the address recorded for `path` and asks the resolver to drop its
//! parsed copy of the file.

pub mod container;
pub mod factory;
pub mod injection;
pub mod invalidation;
pub mod resolution;

pub use container::Container;
pub use factory::{ComposedBlueprint, compose};
pub use injection::{InjectionRegistry, InjectionRule};
pub use invalidation::{InvalidationIndex, strip_extension};
pub use resolution::{AddressLocks, ResolutionGuard};
