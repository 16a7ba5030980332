//! Ports
//!
//! Contracts between the container and the code it manages:
//!
//! - [`Component`]: anything a blueprint produces
//! - [`Blueprint`]: constructible template for components
//! - [`Instance`] / [`Meta`]: a cached, addressed component
//! - [`Resolver`]: discovers blueprints and modules for an address
//! - [`ContainerLookup`]: the lookup surface reachable from an instance's meta

pub mod blueprint;
pub mod component;
pub mod instance;
pub mod resolver;

pub use blueprint::{Blueprint, from_fn, of_default};
pub use component::{Component, Dependencies, Record};
pub use instance::{ContainerLookup, Instance, Meta, meta_for};
pub use resolver::{Resolution, Resolver};
