//! Value objects
//!
//! Immutable keys used to register and look up components.

pub mod address;

pub use address::{ALL, Address, MAIN, Name};
