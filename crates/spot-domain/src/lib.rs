//! # Domain Layer
//!
//! Core types shared by every layer of spot.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`value_objects`] | [`Address`] and [`Name`], the keys everything is registered under |
//! | [`ports`] | Component, blueprint, instance and resolver contracts |
//! | [`error`] | Error taxonomy and [`Result`] alias |
//! | [`constants`] | Well-known kinds and defaults |
//!
//! This crate holds no behavior beyond the contracts. The container that
//! implements them lives in `spot-infrastructure`.

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::{
    Blueprint, Component, ContainerLookup, Dependencies, Instance, Meta, Record, Resolution, Resolver,
    from_fn, meta_for, of_default,
};
pub use value_objects::{ALL, Address, MAIN, Name};
