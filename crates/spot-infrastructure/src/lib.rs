//! # Infrastructure Layer
//!
//! The container and everything it needs at runtime.
//!
//! ### Container
//! | Module | Description |
//! |--------|-------------|
//! | [`di`] | Address-keyed container, injection wiring, invalidation |
//! | [`cache`] | Kind-partitioned cache layers backing the container |
//! | [`resolver`] | Filesystem and null resolvers |
//!
//! ### Configuration & Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | TOML + environment configuration via figment |
//! | [`logging`] | Structured logging with tracing |
//! | [`watcher`] | Source file watching with notify |
//! | [`constants`] | Centralized configuration constants |

pub mod cache;
pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod logging;
pub mod resolver;
pub mod watcher;

pub use di::{Container, InjectionRule};
pub use error_ext::ErrorContext;
pub use resolver::{ConstructorCatalog, FsResolver, NullResolver};
pub use watcher::{SourceWatchEvent, SourceWatcher};
