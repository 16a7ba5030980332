//! # spot
//!
//! Address-keyed component container with lazy construction, declarative
//! injection wiring and source-driven invalidation.
//!
//! ## Example
//!
//! ```
//! use spot::{Application, InjectionRule, domain::{Component, Dependencies, Instance, Result, of_default}};
//!
//! #[derive(Default)]
//! struct Store;
//! impl Component for Store {}
//!
//! #[derive(Default)]
//! struct Posts {
//!     deps: Dependencies,
//! }
//! impl Component for Posts {
//!     fn inject(&mut self, field: &str, dependency: Instance) -> Result<()> {
//!         self.deps.set(field, dependency);
//!         Ok(())
//!     }
//! }
//!
//! let app = Application::builder().boot().unwrap();
//! let container = app.container();
//! container.register_factory("service", "store", of_default::<Store>());
//! container.register_factory("controller", "posts", of_default::<Posts>());
//! container.inject(("controller", "posts"), InjectionRule::new(("service", "store"), "store"));
//!
//! let posts = app.find_controller("posts").unwrap();
//! let store = container.find_instance(("service", "store")).unwrap();
//! let wired = posts.downcast_ref::<Posts>().unwrap().deps.get("store").unwrap();
//! assert!(wired.ptr_eq(&store));
//! ```
//!
//! ## Architecture
//!
//! - `domain` - addresses, errors and the component/blueprint/resolver ports
//! - `infrastructure` - the container, resolvers, config, logging and watcher
//! - [`Application`] - boots a container from configuration

pub mod application;

/// Domain layer - addresses, errors and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use spot_domain::*;
}

/// Infrastructure layer - container, resolvers, config, logging, watcher
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use spot_infrastructure::*;
}

pub use application::{Application, ApplicationBuilder};
pub use spot_domain::{ALL, Address, Error, Instance, MAIN, Name, Result, meta_for};
pub use spot_infrastructure::{Container, InjectionRule};
