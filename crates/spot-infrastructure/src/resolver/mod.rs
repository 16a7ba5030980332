//! Resolver implementations
//!
//! | Resolver | Use |
//! |----------|-----|
//! | [`FsResolver`] | Discovers modules and blueprints from source files under a root |
//! | [`NullResolver`] | Resolves nothing; default when no source root is configured |

pub mod catalog;
pub mod filesystem;
pub mod null;

pub use catalog::ConstructorCatalog;
pub use filesystem::FsResolver;
pub use null::NullResolver;
