//! Blueprint contract

use std::sync::Arc;

use serde_json::Value;

use crate::error::Result;
use crate::ports::component::Component;

/// Constructible template producing components
///
/// Closures of the shape `Fn(&[Value]) -> Result<Box<dyn Component>>`
/// implement this trait directly.
pub trait Blueprint: Send + Sync {
    /// Produce a fresh component from constructor arguments
    fn instantiate(&self, args: &[Value]) -> Result<Box<dyn Component>>;
}

impl<F> Blueprint for F
where
    F: Fn(&[Value]) -> Result<Box<dyn Component>> + Send + Sync,
{
    fn instantiate(&self, args: &[Value]) -> Result<Box<dyn Component>> {
        self(args)
    }
}

/// Blueprint from a typed constructor function
///
/// # Example
///
/// ```
/// use spot_domain::{Component, from_fn};
///
/// struct Clock;
/// impl Component for Clock {}
///
/// let blueprint = from_fn(|_args| Ok(Clock));
/// assert!(blueprint.instantiate(&[]).is_ok());
/// ```
pub fn from_fn<C, F>(constructor: F) -> Arc<dyn Blueprint>
where
    C: Component,
    F: Fn(&[Value]) -> Result<C> + Send + Sync + 'static,
{
    Arc::new(move |args: &[Value]| -> Result<Box<dyn Component>> {
        Ok(Box::new(constructor(args)?))
    })
}

/// Blueprint that ignores arguments and builds `C::default()`
pub fn of_default<C: Component + Default>() -> Arc<dyn Blueprint> {
    from_fn(|_| Ok(C::default()))
}
