//! Addressed instances and their metadata

use std::fmt;
use std::sync::{Arc, Weak};

use serde_json::Value;

use crate::constants::CONTROLLER_KIND;
use crate::error::Result;
use crate::ports::blueprint::Blueprint;
use crate::ports::component::Component;
use crate::value_objects::{Address, Name};

/// Lookup surface of a container, reachable from any instance it produced
pub trait ContainerLookup: Send + Sync {
    /// Cached, wired instance at `address`
    fn find_instance(&self, address: &Address) -> Result<Instance>;

    /// Composed blueprint at `address`
    fn find_factory(&self, address: &Address) -> Result<Arc<dyn Blueprint>>;

    /// Raw module value at `address`
    fn find_module(&self, address: &Address) -> Result<Arc<Value>>;

    /// Controller instance by name
    fn find_controller(&self, name: &str) -> Result<Instance> {
        self.find_instance(&Address::new(CONTROLLER_KIND, name))
    }
}

/// Metadata attached to every instance a container produces
#[derive(Clone)]
pub struct Meta {
    address: Address,
    container: Weak<dyn ContainerLookup>,
}

impl Meta {
    /// Create metadata for an instance built by `container`
    pub fn new(address: Address, container: Weak<dyn ContainerLookup>) -> Self {
        Self { address, container }
    }

    /// Address the instance is cached under
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Name the instance is cached under
    pub fn name(&self) -> &Name {
        self.address.name()
    }

    /// Kind the instance is cached under
    pub fn kind(&self) -> &str {
        self.address.kind()
    }

    /// Owning container, if it is still alive
    pub fn container(&self) -> Option<Arc<dyn ContainerLookup>> {
        self.container.upgrade()
    }
}

impl fmt::Debug for Meta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Meta")
            .field("address", &self.address)
            .field("container_alive", &(self.container.strong_count() > 0))
            .finish()
    }
}

struct Managed {
    meta: Meta,
    component: Box<dyn Component>,
}

/// Shared handle to a constructed, wired component
///
/// Clones point at the same component; use [`Instance::ptr_eq`] for
/// identity checks.
#[derive(Clone)]
pub struct Instance {
    inner: Arc<Managed>,
}

impl Instance {
    /// Wrap a finished component together with its metadata
    pub fn new(component: Box<dyn Component>, meta: Meta) -> Self {
        Self {
            inner: Arc::new(Managed { meta, component }),
        }
    }

    /// Instance metadata
    pub fn meta(&self) -> &Meta {
        &self.inner.meta
    }

    /// Address the instance is cached under
    pub fn address(&self) -> &Address {
        self.inner.meta.address()
    }

    /// Underlying component
    pub fn component(&self) -> &dyn Component {
        self.inner.component.as_ref()
    }

    /// Underlying component as `T`
    pub fn downcast_ref<T: Component>(&self) -> Option<&T> {
        self.inner.component.downcast_ref::<T>()
    }

    /// Whether the underlying component is a `T`
    pub fn is<T: Component>(&self) -> bool {
        self.inner.component.is::<T>()
    }

    /// Reference equality
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("address", self.address())
            .finish_non_exhaustive()
    }
}

/// Metadata of `instance`
pub fn meta_for(instance: &Instance) -> &Meta {
    instance.meta()
}
