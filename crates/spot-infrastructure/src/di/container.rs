//! Container facade
//!
//! Owns the three cache layers, the explicit registrations, the injection
//! registry and the invalidation index, and exposes the lookup operations
//! that tie them together. Cloning a [`Container`] shares its state; build a
//! new one for an independent cache (one per test, for example).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

use serde_json::Value;
use spot_domain::constants::CONTROLLER_KIND;
use spot_domain::{
    Address, Blueprint, ContainerLookup, Instance, Meta, Name, Resolution, Resolver, Result,
};
use tracing::{debug, info, trace};

use crate::cache::CacheLayer;
use crate::di::factory;
use crate::di::injection::{InjectionRegistry, InjectionRule};
use crate::di::invalidation::{InvalidationIndex, strip_extension};
use crate::di::resolution::{AddressLocks, ResolutionGuard, acquire};

static NEXT_CONTAINER_ID: AtomicUsize = AtomicUsize::new(1);

/// Address-keyed registry of lazily built, memoized instances
#[derive(Clone)]
pub struct Container {
    inner: Arc<ContainerInner>,
}

struct ContainerInner {
    id: usize,
    this: Weak<ContainerInner>,
    resolver: Arc<dyn Resolver>,

    registrations: CacheLayer<Arc<dyn Blueprint>>,
    factories: CacheLayer<Arc<dyn Blueprint>>,
    instances: CacheLayer<Instance>,
    modules: CacheLayer<Arc<Value>>,

    injections: InjectionRegistry,
    files: InvalidationIndex,

    instance_locks: AddressLocks,
    factory_locks: AddressLocks,
    module_locks: AddressLocks,
}

impl Container {
    /// Create an empty container discovering blueprints through `resolver`
    pub fn new(resolver: Arc<dyn Resolver>) -> Self {
        let inner = Arc::new_cyclic(|this| ContainerInner {
            id: NEXT_CONTAINER_ID.fetch_add(1, Ordering::Relaxed),
            this: this.clone(),
            resolver,
            registrations: CacheLayer::new("registrations"),
            factories: CacheLayer::new("factories"),
            instances: CacheLayer::new("instances"),
            modules: CacheLayer::new("modules"),
            injections: InjectionRegistry::new(),
            files: InvalidationIndex::new(),
            instance_locks: AddressLocks::new(),
            factory_locks: AddressLocks::new(),
            module_locks: AddressLocks::new(),
        });
        debug!(
            container = inner.id,
            resolver = inner.resolver.name(),
            "Container created"
        );
        Self { inner }
    }

    /// Register `blueprint` for `(kind, name)`
    ///
    /// Registered blueprints take precedence over discovery. Existing cache
    /// entries are left alone, so register before the first lookup.
    pub fn register_factory<K, N>(&self, kind: K, name: N, blueprint: Arc<dyn Blueprint>)
    where
        K: Into<String>,
        N: Into<Name>,
    {
        let address = Address::new(kind, name);
        debug!(address = %address, "Registered factory");
        self.inner.registrations.set(&address, blueprint);
    }

    /// Inject into `consumer`, which may be a kind-wide `(kind, ALL)` address
    pub fn inject<A: Into<Address>>(&self, consumer: A, rule: InjectionRule) {
        let consumer = consumer.into();
        debug!(
            consumer = %consumer,
            provider = %rule.provider(),
            field = rule.attach_as(),
            "Added injection"
        );
        self.inner.injections.add(consumer, rule);
    }

    /// Inject into every name under `kind`
    pub fn inject_kind<K: Into<String>>(&self, kind: K, rule: InjectionRule) {
        self.inject(Address::all(kind), rule);
    }

    /// Rules that apply when instantiating `address`, exact rules first
    pub fn injections_for<A: Into<Address>>(&self, address: A) -> Vec<InjectionRule> {
        self.inner.injections.effective(&address.into())
    }

    /// Cached, fully wired instance at `address`
    pub fn find_instance<A: Into<Address>>(&self, address: A) -> Result<Instance> {
        self.inner.find_instance(&address.into())
    }

    /// Composed (injection-decorated) blueprint at `address`
    pub fn find_factory<A: Into<Address>>(&self, address: A) -> Result<Arc<dyn Blueprint>> {
        self.inner.find_factory(&address.into())
    }

    /// Raw module value at `address`, without instantiation
    pub fn find_module<A: Into<Address>>(&self, address: A) -> Result<Arc<Value>> {
        self.inner.find_module(&address.into())
    }

    /// Controller instance by name
    pub fn find_controller(&self, name: &str) -> Result<Instance> {
        self.find_instance((CONTROLLER_KIND, name))
    }

    /// Evict whatever was built from the source file at `path`
    ///
    /// Returns the invalidated address, or `None` when the path is not
    /// tracked. Consumers that already hold the evicted instance keep it.
    pub fn file_did_change(&self, path: &str) -> Option<Address> {
        self.inner.file_did_change(path)
    }

    /// Whether an instance is cached at `address`
    pub fn is_instantiated<A: Into<Address>>(&self, address: A) -> bool {
        self.inner.instances.contains(&address.into())
    }

    /// Addresses with a cached instance
    pub fn instantiated(&self) -> Vec<Address> {
        self.inner.instances.addresses()
    }

    /// Source paths currently tracked for invalidation
    pub fn tracked_paths(&self) -> Vec<String> {
        self.inner.files.paths()
    }

    /// Resolver used for discovery
    pub fn resolver(&self) -> &Arc<dyn Resolver> {
        &self.inner.resolver
    }

    /// Lookup handle as seen through instance metadata
    pub fn lookup(&self) -> Arc<dyn ContainerLookup> {
        self.inner.clone()
    }

    /// Whether `meta` was produced by this container
    pub fn owns(&self, meta: &Meta) -> bool {
        meta.container().is_some_and(|container| {
            std::ptr::addr_eq(Arc::as_ptr(&container), Arc::as_ptr(&self.inner))
        })
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("id", &self.inner.id)
            .field("resolver", &self.inner.resolver.name())
            .field("instances", &self.inner.instances.len())
            .field("factories", &self.inner.factories.len())
            .field("modules", &self.inner.modules.len())
            .field("tracked_paths", &self.inner.files.len())
            .finish()
    }
}

impl ContainerInner {
    fn lookup_handle(&self) -> Weak<dyn ContainerLookup> {
        self.this.clone()
    }

    fn find_instance(&self, address: &Address) -> Result<Instance> {
        if let Some(instance) = self.instances.get(address) {
            trace!(address = %address, "Instance cache hit");
            return Ok(instance);
        }

        let _resolving = ResolutionGuard::enter(self.id, address)?;
        let lock = self.instance_locks.lock_for(address);
        let built = {
            let _building = acquire(&lock);
            self.build_instance(address)
        };
        if built.is_err() {
            self.instance_locks.release(address, &lock);
        }
        built
    }

    fn build_instance(&self, address: &Address) -> Result<Instance> {
        // Another thread may have finished while we waited.
        if let Some(instance) = self.instances.get(address) {
            return Ok(instance);
        }

        let factory = self.find_factory(address)?;
        let component = factory.instantiate(&[])?;
        let instance = Instance::new(component, Meta::new(address.clone(), self.lookup_handle()));

        self.instances.set(address, instance.clone());
        debug!(address = %address, "Instantiated");
        Ok(instance)
    }

    fn find_factory(&self, address: &Address) -> Result<Arc<dyn Blueprint>> {
        if let Some(factory) = self.factories.get(address) {
            trace!(address = %address, "Blueprint cache hit");
            return Ok(factory);
        }

        let lock = self.factory_locks.lock_for(address);
        let built = {
            let _building = acquire(&lock);
            self.build_factory(address)
        };
        if built.is_err() {
            self.factory_locks.release(address, &lock);
        }
        built
    }

    fn build_factory(&self, address: &Address) -> Result<Arc<dyn Blueprint>> {
        if let Some(factory) = self.factories.get(address) {
            return Ok(factory);
        }

        let raw = match self.registrations.get(address) {
            Some(registered) => registered,
            None => {
                let Resolution { value, source_path } = self.resolver.resolve_blueprint(address)?;
                debug!(address = %address, path = %source_path, "Discovered blueprint");
                self.files.record(source_path, address.clone());
                value
            }
        };

        let rules = self.injections.effective(address);
        let composed = factory::compose(address, raw, rules, self.lookup_handle())?;
        self.factories.set(address, composed.clone());
        Ok(composed)
    }

    fn find_module(&self, address: &Address) -> Result<Arc<Value>> {
        if let Some(module) = self.modules.get(address) {
            trace!(address = %address, "Module cache hit");
            return Ok(module);
        }

        let lock = self.module_locks.lock_for(address);
        let loaded = {
            let _loading = acquire(&lock);
            self.load_module(address)
        };
        if loaded.is_err() {
            self.module_locks.release(address, &lock);
        }
        loaded
    }

    fn load_module(&self, address: &Address) -> Result<Arc<Value>> {
        if let Some(module) = self.modules.get(address) {
            return Ok(module);
        }

        let Resolution { value, source_path } = self.resolver.resolve_module(address)?;
        debug!(address = %address, path = %source_path, "Loaded module");
        self.files.record(source_path, address.clone());
        self.modules.set(address, value.clone());
        Ok(value)
    }

    fn file_did_change(&self, path: &str) -> Option<Address> {
        let source_path = strip_extension(path);
        let Some(address) = self.files.lookup(source_path) else {
            trace!(path = %path, "Ignoring change to untracked path");
            return None;
        };

        // Same order as lookups take them: instance, then blueprint.
        let instance_lock = self.instance_locks.lock_for(&address);
        let _instance = acquire(&instance_lock);
        let factory_lock = self.factory_locks.lock_for(&address);
        let _factory = acquire(&factory_lock);
        let module_lock = self.module_locks.lock_for(&address);
        let _module = acquire(&module_lock);

        self.factories.clear(&address);
        self.instances.clear(&address);
        self.modules.clear(&address);
        self.files.forget(source_path);
        self.resolver.drop_cache(source_path);

        info!(address = %address, path = %source_path, "Invalidated after source change");
        Some(address)
    }
}

impl ContainerLookup for ContainerInner {
    fn find_instance(&self, address: &Address) -> Result<Instance> {
        ContainerInner::find_instance(self, address)
    }

    fn find_factory(&self, address: &Address) -> Result<Arc<dyn Blueprint>> {
        ContainerInner::find_factory(self, address)
    }

    fn find_module(&self, address: &Address) -> Result<Arc<Value>> {
        ContainerInner::find_module(self, address)
    }
}
