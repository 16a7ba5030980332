//! Factory composer
//!
//! Wraps a raw blueprint so that every instantiation also resolves and
//! attaches the injected dependencies of its address. Composition runs once
//! per address; the result is what the blueprint cache stores.

use std::sync::{Arc, Weak};

use serde_json::Value;
use spot_domain::{Address, Blueprint, Component, ContainerLookup, Error, Result};
use tracing::{debug, trace};

use crate::di::injection::InjectionRule;

/// Blueprint decorated with injection steps
pub struct ComposedBlueprint {
    address: Address,
    raw: Arc<dyn Blueprint>,
    rules: Vec<InjectionRule>,
    container: Weak<dyn ContainerLookup>,
}

impl ComposedBlueprint {
    /// Address the blueprint was composed for
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Injection steps, in application order
    pub fn rules(&self) -> &[InjectionRule] {
        &self.rules
    }
}

impl Blueprint for ComposedBlueprint {
    fn instantiate(&self, args: &[Value]) -> Result<Box<dyn Component>> {
        let container = self.container.upgrade().ok_or_else(|| {
            Error::internal(format!(
                "Container dropped before {} could be wired",
                self.address
            ))
        })?;

        let mut component = self.raw.instantiate(args)?;
        for rule in &self.rules {
            let dependency = container.find_instance(rule.provider())?;
            trace!(
                consumer = %self.address,
                provider = %rule.provider(),
                field = rule.attach_as(),
                "Injecting dependency"
            );
            component.inject(rule.attach_as(), dependency)?;
        }
        Ok(component)
    }
}

/// Decorate `raw` with the injection `rules` that apply to `address`
///
/// Returns `raw` untouched when there are no rules. Fails when a rule names
/// `address` itself as its provider; only that direct case is checked here,
/// longer cycles surface at instantiation.
pub fn compose(
    address: &Address,
    raw: Arc<dyn Blueprint>,
    rules: Vec<InjectionRule>,
    container: Weak<dyn ContainerLookup>,
) -> Result<Arc<dyn Blueprint>> {
    if rules.is_empty() {
        return Ok(raw);
    }

    if let Some(rule) = rules.iter().find(|rule| rule.provider() == address) {
        return Err(Error::circular_injection(
            rule.label(),
            address.kind(),
            address.name(),
        ));
    }

    debug!(address = %address, injections = rules.len(), "Composed blueprint with injections");
    Ok(Arc::new(ComposedBlueprint {
        address: address.clone(),
        raw,
        rules,
        container,
    }))
}
