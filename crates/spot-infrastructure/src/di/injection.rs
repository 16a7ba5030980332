//! Injection rules and their registry

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use spot_domain::Address;
use spot_domain::constants::DEFAULT_INJECTION_ANNOTATION;

/// "When the consumer is instantiated, set `attach_as` to the provider"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjectionRule {
    provider: Address,
    #[serde(rename = "as")]
    attach_as: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    annotation: Option<String>,
}

impl InjectionRule {
    /// Inject the instance at `provider` into field `attach_as`
    pub fn new<A: Into<Address>, F: Into<String>>(provider: A, attach_as: F) -> Self {
        Self {
            provider: provider.into(),
            attach_as: attach_as.into(),
            annotation: None,
        }
    }

    /// Attach a diagnostic annotation
    #[must_use]
    pub fn with_annotation<S: Into<String>>(mut self, annotation: S) -> Self {
        self.annotation = Some(annotation.into());
        self
    }

    /// Provider address
    pub fn provider(&self) -> &Address {
        &self.provider
    }

    /// Field the provider is attached as
    pub fn attach_as(&self) -> &str {
        &self.attach_as
    }

    /// Diagnostic annotation, if any
    pub fn annotation(&self) -> Option<&str> {
        self.annotation.as_deref()
    }

    /// Annotation used in error messages
    pub fn label(&self) -> &str {
        self.annotation().unwrap_or(DEFAULT_INJECTION_ANNOTATION)
    }
}

/// Consumer address → accumulated injection rules
///
/// Rules keyed by `(kind, ALL)` apply to every name under that kind.
#[derive(Debug, Default)]
pub struct InjectionRegistry {
    rules: DashMap<Address, Vec<InjectionRule>>,
}

impl InjectionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `rule` for `consumer`
    pub fn add(&self, consumer: Address, rule: InjectionRule) {
        self.rules.entry(consumer).or_default().push(rule);
    }

    /// Rules keyed exactly to `consumer`
    pub fn exact(&self, consumer: &Address) -> Vec<InjectionRule> {
        self.rules
            .get(consumer)
            .map(|rules| rules.clone())
            .unwrap_or_default()
    }

    /// Exact rules followed by the kind-wide rules of `consumer`'s kind
    ///
    /// A kind-wide rule is skipped when an exact rule already sets the same
    /// field.
    pub fn effective(&self, consumer: &Address) -> Vec<InjectionRule> {
        let mut rules = self.exact(consumer);
        if !consumer.is_kind_wide() {
            let kind_wide: Vec<InjectionRule> = self
                .exact(&consumer.kind_wide())
                .into_iter()
                .filter(|wide| rules.iter().all(|rule| rule.attach_as() != wide.attach_as()))
                .collect();
            rules.extend(kind_wide);
        }
        rules
    }

    /// Total number of rules
    pub fn len(&self) -> usize {
        self.rules.iter().map(|rules| rules.len()).sum()
    }

    /// Whether no rules have been added
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
