//! Configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use spot_domain::{Address, Name};

use crate::constants::{DEFAULT_LOG_LEVEL, DEFAULT_SOURCE_EXTENSIONS};
use crate::di::InjectionRule;

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Container and source discovery
    pub container: ContainerConfig,
    /// Logging output
    pub logging: LoggingConfig,
    /// Source watching
    pub watcher: WatcherConfig,
}

/// Container and source discovery settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// Directory sources are discovered under; no discovery when unset
    pub root_path: Option<PathBuf>,
    /// Source file extensions, tried in order
    pub source_extensions: Vec<String>,
    /// Look up `controller` sources under `controllers/`
    pub pluralize_kinds: bool,
    /// Injection rules applied at boot
    pub injections: Vec<InjectionConfig>,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            root_path: None,
            source_extensions: DEFAULT_SOURCE_EXTENSIONS
                .iter()
                .map(ToString::to_string)
                .collect(),
            pluralize_kinds: true,
            injections: Vec::new(),
        }
    }
}

/// Injection rule declared in configuration
///
/// ```toml
/// [[container.injections]]
/// kind = "controller"          # omit `name` to target every controller
/// provider_kind = "service"
/// provider_name = "store"
/// as = "store"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjectionConfig {
    /// Consumer kind
    pub kind: String,
    /// Consumer name; kind-wide when absent
    #[serde(default)]
    pub name: Option<String>,
    /// Provider kind
    pub provider_kind: String,
    /// Provider name
    pub provider_name: String,
    /// Field the provider is attached as
    #[serde(rename = "as")]
    pub attach_as: String,
    /// Diagnostic annotation
    #[serde(default)]
    pub annotation: Option<String>,
}

impl InjectionConfig {
    /// Consumer address
    pub fn consumer(&self) -> Address {
        match &self.name {
            Some(name) => Address::new(self.kind.clone(), name.clone()),
            None => Address::new(self.kind.clone(), Name::All),
        }
    }

    /// Rule to register for [`InjectionConfig::consumer`]
    pub fn rule(&self) -> InjectionRule {
        let rule = InjectionRule::new(
            Address::new(self.provider_kind.clone(), self.provider_name.clone()),
            self.attach_as.clone(),
        );
        match &self.annotation {
            Some(annotation) => rule.with_annotation(annotation.clone()),
            None => rule,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (`trace`, `debug`, `info`, `warn`, `error`)
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json_format: bool,
    /// Also write to a daily-rolling file at this path
    pub file_output: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
            file_output: None,
        }
    }
}

/// Source watching settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatcherConfig {
    /// Watch the source root and invalidate on change
    pub enabled: bool,
    /// Watch subdirectories too
    pub recursive: bool,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            recursive: true,
        }
    }
}
