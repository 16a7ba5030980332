//! Application bootstrap
//!
//! Builds the resolver, the container and, when enabled, the source watcher
//! from an [`AppConfig`]. The router and controllers themselves are ordinary
//! container entries: `("router", MAIN)` and `("controller", name)`.

use std::path::PathBuf;
use std::sync::Arc;

use spot_domain::constants::ROUTER_KIND;
use spot_domain::{Address, Blueprint, Error, Instance, Resolver, Result};
use spot_infrastructure::config::loader::validate_app_config;
use spot_infrastructure::config::{AppConfig, ConfigLoader};
use spot_infrastructure::logging::init_logging;
use spot_infrastructure::{
    ConstructorCatalog, Container, FsResolver, NullResolver, SourceWatchEvent, SourceWatcher,
};
use tokio::sync::broadcast::Receiver;
use tracing::info;

/// A booted container together with its configuration and watcher
#[derive(Debug)]
pub struct Application {
    config: AppConfig,
    container: Container,
    watcher: Option<SourceWatcher>,
}

impl Application {
    /// Start building an application
    pub fn builder() -> ApplicationBuilder {
        ApplicationBuilder::new()
    }

    /// The application's container
    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Effective configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Controller instance by name
    pub fn find_controller(&self, name: &str) -> Result<Instance> {
        self.container.find_controller(name)
    }

    /// The main router instance, `("router", MAIN)`
    pub fn router(&self) -> Result<Instance> {
        self.container.find_instance(Address::main(ROUTER_KIND))
    }

    /// Whether sources are being watched
    pub fn is_watching(&self) -> bool {
        self.watcher.is_some()
    }

    /// Subscribe to source change events, if watching
    pub fn subscribe_changes(&self) -> Option<Receiver<SourceWatchEvent>> {
        self.watcher.as_ref().map(SourceWatcher::subscribe)
    }
}

/// Builder for [`Application`]
#[derive(Default)]
pub struct ApplicationBuilder {
    config: Option<AppConfig>,
    config_path: Option<PathBuf>,
    resolver: Option<Arc<dyn Resolver>>,
    constructors: ConstructorCatalog,
    logging: bool,
}

impl ApplicationBuilder {
    /// Create a builder with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `config` instead of loading one
    #[must_use]
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Load configuration from `path` (plus environment) at boot
    #[must_use]
    pub fn with_config_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Discover through `resolver` instead of the configured source root
    #[must_use]
    pub fn with_resolver(mut self, resolver: Arc<dyn Resolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Register a constructor that source files can name
    ///
    /// Boot fails if constructors are registered but sources are not read
    /// from `container.root_path`.
    #[must_use]
    pub fn with_constructor<S: Into<String>>(self, name: S, blueprint: Arc<dyn Blueprint>) -> Self {
        self.constructors.register(name, blueprint);
        self
    }

    /// Install the global tracing subscriber during boot
    #[must_use]
    pub fn with_logging(mut self) -> Self {
        self.logging = true;
        self
    }

    /// Build the application
    pub fn boot(self) -> Result<Application> {
        let config = match (self.config, self.config_path) {
            (Some(config), _) => {
                validate_app_config(&config)?;
                config
            }
            (None, Some(path)) => ConfigLoader::new().with_config_path(path).load()?,
            (None, None) => AppConfig::default(),
        };

        if self.logging {
            init_logging(&config.logging)?;
        }

        let discovers_sources = self.resolver.is_none() && config.container.root_path.is_some();
        if !discovers_sources && !self.constructors.is_empty() {
            return Err(Error::configuration(format!(
                "Constructors {:?} need a filesystem resolver; set container.root_path and drop with_resolver",
                self.constructors.names()
            )));
        }

        let resolver: Arc<dyn Resolver> = match self.resolver {
            Some(resolver) => resolver,
            None if discovers_sources => Arc::new(
                FsResolver::from_config(&config.container)?.with_catalog(self.constructors),
            ),
            None => Arc::new(NullResolver::new()),
        };

        let container = Container::new(resolver);
        for injection in &config.container.injections {
            container.inject(injection.consumer(), injection.rule());
        }

        let watcher = if config.watcher.enabled {
            let root = config.container.root_path.as_ref().ok_or_else(|| {
                Error::configuration("Watcher enabled but container.root_path is not set")
            })?;
            Some(SourceWatcher::new(
                root,
                container.clone(),
                config.watcher.recursive,
            )?)
        } else {
            None
        };

        info!(
            resolver = container.resolver().name(),
            injections = config.container.injections.len(),
            watching = watcher.is_some(),
            "Application booted"
        );

        Ok(Application {
            config,
            container,
            watcher,
        })
    }
}
