//! Filesystem resolver
//!
//! Maps addresses onto source files below a root directory:
//!
//! ```text
//! (controller, "posts")  →  <root>/controllers/posts.{toml,json}
//! (router, MAIN)         →  <root>/router.{toml,json}
//! (service, ALL)         →  never resolves
//! ```
//!
//! The reported source path is the location without its extension, which
//! is the form the container's invalidation index is keyed by.
//!
//! A module lookup returns the parsed document. A blueprint lookup reads two
//! keys from it: `blueprint`, the name of a constructor registered in the
//! [`ConstructorCatalog`], and `properties`, passed to that constructor as
//! its first argument. Documents without a `blueprint` key build a
//! [`Record`] holding their properties.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use serde_json::{Map, Value};
use spot_domain::{Address, Blueprint, Component, Error, Name, Record, Resolution, Resolver, Result};
use tracing::{debug, trace};

use crate::config::ContainerConfig;
use crate::constants::{BLUEPRINT_KEY, DEFAULT_SOURCE_EXTENSIONS, PROPERTIES_KEY};
use crate::error_ext::ErrorContext;
use crate::resolver::catalog::ConstructorCatalog;

/// Resolver reading TOML/JSON source files below a root directory
pub struct FsResolver {
    root: PathBuf,
    extensions: Vec<String>,
    pluralize_kinds: bool,
    constructors: ConstructorCatalog,
    documents: DashMap<String, Arc<Value>>,
}

impl FsResolver {
    /// Create a resolver rooted at `root` with default settings
    ///
    /// The root is canonicalized when it exists so that source paths match
    /// the absolute paths reported by file watchers.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref();
        Self {
            root: std::fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf()),
            extensions: DEFAULT_SOURCE_EXTENSIONS
                .iter()
                .map(ToString::to_string)
                .collect(),
            pluralize_kinds: true,
            constructors: ConstructorCatalog::new(),
            documents: DashMap::new(),
        }
    }

    /// Create a resolver from container configuration
    pub fn from_config(config: &ContainerConfig) -> Result<Self> {
        let root = config
            .root_path
            .as_ref()
            .ok_or_else(|| Error::configuration("container.root_path is required"))?;
        Ok(Self::new(root)
            .with_extensions(config.source_extensions.clone())
            .with_pluralized_kinds(config.pluralize_kinds))
    }

    /// Extensions to try, in order
    #[must_use]
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Whether kind directories are pluralized (`controller` → `controllers/`)
    #[must_use]
    pub fn with_pluralized_kinds(mut self, pluralize: bool) -> Self {
        self.pluralize_kinds = pluralize;
        self
    }

    /// Share an existing constructor catalog
    #[must_use]
    pub fn with_catalog(mut self, catalog: ConstructorCatalog) -> Self {
        self.constructors = catalog;
        self
    }

    /// Register a named constructor
    #[must_use]
    pub fn with_constructor<S: Into<String>>(self, name: S, blueprint: Arc<dyn Blueprint>) -> Self {
        self.constructors.register(name, blueprint);
        self
    }

    /// Constructor catalog consulted by source documents
    pub fn constructors(&self) -> &ConstructorCatalog {
        &self.constructors
    }

    /// Root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of `address` without extension
    pub fn source_stem(&self, address: &Address) -> Result<PathBuf> {
        let kind = address.kind();
        if !is_path_segment(kind) {
            return Err(Error::not_found(address.to_string()));
        }

        match address.name() {
            Name::Named(name) if is_path_segment(name) => {
                let dir = if self.pluralize_kinds {
                    format!("{kind}s")
                } else {
                    kind.to_string()
                };
                Ok(self.root.join(dir).join(name))
            }
            Name::Main => Ok(self.root.join(kind)),
            Name::Named(_) | Name::All => Err(Error::not_found(address.to_string())),
        }
    }

    /// Number of parsed documents held
    pub fn cached_documents(&self) -> usize {
        self.documents.len()
    }

    fn load(&self, address: &Address) -> Result<(String, Arc<Value>)> {
        let stem = self.source_stem(address)?;
        let source_path = stem.to_string_lossy().into_owned();

        if let Some(document) = self.documents.get(&source_path) {
            trace!(path = %source_path, "Source cache hit");
            return Ok((source_path, document.clone()));
        }

        for extension in &self.extensions {
            let mut file = OsString::from(stem.as_os_str());
            file.push(".");
            file.push(extension);
            let file = PathBuf::from(file);
            if !file.is_file() {
                continue;
            }

            let text = std::fs::read_to_string(&file)
                .io_context(format!("Failed to read {}", file.display()))?;
            let document = Arc::new(parse_document(&source_path, extension, &text)?);
            debug!(address = %address, file = %file.display(), "Parsed source");
            self.documents.insert(source_path.clone(), document.clone());
            return Ok((source_path, document));
        }

        Err(Error::not_found(format!(
            "{address} (no {source_path}.{{{}}})",
            self.extensions.join(",")
        )))
    }
}

impl Resolver for FsResolver {
    fn name(&self) -> &str {
        "filesystem"
    }

    fn resolve_blueprint(&self, address: &Address) -> Result<Resolution<Arc<dyn Blueprint>>> {
        let (source_path, document) = self.load(address)?;

        let properties = document
            .get(PROPERTIES_KEY)
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()));

        let constructor = match document.get(BLUEPRINT_KEY) {
            None => None,
            Some(Value::String(name)) => Some(self.constructors.get(name).ok_or_else(|| {
                Error::invalid_source(
                    source_path.clone(),
                    format!("unknown constructor \"{name}\""),
                )
            })?),
            Some(other) => {
                return Err(Error::invalid_source(
                    source_path,
                    format!("\"{BLUEPRINT_KEY}\" must be a string, found {other}"),
                ));
            }
        };

        let blueprint: Arc<dyn Blueprint> = Arc::new(SourceBlueprint {
            constructor,
            properties,
        });
        Ok(Resolution::new(blueprint, source_path))
    }

    fn resolve_module(&self, address: &Address) -> Result<Resolution<Arc<Value>>> {
        let (source_path, document) = self.load(address)?;
        Ok(Resolution::new(document, source_path))
    }

    fn drop_cache(&self, source_path: &str) {
        if self.documents.remove(source_path).is_some() {
            debug!(path = %source_path, "Dropped parsed source");
        }
    }
}

impl std::fmt::Debug for FsResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FsResolver")
            .field("root", &self.root)
            .field("extensions", &self.extensions)
            .field("pluralize_kinds", &self.pluralize_kinds)
            .field("documents", &self.documents.len())
            .finish_non_exhaustive()
    }
}

/// Blueprint read from a source document
struct SourceBlueprint {
    constructor: Option<Arc<dyn Blueprint>>,
    properties: Value,
}

impl Blueprint for SourceBlueprint {
    fn instantiate(&self, args: &[Value]) -> Result<Box<dyn Component>> {
        match &self.constructor {
            Some(constructor) => {
                let mut full = Vec::with_capacity(args.len() + 1);
                full.push(self.properties.clone());
                full.extend_from_slice(args);
                constructor.instantiate(&full)
            }
            None => Ok(Box::new(Record::new(self.properties.clone()))),
        }
    }
}

fn parse_document(source_path: &str, extension: &str, text: &str) -> Result<Value> {
    match extension {
        "toml" => toml::from_str::<Value>(text).map_err(|e| {
            Error::invalid_source_with_source(source_path, "invalid TOML", e)
        }),
        "json" => serde_json::from_str::<Value>(text).map_err(|e| {
            Error::invalid_source_with_source(source_path, "invalid JSON", e)
        }),
        other => Err(Error::invalid_source(
            source_path,
            format!("unsupported source extension \"{other}\""),
        )),
    }
}

fn is_path_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(['/', '\\'])
}
