//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for spot
#[derive(Error, Debug)]
pub enum Error {
    /// No registered and no discoverable blueprint or module exists for an address
    #[error("Not found: {resource}")]
    NotFound {
        /// The resource that was not found
        resource: String,
    },

    /// An injection rule names its own consumer as the provider
    #[error(
        "Circular injection detected: injection \"{annotation}\" attempted to inject {name} {kind} into itself."
    )]
    CircularInjection {
        /// Annotation of the offending rule
        annotation: String,
        /// Kind of the consumer
        kind: String,
        /// Name of the consumer
        name: String,
    },

    /// A multi-hop injection cycle was entered while resolving instances
    #[error("Circular injection detected while resolving {}", chain.join(" -> "))]
    DependencyCycle {
        /// Addresses on the resolution path, ending with the repeated one
        chain: Vec<String>,
    },

    /// A component was asked to accept a dependency it has no field for
    #[error("Unknown injection field \"{field}\" on {component}")]
    UnknownField {
        /// Field the rule tried to set
        field: String,
        /// Component type name
        component: String,
    },

    /// A blueprint failed to produce an instance
    #[error("Failed to instantiate {address}: {message}")]
    Instantiation {
        /// Address being instantiated
        address: String,
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A source artifact exists but could not be read as a module or blueprint
    #[error("Invalid source {path}: {message}")]
    InvalidSource {
        /// Source path (extension stripped)
        path: String,
        /// Description of the problem
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Source watcher error
    #[error("Watcher error: {message}")]
    Watcher {
        /// Description of the watcher error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Infrastructure operation error
    #[error("Infrastructure error: {message}")]
    Infrastructure {
        /// Description of the infrastructure error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Lookup error creation methods
impl Error {
    /// Create a not found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a circular injection error for a rule targeting its own consumer
    pub fn circular_injection<A, K, N>(annotation: A, kind: K, name: N) -> Self
    where
        A: Into<String>,
        K: Into<String>,
        N: ToString,
    {
        Self::CircularInjection {
            annotation: annotation.into(),
            kind: kind.into(),
            name: name.to_string(),
        }
    }

    /// Create a dependency cycle error from the resolution chain
    pub fn dependency_cycle<I, S>(chain: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        Self::DependencyCycle {
            chain: chain.into_iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Create an unknown field error
    pub fn unknown_field<F: Into<String>, C: Into<String>>(field: F, component: C) -> Self {
        Self::UnknownField {
            field: field.into(),
            component: component.into(),
        }
    }

    /// Create an instantiation error
    pub fn instantiation<A: ToString, S: Into<String>>(address: A, message: S) -> Self {
        Self::Instantiation {
            address: address.to_string(),
            message: message.into(),
            source: None,
        }
    }

    /// Create an instantiation error with source
    pub fn instantiation_with_source<A, S, E>(address: A, message: S, source: E) -> Self
    where
        A: ToString,
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Instantiation {
            address: address.to_string(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid source error
    pub fn invalid_source<P: Into<String>, S: Into<String>>(path: P, message: S) -> Self {
        Self::InvalidSource {
            path: path.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create an invalid source error with source
    pub fn invalid_source_with_source<P, S, E>(path: P, message: S, source: E) -> Self
    where
        P: Into<String>,
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::InvalidSource {
            path: path.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Infrastructure error creation methods
impl Error {
    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a watcher error with source
    pub fn watcher<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Watcher {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl Error {
    /// Whether this error reports a missing address
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether this error reports a direct or transitive injection cycle
    pub fn is_circular(&self) -> bool {
        matches!(
            self,
            Self::CircularInjection { .. } | Self::DependencyCycle { .. }
        )
    }
}
