//! Infrastructure constants

// ============================================================================
// Configuration
// ============================================================================

/// Environment variable prefix for configuration overrides
pub const CONFIG_ENV_PREFIX: &str = "SPOT";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "spot.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "spot";

// ============================================================================
// Logging
// ============================================================================

/// Environment variable overriding the configured log filter
pub const LOG_ENV_VAR: &str = "SPOT_LOG";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Rolling log file prefix when the configured path has no stem
pub const DEFAULT_LOG_FILE_PREFIX: &str = "spot";

// ============================================================================
// Sources
// ============================================================================

/// Extensions tried, in order, when locating a source file
pub const DEFAULT_SOURCE_EXTENSIONS: &[&str] = &["toml", "json"];

/// Source document key naming the constructor to build with
pub const BLUEPRINT_KEY: &str = "blueprint";

/// Source document key holding constructor properties
pub const PROPERTIES_KEY: &str = "properties";

// ============================================================================
// Watcher
// ============================================================================

/// Capacity of the watcher event broadcast channel
pub const WATCH_EVENT_CAPACITY: usize = 64;
