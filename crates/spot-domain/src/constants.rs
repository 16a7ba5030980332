//! Domain constants

/// Kind used by [`crate::ports::ContainerLookup::find_controller`]
pub const CONTROLLER_KIND: &str = "controller";

/// Kind of the application router, looked up under [`crate::MAIN`]
pub const ROUTER_KIND: &str = "router";

/// Annotation reported for injections declared without one
pub const DEFAULT_INJECTION_ANNOTATION: &str = "an injection";

/// Display form of the kind-wide sentinel name
pub const ALL_NAME_DISPLAY: &str = "*";

/// Display form of the main-object token
pub const MAIN_NAME_DISPLAY: &str = "@main";
