//! Error Tests

use spot_domain::{Address, Error, MAIN};

#[test]
fn test_circular_injection_message() {
    let err = Error::circular_injection("an injection", "controller", "posts");

    assert_eq!(
        err.to_string(),
        "Circular injection detected: injection \"an injection\" attempted to inject posts controller into itself."
    );
    assert!(err.is_circular());
}

#[test]
fn test_circular_injection_with_main_name() {
    let address = Address::main("router");
    let err = Error::circular_injection("router wiring", address.kind(), address.name());

    assert!(err.to_string().contains("inject @main router into itself"));
    assert_eq!(address.name(), &MAIN);
}

#[test]
fn test_dependency_cycle_chain() {
    let err = Error::dependency_cycle(["service:a", "service:b", "service:a"]);

    assert_eq!(
        err.to_string(),
        "Circular injection detected while resolving service:a -> service:b -> service:a"
    );
    assert!(err.is_circular());
    assert!(!err.is_not_found());
}

#[test]
fn test_not_found() {
    let err = Error::not_found(Address::new("controller", "missing").to_string());

    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Not found: controller:missing");
}

#[test]
fn test_error_sources() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err = Error::invalid_source_with_source("/app/controllers/posts", "unreadable", io);

    assert!(std::error::Error::source(&err).is_some());
    assert!(err.to_string().contains("/app/controllers/posts"));
}

#[test]
fn test_json_error_conversion() {
    let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: Error = parse.into();

    assert!(matches!(err, Error::Json { .. }));
}
