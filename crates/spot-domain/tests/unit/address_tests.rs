//! Address and name tests

use std::collections::HashSet;

use spot_domain::{ALL, Address, MAIN, Name};

#[test]
fn test_named_address_display() {
    let address = Address::new("controller", "posts");

    assert_eq!(address.kind(), "controller");
    assert_eq!(address.name(), &Name::from("posts"));
    assert_eq!(address.to_string(), "controller:posts");
}

#[test]
fn test_sentinel_names_display() {
    assert_eq!(Address::all("service").to_string(), "service:*");
    assert_eq!(Address::main("router").to_string(), "router:@main");
}

#[test]
fn test_all_is_distinct_from_any_string() {
    // The sentinels never collide with a user-chosen name
    assert_ne!(Name::from("*"), ALL);
    assert_ne!(Name::from("@main"), MAIN);
    assert_ne!(Address::new("service", "*"), Address::all("service"));
}

#[test]
fn test_kind_wide_address() {
    let address = Address::new("controller", "posts");

    assert!(!address.is_kind_wide());
    assert_eq!(address.kind_wide(), Address::all("controller"));
    assert!(address.kind_wide().is_kind_wide());
}

#[test]
fn test_address_from_tuple() {
    let address: Address = ("service", "store").into();
    assert_eq!(address, Address::new("service", "store"));

    let main: Address = ("router", MAIN).into();
    assert_eq!(main, Address::main("router"));
}

#[test]
fn test_addresses_hash_by_kind_and_name() {
    let mut seen = HashSet::new();
    seen.insert(Address::new("controller", "posts"));
    seen.insert(Address::new("service", "posts"));
    seen.insert(Address::new("controller", "posts"));

    assert_eq!(seen.len(), 2);
}

#[test]
fn test_name_serde() {
    let json = serde_json::to_string(&Address::new("service", "store")).unwrap();
    let back: Address = serde_json::from_str(&json).unwrap();

    assert_eq!(back, Address::new("service", "store"));
}

#[test]
fn test_generated_names_round_trip_through_display() {
    let name = uuid::Uuid::new_v4().to_string();
    let address = Address::new("session", name.as_str());

    assert_eq!(address.name().as_str(), Some(name.as_str()));
    assert_eq!(address.to_string(), format!("session:{name}"));
}
