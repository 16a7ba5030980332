//! Source change invalidation tests

use std::fs;
use std::sync::Arc;

use spot_domain::{Address, Record};
use spot_infrastructure::{Container, FsResolver, InjectionRule};
use tempfile::TempDir;

use crate::test_utils::{CountingResolver, record_name};

fn write(dir: &TempDir, relative: &str, contents: &str) {
    let path = dir.path().join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn title(instance: &spot_domain::Instance) -> Option<String> {
    instance
        .downcast_ref::<Record>()
        .and_then(|record| record.property("title"))
        .and_then(|value| value.as_str())
        .map(ToString::to_string)
}

#[test]
fn test_file_change_evicts_only_that_address() {
    let dir = TempDir::new().unwrap();
    write(&dir, "controllers/posts.toml", "[properties]\ntitle = \"Posts\"\n");
    write(&dir, "controllers/comments.toml", "[properties]\ntitle = \"Comments\"\n");
    let resolver = Arc::new(FsResolver::new(dir.path()));
    let root = resolver.root().to_path_buf();
    let container = Container::new(resolver);

    let posts = container.find_controller("posts").unwrap();
    let comments = container.find_controller("comments").unwrap();
    assert_eq!(title(&posts).as_deref(), Some("Posts"));

    write(&dir, "controllers/posts.toml", "[properties]\ntitle = \"Articles\"\n");
    let changed = root.join("controllers").join("posts.toml");
    let evicted = container.file_did_change(&changed.to_string_lossy());

    assert_eq!(evicted, Some(Address::new("controller", "posts")));
    assert!(!container.is_instantiated(("controller", "posts")));
    assert!(container.is_instantiated(("controller", "comments")));

    let reloaded = container.find_controller("posts").unwrap();
    assert!(!reloaded.ptr_eq(&posts));
    assert_eq!(title(&reloaded).as_deref(), Some("Articles"));
    assert!(container.find_controller("comments").unwrap().ptr_eq(&comments));
}

#[test]
fn test_untracked_change_is_a_no_op() {
    let resolver = CountingResolver::with_kinds(&["service"]);
    let container = Container::new(resolver.clone());
    let store = container.find_instance(("service", "store")).unwrap();

    assert_eq!(container.file_did_change("/virtual/services/other.toml"), None);
    assert!(resolver.dropped().is_empty());
    assert!(container.find_instance(("service", "store")).unwrap().ptr_eq(&store));
}

#[test]
fn test_repeated_change_is_idempotent() {
    let resolver = CountingResolver::with_kinds(&["service"]);
    let container = Container::new(resolver.clone());
    container.find_instance(("service", "store")).unwrap();

    assert!(container.file_did_change("/virtual/services/store.json").is_some());
    assert_eq!(container.file_did_change("/virtual/services/store.json"), None);
    assert!(container.tracked_paths().is_empty());
}

#[test]
fn test_change_drops_resolver_cache_and_rediscovers() {
    let resolver = CountingResolver::with_kinds(&["service"]);
    let container = Container::new(resolver.clone());
    let before = container.find_instance(("service", "store")).unwrap();

    container.file_did_change("/virtual/services/store.toml");
    assert_eq!(resolver.dropped(), vec!["/virtual/services/store"]);

    let after = container.find_instance(("service", "store")).unwrap();
    assert!(!after.ptr_eq(&before));
    assert_eq!(resolver.blueprint_lookups(), 2);
    assert_eq!(record_name(&after).as_deref(), Some("store"));
}

#[test]
fn test_change_evicts_module() {
    let resolver = CountingResolver::new();
    resolver.add_module(Address::new("config", "db"), serde_json::json!({ "pool": 4 }));
    let container = Container::new(resolver.clone());

    container.find_module(("config", "db")).unwrap();
    assert_eq!(
        container.file_did_change("/virtual/configs/db.toml"),
        Some(Address::new("config", "db"))
    );
    container.find_module(("config", "db")).unwrap();

    assert_eq!(resolver.module_lookups(), 2);
}

#[test]
fn test_consumers_keep_stale_dependencies() {
    let resolver = CountingResolver::with_kinds(&["controller", "service"]);
    let container = Container::new(resolver);
    container.inject(
        ("controller", "posts"),
        InjectionRule::new(("service", "store"), "store"),
    );

    let posts = container.find_controller("posts").unwrap();
    let old_store = container.find_instance(("service", "store")).unwrap();

    container.file_did_change("/virtual/services/store.toml");
    let new_store = container.find_instance(("service", "store")).unwrap();

    // Invalidation does not cascade to consumers
    let held = posts
        .downcast_ref::<Record>()
        .and_then(|record| record.dependencies().get("store"))
        .unwrap();
    assert!(held.ptr_eq(&old_store));
    assert!(!held.ptr_eq(&new_store));
    assert!(container.find_controller("posts").unwrap().ptr_eq(&posts));
}

#[test]
fn test_dotted_directories_are_not_stripped() {
    let resolver = CountingResolver::with_kinds(&["service"]);
    let container = Container::new(resolver);
    container.find_instance(("service", "store")).unwrap();

    assert_eq!(container.file_did_change("/virtual/services.v2/store.toml"), None);
    assert!(container.is_instantiated(("service", "store")));
}
