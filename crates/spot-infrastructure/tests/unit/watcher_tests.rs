//! Source watcher tests

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use notify::event::{AccessKind, CreateKind, DataChange, MetadataKind, ModifyKind};
use notify::{Event, EventKind};
use spot_domain::Address;
use spot_infrastructure::watcher::{handle_event, should_invalidate};
use spot_infrastructure::{Container, FsResolver, SourceWatchEvent, SourceWatcher};
use tempfile::TempDir;
use tokio::sync::broadcast;

use crate::test_utils::CountingResolver;

fn data_change(path: &str) -> Event {
    Event::new(EventKind::Modify(ModifyKind::Data(DataChange::Any))).add_path(PathBuf::from(path))
}

#[test]
fn test_should_invalidate_content_changes_only() {
    assert!(should_invalidate(&data_change("/a.toml")));
    assert!(should_invalidate(&Event::new(EventKind::Create(CreateKind::File))));
    assert!(!should_invalidate(&Event::new(EventKind::Access(
        AccessKind::Any
    ))));
    assert!(!should_invalidate(&Event::new(EventKind::Modify(
        ModifyKind::Metadata(MetadataKind::Any)
    ))));
}

#[test]
fn test_handle_event_invalidates_tracked_source() {
    let resolver = CountingResolver::with_kinds(&["controller"]);
    let container = Container::new(resolver);
    container.find_controller("posts").unwrap();
    let (tx, mut rx) = broadcast::channel(8);

    let evicted = handle_event(
        &container,
        &data_change("/virtual/controllers/posts.toml"),
        &tx,
    );

    assert_eq!(evicted, 1);
    assert!(!container.is_instantiated(("controller", "posts")));
    assert_eq!(
        rx.try_recv().unwrap(),
        SourceWatchEvent::Invalidated {
            path: PathBuf::from("/virtual/controllers/posts.toml"),
            address: Address::new("controller", "posts"),
        }
    );
}

#[test]
fn test_handle_event_reports_untracked_paths() {
    let container = Container::new(CountingResolver::new());
    let (tx, mut rx) = broadcast::channel(8);

    let evicted = handle_event(&container, &data_change("/virtual/readme.md"), &tx);

    assert_eq!(evicted, 0);
    assert!(matches!(rx.try_recv().unwrap(), SourceWatchEvent::Ignored { .. }));
}

#[test]
fn test_handle_event_skips_metadata_changes() {
    let resolver = CountingResolver::with_kinds(&["controller"]);
    let container = Container::new(resolver);
    container.find_controller("posts").unwrap();
    let (tx, mut rx) = broadcast::channel(8);
    let event = Event::new(EventKind::Modify(ModifyKind::Metadata(MetadataKind::Any)))
        .add_path(PathBuf::from("/virtual/controllers/posts.toml"));

    assert_eq!(handle_event(&container, &event, &tx), 0);
    assert!(container.is_instantiated(("controller", "posts")));
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_watcher_starts_on_existing_root() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("controllers")).unwrap();
    let container = Container::new(Arc::new(FsResolver::new(dir.path())));

    let watcher = SourceWatcher::new(dir.path(), container, true).unwrap();

    assert_eq!(watcher.root(), fs::canonicalize(dir.path()).unwrap());
    let _events = watcher.subscribe();
}

#[test]
fn test_watcher_rejects_missing_root() {
    let dir = TempDir::new().unwrap();
    let container = Container::new(CountingResolver::new());

    assert!(SourceWatcher::new(dir.path().join("missing"), container, false).is_err());
}
