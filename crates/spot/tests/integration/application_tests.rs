//! Application boot tests

use std::fs;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::Value;
use spot::domain::{Component, Dependencies, Instance, Record, Result, from_fn, of_default};
use spot::infrastructure::config::{AppConfig, InjectionConfig};
use spot::infrastructure::{NullResolver, SourceWatchEvent};
use spot::{Address, Application, MAIN, meta_for};
use tempfile::TempDir;

#[derive(Default)]
struct Controller {
    title: String,
    deps: Dependencies,
}

impl Component for Controller {
    fn inject(&mut self, field: &str, dependency: Instance) -> Result<()> {
        self.deps.set(field, dependency);
        Ok(())
    }
}

fn controller_blueprint() -> Arc<dyn spot::domain::Blueprint> {
    from_fn(|args| {
        let title = args
            .first()
            .and_then(|props| props.get("title"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        Ok(Controller {
            title,
            ..Controller::default()
        })
    })
}

fn app_root() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("controllers")).unwrap();
    fs::create_dir_all(dir.path().join("services")).unwrap();
    fs::write(
        dir.path().join("controllers/posts.toml"),
        "blueprint = \"controller\"\n[properties]\ntitle = \"Posts\"\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("services/session.json"),
        r#"{ "properties": { "ttl": 60 } }"#,
    )
    .unwrap();
    fs::write(dir.path().join("router.toml"), "[properties]\nprefix = \"/\"\n").unwrap();
    dir
}

fn config_for(root: &TempDir) -> AppConfig {
    let mut config = AppConfig::default();
    config.container.root_path = Some(root.path().to_path_buf());
    config.container.injections.push(InjectionConfig {
        kind: "controller".to_string(),
        name: None,
        provider_kind: "service".to_string(),
        provider_name: "session".to_string(),
        attach_as: "session".to_string(),
        annotation: Some("session for controllers".to_string()),
    });
    config
}

#[test]
fn test_default_boot_has_no_sources() {
    let app = Application::builder().boot().unwrap();

    assert_eq!(app.container().resolver().name(), "null");
    assert!(!app.is_watching());
    assert!(app.subscribe_changes().is_none());
    assert!(app.find_controller("posts").unwrap_err().is_not_found());
}

#[test]
fn test_boot_discovers_sources_and_applies_configured_injections() {
    let root = app_root();
    let app = Application::builder()
        .with_config(config_for(&root))
        .with_constructor("controller", controller_blueprint())
        .boot()
        .unwrap();

    let posts = app.find_controller("posts").unwrap();
    let controller = posts.downcast_ref::<Controller>().unwrap();
    let session = app
        .container()
        .find_instance(("service", "session"))
        .unwrap();

    assert_eq!(controller.title, "Posts");
    assert!(controller.deps.get("session").unwrap().ptr_eq(&session));
    assert_eq!(
        session.downcast_ref::<Record>().unwrap().property("ttl"),
        Some(&serde_json::json!(60))
    );
}

#[test]
fn test_router_is_main_instance() {
    let root = app_root();
    let app = Application::builder()
        .with_config(config_for(&root))
        .boot()
        .unwrap();

    let router = app.router().unwrap();

    assert_eq!(meta_for(&router).name(), &MAIN);
    assert!(router.ptr_eq(&app.container().find_instance(Address::main("router")).unwrap()));
}

#[test]
fn test_explicit_resolver_overrides_root() {
    let root = app_root();
    let app = Application::builder()
        .with_config(config_for(&root))
        .with_resolver(Arc::new(NullResolver::new()))
        .boot()
        .unwrap();

    assert!(app.find_controller("posts").unwrap_err().is_not_found());

    app.container()
        .register_factory("controller", "posts", of_default::<Controller>());
    app.container()
        .register_factory("service", "session", of_default::<Controller>());
    assert!(app.find_controller("posts").is_ok());
}

#[test]
fn test_constructors_without_source_root_fail_boot() {
    let err = Application::builder()
        .with_constructor("controller", controller_blueprint())
        .boot()
        .unwrap_err();
    assert!(err.to_string().contains("controller"));

    let root = app_root();
    let overridden = Application::builder()
        .with_config(config_for(&root))
        .with_resolver(Arc::new(NullResolver::new()))
        .with_constructor("controller", controller_blueprint())
        .boot();
    assert!(overridden.is_err());
}

#[test]
fn test_boot_from_config_file() {
    let root = app_root();
    let path = root.path().join("spot.toml");
    fs::write(
        &path,
        format!(
            "[container]\nroot_path = \"{}\"\n\n[logging]\nlevel = \"debug\"\n",
            root.path().display()
        ),
    )
    .unwrap();

    let app = Application::builder()
        .with_config_file(&path)
        .boot()
        .unwrap();

    assert_eq!(app.config().logging.level, "debug");
    assert_eq!(app.container().resolver().name(), "filesystem");
    assert!(app.router().is_ok());
}

#[test]
fn test_invalid_config_fails_boot() {
    let mut config = AppConfig::default();
    config.logging.level = "chatty".to_string();

    assert!(Application::builder().with_config(config).boot().is_err());
}

#[test]
fn test_watching_app_reports_invalidations() {
    let root = app_root();
    let mut config = config_for(&root);
    config.watcher.enabled = true;
    let app = Application::builder()
        .with_config(config)
        .with_constructor("controller", controller_blueprint())
        .boot()
        .unwrap();
    let mut changes = app.subscribe_changes().unwrap();

    let before = app.find_controller("posts").unwrap();
    fs::write(
        root.path().join("controllers/posts.toml"),
        "blueprint = \"controller\"\n[properties]\ntitle = \"Articles\"\n",
    )
    .unwrap();

    let deadline = Instant::now() + Duration::from_secs(5);
    let mut invalidated = false;
    while Instant::now() < deadline && !invalidated {
        match changes.try_recv() {
            Ok(SourceWatchEvent::Invalidated { address, .. }) => {
                invalidated = address == Address::new("controller", "posts");
            }
            Ok(_) => {}
            Err(_) => std::thread::sleep(Duration::from_millis(20)),
        }
    }

    assert!(invalidated, "no invalidation observed");
    let after = app.find_controller("posts").unwrap();
    assert!(!after.ptr_eq(&before));
    assert_eq!(after.downcast_ref::<Controller>().unwrap().title, "Articles");
}
