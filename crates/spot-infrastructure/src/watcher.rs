//! Source file watcher for live reload
//!
//! Forwards filesystem change notifications under the source root to
//! [`Container::file_did_change`] and publishes what happened on a
//! broadcast channel.
//!
//! Invalidation is address-local: a consumer that had the changed instance
//! injected keeps it. Subscribers that need consumers rebuilt can react to
//! [`SourceWatchEvent::Invalidated`] themselves.

use std::path::{Path, PathBuf};

use notify::event::ModifyKind;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use spot_domain::{Address, Result};
use tokio::sync::broadcast::{self, Receiver, Sender};
use tracing::{debug, info, warn};

use crate::constants::WATCH_EVENT_CAPACITY;
use crate::di::Container;
use crate::error_ext::ErrorContext;

/// Source watch event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceWatchEvent {
    /// A tracked source changed and its address was evicted
    Invalidated {
        /// Changed file
        path: PathBuf,
        /// Evicted address
        address: Address,
    },
    /// A file changed that nothing was built from
    Ignored {
        /// Changed file
        path: PathBuf,
    },
    /// The underlying watcher reported an error
    Failed(String),
}

/// Watches a source root and invalidates the container on change
pub struct SourceWatcher {
    root: PathBuf,
    events: Sender<SourceWatchEvent>,
    _watcher: RecommendedWatcher,
}

impl SourceWatcher {
    /// Start watching `root` on behalf of `container`
    ///
    /// The root is canonicalized so reported paths match the ones recorded
    /// by [`crate::FsResolver`].
    pub fn new<P: AsRef<Path>>(root: P, container: Container, recursive: bool) -> Result<Self> {
        let root = std::fs::canonicalize(root.as_ref())
            .io_context(format!("Failed to resolve {}", root.as_ref().display()))?;
        let (events, _) = broadcast::channel(WATCH_EVENT_CAPACITY);

        let sender = events.clone();
        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    handle_event(&container, &event, &sender);
                }
                Err(e) => {
                    warn!("Source watch error: {}", e);
                    let _ = sender.send(SourceWatchEvent::Failed(e.to_string()));
                }
            },
            Config::default(),
        )
        .watcher_context("Failed to create source watcher")?;

        let mode = if recursive {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        watcher
            .watch(&root, mode)
            .watcher_context(format!("Failed to watch {}", root.display()))?;

        info!(root = %root.display(), recursive, "Watching sources");
        Ok(Self {
            root,
            events,
            _watcher: watcher,
        })
    }

    /// Subscribe to watch events
    pub fn subscribe(&self) -> Receiver<SourceWatchEvent> {
        self.events.subscribe()
    }

    /// Watched root
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl std::fmt::Debug for SourceWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceWatcher")
            .field("root", &self.root)
            .field("subscribers", &self.events.receiver_count())
            .finish_non_exhaustive()
    }
}

/// Whether `event` can mean a source's contents changed
pub fn should_invalidate(event: &Event) -> bool {
    matches!(
        event.kind,
        EventKind::Create(_)
            | EventKind::Remove(_)
            | EventKind::Modify(ModifyKind::Data(_) | ModifyKind::Name(_) | ModifyKind::Any)
    )
}

/// Apply `event` to `container`, returning how many addresses were evicted
pub fn handle_event(
    container: &Container,
    event: &Event,
    events: &Sender<SourceWatchEvent>,
) -> usize {
    if !should_invalidate(event) {
        return 0;
    }

    let mut invalidated = 0;
    for path in &event.paths {
        let notification = match container.file_did_change(&path.to_string_lossy()) {
            Some(address) => {
                invalidated += 1;
                SourceWatchEvent::Invalidated {
                    path: path.clone(),
                    address,
                }
            }
            None => {
                debug!(path = %path.display(), "Change to untracked source");
                SourceWatchEvent::Ignored { path: path.clone() }
            }
        };
        let _ = events.send(notification);
    }
    invalidated
}
