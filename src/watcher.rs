//! Config file watching
//!
//! Uses the `notify` crate with debouncing. The watcher runs on notify's own
//! thread; the daemon polls it between activations.

use notify_debouncer_mini::{new_debouncer, DebouncedEvent, DebouncedEventKind, Debouncer};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

type DebounceResult = Result<Vec<DebouncedEvent>, notify::Error>;

/// Watches a single file for changes
pub struct ConfigWatcher {
    _debouncer: Debouncer<notify::RecommendedWatcher>,
    rx: Receiver<DebounceResult>,
    path: PathBuf,
}

impl ConfigWatcher {
    /// Start watching `path`.
    ///
    /// The parent directory is watched rather than the file itself so that
    /// editors which save by rename are still noticed.
    pub fn new(path: &Path) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();
        let mut debouncer = new_debouncer(Duration::from_millis(200), tx)?;

        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        debouncer
            .watcher()
            .watch(dir, notify::RecursiveMode::NonRecursive)?;

        tracing::info!("Watching {} for changes", path.display());

        Ok(Self {
            _debouncer: debouncer,
            rx,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Drain pending events; true if the watched file changed (non-blocking)
    pub fn poll_changed(&self) -> bool {
        let mut changed = false;

        while let Ok(result) = self.rx.try_recv() {
            match result {
                Ok(events) => {
                    for event in events {
                        if matches!(event.kind, DebouncedEventKind::AnyContinuous) {
                            continue;
                        }
                        if self.is_watched(&event.path) {
                            changed = true;
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!("Config watcher error: {:?}", e);
                }
            }
        }

        if changed {
            tracing::debug!("Config file {} changed", self.path.display());
        }
        changed
    }

    fn is_watched(&self, path: &Path) -> bool {
        if path == self.path {
            return true;
        }
        // Events may carry canonicalized paths
        match (path.canonicalize(), self.path.canonicalize()) {
            (Ok(a), Ok(b)) => a == b,
            _ => path.file_name() == self.path.file_name(),
        }
    }
}
