//! Loading RON data directories and watching them for edits.
//!
//! Settings, levels and player definitions all live as `.ron` files under
//! `data/`. `load_ron_files` reads a whole directory into typed values and
//! `setup_ron_watcher` raises a shared flag whenever something in the
//! directory is modified, so systems can reload during play.

use bevy::log::warn;
use bevy::prelude::Resource;
use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// File-watcher resource for RON hot-reload.
#[derive(Resource)]
pub struct RonWatcher {
    pub changed: Arc<Mutex<bool>>, // Set to `true` by the notify thread on modification.
    _watcher: Option<RecommendedWatcher>, // Dropping the handle stops the OS watch.
}

impl RonWatcher {
    /// A watcher with no OS backing. The flag never flips on its own.
    ///
    /// Used as a fallback when the directory is missing or the platform
    /// has no notify backend.
    #[must_use]
    pub fn stub() -> Self {
        RonWatcher {
            changed: Arc::new(Mutex::new(false)),
            _watcher: None,
        }
    }

    /// Read and clear the change flag.
    ///
    /// A poisoned mutex is recovered rather than propagated; the flag is
    /// a plain bool so the inner value is always usable.
    pub fn take_changed(&self) -> bool {
        let mut flag = match self.changed.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!("ron watcher mutex poisoned, recovering");
                poisoned.into_inner()
            }
        };
        std::mem::take(&mut *flag)
    }
}

/// Load all `.ron` files from a directory and deserialize them into `T`.
///
/// Files are visited in path order so "first file wins" callers behave
/// the same on every platform. Files that fail to read or parse are
/// skipped with a warning.
///
/// # Arguments
/// * `path` - Directory to scan.
///
/// # Return
/// Every successfully parsed value, possibly empty.
#[must_use]
pub fn load_ron_files<T: DeserializeOwned>(path: &str) -> Vec<T> {
    let Ok(entries) = std::fs::read_dir(path) else {
        return Vec::new();
    };

    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "ron"))
        .collect();
    files.sort();

    let mut items = Vec::new();
    for file in files {
        let content = match std::fs::read_to_string(&file) {
            Ok(c) => c,
            Err(e) => {
                warn!("failed to read {}: {e}", file.display());
                continue;
            }
        };
        match ron::from_str::<T>(&content) {
            Ok(item) => items.push(item),
            Err(e) => warn!("failed to parse {}: {e}", file.display()),
        }
    }

    items
}

/// Create a `RonWatcher` that flags modifications under `path`.
///
/// # Errors
/// Returns a `notify::Error` if the OS watcher cannot be created or the
/// directory cannot be registered.
pub fn setup_ron_watcher(path: &str) -> Result<RonWatcher, notify::Error> {
    let changed = Arc::new(Mutex::new(false));
    let changed_clone = changed.clone();
    let watched_path: PathBuf = std::fs::canonicalize(path).unwrap_or_else(|_| PathBuf::from(path));

    let mut watcher: RecommendedWatcher = Watcher::new(
        move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) => {
                if !matches!(event.kind, notify::EventKind::Modify(_)) {
                    return;
                }
                let relevant = event.paths.iter().any(|p| {
                    std::fs::canonicalize(p)
                        .unwrap_or_else(|_| p.clone())
                        .starts_with(&watched_path)
                });
                if relevant {
                    match changed_clone.lock() {
                        Ok(mut flag) => *flag = true,
                        Err(poisoned) => *poisoned.into_inner() = true,
                    }
                }
            }
            Err(e) => warn!("watch error: {e:?}"),
        },
        Config::default(),
    )?;

    watcher.watch(Path::new(path), RecursiveMode::NonRecursive)?;
    Ok(RonWatcher { changed, _watcher: Some(watcher) })
}
