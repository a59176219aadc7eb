//! Settings loading and hot-reloading.
//!
//! Settings are loaded from RON files in the `data/settings` directory. If multiple
//! RON files are present, the first successfully parsed `Settings` (in path order)
//! is used. If none parse, defaults are used.
use crate::ron_loader::{load_ron_files, setup_ron_watcher};
use crate::settings::Settings;
use bevy::log::info;
use bevy::prelude::{Res, ResMut, Resource};

/// Directory the game reads settings from.
pub const SETTINGS_DIR: &str = "data/settings";

#[derive(Resource)]
pub struct SettingsWatcher {
    pub watcher: crate::ron::RonWatcher,
    pub dir: String,
}

/// Load settings from `path` (directory).
///
/// # Example
/// ```no_run
/// let settings = hopper::settings::loader::load_settings_from_dir("data/settings");
/// ```
#[must_use]
pub fn load_settings_from_dir(path: &str) -> Settings {
    let items: Vec<Settings> = load_ron_files(path);
    items.into_iter().next().unwrap_or_else(Settings::defaults)
}

/// Create a watcher for the settings directory (hot-reload).
///
/// # Errors
/// Propagates the `notify::Error` if the directory cannot be watched.
pub fn setup_settings_watcher(path: &str) -> Result<SettingsWatcher, notify::Error> {
    setup_ron_watcher(path).map(|watcher| SettingsWatcher { watcher, dir: path.to_string() })
}

/// Reload the `Settings` resource when the watched directory changes.
#[allow(clippy::needless_pass_by_value)]
pub fn check_settings_changes(watcher: Res<SettingsWatcher>, mut settings: ResMut<Settings>) {
    if watcher.watcher.take_changed() {
        info!("settings changed, reloading from {}", watcher.dir);
        *settings = load_settings_from_dir(&watcher.dir);
    }
}

impl SettingsWatcher {
    #[must_use]
    pub fn stub() -> Self {
        SettingsWatcher {
            watcher: crate::ron::RonWatcher::stub(),
            dir: SETTINGS_DIR.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.ron"), "(physics: (gravity: 1.0))").unwrap();
        std::fs::write(dir.path().join("b.ron"), "(physics: (gravity: 2.0))").unwrap();
        let s = load_settings_from_dir(dir.path().to_str().unwrap());
        assert_eq!(s.physics.gravity, 1.0);
    }

    #[test]
    fn empty_directory_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let s = load_settings_from_dir(dir.path().to_str().unwrap());
        assert_eq!(s.physics.gravity, Settings::defaults().physics.gravity);
    }
}
