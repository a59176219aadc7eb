//! Settings, types and defaults.
//!
//! Settings are stored as a RON file under `data/settings/` and are hot-reloadable
//! using the RON watcher utilities (see `ron::setup_ron_watcher`). Every field
//! has a serde default so a partial file, or no file at all, still yields a
//! playable configuration.
use bevy::prelude::{KeyCode, Resource, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphicsSettings {
    #[serde(default = "GraphicsSettings::default_viewport_width")]
    pub viewport_width: f32, // Logical window width; also the base for fractional deadzones.
    #[serde(default = "GraphicsSettings::default_viewport_height")]
    pub viewport_height: f32, // Logical window height.
    #[serde(default = "GraphicsSettings::default_vsync")]
    pub vsync: bool, // Cap FPS to the display refresh rate.
}

impl GraphicsSettings {
    fn default_viewport_width() -> f32 { 800.0 }
    fn default_viewport_height() -> f32 { 600.0 }
    fn default_vsync() -> bool { true }

    /// Viewport size as a vector.
    #[must_use]
    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.viewport_width, self.viewport_height)
    }
}

impl Default for GraphicsSettings {
    fn default() -> Self {
        Self {
            viewport_width: Self::default_viewport_width(),
            viewport_height: Self::default_viewport_height(),
            vsync: Self::default_vsync(),
        }
    }
}

/// Controls / input settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlsSettings {
    #[serde(default = "ControlsSettings::default_keybinds")]
    pub keybinds: HashMap<String, String>, // Action name -> key identifier, editable by the user.
}

impl ControlsSettings {
    fn default_keybinds() -> HashMap<String, String> {
        let mut m = HashMap::new();
        m.insert("left".to_string(), "Left".to_string());
        m.insert("right".to_string(), "Right".to_string());
        m.insert("jump".to_string(), "Space".to_string());
        m.insert("toggle_debug".to_string(), "F1".to_string());
        m.insert("dump_debug".to_string(), "F3".to_string());
        m
    }

    /// Resolve the key bound to `action`, or `default` when the action is
    /// unbound or its key name is not recognised.
    #[must_use]
    pub fn key_for(&self, action: &str, default: KeyCode) -> KeyCode {
        self.keybinds
            .get(action)
            .and_then(|s| Settings::keycode_from_str(s))
            .unwrap_or(default)
    }
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self { keybinds: Self::default_keybinds() }
    }
}

/// Arcade physics tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsSettings {
    #[serde(default = "PhysicsSettings::default_gravity")]
    pub gravity: f32, // Downward acceleration in pixels per second squared.
    #[serde(default = "PhysicsSettings::default_max_fall_speed")]
    pub max_fall_speed: f32, // Terminal downward velocity.
}

impl PhysicsSettings {
    fn default_gravity() -> f32 { 600.0 }
    fn default_max_fall_speed() -> f32 { 1000.0 }
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity: Self::default_gravity(),
            max_fall_speed: Self::default_max_fall_speed(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DebugSettings {
    #[serde(default)]
    pub overlay_on_start: bool, // Show the F1 overlay from the first frame.
}

/// Top-level Settings
#[derive(Resource, Clone, Debug, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub graphics: GraphicsSettings,
    #[serde(default)]
    pub controls: ControlsSettings,
    #[serde(default)]
    pub physics: PhysicsSettings,
    #[serde(default)]
    pub debug: DebugSettings,
}

impl Settings {
    #[must_use]
    pub fn defaults() -> Self { Settings::default() }

    /// Convert a key identifier from `controls.keybinds` into a `KeyCode`.
    ///
    /// Accepts single letters and digits, arrow and navigation keys,
    /// function keys, modifiers and a few whitespace keys. Matching is
    /// case-insensitive.
    ///
    /// # Returns
    /// `None` if the identifier is not recognised.
    pub fn keycode_from_str(name: &str) -> Option<KeyCode> {
        let s = name.trim().to_ascii_uppercase();

        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return match c {
                'A'..='Z' => letter_key(c),
                '0'..='9' => digit_key(c),
                _ => None,
            };
        }

        if let Some(n) = s.strip_prefix('F').and_then(|rest| rest.parse::<u8>().ok()) {
            return function_key(n);
        }

        Some(match s.as_str() {
            "LEFT" | "ARROWLEFT" => KeyCode::ArrowLeft,
            "RIGHT" | "ARROWRIGHT" => KeyCode::ArrowRight,
            "UP" | "ARROWUP" => KeyCode::ArrowUp,
            "DOWN" | "ARROWDOWN" => KeyCode::ArrowDown,
            "HOME" => KeyCode::Home,
            "END" => KeyCode::End,
            "PAGEUP" => KeyCode::PageUp,
            "PAGEDOWN" => KeyCode::PageDown,

            "ESC" | "ESCAPE" => KeyCode::Escape,
            "SPACE" | "SPACEBAR" => KeyCode::Space,
            "TAB" => KeyCode::Tab,
            "ENTER" | "RETURN" => KeyCode::Enter,
            "BACKSPACE" => KeyCode::Backspace,

            "LSHIFT" | "SHIFT" => KeyCode::ShiftLeft,
            "RSHIFT" => KeyCode::ShiftRight,
            "LCTRL" | "CTRL" | "CONTROL" => KeyCode::ControlLeft,
            "RCTRL" => KeyCode::ControlRight,
            "LALT" | "ALT" => KeyCode::AltLeft,
            "RALT" => KeyCode::AltRight,

            _ => return None,
        })
    }
}

fn letter_key(c: char) -> Option<KeyCode> {
    const LETTERS: [KeyCode; 26] = [
        KeyCode::KeyA, KeyCode::KeyB, KeyCode::KeyC, KeyCode::KeyD, KeyCode::KeyE,
        KeyCode::KeyF, KeyCode::KeyG, KeyCode::KeyH, KeyCode::KeyI, KeyCode::KeyJ,
        KeyCode::KeyK, KeyCode::KeyL, KeyCode::KeyM, KeyCode::KeyN, KeyCode::KeyO,
        KeyCode::KeyP, KeyCode::KeyQ, KeyCode::KeyR, KeyCode::KeyS, KeyCode::KeyT,
        KeyCode::KeyU, KeyCode::KeyV, KeyCode::KeyW, KeyCode::KeyX, KeyCode::KeyY,
        KeyCode::KeyZ,
    ];
    LETTERS.get((c as usize).checked_sub('A' as usize)?).copied()
}

fn digit_key(c: char) -> Option<KeyCode> {
    const DIGITS: [KeyCode; 10] = [
        KeyCode::Digit0, KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3, KeyCode::Digit4,
        KeyCode::Digit5, KeyCode::Digit6, KeyCode::Digit7, KeyCode::Digit8, KeyCode::Digit9,
    ];
    DIGITS.get(c.to_digit(10)? as usize).copied()
}

fn function_key(n: u8) -> Option<KeyCode> {
    const FUNCTION: [KeyCode; 12] = [
        KeyCode::F1, KeyCode::F2, KeyCode::F3, KeyCode::F4, KeyCode::F5, KeyCode::F6,
        KeyCode::F7, KeyCode::F8, KeyCode::F9, KeyCode::F10, KeyCode::F11, KeyCode::F12,
    ];
    FUNCTION.get(usize::from(n).checked_sub(1)?).copied()
}

pub mod loader;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_key_names() {
        assert_eq!(Settings::keycode_from_str("a"), Some(KeyCode::KeyA));
        assert_eq!(Settings::keycode_from_str("Z"), Some(KeyCode::KeyZ));
        assert_eq!(Settings::keycode_from_str("7"), Some(KeyCode::Digit7));
        assert_eq!(Settings::keycode_from_str("F12"), Some(KeyCode::F12));
        assert_eq!(Settings::keycode_from_str("space"), Some(KeyCode::Space));
        assert_eq!(Settings::keycode_from_str("ArrowLeft"), Some(KeyCode::ArrowLeft));
        assert_eq!(Settings::keycode_from_str("F0"), None);
        assert_eq!(Settings::keycode_from_str("F13"), None);
        assert_eq!(Settings::keycode_from_str("wat"), None);
    }

    #[test]
    fn key_for_falls_back_on_unknown_binding() {
        let mut controls = ControlsSettings::default();
        assert_eq!(controls.key_for("jump", KeyCode::KeyX), KeyCode::Space);
        controls.keybinds.insert("jump".into(), "nonsense".into());
        assert_eq!(controls.key_for("jump", KeyCode::KeyX), KeyCode::KeyX);
        assert_eq!(controls.key_for("unbound", KeyCode::KeyQ), KeyCode::KeyQ);
    }

    #[test]
    fn partial_ron_keeps_defaults() {
        let s: Settings = ron::from_str("(physics: (gravity: 900.0))").unwrap();
        assert_eq!(s.physics.gravity, 900.0);
        assert_eq!(s.physics.max_fall_speed, 1000.0);
        assert_eq!(s.graphics.viewport(), Vec2::new(800.0, 600.0));
        assert_eq!(s.controls.key_for("left", KeyCode::KeyA), KeyCode::ArrowLeft);
    }
}
