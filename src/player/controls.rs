//! Keyboard bindings for controllable players.
//!
//! Only players spawned with `controls: true` get a `PlayerControls`
//! component. Each frame the held left/right keys are sampled into a
//! `ControlState`; the jump key's pressed edge triggers a jump.

use bevy::prelude::*;

use crate::settings::ControlsSettings;

/// Keys a controllable player listens to.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerControls {
    pub left: KeyCode,
    pub right: KeyCode,
    pub jump: KeyCode,
}

impl PlayerControls {
    /// Bind from the keybind table, defaulting to the arrow keys and space.
    #[must_use]
    pub fn from_settings(controls: &ControlsSettings) -> Self {
        Self {
            left: controls.key_for("left", KeyCode::ArrowLeft),
            right: controls.key_for("right", KeyCode::ArrowRight),
            jump: controls.key_for("jump", KeyCode::Space),
        }
    }

    /// Sample the held direction keys.
    #[must_use]
    pub fn state(&self, kb: &ButtonInput<KeyCode>) -> ControlState {
        ControlState {
            left: kb.pressed(self.left),
            right: kb.pressed(self.right),
        }
    }

    #[must_use]
    pub fn jump_pressed(&self, kb: &ButtonInput<KeyCode>) -> bool {
        kb.just_pressed(self.jump)
    }
}

impl Default for PlayerControls {
    fn default() -> Self {
        Self::from_settings(&ControlsSettings::default())
    }
}

/// Direction keys held during the current frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlState {
    pub left: bool,
    pub right: bool,
}

impl ControlState {
    pub const NONE: Self = Self { left: false, right: false };
    pub const LEFT: Self = Self { left: true, right: false };
    pub const RIGHT: Self = Self { left: false, right: true };
}
