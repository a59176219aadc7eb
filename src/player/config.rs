//! Player options and their defaults.
//!
//! `PlayerConfig` is plain data and can be written as RON under
//! `data/players/`. Any field left out takes the documented default, so
//! `()` is a valid (if motionless) player. A zero `width`, `height`,
//! `health`, `speed` or `jump` also counts as unset and takes the default,
//! while `jumps: 0` is kept. Nothing else is validated: odd values such as
//! negative sizes reach the body untouched.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::camera::DeadzoneConfig;
use crate::player::{PlayerEntity, PlayerParts};

/// Directory the demo loads player definitions from.
pub const PLAYERS_DIR: &str = "data/players";

/// Grid layout of a sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetLayout {
    pub tile_width: u32,
    pub tile_height: u32,
    pub columns: u32,
    pub rows: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub key: String, // Texture asset path. Empty draws a plain rectangle.
    #[serde(default)]
    pub frame: Option<usize>, // Initial atlas frame.
    #[serde(default)]
    pub sheet: Option<SheetLayout>,
    #[serde(default)]
    pub animations: HashMap<String, Vec<usize>>,
    #[serde(default = "PlayerConfig::default_collide_world_bounds")]
    pub collide_world_bounds: bool,
    #[serde(default = "PlayerConfig::default_size")]
    pub width: f32,
    #[serde(default = "PlayerConfig::default_size")]
    pub height: f32,
    #[serde(default = "PlayerConfig::default_health")]
    pub health: f32,
    #[serde(default)]
    pub follow: bool,
    #[serde(default)]
    pub deadzone: Option<DeadzoneConfig>,
    #[serde(default = "PlayerConfig::default_speed")]
    pub speed: f32,
    #[serde(default = "PlayerConfig::default_jump")]
    pub jump: f32, // Negative is up.
    #[serde(default = "PlayerConfig::default_jumps")]
    pub jumps: u32,
    #[serde(default)]
    pub inertia: f32,
    #[serde(default)]
    pub controls: bool,
}

impl PlayerConfig {
    fn default_collide_world_bounds() -> bool { true }
    fn default_size() -> f32 { 64.0 }
    fn default_health() -> f32 { 1.0 }
    fn default_speed() -> f32 { 350.0 }
    fn default_jump() -> f32 { -250.0 }
    fn default_jumps() -> u32 { 1 }

    /// Collision box size, `(width, height)`.
    #[must_use]
    pub fn body_size(&self) -> (f32, f32) {
        (nonzero_or(self.width, Self::default_size()), nonzero_or(self.height, Self::default_size()))
    }

    #[must_use]
    pub fn starting_health(&self) -> f32 {
        nonzero_or(self.health, Self::default_health())
    }

    #[must_use]
    pub fn run_speed(&self) -> f32 {
        nonzero_or(self.speed, Self::default_speed())
    }

    #[must_use]
    pub fn jump_force(&self) -> f32 {
        nonzero_or(self.jump, Self::default_jump())
    }
}

fn nonzero_or(value: f32, default: f32) -> f32 {
    if value == 0.0 { default } else { value }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            key: String::new(),
            frame: None,
            sheet: None,
            animations: HashMap::new(),
            collide_world_bounds: Self::default_collide_world_bounds(),
            width: Self::default_size(),
            height: Self::default_size(),
            health: Self::default_health(),
            follow: false,
            deadzone: None,
            speed: Self::default_speed(),
            jump: Self::default_jump(),
            jumps: Self::default_jumps(),
            inertia: 0.0,
            controls: false,
        }
    }
}

pub type SetupHook = Box<dyn FnOnce(&mut PlayerParts) + Send + Sync>;
pub type JumpHook = Arc<dyn Fn(&PlayerEntity, u32) + Send + Sync>;

/// Behavior that cannot be expressed as data.
#[derive(Default)]
pub struct PlayerHooks {
    /// Runs once at the end of construction, on every part: fill the
    /// animation table, adjust the body, the transform or the tuning.
    pub setup: Option<SetupHook>,
    /// Called on every honored jump with the jump index before it is consumed.
    pub on_jump: Option<JumpHook>,
}

impl PlayerHooks {
    #[must_use]
    pub fn with_setup(mut self, f: impl FnOnce(&mut PlayerParts) + Send + Sync + 'static) -> Self {
        self.setup = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn with_on_jump(mut self, f: impl Fn(&PlayerEntity, u32) + Send + Sync + 'static) -> Self {
        self.on_jump = Some(Arc::new(f));
        self
    }
}

/// Load every player definition in `path`.
#[must_use]
pub fn load_players_from_dir(path: &str) -> Vec<PlayerConfig> {
    crate::ron_loader::load_ron_files(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ron_gives_documented_defaults() {
        let c: PlayerConfig = ron::from_str("()").unwrap();
        assert_eq!((c.x, c.y), (0.0, 0.0));
        assert!(c.key.is_empty());
        assert_eq!(c.frame, None);
        assert!(c.collide_world_bounds);
        assert_eq!((c.width, c.height), (64.0, 64.0));
        assert_eq!(c.health, 1.0);
        assert!(!c.follow);
        assert_eq!(c.deadzone, None);
        assert_eq!(c.speed, 350.0);
        assert_eq!(c.jump, -250.0);
        assert_eq!(c.jumps, 1);
        assert_eq!(c.inertia, 0.0);
        assert!(!c.controls);
    }

    #[test]
    fn explicit_values_are_kept() {
        let c: PlayerConfig = ron::from_str(
            "(x: 10.0, collide_world_bounds: false, jumps: 0, deadzone: Some((left: 0.5, width: 100.0)), animations: {\"wait\": [0, 1]})",
        )
        .unwrap();
        assert_eq!(c.x, 10.0);
        assert!(!c.collide_world_bounds);
        assert_eq!(c.jumps, 0);
        assert_eq!(c.deadzone, Some(DeadzoneConfig { left: 0.5, width: 100.0 }));
        assert_eq!(c.animations.get("wait"), Some(&vec![0, 1]));
    }

    #[test]
    fn zero_tuning_falls_back_to_defaults() {
        let c: PlayerConfig = ron::from_str("(width: 0.0, height: 32.0, health: 0.0, speed: 0.0, jump: 0.0)").unwrap();
        assert_eq!(c.body_size(), (64.0, 32.0));
        assert_eq!(c.starting_health(), 1.0);
        assert_eq!(c.run_speed(), 350.0);
        assert_eq!(c.jump_force(), -250.0);
    }
}
