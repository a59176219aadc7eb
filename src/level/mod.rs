//! Level layout: world size and static platforms, loaded from `data/levels/`.

use bevy::prelude::*;
use bevy::sprite::Anchor;
use serde::{Deserialize, Serialize};

use crate::physics::{world_to_render, ArcadeWorld, StaticCollider};

pub const LEVELS_DIR: &str = "data/levels";

/// A platform's top-left corner and size, in world pixels (y-down).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformDef {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PlatformDef {
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelLayout {
    #[serde(default = "LevelLayout::default_width")]
    pub width: f32,
    #[serde(default = "LevelLayout::default_height")]
    pub height: f32,
    #[serde(default)]
    pub platforms: Vec<PlatformDef>,
}

impl LevelLayout {
    fn default_width() -> f32 { 3200.0 }
    fn default_height() -> f32 { 600.0 }

    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

impl Default for LevelLayout {
    fn default() -> Self {
        Self {
            width: Self::default_width(),
            height: Self::default_height(),
            platforms: Vec::new(),
        }
    }
}

/// First level found in `path`, or an empty default level.
#[must_use]
pub fn load_level_from_dir(path: &str) -> LevelLayout {
    crate::ron_loader::load_ron_files::<LevelLayout>(path)
        .into_iter()
        .next()
        .unwrap_or_default()
}

/// Spawn platforms and size the physics world to the level.
pub fn spawn_level(commands: &mut Commands, world: &mut ArcadeWorld, level: &LevelLayout) {
    world.bounds = level.bounds();

    for platform in &level.platforms {
        let rect = platform.rect();
        let top_left = world_to_render(rect.min);
        commands.spawn((
            SpriteBundle {
                sprite: Sprite {
                    color: Color::srgb(0.3, 0.3, 0.35),
                    custom_size: Some(rect.size()),
                    anchor: Anchor::TopLeft,
                    ..default()
                },
                transform: Transform::from_xyz(top_left.x, top_left.y, 0.0),
                ..default()
            },
            StaticCollider { rect },
        ));
    }
    info!("level loaded: {}x{} with {} platforms", level.width, level.height, level.platforms.len());
}
