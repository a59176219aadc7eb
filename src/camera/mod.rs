//! Follow camera with an optional deadzone.
//!
//! The camera tracks one target entity. Without a deadzone the view stays
//! centered on the target. With one, the view only scrolls once the target's
//! on-screen position leaves the deadzone rectangle. The view is finally
//! clamped to the arcade world bounds.
//!
//! `CameraView` keeps the view's top-left corner in the same y-down world
//! space as `ArcadeBody`; `camera_follow` writes the matching Bevy transform.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::physics::{world_to_render, ArcadeBody, ArcadeWorld};

/// Deadzone as written in configuration.
///
/// `left` and `width` at or below `1.0` are fractions of the viewport width;
/// larger values are absolute pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeadzoneConfig {
    pub left: f32,
    pub width: f32,
}

impl DeadzoneConfig {
    /// Resolve into a screen-space rectangle spanning the full viewport height.
    #[must_use]
    pub fn resolve(&self, viewport: Vec2) -> Rect {
        let left = fraction_or_pixels(self.left, viewport.x);
        let width = fraction_or_pixels(self.width, viewport.x);
        Rect {
            min: Vec2::new(left, 0.0),
            max: Vec2::new(left + width, viewport.y),
        }
    }
}

fn fraction_or_pixels(value: f32, extent: f32) -> f32 {
    if value <= 1.0 { extent * value } else { value }
}

/// Which entity the camera tracks, and how.
#[derive(Resource, Debug, Clone, Copy)]
pub struct CameraFollow {
    pub target: Entity,
    /// Screen-space deadzone, fixed when the follow was set up.
    pub deadzone: Option<Rect>,
}

/// Top-left corner and size of the visible area, in world pixels (y-down).
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    pub position: Vec2,
    pub size: Vec2,
}

impl CameraView {
    #[must_use]
    pub fn new(size: Vec2) -> Self {
        Self { position: Vec2::ZERO, size }
    }

    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }

    /// Move the view toward `target` (world space) for one frame.
    pub fn follow(&mut self, target: Vec2, deadzone: Option<Rect>) {
        match deadzone {
            None => self.position = target - self.size * 0.5,
            Some(dz) => {
                let screen = target - self.position;
                if screen.x < dz.min.x {
                    self.position.x = target.x - dz.min.x;
                } else if screen.x > dz.max.x {
                    self.position.x = target.x - dz.max.x;
                }
                if screen.y < dz.min.y {
                    self.position.y = target.y - dz.min.y;
                } else if screen.y > dz.max.y {
                    self.position.y = target.y - dz.max.y;
                }
            }
        }
    }

    /// Keep the view inside `bounds`. A world narrower or shorter than the
    /// view pins the view to the world's min edge on that axis.
    pub fn clamp_to(&mut self, bounds: Rect) {
        let max = bounds.max - self.size;
        self.position.x = if max.x < bounds.min.x { bounds.min.x } else { self.position.x.clamp(bounds.min.x, max.x) };
        self.position.y = if max.y < bounds.min.y { bounds.min.y } else { self.position.y.clamp(bounds.min.y, max.y) };
    }
}

/// Ordering label for the camera step, after the player update.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct CameraSet;

pub struct CameraFollowPlugin;

impl Plugin for CameraFollowPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ArcadeWorld>()
            .add_systems(Update, camera_follow.in_set(CameraSet));
    }
}

/// Spawn the 2D camera used by the follow system.
pub fn spawn_follow_camera(commands: &mut Commands, viewport: Vec2) -> Entity {
    commands
        .spawn((Camera2dBundle::default(), CameraView::new(viewport)))
        .id()
}

/// Track the follow target, if one is registered and still has a body.
#[allow(clippy::needless_pass_by_value)]
pub fn camera_follow(
    follow: Option<Res<CameraFollow>>,
    world: Res<ArcadeWorld>,
    bodies: Query<&ArcadeBody>,
    mut cameras: Query<(&mut CameraView, &mut Transform), With<Camera2d>>,
) {
    let Some(follow) = follow else { return };
    let Ok(body) = bodies.get(follow.target) else { return };

    for (mut view, mut tf) in &mut cameras {
        view.follow(body.position, follow.deadzone);
        view.clamp_to(world.bounds);
        let c = world_to_render(view.center());
        tf.translation.x = c.x;
        tf.translation.y = c.y;
    }
}
