//! Arcade physics: velocity, gravity, axis-aligned collisions and world bounds.
//!
//! Bodies live in screen-style world space: pixels, origin at the top-left of
//! the world, `y` growing downward. A negative vertical velocity therefore
//! moves a body up, which is what jump forces expect. `sync_body_transforms`
//! converts into Bevy's y-up space for rendering.
//!
//! Register `ArcadePhysicsPlugin` to run `arcade_physics` and the transform
//! sync every frame inside `PhysicsSet`.

use bevy::prelude::*;

use crate::settings::Settings;

/// Which sides of a body touched something during the last physics step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Blocked {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// A simple rectangular body with velocity, integrated every frame.
#[derive(Component, Debug, Clone)]
pub struct ArcadeBody {
    /// Center of the body in world pixels.
    pub position: Vec2,
    /// Pixels per second.
    pub velocity: Vec2,
    /// Width and height of the collision box.
    pub size: Vec2,
    pub allow_gravity: bool,
    pub collide_world_bounds: bool,
    /// Disabled bodies are neither integrated nor collided.
    pub enabled: bool,
    pub blocked: Blocked,
}

impl ArcadeBody {
    #[must_use]
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            size,
            allow_gravity: true,
            collide_world_bounds: false,
            enabled: true,
            blocked: Blocked::default(),
        }
    }

    /// Resize the collision box, keeping the center in place.
    pub fn set_size(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
    }

    /// Whether the body landed on something during the last step.
    #[must_use]
    pub fn on_floor(&self) -> bool {
        self.blocked.down
    }

    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.position, self.size)
    }
}

/// Immovable axis-aligned platform, in the same space as `ArcadeBody`.
#[derive(Component, Debug, Clone, Copy)]
pub struct StaticCollider {
    pub rect: Rect,
}

/// Global physics parameters.
#[derive(Resource, Debug, Clone)]
pub struct ArcadeWorld {
    /// Area bodies with `collide_world_bounds` are kept inside.
    pub bounds: Rect,
    pub gravity: Vec2,
    pub max_fall_speed: f32,
}

impl Default for ArcadeWorld {
    fn default() -> Self {
        let defaults = Settings::defaults();
        Self {
            bounds: Rect::new(0.0, 0.0, defaults.graphics.viewport_width, defaults.graphics.viewport_height),
            gravity: Vec2::new(0.0, defaults.physics.gravity),
            max_fall_speed: defaults.physics.max_fall_speed,
        }
    }
}

/// Ordering label for the physics step.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhysicsSet;

pub struct ArcadePhysicsPlugin;

impl Plugin for ArcadePhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ArcadeWorld>()
            .add_systems(Update, (arcade_physics, sync_body_transforms).chain().in_set(PhysicsSet));
    }
}

/// Advance one body by `dt` seconds against the given platforms and world.
///
/// Extracted helper so systems, tests and benchmarks share identical logic.
pub fn body_step(body: &mut ArcadeBody, colliders: &[Rect], world: &ArcadeWorld, dt: f32) {
    if !body.enabled {
        return;
    }

    body.blocked = Blocked::default();

    if body.allow_gravity {
        body.velocity += world.gravity * dt;
    }
    if body.velocity.y > world.max_fall_speed {
        body.velocity.y = world.max_fall_speed;
    }

    // Separate axes so a body sliding along a floor is not caught on its edge.
    body.position.x += body.velocity.x * dt;
    for rect in colliders {
        resolve_x(body, *rect);
    }

    body.position.y += body.velocity.y * dt;
    for rect in colliders {
        resolve_y(body, *rect);
    }

    if body.collide_world_bounds {
        clamp_to_bounds(body, world.bounds);
    }
}

fn overlaps(a: Rect, b: Rect) -> bool {
    a.min.x < b.max.x && a.max.x > b.min.x && a.min.y < b.max.y && a.max.y > b.min.y
}

fn resolve_x(body: &mut ArcadeBody, wall: Rect) {
    let r = body.rect();
    if !overlaps(r, wall) {
        return;
    }
    let half = body.size.x * 0.5;
    if body.velocity.x > 0.0 {
        body.position.x = wall.min.x - half;
        body.blocked.right = true;
        body.velocity.x = 0.0;
    } else if body.velocity.x < 0.0 {
        body.position.x = wall.max.x + half;
        body.blocked.left = true;
        body.velocity.x = 0.0;
    }
}

fn resolve_y(body: &mut ArcadeBody, wall: Rect) {
    let r = body.rect();
    if !overlaps(r, wall) {
        return;
    }
    let half = body.size.y * 0.5;
    if body.velocity.y >= 0.0 {
        body.position.y = wall.min.y - half;
        body.blocked.down = true;
        body.velocity.y = 0.0;
    } else {
        body.position.y = wall.max.y + half;
        body.blocked.up = true;
        body.velocity.y = 0.0;
    }
}

fn clamp_to_bounds(body: &mut ArcadeBody, bounds: Rect) {
    let half = body.size * 0.5;

    if body.position.x - half.x < bounds.min.x {
        body.position.x = bounds.min.x + half.x;
        body.velocity.x = body.velocity.x.max(0.0);
        body.blocked.left = true;
    } else if body.position.x + half.x > bounds.max.x {
        body.position.x = bounds.max.x - half.x;
        body.velocity.x = body.velocity.x.min(0.0);
        body.blocked.right = true;
    }

    if body.position.y - half.y < bounds.min.y {
        body.position.y = bounds.min.y + half.y;
        body.velocity.y = body.velocity.y.max(0.0);
        body.blocked.up = true;
    } else if body.position.y + half.y >= bounds.max.y {
        body.position.y = bounds.max.y - half.y;
        body.velocity.y = body.velocity.y.min(0.0);
        body.blocked.down = true;
    }
}

/// Integrate every enabled body for this frame.
#[allow(clippy::needless_pass_by_value)]
pub fn arcade_physics(
    time: Res<Time>,
    world: Res<ArcadeWorld>,
    colliders: Query<&StaticCollider>,
    mut bodies: Query<&mut ArcadeBody>,
) {
    let dt = time.delta_seconds();
    let rects: Vec<Rect> = colliders.iter().map(|c| c.rect).collect();
    for mut body in &mut bodies {
        body_step(&mut body, &rects, &world, dt);
    }
}

/// Mirror body positions into `Transform` (y flipped for Bevy's y-up space).
pub fn sync_body_transforms(mut q: Query<(&ArcadeBody, &mut Transform), Changed<ArcadeBody>>) {
    for (body, mut tf) in &mut q {
        let p = world_to_render(body.position);
        tf.translation.x = p.x;
        tf.translation.y = p.y;
    }
}

/// Convert a world-space (y-down) point into Bevy's y-up render space.
#[must_use]
pub fn world_to_render(point: Vec2) -> Vec2 {
    Vec2::new(point.x, -point.y)
}

/// Push gravity changes from a reloaded `Settings` into the running world.
pub fn sync_physics_settings(
    settings: Res<Settings>,
    mut world: ResMut<ArcadeWorld>,
    mut last: Local<Option<(f32, f32)>>,
) {
    let desired = (settings.physics.gravity, settings.physics.max_fall_speed);
    if *last == Some(desired) {
        return;
    }
    world.gravity = Vec2::new(0.0, desired.0);
    world.max_fall_speed = desired.1;
    *last = Some(desired);
}
