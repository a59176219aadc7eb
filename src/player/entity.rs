//! The player entity: construction from options, jumping, dying and the
//! per-frame update step.
//!
//! The logic here is plain Rust over the entity's own body and transform, so
//! it can be driven by the Bevy systems in `player::systems`, by tests and by
//! benchmarks alike. Requests that belong to other subsystems (animation
//! playback, death notification) come back as `PlayerEffect`s.

use bevy::prelude::*;

use crate::animation::{AnimationRequest, SpriteAnimations};
use crate::physics::ArcadeBody;
use crate::player::config::{JumpHook, PlayerConfig, PlayerHooks};
use crate::player::controls::{ControlState, PlayerControls};
use crate::settings::ControlsSettings;

/// Played whenever the body is off the floor.
pub const JUMP_ANIMATION: AnimationRequest = AnimationRequest::looping("jump", 20.0);
/// Played while walking on the floor, in either direction.
pub const WALK_ANIMATION: AnimationRequest = AnimationRequest::looping("left", 10.0);
/// Played while standing still on the floor.
pub const IDLE_ANIMATION: AnimationRequest = AnimationRequest::looping("wait", 10.0);

/// Horizontal facing. The discriminant is the sign used for mirroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left = -1,
    #[default]
    Right = 1,
}

impl Facing {
    #[must_use]
    pub fn sign(self) -> f32 {
        f32::from(self as i8)
    }
}

/// Something the update step wants another subsystem to do.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEffect {
    PlayAnimation(AnimationRequest),
    /// Health ran out this frame and the entity was killed.
    Died,
}

/// Camera settings produced when the options ask to be followed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowRequest {
    pub deadzone: Option<Rect>,
}

/// World services handed to construction instead of global lookups.
#[derive(Debug, Clone, Copy)]
pub struct SpawnContext<'a> {
    pub viewport: Vec2,
    pub controls: &'a ControlsSettings,
}

/// Everything construction produces, ready to be spawned.
pub struct PlayerParts {
    pub player: PlayerEntity,
    pub body: ArcadeBody,
    pub animations: SpriteAnimations,
    pub transform: Transform,
    pub follow: Option<FollowRequest>,
    pub controls: Option<PlayerControls>,
}

#[derive(Component)]
pub struct PlayerEntity {
    config: PlayerConfig,
    pub x_speed: f32,
    pub jump_force: f32,
    pub total_jumps: u32,
    pub current_jump: u32,
    pub facing: Facing,
    pub inertia: f32,
    pub health: f32,
    alive: bool,
    on_jump: Option<JumpHook>,
}

impl PlayerEntity {
    /// Build a player and its parts from options.
    ///
    /// The setup hook runs last, on the finished parts, so whatever it
    /// changes is what gets spawned.
    #[must_use]
    pub fn build(config: PlayerConfig, hooks: PlayerHooks, ctx: SpawnContext<'_>) -> PlayerParts {
        let mut animations = SpriteAnimations::default();
        for (name, frames) in &config.animations {
            animations.add(name.clone(), frames.clone());
        }

        let (width, height) = config.body_size();
        let mut body = ArcadeBody::new(Vec2::new(config.x, config.y), Vec2::ZERO);
        body.collide_world_bounds = config.collide_world_bounds;
        body.set_size(width, height);

        let follow = config.follow.then(|| FollowRequest {
            deadzone: config.deadzone.map(|dz| dz.resolve(ctx.viewport)),
        });
        let controls = config.controls.then(|| PlayerControls::from_settings(ctx.controls));

        let transform = Transform::from_xyz(config.x, -config.y, 1.0);

        let player = PlayerEntity {
            x_speed: config.run_speed(),
            jump_force: config.jump_force(),
            total_jumps: config.jumps,
            current_jump: 0,
            facing: Facing::Right,
            inertia: config.inertia,
            health: config.starting_health(),
            alive: true,
            on_jump: hooks.on_jump,
            config,
        };

        let mut parts = PlayerParts { player, body, animations, transform, follow, controls };
        if let Some(setup) = hooks.setup {
            setup(&mut parts);
        }
        parts
    }

    /// The options this entity was built from.
    #[must_use]
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    #[must_use]
    pub fn can_jump(&self) -> bool {
        self.current_jump < self.total_jumps
    }

    /// Launch upward if jumps remain.
    ///
    /// # Returns
    /// The jump index that was consumed, or `None` when the limit is reached.
    pub fn jump(&mut self, body: &mut ArcadeBody) -> Option<u32> {
        if !self.can_jump() {
            return None;
        }
        body.velocity.y = self.jump_force;

        let index = self.current_jump;
        if let Some(hook) = self.on_jump.clone() {
            hook(self, index);
        }
        self.current_jump += 1;
        Some(index)
    }

    /// Remove the entity from play. The body stops simulating; the entity
    /// itself is not despawned.
    pub fn die(&mut self, body: &mut ArcadeBody) {
        self.alive = false;
        body.enabled = false;
    }

    pub fn damage(&mut self, amount: f32) {
        self.health -= amount;
    }

    pub fn heal(&mut self, amount: f32) {
        self.health += amount;
    }

    /// Run one frame of gameplay logic.
    ///
    /// A death found this frame does not cut the frame short: floor and
    /// movement handling still run once more on the dead entity.
    pub fn update(&mut self, body: &mut ArcadeBody, transform: &mut Transform, input: ControlState) -> Vec<PlayerEffect> {
        let mut effects = Vec::new();
        if !self.alive {
            return effects;
        }

        if self.health <= 0.0 {
            self.die(body);
            effects.push(PlayerEffect::Died);
        }

        let on_floor = body.on_floor();
        if on_floor {
            self.current_jump = 0;
        } else {
            effects.push(PlayerEffect::PlayAnimation(JUMP_ANIMATION));
        }

        if self.config.controls {
            if input.left {
                body.velocity.x = -self.x_speed;
                self.face(Facing::Left, transform);
                if on_floor {
                    effects.push(PlayerEffect::PlayAnimation(WALK_ANIMATION));
                }
            } else if input.right {
                body.velocity.x = self.x_speed;
                self.face(Facing::Right, transform);
                if on_floor {
                    effects.push(PlayerEffect::PlayAnimation(WALK_ANIMATION));
                }
            } else {
                // TODO: nonzero inertia should decay velocity.x; for now it only skips the reset.
                if self.inertia == 0.0 {
                    body.velocity.x = 0.0;
                }
                if on_floor {
                    effects.push(PlayerEffect::PlayAnimation(IDLE_ANIMATION));
                }
            }
        }

        effects
    }

    fn face(&mut self, facing: Facing, transform: &mut Transform) {
        self.facing = facing;
        transform.scale.x = facing.sign();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn build(config: PlayerConfig) -> PlayerParts {
        build_with(config, PlayerHooks::default())
    }

    fn build_with(config: PlayerConfig, hooks: PlayerHooks) -> PlayerParts {
        let controls = ControlsSettings::default();
        PlayerEntity::build(config, hooks, SpawnContext { viewport: Vec2::new(800.0, 600.0), controls: &controls })
    }

    fn controllable() -> PlayerConfig {
        PlayerConfig { controls: true, ..PlayerConfig::default() }
    }

    #[test]
    fn fresh_player_is_grounded_facing_right_with_default_body() {
        let parts = build(PlayerConfig::default());
        assert_eq!(parts.player.current_jump, 0);
        assert_eq!(parts.player.facing, Facing::Right);
        assert_eq!(parts.body.size, Vec2::new(64.0, 64.0));
        assert!(parts.body.collide_world_bounds);
        assert!(parts.player.is_alive());
        assert!(parts.follow.is_none());
        assert!(parts.controls.is_none());
    }

    #[test]
    fn configured_size_and_position_reach_the_body() {
        let parts = build(PlayerConfig { x: 32.0, y: 48.0, width: 20.0, height: -5.0, ..PlayerConfig::default() });
        assert_eq!(parts.body.size, Vec2::new(20.0, -5.0));
        assert_eq!(parts.body.position, Vec2::new(32.0, 48.0));
        assert_eq!(parts.transform.translation.truncate(), Vec2::new(32.0, -48.0));
    }

    #[test]
    fn jumps_until_limit_then_ignores() {
        let mut parts = build(PlayerConfig { jumps: 2, jump: -300.0, ..PlayerConfig::default() });
        let (p, body) = (&mut parts.player, &mut parts.body);

        assert_eq!(p.jump(body), Some(0));
        assert_eq!(body.velocity.y, -300.0);
        assert_eq!(p.current_jump, 1);

        body.velocity.y = 40.0;
        assert_eq!(p.jump(body), Some(1));
        assert_eq!(body.velocity.y, -300.0);
        assert_eq!(p.current_jump, 2);

        body.velocity.y = 40.0;
        assert_eq!(p.jump(body), None);
        assert_eq!(body.velocity.y, 40.0);
        assert_eq!(p.current_jump, 2);
    }

    #[test]
    fn zero_jumps_never_jumps() {
        let mut parts = build(PlayerConfig { jumps: 0, ..PlayerConfig::default() });
        assert_eq!(parts.player.jump(&mut parts.body), None);
        assert_eq!(parts.body.velocity.y, 0.0);
    }

    #[test]
    fn on_jump_sees_index_before_increment() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let hooks = PlayerHooks::default().with_on_jump(move |p, i| sink.lock().unwrap().push((i, p.current_jump)));
        let mut parts = build_with(PlayerConfig { jumps: 2, ..PlayerConfig::default() }, hooks);
        parts.player.jump(&mut parts.body);
        parts.player.jump(&mut parts.body);
        parts.player.jump(&mut parts.body);
        assert_eq!(*seen.lock().unwrap(), vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn setup_hook_sees_configured_clips_and_the_body() {
        let hooks = PlayerHooks::default().with_setup(|parts| {
            assert!(parts.animations.contains("jump"));
            parts.animations.add("wait", vec![3]);
            parts.body.allow_gravity = false;
            parts.player.x_speed = 500.0;
        });
        let mut config = PlayerConfig::default();
        config.animations.insert("wait".into(), vec![0]);
        config.animations.insert("jump".into(), vec![1, 2]);
        let parts = build_with(config, hooks);
        assert!(!parts.body.allow_gravity);
        assert_eq!(parts.player.x_speed, 500.0);
        let mut anims = parts.animations;
        anims.play("wait", 10.0, true);
        assert_eq!(anims.frame(), Some(3));
    }

    #[test]
    fn zero_health_and_size_take_defaults() {
        let mut parts = build(PlayerConfig { health: 0.0, width: 0.0, speed: 0.0, ..controllable() });
        assert_eq!(parts.body.size, Vec2::new(64.0, 64.0));
        assert_eq!(parts.player.health, 1.0);
        parts.player.update(&mut parts.body, &mut parts.transform, ControlState::LEFT);
        assert!(parts.player.is_alive());
        assert_eq!(parts.body.velocity.x, -350.0);
    }

    #[test]
    fn floor_contact_resets_jump_count() {
        let mut parts = build(PlayerConfig { jumps: 3, ..PlayerConfig::default() });
        parts.player.current_jump = 3;
        parts.body.blocked.down = true;
        let effects = parts.player.update(&mut parts.body, &mut parts.transform, ControlState::NONE);
        assert_eq!(parts.player.current_jump, 0);
        assert!(effects.is_empty());
    }

    #[test]
    fn airborne_always_requests_jump_animation() {
        let mut parts = build(PlayerConfig::default());
        parts.player.current_jump = 1;
        let effects = parts.player.update(&mut parts.body, &mut parts.transform, ControlState::NONE);
        assert_eq!(effects, vec![PlayerEffect::PlayAnimation(JUMP_ANIMATION)]);
        assert_eq!(parts.player.current_jump, 1);
    }

    #[test]
    fn no_health_kills_on_update() {
        let mut parts = build(PlayerConfig::default());
        parts.player.damage(1.0);
        assert!(parts.player.is_alive());
        let effects = parts.player.update(&mut parts.body, &mut parts.transform, ControlState::NONE);
        assert!(!parts.player.is_alive());
        assert!(!parts.body.enabled);
        assert_eq!(effects.first(), Some(&PlayerEffect::Died));
    }

    #[test]
    fn dying_frame_still_handles_floor_and_input() {
        let mut parts = build(PlayerConfig { health: -1.0, ..controllable() });
        parts.player.current_jump = 1;
        parts.body.blocked.down = true;
        let effects = parts.player.update(&mut parts.body, &mut parts.transform, ControlState::LEFT);
        assert_eq!(effects, vec![PlayerEffect::Died, PlayerEffect::PlayAnimation(WALK_ANIMATION)]);
        assert_eq!(parts.player.current_jump, 0);
        assert_eq!(parts.body.velocity.x, -350.0);
    }

    #[test]
    fn dead_player_update_is_a_no_op() {
        let mut parts = build(controllable());
        parts.player.die(&mut parts.body);
        parts.player.die(&mut parts.body);
        let effects = parts.player.update(&mut parts.body, &mut parts.transform, ControlState::LEFT);
        assert!(effects.is_empty());
        assert_eq!(parts.body.velocity.x, 0.0);
        assert_eq!(parts.player.facing, Facing::Right);
    }

    #[test]
    fn left_moves_faces_and_mirrors() {
        let mut parts = build(controllable());
        parts.body.blocked.down = true;
        let effects = parts.player.update(&mut parts.body, &mut parts.transform, ControlState::LEFT);
        assert_eq!(parts.body.velocity.x, -350.0);
        assert_eq!(parts.player.facing, Facing::Left);
        assert_eq!(parts.player.facing.sign(), -1.0);
        assert_eq!(parts.transform.scale.x, -1.0);
        assert_eq!(effects, vec![PlayerEffect::PlayAnimation(WALK_ANIMATION)]);
    }

    #[test]
    fn right_unmirrors_and_plays_the_same_walk_clip() {
        let mut parts = build(PlayerConfig { speed: 120.0, ..controllable() });
        parts.body.blocked.down = true;
        parts.player.update(&mut parts.body, &mut parts.transform, ControlState::LEFT);
        let effects = parts.player.update(&mut parts.body, &mut parts.transform, ControlState::RIGHT);
        assert_eq!(parts.body.velocity.x, 120.0);
        assert_eq!(parts.player.facing, Facing::Right);
        assert_eq!(parts.transform.scale.x, 1.0);
        assert_eq!(effects, vec![PlayerEffect::PlayAnimation(WALK_ANIMATION)]);
    }

    #[test]
    fn left_wins_when_both_held() {
        let mut parts = build(controllable());
        parts.player.update(&mut parts.body, &mut parts.transform, ControlState { left: true, right: true });
        assert_eq!(parts.body.velocity.x, -350.0);
    }

    #[test]
    fn idle_without_inertia_stops() {
        let mut parts = build(controllable());
        parts.body.blocked.down = true;
        parts.body.velocity.x = 200.0;
        let effects = parts.player.update(&mut parts.body, &mut parts.transform, ControlState::NONE);
        assert_eq!(parts.body.velocity.x, 0.0);
        assert_eq!(effects, vec![PlayerEffect::PlayAnimation(IDLE_ANIMATION)]);
    }

    #[test]
    fn idle_with_inertia_keeps_velocity() {
        let mut parts = build(PlayerConfig { inertia: 0.5, ..controllable() });
        parts.body.velocity.x = 200.0;
        let effects = parts.player.update(&mut parts.body, &mut parts.transform, ControlState::NONE);
        assert_eq!(parts.body.velocity.x, 200.0);
        assert_eq!(effects, vec![PlayerEffect::PlayAnimation(JUMP_ANIMATION)]);
    }

    #[test]
    fn input_is_ignored_without_controls() {
        let mut parts = build(PlayerConfig::default());
        parts.body.velocity.x = 50.0;
        parts.player.update(&mut parts.body, &mut parts.transform, ControlState::LEFT);
        assert_eq!(parts.body.velocity.x, 50.0);
        assert_eq!(parts.player.facing, Facing::Right);
    }

    #[test]
    fn follow_resolves_deadzone_once() {
        use crate::camera::DeadzoneConfig;
        let parts = build(PlayerConfig {
            follow: true,
            deadzone: Some(DeadzoneConfig { left: 0.5, width: 600.0 }),
            ..PlayerConfig::default()
        });
        let dz = parts.follow.and_then(|f| f.deadzone).unwrap();
        assert_eq!(dz.min.x, 400.0);
        assert_eq!(dz.width(), 600.0);
        assert_eq!(dz.height(), 600.0);
    }

    #[test]
    fn deadzone_without_follow_is_ignored() {
        use crate::camera::DeadzoneConfig;
        let parts = build(PlayerConfig { deadzone: Some(DeadzoneConfig { left: 0.5, width: 0.5 }), ..PlayerConfig::default() });
        assert!(parts.follow.is_none());
    }
}
