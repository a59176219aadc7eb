//! Bevy glue for the player: spawning, input, per-frame update and events.
//!
//! Frame order inside `Update`, set up by `PlayerPlugin`:
//! `PlayerSet::Input` (jump edge, damage, kill requests), then physics, then
//! `PlayerSet::Update` (the entity update and its effects), then the camera,
//! then animation frames. Physics runs before the update so the floor check
//! sees this frame's contacts, including a jump just taken.

use bevy::prelude::*;
use bevy::sprite::Anchor;

use crate::animation::{AnimationSet, SpriteAnimations};
use crate::camera::{CameraFollow, CameraSet};
use crate::physics::{ArcadeBody, PhysicsSet};
use crate::player::config::{PlayerConfig, PlayerHooks};
use crate::player::controls::{ControlState, PlayerControls};
use crate::player::entity::{PlayerEffect, PlayerEntity, PlayerParts, SpawnContext};

/// Sent for every honored jump.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerJumped {
    pub entity: Entity,
    /// Index of the jump within the current airborne sequence, starting at 0.
    pub jump_index: u32,
}

/// Sent once when a player is removed from play.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerDied {
    pub entity: Entity,
}

/// Ask for a player to lose health. Death is resolved by the next update.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamagePlayer {
    pub entity: Entity,
    pub amount: f32,
}

/// Ask for a player to be removed from play immediately.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct KillPlayer {
    pub entity: Entity,
}

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum PlayerSet {
    Input,
    Update,
}

/// Untextured players are drawn in this color.
const PLACEHOLDER_COLOR: Color = Color::srgb(0.95, 0.55, 0.2);

/// Spawn a player from options.
///
/// Textured players load `config.key`; with a `sheet` layout they get a
/// texture atlas starting at `config.frame`. Following players become the
/// camera's target.
pub fn spawn_player(
    commands: &mut Commands,
    asset_server: &AssetServer,
    layouts: &mut Assets<TextureAtlasLayout>,
    config: PlayerConfig,
    hooks: PlayerHooks,
    ctx: SpawnContext<'_>,
) -> Entity {
    let key = config.key.clone();
    let sheet = config.sheet;
    let frame = config.frame.unwrap_or(0);
    let size = Vec2::from(config.body_size());

    let PlayerParts { player, body, animations, transform, follow, controls } = PlayerEntity::build(config, hooks, ctx);

    let sprite = if key.is_empty() {
        SpriteBundle {
            sprite: Sprite { color: PLACEHOLDER_COLOR, custom_size: Some(size), anchor: Anchor::Center, ..default() },
            transform,
            ..default()
        }
    } else {
        SpriteBundle {
            sprite: Sprite { anchor: Anchor::Center, ..default() },
            texture: asset_server.load(key.clone()),
            transform,
            ..default()
        }
    };

    let mut entity = commands.spawn((sprite, player, body, animations, Name::new("player")));
    if let Some(sheet) = sheet {
        let layout = TextureAtlasLayout::from_grid(
            UVec2::new(sheet.tile_width, sheet.tile_height),
            sheet.columns,
            sheet.rows,
            None,
            None,
        );
        entity.insert(TextureAtlas { layout: layouts.add(layout), index: frame });
    }
    if let Some(controls) = controls {
        entity.insert(controls);
    }
    let id = entity.id();

    if let Some(follow) = follow {
        commands.insert_resource(CameraFollow { target: id, deadzone: follow.deadzone });
    }

    info!("spawned player {id:?} (texture '{key}', controls: {})", controls.is_some());
    id
}

/// Jump on the pressed edge of each controllable player's jump key.
#[allow(clippy::needless_pass_by_value)]
pub fn player_jump_input(
    kb: Res<ButtonInput<KeyCode>>,
    mut jumped: EventWriter<PlayerJumped>,
    mut q: Query<(Entity, &mut PlayerEntity, &mut ArcadeBody, &PlayerControls)>,
) {
    for (entity, mut player, mut body, controls) in &mut q {
        if !controls.jump_pressed(&kb) {
            continue;
        }
        if let Some(jump_index) = player.jump(&mut body) {
            jumped.send(PlayerJumped { entity, jump_index });
        }
    }
}

pub fn handle_player_damage(mut events: EventReader<DamagePlayer>, mut q: Query<&mut PlayerEntity>) {
    for ev in events.read() {
        if let Ok(mut player) = q.get_mut(ev.entity) {
            player.damage(ev.amount);
        }
    }
}

pub fn handle_kill_requests(
    mut events: EventReader<KillPlayer>,
    mut died: EventWriter<PlayerDied>,
    mut q: Query<(&mut PlayerEntity, &mut ArcadeBody, &mut Visibility)>,
) {
    for ev in events.read() {
        let Ok((mut player, mut body, mut visibility)) = q.get_mut(ev.entity) else { continue };
        let was_alive = player.is_alive();
        player.die(&mut body);
        *visibility = Visibility::Hidden;
        if was_alive {
            info!("player {:?} killed", ev.entity);
            died.send(PlayerDied { entity: ev.entity });
        }
    }
}

/// Run every player's update step and apply the effects it asks for.
#[allow(clippy::needless_pass_by_value)]
pub fn player_update(
    kb: Res<ButtonInput<KeyCode>>,
    mut died: EventWriter<PlayerDied>,
    mut q: Query<(
        Entity,
        &mut PlayerEntity,
        &mut ArcadeBody,
        &mut Transform,
        &mut SpriteAnimations,
        &mut Visibility,
        Option<&PlayerControls>,
    )>,
) {
    for (entity, mut player, mut body, mut transform, mut anims, mut visibility, controls) in &mut q {
        let input = controls.map_or(ControlState::NONE, |c| c.state(&kb));
        let mut dead = false;
        for effect in player.update(&mut body, &mut transform, input) {
            match effect {
                PlayerEffect::PlayAnimation(request) => {
                    if !dead {
                        anims.play_request(&request);
                    }
                }
                PlayerEffect::Died => {
                    dead = true;
                    info!("player {entity:?} ran out of health");
                    *visibility = Visibility::Hidden;
                    anims.stop();
                    died.send(PlayerDied { entity });
                }
            }
        }
    }
}

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PlayerJumped>()
            .add_event::<PlayerDied>()
            .add_event::<DamagePlayer>()
            .add_event::<KillPlayer>()
            .configure_sets(
                Update,
                (PlayerSet::Input, PhysicsSet, PlayerSet::Update, CameraSet, AnimationSet).chain(),
            )
            .add_systems(
                Update,
                (player_jump_input, handle_player_damage, handle_kill_requests)
                    .chain()
                    .in_set(PlayerSet::Input),
            )
            .add_systems(Update, player_update.in_set(PlayerSet::Update));
    }
}
