//! Startup: camera, level and players.
//!
//! Players come from `data/players/*.ron`. When that directory is empty a
//! single keyboard-controlled hero is spawned so the demo is always playable.
use bevy::prelude::*;
use hopper::camera::spawn_follow_camera;
use hopper::level::{load_level_from_dir, spawn_level, LEVELS_DIR};
use hopper::physics::ArcadeWorld;
use hopper::player::{load_players_from_dir, spawn_player, PlayerConfig, PlayerHooks, SpawnContext, PLAYERS_DIR};
use hopper::camera::DeadzoneConfig;
use hopper::settings::Settings;

/// Fallback hero used when no player files are present.
fn default_hero() -> PlayerConfig {
    PlayerConfig {
        x: 100.0,
        y: 300.0,
        width: 32.0,
        height: 48.0,
        follow: true,
        deadzone: Some(DeadzoneConfig { left: 0.4, width: 0.2 }),
        jumps: 2,
        jump: -400.0,
        controls: true,
        ..default()
    }
}

/// Hooks shared by every demo player: a minimal animation table if the
/// config brought none, and a log line per jump.
fn demo_hooks() -> PlayerHooks {
    PlayerHooks::default()
        .with_setup(|parts| {
            for (name, frames) in [("wait", vec![0]), ("left", vec![1, 2, 3, 2]), ("jump", vec![4])] {
                if !parts.animations.contains(name) {
                    parts.animations.add(name, frames);
                }
            }
        })
        .with_on_jump(|player, index| debug!("jump {} of {}", index + 1, player.total_jumps))
}

#[allow(clippy::needless_pass_by_value)]
pub fn setup(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
    mut world: ResMut<ArcadeWorld>,
    settings: Res<Settings>,
) {
    let viewport = settings.graphics.viewport();
    spawn_follow_camera(&mut commands, viewport);

    let level = load_level_from_dir(LEVELS_DIR);
    spawn_level(&mut commands, &mut world, &level);

    let mut configs = load_players_from_dir(PLAYERS_DIR);
    if configs.is_empty() {
        warn!("no player definitions in {PLAYERS_DIR}, spawning the default hero");
        configs.push(default_hero());
    }

    for config in configs {
        let ctx = SpawnContext { viewport, controls: &settings.controls };
        spawn_player(&mut commands, &asset_server, &mut layouts, config, demo_hooks(), ctx);
    }
}
