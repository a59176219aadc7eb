//! Platformer player: options, the entity itself, controls and Bevy systems.
//!
//! # Example:
//!
//! ```no_run
//! use bevy::prelude::*;
//! use hopper::animation::SpriteAnimationPlugin;
//! use hopper::camera::CameraFollowPlugin;
//! use hopper::physics::ArcadePhysicsPlugin;
//! use hopper::player::{PlayerConfig, PlayerHooks, PlayerPlugin, SpawnContext, spawn_player};
//! use hopper::settings::Settings;
//!
//! fn setup(
//!     mut commands: Commands,
//!     assets: Res<AssetServer>,
//!     mut layouts: ResMut<Assets<TextureAtlasLayout>>,
//!     settings: Res<Settings>,
//! ) {
//!     let config = PlayerConfig { controls: true, follow: true, jumps: 2, ..default() };
//!     let hooks = PlayerHooks::default().with_on_jump(|_, i| info!("jump #{i}"));
//!     let ctx = SpawnContext { viewport: settings.graphics.viewport(), controls: &settings.controls };
//!     spawn_player(&mut commands, &assets, &mut layouts, config, hooks, ctx);
//! }
//!
//! App::new()
//!     .add_plugins((ArcadePhysicsPlugin, PlayerPlugin, CameraFollowPlugin, SpriteAnimationPlugin))
//!     .add_systems(Startup, setup);
//! ```
pub mod config;
pub mod controls;
pub mod entity;
pub mod systems;

pub use config::*;
pub use controls::*;
pub use entity::*;
pub use systems::*;
