use bevy::diagnostic::{FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin};
use bevy::prelude::*;
use bevy::window::{PresentMode, Window, WindowPlugin, WindowResolution};
use hopper::animation::SpriteAnimationPlugin;
use hopper::camera::CameraFollowPlugin;
use hopper::debug::DebugDumpPlugin;
use hopper::physics::{sync_physics_settings, ArcadePhysicsPlugin, PhysicsSet};
use hopper::player::PlayerPlugin;
use hopper::settings::loader as settings_loader;
use hopper::ui::DebugOverlayPlugin;

mod app;
use app::{setup, sync_display_settings};

fn main() {
    let settings = settings_loader::load_settings_from_dir(settings_loader::SETTINGS_DIR);
    let settings_watcher = settings_loader::setup_settings_watcher(settings_loader::SETTINGS_DIR)
        .unwrap_or_else(|_| settings_loader::SettingsWatcher::stub());

    let mut app = App::new();

    let viewport = settings.graphics.viewport();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "hopper".into(),
                position: WindowPosition::Centered(MonitorSelection::Primary),
                resolution: WindowResolution::new(viewport.x, viewport.y),
                present_mode: if settings.graphics.vsync { PresentMode::Fifo } else { PresentMode::AutoNoVsync },
                ..default()
            }),
            ..default()
        }))
        .add_plugins(FrameTimeDiagnosticsPlugin)
        .add_plugins(LogDiagnosticsPlugin::default())
        .add_plugins(ArcadePhysicsPlugin)
        .add_plugins(PlayerPlugin)
        .add_plugins(CameraFollowPlugin)
        .add_plugins(SpriteAnimationPlugin)
        .add_plugins(DebugOverlayPlugin)
        .add_plugins(DebugDumpPlugin);

    app.insert_resource(settings.clone());
    app.insert_resource(settings_watcher);

    app.add_systems(Startup, setup);

    app.add_systems(Update, settings_loader::check_settings_changes);
    app.add_systems(Update, sync_physics_settings.before(PhysicsSet));
    app.add_systems(Update, sync_display_settings);

    app.run();
}
