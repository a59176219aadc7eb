//! Display-related systems: push vsync and viewport changes from a reloaded
//! `Settings` into the primary window and the follow camera.
use bevy::prelude::*;
use bevy::window::{PresentMode, PrimaryWindow};
use hopper::camera::CameraView;
use hopper::settings::Settings;

/// Sync `Settings.graphics` into the window and camera view.
///
/// # Arguments
/// - `settings`: the current settings resource.
/// - `windows`: the primary window, whose present mode and size are updated.
/// - `views`: camera views, resized so deadzones and clamping match the window.
/// - `last`: the last applied `(vsync, viewport)` to skip redundant writes.
pub fn sync_display_settings(
    settings: Res<Settings>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    mut views: Query<&mut CameraView>,
    mut last: Local<Option<(bool, Vec2)>>,
) {
    let desired = (settings.graphics.vsync, settings.graphics.viewport());
    if *last == Some(desired) {
        return;
    }

    let (vsync, viewport) = desired;
    for mut w in &mut windows {
        w.present_mode = if vsync { PresentMode::Fifo } else { PresentMode::AutoNoVsync };
        w.resolution.set(viewport.x, viewport.y);
    }
    for mut view in &mut views {
        view.size = viewport;
    }
    *last = Some(desired);
}
