//! Debug overlay and collision gizmos.
//!
//! F1 (the `toggle_debug` keybind) shows a text overlay with FPS and the
//! state of every player. F2 draws body boxes, platforms and the camera
//! deadzone. The overlay refreshes on a timer rather than every frame.

use bevy::diagnostic::{Diagnostic, DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use std::fmt::Write;

use crate::animation::SpriteAnimations;
use crate::camera::{CameraFollow, CameraView};
use crate::physics::{world_to_render, ArcadeBody, StaticCollider};
use crate::player::PlayerEntity;
use crate::settings::Settings;

/// State for the debug overlay visibility.
#[derive(Resource, Default)]
pub struct DebugOverlayState {
    pub visible: bool,
}

#[derive(Resource, Default)]
pub struct DebugOverlayTimer(pub Timer);

#[derive(Resource, Default)]
pub struct DebugGizmosVisible(pub bool);

#[derive(Component)]
pub struct DebugOverlayText;

pub struct DebugOverlayPlugin;

impl Plugin for DebugOverlayPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(DebugOverlayTimer(Timer::from_seconds(0.25, TimerMode::Repeating)))
            .init_resource::<DebugOverlayState>()
            .init_resource::<DebugGizmosVisible>()
            .add_systems(Startup, spawn_debug_overlay)
            .add_systems(Update, (toggle_debug_overlay, toggle_debug_gizmos, update_debug_overlay, render_debug_gizmos));
    }
}

pub fn spawn_debug_overlay(mut commands: Commands, settings: Option<Res<Settings>>) {
    let visible = settings.is_some_and(|s| s.debug.overlay_on_start);
    commands.insert_resource(DebugOverlayState { visible });

    commands.spawn((
        TextBundle {
            text: Text::from_section(
                "",
                TextStyle {
                    font_size: 16.0,
                    color: Color::srgb(1.0, 1.0, 0.0),
                    ..default()
                },
            ),
            style: Style {
                position_type: PositionType::Absolute,
                left: Val::Px(10.0),
                top: Val::Px(10.0),
                ..default()
            },
            ..default()
        },
        DebugOverlayText,
    ));
}

#[allow(clippy::needless_pass_by_value)]
pub fn toggle_debug_overlay(
    mut state: ResMut<DebugOverlayState>,
    input: Res<ButtonInput<KeyCode>>,
    settings: Option<Res<Settings>>,
) {
    let key = settings.map_or(KeyCode::F1, |s| s.controls.key_for("toggle_debug", KeyCode::F1));
    if input.just_pressed(key) {
        state.visible = !state.visible;
    }
}

#[allow(clippy::needless_pass_by_value)]
pub fn toggle_debug_gizmos(mut shown: ResMut<DebugGizmosVisible>, input: Res<ButtonInput<KeyCode>>) {
    if input.just_pressed(KeyCode::F2) {
        shown.0 = !shown.0;
    }
}

/// One line per player: position, velocity, jumps, health and animation.
#[must_use]
pub fn describe_player(player: &PlayerEntity, body: &ArcadeBody, anims: Option<&SpriteAnimations>) -> String {
    format!(
        "pos ({:.0}, {:.0}) vel ({:.0}, {:.0}) jumps {}/{} hp {:.1} facing {:+} floor {} {} anim {}",
        body.position.x,
        body.position.y,
        body.velocity.x,
        body.velocity.y,
        player.current_jump,
        player.total_jumps,
        player.health,
        player.facing.sign(),
        body.on_floor(),
        if player.is_alive() { "alive" } else { "dead" },
        anims.and_then(SpriteAnimations::current).unwrap_or("-"),
    )
}

#[derive(bevy::ecs::system::SystemParam)]
pub struct DebugOverlayCtx<'w, 's> {
    pub diagnostics: Option<Res<'w, DiagnosticsStore>>,
    pub state: Res<'w, DebugOverlayState>,
    pub time: Res<'w, Time>,
    pub timer: ResMut<'w, DebugOverlayTimer>,
    pub text: Query<'w, 's, &'static mut Text, With<DebugOverlayText>>,
    pub players: Query<'w, 's, (Entity, &'static PlayerEntity, &'static ArcadeBody, Option<&'static SpriteAnimations>)>,
}

pub fn update_debug_overlay(mut ctx: DebugOverlayCtx<'_, '_>) {
    if !ctx.timer.0.tick(ctx.time.delta()).just_finished() {
        return;
    }

    let Ok(mut text) = ctx.text.get_single_mut() else { return };

    if !ctx.state.visible {
        text.sections[0].value = String::new();
        return;
    }

    let fps = ctx
        .diagnostics
        .as_ref()
        .and_then(|d| d.get(&FrameTimeDiagnosticsPlugin::FPS))
        .and_then(Diagnostic::smoothed)
        .unwrap_or(0.0);

    let mut out = format!("FPS: {fps:.1}\n");
    for (entity, player, body, anims) in &ctx.players {
        writeln!(out, "{entity:?}: {}", describe_player(player, body, anims)).ok();
    }
    text.sections[0].value = out;
}

fn rect_lines(gizmos: &mut Gizmos, rect: Rect, color: Color) {
    let corners = [
        Vec2::new(rect.min.x, rect.min.y),
        Vec2::new(rect.max.x, rect.min.y),
        Vec2::new(rect.max.x, rect.max.y),
        Vec2::new(rect.min.x, rect.max.y),
    ]
    .map(world_to_render);
    for i in 0..4 {
        gizmos.line_2d(corners[i], corners[(i + 1) % 4], color);
    }
}

/// Outline bodies (green), platforms (blue) and the deadzone (red).
#[allow(clippy::needless_pass_by_value)]
pub fn render_debug_gizmos(
    shown: Res<DebugGizmosVisible>,
    mut gizmos: Gizmos,
    bodies: Query<&ArcadeBody>,
    platforms: Query<&StaticCollider>,
    follow: Option<Res<CameraFollow>>,
    views: Query<&CameraView>,
) {
    if !shown.0 {
        return;
    }

    for body in &bodies {
        let color = if body.on_floor() { Color::srgb(0.0, 1.0, 0.0) } else { Color::srgb(0.6, 1.0, 0.6) };
        rect_lines(&mut gizmos, body.rect(), color);
    }
    for platform in &platforms {
        rect_lines(&mut gizmos, platform.rect, Color::srgb(0.2, 0.4, 1.0));
    }

    let (Some(follow), Ok(view)) = (follow, views.get_single()) else { return };
    if let Some(dz) = follow.deadzone {
        let world_dz = Rect { min: dz.min + view.position, max: dz.max + view.position };
        rect_lines(&mut gizmos, world_dz, Color::srgba(1.0, 0.0, 0.0, 0.5));
    }
}
