//! Debug dump (F3 by default): writes FPS, entity counts, physics settings and
//! the full state of every player to a timestamped text file in `./debug-dumps/`.
//!
//! Useful for capturing a bug report mid-jump without attaching a debugger.
use bevy::diagnostic::{Diagnostic, DiagnosticPath, DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use chrono::{DateTime, Utc};
use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

use crate::animation::SpriteAnimations;
use crate::camera::{CameraFollow, CameraView};
use crate::physics::{ArcadeBody, ArcadeWorld};
use crate::player::PlayerEntity;
use crate::settings::Settings;
use crate::ui::describe_player;

pub const DUMP_DIR: &str = "debug-dumps";

pub struct DebugDumpPlugin;

impl Plugin for DebugDumpPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, debug_input_system);
    }
}

/// Everything a dump reports, gathered before formatting.
pub struct DumpSnapshot {
    pub taken_at: DateTime<Utc>,
    pub fps: f64,
    pub frame_time: f64,
    pub entity_count: usize,
    pub gravity: Vec2,
    pub bounds: Rect,
    pub camera: Option<(Vec2, Option<Rect>)>,
    pub players: Vec<String>,
}

impl DumpSnapshot {
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        writeln!(out, "Debug dump: {}", self.taken_at.timestamp()).ok();
        writeln!(out, "Timestamp: {}", self.taken_at.format("%Y-%m-%d %H:%M:%S")).ok();
        writeln!(out, "FPS: {:.1}, frame_time: {:.4} ms", self.fps, self.frame_time).ok();
        writeln!(out, "Entities: {}", self.entity_count).ok();
        writeln!(
            out,
            "Physics: gravity=({:.1}, {:.1}) bounds=({:.0}, {:.0})..({:.0}, {:.0})",
            self.gravity.x, self.gravity.y, self.bounds.min.x, self.bounds.min.y, self.bounds.max.x, self.bounds.max.y
        )
        .ok();
        match self.camera {
            Some((pos, dz)) => {
                writeln!(out, "Camera: view at ({:.0}, {:.0}) deadzone {:?}", pos.x, pos.y, dz).ok();
            }
            None => {
                writeln!(out, "Camera: not following").ok();
            }
        }
        writeln!(out, "\nPlayers ({}):", self.players.len()).ok();
        for line in &self.players {
            writeln!(out, "  {line}").ok();
        }
        out
    }

    /// `<dir>/debug-<epoch secs>.txt`
    #[must_use]
    pub fn file_name(&self, dir: &Path) -> PathBuf {
        dir.join(format!("debug-{}.txt", self.taken_at.timestamp()))
    }
}

/// Write `snapshot` under `dir`, creating the directory if needed.
///
/// # Errors
/// Returns the I/O error from creating the directory or writing the file.
pub fn write_dump(snapshot: &DumpSnapshot, dir: &Path) -> std::io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = snapshot.file_name(dir);
    fs::write(&path, snapshot.to_text())?;
    Ok(path)
}

#[allow(clippy::needless_pass_by_value, clippy::too_many_arguments)]
fn debug_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    settings: Option<Res<Settings>>,
    diagnostics: Option<Res<DiagnosticsStore>>,
    world: Option<Res<ArcadeWorld>>,
    follow: Option<Res<CameraFollow>>,
    views: Query<&CameraView>,
    entities: Query<Entity>,
    players: Query<(Entity, &PlayerEntity, &ArcadeBody, Option<&SpriteAnimations>)>,
) {
    let key = settings.map_or(KeyCode::F3, |s| s.controls.key_for("dump_debug", KeyCode::F3));
    if !keys.just_pressed(key) {
        return;
    }

    let smoothed = |path: &DiagnosticPath| {
        diagnostics
            .as_ref()
            .and_then(|d| d.get(path))
            .and_then(Diagnostic::smoothed)
            .unwrap_or(0.0)
    };
    let world = world.map(|w| w.clone()).unwrap_or_default();

    let snapshot = DumpSnapshot {
        taken_at: Utc::now(),
        fps: smoothed(&FrameTimeDiagnosticsPlugin::FPS),
        frame_time: smoothed(&FrameTimeDiagnosticsPlugin::FRAME_TIME),
        entity_count: entities.iter().count(),
        gravity: world.gravity,
        bounds: world.bounds,
        camera: follow.and_then(|f| views.get_single().ok().map(|v| (v.position, f.deadzone))),
        players: players
            .iter()
            .map(|(e, p, b, a)| format!("{e:?}: {}", describe_player(p, b, a)))
            .collect(),
    };

    match write_dump(&snapshot, Path::new(DUMP_DIR)) {
        Ok(path) => info!("wrote debug dump: {}", path.display()),
        Err(e) => error!("debug dump: failed to write into '{DUMP_DIR}': {e}"),
    }
}
