use criterion::{black_box, criterion_group, criterion_main, Criterion};

use bevy::prelude::{Rect, Transform, Vec2};
use hopper::camera::CameraView;
use hopper::physics::{body_step, ArcadeBody, ArcadeWorld};
use hopper::player::{ControlState, PlayerConfig, PlayerEntity, PlayerHooks, SpawnContext};
use hopper::settings::ControlsSettings;

const DT: f32 = 1.0 / 60.0;

/// A row of platforms spread across the default level width.
fn platforms() -> Vec<Rect> {
    (0..64)
        .map(|i| {
            let x = i as f32 * 50.0;
            let y = 300.0 + ((i * 37) % 200) as f32;
            Rect::new(x, y, x + 40.0, y + 16.0)
        })
        .collect()
}

/// Free fall and landing over many platforms.
fn bench_body_step(c: &mut Criterion) {
    let colliders = platforms();
    let world = ArcadeWorld::default();

    c.bench_function("body_step", |b| {
        b.iter(|| {
            let mut body = ArcadeBody::new(Vec2::new(100.0, 0.0), Vec2::new(32.0, 48.0));
            body.collide_world_bounds = true;
            for i in 0..600usize {
                body.velocity.x = if (i / 120) % 2 == 0 { 200.0 } else { -200.0 };
                body_step(&mut body, black_box(&colliders), &world, DT);
            }
            black_box(body.position);
        })
    });
}

/// Player update under alternating input (deterministic LCG), with jumps.
fn bench_player_update(c: &mut Criterion) {
    let controls = ControlsSettings::default();
    let ctx = SpawnContext { viewport: Vec2::new(800.0, 600.0), controls: &controls };
    let colliders = platforms();
    let world = ArcadeWorld::default();

    c.bench_function("player_update", |b| {
        b.iter(|| {
            let config = PlayerConfig { jumps: 2, controls: true, ..Default::default() };
            let parts = PlayerEntity::build(config, PlayerHooks::default(), ctx);
            let (mut player, mut body) = (parts.player, parts.body);
            let mut transform = Transform::default();
            let mut state: u32 = 0x1234_5678;
            for _ in 0..600usize {
                state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                let input = match (state >> 16) % 3 {
                    0 => ControlState::LEFT,
                    1 => ControlState::RIGHT,
                    _ => ControlState::NONE,
                };
                if (state >> 8) % 17 == 0 {
                    let _ = player.jump(&mut body);
                }
                black_box(player.update(&mut body, &mut transform, input));
                body_step(&mut body, &colliders, &world, DT);
            }
            black_box((body.position, player.current_jump));
        })
    });
}

/// Deadzone follow plus bounds clamp over a target moving back and forth.
fn bench_camera_follow(c: &mut Criterion) {
    let bounds = Rect::new(0.0, 0.0, 3200.0, 600.0);
    let deadzone = Some(Rect::new(200.0, 0.0, 600.0, 600.0));

    c.bench_function("camera_follow", |b| {
        b.iter(|| {
            let mut view = CameraView::new(Vec2::new(800.0, 600.0));
            for i in 0..1_000usize {
                let x = (i as f32 * 7.3) % 3200.0;
                view.follow(black_box(Vec2::new(x, 300.0)), deadzone);
                view.clamp_to(bounds);
            }
            black_box(view.position);
        })
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(200);
    targets =
        bench_body_step,
        bench_player_update,
        bench_camera_follow,
}
criterion_main!(benches);
