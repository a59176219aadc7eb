//! Named sprite-sheet animations.
//!
//! A `SpriteAnimations` component holds a table of clips (name -> atlas frame
//! indices) and the clip currently playing. Gameplay code asks for a clip by
//! name with a frame rate and loop flag; `animate_sprites` advances the clip
//! and writes the current frame into the entity's `TextureAtlas`.

use bevy::prelude::*;
use std::collections::HashMap;

/// Ordered frame indices into a texture atlas.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimationClip {
    pub frames: Vec<usize>,
}

/// A request to play a clip, as produced by gameplay logic.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationRequest {
    pub name: &'static str,
    pub fps: f32,
    pub looping: bool,
}

impl AnimationRequest {
    #[must_use]
    pub const fn looping(name: &'static str, fps: f32) -> Self {
        Self { name, fps, looping: true }
    }
}

#[derive(Debug, Clone)]
struct Playback {
    name: String,
    cursor: usize,
    timer: Timer,
    looping: bool,
    finished: bool,
}

#[derive(Component, Debug, Clone, Default)]
pub struct SpriteAnimations {
    clips: HashMap<String, AnimationClip>,
    playback: Option<Playback>,
}

impl SpriteAnimations {
    /// Register (or replace) a clip.
    pub fn add(&mut self, name: impl Into<String>, frames: Vec<usize>) {
        self.clips.insert(name.into(), AnimationClip { frames });
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.clips.contains_key(name)
    }

    /// Name of the clip being played, if any.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.playback.as_ref().map(|p| p.name.as_str())
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playback.as_ref().is_some_and(|p| !p.finished)
    }

    /// Start `name` at `fps` frames per second.
    ///
    /// Asking for the clip that is already running is a no-op so per-frame
    /// callers do not keep rewinding it. Unknown names and non-positive
    /// frame rates are ignored.
    ///
    /// # Returns
    /// `true` if the clip is (now) playing.
    pub fn play(&mut self, name: &str, fps: f32, looping: bool) -> bool {
        if self.is_playing() && self.current() == Some(name) {
            return true;
        }
        if !self.contains(name) {
            debug!("no animation named '{name}'");
            return false;
        }
        if fps <= 0.0 {
            return false;
        }
        self.playback = Some(Playback {
            name: name.to_string(),
            cursor: 0,
            timer: Timer::from_seconds(1.0 / fps, TimerMode::Repeating),
            looping,
            finished: false,
        });
        true
    }

    pub fn play_request(&mut self, request: &AnimationRequest) -> bool {
        self.play(request.name, request.fps, request.looping)
    }

    pub fn stop(&mut self) {
        if let Some(p) = self.playback.as_mut() {
            p.finished = true;
        }
    }

    /// Atlas index of the frame currently shown.
    #[must_use]
    pub fn frame(&self) -> Option<usize> {
        let p = self.playback.as_ref()?;
        self.clips.get(&p.name)?.frames.get(p.cursor).copied()
    }

    /// Advance playback by `dt`.
    ///
    /// # Returns
    /// The atlas index to display, when it changed or a clip just started.
    pub fn tick(&mut self, dt: std::time::Duration) -> Option<usize> {
        let p = self.playback.as_mut()?;
        if p.finished {
            return None;
        }
        let len = self.clips.get(&p.name)?.frames.len();
        if len == 0 {
            return None;
        }

        let started = p.timer.elapsed().is_zero() && p.cursor == 0;
        p.timer.tick(dt);
        let steps = p.timer.times_finished_this_tick() as usize;
        if steps == 0 {
            return if started { self.frame() } else { None };
        }

        let next = p.cursor + steps;
        if next >= len && !p.looping {
            p.cursor = len - 1;
            p.finished = true;
        } else {
            p.cursor = next % len;
        }
        self.frame()
    }
}

/// Ordering label for frame advancing, after whatever picks the clips.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnimationSet;

pub struct SpriteAnimationPlugin;

impl Plugin for SpriteAnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, animate_sprites.in_set(AnimationSet));
    }
}

/// Advance animations and push frames into texture atlases.
#[allow(clippy::needless_pass_by_value)]
pub fn animate_sprites(time: Res<Time>, mut q: Query<(&mut SpriteAnimations, Option<&mut TextureAtlas>)>) {
    for (mut anims, atlas) in &mut q {
        let Some(index) = anims.tick(time.delta()) else { continue };
        if let Some(mut atlas) = atlas {
            atlas.index = index;
        }
    }
}
