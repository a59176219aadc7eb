pub mod animation;
pub mod camera;
pub mod level;
pub mod physics;
pub mod player;
pub mod ron;
pub use crate::ron as ron_loader;
pub mod ui;

pub mod settings;
pub mod debug;
