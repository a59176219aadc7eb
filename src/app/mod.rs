pub mod display;
pub mod setup;

pub use display::sync_display_settings;
pub use setup::setup;
