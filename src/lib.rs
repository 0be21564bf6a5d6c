//! Orbfield - ambient space background and hidden orb mini-game
//!
//! Core modules:
//! - `sim`: Fixed-step simulation (background pools, orb physics, hit testing)
//! - `store`: Orb score store (collect/reset, unlock rule, write-through persistence)
//! - `renderer`: Canvas 2D drawing and color helpers
//! - `platform`: Frame clock and browser loop/listener plumbing
//! - `persistence`: Key/value storage backends
//! - `tuning`: Data-driven simulation parameters

pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod store;
pub mod tuning;
pub mod ui;

pub use session::Session;
pub use settings::{CelebrationPolicy, HitPolicy, QualityPreset, Settings};
pub use store::GameStore;

use glam::Vec2;

/// Configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest frame delta fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Score needed to unlock the easter egg
    pub const EASTER_EGG_THRESHOLD: u32 = 10;
    /// How long the unlock banner stays up (seconds)
    pub const EASTER_EGG_NOTIFICATION_SECS: f32 = 5.0;
    /// Lifetime of a "+1" popup (seconds)
    pub const FEEDBACK_SECS: f32 = 1.0;
    /// Score badge window after a collection (seconds)
    pub const SCORE_BADGE_SECS: f32 = 2.0;

    /// Storage key holding the score as a base-10 string
    pub const SCORE_KEY: &str = "creativeWebflow_orbScore";
    /// Storage key marking that the unlock banner has been shown once
    pub const EASTER_EGG_SEEN_KEY: &str = "creativeWebflow_orbEasterEggSeen";
    /// Storage key for the settings JSON
    pub const SETTINGS_KEY: &str = "orbfield_settings";
}

/// Wrap a coordinate into `[-margin, extent + margin]`.
///
/// Values already inside are returned untouched; values outside re-enter from
/// the opposite edge keeping their overshoot.
#[inline]
pub fn wrap_coord(value: f32, extent: f32, margin: f32) -> f32 {
    let lo = -margin;
    let hi = extent + margin;
    if value >= lo && value <= hi {
        return value;
    }
    let span = hi - lo;
    if span <= 0.0 {
        return lo;
    }
    (value - lo).rem_euclid(span) + lo
}

/// Returns true when `pos` lies inside the box `[-margin, size + margin]`
#[inline]
pub fn within_bounds(pos: Vec2, size: Vec2, margin: f32) -> bool {
    pos.x >= -margin && pos.x <= size.x + margin && pos.y >= -margin && pos.y <= size.y + margin
}
