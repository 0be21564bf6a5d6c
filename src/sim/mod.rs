//! Fixed-step simulation module
//!
//! All per-frame state updates live here. This module must stay free of
//! drawing and platform code:
//! - Fixed timestep only (one call = one 60 Hz tick)
//! - Seeded RNG only
//! - Stable iteration order (pool slot order)

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{OrbHit, click, point_hits_orb, wrap_position};
pub use state::{
    Asteroid, Background, Ember, Nebula, Orb, OrbField, OrbId, OrbPhase, ShootingStar, Star,
};
pub use tick::{tick_background, tick_orbs};
