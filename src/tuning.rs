//! Data-driven simulation parameters
//!
//! All values are per 60 Hz tick. Defaults reproduce the live site's
//! look; partial JSON overrides are accepted (`#[serde(default)]`).

use serde::{Deserialize, Serialize};

/// Inclusive-exclusive range used for random seeding
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f32,
    pub max: f32,
}

impl Range {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Map a unit sample `t ∈ [0, 1)` into the range
    #[inline]
    pub fn lerp(&self, t: f32) -> f32 {
        self.min + (self.max - self.min) * t
    }

    pub fn contains(&self, v: f32) -> bool {
        v >= self.min && v < self.max
    }
}

/// Ambient background parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundTuning {
    /// Overwash color (r, g, b) and alpha for the motion-trail effect
    pub overwash_rgb: (u8, u8, u8),
    pub overwash_alpha: f32,

    pub star_size: Range,
    pub star_speed: Range,
    pub star_twinkle_rate: f32,

    pub asteroid_size: Range,
    pub asteroid_speed: Range,
    /// Horizontal drift as a fraction of vertical speed
    pub asteroid_drift_ratio: f32,
    pub asteroid_spin: Range,
    pub asteroid_opacity: Range,
    pub asteroid_vertices: usize,

    pub nebula_radius: Range,
    pub nebula_hue: Range,
    pub nebula_opacity: Range,
    pub nebula_drift: Range,

    pub shooting_star_max: usize,
    /// Spawn chance per tick
    pub shooting_star_chance: f32,
    pub shooting_star_length: Range,
    pub shooting_star_speed: Range,
    pub shooting_star_angle: f32,
    pub shooting_star_angle_jitter: f32,
    pub shooting_star_fade: f32,

    pub ember_max: usize,
    pub ember_chance: f32,
    pub ember_speed: Range,
    pub ember_size: Range,
    pub ember_hue: Range,
    pub ember_opacity: Range,
    pub ember_fade: f32,
    pub ember_sway: f32,
    pub ember_sway_freq: f32,
    /// Spawn offset below the bottom edge and removal offset above the top
    pub ember_margin: f32,
}

impl Default for BackgroundTuning {
    fn default() -> Self {
        Self {
            overwash_rgb: (3, 0, 20),
            overwash_alpha: 0.1,

            star_size: Range::new(0.5, 2.0),
            star_speed: Range::new(0.1, 0.6),
            star_twinkle_rate: 0.02,

            asteroid_size: Range::new(3.0, 11.0),
            asteroid_speed: Range::new(0.2, 0.5),
            asteroid_drift_ratio: 0.3,
            asteroid_spin: Range::new(-0.005, 0.005),
            asteroid_opacity: Range::new(0.15, 0.30),
            asteroid_vertices: 6,

            nebula_radius: Range::new(100.0, 300.0),
            nebula_hue: Range::new(180.0, 240.0),
            nebula_opacity: Range::new(0.03, 0.05),
            nebula_drift: Range::new(-0.05, 0.05),

            shooting_star_max: 3,
            shooting_star_chance: 0.005,
            shooting_star_length: Range::new(80.0, 140.0),
            shooting_star_speed: Range::new(8.0, 16.0),
            shooting_star_angle: std::f32::consts::FRAC_PI_4,
            shooting_star_angle_jitter: 0.15,
            shooting_star_fade: 0.01,

            ember_max: 15,
            ember_chance: 0.02,
            ember_speed: Range::new(1.0, 3.0),
            ember_size: Range::new(2.0, 5.0),
            ember_hue: Range::new(180.0, 220.0),
            ember_opacity: Range::new(0.3, 0.7),
            ember_fade: 0.002,
            ember_sway: 0.5,
            ember_sway_freq: 0.01,
            ember_margin: 10.0,
        }
    }
}

/// Orb mini-game parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbTuning {
    pub count: usize,
    /// Initial velocity components are drawn from this range
    pub initial_speed: Range,
    pub radius: Range,
    pub hue: Range,
    pub alpha: Range,

    /// Pointer attraction only applies between these distances
    pub attraction_radius: f32,
    pub attraction_min_dist: f32,
    pub attraction_strength: f32,
    /// Multiplicative velocity damping per tick
    pub damping: f32,

    pub pulse_rate: f32,
    pub pulse_amplitude: f32,

    /// Per-tick radius growth and alpha decay while collecting
    pub collect_growth: f32,
    pub collect_fade: f32,
    /// Alpha below which a collecting orb is reseeded
    pub collect_reset_alpha: f32,

    /// Extra hit radius added around each orb
    pub hit_padding: f32,
}

impl Default for OrbTuning {
    fn default() -> Self {
        Self {
            count: 12,
            initial_speed: Range::new(-0.25, 0.25),
            radius: Range::new(8.0, 20.0),
            hue: Range::new(160.0, 220.0),
            alpha: Range::new(0.4, 0.7),

            attraction_radius: 150.0,
            attraction_min_dist: 20.0,
            attraction_strength: 0.02,
            damping: 0.99,

            pulse_rate: 0.05,
            pulse_amplitude: 2.0,

            collect_growth: 1.05,
            collect_fade: 0.9,
            collect_reset_alpha: 0.01,

            hit_padding: 10.0,
        }
    }
}
