//! Simulation entities and their fixed-size pools
//!
//! Pools are plain `Vec`s sized once at construction. Pooled entities are
//! recycled in place and never removed; only the transient streaks
//! (shooting stars, embers) come and go.

use std::fmt;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::settings::PoolSizes;
use crate::tuning::{BackgroundTuning, OrbTuning, Range};

/// Unique orb instance id. A fresh id is issued on every reseed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrbId(pub u64);

impl fmt::Display for OrbId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Sample a range with the simulation RNG
#[inline]
pub(crate) fn sample(rng: &mut Pcg32, range: Range) -> f32 {
    range.lerp(rng.random::<f32>())
}

/// Orb lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbPhase {
    /// Floating, clickable
    Idle,
    /// Hit; growing and fading until reseeded
    Collecting,
}

/// A clickable floating orb
#[derive(Debug, Clone)]
pub struct Orb {
    pub id: OrbId,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Current (pulsing or growing) radius
    pub radius: f32,
    pub base_radius: f32,
    pub hue: f32,
    pub alpha: f32,
    /// Pulse phase counter
    pub pulse: f32,
    pub phase: OrbPhase,
}

impl Orb {
    pub fn spawn(id: OrbId, bounds: Vec2, tuning: &OrbTuning, rng: &mut Pcg32) -> Self {
        let pos = Vec2::new(rng.random::<f32>() * bounds.x, rng.random::<f32>() * bounds.y);
        let vel = Vec2::new(
            sample(rng, tuning.initial_speed),
            sample(rng, tuning.initial_speed),
        );
        let radius = sample(rng, tuning.radius);
        Self {
            id,
            pos,
            vel,
            radius,
            base_radius: radius,
            hue: sample(rng, tuning.hue),
            alpha: sample(rng, tuning.alpha),
            pulse: 0.0,
            phase: OrbPhase::Idle,
        }
    }

    #[inline]
    pub fn is_collecting(&self) -> bool {
        self.phase == OrbPhase::Collecting
    }
}

/// The orb mini-game world
#[derive(Debug, Clone)]
pub struct OrbField {
    pub orbs: Vec<Orb>,
    /// Canvas size in pixels
    pub bounds: Vec2,
    /// Last known pointer position (None until the pointer first moves)
    pub pointer: Option<Vec2>,
    pub tuning: OrbTuning,
    rng: Pcg32,
    next_id: u64,
}

impl OrbField {
    pub fn new(seed: u64, width: f32, height: f32, tuning: OrbTuning) -> Self {
        let mut field = Self {
            orbs: Vec::with_capacity(tuning.count),
            bounds: Vec2::new(width, height),
            pointer: None,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };
        for _ in 0..field.tuning.count {
            let id = field.next_orb_id();
            let orb = Orb::spawn(id, field.bounds, &field.tuning, &mut field.rng);
            field.orbs.push(orb);
        }
        field
    }

    /// Allocate a new orb id
    pub fn next_orb_id(&mut self) -> OrbId {
        let id = OrbId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Replace the orb in `slot` with a freshly seeded one
    pub fn reseed(&mut self, slot: usize) {
        let id = self.next_orb_id();
        let orb = Orb::spawn(id, self.bounds, &self.tuning, &mut self.rng);
        self.orbs[slot] = orb;
    }

    /// Track a new canvas size; entity state is kept
    pub fn resize(&mut self, width: f32, height: f32) {
        self.bounds = Vec2::new(width, height);
    }
}

/// Background star
#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    pub twinkle: f32,
}

impl Star {
    /// Draw brightness in [0, 0.7]
    pub fn brightness(&self) -> f32 {
        (0.5 + self.twinkle.sin() * 0.5) * 0.7
    }
}

/// Slow tumbling rock drawn as an irregular polygon
#[derive(Debug, Clone)]
pub struct Asteroid {
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
    pub opacity: f32,
}

/// Soft radial glow drifting sideways
#[derive(Debug, Clone)]
pub struct Nebula {
    pub pos: Vec2,
    pub radius: f32,
    pub hue: f32,
    pub opacity: f32,
    pub drift: f32,
}

/// Transient streak crossing the sky
#[derive(Debug, Clone)]
pub struct ShootingStar {
    pub pos: Vec2,
    pub length: f32,
    pub speed: f32,
    pub angle: f32,
    pub opacity: f32,
}

impl ShootingStar {
    #[inline]
    pub fn direction(&self) -> Vec2 {
        Vec2::new(self.angle.cos(), self.angle.sin())
    }

    /// End of the fading tail
    pub fn tail(&self) -> Vec2 {
        self.pos - self.direction() * self.length
    }
}

/// Transient glowing particle floating upward
#[derive(Debug, Clone)]
pub struct Ember {
    pub pos: Vec2,
    pub speed: f32,
    pub size: f32,
    pub hue: f32,
    pub opacity: f32,
}

/// The ambient background world
#[derive(Debug, Clone)]
pub struct Background {
    pub stars: Vec<Star>,
    pub asteroids: Vec<Asteroid>,
    pub nebulae: Vec<Nebula>,
    pub shooting_stars: Vec<ShootingStar>,
    pub embers: Vec<Ember>,
    pub bounds: Vec2,
    pub tuning: BackgroundTuning,
    pub embers_enabled: bool,
    rng: Pcg32,
}

impl Background {
    pub fn new(seed: u64, width: f32, height: f32, pools: PoolSizes, tuning: BackgroundTuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let bounds = Vec2::new(width, height);

        let stars = (0..pools.stars)
            .map(|_| Star {
                pos: random_point(&mut rng, bounds),
                size: sample(&mut rng, tuning.star_size),
                speed: sample(&mut rng, tuning.star_speed),
                twinkle: rng.random::<f32>() * std::f32::consts::TAU,
            })
            .collect();

        let asteroids = (0..pools.asteroids)
            .map(|_| Asteroid {
                pos: random_point(&mut rng, bounds),
                size: sample(&mut rng, tuning.asteroid_size),
                speed: sample(&mut rng, tuning.asteroid_speed),
                rotation: 0.0,
                rotation_speed: sample(&mut rng, tuning.asteroid_spin),
                opacity: sample(&mut rng, tuning.asteroid_opacity),
            })
            .collect();

        let nebulae = (0..pools.nebulae)
            .map(|_| Nebula {
                pos: random_point(&mut rng, bounds),
                radius: sample(&mut rng, tuning.nebula_radius),
                hue: sample(&mut rng, tuning.nebula_hue),
                opacity: sample(&mut rng, tuning.nebula_opacity),
                drift: sample(&mut rng, tuning.nebula_drift),
            })
            .collect();

        Self {
            stars,
            asteroids,
            nebulae,
            shooting_stars: Vec::with_capacity(tuning.shooting_star_max),
            embers: Vec::with_capacity(tuning.ember_max),
            bounds,
            embers_enabled: pools.embers,
            tuning,
            rng,
        }
    }

    /// Track a new canvas size; entity state is kept
    pub fn resize(&mut self, width: f32, height: f32) {
        self.bounds = Vec2::new(width, height);
    }

    pub(crate) fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }
}

fn random_point(rng: &mut Pcg32, bounds: Vec2) -> Vec2 {
    Vec2::new(rng.random::<f32>() * bounds.x, rng.random::<f32>() * bounds.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::QualityPreset;

    #[test]
    fn test_orb_field_pool_and_unique_ids() {
        let field = OrbField::new(7, 800.0, 600.0, OrbTuning::default());
        assert_eq!(field.orbs.len(), 12);

        let mut ids: Vec<_> = field.orbs.iter().map(|o| o.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 12);

        let tuning = OrbTuning::default();
        for orb in &field.orbs {
            assert!(tuning.radius.contains(orb.base_radius));
            assert!(tuning.alpha.contains(orb.alpha));
            assert!(orb.pos.x >= 0.0 && orb.pos.x < 800.0);
            assert_eq!(orb.phase, OrbPhase::Idle);
        }
    }

    #[test]
    fn test_reseed_issues_new_id() {
        let mut field = OrbField::new(7, 800.0, 600.0, OrbTuning::default());
        let old = field.orbs[3].id;
        field.reseed(3);
        assert_ne!(field.orbs[3].id, old);
        assert!(field.orbs.iter().all(|o| o.id != old));
        assert_eq!(field.orbs.len(), 12);
    }

    #[test]
    fn test_background_pools_follow_preset() {
        let pools = QualityPreset::Medium.pool_sizes();
        let bg = Background::new(1, 1024.0, 768.0, pools, BackgroundTuning::default());
        assert_eq!(bg.stars.len(), 150);
        assert_eq!(bg.asteroids.len(), 8);
        assert_eq!(bg.nebulae.len(), 5);
        assert!(bg.shooting_stars.is_empty());
        assert!(bg.embers.is_empty());
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = OrbField::new(42, 640.0, 480.0, OrbTuning::default());
        let b = OrbField::new(42, 640.0, 480.0, OrbTuning::default());
        for (x, y) in a.orbs.iter().zip(&b.orbs) {
            assert_eq!(x.pos, y.pos);
            assert_eq!(x.base_radius, y.base_radius);
        }
    }

    #[test]
    fn test_shooting_star_tail() {
        let s = ShootingStar {
            pos: Vec2::new(100.0, 100.0),
            length: 10.0,
            speed: 8.0,
            angle: 0.0,
            opacity: 1.0,
        };
        assert!((s.tail() - Vec2::new(90.0, 100.0)).length() < 1e-4);
    }
}
