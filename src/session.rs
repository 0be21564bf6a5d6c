//! Per-page runtime state for both canvases
//!
//! `Session` owns the orb field, the score store and the HUD timers, and is
//! what the web shell drives from its animation-frame loop. `Ambient` is the
//! independent background equivalent. Neither touches the DOM.

use glam::Vec2;

use crate::consts::SIM_DT;
use crate::persistence::KeyValueStore;
use crate::platform::FrameClock;
use crate::settings::{HitPolicy, Settings};
use crate::sim::{Background, OrbField, click, tick_background, tick_orbs};
use crate::store::GameStore;
use crate::tuning::{BackgroundTuning, OrbTuning};
use crate::ui::Hud;

/// Orb game session: field + store + HUD
pub struct Session<S: KeyValueStore> {
    pub field: OrbField,
    pub store: GameStore<S>,
    pub hud: Hud,
    hit_policy: HitPolicy,
    clock: FrameClock,
    /// Clicks received since the last frame
    pending_clicks: Vec<Vec2>,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(seed: u64, width: f32, height: f32, settings: &Settings, tuning: OrbTuning, storage: S) -> Self {
        Self {
            field: OrbField::new(seed, width, height, tuning),
            store: GameStore::load(storage, settings.celebration),
            hud: Hud::new(),
            hit_policy: settings.hit_policy,
            clock: FrameClock::new(),
            pending_clicks: Vec::new(),
        }
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.field.pointer = Some(Vec2::new(x, y));
    }

    /// Record a click; it is resolved at the start of the next frame
    pub fn queue_click(&mut self, x: f32, y: f32) {
        self.pending_clicks.push(Vec2::new(x, y));
    }

    /// Resolve a click now. Returns how many orbs were credited.
    pub fn click(&mut self, x: f32, y: f32) -> usize {
        let hits = click(&mut self.field, Vec2::new(x, y), self.hit_policy);
        let mut credited = 0;
        for hit in hits {
            if self.store.collect(hit.id) {
                self.hud.on_collect(hit.id, hit.at);
                credited += 1;
            }
        }
        credited
    }

    /// Run one display frame: pending clicks, then as many ticks as elapsed
    pub fn frame(&mut self, now_ms: f64) -> u32 {
        for point in std::mem::take(&mut self.pending_clicks) {
            self.click(point.x, point.y);
        }

        let ticks = self.clock.frame(now_ms);
        for _ in 0..ticks {
            self.step();
        }
        ticks
    }

    /// Advance exactly one tick
    pub fn step(&mut self) {
        tick_orbs(&mut self.field);
        self.store.advance(SIM_DT);
        self.hud.advance(SIM_DT);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.field.resize(width, height);
    }

    /// Forget the frame clock (tab hidden and shown again)
    pub fn resume(&mut self) {
        self.clock.reset();
    }

    pub fn dismiss_notification(&mut self) {
        self.store.dismiss_notification();
    }

    pub fn reset(&mut self) {
        self.store.reset();
    }
}

/// Ambient background: pools + frame clock
pub struct Ambient {
    pub background: Background,
    clock: FrameClock,
}

impl Ambient {
    pub fn new(seed: u64, width: f32, height: f32, settings: &Settings, tuning: BackgroundTuning) -> Self {
        Self {
            background: Background::new(seed, width, height, settings.quality.pool_sizes(), tuning),
            clock: FrameClock::new(),
        }
    }

    pub fn frame(&mut self, now_ms: f64) -> u32 {
        let ticks = self.clock.frame(now_ms);
        for _ in 0..ticks {
            tick_background(&mut self.background);
        }
        ticks
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.background.resize(width, height);
    }

    pub fn resume(&mut self) {
        self.clock.reset();
    }
}
