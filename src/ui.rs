//! HUD overlay state for the orb game
//!
//! Pure timers; the web shell mirrors them into the DOM each frame.

use glam::Vec2;

use crate::consts::{FEEDBACK_SECS, SCORE_BADGE_SECS};
use crate::sim::OrbId;

/// A floating "+1" at a click position
#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub id: OrbId,
    pub at: Vec2,
    /// Seconds left before it disappears
    pub remaining: f32,
}

impl Feedback {
    /// Animation progress in [0, 1]
    pub fn progress(&self) -> f32 {
        (1.0 - self.remaining / FEEDBACK_SECS).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Hud {
    pub feedback: Vec<Feedback>,
    badge_remaining: f32,
}

impl Hud {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a collected orb
    pub fn on_collect(&mut self, id: OrbId, at: Vec2) {
        self.feedback.push(Feedback {
            id,
            at,
            remaining: FEEDBACK_SECS,
        });
        self.badge_remaining = SCORE_BADGE_SECS;
    }

    /// Score badge shows during the post-collect window, or whenever there is a score
    pub fn badge_visible(&self, score: u32) -> bool {
        self.badge_remaining > 0.0 || score > 0
    }

    pub fn advance(&mut self, dt: f32) {
        self.badge_remaining = (self.badge_remaining - dt).max(0.0);
        for f in self.feedback.iter_mut() {
            f.remaining -= dt;
        }
        self.feedback.retain(|f| f.remaining > 0.0);
    }
}
