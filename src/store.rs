//! Orb score store
//!
//! Single writer of the mini-game score. Mutated only through [`GameStore::collect`]
//! and [`GameStore::reset`]; every score change is written straight through to
//! storage. The easter egg unlock is derived from the score the first time it
//! reaches [`EASTER_EGG_THRESHOLD`].

use std::collections::HashSet;

use crate::consts::{
    EASTER_EGG_NOTIFICATION_SECS, EASTER_EGG_SEEN_KEY, EASTER_EGG_THRESHOLD, SCORE_KEY,
};
use crate::persistence::{KeyValueStore, read_or_none, remove_or_warn, write_or_warn};
use crate::settings::CelebrationPolicy;
use crate::sim::OrbId;

/// Parse a persisted score. Anything but a non-negative base-10 integer is 0.
pub fn parse_score(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse::<u32>().ok()).unwrap_or(0)
}

/// Score state for the orb mini-game
#[derive(Debug)]
pub struct GameStore<S: KeyValueStore> {
    storage: S,
    celebration: CelebrationPolicy,
    score: u32,
    /// Ids already credited this session (never pruned)
    collected: HashSet<OrbId>,
    easter_egg_unlocked: bool,
    /// Seconds left on the unlock banner (0 = hidden)
    notification_remaining: f32,
}

impl<S: KeyValueStore> GameStore<S> {
    /// Hydrate from storage and evaluate the unlock rule against the loaded score
    pub fn load(storage: S, celebration: CelebrationPolicy) -> Self {
        let raw = read_or_none(&storage, SCORE_KEY);
        let score = parse_score(raw.as_deref());
        log::info!("Orb score loaded: {score}");

        let mut store = Self {
            storage,
            celebration,
            score,
            collected: HashSet::new(),
            easter_egg_unlocked: false,
            notification_remaining: 0.0,
        };
        // Unreadable records are rewritten in canonical form
        if let Some(raw) = raw.filter(|raw| *raw != score.to_string()) {
            log::warn!("Normalising stored orb score {raw:?} to {score}");
            write_or_warn(&mut store.storage, SCORE_KEY, &score.to_string());
        }
        store.evaluate_unlock();
        store
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn easter_egg_unlocked(&self) -> bool {
        self.easter_egg_unlocked
    }

    pub fn show_easter_egg_notification(&self) -> bool {
        self.notification_remaining > 0.0
    }

    pub fn is_collected(&self, id: OrbId) -> bool {
        self.collected.contains(&id)
    }

    pub fn collected_count(&self) -> usize {
        self.collected.len()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Credit an orb. Returns false if this id was already credited.
    pub fn collect(&mut self, id: OrbId) -> bool {
        if !self.collected.insert(id) {
            log::debug!("Orb {id} already credited");
            return false;
        }

        self.score = self.score.saturating_add(1);
        write_or_warn(&mut self.storage, SCORE_KEY, &self.score.to_string());
        log::debug!("Orb {id} collected, score {}", self.score);

        self.evaluate_unlock();
        true
    }

    /// Clear score, credited ids and the unlock, and delete persisted records
    pub fn reset(&mut self) {
        self.score = 0;
        self.collected.clear();
        self.easter_egg_unlocked = false;
        self.notification_remaining = 0.0;
        remove_or_warn(&mut self.storage, SCORE_KEY);
        remove_or_warn(&mut self.storage, EASTER_EGG_SEEN_KEY);
        log::info!("Orb game reset");
    }

    /// Hide the unlock banner early
    pub fn dismiss_notification(&mut self) {
        self.notification_remaining = 0.0;
    }

    /// Count down the unlock banner
    pub fn advance(&mut self, dt: f32) {
        if self.notification_remaining > 0.0 {
            self.notification_remaining = (self.notification_remaining - dt).max(0.0);
        }
    }

    fn evaluate_unlock(&mut self) {
        if self.easter_egg_unlocked || self.score < EASTER_EGG_THRESHOLD {
            return;
        }
        self.easter_egg_unlocked = true;

        let already_seen = self.celebration == CelebrationPolicy::Once
            && read_or_none(&self.storage, EASTER_EGG_SEEN_KEY).is_some();
        if already_seen {
            log::debug!("Easter egg already celebrated, banner suppressed");
            return;
        }

        self.notification_remaining = EASTER_EGG_NOTIFICATION_SECS;
        if self.celebration == CelebrationPolicy::Once {
            write_or_warn(&mut self.storage, EASTER_EGG_SEEN_KEY, "1");
        }
        log::info!("Easter egg unlocked at score {}", self.score);
    }
}
