//! Site effect settings and preferences
//!
//! Persisted as JSON next to the score, through the same storage backend.

use serde::{Deserialize, Serialize};

use crate::consts::SETTINGS_KEY;
use crate::persistence::{KeyValueStore, read_or_none, write_or_warn};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

/// Background pool sizes for a preset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSizes {
    pub stars: usize,
    pub asteroids: usize,
    pub nebulae: usize,
    /// Whether ember particles spawn at all
    pub embers: bool,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Background pools for this preset (Medium is what the site ships)
    pub fn pool_sizes(&self) -> PoolSizes {
        match self {
            QualityPreset::Low => PoolSizes {
                stars: 60,
                asteroids: 4,
                nebulae: 3,
                embers: false,
            },
            QualityPreset::Medium => PoolSizes {
                stars: 150,
                asteroids: 8,
                nebulae: 5,
                embers: true,
            },
            QualityPreset::High => PoolSizes {
                stars: 250,
                asteroids: 12,
                nebulae: 7,
                embers: true,
            },
        }
    }
}

/// Quality override from a page query string (`?quality=low`)
pub fn quality_from_query(search: &str) -> Option<QualityPreset> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "quality")
        .and_then(|(_, value)| QualityPreset::parse(value))
}

/// How many overlapping orbs a single click may collect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HitPolicy {
    /// Every orb under the pointer is collected
    #[default]
    All,
    /// Only the first orb in pool order
    First,
}

/// When the easter egg banner is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CelebrationPolicy {
    /// On every page load whose persisted score is already past the threshold
    #[default]
    EveryLoad,
    /// Only the first time ever; a seen-flag is persisted
    Once,
}

/// Site effect settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Background density preset
    pub quality: QualityPreset,
    /// Run the ambient background
    pub background_enabled: bool,
    /// Run the orb mini-game
    pub game_enabled: bool,
    pub hit_policy: HitPolicy,
    pub celebration: CelebrationPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            background_enabled: true,
            game_enabled: true,
            hit_policy: HitPolicy::All,
            celebration: CelebrationPolicy::EveryLoad,
        }
    }
}

impl Settings {
    /// Load settings, falling back to defaults on absence or bad JSON
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        if let Some(json) = read_or_none(store, SETTINGS_KEY) {
            match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from storage");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring unreadable settings: {e}"),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) {
        match serde_json::to_string(self) {
            Ok(json) => {
                if write_or_warn(store, SETTINGS_KEY, &json) {
                    log::info!("Settings saved");
                }
            }
            Err(e) => log::warn!("Failed to encode settings: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let settings = Settings {
            quality: QualityPreset::High,
            hit_policy: HitPolicy::First,
            celebration: CelebrationPolicy::Once,
            ..Settings::default()
        };
        settings.save(&mut store);
        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn test_garbage_falls_back_to_default() {
        let store = MemoryStore::with_entry(SETTINGS_KEY, "{not json");
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let store = MemoryStore::with_entry(SETTINGS_KEY, r#"{"quality":"Low"}"#);
        let settings = Settings::load(&store);
        assert_eq!(settings.quality, QualityPreset::Low);
        assert!(settings.game_enabled);
        assert_eq!(settings.hit_policy, HitPolicy::All);
    }

    #[test]
    fn test_medium_pool_sizes() {
        let pools = QualityPreset::Medium.pool_sizes();
        assert_eq!(pools.stars, 150);
        assert_eq!(pools.asteroids, 8);
        assert_eq!(pools.nebulae, 5);
        assert!(pools.embers);
        assert_eq!(QualityPreset::parse("med"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::parse("ultra"), None);
    }

    #[test]
    fn test_quality_from_query() {
        assert_eq!(quality_from_query("?quality=low"), Some(QualityPreset::Low));
        assert_eq!(
            quality_from_query("?ref=nav&quality=HIGH"),
            Some(QualityPreset::High)
        );
        assert_eq!(quality_from_query("?quality=ultra"), None);
        assert_eq!(quality_from_query("?qualityx=low"), None);
        assert_eq!(quality_from_query(""), None);
    }
}
