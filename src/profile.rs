//! Player profile: orb wallet, unlocked skins and best distance
//!
//! Persisted to LocalStorage. The simulation never touches this; the host
//! folds each run summary in after game over.

use serde::{Deserialize, Serialize};

use crate::sim::RunSummary;
use crate::skins::{self, DEFAULT_SKIN_ID, Skin};

/// Result of a shop action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopOutcome {
    /// Orbs spent, skin unlocked and activated
    Purchased,
    /// Already owned, now active
    Selected,
    /// Not enough orbs
    TooExpensive,
    /// No such skin
    Unknown,
}

/// Persistent player progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    /// Spendable orbs
    pub orbs: u32,
    pub unlocked: Vec<String>,
    pub active_skin: String,
    /// Longest distance ever run
    pub best_score: f64,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            orbs: 0,
            unlocked: vec![DEFAULT_SKIN_ID.to_string()],
            active_skin: DEFAULT_SKIN_ID.to_string(),
            best_score: 0.0,
        }
    }
}

impl Profile {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "neon_dash_profile";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_unlocked(&self, id: &str) -> bool {
        self.unlocked.iter().any(|u| u == id)
    }

    /// Active skin, falling back to the default for unknown ids
    pub fn active(&self) -> &'static Skin {
        skins::resolve(&self.active_skin)
    }

    /// Fold a finished run in. Returns true on a new best distance.
    pub fn record_run(&mut self, summary: &RunSummary) -> bool {
        self.orbs = self.orbs.saturating_add(summary.orbs);
        if summary.score > self.best_score {
            self.best_score = summary.score;
            true
        } else {
            false
        }
    }

    /// Buy a skin if affordable, or select it if already owned
    pub fn buy_or_select(&mut self, id: &str) -> ShopOutcome {
        let Some(skin) = skins::find(id) else {
            return ShopOutcome::Unknown;
        };
        if self.is_unlocked(skin.id) {
            self.active_skin = skin.id.to_string();
            return ShopOutcome::Selected;
        }
        if self.orbs < skin.price {
            return ShopOutcome::TooExpensive;
        }
        self.orbs -= skin.price;
        self.unlocked.push(skin.id.to_string());
        self.active_skin = skin.id.to_string();
        log::info!("Unlocked skin {} for {} orbs", skin.id, skin.price);
        ShopOutcome::Purchased
    }

    /// Parse stored JSON; unreadable data starts a fresh profile
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Profile>(json) {
            Ok(mut profile) => {
                if !profile.is_unlocked(DEFAULT_SKIN_ID) {
                    profile.unlocked.insert(0, DEFAULT_SKIN_ID.to_string());
                }
                profile
            }
            Err(e) => {
                log::warn!("Ignoring stored profile: {}", e);
                Self::new()
            }
        }
    }

    /// Load profile from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                let profile = Self::from_json(&json);
                log::info!(
                    "Loaded profile: {} orbs, {} skins",
                    profile.orbs,
                    profile.unlocked.len()
                );
                return profile;
            }
        }

        log::info!("No profile found, starting fresh");
        Self::new()
    }

    /// Save profile to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Profile saved ({} orbs)", self.orbs);
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
