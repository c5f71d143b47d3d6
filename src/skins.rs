//! Cosmetic skin catalog

/// A purchasable player color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skin {
    pub id: &'static str,
    pub name: &'static str,
    /// CSS hex color handed to the renderer
    pub color: &'static str,
    /// Price in orbs
    pub price: u32,
    pub description: &'static str,
}

pub const DEFAULT_SKIN_ID: &str = "default";

pub const SKINS: [Skin; 6] = [
    Skin {
        id: DEFAULT_SKIN_ID,
        name: "CYAN NEON",
        color: "#00f2ff",
        price: 0,
        description: "The original prototype.",
    },
    Skin {
        id: "emerald",
        name: "EMERALD",
        color: "#39ff14",
        price: 50,
        description: "Highly optimized green light.",
    },
    Skin {
        id: "ruby",
        name: "RUBY FLARE",
        color: "#ff3131",
        price: 100,
        description: "Aggressive heat-resistant shell.",
    },
    Skin {
        id: "gold",
        name: "MIDAS TOUCH",
        color: "#fffb00",
        price: 250,
        description: "For the high rollers.",
    },
    Skin {
        id: "void",
        name: "VOID STALKER",
        color: "#bc13fe",
        price: 500,
        description: "Absorbs all visible spectrums.",
    },
    Skin {
        id: "ember",
        name: "EMBER CORE",
        color: "#ff8c00",
        price: 1000,
        description: "Warning: High temperature.",
    },
];

/// Look up a skin by id
pub fn find(id: &str) -> Option<&'static Skin> {
    SKINS.iter().find(|s| s.id == id)
}

/// Skin for an id, or the default one for unknown ids
pub fn resolve(id: &str) -> &'static Skin {
    find(id).unwrap_or(&SKINS[0])
}
