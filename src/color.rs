//! Neon palette and cosmetic color parsing

use serde::{Deserialize, Serialize};

/// An sRGB color with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `#rgb` (leading `#` optional)
    pub fn parse_hex(s: &str) -> Option<Self> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        // from_str_radix would also take a leading sign
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match hex.len() {
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::new(r, g, b))
            }
            3 => {
                let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
                Some(Self::new(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            _ => None,
        }
    }

    /// Resolve a host-supplied cosmetic color, falling back to the player default
    pub fn cosmetic_or_default(s: &str) -> Self {
        Self::parse_hex(s).unwrap_or_else(|| {
            log::warn!("Unrecognized cosmetic color {:?}, using default", s);
            palette::PLAYER
        })
    }

    /// CSS `rgba(...)` string for canvas styles
    pub fn css(&self, alpha: f32) -> String {
        format!(
            "rgba({},{},{},{:.3})",
            self.r,
            self.g,
            self.b,
            alpha.clamp(0.0, 1.0)
        )
    }

    /// CSS hex string (`#rrggbb`)
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Fixed game colors
pub mod palette {
    use super::Rgb;

    pub const PLAYER: Rgb = Rgb::new(0x00, 0xf2, 0xff);
    pub const DASH: Rgb = Rgb::new(0xff, 0x00, 0xff);
    pub const GROUND: Rgb = Rgb::new(0x1a, 0x1a, 0x1a);
    pub const SPIKE: Rgb = Rgb::new(0xff, 0x31, 0x31);
    pub const BLOCK: Rgb = Rgb::new(0x39, 0xff, 0x14);
    pub const ORB: Rgb = Rgb::new(0xff, 0xfb, 0x00);
    pub const BACKGROUND: Rgb = Rgb::new(0x05, 0x05, 0x05);
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);
    pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);
}
