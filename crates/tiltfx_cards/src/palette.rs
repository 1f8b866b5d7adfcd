//! Color palette
//!
//! Two sources of color feed card styles: the theme palette (primary, accent,
//! secondary, card surface, border) and the named utility-class colors used by
//! gradient class strings (`gray-700`, `blue-500`, ...).

use rustc_hash::FxHashMap;
use std::sync::OnceLock;
use tiltfx_core::Color;

/// Hex used for any utility color name that is not in the table
pub const FALLBACK_HEX: &str = "#6b7280";

const UTILITY_COLORS: &[(&str, &str)] = &[
    ("gray-500", "#6b7280"),
    ("gray-600", "#4b5563"),
    ("gray-700", "#374151"),
    ("gray-800", "#1f2937"),
    ("gray-900", "#111827"),
    ("blue-500", "#3b82f6"),
    ("blue-600", "#2563eb"),
    ("blue-700", "#1d4ed8"),
    ("blue-800", "#1e40af"),
    ("purple-500", "#a855f7"),
    ("purple-600", "#9333ea"),
    ("purple-700", "#7e22ce"),
    ("purple-800", "#6b21a8"),
    ("pink-500", "#ec4899"),
    ("pink-600", "#db2777"),
    ("pink-700", "#be185d"),
    ("red-500", "#ef4444"),
    ("red-600", "#dc2626"),
    ("red-700", "#b91c1c"),
    ("orange-500", "#f97316"),
    ("orange-600", "#ea580c"),
    ("orange-700", "#c2410c"),
    ("yellow-500", "#eab308"),
    ("yellow-600", "#ca8a04"),
    ("green-500", "#22c55e"),
    ("green-600", "#16a34a"),
    ("green-700", "#15803d"),
    ("teal-500", "#14b8a6"),
    ("teal-600", "#0d9488"),
    ("teal-700", "#0f766e"),
    ("cyan-500", "#06b6d4"),
    ("cyan-600", "#0891b2"),
    ("cyan-700", "#0e7490"),
    ("indigo-500", "#6366f1"),
    ("indigo-600", "#4f46e5"),
    ("indigo-700", "#4338ca"),
    ("violet-500", "#8b5cf6"),
    ("violet-600", "#7c3aed"),
    ("violet-700", "#6d28d9"),
];

fn utility_table() -> &'static FxHashMap<&'static str, &'static str> {
    static TABLE: OnceLock<FxHashMap<&'static str, &'static str>> = OnceLock::new();
    TABLE.get_or_init(|| UTILITY_COLORS.iter().copied().collect())
}

/// Hex string for a utility color name (`blue-500`), if known
pub fn utility_hex(name: &str) -> Option<&'static str> {
    utility_table().get(name).copied()
}

/// All known utility color names, in table order
pub fn utility_names() -> impl Iterator<Item = &'static str> {
    UTILITY_COLORS.iter().map(|(name, _)| *name)
}

/// Parse a `#rrggbb` string into a color (no validation beyond hex digits)
pub(crate) fn hex_to_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    u32::from_str_radix(digits, 16).ok().map(Color::from_hex)
}

/// Theme color tokens referenced by card recipes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeColor {
    Primary,
    Accent,
    Secondary,
    Card,
    Border,
}

/// Theme colors for card surfaces and decorations
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThemePalette {
    pub primary: Color,
    pub accent: Color,
    pub secondary: Color,
    /// Card surface
    pub card: Color,
    /// Neutral border
    pub border: Color,
}

impl ThemePalette {
    /// Dark theme: indigo primary, violet accent, pink secondary on gray-900
    pub fn dark() -> Self {
        Self {
            primary: Color::from_hex(0x6366f1),
            accent: Color::from_hex(0x8b5cf6),
            secondary: Color::from_hex(0xec4899),
            card: Color::from_hex(0x111827),
            border: Color::from_hex(0x374151),
        }
    }

    pub fn get(&self, token: ThemeColor) -> Color {
        match token {
            ThemeColor::Primary => self.primary,
            ThemeColor::Accent => self.accent,
            ThemeColor::Secondary => self.secondary,
            ThemeColor::Card => self.card,
            ThemeColor::Border => self.border,
        }
    }

    /// Token color at the given opacity (`primary/20` is `alpha(Primary, 0.2)`)
    pub fn alpha(&self, token: ThemeColor, alpha: f32) -> Color {
        self.get(token).with_alpha(alpha)
    }
}

impl Default for ThemePalette {
    fn default() -> Self {
        Self::dark()
    }
}
