use bevy::prelude::*;

use crate::catalog::StatKind;

/// #00000000
pub const TRANSPARENT: Color = Color::srgba(0.0, 0.0, 0.0, 0.0);
/// #0a0a0f
pub const VOID: Color = Color::srgb(10.0 / 255.0, 10.0 / 255.0, 15.0 / 255.0);
/// #12121ce6
pub const CARD_BG: Color = Color::srgba(18.0 / 255.0, 18.0 / 255.0, 28.0 / 255.0, 0.9);
/// #ffffff1a
pub const BAR_TRACK: Color = Color::srgba(1.0, 1.0, 1.0, 0.1);
/// #FFFFFF
pub const WHITE: Color = Color::WHITE;
/// #ffffff99
pub const INSTRUCTION: Color = Color::srgba(1.0, 1.0, 1.0, 0.6);
/// #ff3d3d
pub const ALERT_RED: Color = Color::srgb(1.0, 61.0 / 255.0, 61.0 / 255.0);
/// #00f5ff
pub const NEON_CYAN: Color = Color::srgb(0.0, 245.0 / 255.0, 1.0);
/// #ff00aa
pub const NEON_PINK: Color = Color::srgb(1.0, 0.0, 170.0 / 255.0);
/// #8b00ff
pub const NEON_VIOLET: Color = Color::srgb(139.0 / 255.0, 0.0, 1.0);
/// #00ff88
pub const NEON_GREEN: Color = Color::srgb(0.0, 1.0, 136.0 / 255.0);
/// #ffd700
pub const LEGENDARY_GOLD: Color = Color::srgb(1.0, 215.0 / 255.0, 0.0);
/// #1a1a1a
pub const BAND_DARK: Color = Color::srgb(26.0 / 255.0, 26.0 / 255.0, 26.0 / 255.0);
/// #ff3d3d
pub const BALL_RED: Color = ALERT_RED;
/// #f0f0f0
pub const BALL_WHITE: Color = Color::srgb(240.0 / 255.0, 240.0 / 255.0, 240.0 / 255.0);

/// Palette of the field shown before anything has been caught.
pub const AMBIENT_COLORS: [Color; 4] = [NEON_CYAN, NEON_PINK, NEON_VIOLET, NEON_GREEN];

const fn hex(rgb: u32) -> Color {
    Color::srgb(
        ((rgb >> 16) & 0xff) as f32 / 255.0,
        ((rgb >> 8) & 0xff) as f32 / 255.0,
        (rgb & 0xff) as f32 / 255.0,
    )
}

const TYPE_COLORS: &[(&str, u32)] = &[
    ("normal", 0xA8A878),
    ("fire", 0xF08030),
    ("water", 0x6890F0),
    ("grass", 0x78C850),
    ("electric", 0xF8D030),
    ("ice", 0x98D8D8),
    ("fighting", 0xC03028),
    ("poison", 0xA040A0),
    ("ground", 0xE0C068),
    ("flying", 0xA890F0),
    ("psychic", 0xF85888),
    ("bug", 0xA8B820),
    ("rock", 0xB8A038),
    ("ghost", 0x705898),
    ("dragon", 0x7038F8),
    ("dark", 0x705848),
    ("steel", 0xB8B8D0),
    ("fairy", 0xEE99AC),
];

/// Badge and particle colour of a type, `normal` for anything unknown.
pub fn type_color(name: &str) -> Color {
    let rgb = TYPE_COLORS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, rgb)| *rgb)
        .unwrap_or(0xA8A878);
    hex(rgb)
}

pub fn stat_color(kind: StatKind) -> Color {
    match kind {
        StatKind::Hp => hex(0xFF5959),
        StatKind::Attack => hex(0xF5AC78),
        StatKind::Defense => hex(0xFAE078),
        StatKind::SpecialAttack => hex(0x9DB7F5),
        StatKind::SpecialDefense => hex(0xA7DB8D),
        StatKind::Speed => hex(0xFA92B2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_type_uses_normal_colour() {
        assert_eq!(type_color("shadow"), type_color("normal"));
        assert_ne!(type_color("fire"), type_color("normal"));
    }

    #[test]
    fn hex_unpacks_channels() {
        assert_eq!(hex(0xFF0000), Color::srgb(1.0, 0.0, 0.0));
        assert_eq!(hex(0x0a0a0f), VOID);
    }
}
