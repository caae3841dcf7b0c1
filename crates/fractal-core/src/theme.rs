// File: crates/fractal-core/src/theme.rs
// Summary: Flat per-role color palette and CSS color parsing.

use crate::error::{EngineError, Result};

/// Straight (non-premultiplied) 8-bit RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self { Self { r, g, b, a: 255 } }
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self { Self { r, g, b, a } }

    /// Parse `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)` or `rgba(r, g, b, a)`
    /// where `a` is a 0..=1 fraction.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let bad = || EngineError::InvalidConfig(format!("unrecognized color: {s:?}"));
        if let Some(hex) = s.strip_prefix('#') {
            let digits = hex.chars().map(|c| c.to_digit(16).map(|d| d as u8)).collect::<Option<Vec<_>>>().ok_or_else(bad)?;
            return match digits.as_slice() {
                [r, g, b] => Ok(Self::rgb(r * 17, g * 17, b * 17)),
                [r1, r0, g1, g0, b1, b0] => Ok(Self::rgb(r1 * 16 + r0, g1 * 16 + g0, b1 * 16 + b0)),
                [r1, r0, g1, g0, b1, b0, a1, a0] => Ok(Self::rgba(r1 * 16 + r0, g1 * 16 + g0, b1 * 16 + b0, a1 * 16 + a0)),
                _ => Err(bad()),
            };
        }
        let (body, with_alpha) = if let Some(rest) = s.strip_prefix("rgba(") {
            (rest, true)
        } else if let Some(rest) = s.strip_prefix("rgb(") {
            (rest, false)
        } else {
            return Err(bad());
        };
        let parts = body
            .strip_suffix(')')
            .ok_or_else(bad)?
            .split(',')
            .map(|p| p.trim().parse::<f64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| bad())?;
        let channel = |v: f64| v.clamp(0.0, 255.0).round() as u8;
        match (parts.as_slice(), with_alpha) {
            ([r, g, b], false) => Ok(Self::rgb(channel(*r), channel(*g), channel(*b))),
            ([r, g, b, a], true) => Ok(Self::rgba(channel(*r), channel(*g), channel(*b), channel(a.clamp(0.0, 1.0) * 255.0))),
            _ => Err(bad()),
        }
    }
}

/// Colors by semantic role.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub up: Rgba,
    pub down: Rgba,
    pub line: Rgba,
    pub area: Rgba,
    pub background: Rgba,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            up: Rgba::rgb(0x26, 0xa6, 0x9a),
            down: Rgba::rgb(0xef, 0x53, 0x50),
            line: Rgba::rgb(0x21, 0x96, 0xf3),
            area: Rgba::rgba(5, 1, 1, 92), // rgba(5, 1, 1, 0.36)
            background: Rgba::rgb(0x12, 0x18, 0x26),
        }
    }
}

impl Palette {
    /// Body/wick color for a unit: `up` when bullish, `down` otherwise.
    #[inline]
    pub fn candle(&self, bullish: bool) -> Rgba {
        if bullish { self.up } else { self.down }
    }
}
