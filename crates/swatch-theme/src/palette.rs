//! Tint/shade palette generation.
//!
//! A palette is ten swatches keyed by Tailwind-style shade numbers. Shade
//! 500 is the base color itself; lower numbers walk CIE lightness toward
//! white, higher numbers toward black. Chroma and hue never change, so
//! the whole scale reads as one color family.

use std::collections::BTreeMap;
use std::ops::Index;

use serde::{Deserialize, Serialize};
use swatch_color::{Lch, format_hex, parse_hex, tailwind_triple};
use tracing::{debug, warn};

/// The shade numbers every palette carries.
pub const SHADES: [u16; 10] = [50, 100, 200, 300, 400, 500, 600, 700, 800, 900];

/// Substituted when the requested base color isn't valid hex.
pub const FALLBACK_BASE: &str = "#cccccc";

// ---------------------------------------------------------------------------
// Swatch
// ---------------------------------------------------------------------------

/// Foreground to draw on top of a swatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OnColor {
    #[serde(rename = "255 255 255")]
    White,
    #[serde(rename = "0 0 0")]
    Black,
}

impl OnColor {
    /// The `"R G B"` triple for CSS custom properties.
    #[must_use]
    pub const fn as_triple(self) -> &'static str {
        match self {
            Self::White => "255 255 255",
            Self::Black => "0 0 0",
        }
    }
}

/// One entry of a [`Palette`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swatch {
    /// `#rrggbb`.
    pub hex: String,
    /// `"R G B"`.
    pub rgb: String,
    /// Text/fill color for content on this swatch.
    pub on: OnColor,
}

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// Ten swatches keyed by shade number (see [`SHADES`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette(BTreeMap<u16, Swatch>);

impl Palette {
    /// The swatch for `shade`, if it is one of [`SHADES`].
    #[must_use]
    pub fn get(&self, shade: u16) -> Option<&Swatch> {
        self.0.get(&shade)
    }

    /// Swatches in ascending shade order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &Swatch)> {
        self.0.iter().map(|(shade, swatch)| (*shade, swatch))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Index<u16> for Palette {
    type Output = Swatch;

    fn index(&self, shade: u16) -> &Swatch {
        &self.0[&shade]
    }
}

/// Pick black or white text for a swatch.
///
/// Looks only at the linear red channel: black above 0.5, white otherwise.
/// Strongly green or blue light swatches therefore still get white text.
/// Unparseable input gets white.
#[must_use]
pub fn on_color(hex: &str) -> OnColor {
    match parse_hex(hex) {
        Some(c) if c.to_linear().r > 0.5 => OnColor::Black,
        _ => OnColor::White,
    }
}

/// Target LCH lightness for a shade, given the base color's lightness.
///
/// Shades below 500 interpolate from the base toward 100 (white), shades
/// above 500 scale the base toward 0 (black). Input is clamped to 0–1000.
#[must_use]
pub fn shade_lightness(shade: f64, base: f64) -> f64 {
    let shade = shade.clamp(0.0, 1000.0);
    if shade < 500.0 {
        let toward_white = 1.0 - shade / 500.0;
        toward_white.mul_add(100.0 - base, base)
    } else if shade > 500.0 {
        let toward_black = 1.0 - (shade - 500.0) / 500.0;
        toward_black * base
    } else {
        base
    }
}

/// Generate the ten-step palette for `base` (hex, `#` optional).
///
/// Never fails: invalid input is replaced by [`FALLBACK_BASE`].
#[must_use]
pub fn generate_palette(base: &str) -> Palette {
    let srgb = parse_hex(base).unwrap_or_else(|| {
        warn!(base, fallback = FALLBACK_BASE, "invalid palette base color");
        parse_hex(FALLBACK_BASE).unwrap_or_default()
    });
    let base_lch = srgb.to_lch();
    debug!(base = %format_hex(srgb), l = base_lch.l, c = base_lch.c, h = base_lch.h, "generating palette");

    let swatches = SHADES
        .iter()
        .map(|&shade| {
            let l = shade_lightness(f64::from(shade), base_lch.l);
            (shade, swatch(base_lch.with_lightness(l)))
        })
        .collect();

    Palette(swatches)
}

fn swatch(lch: Lch) -> Swatch {
    let hex = format_hex(lch.to_srgb());
    let rgb = tailwind_triple(&hex).unwrap_or_default();
    let on = on_color(&hex);
    Swatch { hex, rgb, on }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
