// SPDX-License-Identifier: MIT
//
// Color spaces and the conversions between neighbors.
//
// Conversion pipeline:
//
//   Srgb ──to_linear──▶ LinearRgb ──to_xyz──▶ Xyz ──to_lab──▶ Lab ──to_lch──▶ Lch
//   Srgb ◀─to_srgb──── LinearRgb ◀to_linear_rgb─ Xyz ◀─to_xyz── Lab ◀─to_lab── Lch
//
// Every step is a pure function returning a fresh value. The two
// composites, `Srgb::to_lch` and `Lch::to_srgb`, chain the full path in a
// fixed order; the reverse one clamps to the sRGB cube, which is the only
// gamut mapping we do.

use serde::{Deserialize, Serialize};

use crate::transfer::{linear_to_srgb, srgb_to_linear};

/// LAB linear-segment threshold (CIE ε, ≈ 216/24389).
pub const EPSILON: f64 = 0.008_856;

/// LAB linear-segment slope (CIE κ, ≈ 24389/27).
pub const KAPPA: f64 = 903.3;

/// D65 reference white in XYZ, scaled so that Y = 100.
pub const REFERENCE_WHITE: Xyz = Xyz::new(95.047, 100.000, 108.883);

// ─── sRGB ────────────────────────────────────────────────────────────────────

/// Gamma-encoded sRGB, channels nominally in 0.0–1.0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Srgb {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    #[inline]
    #[must_use]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Build from 8-bit channels (0–255).
    #[must_use]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
        )
    }

    /// Round each channel to the nearest 8-bit value.
    ///
    /// Channels outside 0.0–1.0 saturate at 0 or 255.
    #[must_use]
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        (to_u8(self.r), to_u8(self.g), to_u8(self.b))
    }

    /// Force every channel into 0.0–1.0.
    #[must_use]
    pub const fn clamp(self) -> Self {
        Self::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
        )
    }

    /// Whether every channel is displayable as-is.
    #[must_use]
    pub fn in_gamut(self) -> bool {
        [self.r, self.g, self.b]
            .iter()
            .all(|v| (0.0..=1.0).contains(v))
    }

    /// Remove the sRGB gamma curve.
    #[must_use]
    pub fn to_linear(self) -> LinearRgb {
        LinearRgb::new(
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
        )
    }

    /// sRGB → linear → XYZ → LAB → LCH.
    #[must_use]
    pub fn to_lch(self) -> Lch {
        self.to_linear().to_xyz().to_lab().to_lch()
    }
}

/// Convert a 0.0–1.0 channel to 0–255 with round-half-away-from-zero.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(v: f64) -> u8 {
    // Clamp guarantees 0.0 <= value <= 255.0 before truncation.
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

// ─── Linear RGB ──────────────────────────────────────────────────────────────

/// Radiometrically linear RGB with Rec.709 primaries.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LinearRgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl LinearRgb {
    #[inline]
    #[must_use]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Apply the sRGB gamma curve. Out-of-range values pass through.
    #[must_use]
    pub fn to_srgb(self) -> Srgb {
        Srgb::new(
            linear_to_srgb(self.r),
            linear_to_srgb(self.g),
            linear_to_srgb(self.b),
        )
    }

    /// Rec.709 primaries → XYZ, scaled to 0–100.
    #[must_use]
    pub fn to_xyz(self) -> Xyz {
        let Self { r, g, b } = self;
        let x = 0.180_437_5f64.mul_add(b, 0.412_456_4f64.mul_add(r, 0.357_576_1 * g));
        let y = 0.072_175_0f64.mul_add(b, 0.212_672_9f64.mul_add(r, 0.715_152_2 * g));
        let z = 0.950_304_1f64.mul_add(b, 0.019_333_9f64.mul_add(r, 0.119_192_0 * g));
        Xyz::new(x * 100.0, y * 100.0, z * 100.0)
    }
}

// ─── CIE XYZ ─────────────────────────────────────────────────────────────────

/// CIE 1931 XYZ tristimulus, roughly 0–100 for in-gamut colors.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Xyz {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Xyz {
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// XYZ (0–100) → Rec.709 linear RGB.
    #[must_use]
    pub fn to_linear_rgb(self) -> LinearRgb {
        let x = self.x * 0.01;
        let y = self.y * 0.01;
        let z = self.z * 0.01;
        let r = (-0.498_531_4f64).mul_add(z, 3.240_454_2f64.mul_add(x, -1.537_138_5 * y));
        let g = 0.041_556_0f64.mul_add(z, (-0.969_266_0f64).mul_add(x, 1.876_010_8 * y));
        let b = 1.057_225_2f64.mul_add(z, 0.055_643_4f64.mul_add(x, -0.204_025_9 * y));
        LinearRgb::new(r, g, b)
    }

    /// XYZ → CIE LAB against [`REFERENCE_WHITE`].
    #[must_use]
    pub fn to_lab(self) -> Lab {
        let x = pivot(self.x / REFERENCE_WHITE.x);
        let y = pivot(self.y / REFERENCE_WHITE.y);
        let z = pivot(self.z / REFERENCE_WHITE.z);

        Lab::new(
            116.0f64.mul_add(y, -16.0).max(0.0),
            500.0 * (x - y),
            200.0 * (y - z),
        )
    }
}

/// Forward LAB companding: cube root above ε, linear toe below.
#[inline]
fn pivot(t: f64) -> f64 {
    if t > EPSILON {
        t.cbrt()
    } else {
        KAPPA.mul_add(t, 16.0) / 116.0
    }
}

/// Inverse of [`pivot`] for the a/b-derived intermediates.
#[inline]
fn unpivot(f: f64) -> f64 {
    let cubed = f * f * f;
    if cubed > EPSILON {
        cubed
    } else {
        (f - 16.0 / 116.0) * 116.0 / KAPPA
    }
}

// ─── CIE LAB ─────────────────────────────────────────────────────────────────

/// CIE L\*a\*b\*: L in 0–100, a/b unbounded opponent axes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Lab {
    #[inline]
    #[must_use]
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// LAB → XYZ against [`REFERENCE_WHITE`].
    ///
    /// Y branches on `κ·ε` in L directly; X and Z branch on `ε` after
    /// cubing their intermediates.
    #[must_use]
    pub fn to_xyz(self) -> Xyz {
        let fy = (self.l + 16.0) / 116.0;
        let fx = self.a / 500.0 + fy;
        let fz = fy - self.b / 200.0;

        let y = if self.l > KAPPA * EPSILON {
            fy * fy * fy
        } else {
            self.l / KAPPA
        };

        Xyz::new(
            REFERENCE_WHITE.x * unpivot(fx),
            REFERENCE_WHITE.y * y,
            REFERENCE_WHITE.z * unpivot(fz),
        )
    }

    /// Rectangular a/b → polar chroma/hue.
    #[must_use]
    pub fn to_lch(self) -> Lch {
        let c = self.a.hypot(self.b);
        let h = self.b.atan2(self.a).to_degrees();
        let h = if h < 0.0 { h + 360.0 } else { h };
        Lch::new(self.l, c, h)
    }
}

// ─── CIE LCH ─────────────────────────────────────────────────────────────────

/// Polar LAB: Lightness 0–100, Chroma ≥ 0, Hue in degrees [0, 360).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Lch {
    pub l: f64,
    pub c: f64,
    pub h: f64,
}

impl Lch {
    #[inline]
    #[must_use]
    pub const fn new(l: f64, c: f64, h: f64) -> Self {
        Self { l, c, h }
    }

    /// Same chroma and hue at a different lightness.
    #[inline]
    #[must_use]
    pub const fn with_lightness(self, l: f64) -> Self {
        Self { l, ..self }
    }

    /// Polar chroma/hue → rectangular a/b.
    #[must_use]
    pub fn to_lab(self) -> Lab {
        let (sin, cos) = self.h.to_radians().sin_cos();
        Lab::new(self.l, self.c * cos, self.c * sin)
    }

    /// LCH → LAB → XYZ → linear → sRGB, without gamut clamping.
    ///
    /// Useful to ask whether an LCH target is displayable at all.
    #[must_use]
    pub fn to_srgb_unclamped(self) -> Srgb {
        self.to_lab().to_xyz().to_linear_rgb().to_srgb()
    }

    /// LCH → sRGB, clamped to the displayable cube.
    #[must_use]
    pub fn to_srgb(self) -> Srgb {
        self.to_srgb_unclamped().clamp()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
