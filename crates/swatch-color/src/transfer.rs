// SPDX-License-Identifier: MIT
//
// sRGB transfer functions (gamma encode / decode).
//
// sRGB stores light with a piecewise curve: a short linear toe near black
// and a 2.4 power segment above it. Everything that mixes or measures
// light (XYZ, luminance) must happen on the decoded, linear values.

/// Convert a single sRGB component (0.0–1.0) to linear light.
#[inline]
#[must_use]
pub fn srgb_to_linear(v: f64) -> f64 {
    if v <= 0.040_45 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// Convert a single linear-light component back to sRGB.
///
/// Uses the canonical `1.055 · v^(1/2.4) − 0.055` upper segment, which is
/// the exact inverse of [`srgb_to_linear`].
#[inline]
#[must_use]
pub fn linear_to_srgb(v: f64) -> f64 {
    if v <= 0.003_130_8 {
        v * 12.92
    } else {
        1.055f64.mul_add(v.powf(1.0 / 2.4), -0.055)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn endpoints_are_fixed() {
        assert_eq!(srgb_to_linear(0.0), 0.0);
        assert!(approx_eq(srgb_to_linear(1.0), 1.0, 1e-12));
        assert_eq!(linear_to_srgb(0.0), 0.0);
        assert!(approx_eq(linear_to_srgb(1.0), 1.0, 1e-12));
    }

    #[test]
    fn toe_is_linear() {
        assert!(approx_eq(srgb_to_linear(0.04), 0.04 / 12.92, 1e-15));
        assert!(approx_eq(linear_to_srgb(0.003), 0.003 * 12.92, 1e-15));
    }

    #[test]
    fn mid_gray_decodes_to_about_a_fifth() {
        // sRGB 0.5 is ~21.4% linear light.
        let lin = srgb_to_linear(0.5);
        assert!(approx_eq(lin, 0.214_041, 1e-5), "got {lin}");
    }

    #[test]
    fn inverse_over_full_range() {
        for i in 0..=1000 {
            let v = f64::from(i) / 1000.0;
            let back = linear_to_srgb(srgb_to_linear(v));
            assert!(approx_eq(back, v, 1e-9), "{v} -> {back}");
        }
    }

    #[test]
    fn continuous_at_breakpoints() {
        let below = srgb_to_linear(0.040_45);
        let above = srgb_to_linear(0.040_450_001);
        assert!(approx_eq(below, above, 1e-6));

        let below = linear_to_srgb(0.003_130_8);
        let above = linear_to_srgb(0.003_130_800_1);
        assert!(approx_eq(below, above, 1e-6));
    }
}
