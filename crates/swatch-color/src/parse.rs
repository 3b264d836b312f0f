// SPDX-License-Identifier: MIT
//
// Color strings in, color strings out.
//
// Three input shapes reach us from the UI layer:
//
//   "#0fba81"        hex, 6 digits, optional leading '#'
//   "15 186 129"     decimal triple, commas optional ("15, 186, 129")
//   "var(--accent)"  CSS custom property, resolved by the caller's style
//                    context and then parsed again
//
// The error policies differ on purpose: bad hex is `None` (a UI can show
// an empty preview), a bad triple is an `Err` (it came from our own CSS
// variables, so it is a bug).

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::ColorError;
use crate::space::Srgb;

/// Text returned in place of a hex string that failed to parse.
pub const INVALID: &str = "(invalid)";

/// How many `var(--a)` → `var(--b)` hops we follow before giving up.
const MAX_VAR_DEPTH: usize = 8;

/// `r g b` or `r, g, b`: three decimal runs, optional comma, any spacing.
static TRIPLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]+),?\s*([0-9]+),?\s*([0-9]+)").expect("triple pattern is valid")
});

// ─── Hex ─────────────────────────────────────────────────────────────────────

/// Parse a 6-digit hex color (`#RRGGBB` or `RRGGBB`, any case).
///
/// A doubled `##` prefix is collapsed first. Anything else that isn't
/// exactly three hex byte pairs yields `None`.
#[must_use]
pub fn parse_hex(s: &str) -> Option<Srgb> {
    let sanitized = s.replace("##", "#");
    let digits = sanitized.strip_prefix('#').unwrap_or(&sanitized);
    let bytes = digits.as_bytes();
    if bytes.len() != 6 {
        return None;
    }

    let r = parse_hex_byte(&bytes[0..2])?;
    let g = parse_hex_byte(&bytes[2..4])?;
    let b = parse_hex_byte(&bytes[4..6])?;
    Some(Srgb::from_rgb8(r, g, b))
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

/// Format as `#rrggbb` (lowercase, zero-padded).
#[must_use]
pub fn format_hex(color: Srgb) -> String {
    let (r, g, b) = color.to_rgb8();
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// The `"R G B"` form Tailwind reads from CSS custom properties.
#[must_use]
pub fn tailwind_triple(hex: &str) -> Option<String> {
    let (r, g, b) = parse_hex(hex)?.to_rgb8();
    Some(format!("{r} {g} {b}"))
}

// ─── Decimal triples ─────────────────────────────────────────────────────────

/// Parse `"r g b"` or `"r, g, b"` (0–255 each) into sRGB.
///
/// # Errors
///
/// Returns [`ColorError::InvalidFormat`] if no three-number run is found.
pub fn parse_triple(s: &str) -> Result<Srgb, ColorError> {
    let caps = TRIPLE
        .captures(s)
        .ok_or_else(|| ColorError::InvalidFormat(s.to_owned()))?;

    let channel = |i: usize| -> Result<f64, ColorError> {
        caps[i]
            .parse::<f64>()
            .map(|v| v / 255.0)
            .map_err(|_| ColorError::InvalidFormat(s.to_owned()))
    };

    Ok(Srgb::new(channel(1)?, channel(2)?, channel(3)?))
}

// ─── CSS variables ───────────────────────────────────────────────────────────

/// Looks up the computed value of a CSS custom property.
///
/// Implemented by whatever owns the live style context. `name` includes the
/// leading `--`.
pub trait StyleResolver {
    fn property(&self, name: &str) -> Option<String>;
}

/// A style context with no properties defined.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStyles;

impl StyleResolver for NoStyles {
    fn property(&self, _name: &str) -> Option<String> {
        None
    }
}

impl StyleResolver for HashMap<String, String> {
    fn property(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Follow `var(--x)` references until we reach a concrete value.
fn dereference<S>(input: &str, styles: &S) -> Result<String, ColorError>
where
    S: StyleResolver + ?Sized,
{
    let mut current = input.to_owned();
    for _ in 0..MAX_VAR_DEPTH {
        if !current.contains("--") {
            return Ok(current);
        }
        let name = current.replace("var(", "").replace(')', "");
        let name = name.trim();
        let value = styles
            .property(name)
            .ok_or_else(|| ColorError::UnknownVariable(name.to_owned()))?;
        debug!(variable = name, value = value.trim(), "resolved CSS variable");
        current = value.trim().to_owned();
    }

    if current.contains("--") {
        Err(ColorError::VariableDepth(input.to_owned()))
    } else {
        Ok(current)
    }
}

// ─── Input resolution ────────────────────────────────────────────────────────

/// What a color string turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    /// A parsed sRGB color.
    Color(Srgb),
    /// Looked like hex but wasn't valid.
    Invalid,
    /// Not a shape we understand; passed through untouched.
    Opaque(String),
}

impl Resolved {
    /// The color, if there is one.
    #[must_use]
    pub const fn color(&self) -> Option<Srgb> {
        match self {
            Self::Color(c) => Some(*c),
            Self::Invalid | Self::Opaque(_) => None,
        }
    }
}

/// Resolve a UI color string to a color value.
///
/// Dispatch is by shape: `--` dereferences through `styles`, a space means
/// a decimal triple, `#` means hex, and anything else is opaque.
///
/// # Errors
///
/// Fails when a triple is malformed or a CSS variable can't be resolved.
pub fn resolve_color<S>(input: &str, styles: &S) -> Result<Resolved, ColorError>
where
    S: StyleResolver + ?Sized,
{
    let value = dereference(input, styles)?;

    if value.contains(' ') {
        return parse_triple(&value).map(Resolved::Color);
    }
    if value.contains('#') {
        return Ok(parse_hex(&value).map_or(Resolved::Invalid, Resolved::Color));
    }
    Ok(Resolved::Opaque(value))
}

/// Resolve a UI color string to a normalized `#rrggbb` string.
///
/// Invalid hex becomes [`INVALID`]; opaque values pass through.
///
/// # Errors
///
/// Same as [`resolve_color`].
pub fn resolve_hex<S>(input: &str, styles: &S) -> Result<String, ColorError>
where
    S: StyleResolver + ?Sized,
{
    Ok(match resolve_color(input, styles)? {
        Resolved::Color(c) => format_hex(c),
        Resolved::Invalid => INVALID.to_owned(),
        Resolved::Opaque(s) => s,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn styles(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    // ── Hex ──────────────────────────────────────────────────────────

    #[test]
    fn hex_known_values() {
        assert_eq!(parse_hex("#0FBA81").map(Srgb::to_rgb8), Some((15, 186, 129)));
        assert_eq!(parse_hex("#4F46E5").map(Srgb::to_rgb8), Some((79, 70, 229)));
        assert_eq!(parse_hex("#000000").map(Srgb::to_rgb8), Some((0, 0, 0)));
        assert_eq!(parse_hex("#FFFFFF").map(Srgb::to_rgb8), Some((255, 255, 255)));
    }

    #[test]
    fn hex_prefix_optional_and_doubled() {
        let expected = Some(Srgb::from_rgb8(0x0f, 0xba, 0x81));
        assert_eq!(parse_hex("0fba81"), expected);
        assert_eq!(parse_hex("##0fba81"), expected);
    }

    #[test]
    fn hex_rejects_malformed() {
        for bad in ["", "#", "#fff", "#12345", "#1234567", "#gg0000", "not-a-color", "# 0fba81"] {
            assert_eq!(parse_hex(bad), None, "accepted {bad:?}");
        }
    }

    #[test]
    fn hex_roundtrip_is_lowercase() {
        for hex in ["#0FBA81", "#4f46e5", "#ABCDEF", "#000000", "#ffffff"] {
            let parsed = parse_hex(hex).expect("valid hex");
            assert_eq!(format_hex(parsed), hex.to_lowercase());
        }
    }

    #[test]
    fn hex_roundtrip_sweep() {
        for n in (0..0x100_0000u32).step_by(97).chain([0xff_ffff]) {
            let hex = format!("#{n:06x}");
            let parsed = parse_hex(&hex).unwrap_or_else(|| panic!("{hex} parses"));
            assert_eq!(format_hex(parsed), hex);
        }
    }

    #[test]
    fn format_hex_primaries() {
        assert_eq!(format_hex(Srgb::BLACK), "#000000");
        assert_eq!(format_hex(Srgb::WHITE), "#ffffff");
        assert_eq!(format_hex(Srgb::new(1.0, 0.0, 1.0)), "#ff00ff");
        assert_eq!(format_hex(Srgb::from_rgb8(79, 70, 229)), "#4f46e5");
    }

    #[test]
    fn tailwind_triples() {
        assert_eq!(tailwind_triple("#0FBA81").as_deref(), Some("15 186 129"));
        assert_eq!(tailwind_triple("#FF00FF").as_deref(), Some("255 0 255"));
        assert_eq!(tailwind_triple("#000000").as_deref(), Some("0 0 0"));
        assert_eq!(tailwind_triple("nope"), None);
    }

    // ── Triples ──────────────────────────────────────────────────────

    #[test]
    fn triple_with_commas() {
        let c = parse_triple("15, 186, 129").expect("valid triple");
        assert_eq!(c.to_rgb8(), (15, 186, 129));
    }

    #[test]
    fn triple_with_spaces() {
        let c = parse_triple("79 70 229").expect("valid triple");
        assert_eq!(c.to_rgb8(), (79, 70, 229));
        let c = parse_triple("  255   0\t255 ").expect("valid triple");
        assert_eq!(c.to_rgb8(), (255, 0, 255));
    }

    #[test]
    fn triple_rejects_garbage() {
        assert_eq!(
            parse_triple("abc"),
            Err(ColorError::InvalidFormat("abc".to_owned()))
        );
        assert!(parse_triple("1,2").is_err());
        assert!(parse_triple("red").is_err());
    }

    // ── Resolution ───────────────────────────────────────────────────

    #[test]
    fn resolve_dispatches_by_shape() {
        assert_eq!(
            resolve_color("255 0 0", &NoStyles),
            Ok(Resolved::Color(Srgb::new(1.0, 0.0, 0.0)))
        );
        assert_eq!(
            resolve_color("#0000ff", &NoStyles),
            Ok(Resolved::Color(Srgb::new(0.0, 0.0, 1.0)))
        );
        assert_eq!(resolve_color("#zzzzzz", &NoStyles), Ok(Resolved::Invalid));
        assert_eq!(
            resolve_color("transparent", &NoStyles),
            Ok(Resolved::Opaque("transparent".to_owned()))
        );
    }

    #[test]
    fn resolve_malformed_triple_errors() {
        assert!(matches!(
            resolve_color("not a color", &NoStyles),
            Err(ColorError::InvalidFormat(_))
        ));
    }

    #[test]
    fn resolve_follows_variables() {
        let s = styles(&[("--color-primary-500", " 15 186 129 ")]);
        let got = resolve_color("var(--color-primary-500)", &s).expect("resolves");
        assert_eq!(got.color().map(Srgb::to_rgb8), Some((15, 186, 129)));

        let bare = resolve_color("--color-primary-500", &s).expect("resolves");
        assert_eq!(bare, got);
    }

    #[test]
    fn resolve_follows_chained_variables() {
        let s = styles(&[("--on-primary", "var(--white)"), ("--white", "#FFFFFF")]);
        assert_eq!(
            resolve_color("var(--on-primary)", &s),
            Ok(Resolved::Color(Srgb::WHITE))
        );
    }

    #[test]
    fn resolve_unknown_variable() {
        assert_eq!(
            resolve_color("var(--missing)", &NoStyles),
            Err(ColorError::UnknownVariable("--missing".to_owned()))
        );
    }

    #[test]
    fn resolve_variable_cycle() {
        let s = styles(&[("--a", "var(--b)"), ("--b", "var(--a)")]);
        assert!(matches!(
            resolve_color("var(--a)", &s),
            Err(ColorError::VariableDepth(_))
        ));
    }

    #[test]
    fn resolve_hex_normalizes() {
        assert_eq!(resolve_hex("#0FBA81", &NoStyles).as_deref(), Ok("#0fba81"));
        assert_eq!(resolve_hex("0, 0, 0", &NoStyles).as_deref(), Ok("#000000"));
        assert_eq!(resolve_hex("#0FBA8", &NoStyles).as_deref(), Ok(INVALID));
        assert_eq!(resolve_hex("inherit", &NoStyles).as_deref(), Ok("inherit"));
    }
}
