//! Text/background contrast.
//!
//! Two metrics are supported:
//!
//! - [`ContrastMetric::Lightness`] (default): `|L_text − L_bg| / 100` with L
//!   the CIE lightness, giving a symmetric value in [0, 1].
//! - [`ContrastMetric::Wcag`]: the WCAG 2.1 ratio
//!   `(L_lighter + 0.05) / (L_darker + 0.05)` over relative luminance,
//!   giving a value in [1, 21].
//!
//! Each metric carries its own threshold table, indexed by text size and
//! conformance level.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use swatch_color::{ColorError, NoStyles, Srgb, StyleResolver, resolve_color};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Size / level
// ---------------------------------------------------------------------------

/// Text size class. Large is 18pt and up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSize {
    Small,
    Large,
}

/// Conformance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    #[serde(rename = "AA")]
    Aa,
    #[serde(rename = "AAA")]
    Aaa,
}

/// A size or level name that we don't recognize.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} {value:?}")]
pub struct UnknownName {
    kind: &'static str,
    value: String,
}

impl FromStr for TextSize {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "small" => Ok(Self::Small),
            "large" => Ok(Self::Large),
            _ => Err(UnknownName { kind: "text size", value: s.to_owned() }),
        }
    }
}

impl FromStr for Level {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "AA" => Ok(Self::Aa),
            "AAA" => Ok(Self::Aaa),
            _ => Err(UnknownName { kind: "level", value: s.to_owned() }),
        }
    }
}

impl fmt::Display for TextSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Small => "small",
            Self::Large => "large",
        })
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Aa => "AA",
            Self::Aaa => "AAA",
        })
    }
}

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// Minimum contrast per level for one text size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelThresholds {
    #[serde(rename = "AA")]
    pub aa: f64,
    #[serde(rename = "AAA")]
    pub aaa: f64,
}

/// Minimum contrast for every size × level combination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Text under 18pt.
    pub small: LevelThresholds,
    /// Text at or above 18pt.
    pub large: LevelThresholds,
}

impl Thresholds {
    /// Lightness-delta table. AAA sits below AA; existing themes rely on it.
    pub const LIGHTNESS: Self = Self {
        small: LevelThresholds { aa: 0.3, aaa: 0.2 },
        large: LevelThresholds { aa: 0.2, aaa: 0.15 },
    };

    /// WCAG 2.1 success criteria 1.4.3 and 1.4.6.
    pub const WCAG: Self = Self {
        small: LevelThresholds { aa: 4.5, aaa: 7.0 },
        large: LevelThresholds { aa: 3.0, aaa: 4.5 },
    };

    #[must_use]
    pub const fn get(&self, size: TextSize, level: Level) -> f64 {
        let row = match size {
            TextSize::Small => &self.small,
            TextSize::Large => &self.large,
        };
        match level {
            Level::Aa => row.aa,
            Level::Aaa => row.aaa,
        }
    }
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

/// CIE lightness (0–100) of an sRGB triple given in 0.0–1.0.
#[must_use]
pub fn luminance(r: f64, g: f64, b: f64) -> f64 {
    Srgb::new(r, g, b).to_lch().l
}

/// WCAG 2.1 relative luminance (0.0–1.0).
#[must_use]
pub fn relative_luminance(color: Srgb) -> f64 {
    let lin = color.to_linear();
    0.2126f64.mul_add(lin.r, 0.7152f64.mul_add(lin.g, 0.0722 * lin.b))
}

/// How contrast between two colors is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContrastMetric {
    /// CIE lightness difference over 100.
    #[default]
    Lightness,
    /// WCAG 2.1 luminance ratio.
    Wcag,
}

impl ContrastMetric {
    /// Contrast between `a` and `b`. Symmetric in its arguments.
    #[must_use]
    pub fn measure(self, a: Srgb, b: Srgb) -> f64 {
        match self {
            Self::Lightness => (a.to_lch().l - b.to_lch().l).abs() / 100.0,
            Self::Wcag => {
                let la = relative_luminance(a);
                let lb = relative_luminance(b);
                let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
                (lighter + 0.05) / (darker + 0.05)
            }
        }
    }

    /// The threshold table this metric ships with.
    #[must_use]
    pub const fn default_thresholds(self) -> Thresholds {
        match self {
            Self::Lightness => Thresholds::LIGHTNESS,
            Self::Wcag => Thresholds::WCAG,
        }
    }
}

impl FromStr for ContrastMetric {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lightness" => Ok(Self::Lightness),
            "wcag" => Ok(Self::Wcag),
            _ => Err(UnknownName { kind: "contrast metric", value: s.to_owned() }),
        }
    }
}

// ---------------------------------------------------------------------------
// Evaluator
// ---------------------------------------------------------------------------

/// A metric paired with the thresholds it is judged against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastEvaluator {
    pub metric: ContrastMetric,
    pub thresholds: Thresholds,
}

impl Default for ContrastEvaluator {
    fn default() -> Self {
        Self::new(ContrastMetric::default())
    }
}

impl ContrastEvaluator {
    /// Evaluator using `metric` and its default thresholds.
    #[must_use]
    pub const fn new(metric: ContrastMetric) -> Self {
        Self { metric, thresholds: metric.default_thresholds() }
    }

    #[must_use]
    pub const fn with_thresholds(self, thresholds: Thresholds) -> Self {
        Self { thresholds, ..self }
    }

    /// Contrast between two parsed colors.
    #[must_use]
    pub fn measure(&self, a: Srgb, b: Srgb) -> f64 {
        self.metric.measure(a, b)
    }

    /// Whether a measured contrast meets `size`/`level`.
    #[must_use]
    pub fn meets(&self, contrast: f64, size: TextSize, level: Level) -> bool {
        contrast >= self.thresholds.get(size, level)
    }

    /// Contrast between two color strings (hex, triple, or `var(--x)`).
    ///
    /// # Errors
    ///
    /// Fails if either string doesn't resolve to a color.
    pub fn ratio<S>(&self, a: &str, b: &str, styles: &S) -> Result<f64, ColorError>
    where
        S: StyleResolver + ?Sized,
    {
        Ok(self.measure(color_of(a, styles)?, color_of(b, styles)?))
    }

    /// Whether `text` on `background` meets `size`/`level`.
    ///
    /// # Errors
    ///
    /// Fails if either string doesn't resolve to a color.
    pub fn passes<S>(
        &self,
        text: &str,
        background: &str,
        size: TextSize,
        level: Level,
        styles: &S,
    ) -> Result<bool, ColorError>
    where
        S: StyleResolver + ?Sized,
    {
        Ok(self.meets(self.ratio(text, background, styles)?, size, level))
    }
}

/// Resolve a string that must end up as a color.
pub(crate) fn color_of<S>(input: &str, styles: &S) -> Result<Srgb, ColorError>
where
    S: StyleResolver + ?Sized,
{
    resolve_color(input, styles)?
        .color()
        .ok_or_else(|| ColorError::NotAColor(input.to_owned()))
}

/// [`ContrastEvaluator::ratio`] with the default metric and no CSS variables.
///
/// # Errors
///
/// Fails if either string doesn't resolve to a color.
pub fn ratio(a: &str, b: &str) -> Result<f64, ColorError> {
    ContrastEvaluator::default().ratio(a, b, &NoStyles)
}

/// [`ContrastEvaluator::passes`] with the default metric and no CSS variables.
///
/// The default metric is the lightness delta, not the WCAG ratio: `#0fba81`
/// on white passes large AA here but fails it under [`ContrastMetric::Wcag`].
///
/// # Errors
///
/// Fails if either string doesn't resolve to a color.
pub fn text_passes(
    text: &str,
    background: &str,
    size: TextSize,
    level: Level,
) -> Result<bool, ColorError> {
    ContrastEvaluator::default().passes(text, background, size, level, &NoStyles)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
