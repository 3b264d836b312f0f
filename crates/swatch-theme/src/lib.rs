//! # swatch-theme — palettes and contrast for theme builders
//!
//! Turns a single base color into a ten-step tint/shade scale, and judges
//! whether a text/background pair is readable.
//!
//! # Architecture
//!
//! ```text
//! "#4f46e5"
//!     │
//!     ▼
//! swatch-color: parse → sRGB → LCH
//!     │
//!     ├──▶ palette.rs:  vary LCH lightness per shade (50…900), back to hex
//!     │
//!     └──▶ contrast.rs: lightness delta (or WCAG ratio) vs. thresholds
//!             │
//!             ▼
//!          report.rs:   four pass flags, tier, icon and note for the UI
//! ```
//!
//! # Contrast metric
//!
//! The default metric is the difference of CIE lightness divided by 100,
//! not the WCAG luminance ratio. Existing themes were tuned against it.
//! [`ContrastMetric::Wcag`] is available for callers that want the
//! standard formula.

// Hue/lightness/chroma variable names are inherently similar.
#![allow(clippy::similar_names)]

pub mod contrast;
pub mod palette;
pub mod report;

pub use contrast::{
    ContrastEvaluator, ContrastMetric, Level, LevelThresholds, TextSize, Thresholds, luminance,
    ratio, relative_luminance, text_passes,
};
pub use palette::{OnColor, Palette, SHADES, Swatch, generate_palette, on_color};
pub use report::{PassReport, ReportSummary, Tier, pass_report};
