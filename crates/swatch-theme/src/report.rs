//! Pass reports: every size/level verdict for one text/background pair.

use serde::{Deserialize, Serialize};
use swatch_color::{ColorError, NoStyles, StyleResolver, format_hex};
use tracing::debug;

use crate::contrast::{ContrastEvaluator, Level, TextSize, color_of};

/// The best outcome a pair reaches, checked in this order.
///
/// The order is fixed (small AAA, small AA, large AA), not derived from the
/// threshold values, so a table where AAA is looser than AA still reports
/// small AAA as the top tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Passes small-text AAA.
    Great,
    /// Passes small-text AA.
    Satisfactory,
    /// Passes large-text AA only.
    Poor,
    /// None of the above.
    Fail,
}

impl Tier {
    #[must_use]
    pub const fn from_passes(small_aaa: bool, small_aa: bool, large_aa: bool) -> Self {
        if small_aaa {
            Self::Great
        } else if small_aa {
            Self::Satisfactory
        } else if large_aa {
            Self::Poor
        } else {
            Self::Fail
        }
    }

    /// Icon markup shown next to the verdict.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Great => r#"<i class="fa-solid fa-heart h-3"></i>"#,
            Self::Satisfactory => r#"<i class="fa-solid fa-star h-3"></i>"#,
            Self::Poor => r#"<i class="fa-solid fa-star-half-stroke h-3"></i>"#,
            Self::Fail => r#"<i class="fa-solid fa-triangle-exclamation h-3"></i>"#,
        }
    }

    /// Predicate completing "<text> and <background> …".
    #[must_use]
    pub const fn verdict(self) -> &'static str {
        match self {
            Self::Great => "has great contrast!",
            Self::Satisfactory => "is satisfactory for larger text",
            Self::Poor => "has poor contrast",
            Self::Fail => "fails contrast guidelines",
        }
    }
}

/// Display part of a [`PassReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub emoji: String,
    pub note: String,
}

/// Everything the contrast checker UI shows for one pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassReport {
    /// Text color as `#rrggbb`.
    pub text_color: String,
    /// Background color as `#rrggbb`.
    pub background_color: String,
    pub contrast: f64,
    pub report: ReportSummary,
    #[serde(rename = "smallAA")]
    pub small_aa: bool,
    #[serde(rename = "smallAAA")]
    pub small_aaa: bool,
    #[serde(rename = "largeAA")]
    pub large_aa: bool,
    #[serde(rename = "largeAAA")]
    pub large_aaa: bool,
    /// True only when all four checks fail.
    pub fails: bool,
    pub tier: Tier,
}

impl ContrastEvaluator {
    /// Build the full report for `text` on `background`.
    ///
    /// # Errors
    ///
    /// Fails if either string doesn't resolve to a color.
    pub fn report<S>(&self, text: &str, background: &str, styles: &S) -> Result<PassReport, ColorError>
    where
        S: StyleResolver + ?Sized,
    {
        let text = color_of(text, styles)?;
        let background = color_of(background, styles)?;
        let text_color = format_hex(text);
        let background_color = format_hex(background);

        let contrast = self.measure(text, background);
        let small_aa = self.meets(contrast, TextSize::Small, Level::Aa);
        let small_aaa = self.meets(contrast, TextSize::Small, Level::Aaa);
        let large_aa = self.meets(contrast, TextSize::Large, Level::Aa);
        let large_aaa = self.meets(contrast, TextSize::Large, Level::Aaa);
        let fails = !(small_aa || small_aaa || large_aa || large_aaa);
        let tier = Tier::from_passes(small_aaa, small_aa, large_aa);
        debug!(%text_color, %background_color, contrast, ?tier, "contrast report");

        let report = ReportSummary {
            emoji: tier.icon().to_owned(),
            note: format!("{text_color} and {background_color} {}", tier.verdict()),
        };

        Ok(PassReport {
            text_color,
            background_color,
            contrast,
            report,
            small_aa,
            small_aaa,
            large_aa,
            large_aaa,
            fails,
            tier,
        })
    }
}

/// [`ContrastEvaluator::report`] with the default metric and no CSS variables.
///
/// # Errors
///
/// Fails if either string doesn't resolve to a color.
pub fn pass_report(text: &str, background: &str) -> Result<PassReport, ColorError> {
    ContrastEvaluator::default().report(text, background, &NoStyles)
}
