// SPDX-License-Identifier: MIT
//
// Command-line surface. Every subcommand prints pretty JSON on stdout;
// logs and errors go to stderr.

use std::io::Write;

use anyhow::{Context as _, Result, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;
use swatch_color::{Srgb, format_hex, resolve_color};
use swatch_theme::{ContrastMetric, Level, TextSize, generate_palette, relative_luminance};

use crate::config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "swatchbook", version, about = "Theme palettes and contrast checks")]
pub struct Cli {
    /// Contrast metric (lightness or wcag). Overrides the config file.
    #[arg(long, global = true)]
    pub metric: Option<ContrastMetric>,

    /// Define a CSS custom property for var(--x) inputs. Repeatable.
    #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_var, allow_hyphen_values = true, global = true)]
    pub vars: Vec<(String, String)>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate the 50–900 palette for a base hex color.
    Palette {
        /// Base color, `#` optional.
        base: String,
    },
    /// Full contrast report for a text/background pair.
    Report { text: String, background: String },
    /// Check one size/level. Exits 1 when the pair doesn't pass.
    Passes {
        text: String,
        background: String,
        #[arg(long, default_value = "small")]
        size: TextSize,
        #[arg(long, default_value = "AA")]
        level: Level,
    },
    /// Show a color in every representation.
    Convert { color: String },
}

fn parse_var(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got {s:?}"))?;
    if name.trim().is_empty() {
        return Err(format!("empty variable name in {s:?}"));
    }
    Ok((name.trim().to_owned(), value.trim().to_owned()))
}

/// Output of `convert`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Conversion {
    hex: String,
    rgb: String,
    lch: [f64; 3],
    lightness: f64,
    relative_luminance: f64,
}

impl Conversion {
    fn new(color: Srgb) -> Self {
        let (r, g, b) = color.to_rgb8();
        let lch = color.to_lch();
        Self {
            hex: format_hex(color),
            rgb: format!("{r} {g} {b}"),
            lch: [lch.l, lch.c, lch.h],
            lightness: lch.l,
            relative_luminance: relative_luminance(color),
        }
    }
}

impl Command {
    /// Run against `config`, writing JSON to `out`.
    ///
    /// Returns `false` when a `passes` check fails; everything else that
    /// completes returns `true`.
    pub fn run(&self, config: &AppConfig, out: &mut impl Write) -> Result<bool> {
        let evaluator = config.evaluator();
        let styles = &config.variables;

        let passed = match self {
            Self::Palette { base } => {
                emit(out, &generate_palette(base))?;
                true
            }
            Self::Report { text, background } => {
                let report = evaluator
                    .report(text, background, styles)
                    .with_context(|| format!("cannot compare {text:?} with {background:?}"))?;
                emit(out, &report)?;
                true
            }
            Self::Passes { text, background, size, level } => {
                let passed = evaluator
                    .passes(text, background, *size, *level, styles)
                    .with_context(|| format!("cannot compare {text:?} with {background:?}"))?;
                emit(out, &passed)?;
                passed
            }
            Self::Convert { color } => {
                let resolved = resolve_color(color, styles)
                    .with_context(|| format!("cannot resolve {color:?}"))?;
                let Some(srgb) = resolved.color() else {
                    bail!("{color:?} is not a color");
                };
                emit(out, &Conversion::new(srgb))?;
                true
            }
        };
        Ok(passed)
    }
}

fn emit(out: &mut impl Write, value: &impl Serialize) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("failed to encode output")?;
    writeln!(out).context("failed to write output")?;
    Ok(())
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("swatchbook").chain(args.iter().copied()))
            .expect("valid arguments")
    }

    fn run(args: &[&str]) -> (bool, Value) {
        let cli = parse(args);
        let mut config = AppConfig::default();
        config.apply_overrides(cli.metric, &cli.vars);
        let mut out = Vec::new();
        let passed = cli.command.run(&config, &mut out).expect("command succeeds");
        (passed, serde_json::from_slice(&out).expect("json output"))
    }

    // ── Argument parsing ──────────────────────────────────────────────────

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["report", "#000", "#fff", "--metric", "wcag", "--var", "bg=#ffffff"]);
        assert_eq!(cli.metric, Some(ContrastMetric::Wcag));
        assert_eq!(cli.vars, vec![("bg".to_owned(), "#ffffff".to_owned())]);
    }

    #[test]
    fn passes_defaults_to_small_aa() {
        match parse(&["passes", "#000000", "#ffffff"]).command {
            Command::Passes { size, level, .. } => {
                assert_eq!(size, TextSize::Small);
                assert_eq!(level, Level::Aa);
            }
            other => panic!("parsed as {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_var() {
        assert!(parse_var("no-equals").is_err());
        assert!(parse_var("=#fff").is_err());
        assert_eq!(parse_var("--a = 1 2 3"), Ok(("--a".to_owned(), "1 2 3".to_owned())));
    }

    // ── Commands ──────────────────────────────────────────────────────────

    #[test]
    fn palette_command() {
        let (passed, json) = run(&["palette", "4f46e5"]);
        assert!(passed);
        assert_eq!(json["500"]["hex"], "#4f46e5");
        assert_eq!(json.as_object().map(serde_json::Map::len), Some(10));
    }

    #[test]
    fn report_command_resolves_variables() {
        let (_, json) = run(&[
            "report",
            "var(--fg)",
            "var(--bg)",
            "--var",
            "--fg=0 0 0",
            "--var",
            "bg=#ffffff",
        ]);
        assert_eq!(json["textColor"], "#000000");
        assert_eq!(json["backgroundColor"], "#ffffff");
        assert_eq!(json["tier"], "great");
    }

    #[test]
    fn passes_command_reports_failure() {
        let (passed, json) = run(&["passes", "#0fba81", "#ffffff", "--size", "large", "--metric", "wcag"]);
        assert!(!passed);
        assert_eq!(json, Value::Bool(false));

        let (passed, _) = run(&["passes", "#000000", "#ffffff", "--level", "AAA"]);
        assert!(passed);
    }

    #[test]
    fn convert_command() {
        let (_, json) = run(&["convert", "#ffffff"]);
        assert_eq!(json["hex"], "#ffffff");
        assert_eq!(json["rgb"], "255 255 255");
        let l = json["lightness"].as_f64().expect("number");
        assert!((l - 100.0).abs() < 1e-3, "{l}");
        let y = json["relativeLuminance"].as_f64().expect("number");
        assert!((y - 1.0).abs() < 1e-9, "{y}");
    }

    #[test]
    fn convert_rejects_non_colors() {
        let cli = parse(&["convert", "#zzzzzz"]);
        let mut out = Vec::new();
        assert!(cli.command.run(&AppConfig::default(), &mut out).is_err());
        assert!(out.is_empty());
    }
}
