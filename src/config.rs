// SPDX-License-Identifier: MIT
//
// Runtime configuration: which contrast metric to judge with, an optional
// threshold table, and the CSS custom properties that `var(--x)` inputs
// resolve against.
//
// Read once at startup from swatchbook.json (or $SWATCHBOOK_CONFIG_PATH).
// A missing or broken file never stops the tool; we log and use defaults.
// Command-line flags are layered on top afterwards.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use swatch_theme::{ContrastEvaluator, ContrastMetric, Thresholds};
use tracing::{info, warn};

/// Where the config is looked for when the environment doesn't say.
pub const DEFAULT_CONFIG_PATH: &str = "swatchbook.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
pub const CONFIG_PATH_ENV: &str = "SWATCHBOOK_CONFIG_PATH";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub metric: ContrastMetric,
    /// Replaces the metric's built-in table when set.
    pub thresholds: Option<Thresholds>,
    /// CSS custom properties keyed by name, leading `--` included.
    pub variables: HashMap<String, String>,
}

impl AppConfig {
    /// Load from the configured path, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&resolve_config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(config) => {
                    info!(
                        path = %path.display(),
                        metric = ?config.metric,
                        variables = config.variables.len(),
                        "loaded config"
                    );
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "config file not found; using built-in defaults");
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Parse the JSON form of the config.
    pub fn parse(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<RawConfig>(contents).map(Into::into)
    }

    /// Layer command-line flags over the file values.
    ///
    /// Switching metric drops file thresholds, since they were written for
    /// the other metric's scale.
    pub fn apply_overrides(&mut self, metric: Option<ContrastMetric>, variables: &[(String, String)]) {
        if let Some(metric) = metric.filter(|&m| m != self.metric) {
            if self.thresholds.take().is_some() {
                info!(?metric, "metric overridden; ignoring configured thresholds");
            }
            self.metric = metric;
        }
        for (name, value) in variables {
            self.variables.insert(variable_name(name), value.clone());
        }
    }

    /// The evaluator this config describes.
    #[must_use]
    pub fn evaluator(&self) -> ContrastEvaluator {
        let evaluator = ContrastEvaluator::new(self.metric);
        match self.thresholds {
            Some(thresholds) => evaluator.with_thresholds(thresholds),
            None => evaluator,
        }
    }
}

/// JSON shape of swatchbook.json. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    metric: ContrastMetric,
    thresholds: Option<Thresholds>,
    variables: HashMap<String, String>,
}

impl From<RawConfig> for AppConfig {
    fn from(raw: RawConfig) -> Self {
        let variables = raw
            .variables
            .into_iter()
            .map(|(name, value)| (variable_name(&name), value))
            .collect();
        Self {
            metric: raw.metric,
            thresholds: raw.thresholds,
            variables,
        }
    }
}

/// Property names are stored with their `--` prefix; accept them either way.
fn variable_name(name: &str) -> String {
    let name = name.trim();
    if name.starts_with("--") {
        name.to_owned()
    } else {
        format!("--{name}")
    }
}

fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV).map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
}

// ─── Tests ──────────────────────────────────────────────────────────────────
