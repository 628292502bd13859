//! Application settings.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `HEALTHIQ_*` environment variables. The prefix is joined with `_` and
//! nested keys use `__`, so `HEALTHIQ_SEED=7` sets `seed` and
//! `HEALTHIQ_RANGES__STEPS__MAX=80000` sets `ranges.steps.max` while the other
//! steps fields keep their defaults. Command-line flags override the result
//! in `main`.

use std::path::Path;

use anyhow::{Context, Result};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, Map};
use serde::Deserialize;

use crate::data::{IntakeRanges, Metric};

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "healthiq.toml";

/// Runtime settings for the dashboard.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seconds between intake source polls.
    pub refresh_secs: u64,
    /// Seed for the random sample week.
    pub seed: u64,
    /// Start with the monthly pattern instead of a random week.
    pub monthly: bool,
    /// Plausible ranges, defaults and edit steps per metric.
    pub ranges: IntakeRanges,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            refresh_secs: 1,
            seed: 42,
            monthly: false,
            ranges: IntakeRanges::default(),
        }
    }
}

impl Settings {
    /// Load settings from an optional file plus the environment.
    ///
    /// An explicitly given path must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Like [`Settings::load`], reading `HEALTHIQ_*` variables from `env`
    /// instead of the process environment when it is given.
    fn load_with_env(path: Option<&Path>, env: Option<Map<String, String>>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };
        let environment = Environment::with_prefix("HEALTHIQ")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .source(env);

        let settings = range_defaults(Config::builder())?
            .add_source(file)
            .add_source(environment)
            .build()
            .context("failed to load configuration")?
            .try_deserialize::<Settings>()
            .context("invalid configuration")?;

        tracing::debug!(?settings, "loaded settings");
        Ok(settings)
    }
}

/// Seed every `ranges.<metric>.<field>` key so a single overridden field
/// keeps the built-in values of its siblings.
fn range_defaults(
    mut builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>> {
    let ranges = IntakeRanges::default();
    for metric in Metric::ALL {
        let range = ranges.range(metric);
        for (field, value) in [
            ("min", range.min),
            ("max", range.max),
            ("default", range.default),
            ("step", range.step),
        ] {
            let key = format!("ranges.{}.{}", metric.name(), field);
            builder = builder
                .set_default(key.as_str(), value)
                .with_context(|| format!("invalid default for {key}"))?;
        }
    }
    Ok(builder)
}
