//! Configuration read from the environment.

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use bingo_core::surface::PunchEffect;
use bingo_draw::application::settings::{DEFAULT_FLOOR, SequencerSettings};
use bingo_draw::domain::range::Range;

use crate::error::AppError;

/// Runtime configuration for the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Initial "From" bound (`BINGO_FROM`, default 1).
    pub from: i32,
    /// Initial "To" bound (`BINGO_TO`, default 75).
    pub to: i32,
    /// Lowest accepted bound (`BINGO_FLOOR`, default -9999).
    pub floor: i32,
    /// Spin length in milliseconds (`BINGO_SPIN_MS`, default 2000).
    pub spin_ms: u64,
    /// Noise tick period in milliseconds (`BINGO_TICK_MS`, default 50).
    pub tick_ms: u64,
    /// Fixed RNG seed (`BINGO_SEED`); entropy when unset.
    pub seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            from: 1,
            to: 75,
            floor: DEFAULT_FLOOR,
            spin_ms: 2000,
            tick_ms: 50,
            seed: None,
        }
    }
}

impl AppConfig {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, falling back to defaults for
    /// unset keys.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a value does not parse, a duration is
    /// zero, or an initial bound is below the floor.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let defaults = Self::default();
        let config = Self {
            from: parse_var(&lookup, "BINGO_FROM", defaults.from)?,
            to: parse_var(&lookup, "BINGO_TO", defaults.to)?,
            floor: parse_var(&lookup, "BINGO_FLOOR", defaults.floor)?,
            spin_ms: parse_var(&lookup, "BINGO_SPIN_MS", defaults.spin_ms)?,
            tick_ms: parse_var(&lookup, "BINGO_TICK_MS", defaults.tick_ms)?,
            seed: lookup("BINGO_SEED")
                .map(|raw| parse_value("BINGO_SEED", &raw))
                .transpose()?,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.spin_ms == 0 {
            return Err(AppError::Config("BINGO_SPIN_MS must be positive".to_owned()));
        }
        if self.tick_ms == 0 {
            return Err(AppError::Config("BINGO_TICK_MS must be positive".to_owned()));
        }
        for (key, value) in [("BINGO_FROM", self.from), ("BINGO_TO", self.to)] {
            if value < self.floor {
                return Err(AppError::Config(format!(
                    "{key} must be at least {}, got {value}",
                    self.floor
                )));
            }
        }
        Ok(())
    }

    /// Builds sequencer settings from this configuration.
    #[must_use]
    pub fn sequencer_settings(&self) -> SequencerSettings {
        SequencerSettings {
            initial_range: Range::new(self.from, self.to),
            floor: self.floor,
            spin_duration: Duration::from_millis(self.spin_ms),
            tick_interval: Duration::from_millis(self.tick_ms),
            punch: PunchEffect::default(),
            ..SequencerSettings::default()
        }
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: Display,
{
    lookup(key).map_or(Ok(default), |raw| parse_value(key, &raw))
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim()
        .parse()
        .map_err(|e| AppError::Config(format!("{key} must be a valid number: {e}")))
}
