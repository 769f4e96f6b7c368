use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub calendar: CalendarConfig,
    pub expansion: ExpansionConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    /// IANA timezone name all wall-clock arithmetic is done in.
    pub timezone: String,
    /// First day of the calendar week (e.g. "mon").
    pub week_start: String,
}

impl CalendarConfig {
    /// ## Summary
    /// Resolves the configured timezone name to a `chrono_tz::Tz`.
    ///
    /// ## Errors
    /// Returns an error if the name is not in the IANA database.
    pub fn timezone(&self) -> CoreResult<chrono_tz::Tz> {
        self.timezone
            .parse()
            .map_err(|e: chrono_tz::ParseError| CoreError::ConfigError(e.to_string()))
    }

    /// ## Summary
    /// Resolves the configured week start to a `chrono::Weekday`.
    ///
    /// ## Errors
    /// Returns an error if the value names no weekday.
    pub fn week_start(&self) -> CoreResult<chrono::Weekday> {
        self.week_start.parse().map_err(|_: chrono::ParseWeekdayError| {
            CoreError::ConfigError(format!("unknown week start: {}", self.week_start))
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExpansionConfig {
    /// Ceiling on the number of occurrences a single expansion may produce.
    pub max_occurrences: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from environment variables and an optional
    /// `config.toml` into a `Settings`. Environment variables take
    /// precedence over file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Config::builder()
            .set_default("calendar.timezone", "UTC")?
            .set_default("calendar.week_start", "mon")?
            .set_default("expansion.max_occurrences", 1000)?
            .set_default("logging.level", "debug")?
            // Env file
            .add_source(
                config::Environment::default()
                    .convert_case(config::Case::Snake)
                    .separator("_")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            .build()?
            .try_deserialize::<Settings>()?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
