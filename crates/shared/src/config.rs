//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Aggregation engine limits.
    #[serde(default)]
    pub engine: EngineConfig,
    /// Business-level settings.
    #[serde(default)]
    pub business: BusinessConfig,
    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Longest range, in calendar days, the recurrence simulation will walk.
    #[serde(default = "default_max_range_days")]
    pub max_range_days: u32,
    /// Number of products kept in the revenue ranking.
    #[serde(default = "default_top_products")]
    pub top_products: usize,
}

fn default_max_range_days() -> u32 {
    1830 // ~5 years
}

fn default_top_products() -> usize {
    5
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_range_days: default_max_range_days(),
            top_products: default_top_products(),
        }
    }
}

/// Business configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BusinessConfig {
    /// IANA timezone the business operates in.
    ///
    /// Used when a date-only range end is widened to the end of the local day.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_timezone() -> String {
    "America/Sao_Paulo".to_string()
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    /// Emit JSON log lines instead of human-readable ones.
    #[serde(default)]
    pub json: bool,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("EQUILIBRIO").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
