// In crates/app-config/src/lib.rs

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{
    AppSettings, SentimentSettings, ServerSettings, Settings, SnapshotSettings,
    TechnicalSettings, YahooSettings,
};

/// Loads the application settings from various sources.
///
/// This function orchestrates the layered configuration loading:
/// 1. Reads from a default `base.toml` file.
/// 2. Merges settings from an environment-specific file (e.g., `development.toml`).
/// 3. Merges settings from environment variables.
/// 4. Applies a bare `PORT` variable, as set by hosting platforms, over everything else.
///
/// Range and consistency checks happen when the typed analyzer settings are built.
pub fn load_settings() -> Result<Settings> {
    // Get the current environment. Default to "development" if not set.
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

    let files = Config::builder()
        .add_source(File::with_name("config/base"))
        .add_source(File::with_name(&format!("config/{}", environment)).required(false));

    from_sources(files, std::env::var("PORT").ok())
}

fn from_sources(files: ConfigBuilder<DefaultState>, port: Option<String>) -> Result<Settings> {
    let settings = files
        // e.g. `APP__SNAPSHOT__SYMBOL=^BSESN`. The prefix is `APP`, separator is `__`.
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("sentiment.fallback_symbols")
                .try_parsing(true),
        )
        .set_override_option("server.port", port)?
        .build()?;

    Ok(settings.try_deserialize()?)
}
