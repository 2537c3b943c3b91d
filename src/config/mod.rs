//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `POWERDASH` prefix and nested values use double underscores as separators.
//! Every section has defaults, so an empty environment yields a usable config.
//!
//! # Example
//!
//! ```no_run
//! use powerdash_medical::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Drafting with {}", config.ai.model);
//! ```

mod ai;
mod error;
mod export;
mod logging;
mod safety;

pub use ai::{AiConfig, DEFAULT_MODEL};
pub use error::{ConfigError, ValidationError};
pub use export::ExportConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use safety::SafetyConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Generation backend (model, endpoint, timeout, credential variable)
    #[serde(default)]
    pub ai: AiConfig,

    /// Content classifier keyword sets and patterns
    #[serde(default)]
    pub safety: SafetyConfig,

    /// Export geometry and raw preview bound
    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `POWERDASH` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Splits the safety keyword lists on commas
    ///
    /// `OPENAI_MODEL` is honoured as the default model when
    /// `POWERDASH__AI__MODEL` is not set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let default_model =
            std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let config = config::Config::builder()
            .set_default("ai.model", default_model)?
            .add_source(
                config::Environment::with_prefix("POWERDASH")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("safety.ae_keywords")
                    .with_list_parse_key("safety.pii_keywords"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.safety.validate()?;
        self.export.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("OPENAI_MODEL");
        env::remove_var("POWERDASH__AI__MODEL");
        env::remove_var("POWERDASH__AI__TIMEOUT_SECS");
        env::remove_var("POWERDASH__AI__TEMPERATURE");
        env::remove_var("POWERDASH__SAFETY__AE_KEYWORDS");
        env::remove_var("POWERDASH__EXPORT__FONT_SIZE_PT");
        env::remove_var("POWERDASH__LOGGING__FORMAT");
    }

    #[test]
    fn test_load_with_empty_environment_uses_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.ai.model, "gpt-4o-mini");
        assert_eq!(config.ai.timeout_secs, 60);
        assert_eq!(config.export.raw_preview_chars, 4000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_openai_model_is_fallback_default() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("OPENAI_MODEL", "gpt-4.1");
        let result = AppConfig::load();
        clear_env();

        assert_eq!(result.unwrap().ai.model, "gpt-4.1");
    }

    #[test]
    fn test_prefixed_model_overrides_openai_model() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("OPENAI_MODEL", "gpt-4.1");
        env::set_var("POWERDASH__AI__MODEL", "gpt-4o");
        let result = AppConfig::load();
        clear_env();

        assert_eq!(result.unwrap().ai.model, "gpt-4o");
    }

    #[test]
    fn test_numeric_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("POWERDASH__AI__TIMEOUT_SECS", "15");
        env::set_var("POWERDASH__AI__TEMPERATURE", "0.7");
        env::set_var("POWERDASH__EXPORT__FONT_SIZE_PT", "12");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.ai.timeout_secs, 15);
        assert!((config.ai.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(config.export.font_size_pt, 12.0);
    }

    #[test]
    fn test_keyword_list_is_split_on_commas() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("POWERDASH__SAFETY__AE_KEYWORDS", "fatal,overdose");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.safety.ae_keywords, vec!["fatal", "overdose"]);
        // Untouched list keeps its defaults
        assert!(config.safety.pii_keywords.contains(&"date of birth".to_string()));
    }

    #[test]
    fn test_json_log_format() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("POWERDASH__LOGGING__FORMAT", "json");
        let result = AppConfig::load();
        clear_env();

        assert_eq!(result.unwrap().logging.format, LogFormat::Json);
    }
}
