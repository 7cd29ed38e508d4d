//! Configuration management for the Agrimarket platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with AGRIMARKET_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Advice assistant configuration
    pub advice: AdviceConfig,

    /// Seed the store with a browsable demo catalog at startup
    pub demo_data: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AdviceConfig {
    /// Google Gemini API key; empty disables the live assistant
    pub api_key: String,

    /// Model used for advice generation
    pub model: String,

    /// Upper bound on a single advice call, in seconds
    pub timeout_secs: u64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("AGRIMARKET_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 5000)?
            .set_default("server.host", "0.0.0.0")?
            // The bare GEMINI_API_KEY variable is honored for parity with
            // earlier deployments; AGRIMARKET_ADVICE__API_KEY overrides it.
            .set_default(
                "advice.api_key",
                std::env::var("GEMINI_API_KEY").unwrap_or_default(),
            )?
            .set_default("advice.model", "gemini-2.5-flash")?
            .set_default("advice.timeout_secs", 30)?
            .set_default("demo_data", true)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (AGRIMARKET_ prefix)
            .add_source(
                Environment::with_prefix("AGRIMARKET")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            host: "0.0.0.0".to_string(),
        }
    }
}
