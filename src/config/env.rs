// src/config/env.rs
// DOCUMENTATION: Environment variable management
// PURPOSE: Load and validate configuration from .env files

use dotenv::dotenv;
use std::env;

/// Application configuration loaded from environment variables
/// DOCUMENTATION: Centralizes all configuration in one struct
/// Load with Config::from_env() at application startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0")
    pub server_address: String,

    /// Server listen port (default 8000)
    pub server_port: u16,

    /// Log level: debug, info, warn, error
    pub log_level: String,

    /// Google Maps Places API key (required)
    pub maps_api_key: String,

    /// Gemini API key (required)
    pub gemini_api_key: String,

    /// Allowed CORS origin for browser clients
    pub allowed_origin: String,
}

impl Config {
    /// Load configuration from environment variables
    /// DOCUMENTATION: Reads from .env or process environment
    /// Called once at application startup
    pub fn from_env() -> Self {
        // Load .env file if it exists
        dotenv().ok();

        Config {
            server_address: env::var("SERVER_ADDRESS").unwrap_or_else(|_| "0.0.0.0".to_string()),

            server_port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .unwrap_or(8000),

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),

            maps_api_key: env::var("MAPS_API_KEY").unwrap_or_else(|_| String::new()),

            gemini_api_key: env::var("GEMINI_API_KEY").unwrap_or_else(|_| String::new()),

            allowed_origin: env::var("ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
        }
    }

    /// Validate critical configuration
    /// DOCUMENTATION: Both upstream API keys are required to serve anything useful
    pub fn validate(&self) -> Result<(), String> {
        if self.maps_api_key.is_empty() {
            return Err("MAPS_API_KEY is required".to_string());
        }

        if self.gemini_api_key.is_empty() {
            return Err("GEMINI_API_KEY is required".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_both_keys() {
        let mut config = Config {
            server_address: "0.0.0.0".to_string(),
            server_port: 8000,
            log_level: "info".to_string(),
            maps_api_key: String::new(),
            gemini_api_key: String::new(),
            allowed_origin: "http://localhost:5173".to_string(),
        };

        assert_eq!(config.validate(), Err("MAPS_API_KEY is required".to_string()));

        config.maps_api_key = "maps-key".to_string();
        assert_eq!(
            config.validate(),
            Err("GEMINI_API_KEY is required".to_string())
        );

        config.gemini_api_key = "gemini-key".to_string();
        assert!(config.validate().is_ok());
    }
}
