//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use url::Url;

use super::Settings;
use crate::utils::errors::{ConciergeError, Result};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_mailer_config(&settings.mailer)?;
    validate_oracle_config(&settings.oracle)?;
    validate_content_config(&settings.content)?;
    validate_logging_config(&settings.logging)?;
    Ok(())
}

/// Validate bot configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.is_empty() {
        return Err(ConciergeError::Config("Bot token is required".to_string()));
    }
    Ok(())
}

/// Validate mailer configuration
fn validate_mailer_config(config: &super::MailerConfig) -> Result<()> {
    if config.api_url.is_empty() {
        return Err(ConciergeError::Config("Mailer API URL is required".to_string()));
    }

    Url::parse(&config.api_url)
        .map_err(|e| ConciergeError::Config(format!("Invalid mailer API URL: {}", e)))?;

    if config.service_id.is_empty() || config.template_id.is_empty() || config.public_key.is_empty()
    {
        return Err(ConciergeError::Config(
            "Mailer routing (service_id, template_id, public_key) is required".to_string(),
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(ConciergeError::Config(
            "Mailer timeout must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate oracle configuration
fn validate_oracle_config(config: &super::OracleConfig) -> Result<()> {
    if config.api_url.is_empty() {
        return Err(ConciergeError::Config("Oracle API URL is required".to_string()));
    }

    Url::parse(&config.api_url)
        .map_err(|e| ConciergeError::Config(format!("Invalid oracle API URL: {}", e)))?;

    if config.fast_model.is_empty() || config.deep_model.is_empty() {
        return Err(ConciergeError::Config(
            "Oracle model names are required".to_string(),
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(ConciergeError::Config(
            "Oracle timeout must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate content source configuration
fn validate_content_config(config: &super::ContentConfig) -> Result<()> {
    for (slug, endpoint) in &config.sources {
        Url::parse(endpoint).map_err(|e| {
            ConciergeError::Config(format!("Invalid content endpoint for '{}': {}", slug, e))
        })?;
    }

    if config.timeout_seconds == 0 {
        return Err(ConciergeError::Config(
            "Content timeout must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(ConciergeError::Config("Log level is required".to_string()));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(ConciergeError::Config(format!(
            "Invalid log level: {}. Valid levels: {:?}",
            config.level, valid_levels
        )));
    }

    Ok(())
}
