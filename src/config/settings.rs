//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub bot: BotConfig,
    pub mailer: MailerConfig,
    pub oracle: OracleConfig,
    pub content: ContentConfig,
    pub logging: LoggingConfig,
    pub features: FeaturesConfig,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    pub token: String,
    pub webhook_url: Option<String>,
}

/// Mailer (email collaborator) routing configuration.
///
/// The service/template/public-key triple is the routing metadata the mailer
/// API expects alongside the inquiry fields.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailerConfig {
    pub api_url: String,
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub timeout_seconds: u64,
}

/// Oracle (LLM collaborator) configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OracleConfig {
    pub api_url: String,
    pub api_key: String,
    /// Model used for mentor replies and per-event deep analysis
    pub fast_model: String,
    /// Model used for the journey synthesis ("Big Brain") analysis
    pub deep_model: String,
    pub timeout_seconds: u64,
}

/// Content collaborator configuration: the slug -> endpoint map for
/// dynamic pages. Slugs outside this map are not an error, they simply
/// resolve to nothing.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContentConfig {
    pub sources: HashMap<String, String>,
    pub timeout_seconds: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
    pub max_files: u32,
}

/// Feature flags configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeaturesConfig {
    pub oracle_chat: bool,
    pub deep_analysis: bool,
    pub dynamic_pages: bool,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("SWITCH"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::ConciergeError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        let mut sources = HashMap::new();
        sources.insert(
            "discover".to_string(),
            "https://api.switch-retreats.com/v1/discover".to_string(),
        );
        sources.insert(
            "events".to_string(),
            "https://api.switch-retreats.com/v1/events".to_string(),
        );
        sources.insert(
            "community".to_string(),
            "https://api.switch-retreats.com/v1/community".to_string(),
        );
        sources.insert(
            "vision".to_string(),
            "https://api.switch-retreats.com/v1/vision".to_string(),
        );

        Self {
            bot: BotConfig {
                token: String::new(),
                webhook_url: None,
            },
            mailer: MailerConfig {
                api_url: "https://api.emailjs.com".to_string(),
                service_id: "service_9495io7".to_string(),
                template_id: "template_fpxsrp8".to_string(),
                public_key: "rtKxSHs8VO77vzy6g".to_string(),
                timeout_seconds: 10,
            },
            oracle: OracleConfig {
                api_url: "https://oracle.switch-retreats.com".to_string(),
                api_key: String::new(),
                fast_model: "gemini-3-flash-preview".to_string(),
                deep_model: "gemini-3-pro-preview".to_string(),
                timeout_seconds: 30,
            },
            content: ContentConfig {
                sources,
                timeout_seconds: 10,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "/var/log/switch-concierge".to_string(),
                max_files: 5,
            },
            features: FeaturesConfig {
                oracle_chat: true,
                deep_analysis: true,
                dynamic_pages: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_carry_mailer_routing() {
        let settings = Settings::default();
        assert_eq!(settings.mailer.service_id, "service_9495io7");
        assert_eq!(settings.mailer.template_id, "template_fpxsrp8");
        assert!(!settings.mailer.public_key.is_empty());
    }

    #[test]
    fn test_default_content_sources_cover_known_slugs() {
        let settings = Settings::default();
        for slug in ["discover", "events", "community", "vision"] {
            assert!(settings.content.sources.contains_key(slug), "missing {slug}");
        }
        assert!(!settings.content.sources.contains_key("home"));
    }
}
