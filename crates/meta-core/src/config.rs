//! Configuration management
//!
//! Settings are resolved in the following order:
//! 1. Environment variables
//! 2. `meta-gateway.toml` config file
//! 3. Defaults
//!
//! The settings value is constructed once at startup and passed by reference
//! into the dispatcher; there is no ambient global lookup. Access tokens are
//! redacted from the `Debug` output so they never reach the logs.

use std::path::Path;

use serde::Deserialize;

use crate::error::{ErrorCode, MetaError, Result};
use crate::models::Platform;

fn default_api_version() -> String {
    "v21.0".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Application settings.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Facebook Page access token.
    pub facebook_page_access_token: String,

    /// Instagram access token.
    pub instagram_access_token: String,

    /// WhatsApp Business Cloud access token.
    pub whatsapp_access_token: String,

    /// WhatsApp phone number identifier (required alongside the token).
    pub whatsapp_phone_number_id: String,

    /// Graph API version segment used to build endpoint URLs.
    #[serde(default = "default_api_version")]
    pub meta_api_version: String,

    /// Override for the Graph API base URL. Tests point this at a stub
    /// server; unset in production.
    pub graph_base_url: Option<String>,

    /// Log level filter for the subscriber.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// When set, the mock adapter is substituted for every platform.
    pub demo_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            facebook_page_access_token: String::new(),
            instagram_access_token: String::new(),
            whatsapp_access_token: String::new(),
            whatsapp_phone_number_id: String::new(),
            meta_api_version: default_api_version(),
            graph_base_url: None,
            log_level: default_log_level(),
            demo_mode: false,
        }
    }
}

impl Settings {
    /// Load settings from the default locations.
    ///
    /// Reads `meta-gateway.toml` from the current directory when present,
    /// then applies environment overrides. Without a file, environment
    /// variables alone are used.
    pub fn load() -> Result<Self> {
        if Path::new("meta-gateway.toml").exists() {
            return Self::from_toml_file("meta-gateway.toml");
        }
        Ok(Self::from_env())
    }

    /// Load settings from a TOML file, then apply environment overrides
    /// (environment wins).
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            MetaError::new(
                ErrorCode::ValidationError,
                format!("Failed to read config file: {e}"),
            )
        })?;

        let mut settings: Settings = toml::from_str(&content).map_err(|e| {
            MetaError::new(
                ErrorCode::ValidationError,
                format!("Failed to parse config file: {e}"),
            )
        })?;

        settings.apply_env_overrides();
        Ok(settings)
    }

    /// Build settings from environment variables only.
    pub fn from_env() -> Self {
        let mut settings = Settings::default();
        settings.apply_env_overrides();
        settings
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(token) = std::env::var("FACEBOOK_PAGE_ACCESS_TOKEN") {
            self.facebook_page_access_token = token;
        }
        if let Ok(token) = std::env::var("INSTAGRAM_ACCESS_TOKEN") {
            self.instagram_access_token = token;
        }
        if let Ok(token) = std::env::var("WHATSAPP_ACCESS_TOKEN") {
            self.whatsapp_access_token = token;
        }
        if let Ok(id) = std::env::var("WHATSAPP_PHONE_NUMBER_ID") {
            self.whatsapp_phone_number_id = id;
        }
        if let Ok(version) = std::env::var("META_API_VERSION") {
            if !version.is_empty() {
                self.meta_api_version = version;
            }
        }
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            if !level.is_empty() {
                self.log_level = level;
            }
        }
        if let Ok(base) = std::env::var("META_GRAPH_BASE_URL") {
            if !base.is_empty() {
                self.graph_base_url = Some(base);
            }
        }
        if let Ok(demo) = std::env::var("DEMO_MODE") {
            self.demo_mode = matches!(demo.to_lowercase().as_str(), "1" | "true" | "yes");
        }
    }

    /// Access token for a platform, `None` when not configured.
    pub fn platform_token(&self, platform: Platform) -> Option<&str> {
        let token = match platform {
            Platform::Facebook => &self.facebook_page_access_token,
            Platform::Instagram => &self.instagram_access_token,
            Platform::Whatsapp => &self.whatsapp_access_token,
        };
        if token.is_empty() {
            None
        } else {
            Some(token)
        }
    }

    /// Whether a platform has everything it needs to be dispatched to.
    ///
    /// Demo mode is always considered configured; WhatsApp additionally
    /// requires the phone number id.
    pub fn validate_platform_config(&self, platform: Platform) -> bool {
        if self.demo_mode {
            return true;
        }

        if self.platform_token(platform).is_none() {
            return false;
        }

        if platform == Platform::Whatsapp && self.whatsapp_phone_number_id.is_empty() {
            return false;
        }

        true
    }
}

// Tokens must not leak through debug-formatted log fields.
impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn redact(token: &str) -> &'static str {
            if token.is_empty() {
                ""
            } else {
                "***REDACTED***"
            }
        }

        f.debug_struct("Settings")
            .field(
                "facebook_page_access_token",
                &redact(&self.facebook_page_access_token),
            )
            .field(
                "instagram_access_token",
                &redact(&self.instagram_access_token),
            )
            .field("whatsapp_access_token", &redact(&self.whatsapp_access_token))
            .field("whatsapp_phone_number_id", &self.whatsapp_phone_number_id)
            .field("meta_api_version", &self.meta_api_version)
            .field("graph_base_url", &self.graph_base_url)
            .field("log_level", &self.log_level)
            .field("demo_mode", &self.demo_mode)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_with_facebook() -> Settings {
        Settings {
            facebook_page_access_token: "fb-token".to_string(),
            ..Settings::default()
        }
    }

    #[test]
    fn test_platform_token_lookup() {
        let settings = settings_with_facebook();
        assert_eq!(settings.platform_token(Platform::Facebook), Some("fb-token"));
        assert_eq!(settings.platform_token(Platform::Instagram), None);
    }

    #[test]
    fn test_validate_platform_config() {
        let settings = settings_with_facebook();
        assert!(settings.validate_platform_config(Platform::Facebook));
        assert!(!settings.validate_platform_config(Platform::Instagram));
    }

    #[test]
    fn test_whatsapp_needs_phone_number_id() {
        let mut settings = Settings {
            whatsapp_access_token: "wa-token".to_string(),
            ..Settings::default()
        };
        assert!(!settings.validate_platform_config(Platform::Whatsapp));

        settings.whatsapp_phone_number_id = "123456".to_string();
        assert!(settings.validate_platform_config(Platform::Whatsapp));
    }

    #[test]
    fn test_demo_mode_is_always_configured() {
        let settings = Settings {
            demo_mode: true,
            ..Settings::default()
        };
        assert!(settings.validate_platform_config(Platform::Facebook));
        assert!(settings.validate_platform_config(Platform::Whatsapp));
    }

    #[test]
    fn test_toml_parsing() {
        let settings: Settings = toml::from_str(
            r#"
            facebook_page_access_token = "fb"
            demo_mode = true
            "#,
        )
        .unwrap();
        assert_eq!(settings.facebook_page_access_token, "fb");
        assert!(settings.demo_mode);
        assert_eq!(settings.meta_api_version, "v21.0");
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let settings = settings_with_facebook();
        let debug = format!("{settings:?}");
        assert!(!debug.contains("fb-token"));
        assert!(debug.contains("***REDACTED***"));
    }
}
