use client_core::config::{configuration_directory, load_settings};
use client_core::ClientError;
use secrecy::Secret;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use validator::Validate;

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub backend: BackendSettings,
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub verification: VerificationSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Deserialize, Clone)]
pub struct BackendSettings {
    /// Base URL of the lending backend, e.g. `https://api.example.com`.
    pub url: String,
    pub api_key: Secret<String>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    10_000
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq, Validate)]
pub struct SessionSettings {
    #[serde(default = "default_inactivity_timeout_ms")]
    #[validate(range(min = 1, message = "Inactivity timeout must be positive"))]
    pub inactivity_timeout_ms: u64,
    /// An input event after the timer fired re-arms it.
    #[serde(default = "default_true")]
    pub restart_on_activity_after_expiry: bool,
    /// Re-arm automatically after every fire.
    #[serde(default)]
    pub loop_timer: bool,
}

impl SessionSettings {
    pub fn inactivity_timeout(&self) -> Duration {
        Duration::from_millis(self.inactivity_timeout_ms)
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            inactivity_timeout_ms: default_inactivity_timeout_ms(),
            restart_on_activity_after_expiry: true,
            loop_timer: false,
        }
    }
}

fn default_inactivity_timeout_ms() -> u64 {
    300_000
}

fn default_true() -> bool {
    true
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct VerificationSettings {
    #[serde(default = "default_resend_cooldown_secs")]
    pub resend_cooldown_secs: u64,
}

impl VerificationSettings {
    pub fn resend_cooldown(&self) -> Duration {
        Duration::from_secs(self.resend_cooldown_secs)
    }
}

impl Default for VerificationSettings {
    fn default() -> Self {
        Self {
            resend_cooldown_secs: default_resend_cooldown_secs(),
        }
    }
}

fn default_resend_cooldown_secs() -> u64 {
    60
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// OTLP collector endpoint; traces are only exported when set.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            otlp_endpoint: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Load settings from `lending-client/config/base.yaml` plus `APP_*` overrides.
pub fn get_configuration() -> Result<Settings, ClientError> {
    let directory = configuration_directory("lending-client")?;
    get_configuration_from(&directory)
}

pub fn get_configuration_from(directory: &Path) -> Result<Settings, ClientError> {
    let settings: Settings = load_settings(directory)?;
    settings.session.validate()?;
    Ok(settings)
}
