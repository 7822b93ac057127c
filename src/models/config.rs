//! Application configuration structures.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Catalog endpoint and request scope settings
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Polling and cool-down behavior
    #[serde(default)]
    pub monitor: MonitorConfig,

    /// Notification channel settings
    #[serde(default)]
    pub notifier: NotifierConfig,

    /// Course sections to watch
    #[serde(default)]
    pub targets: Vec<Target>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.catalog.endpoint)
            .map_err(|e| AppError::config(format!("catalog.endpoint is not a valid URL: {e}")))?;
        if self.catalog.user_agent.trim().is_empty() {
            return Err(AppError::config("catalog.user_agent is empty"));
        }
        if self.catalog.timeout_secs == 0 {
            return Err(AppError::config("catalog.timeout_secs must be > 0"));
        }
        if self.catalog.page_size == 0 {
            return Err(AppError::config("catalog.page_size must be > 0"));
        }
        if self.monitor.poll_interval_secs == 0 {
            return Err(AppError::config("monitor.poll_interval_secs must be > 0"));
        }
        if self.monitor.cooldown_secs == 0 {
            return Err(AppError::config("monitor.cooldown_secs must be > 0"));
        }
        if self.targets.is_empty() {
            return Err(AppError::config("no targets defined"));
        }
        for target in &self.targets {
            if target.course_code.trim().is_empty() || target.activity.trim().is_empty() {
                return Err(AppError::config(format!(
                    "target {target} has an empty course code or activity"
                )));
            }
        }
        if let NotifierConfig::Twilio(twilio) = &self.notifier {
            twilio.validate()?;
        }
        Ok(())
    }
}

/// Catalog endpoint and request scope settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Course search endpoint URL
    #[serde(default = "defaults::endpoint")]
    pub endpoint: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Page size, large enough for the full result set in one page
    #[serde(default = "defaults::page_size")]
    pub page_size: u32,

    /// Session/term codes to query
    #[serde(default = "defaults::sessions")]
    pub sessions: Vec<String>,

    /// Division codes to query
    #[serde(default = "defaults::divisions")]
    pub divisions: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::endpoint(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            page_size: defaults::page_size(),
            sessions: defaults::sessions(),
            divisions: defaults::divisions(),
        }
    }
}

/// Polling and cool-down behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Delay between polls in seconds
    #[serde(default = "defaults::poll_interval")]
    pub poll_interval_secs: u64,

    /// Notification suppression window after an alert, in seconds
    #[serde(default = "defaults::cooldown")]
    pub cooldown_secs: u64,

    /// Log a stats summary every N cycles (0 disables)
    #[serde(default = "defaults::summary_every")]
    pub summary_every: u64,
}

impl MonitorConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: defaults::poll_interval(),
            cooldown_secs: defaults::cooldown(),
            summary_every: defaults::summary_every(),
        }
    }
}

/// Notification channel selection.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NotifierConfig {
    /// Log the alert to the console only
    #[default]
    Console,

    /// Send the alert as an SMS via Twilio
    Twilio(TwilioConfig),
}

/// Twilio SMS credentials and numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
    pub to_number: String,

    /// Twilio API base URL, overridable for testing
    #[serde(default = "defaults::twilio_api_base")]
    pub api_base: String,
}

impl TwilioConfig {
    fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("account_sid", &self.account_sid),
            ("auth_token", &self.auth_token),
            ("from_number", &self.from_number),
            ("to_number", &self.to_number),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::config(format!("notifier.{field} is empty")));
            }
        }
        Ok(())
    }
}

/// One (course, semester, activity) section to watch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Target {
    /// Course code (e.g. "CSC309H1")
    pub course_code: String,

    /// Semester / section code (e.g. "F")
    pub semester: String,

    /// Section name within the course (e.g. "LEC0101")
    pub activity: String,
}

impl Target {
    /// Composite key of the offering this target belongs to.
    pub fn composite_key(&self) -> String {
        format!("{}{}", self.course_code, self.semester)
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.course_code, self.semester, self.activity)
    }
}

mod defaults {
    // Catalog defaults
    pub fn endpoint() -> String {
        "https://api.easi.utoronto.ca/ttb/getPageableCourses".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; seatwatch/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn page_size() -> u32 {
        162_500
    }
    pub fn sessions() -> Vec<String> {
        vec!["20239".into(), "20241".into(), "20239-20241".into()]
    }
    pub fn divisions() -> Vec<String> {
        ["APSC", "ARTSC", "FPEH", "MUSIC", "ARCLA", "ERIN", "SCAR"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    // Monitor defaults
    pub fn poll_interval() -> u64 {
        5
    }
    pub fn cooldown() -> u64 {
        35
    }
    pub fn summary_every() -> u64 {
        60
    }

    // Notifier defaults
    pub fn twilio_api_base() -> String {
        "https://api.twilio.com".into()
    }
}
