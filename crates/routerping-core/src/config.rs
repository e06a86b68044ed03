use crate::classifier::Classifier;
use crate::error::{PingError, Result};
use crate::paths;
use crate::types::Status;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_WEBHOOK_BASE: &str = "https://hooks.slack.com/services/";

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// IANA zone the log timestamps and reminder dates are expressed in.
    pub time_zone: String,
    #[serde(default = "default_log_fname")]
    pub log_fname: PathBuf,
    /// Probe timeout in seconds.
    #[serde(default = "default_ping_timeout")]
    pub ping_timeout: f64,
    /// Webhook path below `webhook_base_url`, or a full URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slack_webhook: Option<String>,
    #[serde(default = "default_webhook_base")]
    pub webhook_base_url: String,
    /// Status for probe failures that are neither a response nor a timeout.
    #[serde(default = "default_network_errors")]
    pub network_errors: Status,
    /// Target used when none is given on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.trim().chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{tail}")
}

fn default_log_fname() -> PathBuf {
    PathBuf::from(paths::DEFAULT_LOG_FILE)
}

fn default_ping_timeout() -> f64 {
    10.0
}

fn default_webhook_base() -> String {
    DEFAULT_WEBHOOK_BASE.to_string()
}

fn default_network_errors() -> Status {
    Status::Unreachable
}

impl Config {
    pub fn new(time_zone: impl Into<String>) -> Self {
        Self {
            time_zone: time_zone.into(),
            log_fname: default_log_fname(),
            ping_timeout: default_ping_timeout(),
            slack_webhook: None,
            webhook_base_url: default_webhook_base(),
            network_errors: default_network_errors(),
            address: None,
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PingError::ConfigNotFound(path.to_path_buf()));
        }
        let data = std::fs::read_to_string(path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn tz(&self) -> Result<Tz> {
        self.time_zone
            .parse::<Tz>()
            .map_err(|_| PingError::InvalidTimeZone(self.time_zone.clone()))
    }

    pub fn probe_timeout(&self) -> Result<Duration> {
        Duration::try_from_secs_f64(self.ping_timeout)
            .ok()
            .filter(|d| !d.is_zero())
            .ok_or_else(|| {
                PingError::InvalidConfig(format!(
                    "ping_timeout must be a positive number of seconds, got {}",
                    self.ping_timeout
                ))
            })
    }

    /// Full webhook URL, if notifications are configured.
    pub fn webhook_url(&self) -> Option<String> {
        let hook = self.slack_webhook.as_deref()?.trim();
        if hook.is_empty() {
            return None;
        }
        if hook.starts_with("http://") || hook.starts_with("https://") {
            return Some(hook.to_string());
        }
        let base = self.webhook_base_url.trim_end_matches('/');
        Some(format!("{base}/{}", hook.trim_start_matches('/')))
    }

    pub fn classifier(&self) -> Result<Classifier> {
        Classifier::new(self.network_errors)
    }

    pub fn log_path(&self, address: &str) -> PathBuf {
        paths::log_path(&self.log_fname, address)
    }

    /// Copy safe to print: the webhook keeps only its last four characters.
    pub fn redacted(&self) -> Config {
        let mut shown = self.clone();
        shown.slack_webhook = self.slack_webhook.as_deref().map(mask_secret);
        shown
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.tz().is_err() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!("unknown time_zone '{}'", self.time_zone),
            });
        }

        match self.probe_timeout() {
            Err(_) => warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "ping_timeout must be a positive number of seconds, got {}",
                    self.ping_timeout
                ),
            }),
            Ok(t) if t > Duration::from_secs(60) => warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "ping_timeout={}s (>60s is unusual for a local router)",
                    self.ping_timeout
                ),
            }),
            Ok(_) => {}
        }

        if self.webhook_url().is_none() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "slack_webhook is not set: notifications will only be logged".to_string(),
            });
        }

        if self.network_errors == Status::Healthy {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "network_errors cannot be 'healthy'".to_string(),
            });
        }

        if self.log_fname.file_stem().is_none() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!("log_fname '{}' has no file name", self.log_fname.display()),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
