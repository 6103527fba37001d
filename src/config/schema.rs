//! Configuration schema types
//!
//! This module defines the configuration structure for ado-batch.

use crate::config::{secret_string, SecretString};
use crate::domain::DevOpsError;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use url::Url;

/// Main ado-batch configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImporterConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Azure DevOps connection settings
    pub devops: DevOpsConfig,

    /// Import settings
    pub import: ImportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ImporterConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.devops.validate()?;
        self.import.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Azure DevOps connection settings
///
/// Organization, project and PAT are mandatory. They default to empty so that a
/// missing key is reported by validation with a readable message instead of a
/// TOML parse error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevOpsConfig {
    /// Organization name (the first path segment after the service URL)
    #[serde(default)]
    pub organization: String,

    /// Project name
    #[serde(default)]
    pub project: String,

    /// Personal access token, sent as the basic auth password
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default = "default_pat")]
    pub pat: SecretString,

    /// Service root, without organization
    #[serde(default = "default_service_url")]
    pub service_url: String,

    /// REST API version sent as `api-version`
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl DevOpsConfig {
    /// Creates settings for an organization and project with default endpoint values
    pub fn new(
        organization: impl Into<String>,
        project: impl Into<String>,
        pat: impl Into<String>,
    ) -> Self {
        Self {
            organization: organization.into(),
            project: project.into(),
            pat: secret_string(pat.into()),
            ..Default::default()
        }
    }

    /// Checks the settings every remote call depends on
    ///
    /// # Errors
    ///
    /// Returns [`DevOpsError::Configuration`] naming each empty field.
    pub fn ensure_complete(&self) -> Result<(), DevOpsError> {
        let mut missing = Vec::new();
        if self.organization.trim().is_empty() {
            missing.push("organization");
        }
        if self.project.trim().is_empty() {
            missing.push("project");
        }
        if self.pat.expose_secret().is_empty() {
            missing.push("pat");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(DevOpsError::Configuration(format!(
                "devops.{} cannot be empty",
                missing.join(", devops.")
            )))
        }
    }

    /// Organization root, e.g. `https://dev.azure.com/my-org`
    ///
    /// The organization is appended as an encoded path segment.
    pub fn organization_url(&self) -> Result<Url, DevOpsError> {
        let mut url = Url::parse(&self.service_url).map_err(|e| {
            DevOpsError::BuildRequest(format!("invalid service URL '{}': {e}", self.service_url))
        })?;

        url.path_segments_mut()
            .map_err(|_| {
                DevOpsError::BuildRequest(format!(
                    "service URL '{}' cannot carry a path",
                    self.service_url
                ))
            })?
            .pop_if_empty()
            .push(&self.organization);

        Ok(url)
    }

    fn validate(&self) -> Result<(), String> {
        self.ensure_complete().map_err(|e| e.to_string())?;

        if !self.service_url.starts_with("http://") && !self.service_url.starts_with("https://")
        {
            return Err("devops.service_url must start with http:// or https://".to_string());
        }

        if self.api_version.trim().is_empty() {
            return Err("devops.api_version cannot be empty".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("devops.timeout_seconds must be > 0".to_string());
        }

        Ok(())
    }
}

impl Default for DevOpsConfig {
    fn default() -> Self {
        Self {
            organization: String::new(),
            project: String::new(),
            pat: default_pat(),
            service_url: default_service_url(),
            api_version: default_api_version(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Import settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Path to the JSON backlog file
    pub items_path: String,

    /// Number of user stories imported concurrently (1-16)
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Dry run mode (log patch documents, create nothing)
    #[serde(default)]
    pub dry_run: bool,
}

impl ImportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.items_path.trim().is_empty() {
            return Err("import.items_path cannot be empty".to_string());
        }

        if self.max_concurrency == 0 || self.max_concurrency > 16 {
            return Err("import.max_concurrency must be between 1 and 16".to_string());
        }

        Ok(())
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            items_path: String::new(),
            max_concurrency: default_max_concurrency(),
            dry_run: false,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_pat() -> SecretString {
    secret_string(String::new())
}

fn default_service_url() -> String {
    "https://dev.azure.com".to_string()
}

fn default_api_version() -> String {
    "7.0".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_max_concurrency() -> usize {
    1
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
