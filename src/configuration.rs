//! Configuration for the infractl client.
//!
//! The configuration lives in a YAML file under the user's configuration
//! directory. A missing file is not an error: the defaults point at a local
//! control plane and use the standard wait settings.

use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};
use tracing::debug;
use url::Url;

pub const DEFAULT_APPLICATION_ID: &str = "infractl";
pub const DEFAULT_CONFIGURATION_FILE_NAME: &str = "config.yml";
pub const CONFIG_DIR_ENV: &str = "INFRACTL_CONFIG_DIR";
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:9000";

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("failed to resolve the configuration directory")]
    FailedToFindConfigurationDirectory,
    #[error("failed to read configuration file {path:?}: {cause}")]
    FailedToReadFile {
        path: PathBuf,
        cause: std::io::Error,
    },
    #[error("failed to parse configuration file {path:?}: {cause}")]
    FailedToParseData {
        path: PathBuf,
        cause: serde_yaml::Error,
    },
    #[error("invalid endpoint URL {value:?}: {cause}")]
    InvalidEndpoint {
        value: String,
        cause: url::ParseError,
    },
    #[error("missing value for property {name:?}")]
    MissingRequiredPropertyValue { name: String },
}

/// Settings for the task and readiness waiters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaitSettings {
    /// Fixed sleep between two status fetches
    pub poll_interval_ms: u64,
    /// Upper bound for a task to reach a terminal state; 0 waits indefinitely
    pub task_timeout_secs: u64,
    /// Upper bound for an entity to become ready
    pub ready_timeout_secs: u64,
    /// Consecutive failed entity fetches tolerated while waiting for readiness
    pub fetch_retry_budget: u32,
}

impl Default for WaitSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1000,
            task_timeout_secs: 3600,
            ready_timeout_secs: 3600,
            fetch_retry_budget: 3,
        }
    }
}

impl WaitSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn task_timeout(&self) -> Option<Duration> {
        match self.task_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    pub fn ready_timeout(&self) -> Duration {
        Duration::from_secs(self.ready_timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    endpoint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    tenant: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    project: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
    request_timeout_secs: u64,
    wait: WaitSettings,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            tenant: None,
            project: None,
            access_token: None,
            request_timeout_secs: 60,
            wait: WaitSettings::default(),
        }
    }
}

impl Configuration {
    pub fn get_default_configuration_file_path() -> Result<PathBuf, ConfigurationError> {
        // INFRACTL_CONFIG_DIR takes precedence over the platform directory
        if let Ok(config_dir_str) = std::env::var(CONFIG_DIR_ENV) {
            let mut config_path = PathBuf::from(config_dir_str);
            config_path.push(DEFAULT_CONFIGURATION_FILE_NAME);
            return Ok(config_path);
        }

        match config_dir() {
            Some(mut default_config_file_path) => {
                default_config_file_path.push(DEFAULT_APPLICATION_ID);
                default_config_file_path.push(DEFAULT_CONFIGURATION_FILE_NAME);
                Ok(default_config_file_path)
            }
            None => Err(ConfigurationError::FailedToFindConfigurationDirectory),
        }
    }

    /// Load the configuration from the default location, falling back to
    /// defaults when the file does not exist.
    pub fn load_or_default() -> Result<Configuration, ConfigurationError> {
        let path = Configuration::get_default_configuration_file_path()?;
        debug!("Loading configuration from {}...", path.display());

        if !path.exists() {
            debug!("Configuration file not found, using defaults");
            return Ok(Configuration::default());
        }

        Configuration::load_from_file(path)
    }

    pub fn load_from_file(path: PathBuf) -> Result<Configuration, ConfigurationError> {
        let content = fs::read_to_string(&path).map_err(|cause| {
            ConfigurationError::FailedToReadFile {
                path: path.clone(),
                cause,
            }
        })?;

        let configuration: Configuration = serde_yaml::from_str(&content)
            .map_err(|cause| ConfigurationError::FailedToParseData { path, cause })?;

        // fail early on a bad endpoint instead of at the first request
        configuration.endpoint()?;
        Ok(configuration)
    }

    pub fn endpoint(&self) -> Result<Url, ConfigurationError> {
        Url::parse(&self.endpoint).map_err(|cause| ConfigurationError::InvalidEndpoint {
            value: self.endpoint.clone(),
            cause,
        })
    }

    pub fn tenant(&self) -> Option<&str> {
        self.tenant.as_deref()
    }

    pub fn project(&self) -> Option<&str> {
        self.project.as_deref()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn wait(&self) -> &WaitSettings {
        &self.wait
    }

    /// Apply per-invocation overrides given on the command line.
    pub fn with_overrides(
        mut self,
        endpoint: Option<&str>,
        tenant: Option<&str>,
        project: Option<&str>,
    ) -> Result<Configuration, ConfigurationError> {
        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint.to_string();
            self.endpoint()?;
        }
        if let Some(tenant) = tenant {
            self.tenant = Some(tenant.to_string());
        }
        if let Some(project) = project {
            self.project = Some(project.to_string());
        }
        Ok(self)
    }

    pub fn require_tenant(&self) -> Result<&str, ConfigurationError> {
        self.tenant()
            .ok_or_else(|| ConfigurationError::MissingRequiredPropertyValue {
                name: "tenant".to_string(),
            })
    }

    pub fn require_project(&self) -> Result<&str, ConfigurationError> {
        self.project()
            .ok_or_else(|| ConfigurationError::MissingRequiredPropertyValue {
                name: "project".to_string(),
            })
    }
}
