//! Configuration for Firebase Admin bootstrap

use crate::admin::error::AdminError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Credential file read by [`crate::admin()`].
pub const DEFAULT_CREDENTIALS_PATH: &str = "./firebase_config.json";

/// Name under which the default app is registered.
pub const DEFAULT_APP_NAME: &str = "[DEFAULT]";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub credentials_path: PathBuf,
    pub app_name: String,
    #[serde(flatten)]
    pub options: AppOptions,
}

/// Options passed through to the initialized app.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppOptions {
    /// Overrides the `project_id` found in the credential.
    pub project_id: Option<String>,
    pub storage_bucket: Option<String>,
    pub database_url: Option<String>,
}

impl AdminConfig {
    pub fn new(credentials_path: impl Into<PathBuf>) -> Self {
        Self {
            credentials_path: credentials_path.into(),
            ..Self::default()
        }
    }

    pub fn with_app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = name.into();
        self
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.options.project_id = Some(project_id.into());
        self
    }

    pub fn with_storage_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.options.storage_bucket = Some(bucket.into());
        self
    }

    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.options.database_url = Some(url.into());
        self
    }

    /// Load configuration from a TOML file. Missing keys fall back to defaults.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, AdminError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            AdminError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, AdminError> {
        let config: Self = toml::from_str(text)
            .map_err(|e| AdminError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AdminError> {
        if self.app_name.trim().is_empty() {
            return Err(AdminError::Config("app_name cannot be empty".to_string()));
        }
        if self.credentials_path.as_os_str().is_empty() {
            return Err(AdminError::Config(
                "credentials_path cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            credentials_path: PathBuf::from(DEFAULT_CREDENTIALS_PATH),
            app_name: DEFAULT_APP_NAME.to_string(),
            options: AppOptions::default(),
        }
    }
}
