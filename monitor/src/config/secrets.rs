// File: monitor/src/config/secrets.rs
//! Secrets loader for alert delivery credentials.
//!
//! Secrets live in a separate TOML file (config/secrets.toml) that should be
//! excluded from version control. Only the notifier consumes them.
//!
//! Example secrets.toml:
//! ```toml
//! [alerts]
//! webhook_token = "secret-token"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

/// Structure matching the secrets.toml file format
#[derive(Debug, Deserialize, Default)]
pub struct SecretsFile {
    #[serde(default)]
    pub alerts: AlertSecrets,
}

#[derive(Debug, Deserialize, Default)]
pub struct AlertSecrets {
    pub webhook_token: Option<String>,
}

/// Loader for secrets from the secrets.toml file
pub struct SecretsLoader {
    secrets: SecretsFile,
}

impl SecretsLoader {
    /// Load secrets from the specified file path.
    /// Returns an empty loader if the file doesn't exist.
    pub fn load(secrets_path: &Path) -> Result<Self> {
        if !secrets_path.exists() {
            warn!(
                "Secrets file not found at {:?}, alerts will be sent without authentication",
                secrets_path
            );
            return Ok(Self {
                secrets: SecretsFile::default(),
            });
        }

        let content = std::fs::read_to_string(secrets_path)
            .with_context(|| format!("Failed to read secrets file: {:?}", secrets_path))?;

        let secrets: SecretsFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse secrets file: {:?}", secrets_path))?;

        info!("Loaded alert secrets from {:?}", secrets_path);

        Ok(Self { secrets })
    }

    /// Bearer token for the alert webhook, if configured and non-empty
    pub fn webhook_token(&self) -> Option<&str> {
        self.secrets
            .alerts
            .webhook_token
            .as_deref()
            .filter(|t| !t.is_empty())
    }
}
