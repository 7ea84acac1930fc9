// File: monitor/src/config/manager.rs
use super::{Config, SecretsLoader, ValidatorConfig};
use crate::errors::ConfigError;
use anyhow::{anyhow, Result};
use glob::glob;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info};

const MAIN_CONFIG_FILE: &str = "main.toml";
const SECRETS_FILE: &str = "secrets.toml";

pub struct ConfigManager {
    current_config: Arc<Config>,
}

impl ConfigManager {
    pub async fn new(config_dir: String) -> Result<Self> {
        let config = Self::load_configuration(&config_dir).await?;
        Ok(Self {
            current_config: Arc::new(config),
        })
    }

    pub fn get_current_config(&self) -> Arc<Config> {
        self.current_config.clone()
    }

    async fn load_configuration(config_dir: &str) -> Result<Config> {
        let main_config_path = format!("{}/{}", config_dir, MAIN_CONFIG_FILE);
        let main_config_content =
            fs::read_to_string(&main_config_path)
                .await
                .map_err(|e| ConfigError::LoadFailed {
                    path: main_config_path.clone(),
                    reason: e.to_string(),
                })?;

        let mut config: Config =
            toml::from_str(&main_config_content).map_err(|e| ConfigError::ParseError {
                reason: format!("{}: {}", main_config_path, e),
            })?;
        config.validate()?;

        // Every other *.toml file describes one monitored validator
        let pattern = format!("{}/*.toml", config_dir);
        let mut validators = HashMap::new();

        for entry in glob(&pattern).map_err(|e| anyhow!("Glob pattern error: {}", e))? {
            let path = entry.map_err(|e| anyhow!("Glob entry error: {}", e))?;
            let filename = path
                .file_name()
                .and_then(|name| name.to_str())
                .ok_or_else(|| anyhow!("Invalid filename"))?;

            if filename == MAIN_CONFIG_FILE || filename == SECRETS_FILE {
                continue;
            }

            let validator_name = filename
                .strip_suffix(".toml")
                .ok_or_else(|| anyhow!("Invalid config filename: {}", filename))?;

            debug!("Loading validator config: {}", path.display());

            let content = fs::read_to_string(&path)
                .await
                .map_err(|e| ConfigError::LoadFailed {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })?;

            let validator: ValidatorConfig =
                toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                    reason: format!("{}: {}", path.display(), e),
                })?;
            validator.validate(validator_name)?;

            validators.insert(validator_name.to_string(), validator);
        }

        if !validators.values().any(|v| v.enabled) {
            return Err(ConfigError::MissingRequired {
                field: format!("at least one enabled validator file in {}", config_dir),
            }
            .into());
        }

        config.validators = validators;

        let secrets = SecretsLoader::load(&Path::new(config_dir).join(SECRETS_FILE))?;
        config.webhook_token = secrets.webhook_token().map(String::from);

        info!(
            "Loaded {} validators ({} enabled), schedule '{}', window {} blocks",
            config.validators.len(),
            config.enabled_validators().count(),
            config.check_schedule,
            config.missed_blocks_window
        );

        Ok(config)
    }
}
