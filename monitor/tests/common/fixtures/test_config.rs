//! Test configuration builders for creating configs programmatically

use monitor::config::{Config, ValidatorConfig};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Global settings with small, test-friendly values
pub fn test_config(window: u32, max_retries: u32) -> Config {
    Config {
        check_schedule: "0 */1 * * * *".to_string(),
        rpc_timeout_seconds: 2,
        alarm_webhook_url: String::new(),
        alarm_recipient: String::new(),
        signature_max_retries: max_retries,
        signature_fetch_concurrency: 1,
        missed_blocks_window: window,
        validators: HashMap::new(),
        webhook_token: None,
    }
}

pub fn test_validator(
    local_rpc_url: &str,
    reference_rpc_urls: &[&str],
    block_gap_alarm: i64,
    max_missed_blocks: u32,
) -> ValidatorConfig {
    ValidatorConfig {
        local_rpc_url: local_rpc_url.to_string(),
        reference_rpc_urls: reference_rpc_urls.join(","),
        block_gap_alarm,
        max_missed_blocks,
        enabled: true,
    }
}

/// Builder writing a config directory into a temp dir
pub struct TestConfigBuilder {
    temp_dir: TempDir,
    main_toml: String,
    validators: Vec<(String, String)>,
    secrets_toml: Option<String>,
}

impl TestConfigBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self {
            temp_dir,
            main_toml: String::new(),
            validators: Vec::new(),
            secrets_toml: None,
        }
    }

    pub fn with_main(mut self, toml: &str) -> Self {
        self.main_toml = toml.to_string();
        self
    }

    pub fn with_validator(mut self, name: &str, toml: &str) -> Self {
        self.validators.push((name.to_string(), toml.to_string()));
        self
    }

    pub fn with_secrets(mut self, toml: &str) -> Self {
        self.secrets_toml = Some(toml.to_string());
        self
    }

    /// Write config files and return the handle keeping the temp dir alive
    pub fn build(self) -> TestConfig {
        let config_dir = self.temp_dir.path().join("config");
        fs::create_dir_all(&config_dir).expect("Failed to create config dir");

        fs::write(config_dir.join("main.toml"), &self.main_toml).expect("Failed to write main.toml");

        for (name, toml) in &self.validators {
            fs::write(config_dir.join(format!("{}.toml", name)), toml)
                .expect("Failed to write validator config");
        }

        if let Some(secrets) = &self.secrets_toml {
            fs::write(config_dir.join("secrets.toml"), secrets).expect("Failed to write secrets.toml");
        }

        TestConfig {
            _temp_dir: self.temp_dir,
            config_dir,
        }
    }
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub struct TestConfig {
    _temp_dir: TempDir,
    pub config_dir: PathBuf,
}

impl TestConfig {
    pub fn dir(&self) -> String {
        self.config_dir.display().to_string()
    }
}
