// File: monitor/src/config/mod.rs
pub mod manager;
pub mod secrets;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::constants::{analysis, defaults};
use crate::errors::ConfigError;

pub use manager::ConfigManager;
pub use secrets::SecretsLoader;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_check_schedule")]
    pub check_schedule: String,
    #[serde(default = "default_rpc_timeout")]
    pub rpc_timeout_seconds: u64,
    #[serde(default)]
    pub alarm_webhook_url: String,
    /// Who the alerts are addressed to; passed through in every webhook payload
    #[serde(default)]
    pub alarm_recipient: String,
    #[serde(default = "default_signature_max_retries")]
    pub signature_max_retries: u32,
    #[serde(default = "default_signature_fetch_concurrency")]
    pub signature_fetch_concurrency: usize,
    #[serde(default = "default_missed_blocks_window")]
    pub missed_blocks_window: u32,
    // Populated from individual validator config files
    #[serde(skip)]
    pub validators: HashMap<String, ValidatorConfig>,
    #[serde(skip)]
    pub webhook_token: Option<String>,
}

fn default_check_schedule() -> String {
    defaults::CHECK_SCHEDULE.to_string()
}

fn default_rpc_timeout() -> u64 {
    defaults::RPC_TIMEOUT_SECONDS
}

fn default_signature_max_retries() -> u32 {
    analysis::SIGNATURE_MAX_RETRIES
}

fn default_signature_fetch_concurrency() -> usize {
    analysis::SIGNATURE_FETCH_CONCURRENCY
}

fn default_missed_blocks_window() -> u32 {
    analysis::MISSED_BLOCKS_WINDOW
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorConfig {
    pub local_rpc_url: String,
    /// Comma-delimited, in failover priority order
    pub reference_rpc_urls: String,
    pub block_gap_alarm: i64,
    pub max_missed_blocks: u32,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl ValidatorConfig {
    pub fn endpoint_list(&self) -> EndpointList {
        EndpointList::parse(&self.reference_rpc_urls)
    }

    pub fn validate(&self, name: &str) -> Result<(), ConfigError> {
        if self.local_rpc_url.trim().is_empty() {
            return Err(ConfigError::MissingRequired {
                field: format!("{}.local_rpc_url", name),
            });
        }
        if self.endpoint_list().is_empty() {
            return Err(ConfigError::MissingRequired {
                field: format!("{}.reference_rpc_urls", name),
            });
        }
        if self.block_gap_alarm < 1 {
            return Err(ConfigError::InvalidValue {
                field: format!("{}.block_gap_alarm", name),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

impl Config {
    /// Checks global settings; per-validator checks run while loading each file.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.signature_max_retries == 0 {
            return Err(ConfigError::InvalidValue {
                field: "signature_max_retries".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.signature_fetch_concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "signature_fetch_concurrency".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.missed_blocks_window == 0 {
            return Err(ConfigError::InvalidValue {
                field: "missed_blocks_window".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.rpc_timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "rpc_timeout_seconds".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn enabled_validators(&self) -> impl Iterator<Item = (&String, &ValidatorConfig)> {
        self.validators.iter().filter(|(_, v)| v.enabled)
    }
}

/// Ordered reference RPC base URLs. Iteration order is failover priority.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointList(Vec<String>);

impl EndpointList {
    /// Parse a comma-delimited list, trimming whitespace and trailing slashes
    pub fn parse(raw: &str) -> Self {
        let endpoints = raw
            .split(',')
            .map(|s| s.trim().trim_end_matches('/'))
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        Self(endpoints)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for EndpointList {
    fn from(endpoints: Vec<String>) -> Self {
        Self(endpoints)
    }
}

impl<'a> IntoIterator for &'a EndpointList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
