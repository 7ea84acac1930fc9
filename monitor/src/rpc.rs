//! RPC data fetching for Tendermint-style node endpoints
//!
//! Every failure is logged and collapsed into `None` here so callers can fall
//! through to the next endpoint without handling transport details.

use anyhow::{anyhow, Result};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::constants::http::CONNECT_TIMEOUT;
use crate::errors::FetchError;
use crate::health::types::{BlockResult, BlockSignatureSet, NodeStatus, StatusResult};

/// HTTP client for node RPC endpoints
#[derive(Clone)]
pub struct RpcClient {
    client: Client,
}

impl RpcClient {
    pub fn new(rpc_timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(rpc_timeout_seconds))
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))?;
        Ok(Self { client })
    }

    /// GET `url` and return its JSON-RPC `result` payload, or `None` on any failure
    pub async fn fetch(&self, url: &str) -> Option<Value> {
        match self.try_fetch(url).await {
            Ok(result) => Some(result),
            Err(e) => {
                warn!("❌ {}", e);
                None
            }
        }
    }

    async fn try_fetch(&self, url: &str) -> Result<Value, FetchError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::Transport {
                    url: url.to_string(),
                    reason: e.to_string(),
                }
            }
        })?;

        if !response.status().is_success() {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let mut json: Value = response
            .json()
            .await
            .map_err(|e| FetchError::InvalidResponse {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        match json.get_mut("result").map(Value::take) {
            Some(result) if !result.is_null() => Ok(result),
            _ => Err(FetchError::MissingField {
                url: url.to_string(),
                field: "result".to_string(),
            }),
        }
    }

    /// Fetch and parse `{base}/status`
    pub async fn fetch_status(&self, base_url: &str) -> Option<NodeStatus> {
        let url = format!("{}/status", base_url);
        let result = self.fetch(&url).await?;
        match parse_status(result) {
            Ok(status) => Some(status),
            Err(e) => {
                warn!("❌ Unusable status from {}: {}", url, e);
                None
            }
        }
    }

    /// Fetch and parse the commit signers of `{base}/block?height={height}`
    pub async fn fetch_signatures(&self, base_url: &str, height: i64) -> Option<BlockSignatureSet> {
        let url = format!("{}/block?height={}", base_url, height);
        let result = self.fetch(&url).await?;
        match parse_signatures(result) {
            Ok(signers) => {
                debug!("Block {} from {}: {} signers", height, base_url, signers.len());
                Some(signers)
            }
            Err(e) => {
                warn!("❌ Unusable block {} from {}: {}", height, base_url, e);
                None
            }
        }
    }
}

/// Parse a `/status` result, rejecting absent or non-numeric fields
pub fn parse_status(result: Value) -> Result<NodeStatus> {
    let status: StatusResult = serde_json::from_value(result)
        .map_err(|e| anyhow!("Unexpected status shape: {}", e))?;

    let block_height = status
        .sync_info
        .latest_block_height
        .parse::<i64>()
        .map_err(|e| {
            anyhow!(
                "Invalid block height '{}': {}",
                status.sync_info.latest_block_height,
                e
            )
        })?;

    let voting_power = status
        .validator_info
        .voting_power
        .parse::<i64>()
        .map_err(|e| {
            anyhow!(
                "Invalid voting power '{}': {}",
                status.validator_info.voting_power,
                e
            )
        })?;

    if block_height < 0 {
        return Err(anyhow!("Negative block height {}", block_height));
    }
    if voting_power < 0 {
        return Err(anyhow!("Negative voting power {}", voting_power));
    }

    if status.validator_info.address.is_empty() {
        return Err(anyhow!("Validator address is empty"));
    }

    Ok(NodeStatus {
        block_height,
        validator_address: status.validator_info.address,
        voting_power,
        catching_up: status.sync_info.catching_up,
    })
}

/// Parse a `/block` result into the set of addresses that signed its last commit
pub fn parse_signatures(result: Value) -> Result<BlockSignatureSet> {
    let block: BlockResult = serde_json::from_value(result)
        .map_err(|e| anyhow!("Unexpected block shape: {}", e))?;

    Ok(block
        .block
        .last_commit
        .signatures
        .into_iter()
        .filter_map(|sig| sig.validator_address)
        .filter(|address| !address.is_empty())
        .collect())
}
