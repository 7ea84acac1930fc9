//! Failover across reference RPC endpoints

use tracing::{debug, info, warn};

use super::types::{BlockSignatureSet, NodeStatus};
use crate::config::EndpointList;
use crate::rpc::RpcClient;

/// Resolves chain data from an ordered list of reference endpoints
#[derive(Clone)]
pub struct ReferenceResolver {
    client: RpcClient,
    endpoints: EndpointList,
    max_retries: u32,
}

impl ReferenceResolver {
    pub fn new(client: RpcClient, endpoints: EndpointList, max_retries: u32) -> Self {
        Self {
            client,
            endpoints,
            max_retries,
        }
    }

    /// First endpoint whose `/status` fetches and parses wins; later ones are not queried
    pub async fn fetch_status_with_failover(&self) -> Option<NodeStatus> {
        for endpoint in &self.endpoints {
            debug!("Trying reference status from {}", endpoint);

            if let Some(status) = self.client.fetch_status(endpoint).await {
                debug!("✓ Reference status from {}", endpoint);
                return Some(status);
            }

            warn!("Reference {} unavailable, falling back to next endpoint", endpoint);
        }

        warn!(
            "All {} reference endpoints failed to return status",
            self.endpoints.len()
        );
        None
    }

    /// Signers of `height`, or `None` once every endpoint failed in every pass
    pub async fn try_fetch_signatures(&self, height: i64) -> Option<BlockSignatureSet> {
        for attempt in 1..=self.max_retries {
            for endpoint in &self.endpoints {
                if let Some(signers) = self.client.fetch_signatures(endpoint, height).await {
                    if attempt > 1 {
                        info!(
                            "Signatures for block {} resolved from {} on pass {}/{}",
                            height, endpoint, attempt, self.max_retries
                        );
                    }
                    return Some(signers);
                }
            }

            debug!(
                "Pass {}/{} for block {} failed on all endpoints",
                attempt, self.max_retries, height
            );
        }

        warn!(
            "Could not fetch signatures for block {} after {} passes over {} endpoints",
            height,
            self.max_retries,
            self.endpoints.len()
        );
        None
    }

    /// Signers of `height`; an exhausted lookup yields an empty set
    pub async fn fetch_signatures_with_retry(&self, height: i64) -> BlockSignatureSet {
        self.try_fetch_signatures(height).await.unwrap_or_default()
    }
}
