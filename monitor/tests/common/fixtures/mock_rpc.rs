//! Mock RPC server for testing validator node interactions
//!
//! This simulates Tendermint-style `/status` and `/block` responses without
//! requiring a real node.

use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

/// Mock RPC server that simulates node responses
pub struct MockRpcServer {
    pub server: MockServer,
    pub base_url: String,
}

fn status_body(height: i64, address: &str, voting_power: i64) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": -1,
        "result": {
            "node_info": {
                "network": "test-chain",
                "moniker": "test-node"
            },
            "sync_info": {
                "latest_block_height": height.to_string(),
                "catching_up": false
            },
            "validator_info": {
                "address": address,
                "voting_power": voting_power.to_string()
            }
        }
    })
}

fn block_body(height: i64, signers: &[&str]) -> Value {
    let signatures: Vec<Value> = signers
        .iter()
        .map(|address| json!({ "block_id_flag": 2, "validator_address": address }))
        .collect();

    json!({
        "jsonrpc": "2.0",
        "id": -1,
        "result": {
            "block": {
                "header": { "height": height.to_string() },
                "last_commit": {
                    "height": (height - 1).to_string(),
                    "signatures": signatures
                }
            }
        }
    })
}

impl MockRpcServer {
    /// Create a new mock RPC server
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let base_url = server.uri();
        Self { server, base_url }
    }

    /// Mock a healthy `/status`
    pub async fn mock_status(&self, height: i64, address: &str, voting_power: i64) {
        Mock::given(method("GET"))
            .and(path("/status"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(status_body(height, address, voting_power)),
            )
            .mount(&self.server)
            .await;
    }

    /// Mock a healthy `/status` that answers only after `delay`
    pub async fn mock_status_delayed(
        &self,
        height: i64,
        address: &str,
        voting_power: i64,
        delay: std::time::Duration,
    ) {
        Mock::given(method("GET"))
            .and(path("/status"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(status_body(height, address, voting_power))
                    .set_delay(delay),
            )
            .mount(&self.server)
            .await;
    }

    /// Mock `/status` answering with an HTTP error
    pub async fn mock_status_failure(&self, status_code: u16) {
        Mock::given(method("GET"))
            .and(path("/status"))
            .respond_with(ResponseTemplate::new(status_code))
            .mount(&self.server)
            .await;
    }

    /// Mock `/status` returning well-formed JSON with a non-numeric height
    pub async fn mock_status_malformed(&self) {
        Mock::given(method("GET"))
            .and(path("/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": -1,
                "result": {
                    "sync_info": { "latest_block_height": "not-a-number" },
                    "validator_info": { "address": "X", "voting_power": "1" }
                }
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock the signer set of a single block
    pub async fn mock_block(&self, height: i64, signers: &[&str]) {
        Mock::given(method("GET"))
            .and(path("/block"))
            .and(query_param("height", height.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(block_body(height, signers)))
            .mount(&self.server)
            .await;
    }

    /// Mock every block as signed by `signers`, whatever the requested height
    pub async fn mock_all_blocks(&self, signers: &[&str]) {
        Mock::given(method("GET"))
            .and(path("/block"))
            .respond_with(ResponseTemplate::new(200).set_body_json(block_body(0, signers)))
            .mount(&self.server)
            .await;
    }

    /// Mock heights `[current - window, current)`, with `address` absent from `missed`
    pub async fn mock_window(&self, address: &str, current_height: i64, window: i64, missed: &[i64]) {
        for height in (current_height - window)..current_height {
            if missed.contains(&height) {
                self.mock_block(height, &["OTHER-VALIDATOR"]).await;
            } else {
                self.mock_block(height, &[address, "OTHER-VALIDATOR"]).await;
            }
        }
    }

    /// Mock `/block` failing for any height
    pub async fn mock_block_failure(&self, status_code: u16) {
        Mock::given(method("GET"))
            .and(path("/block"))
            .respond_with(ResponseTemplate::new(status_code))
            .mount(&self.server)
            .await;
    }

    /// Mock `/block` failing for the next `times` requests, taking precedence over other mocks
    pub async fn mock_block_failure_times(&self, status_code: u16, times: u64) {
        Mock::given(method("GET"))
            .and(path("/block"))
            .respond_with(ResponseTemplate::new(status_code))
            .up_to_n_times(times)
            .with_priority(1)
            .mount(&self.server)
            .await;
    }

    /// Number of requests received for `request_path`
    pub async fn request_count(&self, request_path: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|req| req.url.path() == request_path)
            .count()
    }
}
