//! This module provides reusable test utilities:
//! - Mock HTTP servers (RPC, webhook)
//! - Test configuration builders
//! - Notifiers that record or reject alerts

// Allow unused code in test fixtures - not every test binary uses every helper
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod mock_rpc;
pub mod mock_webhook;
pub mod test_config;

// Re-export commonly used items
pub use mock_rpc::MockRpcServer;
pub use mock_webhook::MockWebhookServer;
pub use recording_notifier::{FailingNotifier, RecordingNotifier};
pub use test_config::{test_config, test_validator, TestConfigBuilder};
