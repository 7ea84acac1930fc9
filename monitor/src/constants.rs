//! Central repository for timeouts, window sizes and configuration defaults

use std::time::Duration;

/// HTTP client timeout constants
pub mod http {
    use super::Duration;

    /// Timeout for establishing HTTP connections to RPC endpoints
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Webhook request timeout
    pub const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(10);
}

/// Missed-block analysis constants
pub mod analysis {
    /// Number of blocks preceding the current height that are inspected each cycle
    pub const MISSED_BLOCKS_WINDOW: u32 = 100;

    /// Full passes over the reference list before a block's signers are given up on
    pub const SIGNATURE_MAX_RETRIES: u32 = 3;

    /// Concurrent per-block signature lookups (1 = strictly sequential)
    pub const SIGNATURE_FETCH_CONCURRENCY: usize = 1;
}

/// Default configuration values
pub mod defaults {
    /// Default health check schedule (6-field cron: every minute)
    pub const CHECK_SCHEDULE: &str = "0 */1 * * * *";

    /// Default RPC timeout in seconds
    pub const RPC_TIMEOUT_SECONDS: u64 = 10;

    /// Default configuration directory
    pub const CONFIG_DIR: &str = "config";

    /// Environment variable overriding the configuration directory
    pub const CONFIG_DIR_ENV: &str = "MONITOR_CONFIG_DIR";
}

/// Alert subjects
pub mod alerts {
    pub const NODE_BEHIND_SUBJECT: &str = "⚠️ Validator node is falling behind";
    pub const VOTING_POWER_SUBJECT: &str = "⚠️ Validator voting power changed";
    pub const MISSED_BLOCKS_SUBJECT: &str = "⚠️ Validator is missing blocks";
}
