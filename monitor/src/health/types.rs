//! Health monitoring types and RPC response structures

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Snapshot of a node's `/status`, derived fresh every cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeStatus {
    pub block_height: i64,
    pub validator_address: String,
    pub voting_power: i64,
    pub catching_up: bool,
}

/// Per-validator state carried between cycles. Zero means "not observed yet".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonitorState {
    pub previous_voting_power: i64,
    pub previous_block_height: i64,
}

/// Validator addresses that signed one block
pub type BlockSignatureSet = HashSet<String>;

/// Outcome of inspecting the signing window preceding a height
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MissReport {
    /// Number of blocks actually inspected
    pub window: u32,
    pub total_missed: u32,
    pub max_consecutive_missed: u32,
    /// Blocks whose signers could not be fetched from any endpoint; included in `total_missed`
    pub unresolved: u32,
}

/// Alerts a cycle can raise
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertKind {
    NodeBehind { gap: i64 },
    VotingPowerChanged { previous: i64, current: i64 },
    MissingBlocks(MissReport),
}

/// Why a cycle stopped before comparing anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    LocalStatusUnavailable,
    ReferenceStatusUnavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub local: NodeStatus,
    pub reference_height: i64,
    pub gap: i64,
    pub miss_report: MissReport,
    pub alerts: Vec<AlertKind>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    Aborted(AbortReason),
    Completed(CycleReport),
}

/// `result` of a Tendermint/CometBFT `/status` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResult {
    pub sync_info: SyncInfo,
    pub validator_info: ValidatorInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncInfo {
    pub latest_block_height: String,
    #[serde(default)]
    pub catching_up: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorInfo {
    pub address: String,
    pub voting_power: String,
}

/// `result` of a `/block?height=` response, reduced to the commit signatures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockResult {
    pub block: Block,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub last_commit: LastCommit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LastCommit {
    #[serde(default)]
    pub signatures: Vec<CommitSig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitSig {
    // Absent votes carry an empty or null address
    #[serde(default)]
    pub validator_address: Option<String>,
}
