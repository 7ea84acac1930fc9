//! Health monitoring module
//!
//! This module compares a validator node against reference nodes and its own
//! signing record.

pub mod checker;
pub mod failover;
pub mod missed_blocks;
pub mod types;

pub use checker::HealthChecker;
pub use failover::ReferenceResolver;
pub use missed_blocks::MissedBlockAnalyzer;
pub use types::{CycleOutcome, MissReport, MonitorState, NodeStatus};
