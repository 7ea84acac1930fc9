//! Periodic validator health check cycle

use std::sync::Arc;
use tracing::{info, warn};

use super::failover::ReferenceResolver;
use super::missed_blocks::MissedBlockAnalyzer;
use super::types::{
    AbortReason, AlertKind, CycleOutcome, CycleReport, MissReport, MonitorState,
};
use crate::config::{Config, ValidatorConfig};
use crate::constants::alerts;
use crate::rpc::RpcClient;
use crate::services::Notifier;

/// Monitors one validator. Owns the state carried between cycles, so every
/// validator gets its own instance and `run_cycle` takes `&mut self`.
pub struct HealthChecker<N: Notifier> {
    name: String,
    local_rpc_url: String,
    block_gap_alarm: i64,
    max_missed_blocks: u32,
    client: RpcClient,
    resolver: ReferenceResolver,
    analyzer: MissedBlockAnalyzer,
    notifier: Arc<N>,
    state: MonitorState,
}

impl<N: Notifier> HealthChecker<N> {
    pub fn new(
        name: &str,
        validator: &ValidatorConfig,
        config: &Config,
        client: RpcClient,
        notifier: Arc<N>,
    ) -> Self {
        let resolver = ReferenceResolver::new(
            client.clone(),
            validator.endpoint_list(),
            config.signature_max_retries,
        );
        let analyzer = MissedBlockAnalyzer::new(
            config.missed_blocks_window,
            config.signature_fetch_concurrency,
        );

        Self {
            name: name.to_string(),
            local_rpc_url: validator.local_rpc_url.trim_end_matches('/').to_string(),
            block_gap_alarm: validator.block_gap_alarm,
            max_missed_blocks: validator.max_missed_blocks,
            client,
            resolver,
            analyzer,
            notifier,
            state: MonitorState::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> &MonitorState {
        &self.state
    }

    /// Run one full check. Aborts without alerting or touching state when either
    /// status fetch fails. Gap and voting power alerts are sent before the
    /// missed-block scan starts.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        info!("🔍 Checking validator {}", self.name);

        let Some(local) = self.client.fetch_status(&self.local_rpc_url).await else {
            warn!(
                "Local node {} unavailable, skipping cycle for {}",
                self.local_rpc_url, self.name
            );
            return CycleOutcome::Aborted(AbortReason::LocalStatusUnavailable);
        };

        let Some(reference) = self.resolver.fetch_status_with_failover().await else {
            warn!("No reference endpoint available, skipping cycle for {}", self.name);
            return CycleOutcome::Aborted(AbortReason::ReferenceStatusUnavailable);
        };

        let gap = reference.block_height.saturating_sub(local.block_height);
        info!(
            "🟢 {} block height: {}, reference: {} (gap {})",
            self.name, local.block_height, reference.block_height, gap
        );
        if local.catching_up {
            warn!("{} reports it is still catching up", self.name);
        }
        if self.state.previous_block_height != 0 {
            info!(
                "{} advanced {} blocks since last cycle",
                self.name,
                local.block_height.saturating_sub(self.state.previous_block_height)
            );
        }

        let mut raised = Vec::new();

        if gap >= self.block_gap_alarm {
            raised.push(AlertKind::NodeBehind { gap });
        }

        if self.state.previous_voting_power != 0
            && local.voting_power != self.state.previous_voting_power
        {
            raised.push(AlertKind::VotingPowerChanged {
                previous: self.state.previous_voting_power,
                current: local.voting_power,
            });
        }

        self.state.previous_voting_power = local.voting_power;
        self.state.previous_block_height = local.block_height;

        // Gap and voting power alerts go out before the block scan
        for alert in &raised {
            self.dispatch(&local.validator_address, alert).await;
        }

        let miss_report = self
            .analyzer
            .analyze(&self.resolver, &local.validator_address, local.block_height)
            .await;

        if miss_report.total_missed > self.max_missed_blocks {
            let alert = AlertKind::MissingBlocks(miss_report);
            self.dispatch(&local.validator_address, &alert).await;
            raised.push(alert);
        }

        info!(
            "✅ {} checked: missed {}/{} blocks (longest run {}), {} alerts raised",
            self.name,
            miss_report.total_missed,
            miss_report.window,
            miss_report.max_consecutive_missed,
            raised.len()
        );

        CycleOutcome::Completed(CycleReport {
            local,
            reference_height: reference.block_height,
            gap,
            miss_report,
            alerts: raised,
        })
    }

    async fn dispatch(&self, validator_address: &str, alert: &AlertKind) {
        let (subject, body) = render_alert(&self.name, validator_address, alert);
        if let Err(e) = self.notifier.send(subject, &body).await {
            warn!("Alert '{}' for {} not delivered: {}", subject, self.name, e);
        }
    }
}

/// Subject and plain-text body for an alert
pub fn render_alert(
    name: &str,
    validator_address: &str,
    alert: &AlertKind,
) -> (&'static str, String) {
    match alert {
        AlertKind::NodeBehind { gap } => (
            alerts::NODE_BEHIND_SUBJECT,
            format!("Node {} is {} blocks behind the reference network.", name, gap),
        ),
        AlertKind::VotingPowerChanged { previous, current } => (
            alerts::VOTING_POWER_SUBJECT,
            format!(
                "Voting power of {} changed from {} → {}",
                name, previous, current
            ),
        ),
        AlertKind::MissingBlocks(report) => (
            alerts::MISSED_BLOCKS_SUBJECT,
            render_missed_blocks(validator_address, report),
        ),
    }
}

fn render_missed_blocks(validator_address: &str, report: &MissReport) -> String {
    let mut body = format!(
        "Validator {} missed {} / {} recent blocks. Longest consecutive miss run: {}",
        validator_address, report.total_missed, report.window, report.max_consecutive_missed
    );
    if report.unresolved > 0 {
        body.push_str(&format!(
            " ({} blocks could not be fetched from any reference endpoint and are counted as missed)",
            report.unresolved
        ));
    }
    body
}
