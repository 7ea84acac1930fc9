//! Sliding-window missed block detection

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use super::failover::ReferenceResolver;
use super::types::{BlockSignatureSet, MissReport};

pub struct MissedBlockAnalyzer {
    window: u32,
    concurrency: usize,
}

impl MissedBlockAnalyzer {
    pub fn new(window: u32, concurrency: usize) -> Self {
        Self {
            window,
            concurrency: concurrency.max(1),
        }
    }

    /// Inspect the `window` blocks strictly below `current_height`.
    ///
    /// Lookups may overlap when concurrency > 1, but results are collected in
    /// ascending height order before runs are counted.
    pub async fn analyze(
        &self,
        resolver: &ReferenceResolver,
        validator_address: &str,
        current_height: i64,
    ) -> MissReport {
        let start = current_height.saturating_sub(i64::from(self.window)).max(1);
        if start >= current_height {
            debug!("No blocks below height {} to analyze", current_height);
            return MissReport::default();
        }

        info!(
            "🔍 Checking blocks {}..{} for validator {}",
            start, current_height, validator_address
        );

        let lookups: Vec<Option<BlockSignatureSet>> = stream::iter(start..current_height)
            .map(|height| resolver.try_fetch_signatures(height))
            .buffered(self.concurrency)
            .collect()
            .await;

        let report = tally_misses(validator_address, &lookups);

        if report.unresolved > 0 {
            warn!(
                "{} of {} blocks had no signature data from any endpoint and were counted as missed",
                report.unresolved, report.window
            );
        }

        report
    }
}

/// Count misses over lookups ordered by ascending height. `None` counts as a miss.
pub fn tally_misses(validator_address: &str, lookups: &[Option<BlockSignatureSet>]) -> MissReport {
    let mut report = MissReport {
        window: lookups.len() as u32,
        ..MissReport::default()
    };
    let mut current_run = 0;

    for lookup in lookups {
        let signed = match lookup {
            Some(signers) => signers.contains(validator_address),
            None => {
                report.unresolved += 1;
                false
            }
        };

        if signed {
            current_run = 0;
        } else {
            report.total_missed += 1;
            current_run += 1;
            report.max_consecutive_missed = report.max_consecutive_missed.max(current_run);
        }
    }

    report
}
