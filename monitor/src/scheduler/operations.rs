// File: monitor/src/scheduler/operations.rs
use anyhow::{anyhow, Result};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{info, instrument, warn};

use super::validate_6_field_cron;
use crate::errors::MonitorError;
use crate::health::{CycleOutcome, HealthChecker};
use crate::services::Notifier;

/// Run one cycle unless the previous one still holds the checker.
///
/// Returns `None` when the tick was skipped.
pub async fn run_exclusive<N: Notifier>(checker: &Mutex<HealthChecker<N>>) -> Option<CycleOutcome> {
    let Ok(mut guard) = checker.try_lock() else {
        warn!("Previous check cycle still running, skipping this tick");
        return None;
    };

    let outcome = guard.run_cycle().await;
    if let CycleOutcome::Aborted(reason) = &outcome {
        warn!("Check cycle for {} aborted: {:?}", guard.name(), reason);
    }
    Some(outcome)
}

pub struct MonitorScheduler {
    schedule: String,
    scheduler: JobScheduler,
}

impl MonitorScheduler {
    pub async fn new(schedule: &str) -> Result<Self> {
        validate_6_field_cron(schedule)
            .map_err(|e| anyhow!("Invalid 6-field cron schedule '{}': {}", schedule, e))?;

        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| MonitorError::Scheduler(format!("Failed to create JobScheduler: {}", e)))?;

        Ok(Self {
            schedule: schedule.to_string(),
            scheduler,
        })
    }

    /// Register a check job for one validator
    pub async fn add_checker<N: Notifier + 'static>(&self, checker: HealthChecker<N>) -> Result<()> {
        let name = checker.name().to_string();
        let checker = Arc::new(Mutex::new(checker));

        let job = Job::new_async(self.schedule.as_str(), move |_uuid, _scheduler| {
            let checker = checker.clone();

            Box::pin(async move {
                run_exclusive(&checker).await;
            })
        })
        .map_err(|e| {
            MonitorError::Scheduler(format!(
                "Failed to create check job for '{}': {}",
                self.schedule, e
            ))
        })?;

        let job_id = self
            .scheduler
            .add(job)
            .await
            .map_err(|e| MonitorError::Scheduler(format!("Failed to add check job: {}", e)))?;

        info!("✓ Scheduled checks for {}: {} (job {})", name, self.schedule, job_id);
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn start(&self) -> Result<()> {
        self.scheduler
            .start()
            .await
            .map_err(|e| MonitorError::Scheduler(format!("Failed to start scheduler: {}", e)))?;
        info!("✓ Monitor scheduler started with schedule '{}'", self.schedule);
        Ok(())
    }

    pub async fn shutdown(&mut self) -> Result<()> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| MonitorError::Scheduler(format!("Failed to stop scheduler: {}", e)))?;
        info!("Monitor scheduler stopped");
        Ok(())
    }
}
