//! Cron-based scheduling of validator health checks
//!
//! Each monitored validator gets its own job. A job whose previous cycle is
//! still running skips the tick instead of queueing behind it.
//!
//! # Configuration
//!
//! The schedule is a 6-field cron expression (sec min hour day month dow) in
//! `config/main.toml`:
//!
//! ```toml
//! check_schedule = "0 */5 * * * *"  # Every five minutes
//! ```

pub mod operations;
pub use operations::{run_exclusive, MonitorScheduler};

use anyhow::{anyhow, Result};
use tracing::debug;

/// Validate a 6-field cron expression as accepted by tokio-cron-scheduler
pub fn validate_6_field_cron(schedule: &str) -> Result<()> {
    let parts: Vec<&str> = schedule.split_whitespace().collect();

    if parts.len() != 6 {
        return Err(anyhow!(
            "tokio-cron-scheduler requires exactly 6 fields: second minute hour day month dayofweek. Got {} fields: '{}'",
            parts.len(),
            schedule
        ));
    }

    validate_cron_field(parts[0], "second", 0, 59)?;
    validate_cron_field(parts[1], "minute", 0, 59)?;
    validate_cron_field(parts[2], "hour", 0, 23)?;
    validate_cron_field(parts[3], "day", 1, 31)?;
    validate_cron_field(parts[4], "month", 1, 12)?;
    validate_cron_field(parts[5], "dayofweek", 0, 7)?;

    debug!("Validated 6-field cron: '{}'", schedule);
    Ok(())
}

fn validate_cron_field(field: &str, name: &str, min: u32, max: u32) -> Result<()> {
    if field == "*" || field == "?" {
        return Ok(());
    }

    if let Some(step_str) = field.strip_prefix("*/") {
        let step = step_str
            .parse::<u32>()
            .map_err(|_| anyhow!("Invalid {} step value: {}", name, step_str))?;
        if step == 0 {
            return Err(anyhow!("{} step value cannot be 0", name));
        }
        return Ok(());
    }

    if let Some((start, end)) = field.split_once('-') {
        let start = parse_in_range(start, name, min, max)?;
        let end = parse_in_range(end, name, min, max)?;
        if start > end {
            return Err(anyhow!("{} range {}-{} is reversed", name, start, end));
        }
        return Ok(());
    }

    for part in field.split(',') {
        parse_in_range(part, name, min, max)?;
    }

    Ok(())
}

fn parse_in_range(value: &str, name: &str, min: u32, max: u32) -> Result<u32> {
    let parsed = value
        .parse::<u32>()
        .map_err(|_| anyhow!("Invalid {} value: {}", name, value))?;
    if parsed < min || parsed > max {
        return Err(anyhow!(
            "{} value {} is outside valid range {}-{}",
            name,
            parsed,
            min,
            max
        ));
    }
    Ok(parsed)
}
