// File: monitor/src/main.rs
use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use monitor::constants::defaults;
use monitor::{AlertService, ConfigManager, HealthChecker, MonitorScheduler, RpcClient};

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::from_default_env()
        .add_directive("monitor=info".parse()?)
        .add_directive("tokio_cron_scheduler=warn".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?);

    fmt().with_env_filter(env_filter).init();

    info!("Starting Validator Monitor");

    let config_dir = std::env::var(defaults::CONFIG_DIR_ENV)
        .unwrap_or_else(|_| defaults::CONFIG_DIR.to_string());
    let config_manager = ConfigManager::new(config_dir).await?;
    let config = config_manager.get_current_config();

    let alert_service = AlertService::new(
        config.alarm_webhook_url.clone(),
        config.webhook_token.clone(),
    )?
    .with_recipient(&config.alarm_recipient);

    if alert_service.is_enabled() {
        info!(
            "Alert service enabled with webhook: {}",
            alert_service.get_webhook_url()
        );

        match alert_service.test_webhook().await {
            Ok(()) => info!("Alert webhook test successful!"),
            Err(e) => {
                error!("Alert webhook test failed: {}", e);
                warn!("Alerts may not work properly. Check your webhook URL and network connectivity.");
            }
        }
    } else {
        warn!("⚠️  ALERT WEBHOOK DISABLED ⚠️");
        warn!("Set 'alarm_webhook_url' in config/main.toml to deliver alerts; they will only be logged");
    }

    let client = RpcClient::new(config.rpc_timeout_seconds)?;
    let mut scheduler = MonitorScheduler::new(&config.check_schedule).await?;

    for (name, validator) in config.enabled_validators() {
        let checker = HealthChecker::new(
            name,
            validator,
            &config,
            client.clone(),
            Arc::new(alert_service.for_validator(name)),
        );
        info!(
            "Monitoring {} via {} against {} reference endpoints",
            name,
            validator.local_rpc_url,
            validator.endpoint_list().len()
        );
        scheduler.add_checker(checker).await?;
    }

    scheduler.start().await?;

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");
    scheduler.shutdown().await?;

    Ok(())
}
