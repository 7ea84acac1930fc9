// File: monitor/src/services/alert_service.rs
use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use std::future::Future;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::constants::http::WEBHOOK_TIMEOUT;

/// Delivers one alert through an external channel.
///
/// Delivery is best-effort: implementations log their own failures, and callers
/// treat the returned error as informational only.
pub trait Notifier: Send + Sync {
    fn send(&self, subject: &str, body: &str) -> impl Future<Output = Result<()>> + Send;
}

#[derive(Debug, Clone, Serialize)]
pub struct AlertPayload {
    pub timestamp: DateTime<Utc>,
    pub validator: String,
    pub subject: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
}

/// Webhook-backed notifier. An empty URL disables delivery and alerts are only logged.
#[derive(Clone)]
pub struct AlertService {
    webhook_url: String,
    auth_token: Option<String>,
    validator: String,
    recipient: Option<String>,
    client: Client,
}

impl AlertService {
    pub fn new(webhook_url: String, auth_token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(WEBHOOK_TIMEOUT)
            .build()
            .map_err(|e| anyhow!("Failed to create HTTP client for AlertService: {}", e))?;

        Ok(Self {
            webhook_url,
            auth_token,
            validator: String::new(),
            recipient: None,
            client,
        })
    }

    /// Address every payload to `recipient`. An empty value leaves it unset.
    pub fn with_recipient(mut self, recipient: &str) -> Self {
        self.recipient = Some(recipient.trim())
            .filter(|r| !r.is_empty())
            .map(String::from);
        self
    }

    /// Copy of this service that tags every payload with `validator`
    pub fn for_validator(&self, validator: &str) -> Self {
        Self {
            validator: validator.to_string(),
            ..self.clone()
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.webhook_url.is_empty()
    }

    pub fn get_webhook_url(&self) -> &str {
        &self.webhook_url
    }

    /// Post a test payload and report whether the webhook accepted it
    pub async fn test_webhook(&self) -> Result<()> {
        if !self.is_enabled() {
            return Err(anyhow!("No webhook URL configured"));
        }

        let payload = AlertPayload {
            timestamp: Utc::now(),
            validator: "monitor".to_string(),
            subject: "Validator monitor started".to_string(),
            message: "Webhook connectivity test".to_string(),
            recipient: self.recipient.clone(),
        };

        let response = timeout(WEBHOOK_TIMEOUT, self.request(&payload).send())
            .await
            .map_err(|_| anyhow!("Webhook test timed out"))?
            .map_err(|e| anyhow!("Webhook test request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(anyhow!("Webhook test returned HTTP {}", response.status()));
        }

        Ok(())
    }

    fn request(&self, payload: &AlertPayload) -> reqwest::RequestBuilder {
        let request = self.client.post(&self.webhook_url).json(payload);
        match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send_webhook(&self, payload: &AlertPayload) -> Result<()> {
        if !self.is_enabled() {
            warn!(
                "🚨 [{}] {}: {} (no webhook configured)",
                payload.validator, payload.subject, payload.message
            );
            return Ok(());
        }

        match timeout(WEBHOOK_TIMEOUT, self.request(payload).send()).await {
            Ok(Ok(response)) => {
                if response.status().is_success() {
                    info!("📨 Alert sent for {}: {}", payload.validator, payload.subject);
                    Ok(())
                } else {
                    warn!(
                        "Alert webhook returned status: {} for {}",
                        response.status(),
                        payload.validator
                    );
                    Err(anyhow!("Webhook returned HTTP {}", response.status()))
                }
            }
            Ok(Err(e)) => {
                warn!("Failed to send alert for {}: {}", payload.validator, e);
                Err(anyhow!("Webhook request failed: {}", e))
            }
            Err(_) => {
                warn!("Alert webhook timeout for {}", payload.validator);
                Err(anyhow!("Webhook request timed out"))
            }
        }
    }
}

impl Notifier for AlertService {
    async fn send(&self, subject: &str, body: &str) -> Result<()> {
        let payload = AlertPayload {
            timestamp: Utc::now(),
            validator: self.validator.clone(),
            subject: subject.to_string(),
            message: body.to_string(),
            recipient: self.recipient.clone(),
        };

        debug!("Dispatching alert '{}' for {}", subject, self.validator);
        self.send_webhook(&payload).await
    }
}
