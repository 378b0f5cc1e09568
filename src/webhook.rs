//! Remote submission of finished questionnaires.

use anyhow::{anyhow, Context, Result};
use std::time::Duration;
use tokio_retry::{strategy::ExponentialBackoff, Retry};

use crate::config::WebhookConfig;
use crate::history::HistoryEntry;

/// Posts each result as a JSON body to a configured endpoint
/// (e.g. a spreadsheet script web app).
pub struct WebhookClient {
    client: reqwest::Client,
    url: String,
    retries: usize,
}

impl WebhookClient {
    pub fn new(config: &WebhookConfig) -> Result<Self> {
        // Already installed is fine; only the first call wins
        let _ = rustls::crypto::ring::default_provider().install_default();

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("metabolic-age/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            url: config.url.clone(),
            retries: config.retries,
        })
    }

    /// Send one entry, retrying with exponential backoff on failure.
    pub async fn submit(&self, entry: &HistoryEntry) -> Result<()> {
        let retry_strategy = ExponentialBackoff::from_millis(100)
            .max_delay(Duration::from_secs(5))
            .take(self.retries);

        Retry::spawn(retry_strategy, || async {
            let response = self
                .client
                .post(&self.url)
                .json(entry)
                .send()
                .await
                .map_err(|e| {
                    if e.is_timeout() {
                        anyhow!("Webhook request timed out")
                    } else if e.is_connect() {
                        anyhow!("Could not connect to webhook at {}", self.url)
                    } else {
                        anyhow!("Webhook request failed: {}", e)
                    }
                })?;

            let status = response.status();
            if status.is_success() {
                Ok(())
            } else {
                log::debug!("webhook responded with {}", status);
                Err(anyhow!("Webhook rejected submission: HTTP {}", status))
            }
        })
        .await?;

        log::info!("Submitted result to {}", self.url);
        Ok(())
    }
}
