//! Resend email provider client

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use super::{EmailMessage, EmailSender};
use crate::error::{Error, Result};

const RESEND_API_URL: &str = "https://api.resend.com/emails";

/// Email sender backed by the Resend HTTP API
pub struct ResendMailer {
    client: Client,
    api_key: String,
    api_url: String,
}

impl ResendMailer {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            api_url: RESEND_API_URL.to_string(),
        }
    }

    /// Point the client at a different endpoint (for tests)
    pub fn with_api_url(mut self, api_url: String) -> Self {
        self.api_url = api_url;
        self
    }
}

#[async_trait]
impl EmailSender for ResendMailer {
    async fn send(&self, message: &EmailMessage) -> Result<()> {
        debug!("Dispatching email to {:?} via Resend", message.to);

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(message)
            .send()
            .await
            .map_err(|e| Error::email(format!("Failed to reach email provider: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::email(format!(
                "Email provider returned status: {}",
                response.status()
            )));
        }

        info!("Email sent to {:?}", message.to);
        Ok(())
    }
}
