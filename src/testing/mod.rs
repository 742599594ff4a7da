//! Test doubles for the email seam

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::email::{EmailMessage, EmailSender};
use crate::error::{Error, Result};

/// Mailer that records every message instead of sending it
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<EmailMessage>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages captured so far, in send order
    pub async fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl EmailSender for RecordingMailer {
    async fn send(&self, message: &EmailMessage) -> Result<()> {
        self.sent.lock().await.push(message.clone());
        Ok(())
    }
}

/// Mailer that fails every send, simulating a provider outage
pub struct FailingMailer;

#[async_trait]
impl EmailSender for FailingMailer {
    async fn send(&self, _message: &EmailMessage) -> Result<()> {
        Err(Error::email("simulated provider outage"))
    }
}
