//! Email sender abstraction
//!
//! The submission workflow treats email delivery as a best-effort side
//! effect: the trait reports failure, the caller logs and moves on.

pub mod resend;

pub use resend::ResendMailer;

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use crate::error::Result;

/// A transactional email ready for dispatch
#[derive(Debug, Clone, Serialize)]
pub struct EmailMessage {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

/// Dispatch seam for transactional email
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<()>;
}

/// Mailer used when no provider key is configured; drops every message
pub struct DisabledMailer;

#[async_trait]
impl EmailSender for DisabledMailer {
    async fn send(&self, message: &EmailMessage) -> Result<()> {
        debug!(
            "Email delivery disabled, dropping message to {:?}",
            message.to
        );
        Ok(())
    }
}
