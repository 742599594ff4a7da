//! Submission workflow
//!
//! Each operation validates its input, persists a freshly constructed
//! record, and (where applicable) attempts a transactional email. The email
//! attempt is awaited but best-effort: failure is logged and swallowed so
//! the durable side effect is never rolled back or blocked by it.

use serde_json::json;
use tracing::{error, info};

use crate::email::{EmailMessage, EmailSender};
use crate::error::{Error, Result};
use crate::models::{
    ContactSubmission, ContactSubmissionCreate, PilotSignup, PilotSignupCreate, StatusCheck,
    StatusCheckCreate, CONTACT_SUBMISSIONS, PILOT_SIGNUPS, STATUS_CHECKS,
};
use crate::store::DocumentStore;

/// Record a status ping
pub async fn create_status_check(
    store: &dyn DocumentStore,
    input: StatusCheckCreate,
) -> Result<StatusCheck> {
    input.validate().map_err(Error::Validation)?;

    let record = StatusCheck::new(input);
    store
        .insert(STATUS_CHECKS, serde_json::to_value(&record)?)
        .await?;
    Ok(record)
}

/// Record a contact-form submission and thank the submitter by email
pub async fn submit_contact(
    store: &dyn DocumentStore,
    mailer: &dyn EmailSender,
    sender: &str,
    input: ContactSubmissionCreate,
) -> Result<ContactSubmission> {
    input.validate().map_err(Error::Validation)?;

    let record = ContactSubmission::new(input);
    store
        .insert(CONTACT_SUBMISSIONS, serde_json::to_value(&record)?)
        .await?;

    let message = EmailMessage {
        from: sender.to_string(),
        to: vec![record.email.clone()],
        subject: format!("Thank you for contacting Xtrec, {}!", record.name),
        html: contact_thank_you_html(&record.name, &record.interest),
    };
    send_best_effort(mailer, message).await;

    Ok(record)
}

/// Sign an email address up for the pilot programme.
///
/// The duplicate guard is a check-then-write over the signup collection and
/// is not transactionally isolated: two concurrent signups with the same
/// email can both pass the existence check and both be persisted.
pub async fn pilot_signup(
    store: &dyn DocumentStore,
    mailer: &dyn EmailSender,
    sender: &str,
    input: PilotSignupCreate,
) -> Result<PilotSignup> {
    input.validate().map_err(Error::Validation)?;

    let existing = store
        .find_one(PILOT_SIGNUPS, &json!({"email": input.email}))
        .await?;
    if existing.is_some() {
        return Err(Error::conflict(
            "Email already registered for pilot programme",
        ));
    }

    let record = PilotSignup::new(input);
    store
        .insert(PILOT_SIGNUPS, serde_json::to_value(&record)?)
        .await?;

    let message = EmailMessage {
        from: sender.to_string(),
        to: vec![record.email.clone()],
        subject: "Welcome to the Xtrec Pilot Programme!".to_string(),
        html: pilot_welcome_html(record.interest.as_deref()),
    };
    send_best_effort(mailer, message).await;

    Ok(record)
}

/// Attempt the send and discard the outcome except for logging
async fn send_best_effort(mailer: &dyn EmailSender, message: EmailMessage) {
    match mailer.send(&message).await {
        Ok(()) => info!("Confirmation email sent to {:?}", message.to),
        Err(e) => error!("Failed to send email: {e}"),
    }
}

fn contact_thank_you_html(name: &str, interest: &str) -> String {
    format!(
        r#"<html>
<body style="font-family: Arial, sans-serif; padding: 20px; color: #0F172A;">
    <h2 style="color: #002E5D;">Thank you for reaching out!</h2>
    <p>Hi {name},</p>
    <p>We've received your inquiry about <strong>{interest}</strong>.</p>
    <p>Our team will get back to you shortly.</p>
    <br>
    <p>Best regards,<br><strong>The Xtrec Team</strong></p>
    <hr style="border: 1px solid #E2E8F0;">
    <p style="color: #64748B; font-size: 12px;">Xtrec - Smart connected technology for everyday life and a sustainable future.</p>
</body>
</html>"#
    )
}

fn pilot_welcome_html(interest: Option<&str>) -> String {
    let interest_line = interest
        .filter(|interest| !interest.trim().is_empty())
        .map(|i| format!("<p>Your interest area: <strong>{i}</strong></p>"))
        .unwrap_or_default();
    format!(
        r#"<html>
<body style="font-family: Arial, sans-serif; padding: 20px; color: #0F172A;">
    <h2 style="color: #002E5D;">Welcome to the Xtrec Pilot Programme!</h2>
    <p>Thank you for joining our pilot programme.</p>
    <p>You're now part of an exclusive group helping shape the next generation of connected devices.</p>
    {interest_line}
    <p>We'll be in touch soon with updates and early access opportunities.</p>
    <br>
    <p>Best regards,<br><strong>The Xtrec Team</strong></p>
    <hr style="border: 1px solid #E2E8F0;">
    <p style="color: #64748B; font-size: 12px;">Xtrec - Smart connected technology for everyday life and a sustainable future.</p>
</body>
</html>"#
    )
}
