//! Persisted record models and their creation payloads
//!
//! Each persisted record carries a generated uuid and a server-side UTC
//! timestamp. Create payloads are strict subsets supplied by the caller;
//! unknown input fields are ignored on deserialization. Records are
//! immutable once created.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::FieldError;

/// Collection name for status checks
pub const STATUS_CHECKS: &str = "status_checks";
/// Collection name for contact-form submissions
pub const CONTACT_SUBMISSIONS: &str = "contact_submissions";
/// Collection name for pilot-programme signups
pub const PILOT_SIGNUPS: &str = "pilot_signups";

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

/// Syntactic email check; makes no deliverability guarantees
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}

/// A status ping from a client of the marketing site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCheck {
    pub id: String,
    pub client_name: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusCheckCreate {
    pub client_name: String,
}

impl StatusCheckCreate {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        if self.client_name.trim().is_empty() {
            return Err(vec![FieldError::new("client_name", "must not be empty")]);
        }
        Ok(())
    }
}

impl StatusCheck {
    pub fn new(input: StatusCheckCreate) -> Self {
        Self {
            id: new_record_id(),
            client_name: input.client_name,
            timestamp: Utc::now(),
        }
    }
}

/// A contact-form submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub id: String,
    pub name: String,
    pub email: String,
    pub interest: String,
    #[serde(default)]
    pub message: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContactSubmissionCreate {
    pub name: String,
    pub email: String,
    pub interest: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl ContactSubmissionCreate {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(FieldError::new("name", "must not be empty"));
        }
        if !is_valid_email(&self.email) {
            errors.push(FieldError::new(
                "email",
                "value is not a valid email address",
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl ContactSubmission {
    pub fn new(input: ContactSubmissionCreate) -> Self {
        Self {
            id: new_record_id(),
            name: input.name,
            email: input.email,
            interest: input.interest,
            message: input.message,
            timestamp: Utc::now(),
        }
    }
}

/// A pilot-programme signup; emails are unique across the collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PilotSignup {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub interest: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PilotSignupCreate {
    pub email: String,
    #[serde(default)]
    pub interest: Option<String>,
}

impl PilotSignupCreate {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        if !is_valid_email(&self.email) {
            return Err(vec![FieldError::new(
                "email",
                "value is not a valid email address",
            )]);
        }
        Ok(())
    }
}

impl PilotSignup {
    pub fn new(input: PilotSignupCreate) -> Self {
        Self {
            id: new_record_id(),
            email: input.email,
            interest: input.interest,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plausible_emails() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last+tag@example.co.uk"));
    }

    #[test]
    fn rejects_malformed_emails() {
        assert!(!is_valid_email("invalid-email"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn generated_ids_are_unique_and_timestamps_not_in_future() {
        let a = StatusCheck::new(StatusCheckCreate {
            client_name: "probe".into(),
        });
        let b = StatusCheck::new(StatusCheckCreate {
            client_name: "probe".into(),
        });
        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
        assert!(a.timestamp <= Utc::now());
    }

    #[test]
    fn create_payloads_ignore_unknown_fields() {
        let input: PilotSignupCreate = serde_json::from_str(
            r#"{"email": "a@b.com", "utm_source": "newsletter", "id": "spoofed"}"#,
        )
        .unwrap();
        assert_eq!(input.email, "a@b.com");
        assert!(input.interest.is_none());
    }

    #[test]
    fn contact_validation_collects_all_field_errors() {
        let input = ContactSubmissionCreate {
            name: "  ".into(),
            email: "invalid-email".into(),
            interest: "wearables".into(),
            message: None,
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "name");
        assert_eq!(errors[1].field, "email");
    }

    #[test]
    fn contact_interest_may_be_empty() {
        let input = ContactSubmissionCreate {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            interest: "".into(),
            message: None,
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn persisted_timestamp_serializes_as_rfc3339_string() {
        let record = PilotSignup::new(PilotSignupCreate {
            email: "a@b.com".into(),
            interest: None,
        });
        let doc = serde_json::to_value(&record).unwrap();
        let raw = doc["timestamp"].as_str().expect("timestamp is a string");
        let parsed: DateTime<Utc> = raw.parse().unwrap();
        assert_eq!(parsed, record.timestamp);
    }
}
