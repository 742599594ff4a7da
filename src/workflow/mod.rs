//! Core workflows: submission (validate, persist, notify) and query

pub mod query;
pub mod submission;

pub use query::list_records;
pub use submission::{create_status_check, pilot_signup, submit_contact};
