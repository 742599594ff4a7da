//! # Xtrec Backend
//!
//! Backend service for the Xtrec marketing site. It records status pings,
//! contact-form submissions, and pilot-programme signups into a document
//! store and sends transactional emails on submission.
//!
//! ## Modules
//!
//! - `api` - Axum router, request handlers, and error-to-response mapping
//! - `config` - Application configuration loaded once from the environment
//! - `email` - Email sender abstraction and the Resend provider client
//! - `models` - Persisted record models and their creation payloads
//! - `store` - Document store abstraction with memory and file backends
//! - `workflow` - Submission and query workflows over the store and mailer
//! - `testing` - Test doubles for the email seam

pub mod api;
pub mod config;
pub mod email;
pub mod error;
pub mod models;
pub mod store;
pub mod workflow;

pub mod testing;

pub use error::{Error, Result};
