//! HTTP surface for the Xtrec backend
//!
//! All routes live under `/api` and speak JSON. Validation failures map to
//! 422 with structured field errors, the duplicate-signup conflict to 400
//! with a plain message, and everything else to a generic 500.

use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::State,
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use crate::config::AppConfig;
use crate::email::EmailSender;
use crate::error::Error;
use crate::models::{
    ContactSubmission, ContactSubmissionCreate, PilotSignup, PilotSignupCreate, StatusCheck,
    StatusCheckCreate, CONTACT_SUBMISSIONS, PILOT_SIGNUPS, STATUS_CHECKS,
};
use crate::store::DocumentStore;
use crate::workflow;

/// Shared request-handling state
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub mailer: Arc<dyn EmailSender>,
    pub sender_email: String,
}

/// Start the API server and block until it exits
pub async fn serve(config: &AppConfig, state: Arc<AppState>) -> Result<()> {
    let addr = format!("0.0.0.0:{}", config.port);
    let app = build_router(state, &config.cors_origins);

    info!("Starting Xtrec API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the API router
pub fn build_router(state: Arc<AppState>, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/api/", get(root))
        .route("/api/status", post(create_status_check).get(get_status_checks))
        .route("/api/contact", post(submit_contact))
        .route("/api/contacts", get(get_contacts))
        .route("/api/pilot-signup", post(pilot_signup))
        .route("/api/pilot-signups", get(get_pilot_signups))
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({"detail": errors})),
            )
                .into_response(),
            Error::Conflict(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({"detail": message}))).into_response()
            }
            other => {
                error!("Request failed: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"detail": "Internal server error"})),
                )
                    .into_response()
            }
        }
    }
}

// Handlers

async fn root() -> Json<Value> {
    Json(json!({"message": "Xtrec API - Smart connected technology"}))
}

async fn create_status_check(
    State(state): State<Arc<AppState>>,
    Json(input): Json<StatusCheckCreate>,
) -> Result<Json<StatusCheck>, Error> {
    let record = workflow::create_status_check(state.store.as_ref(), input).await?;
    Ok(Json(record))
}

async fn get_status_checks(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StatusCheck>>, Error> {
    let records = workflow::list_records(state.store.as_ref(), STATUS_CHECKS).await?;
    Ok(Json(records))
}

async fn submit_contact(
    State(state): State<Arc<AppState>>,
    Json(input): Json<ContactSubmissionCreate>,
) -> Result<Json<ContactSubmission>, Error> {
    let record = workflow::submit_contact(
        state.store.as_ref(),
        state.mailer.as_ref(),
        &state.sender_email,
        input,
    )
    .await?;
    Ok(Json(record))
}

async fn get_contacts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ContactSubmission>>, Error> {
    let records = workflow::list_records(state.store.as_ref(), CONTACT_SUBMISSIONS).await?;
    Ok(Json(records))
}

async fn pilot_signup(
    State(state): State<Arc<AppState>>,
    Json(input): Json<PilotSignupCreate>,
) -> Result<Json<PilotSignup>, Error> {
    let record = workflow::pilot_signup(
        state.store.as_ref(),
        state.mailer.as_ref(),
        &state.sender_email,
        input,
    )
    .await?;
    Ok(Json(record))
}

async fn get_pilot_signups(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PilotSignup>>, Error> {
    let records = workflow::list_records(state.store.as_ref(), PILOT_SIGNUPS).await?;
    Ok(Json(records))
}
