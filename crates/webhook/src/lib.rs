//! Twilio status-callback service for Klaxon.
//!
//! Exposes the HTTP endpoint Twilio posts call lifecycle events to. The form
//! body carries `CallSid` and `CallStatus`; the query string carries the
//! retry context the original placement embedded in its callback URL. The
//! endpoint acknowledges with 200 and an empty body unconditionally: Twilio
//! retry-storms on error responses and has no use for ours.

pub mod reactor;

pub use reactor::{on_status_callback, StatusCallback, StatusReaction, ACCEPTABLE_STATUSES, MAX_RETRIES};

use std::sync::Arc;

use axum::extract::{RawQuery, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use tracing::{debug, error};

use database::Database;
use twilio_voice::{CallPlacer, RetryContext};

/// Shared service state.
pub struct AppState<P> {
    /// Database handle for the attempt log.
    pub db: Database,
    /// Placer used for retry calls.
    pub placer: Arc<P>,
}

impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            placer: Arc::clone(&self.placer),
        }
    }
}

/// Build the service router.
pub fn router<P: CallPlacer + 'static>(state: AppState<P>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/twilio/webhook", post(twilio_webhook::<P>))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

/// Form body of a Twilio status callback. Parsed leniently: missing fields
/// become empty strings so a malformed post still gets acknowledged.
#[derive(Debug, Default, Deserialize)]
struct StatusForm {
    #[serde(rename = "CallSid", default)]
    call_sid: String,
    #[serde(rename = "CallStatus", default)]
    call_status: String,
}

async fn twilio_webhook<P: CallPlacer>(
    State(state): State<AppState<P>>,
    RawQuery(query): RawQuery,
    body: String,
) -> StatusCode {
    let form: StatusForm = serde_urlencoded::from_str(&body).unwrap_or_default();
    let context = query.as_deref().and_then(RetryContext::parse_query);

    let callback = StatusCallback {
        call_sid: form.call_sid,
        call_status: form.call_status,
        context,
    };

    match reactor::on_status_callback(&state.db, state.placer.as_ref(), &callback).await {
        Ok(reaction) => debug!(?reaction, "Status callback processed"),
        Err(e) => error!(error = %e, "Status callback processing failed"),
    }

    StatusCode::OK
}
