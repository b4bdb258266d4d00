//! Error types for twilio-voice.

use thiserror::Error;

/// Errors that can occur when placing calls through the Twilio REST API.
#[derive(Debug, Error)]
pub enum VoiceError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Non-success response from the Twilio API.
    #[error("Twilio API error {status}: {message}")]
    Api { status: u16, message: String },
}
