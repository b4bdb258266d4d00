//! Status-callback retry context.
//!
//! Each outbound call carries its own continuation state in the query string
//! of the status-callback URL Twilio posts back to: destination number,
//! announcement text, retry counter, and (conference mode only) the room name.
//! The webhook decodes the context from the URL alone, so no server-side
//! correlation table exists and every attempt is independently retryable.

use serde::Deserialize;

use crate::types::{CallMode, OutboundCall};

/// Continuation state for one outbound call, round-tripped through the
/// provider's status-callback URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryContext {
    /// Destination phone number, E.164.
    pub number: String,
    /// Announcement text.
    pub message: String,
    /// Placements already made for this alert and number.
    pub retry_count: u32,
    /// Conference room name; present iff the call was a conference call.
    pub conference_room: Option<String>,
}

/// Wire shape of the decoded query string. retry_count arrives as free text
/// and is parsed leniently: anything non-numeric counts as 0.
#[derive(Debug, Deserialize)]
struct RawContext {
    number: String,
    message: String,
    #[serde(default)]
    retry_count: String,
    #[serde(default)]
    conference_room: Option<String>,
}

impl RetryContext {
    /// Capture the context of an outbound call before placing it.
    pub fn from_call(call: &OutboundCall) -> Self {
        Self {
            number: call.to.clone(),
            message: call.message.clone(),
            retry_count: call.retry_count,
            conference_room: call.mode.conference_room().map(str::to_string),
        }
    }

    /// Encode as a URL query string.
    pub fn to_query(&self) -> String {
        let mut query = format!(
            "number={}&message={}&retry_count={}",
            urlencoding::encode(&self.number),
            urlencoding::encode(&self.message),
            self.retry_count
        );
        if let Some(room) = &self.conference_room {
            query.push_str("&conference_room=");
            query.push_str(&urlencoding::encode(room));
        }
        query
    }

    /// Decode from a URL query string.
    ///
    /// Returns `None` when the required fields are missing. A malformed
    /// `retry_count` decodes to 0 rather than failing.
    pub fn parse_query(query: &str) -> Option<Self> {
        let raw: RawContext = serde_urlencoded::from_str(query).ok()?;
        Some(Self {
            number: raw.number,
            message: raw.message,
            retry_count: raw.retry_count.parse().unwrap_or(0),
            conference_room: raw.conference_room,
        })
    }

    /// Build the follow-up call for this context: same number, message, and
    /// mode, with the retry counter advanced.
    pub fn next_call(&self) -> OutboundCall {
        let mode = match &self.conference_room {
            Some(room) => CallMode::Conference { room: room.clone() },
            None => CallMode::Direct,
        };
        OutboundCall {
            to: self.number.clone(),
            message: self.message.clone(),
            retry_count: self.retry_count + 1,
            mode,
        }
    }
}
