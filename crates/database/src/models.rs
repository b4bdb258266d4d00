//! Database models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A subscriber, identified by their opaque chat-platform user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Subscriber {
    /// Chat-platform user id (e.g., "7216489125")
    pub id: String,
    /// Phone number in E.164 format (e.g., "+2348100000001")
    pub phone_number: String,
    /// Whether the subscriber accepts calls at all.
    pub active: bool,
}

/// A monitored chat group, created lazily on the first message seen from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Group {
    /// Internal row id.
    pub id: i64,
    /// Chat-platform group id.
    pub external_id: String,
    /// Display name, also used as the conference room name.
    pub name: String,
}

/// A call-alert subscription linking a subscriber to a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Subscription {
    /// Internal row id.
    pub id: i64,
    /// Owning subscriber id.
    pub subscriber_id: String,
    /// Owning group row id.
    pub group_id: i64,
    /// Active only after payment is confirmed.
    pub active: bool,
    /// Daily call window start, "HH:MM" UTC, inclusive.
    pub call_window_start: String,
    /// Daily call window end, "HH:MM" UTC, inclusive.
    pub call_window_end: String,
    /// Creation timestamp.
    pub created_at: String,
}

/// An active subscription joined with its subscriber's phone number, as
/// returned by [`crate::subscription::list_active_for_group`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ActiveSubscription {
    /// Subscription row id.
    pub id: i64,
    /// Subscriber's phone number in E.164 format.
    pub phone_number: String,
    /// Daily call window start, "HH:MM" UTC, inclusive.
    pub call_window_start: String,
    /// Daily call window end, "HH:MM" UTC, inclusive.
    pub call_window_end: String,
}

/// One durable record of one outbound voice-call placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CallAttempt {
    /// Auto-incrementing ID.
    pub id: i64,
    /// Subscription this attempt was placed for.
    pub subscription_id: i64,
    /// Attempt status: "initiated", a provider-reported status, or "failed".
    pub status: String,
    /// Provider call SID, or "failed" when placement never reached the provider.
    pub detail: String,
    /// Creation timestamp.
    pub created_at: String,
}
