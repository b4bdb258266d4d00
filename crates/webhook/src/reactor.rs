//! Delivery-status reaction: mirror provider statuses onto the attempt log
//! and drive bounded retries.
//!
//! Each callback carries its own retry context in the URL, so reacting to one
//! needs no session state: a retry is just a fresh outbound call with the
//! counter advanced, whose own callback will come back through here.

use tracing::{debug, info, warn};

use database::{call_attempt, Database, DatabaseError};
use twilio_voice::{CallPlacer, RetryContext};

/// Provider statuses after which an attempt is considered resolved.
pub const ACCEPTABLE_STATUSES: [&str; 2] = ["completed", "busy"];

/// Retry ceiling per alerted number per signal.
pub const MAX_RETRIES: u32 = 3;

/// One status callback as posted by the provider.
#[derive(Debug, Clone)]
pub struct StatusCallback {
    /// Provider call SID; correlates the callback to an attempt row.
    pub call_sid: String,
    /// Provider-reported call status.
    pub call_status: String,
    /// Retry context decoded from the callback URL query string, if present
    /// and well-formed.
    pub context: Option<RetryContext>,
}

/// What the reactor did with one callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusReaction {
    /// Call reached an acceptable terminal state; nothing left to do.
    Resolved,
    /// A fresh placement was made carrying the advanced retry counter.
    Retried {
        /// Counter on the new placement.
        retry_count: u32,
    },
    /// Retry ceiling reached; gave up on this number for this signal.
    Exhausted,
    /// A retry was warranted but could not be made: the context was missing
    /// or the provider rejected the new placement.
    Dropped,
}

/// React to one provider status callback.
///
/// The matching attempt row (if any) is updated to the reported status first;
/// retries never rewrite it, they are fresh outbound actions. Only
/// persistence failures propagate; the HTTP layer catches them so the
/// provider always sees success.
pub async fn on_status_callback<P: CallPlacer>(
    db: &Database,
    placer: &P,
    callback: &StatusCallback,
) -> Result<StatusReaction, DatabaseError> {
    info!(
        sid = %callback.call_sid,
        status = %callback.call_status,
        "Status callback received"
    );

    let updated =
        call_attempt::update_status_by_call_ref(db.pool(), &callback.call_sid, &callback.call_status)
            .await?;
    if !updated {
        // Expected for retry placements, which have no attempt row of their own.
        debug!(sid = %callback.call_sid, "No attempt row for call SID");
    }

    if ACCEPTABLE_STATUSES.contains(&callback.call_status.as_str()) {
        return Ok(StatusReaction::Resolved);
    }

    let Some(ctx) = &callback.context else {
        warn!(sid = %callback.call_sid, "Callback carries no retry context; cannot retry");
        return Ok(StatusReaction::Dropped);
    };

    if ctx.retry_count >= MAX_RETRIES {
        info!(
            number = %ctx.number,
            retry_count = ctx.retry_count,
            "Retry ceiling reached; giving up"
        );
        return Ok(StatusReaction::Exhausted);
    }

    let call = ctx.next_call();
    match placer.place_call(&call).await {
        Ok(sid) => {
            info!(
                number = %call.to,
                retry_count = call.retry_count,
                sid = %sid,
                "Retry call placed"
            );
            Ok(StatusReaction::Retried {
                retry_count: call.retry_count,
            })
        }
        Err(e) => {
            // No callback will ever arrive for a placement the provider never
            // accepted, so this number is done for this signal.
            warn!(number = %call.to, error = %e, "Retry placement failed");
            Ok(StatusReaction::Dropped)
        }
    }
}
