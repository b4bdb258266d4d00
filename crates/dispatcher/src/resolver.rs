//! Eligibility resolution: who gets called for a signal, right now.

use chrono::NaiveTime;
use tracing::warn;

use database::{group, subscription, Database, Group};

use crate::error::DispatchError;

/// One subscriber eligible for a dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibleSubscriber {
    /// Subscription the resulting call attempt will be logged against.
    pub subscription_id: i64,
    /// Phone number to call, E.164.
    pub phone_number: String,
}

/// The result of resolving a group at a point in time.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// The group the signal originated from, created on first sight.
    pub group: Group,
    /// Active subscriptions whose call window contains now.
    pub eligible: Vec<EligibleSubscriber>,
}

/// Resolve the set of subscribers to call for a signal in a group.
///
/// Creates the group if this is the first message seen from it, then filters
/// the group's active subscriptions down to those whose daily call window
/// contains `now`. Persistence failures propagate so the caller can abort the
/// whole dispatch.
pub async fn resolve(
    db: &Database,
    group_external_id: &str,
    group_display_name: &str,
    now: NaiveTime,
) -> Result<Resolution, DispatchError> {
    let group = group::ensure_group(db.pool(), group_external_id, group_display_name).await?;

    let active = subscription::list_active_for_group(db.pool(), group.id).await?;

    let eligible = active
        .into_iter()
        .filter(|sub| window_contains(&sub.call_window_start, &sub.call_window_end, now))
        .map(|sub| EligibleSubscriber {
            subscription_id: sub.id,
            phone_number: sub.phone_number,
        })
        .collect();

    Ok(Resolution { group, eligible })
}

/// Inclusive containment check on a daily call window.
///
/// Bounds are "HH:MM" wall-clock UTC, inclusive on both ends. A window whose
/// start is after its end never matches, and a bound that fails to parse makes
/// that subscription ineligible rather than aborting the dispatch.
fn window_contains(start: &str, end: &str, now: NaiveTime) -> bool {
    let parse = |s: &str| NaiveTime::parse_from_str(s, "%H:%M").ok();
    match (parse(start), parse(end)) {
        (Some(start), Some(end)) => start <= now && now <= end,
        _ => {
            warn!(start = %start, end = %end, "Unparseable call window; treating as ineligible");
            false
        }
    }
}
