//! Subscription CRUD operations.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{ActiveSubscription, Subscription};

/// Create a new subscription linking a subscriber to a group.
///
/// New subscriptions start inactive; [`activate`] flips them once the payment
/// collaborator confirms. Returns the new subscription's row id.
pub async fn create_subscription(
    pool: &SqlitePool,
    subscriber_id: &str,
    group_id: i64,
    window_start: &str,
    window_end: &str,
) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO subscriptions (subscriber_id, group_id, active, call_window_start, call_window_end)
        VALUES (?, ?, 0, ?, ?)
        "#,
    )
    .bind(subscriber_id)
    .bind(group_id)
    .bind(window_start)
    .bind(window_end)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Mark a subscription active. Called after payment confirmation.
pub async fn activate(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE subscriptions
        SET active = 1
        WHERE id = ?
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Subscription",
            id: id.to_string(),
        });
    }

    Ok(())
}

/// Update a subscription's daily call window. Bounds are "HH:MM" UTC.
pub async fn set_call_window(pool: &SqlitePool, id: i64, start: &str, end: &str) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE subscriptions
        SET call_window_start = ?, call_window_end = ?
        WHERE id = ?
        "#,
    )
    .bind(start)
    .bind(end)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Subscription",
            id: id.to_string(),
        });
    }

    Ok(())
}

/// Get a subscription by id.
pub async fn get_subscription(pool: &SqlitePool, id: i64) -> Result<Subscription> {
    sqlx::query_as::<_, Subscription>(
        r#"
        SELECT id, subscriber_id, group_id, active, call_window_start, call_window_end, created_at
        FROM subscriptions
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Subscription",
        id: id.to_string(),
    })
}

/// List a subscriber's subscriptions.
pub async fn list_for_subscriber(pool: &SqlitePool, subscriber_id: &str) -> Result<Vec<Subscription>> {
    let subscriptions = sqlx::query_as::<_, Subscription>(
        r#"
        SELECT id, subscriber_id, group_id, active, call_window_start, call_window_end, created_at
        FROM subscriptions
        WHERE subscriber_id = ?
        ORDER BY created_at DESC
        "#,
    )
    .bind(subscriber_id)
    .fetch_all(pool)
    .await?;

    Ok(subscriptions)
}

/// List the active subscriptions for a group, joined with each subscriber's
/// phone number. Window filtering happens in the caller; this only applies the
/// `active` flag.
pub async fn list_active_for_group(pool: &SqlitePool, group_id: i64) -> Result<Vec<ActiveSubscription>> {
    let subscriptions = sqlx::query_as::<_, ActiveSubscription>(
        r#"
        SELECT s.id, u.phone_number, s.call_window_start, s.call_window_end
        FROM subscriptions s
        INNER JOIN subscribers u ON u.id = s.subscriber_id
        WHERE s.group_id = ? AND s.active = 1
        ORDER BY s.id
        "#,
    )
    .bind(group_id)
    .fetch_all(pool)
    .await?;

    Ok(subscriptions)
}
