//! Call attempt log operations.

use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::CallAttempt;

/// Record one outbound call placement for a subscription.
///
/// `detail` holds the provider call SID, or "failed" when the placement never
/// reached the provider. Returns the new row id.
pub async fn create_call_attempt(
    pool: &SqlitePool,
    subscription_id: i64,
    status: &str,
    detail: &str,
) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO call_attempts (subscription_id, status, detail)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(subscription_id)
    .bind(status)
    .bind(detail)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Update the status of the attempt whose detail matches the given call SID.
///
/// Returns whether a row was updated. Provider callbacks can arrive for calls
/// we no longer have a record of; that is not an error.
pub async fn update_status_by_call_ref(
    pool: &SqlitePool,
    call_ref: &str,
    status: &str,
) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE call_attempts
        SET status = ?
        WHERE detail = ?
        "#,
    )
    .bind(status)
    .bind(call_ref)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// List all attempts recorded for a subscription, newest first.
pub async fn list_for_subscription(pool: &SqlitePool, subscription_id: i64) -> Result<Vec<CallAttempt>> {
    let attempts = sqlx::query_as::<_, CallAttempt>(
        r#"
        SELECT id, subscription_id, status, detail, created_at
        FROM call_attempts
        WHERE subscription_id = ?
        ORDER BY id DESC
        "#,
    )
    .bind(subscription_id)
    .fetch_all(pool)
    .await?;

    Ok(attempts)
}

/// Count all recorded attempts.
pub async fn count_attempts(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM call_attempts
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(count)
}
