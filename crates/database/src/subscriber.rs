//! Subscriber CRUD operations.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::Subscriber;

/// Create a new subscriber.
pub async fn create_subscriber(pool: &SqlitePool, subscriber: &Subscriber) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO subscribers (id, phone_number, active)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(&subscriber.id)
    .bind(&subscriber.phone_number)
    .bind(subscriber.active)
    .execute(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return DatabaseError::AlreadyExists {
                    entity: "Subscriber",
                    id: subscriber.id.clone(),
                };
            }
        }
        DatabaseError::Sqlx(e)
    })?;

    Ok(())
}

/// Get a subscriber by id.
pub async fn get_subscriber(pool: &SqlitePool, id: &str) -> Result<Subscriber> {
    sqlx::query_as::<_, Subscriber>(
        r#"
        SELECT id, phone_number, active
        FROM subscribers
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Subscriber",
        id: id.to_string(),
    })
}

/// Update a subscriber's registered phone number.
pub async fn update_phone_number(pool: &SqlitePool, id: &str, phone_number: &str) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE subscribers
        SET phone_number = ?
        WHERE id = ?
        "#,
    )
    .bind(phone_number)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Subscriber",
            id: id.to_string(),
        });
    }

    Ok(())
}

/// Set a subscriber's active flag.
pub async fn set_active(pool: &SqlitePool, id: &str, active: bool) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE subscribers
        SET active = ?
        WHERE id = ?
        "#,
    )
    .bind(active)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Subscriber",
            id: id.to_string(),
        });
    }

    Ok(())
}
