//! Group CRUD operations.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::Group;

/// Fetch a group by its chat-platform external id, creating it if missing.
///
/// The insert is `ON CONFLICT DO NOTHING` against the uniqueness constraint on
/// `external_id`, so two concurrent first messages from the same new group
/// still produce exactly one row.
pub async fn ensure_group(pool: &SqlitePool, external_id: &str, name: &str) -> Result<Group> {
    sqlx::query(
        r#"
        INSERT INTO groups (external_id, name)
        VALUES (?, ?)
        ON CONFLICT(external_id) DO NOTHING
        "#,
    )
    .bind(external_id)
    .bind(name)
    .execute(pool)
    .await?;

    get_group_by_external_id(pool, external_id).await
}

/// Get a group by its chat-platform external id.
pub async fn get_group_by_external_id(pool: &SqlitePool, external_id: &str) -> Result<Group> {
    sqlx::query_as::<_, Group>(
        r#"
        SELECT id, external_id, name
        FROM groups
        WHERE external_id = ?
        "#,
    )
    .bind(external_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Group",
        id: external_id.to_string(),
    })
}

/// Get a group by its internal row id.
pub async fn get_group(pool: &SqlitePool, id: i64) -> Result<Group> {
    sqlx::query_as::<_, Group>(
        r#"
        SELECT id, external_id, name
        FROM groups
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Group",
        id: id.to_string(),
    })
}

/// List all known groups.
pub async fn list_groups(pool: &SqlitePool) -> Result<Vec<Group>> {
    let groups = sqlx::query_as::<_, Group>(
        r#"
        SELECT id, external_id, name
        FROM groups
        ORDER BY name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(groups)
}
