//! SQLite persistence layer for Klaxon.
//!
//! This crate provides async database operations for subscribers, groups,
//! call-alert subscriptions, and the call attempt log using SQLx with SQLite.
//!
//! # Example
//!
//! ```no_run
//! use database::{group, Database};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:klaxon.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     // Create-or-fetch a group on its first message
//!     let group = group::ensure_group(db.pool(), "-1001234567890", "FX Room").await?;
//!     println!("group #{}: {}", group.id, group.name);
//!
//!     Ok(())
//! }
//! ```

pub mod call_attempt;
pub mod error;
pub mod group;
pub mod models;
pub mod subscriber;
pub mod subscription;

pub use error::{DatabaseError, Result};
pub use models::{ActiveSubscription, CallAttempt, Group, Subscriber, Subscription};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    /// Sized for the two concurrent entry points (dispatch and webhook) plus
    /// broadcast fan-out logging.
    const DEFAULT_POOL_SIZE: u32 = 10;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `?mode=rwc` to create the database file if it doesn't exist.
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!("Connected to database: {} (pool size: {})", url, pool_size);

        Ok(Self { pool })
    }

    /// Run database migrations.
    ///
    /// This should be called once after connecting to ensure the schema is up to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Subscriber;

    async fn test_db() -> Database {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_subscriber_crud() {
        let db = test_db().await;

        let subscriber = Subscriber {
            id: "7216489125".to_string(),
            phone_number: "+2348100000001".to_string(),
            active: true,
        };
        subscriber::create_subscriber(db.pool(), &subscriber)
            .await
            .unwrap();

        let fetched = subscriber::get_subscriber(db.pool(), &subscriber.id)
            .await
            .unwrap();
        assert_eq!(fetched.phone_number, "+2348100000001");

        subscriber::update_phone_number(db.pool(), &subscriber.id, "+2348100000002")
            .await
            .unwrap();
        let fetched = subscriber::get_subscriber(db.pool(), &subscriber.id)
            .await
            .unwrap();
        assert_eq!(fetched.phone_number, "+2348100000002");

        // Duplicate ids are rejected by the primary key.
        let result = subscriber::create_subscriber(db.pool(), &fetched).await;
        assert!(matches!(result, Err(DatabaseError::AlreadyExists { .. })));
    }

    #[tokio::test]
    async fn test_subscription_lifecycle() {
        let db = test_db().await;

        let subscriber = Subscriber {
            id: "42".to_string(),
            phone_number: "+2348100000001".to_string(),
            active: true,
        };
        subscriber::create_subscriber(db.pool(), &subscriber)
            .await
            .unwrap();
        let group = group::ensure_group(db.pool(), "-100987", "FX Room").await.unwrap();

        let sub_id =
            subscription::create_subscription(db.pool(), &subscriber.id, group.id, "09:00", "17:00")
                .await
                .unwrap();

        // Inactive until payment confirmation.
        let active = subscription::list_active_for_group(db.pool(), group.id)
            .await
            .unwrap();
        assert!(active.is_empty());

        subscription::activate(db.pool(), sub_id).await.unwrap();
        let active = subscription::list_active_for_group(db.pool(), group.id)
            .await
            .unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, sub_id);
        assert_eq!(active[0].phone_number, "+2348100000001");
        assert_eq!(active[0].call_window_start, "09:00");
    }

    #[tokio::test]
    async fn test_call_attempt_log() {
        let db = test_db().await;

        let subscriber = Subscriber {
            id: "42".to_string(),
            phone_number: "+2348100000001".to_string(),
            active: true,
        };
        subscriber::create_subscriber(db.pool(), &subscriber)
            .await
            .unwrap();
        let group = group::ensure_group(db.pool(), "-100987", "FX Room").await.unwrap();
        let sub_id =
            subscription::create_subscription(db.pool(), &subscriber.id, group.id, "00:00", "23:59")
                .await
                .unwrap();

        call_attempt::create_call_attempt(db.pool(), sub_id, "initiated", "CA123")
            .await
            .unwrap();
        call_attempt::create_call_attempt(db.pool(), sub_id, "initiated", "failed")
            .await
            .unwrap();

        let updated = call_attempt::update_status_by_call_ref(db.pool(), "CA123", "completed")
            .await
            .unwrap();
        assert!(updated);

        // Unknown SIDs are ignored, not an error.
        let updated = call_attempt::update_status_by_call_ref(db.pool(), "CA999", "completed")
            .await
            .unwrap();
        assert!(!updated);

        let attempts = call_attempt::list_for_subscription(db.pool(), sub_id)
            .await
            .unwrap();
        assert_eq!(attempts.len(), 2);
        assert_eq!(attempts[1].status, "completed");
        assert_eq!(attempts[1].detail, "CA123");
    }
}
