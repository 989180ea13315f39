//! Sequence counter repository.

use async_trait::async_trait;
use mockall::automock;
use sqlx::query_as;

use crate::database::Db;

const NEXT_VALUE_SQL: &str = include_str!("sql/next_value.sql");

/// Atomic, persistently backed named counter.
///
/// The cart service mints order numbers from it; the increment must be atomic
/// across concurrent callers.
#[automock]
#[async_trait]
pub trait SequenceCounter: Send + Sync {
    /// Advance the named counter and return its new value.
    async fn get_and_increment(&self, name: &str) -> Result<i64, sqlx::Error>;
}

#[derive(Debug, Clone)]
pub struct PgSequenceCounter {
    db: Db,
}

impl PgSequenceCounter {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SequenceCounter for PgSequenceCounter {
    async fn get_and_increment(&self, name: &str) -> Result<i64, sqlx::Error> {
        // Single upsert statement, so concurrent callers serialize on the row
        // and every caller sees a distinct value.
        let (value,): (i64,) = query_as(NEXT_VALUE_SQL)
            .bind(name)
            .fetch_one(self.db.pool())
            .await?;

        Ok(value)
    }
}
