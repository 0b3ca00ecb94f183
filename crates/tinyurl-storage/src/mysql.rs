use crate::reaper::ExpiryReaper;
use async_trait::async_trait;
use jiff::Timestamp;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use tinyurl_core::store::Result;
use tinyurl_core::{NumericId, Store, StoreError, UrlDocument, UrlKey};
use tracing::{debug, trace};

/// MySQL implementation of the store contract.
///
/// Documents live in the `tiny_urls` table keyed by `url_key`; expiry is kept
/// as unix milliseconds so the reaper can range-scan it. Reads return rows as
/// they are and leave expiry checks to the caller.
#[derive(Debug, Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    /// Creates a store from an existing MySQL connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Creates a store by opening a new MySQL connection pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = MySqlPool::connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Applies the embedded schema migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Query(format!("migration failed: {e}")))
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

fn parse_row(row: &MySqlRow) -> Result<UrlDocument> {
    let key: String = row.try_get("url_key").map_err(map_sqlx_error)?;
    let numeric_id: i64 = row.try_get("base_10_id").map_err(map_sqlx_error)?;
    let target_url: String = row.try_get("long_url").map_err(map_sqlx_error)?;
    let expire_time: i64 = row.try_get("expire_time").map_err(map_sqlx_error)?;
    let never_expires: bool = row.try_get("live_forever").map_err(map_sqlx_error)?;

    let numeric_id = NumericId::try_from(numeric_id)
        .map_err(|e| StoreError::InvalidData(format!("invalid base_10_id for '{key}': {e}")))?;
    let expire_at = Timestamp::from_millisecond(expire_time).map_err(|e| {
        StoreError::InvalidData(format!("invalid expire_time '{expire_time}': {e}"))
    })?;

    let document = UrlDocument::new(numeric_id, target_url, expire_at, never_expires);
    if document.key.as_str() != key {
        return Err(StoreError::InvalidData(format!(
            "url_key '{key}' does not match base_10_id {numeric_id}"
        )));
    }
    Ok(document)
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StoreError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StoreError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_) => StoreError::InvalidData(message),
        _ => StoreError::Query(message),
    }
}

#[async_trait]
impl Store for MySqlStore {
    async fn put(&self, document: &UrlDocument) -> Result<()> {
        trace!(key = %document.key, "inserting document into mysql");

        let result = sqlx::query(
            r#"
            INSERT INTO tiny_urls (url_key, base_10_id, long_url, expire_time, live_forever)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(document.key.as_str())
        .bind(document.numeric_id.as_i64())
        .bind(document.target_url.as_str())
        .bind(document.expire_at.as_millisecond())
        .bind(document.never_expires)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => {
                Err(StoreError::Conflict(document.key.to_string()))
            }
            Err(err) => Err(map_sqlx_error(err)),
        }
    }

    async fn get_document(&self, key: &UrlKey) -> Result<UrlDocument> {
        let row = sqlx::query(
            r#"
            SELECT url_key, base_10_id, long_url, expire_time, live_forever
            FROM tiny_urls
            WHERE url_key = ?
            LIMIT 1
            "#,
        )
        .bind(key.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        match row {
            Some(row) => parse_row(&row),
            None => Err(StoreError::NotFound(key.to_string())),
        }
    }

    async fn delete(&self, key: &UrlKey) -> Result<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM tiny_urls
            WHERE url_key = ?
            "#,
        )
        .bind(key.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(key.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ExpiryReaper for MySqlStore {
    async fn purge_expired(&self, now: Timestamp) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM tiny_urls
            WHERE live_forever = FALSE
              AND expire_time <= ?
            "#,
        )
        .bind(now.as_millisecond())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        debug!(purged = result.rows_affected(), "purged expired documents");
        Ok(result.rows_affected())
    }
}
