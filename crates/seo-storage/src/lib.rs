//! Opportunistic response cache backed by SQLite.

use chrono::{DateTime, Duration, Utc};
use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ActiveValue::Set, ConnectOptions, Database, DatabaseConnection, DbErr, EntityTrait,
    sea_query::OnConflict,
};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

pub mod entities;

use entities::analysis;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to connect to database: {0}")]
    Connection(String),
    #[error("Failed to run migrations: {0}")]
    Migration(String),
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// A stored payload and the time it was written.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedRecord {
    pub payload: Value,
    pub timestamp: DateTime<Utc>,
}

impl CachedRecord {
    /// The payload with an RFC 3339 `timestamp` field merged in.
    pub fn into_json(self) -> Value {
        match self.payload {
            Value::Object(mut map) => {
                map.insert(
                    "timestamp".to_string(),
                    Value::String(self.timestamp.to_rfc3339()),
                );
                Value::Object(map)
            }
            other => other,
        }
    }
}

#[derive(Clone)]
pub struct SeoStorage {
    db: DatabaseConnection,
    freshness: Duration,
}

impl SeoStorage {
    pub const DEFAULT_FRESHNESS_HOURS: i64 = 24;

    pub async fn new(connection_string: &str) -> Result<Self, StorageError> {
        let mut options = ConnectOptions::new(connection_string);
        options.sqlx_logging(false);
        // Every pooled connection would otherwise see its own empty database.
        if connection_string.contains(":memory:") {
            options.max_connections(1);
        }

        let db = Database::connect(options)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(Self {
            db,
            freshness: Duration::hours(Self::DEFAULT_FRESHNESS_HOURS),
        })
    }

    pub fn with_freshness(mut self, freshness: Duration) -> Self {
        self.freshness = freshness;
        self
    }

    pub async fn migrate(&self) -> Result<(), StorageError> {
        Migrator::up(&self.db, None)
            .await
            .map_err(|e| StorageError::Migration(e.to_string()))
    }

    pub async fn put(&self, key: &str, payload: Value) -> Result<DateTime<Utc>, StorageError> {
        let now = Utc::now();
        self.put_at(key, payload, now).await?;
        Ok(now)
    }

    /// Inserts or overwrites the record for `key`.
    pub async fn put_at(
        &self,
        key: &str,
        payload: Value,
        created_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let model = analysis::ActiveModel {
            key: Set(key.to_string()),
            payload: Set(payload),
            created_at: Set(created_at),
        };

        analysis::Entity::insert(model)
            .on_conflict(
                OnConflict::column(analysis::Column::Key)
                    .update_columns([analysis::Column::Payload, analysis::Column::CreatedAt])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        debug!(key, "cached record stored");
        Ok(())
    }

    pub async fn get(&self, key: &str) -> Result<Option<CachedRecord>, StorageError> {
        self.get_at(key, Utc::now()).await
    }

    /// Returns the record only while `now - created_at` is under the freshness window.
    pub async fn get_at(
        &self,
        key: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<CachedRecord>, StorageError> {
        let Some(model) = analysis::Entity::find_by_id(key.to_string())
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        if now.signed_duration_since(model.created_at) < self.freshness {
            Ok(Some(CachedRecord {
                payload: model.payload,
                timestamp: model.created_at,
            }))
        } else {
            debug!(key, "cached record expired");
            Ok(None)
        }
    }
}
