// src/store.rs
//! Snapshot persistence: one row per `(engine, period)`, replaced by upsert.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use metrics::counter;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use thiserror::Error;

use crate::types::{StoredTrend, TrendSnapshot};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("encoding snapshot failed: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("decoding stored row failed: {0}")]
    Decode(String),
}

/// Write/read path for trend snapshots.
#[async_trait]
pub trait TrendStore: Send + Sync {
    /// Replace whatever is stored under `(engine, period)` with `payload`.
    async fn save(&self, engine: &str, period: &str, payload: &TrendSnapshot) -> StoreResult<()>;

    /// Most recent row for the key, `None` when nothing was stored yet.
    async fn latest(&self, engine: &str, period: &str) -> StoreResult<Option<StoredTrend>>;
}

/// SQLite-backed store. The `UNIQUE(engine, period)` constraint plus
/// `ON CONFLICT .. DO UPDATE` makes every save a single statement, so a key
/// never goes through a zero-row state.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connect (creating the file and its directory if needed) and ensure the schema.
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        if let Some(path) = file_path(database_url) {
            if let Some(parent) = std::path::Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent)
                        .await
                        .map_err(|e| StoreError::Database(sqlx::Error::Io(e)))?;
                }
            }
        }

        let opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().max_connections(4).connect_with(opts).await?;
        let store = Self { pool };
        store.initialize_schema().await?;
        Ok(store)
    }

    /// Private in-memory database, used by tests and local demos.
    pub async fn in_memory() -> StoreResult<Self> {
        let opts = SqliteConnectOptions::from_str("sqlite::memory:")?;
        // A single connection: every in-memory connection is its own database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opts)
            .await?;
        let store = Self { pool };
        store.initialize_schema().await?;
        Ok(store)
    }

    async fn initialize_schema(&self) -> StoreResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS trends (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                engine TEXT NOT NULL,
                period TEXT NOT NULL,
                data TEXT NOT NULL,
                created_at TEXT NOT NULL,
                UNIQUE (engine, period)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Number of rows stored under a key (0 or 1).
    pub async fn count(&self, engine: &str, period: &str) -> StoreResult<i64> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM trends WHERE engine = ? AND period = ?")
            .bind(engine)
            .bind(period)
            .fetch_one(&self.pool)
            .await?;
        Ok(n)
    }
}

#[async_trait]
impl TrendStore for SqliteStore {
    async fn save(&self, engine: &str, period: &str, payload: &TrendSnapshot) -> StoreResult<()> {
        let data = serde_json::to_string(payload).map_err(StoreError::Encode)?;
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO trends (engine, period, data, created_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (engine, period)
            DO UPDATE SET data = excluded.data, created_at = excluded.created_at
            "#,
        )
        .bind(engine)
        .bind(period)
        .bind(&data)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        counter!("store_writes_total").increment(1);
        tracing::info!(target: "store", engine, period, "trend snapshot saved");
        Ok(())
    }

    async fn latest(&self, engine: &str, period: &str) -> StoreResult<Option<StoredTrend>> {
        let row = sqlx::query(
            r#"
            SELECT id, engine, period, data, created_at FROM trends
            WHERE engine = ? AND period = ?
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(engine)
        .bind(period)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let data: String = row.try_get("data")?;
        let created_at: String = row.try_get("created_at")?;
        let data: TrendSnapshot =
            serde_json::from_str(&data).map_err(|e| StoreError::Decode(e.to_string()))?;
        let created_at = DateTime::parse_from_rfc3339(&created_at)
            .map_err(|e| StoreError::Decode(e.to_string()))?
            .with_timezone(&Utc);

        Ok(Some(StoredTrend {
            id: row.try_get("id")?,
            engine: row.try_get("engine")?,
            period: row.try_get("period")?,
            created_at,
            data,
        }))
    }
}

/// Filesystem path of a `sqlite:` URL, if it names a file.
fn file_path(database_url: &str) -> Option<&str> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or(rest);
    if path.is_empty() || path == ":memory:" {
        None
    } else {
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{KeywordScore, Source};
    use std::collections::BTreeMap;

    fn snapshot(engine: &str, keyword: &str) -> TrendSnapshot {
        let ks = KeywordScore {
            keyword: keyword.into(),
            count: 1,
            score: 3.0,
            source: Source::News,
        };
        let mut sources = BTreeMap::new();
        sources.insert(Source::News, vec![ks.clone()]);
        TrendSnapshot {
            engine: engine.into(),
            period: "realtime".into(),
            collected_at: Utc::now(),
            sources,
            combined: vec![KeywordScore {
                source: Source::Combined,
                ..ks
            }],
        }
    }

    #[test]
    fn file_path_from_url() {
        assert_eq!(file_path("sqlite://data/trends.db"), Some("data/trends.db"));
        assert_eq!(file_path("sqlite:trends.db?mode=rwc"), Some("trends.db"));
        assert_eq!(file_path("sqlite::memory:"), None);
        assert_eq!(file_path("postgres://x"), None);
    }

    #[tokio::test]
    async fn latest_is_none_before_first_save() {
        let store = SqliteStore::in_memory().await.unwrap();
        assert!(store.latest("hybrid", "realtime").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_then_latest_round_trips_payload() {
        let store = SqliteStore::in_memory().await.unwrap();
        let snap = snapshot("hybrid", "부동산");
        store.save("hybrid", "realtime", &snap).await.unwrap();

        let row = store.latest("hybrid", "realtime").await.unwrap().unwrap();
        assert_eq!(row.engine, "hybrid");
        assert_eq!(row.period, "realtime");
        assert_eq!(row.data, snap);
    }

    #[tokio::test]
    async fn saving_twice_leaves_one_row() {
        let store = SqliteStore::in_memory().await.unwrap();
        let snap = snapshot("hybrid", "부동산");
        store.save("hybrid", "realtime", &snap).await.unwrap();
        store.save("hybrid", "realtime", &snap).await.unwrap();
        assert_eq!(store.count("hybrid", "realtime").await.unwrap(), 1);
        assert_eq!(store.latest("hybrid", "realtime").await.unwrap().unwrap().data, snap);
    }

    #[tokio::test]
    async fn save_replaces_previous_payload() {
        let store = SqliteStore::in_memory().await.unwrap();
        store.save("news", "realtime", &snapshot("news", "경제")).await.unwrap();
        let newer = snapshot("news", "교육");
        store.save("news", "realtime", &newer).await.unwrap();

        let row = store.latest("news", "realtime").await.unwrap().unwrap();
        assert_eq!(row.data.combined[0].keyword, "교육");
        assert_eq!(store.count("news", "realtime").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn keys_are_independent() {
        let store = SqliteStore::in_memory().await.unwrap();
        store.save("news", "realtime", &snapshot("news", "경제")).await.unwrap();
        store.save("news", "weekly", &snapshot("news", "교육")).await.unwrap();

        assert_eq!(
            store.latest("news", "weekly").await.unwrap().unwrap().data.combined[0].keyword,
            "교육"
        );
        assert!(store.latest("social", "realtime").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn file_database_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}/nested/trends.db", dir.path().display());
        let store = SqliteStore::connect(&url).await.unwrap();
        store.save("hybrid", "realtime", &snapshot("hybrid", "날씨")).await.unwrap();
        assert!(dir.path().join("nested/trends.db").exists());
    }
}
