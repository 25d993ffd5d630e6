//! Persistent Verdict Store
//!
//! SQLite-backed cache of immutable verdicts, keyed by normalized token
//! address. The primary-key constraint is the single cross-request
//! contention point: concurrent inserts for the same address resolve inside
//! the store (`ON CONFLICT DO NOTHING`), never via application-level locking,
//! so unrelated addresses are never serialized against each other.
//!
//! Uses `sqlx::query()` runtime queries; the schema is created on connect.
//! There is no update or expiry path - a verdict, once written, is read-only.

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

use crate::models::errors::{AppError, AppResult, ErrorCode};
use crate::models::types::{normalize_address, Verdict};

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS verdicts (\
     token_address TEXT PRIMARY KEY, \
     is_honeypot INTEGER NOT NULL, \
     reasons TEXT NOT NULL, \
     created_at INTEGER NOT NULL)";

/// Outcome of an insert attempt against the uniqueness constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// This call created the row
    Inserted,
    /// Another call won the race; the stored verdict is authoritative
    AlreadyExists,
}

/// SQLite-backed verdict cache.
#[derive(Clone)]
pub struct VerdictStore {
    pool: SqlitePool,
}

impl VerdictStore {
    /// Open (or create) the store at the given file path.
    pub async fn connect(db_path: &str) -> AppResult<Self> {
        let store = Self::connect_url(&format!("sqlite:{}?mode=rwc", db_path)).await?;
        info!("💾 Verdict store ready at {}", db_path);
        Ok(store)
    }

    /// An in-memory store, for tests.
    pub async fn in_memory() -> AppResult<Self> {
        Self::connect_url("sqlite::memory:").await
    }

    async fn connect_url(url: &str) -> AppResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1) // SQLite is single-writer
            .connect(url)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorCode::CacheError, "failed to open verdict store", e)
            })?;

        sqlx::query(CREATE_TABLE_SQL).execute(&pool).await?;

        Ok(Self { pool })
    }

    /// Look up a prior verdict by token address (normalized before lookup).
    pub async fn get(&self, token_address: &str) -> AppResult<Option<Verdict>> {
        let key = normalize_address(token_address);

        let row = sqlx::query(
            "SELECT token_address, is_honeypot, reasons, created_at \
             FROM verdicts WHERE token_address = ?",
        )
        .bind(&key)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            debug!("📭 verdict cache miss: {}", key);
            return Ok(None);
        };

        let reasons: Vec<u32> =
            serde_json::from_str(&row.get::<String, _>("reasons")).map_err(|e| {
                AppError::with_source(ErrorCode::CacheError, "stored reasons are not valid JSON", e)
            })?;

        Ok(Some(Verdict {
            token_address: row.get("token_address"),
            is_honeypot: row.get::<i64, _>("is_honeypot") != 0,
            reasons,
            created_at: row.get("created_at"),
        }))
    }

    /// Insert a verdict, respecting the per-address uniqueness constraint.
    ///
    /// Losers of a duplicate-insert race get `AlreadyExists` and are expected
    /// to re-read; the store never raises on an ordinary duplicate.
    pub async fn insert(&self, verdict: &Verdict) -> AppResult<InsertOutcome> {
        let key = normalize_address(&verdict.token_address);
        let reasons = serde_json::to_string(&verdict.reasons).map_err(|e| {
            AppError::with_source(ErrorCode::CacheError, "failed to encode reasons", e)
        })?;

        let result = sqlx::query(
            "INSERT INTO verdicts (token_address, is_honeypot, reasons, created_at) \
             VALUES (?, ?, ?, ?) \
             ON CONFLICT(token_address) DO NOTHING",
        )
        .bind(&key)
        .bind(verdict.is_honeypot as i64)
        .bind(&reasons)
        .bind(verdict.created_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            debug!("verdict already stored for {}", key);
            Ok(InsertOutcome::AlreadyExists)
        } else {
            info!("💾 verdict stored: {} (honeypot: {})", key, verdict.is_honeypot);
            Ok(InsertOutcome::Inserted)
        }
    }

    /// Number of stored verdicts.
    pub async fn count(&self) -> AppResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM verdicts")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict(address: &str, reasons: Vec<u32>) -> Verdict {
        Verdict::from_reasons(address, reasons)
    }

    #[tokio::test]
    async fn test_insert_and_get_roundtrip() {
        let store = VerdictStore::in_memory().await.unwrap();
        let v = verdict("0x1111111111111111111111111111111111111111", vec![1, 3]);

        assert_eq!(store.insert(&v).await.unwrap(), InsertOutcome::Inserted);

        let stored = store
            .get("0x1111111111111111111111111111111111111111")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored, v);
    }

    #[tokio::test]
    async fn test_get_miss_returns_none() {
        let store = VerdictStore::in_memory().await.unwrap();
        let got = store
            .get("0x2222222222222222222222222222222222222222")
            .await
            .unwrap();
        assert!(got.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_insert_is_already_exists() {
        let store = VerdictStore::in_memory().await.unwrap();
        let first = verdict("0x1111111111111111111111111111111111111111", vec![0]);
        let second = verdict("0x1111111111111111111111111111111111111111", vec![2]);

        assert_eq!(store.insert(&first).await.unwrap(), InsertOutcome::Inserted);
        assert_eq!(
            store.insert(&second).await.unwrap(),
            InsertOutcome::AlreadyExists
        );

        // First write wins; exactly one row exists
        assert_eq!(store.count().await.unwrap(), 1);
        let stored = store.get(&first.token_address).await.unwrap().unwrap();
        assert_eq!(stored.reasons, vec![0]);
    }

    #[tokio::test]
    async fn test_lookup_is_case_insensitive() {
        let store = VerdictStore::in_memory().await.unwrap();
        let v = verdict("0xDAC17F958D2ee523a2206206994597C13D831ec7", vec![0]);
        store.insert(&v).await.unwrap();

        let stored = store
            .get("0xDAC17F958D2EE523A2206206994597C13D831EC7")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            stored.token_address,
            "0xdac17f958d2ee523a2206206994597c13d831ec7"
        );
    }

    #[tokio::test]
    async fn test_stored_verdict_holds_invariant() {
        let store = VerdictStore::in_memory().await.unwrap();
        for (addr, reasons) in [
            ("0x0000000000000000000000000000000000000001", vec![0]),
            ("0x0000000000000000000000000000000000000002", vec![1]),
            ("0x0000000000000000000000000000000000000003", vec![2, 5, 2]),
        ] {
            store.insert(&verdict(addr, reasons)).await.unwrap();
            let stored = store.get(addr).await.unwrap().unwrap();
            assert_eq!(stored.is_honeypot, stored.reasons != vec![0]);
        }
    }
}
