//! SQLite-backed key-value storage for the mood journal.
//!
//! The whole history lives in a single row of `kv_store`, under
//! [`HISTORY_KEY`], as a JSON array. Every mutation rewrites that row in
//! full; there is no incremental persistence and no transaction log.
//!
//! # Corrupt Data
//!
//! A blob that fails to parse is treated as an empty history. The condition
//! is logged and the journal starts fresh. Only failures to reach the
//! database itself are returned as errors.

use std::sync::Arc;

use sqlx::Row;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::lexicon::tips_for;
use crate::model::{MoodEntry, MoodHistory};

/// Key under which the serialized history is stored.
pub const HISTORY_KEY: &str = "mindmate-mood-history";

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Storage {
    pool: SqlitePool,
    /// Serializes load -> append -> persist so only one writer runs at a time.
    write_lock: Arc<Mutex<()>>,
}

impl Storage {
    /// Create a new storage instance and initialize the schema.
    ///
    /// # Arguments
    ///
    /// * `database_url` - SQLite connection string (e.g., "sqlite:mindmate.db?mode=rwc" or "sqlite::memory:")
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let options = if database_url.contains(":memory:") {
            // Each connection to :memory: is a separate database; pin a single one.
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = options.connect(database_url).await?;

        let storage = Self {
            pool,
            write_lock: Arc::new(Mutex::new(())),
        };
        storage.initialize_schema().await?;

        Ok(storage)
    }

    /// Create the key-value table if it doesn't exist.
    async fn initialize_schema(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn read_blob(&self, key: &str) -> anyhow::Result<Option<String>> {
        let row = sqlx::query(
            r#"
            SELECT value FROM kv_store WHERE key = ?
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.get("value")))
    }

    async fn write_blob(&self, key: &str, value: &str) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value)
            VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Load the persisted history.
    ///
    /// Returns an empty history when nothing has been stored yet, or when the
    /// stored blob can't be parsed.
    pub async fn load(&self) -> anyhow::Result<MoodHistory> {
        let Some(blob) = self.read_blob(HISTORY_KEY).await? else {
            debug!("No stored mood history, starting empty");
            return Ok(MoodHistory::new());
        };

        match serde_json::from_str::<MoodHistory>(&blob) {
            Ok(history) => Ok(repair_entries(history)),
            Err(e) => {
                warn!(error = %e, "Failed to parse mood history, starting fresh");
                Ok(MoodHistory::new())
            }
        }
    }

    /// Serialize the full history, overwriting whatever was stored before.
    ///
    /// Waits for any in-flight [`Storage::record`] to finish first.
    pub async fn persist(&self, history: &MoodHistory) -> anyhow::Result<()> {
        let _guard = self.write_lock.lock().await;
        self.write_history(history).await
    }

    /// Unlocked write; callers must hold `write_lock`.
    async fn write_history(&self, history: &MoodHistory) -> anyhow::Result<()> {
        let blob = serde_json::to_string(history)?;
        self.write_blob(HISTORY_KEY, &blob).await
    }

    /// Append `entry` and persist the resulting history.
    pub async fn append(&self, entry: MoodEntry) -> anyhow::Result<MoodHistory> {
        let (_, history) = self.record(|_| entry).await?;
        Ok(history)
    }

    /// Build an entry from the current history, append it, and persist.
    ///
    /// `build` runs while the write lock is held, so it sees exactly the
    /// history the new entry will follow (needed for id assignment).
    pub async fn record<F>(&self, build: F) -> anyhow::Result<(MoodEntry, MoodHistory)>
    where
        F: FnOnce(&MoodHistory) -> MoodEntry,
    {
        let _guard = self.write_lock.lock().await;

        let history = self.load().await?;
        let entry = build(&history);
        let history = history.with_entry(entry.clone());
        self.write_history(&history).await?;

        debug!(entry_id = %entry.id, total = history.len(), "Mood history persisted");

        Ok((entry, history))
    }
}

/// Restore entry invariants that older or hand-edited blobs may violate:
/// empty tips get the label's fixed list, confidence is clamped to `[0, 1]`.
fn repair_entries(history: MoodHistory) -> MoodHistory {
    let mut repaired = 0usize;

    let entries: Vec<MoodEntry> = history
        .into_entries()
        .into_iter()
        .map(|mut entry| {
            let confidence = entry.confidence.clamp(0.0, 1.0);
            if entry.tips.is_empty() || confidence != entry.confidence {
                repaired += 1;
            }
            if entry.tips.is_empty() {
                entry.tips = tips_for(entry.mood).iter().map(|t| t.to_string()).collect();
            }
            entry.confidence = confidence;
            entry
        })
        .collect();

    if repaired > 0 {
        warn!(repaired, "Repaired stored mood entries");
    }

    MoodHistory::from(entries)
}
