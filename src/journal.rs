//! Submission pipeline: validate, classify, record.
//!
//! [`submit`] hands the classification result straight back to its caller
//! alongside the stored entry. There is no registered result handler.
//!
//! User text is never logged; only ids, labels and counts.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::lexicon::classify;
use crate::model::{MoodAnalysis, MoodEntry, MoodHistory};
use crate::storage::Storage;

/// Errors from [`submit`].
#[derive(Error, Debug)]
pub enum JournalError {
    /// The text was empty or whitespace-only.
    #[error("mood entry text is empty")]
    EmptyInput,

    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

/// What a caller gets back from a successful submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub analysis: MoodAnalysis,
    pub entry: MoodEntry,
    pub total_entries: usize,
}

/// Classify `text` and append it to the journal.
///
/// Leading and trailing whitespace is trimmed before classification and
/// storage. Blank text is rejected without touching storage.
pub async fn submit(
    storage: &Storage,
    text: &str,
    now: DateTime<Utc>,
) -> Result<Submission, JournalError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(JournalError::EmptyInput);
    }

    let analysis = classify(text);

    let (entry, history) = storage
        .record(|history| MoodEntry {
            id: next_entry_id(history, now),
            timestamp: now,
            user_input: text.to_string(),
            mood: analysis.mood,
            confidence: analysis.confidence,
            tips: analysis.tips.clone(),
        })
        .await?;

    info!(
        entry_id = %entry.id,
        mood = %entry.mood,
        confidence = entry.confidence,
        total_entries = history.len(),
        "Mood entry recorded"
    );

    Ok(Submission {
        analysis,
        entry,
        total_entries: history.len(),
    })
}

/// Epoch milliseconds of `now`, bumped past the previous entry's id if needed.
///
/// Ids that aren't numeric (older data) are ignored for the comparison, as is
/// a previous id of `i64::MAX`, which has no successor.
pub fn next_entry_id(history: &MoodHistory, now: DateTime<Utc>) -> String {
    let candidate = now.timestamp_millis();
    let previous = history
        .last()
        .and_then(|entry| entry.id.parse::<i64>().ok());

    match previous {
        Some(prev) if prev >= candidate => prev
            .checked_add(1)
            .unwrap_or(candidate)
            .to_string(),
        _ => candidate.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MoodLabel;
    use chrono::TimeZone;

    async fn setup_test_storage() -> Storage {
        Storage::new("sqlite::memory:").await.unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
    }

    #[tokio::test]
    async fn test_submit_records_entry() {
        let storage = setup_test_storage().await;

        let submission = submit(&storage, "  I had a great day  ", now())
            .await
            .unwrap();

        assert_eq!(submission.analysis.mood, MoodLabel::Happy);
        assert_eq!(submission.entry.user_input, "I had a great day");
        assert_eq!(submission.entry.id, "1705314600000");
        assert_eq!(submission.entry.tips, submission.analysis.tips);
        assert_eq!(submission.total_entries, 1);

        let history = storage.load().await.unwrap();
        assert_eq!(history.entries(), &[submission.entry]);
    }

    #[tokio::test]
    async fn test_submit_rejects_blank_text() {
        let storage = setup_test_storage().await;

        let err = submit(&storage, "   \n\t", now()).await.unwrap_err();

        assert!(matches!(err, JournalError::EmptyInput));
        assert!(storage.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ids_stay_unique_within_one_millisecond() {
        let storage = setup_test_storage().await;

        let first = submit(&storage, "calm", now()).await.unwrap();
        let second = submit(&storage, "calm", now()).await.unwrap();

        assert_eq!(first.entry.id, "1705314600000");
        assert_eq!(second.entry.id, "1705314600001");
        assert_eq!(second.total_entries, 2);
    }

    #[tokio::test]
    async fn test_concurrent_submissions_are_serialized() {
        let storage = setup_test_storage().await;

        let mut handles = Vec::new();
        for _ in 0..10 {
            let storage = storage.clone();
            handles.push(tokio::spawn(async move {
                submit(&storage, "worried", now()).await.unwrap()
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let history = storage.load().await.unwrap();
        assert_eq!(history.len(), 10);

        let mut ids: Vec<&str> = history.entries().iter().map(|e| e.id.as_str()).collect();
        ids.dedup();
        assert_eq!(ids.len(), 10);
    }

    fn history_with_id(id: &str) -> MoodHistory {
        MoodHistory::from(vec![MoodEntry {
            id: id.to_string(),
            timestamp: now(),
            user_input: "x".to_string(),
            mood: MoodLabel::Neutral,
            confidence: 0.6,
            tips: vec!["t".to_string()],
        }])
    }

    #[test]
    fn test_next_entry_id_bumps_past_future_id() {
        let history = history_with_id("1705314700000");

        assert_eq!(next_entry_id(&history, now()), "1705314700001");
    }

    #[test]
    fn test_next_entry_id_saturated_previous_id() {
        let history = history_with_id(&i64::MAX.to_string());

        assert_eq!(next_entry_id(&history, now()), "1705314600000");
    }

    #[test]
    fn test_next_entry_id_ignores_non_numeric_ids() {
        let history = history_with_id("legacy-id");

        assert_eq!(next_entry_id(&history, now()), "1705314600000");
    }

    #[tokio::test]
    async fn test_submit_after_saturated_id() {
        let storage = setup_test_storage().await;
        let stored = history_with_id(&i64::MAX.to_string());
        storage.persist(&stored).await.unwrap();

        let submission = submit(&storage, "calm", now()).await.unwrap();

        assert_eq!(submission.entry.id, "1705314600000");
        assert_eq!(submission.total_entries, 2);
    }
}
