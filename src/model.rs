//! Data models for MindMate.
//!
//! # Persisted Format
//!
//! [`MoodEntry`] and [`MoodHistory`] define the on-disk shape of the journal:
//! a JSON array of camelCase objects with ISO-8601 timestamps. There is no
//! version field, so deserialization is deliberately lenient where it can be
//! (unknown mood labels collapse to `neutral`).
//!
//! The remaining types are read-only projections computed by
//! [`crate::aggregation`] and the request/response bodies of [`crate::api`].

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One of the eight fixed emotion categories an entry can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodLabel {
    Happy,
    Sad,
    Anxious,
    Calm,
    Excited,
    Angry,
    Neutral,
    Stressed,
}

impl MoodLabel {
    /// Every label, in declaration order.
    pub const ALL: [MoodLabel; 8] = [
        MoodLabel::Happy,
        MoodLabel::Sad,
        MoodLabel::Anxious,
        MoodLabel::Calm,
        MoodLabel::Excited,
        MoodLabel::Angry,
        MoodLabel::Neutral,
        MoodLabel::Stressed,
    ];

    /// Lowercase wire name of the label.
    pub fn as_str(self) -> &'static str {
        match self {
            MoodLabel::Happy => "happy",
            MoodLabel::Sad => "sad",
            MoodLabel::Anxious => "anxious",
            MoodLabel::Calm => "calm",
            MoodLabel::Excited => "excited",
            MoodLabel::Angry => "angry",
            MoodLabel::Neutral => "neutral",
            MoodLabel::Stressed => "stressed",
        }
    }

    /// Parse a label case-insensitively.
    ///
    /// Anything unrecognized becomes `Neutral`, so an entry never carries an
    /// empty or unknown mood.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "happy" => MoodLabel::Happy,
            "sad" => MoodLabel::Sad,
            "anxious" => MoodLabel::Anxious,
            "calm" => MoodLabel::Calm,
            "excited" => MoodLabel::Excited,
            "angry" => MoodLabel::Angry,
            "stressed" => MoodLabel::Stressed,
            _ => MoodLabel::Neutral,
        }
    }

    /// Fixed 1-9 mood score used for averages, trends and streaks.
    ///
    /// | label    | score |
    /// |----------|-------|
    /// | happy    | 9     |
    /// | excited  | 8     |
    /// | calm     | 7     |
    /// | neutral  | 5     |
    /// | anxious  | 3     |
    /// | sad      | 2     |
    /// | angry    | 2     |
    /// | stressed | 1     |
    pub fn score(self) -> u8 {
        match self {
            MoodLabel::Happy => 9,
            MoodLabel::Excited => 8,
            MoodLabel::Calm => 7,
            MoodLabel::Neutral => 5,
            MoodLabel::Anxious => 3,
            MoodLabel::Sad | MoodLabel::Angry => 2,
            MoodLabel::Stressed => 1,
        }
    }
}

impl fmt::Display for MoodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MoodLabel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(MoodLabel::parse(&raw))
    }
}

/// A single journaled observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    /// Opaque identifier; epoch milliseconds at creation, strictly increasing
    /// within one history.
    pub id: String,

    /// Creation time (UTC). All time-window filtering keys off this.
    pub timestamp: DateTime<Utc>,

    /// The submitted text, trimmed but otherwise verbatim.
    pub user_input: String,

    pub mood: MoodLabel,

    /// Heuristic confidence in `[0, 1]`.
    pub confidence: f64,

    /// Coping suggestions shown for this entry. Never empty.
    pub tips: Vec<String>,
}

/// The ordered, append-only journal for this device.
///
/// Insertion order is chronological order. The only mutation is
/// [`MoodHistory::with_entry`], which yields a new snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoodHistory {
    entries: Vec<MoodEntry>,
}

impl MoodHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[MoodEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&MoodEntry> {
        self.entries.last()
    }

    pub fn into_entries(self) -> Vec<MoodEntry> {
        self.entries
    }

    /// Return a snapshot with `entry` appended at the end.
    pub fn with_entry(mut self, entry: MoodEntry) -> Self {
        self.entries.push(entry);
        self
    }
}

impl From<Vec<MoodEntry>> for MoodHistory {
    fn from(entries: Vec<MoodEntry>) -> Self {
        Self { entries }
    }
}

/// Result of classifying one piece of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodAnalysis {
    pub mood: MoodLabel,
    pub confidence: f64,
    pub tips: Vec<String>,
}

/// Envelope returned by the remote analyze endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<MoodAnalysis>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Direction of mood change across the last 7 days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Latest entry in the window scores higher than the earliest.
    Improving,
    /// Latest entry in the window scores lower than the earliest.
    Declining,
    /// Equal scores, or fewer than two entries in the window.
    Stable,
}

/// Count and share of one label within a set of entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodCount {
    pub mood: MoodLabel,
    pub count: usize,
    /// `round(100 * count / total)`, computed independently per label.
    pub percentage: u32,
}

/// Average mood for one day of the week.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekdayMood {
    /// Full day name, "Sunday" through "Saturday".
    pub day: &'static str,
    /// Average score rounded to one decimal, 0 when there are no entries.
    pub avg_mood: f64,
    pub count: usize,
}

/// Everything the insights page shows, rebuilt from the full history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedInsights {
    pub total_entries: usize,
    pub last_7_days: usize,
    pub last_30_days: usize,
    pub most_common_mood: MoodLabel,
    pub mood_distribution: Vec<MoodCount>,
    /// Indexed Sunday = 0 .. Saturday = 6.
    pub weekly_pattern: Vec<WeekdayMood>,
    pub trend: Trend,
    /// Absolute score difference behind `trend`.
    pub trend_value: u8,
    /// Mean score over the whole history.
    pub average_mood: f64,
}

/// Headline numbers for the home page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickStats {
    pub total_entries: usize,
    pub this_week: usize,
    pub most_common: MoodLabel,
}

/// Time range selector for the history view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeRange {
    #[default]
    #[serde(rename = "7d")]
    Week,
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "all")]
    All,
}

impl TimeRange {
    /// Window length in days, or `None` for the whole history.
    pub fn days(self) -> Option<i64> {
        match self {
            TimeRange::Week => Some(7),
            TimeRange::Month => Some(30),
            TimeRange::All => None,
        }
    }
}

/// One point on the history chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    /// Short weekday, e.g. "Mon".
    pub day: String,
    /// Short date, e.g. "Jan 15".
    pub date: String,
    pub mood: MoodLabel,
    pub confidence: f64,
    pub mood_score: u8,
}

/// The time-ranged projection behind the history panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryView {
    pub range: TimeRange,
    /// The last 14 entries of the filtered set.
    pub chart: Vec<ChartPoint>,
    pub mood_distribution: Vec<MoodCount>,
    /// Mean score over `chart`, rounded to one decimal.
    pub average_mood: f64,
    /// Positive streak over the whole history, not just the range.
    pub streak: usize,
    pub total_entries: usize,
}

/// Request body for POST /entries.
#[derive(Debug, Clone, Deserialize)]
pub struct EntryRequest {
    pub text: String,
}

/// Query parameters for GET /history.
#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub range: TimeRange,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_scores() {
        assert_eq!(MoodLabel::Happy.score(), 9);
        assert_eq!(MoodLabel::Excited.score(), 8);
        assert_eq!(MoodLabel::Calm.score(), 7);
        assert_eq!(MoodLabel::Neutral.score(), 5);
        assert_eq!(MoodLabel::Anxious.score(), 3);
        assert_eq!(MoodLabel::Sad.score(), 2);
        assert_eq!(MoodLabel::Angry.score(), 2);
        assert_eq!(MoodLabel::Stressed.score(), 1);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(MoodLabel::parse("HAPPY"), MoodLabel::Happy);
        assert_eq!(MoodLabel::parse(" Stressed "), MoodLabel::Stressed);
    }

    #[test]
    fn test_unknown_label_is_neutral_with_default_score() {
        let label = MoodLabel::parse("melancholic");
        assert_eq!(label, MoodLabel::Neutral);
        assert_eq!(label.score(), 5);

        let label: MoodLabel = serde_json::from_str("\"\"").unwrap();
        assert_eq!(label, MoodLabel::Neutral);
    }

    #[test]
    fn test_label_round_trips_through_wire_name() {
        for label in MoodLabel::ALL {
            let json = serde_json::to_string(&label).unwrap();
            assert_eq!(json, format!("\"{}\"", label.as_str()));
            assert_eq!(MoodLabel::parse(label.as_str()), label);
        }
    }

    #[test]
    fn test_entry_uses_camel_case_fields() {
        let json = r#"{
            "id": "1705314600000",
            "timestamp": "2024-01-15T10:30:00.000Z",
            "userInput": "had a great day",
            "mood": "happy",
            "confidence": 0.8,
            "tips": ["a", "b", "c"]
        }"#;

        let entry: MoodEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.user_input, "had a great day");
        assert_eq!(entry.mood, MoodLabel::Happy);

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["userInput"], "had a great day");
        assert!(value.get("user_input").is_none());
    }

    #[test]
    fn test_history_with_entry_appends_at_end() {
        let entry = |id: &str| MoodEntry {
            id: id.to_string(),
            timestamp: Utc::now(),
            user_input: "x".to_string(),
            mood: MoodLabel::Calm,
            confidence: 0.8,
            tips: vec!["t".to_string()],
        };

        let history = MoodHistory::new().with_entry(entry("1")).with_entry(entry("2"));

        assert_eq!(history.len(), 2);
        assert_eq!(history.last().unwrap().id, "2");
    }

    #[test]
    fn test_time_range_wire_names() {
        let query: HistoryQuery = serde_json::from_str(r#"{"range":"30d"}"#).unwrap();
        assert_eq!(query.range, TimeRange::Month);
        assert_eq!(TimeRange::default(), TimeRange::Week);
        assert_eq!(TimeRange::All.days(), None);
    }
}
