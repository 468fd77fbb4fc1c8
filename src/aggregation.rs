//! Analytics over the mood history.
//!
//! Everything here is a pure function of a [`MoodHistory`] and a reference
//! timestamp. Nothing is cached or persisted; callers recompute on demand.
//!
//! Functions that would divide by the entry count return `None` on an empty
//! history instead of producing a meaningless average.

use chrono::{DateTime, Datelike, Utc};

use crate::model::{
    ChartPoint, DerivedInsights, HistoryView, MoodCount, MoodEntry, MoodHistory, MoodLabel,
    QuickStats, TimeRange, Trend, WeekdayMood,
};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Number of most recent entries shown on the history chart.
const CHART_POINTS: usize = 14;

/// Number of most recent entries considered for the positive streak.
const STREAK_WINDOW: usize = 7;

const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Whole days elapsed between `timestamp` and `now`, floored.
pub fn days_since(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - timestamp).num_milliseconds().div_euclid(MILLIS_PER_DAY)
}

/// Entries no more than `days` whole days old, in history order.
pub fn within_days(entries: &[MoodEntry], days: i64, now: DateTime<Utc>) -> Vec<&MoodEntry> {
    entries
        .iter()
        .filter(|entry| days_since(entry.timestamp, now) <= days)
        .collect()
}

/// Per-label counts and rounded percentages, in first-seen order.
pub fn mood_distribution<'a, I>(entries: I) -> Vec<MoodCount>
where
    I: IntoIterator<Item = &'a MoodEntry>,
{
    let mut counts: Vec<(MoodLabel, usize)> = Vec::new();
    let mut total = 0usize;

    for entry in entries {
        total += 1;
        match counts.iter_mut().find(|(mood, _)| *mood == entry.mood) {
            Some((_, count)) => *count += 1,
            None => counts.push((entry.mood, 1)),
        }
    }

    counts
        .into_iter()
        .map(|(mood, count)| MoodCount {
            mood,
            count,
            percentage: (100.0 * count as f64 / total as f64).round() as u32,
        })
        .collect()
}

/// The label with the highest count. Ties go to the first-seen label.
pub fn most_common_mood(distribution: &[MoodCount]) -> Option<MoodLabel> {
    distribution
        .iter()
        .fold(None::<&MoodCount>, |best, candidate| match best {
            Some(b) if b.count >= candidate.count => Some(b),
            _ => Some(candidate),
        })
        .map(|c| c.mood)
}

/// Mean mood score, or `None` when there are no entries.
pub fn average_score<'a, I>(entries: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a MoodEntry>,
{
    let (sum, count) = entries
        .into_iter()
        .fold((0u32, 0u32), |(sum, count), entry| {
            (sum + u32::from(entry.mood.score()), count + 1)
        });

    if count == 0 {
        None
    } else {
        Some(f64::from(sum) / f64::from(count))
    }
}

/// Average mood score per weekday, Sunday first.
pub fn weekly_pattern(entries: &[MoodEntry]) -> Vec<WeekdayMood> {
    DAY_NAMES
        .iter()
        .enumerate()
        .map(|(day_index, &day)| {
            let day_entries = entries.iter().filter(|entry| {
                entry.timestamp.weekday().num_days_from_sunday() as usize == day_index
            });
            let count = day_entries.clone().count();
            let avg_mood = average_score(day_entries).map(round_one).unwrap_or(0.0);

            WeekdayMood {
                day,
                avg_mood,
                count,
            }
        })
        .collect()
}

/// Compare the first and last entry of a window.
///
/// Returns the direction and the absolute score difference. Fewer than two
/// entries is always `Stable`.
pub fn trend(window: &[&MoodEntry]) -> (Trend, u8) {
    let [first, .., last] = window else {
        return (Trend::Stable, 0);
    };

    let (from, to) = (first.mood.score(), last.mood.score());
    let direction = match to.cmp(&from) {
        std::cmp::Ordering::Greater => Trend::Improving,
        std::cmp::Ordering::Less => Trend::Declining,
        std::cmp::Ordering::Equal => Trend::Stable,
    };

    (direction, to.abs_diff(from))
}

/// Positive streak over the most recent entries.
///
/// Takes the last seven entries, oldest first, and walks backward from the
/// newest pair counting steps where the later score is `>=` the earlier one.
/// The first decrease ends the walk. The count starts at one, and histories
/// with fewer than two entries have no streak.
pub fn positive_streak(entries: &[MoodEntry]) -> usize {
    if entries.len() < 2 {
        return 0;
    }

    let recent = &entries[entries.len().saturating_sub(STREAK_WINDOW)..];
    let scores: Vec<u8> = recent.iter().map(|e| e.mood.score()).collect();

    1 + scores
        .windows(2)
        .rev()
        .take_while(|pair| pair[1] >= pair[0])
        .count()
}

/// Guidance shown alongside a trend on the insights page.
pub fn focus_areas(trend: Trend) -> [&'static str; 3] {
    match trend {
        Trend::Declining => [
            "Consider scheduling regular self-care activities",
            "Practice daily mindfulness or meditation",
            "Reach out to friends or family for support",
        ],
        Trend::Improving => [
            "Continue your current positive practices",
            "Set new wellness goals to maintain momentum",
            "Share your success strategies with others",
        ],
        Trend::Stable => [
            "Explore new activities to boost mood variety",
            "Set small challenges for personal growth",
            "Maintain your current healthy routines",
        ],
    }
}

/// Build the insights page projection.
///
/// Returns `None` for an empty history.
pub fn analyze(history: &MoodHistory, now: DateTime<Utc>) -> Option<DerivedInsights> {
    let entries = history.entries();
    let average_mood = average_score(entries)?;

    let last_7 = within_days(entries, 7, now);
    let last_30 = within_days(entries, 30, now);

    let distribution = mood_distribution(entries);
    let most_common = most_common_mood(&distribution)?;
    let (direction, trend_value) = trend(&last_7);

    Some(DerivedInsights {
        total_entries: entries.len(),
        last_7_days: last_7.len(),
        last_30_days: last_30.len(),
        most_common_mood: most_common,
        mood_distribution: distribution,
        weekly_pattern: weekly_pattern(entries),
        trend: direction,
        trend_value,
        average_mood,
    })
}

/// Build the home page headline numbers.
pub fn quick_stats(history: &MoodHistory, now: DateTime<Utc>) -> Option<QuickStats> {
    let entries = history.entries();
    let most_common = most_common_mood(&mood_distribution(entries))?;

    Some(QuickStats {
        total_entries: entries.len(),
        this_week: within_days(entries, 7, now).len(),
        most_common,
    })
}

/// Build the time-ranged history panel.
///
/// The distribution covers the whole filtered range; the chart and its
/// average cover only the last fourteen entries of it. The streak always
/// looks at the full history.
pub fn history_view(
    history: &MoodHistory,
    range: TimeRange,
    now: DateTime<Utc>,
) -> Option<HistoryView> {
    let entries = history.entries();
    if entries.is_empty() {
        return None;
    }

    let filtered: Vec<&MoodEntry> = match range.days() {
        Some(days) => within_days(entries, days, now),
        None => entries.iter().collect(),
    };

    let chart_entries = &filtered[filtered.len().saturating_sub(CHART_POINTS)..];
    let chart = chart_entries
        .iter()
        .map(|entry| ChartPoint {
            day: entry.timestamp.format("%a").to_string(),
            date: entry.timestamp.format("%b %-d").to_string(),
            mood: entry.mood,
            confidence: entry.confidence,
            mood_score: entry.mood.score(),
        })
        .collect();

    let average_mood = average_score(chart_entries.iter().copied())
        .map(round_one)
        .unwrap_or(0.0);

    Some(HistoryView {
        range,
        chart,
        mood_distribution: mood_distribution(filtered.iter().copied()),
        average_mood,
        streak: positive_streak(entries),
        total_entries: entries.len(),
    })
}

fn round_one(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
