// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Derived training analytics.
//!
//! Everything here is a pure function of the current workout collection and
//! a reference date; the store recomputes the full snapshot after every
//! successful mutation, so there is no cached state that can go stale.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::models::WorkoutRecord;
use crate::time_utils::{day_label, iso_date};

/// Intensity category a free-text intensity label is classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Intensity {
    Low,
    Medium,
    High,
    Other,
}

impl Intensity {
    /// Fixed display order of the breakdown.
    pub const ALL: [Intensity; 4] = [
        Intensity::Low,
        Intensity::Medium,
        Intensity::High,
        Intensity::Other,
    ];

    /// Classify a free-text label by case-insensitive prefix on the trimmed
    /// string: "low…" / "med…" / "high…", anything else is Other.
    pub fn classify(label: &str) -> Self {
        let normalized = label.trim().to_lowercase();
        if normalized.starts_with("low") {
            Intensity::Low
        } else if normalized.starts_with("med") {
            Intensity::Medium
        } else if normalized.starts_with("high") {
            Intensity::High
        } else {
            Intensity::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Intensity::Low => "Low",
            Intensity::Medium => "Medium",
            Intensity::High => "High",
            Intensity::Other => "Other",
        }
    }
}

/// One day of the 7-day series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayMinutes {
    /// Short weekday label ("Mon", "Tue", ...)
    pub day_label: String,
    /// Total minutes logged on that calendar day
    pub minutes: u32,
}

/// Minutes logged per intensity category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntensityMinutes {
    pub category: Intensity,
    pub minutes: u32,
}

/// The full set of derived statistics for the current collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsSnapshot {
    pub total_workouts: u32,
    pub total_minutes: u32,
    /// Mean duration, rounded to the nearest minute; 0 for an empty collection
    pub average_duration_minutes: u32,
    pub todays_minutes: u32,
    /// Progress toward the daily goal, clamped to [0, 100]
    pub goal_progress_percent: u32,
    /// Exactly 7 entries, oldest to newest, ending today
    pub weekly_series: Vec<DayMinutes>,
    /// Categories with nonzero minutes, in [`Intensity::ALL`] order
    pub intensity_breakdown: Vec<IntensityMinutes>,
    /// Consecutive days with activity, counting backward from today
    pub streak_days: u32,
}

/// Compute the full snapshot from the current collection.
///
/// Records with a missing or unparseable date match no day of the weekly
/// series but still count toward the lifetime totals; matching is by string
/// equality against the `YYYY-MM-DD` form of each day.
pub fn compute_snapshot(
    records: &[WorkoutRecord],
    today: NaiveDate,
    daily_goal_minutes: u32,
) -> AnalyticsSnapshot {
    let total_workouts = records.len() as u32;
    let total_minutes: u32 = records.iter().map(|r| r.duration_minutes).sum();
    let average_duration_minutes = if records.is_empty() {
        0
    } else {
        (f64::from(total_minutes) / records.len() as f64).round() as u32
    };

    let weekly_series: Vec<DayMinutes> = (0..7)
        .rev()
        .map(|back| {
            let day = today - Duration::days(back);
            let iso = iso_date(day);
            let minutes = records
                .iter()
                .filter(|r| r.date.as_deref() == Some(iso.as_str()))
                .map(|r| r.duration_minutes)
                .sum();
            DayMinutes {
                day_label: day_label(day),
                minutes,
            }
        })
        .collect();

    let todays_minutes = weekly_series.last().map_or(0, |d| d.minutes);

    // Clamp the ratio before rounding so 99.6% of goal reads as 100, and
    // anything at or past the goal stays pinned there. A zero goal counts
    // as already met.
    let goal_progress_percent = if daily_goal_minutes == 0 {
        100
    } else {
        (f64::from(todays_minutes) / f64::from(daily_goal_minutes) * 100.0)
            .min(100.0)
            .round() as u32
    };

    // Streak breaks at the first zero-minute day scanning backward from
    // today; an active day beyond a gap does not extend it.
    let streak_days = weekly_series
        .iter()
        .rev()
        .take_while(|d| d.minutes > 0)
        .count() as u32;

    let mut minutes_by_category = [0u32; 4];
    for record in records {
        minutes_by_category[Intensity::classify(&record.intensity) as usize] +=
            record.duration_minutes;
    }
    let intensity_breakdown = Intensity::ALL
        .iter()
        .zip(minutes_by_category)
        .filter(|(_, minutes)| *minutes > 0)
        .map(|(category, minutes)| IntensityMinutes {
            category: *category,
            minutes,
        })
        .collect();

    AnalyticsSnapshot {
        total_workouts,
        total_minutes,
        average_duration_minutes,
        todays_minutes,
        goal_progress_percent,
        weekly_series,
        intensity_breakdown,
        streak_days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOAL: u32 = 30;

    fn make_record(id: u64, minutes: u32, intensity: &str, date: Option<&str>) -> WorkoutRecord {
        WorkoutRecord {
            id,
            workout_type: "Jogging".to_string(),
            duration_minutes: minutes,
            intensity: intensity.to_string(),
            date: date.map(String::from),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 7).unwrap()
    }

    /// Records spread over the trailing week: one per day, given minutes
    /// oldest to newest (today last).
    fn week_of(minutes: [u32; 7]) -> Vec<WorkoutRecord> {
        minutes
            .iter()
            .enumerate()
            .map(|(i, m)| {
                let day = today() - Duration::days(6 - i as i64);
                make_record(i as u64 + 1, *m, "Medium", Some(&iso_date(day)))
            })
            .collect()
    }

    #[test]
    fn test_totals_and_rounded_average() {
        let records = vec![
            make_record(1, 30, "Low", Some("2025-03-07")),
            make_record(2, 45, "High", Some("2025-03-06")),
            make_record(3, 20, "Low", None),
        ];

        let snapshot = compute_snapshot(&records, today(), GOAL);

        assert_eq!(snapshot.total_workouts, 3);
        assert_eq!(snapshot.total_minutes, 95);
        // 95 / 3 = 31.67, rounds to 32
        assert_eq!(snapshot.average_duration_minutes, 32);
    }

    #[test]
    fn test_empty_collection_is_all_zero() {
        let snapshot = compute_snapshot(&[], today(), GOAL);

        assert_eq!(snapshot.total_workouts, 0);
        assert_eq!(snapshot.total_minutes, 0);
        assert_eq!(snapshot.average_duration_minutes, 0);
        assert_eq!(snapshot.todays_minutes, 0);
        assert_eq!(snapshot.goal_progress_percent, 0);
        assert_eq!(snapshot.streak_days, 0);
        assert_eq!(snapshot.weekly_series.len(), 7);
        assert!(snapshot.intensity_breakdown.is_empty());
    }

    #[test]
    fn test_goal_progress_is_clamped_before_rounding() {
        // Far past the goal: clamps to exactly 100
        let records = vec![make_record(1, 500, "High", Some("2025-03-07"))];
        let snapshot = compute_snapshot(&records, today(), GOAL);
        assert_eq!(snapshot.goal_progress_percent, 100);

        // Exactly at the goal
        let records = vec![make_record(1, GOAL, "High", Some("2025-03-07"))];
        let snapshot = compute_snapshot(&records, today(), GOAL);
        assert_eq!(snapshot.goal_progress_percent, 100);

        // Partway: 20/30 = 66.67%, rounds to 67
        let records = vec![make_record(1, 20, "High", Some("2025-03-07"))];
        let snapshot = compute_snapshot(&records, today(), GOAL);
        assert_eq!(snapshot.goal_progress_percent, 67);
    }

    #[test]
    fn test_weekly_series_is_seven_days_ending_today() {
        let snapshot = compute_snapshot(&[], today(), GOAL);

        let labels: Vec<&str> = snapshot
            .weekly_series
            .iter()
            .map(|d| d.day_label.as_str())
            .collect();
        // 2025-03-07 is a Friday; the window runs Sat..Fri
        assert_eq!(
            labels,
            vec!["Sat", "Sun", "Mon", "Tue", "Wed", "Thu", "Fri"]
        );
    }

    #[test]
    fn test_weekly_series_sums_per_day() {
        let mut records = week_of([0, 5, 10, 0, 20, 15, 30]);
        // Second record on today's date adds to the same bucket
        records.push(make_record(99, 12, "Low", Some("2025-03-07")));

        let snapshot = compute_snapshot(&records, today(), GOAL);

        let minutes: Vec<u32> = snapshot.weekly_series.iter().map(|d| d.minutes).collect();
        assert_eq!(minutes, vec![0, 5, 10, 0, 20, 15, 42]);
        assert_eq!(snapshot.todays_minutes, 42);
    }

    #[test]
    fn test_undated_records_count_in_totals_but_not_series() {
        let records = vec![
            make_record(1, 30, "Low", None),
            make_record(2, 10, "Low", Some("not-a-date")),
        ];

        let snapshot = compute_snapshot(&records, today(), GOAL);

        assert_eq!(snapshot.total_minutes, 40);
        assert!(snapshot.weekly_series.iter().all(|d| d.minutes == 0));
        assert_eq!(snapshot.todays_minutes, 0);
    }

    #[test]
    fn test_streak_breaks_at_first_gap() {
        // Oldest to newest, today last: the zero on day four cuts the
        // earlier run off, leaving the trailing three days.
        let records = week_of([0, 5, 10, 0, 20, 15, 30]);
        let snapshot = compute_snapshot(&records, today(), GOAL);
        assert_eq!(snapshot.streak_days, 3);
    }

    #[test]
    fn test_streak_zero_when_today_inactive() {
        let records = week_of([10, 10, 10, 10, 10, 10, 0]);
        let snapshot = compute_snapshot(&records, today(), GOAL);
        assert_eq!(snapshot.streak_days, 0);
    }

    #[test]
    fn test_full_week_streak() {
        let records = week_of([5, 5, 5, 5, 5, 5, 5]);
        let snapshot = compute_snapshot(&records, today(), GOAL);
        assert_eq!(snapshot.streak_days, 7);
    }

    #[test]
    fn test_intensity_classification_is_prefix_based() {
        assert_eq!(Intensity::classify("Low"), Intensity::Low);
        assert_eq!(Intensity::classify("  low impact "), Intensity::Low);
        assert_eq!(Intensity::classify("MED-high effort"), Intensity::Medium);
        assert_eq!(Intensity::classify("medium"), Intensity::Medium);
        assert_eq!(Intensity::classify("HIGH"), Intensity::High);
        assert_eq!(Intensity::classify("brutal"), Intensity::Other);
        assert_eq!(Intensity::classify(""), Intensity::Other);
        // Substring elsewhere does not count, only the prefix
        assert_eq!(Intensity::classify("very high"), Intensity::Other);
    }

    #[test]
    fn test_intensity_breakdown_sums_minutes_and_skips_empty() {
        let records = vec![
            make_record(1, 30, "Low", None),
            make_record(2, 15, "low-ish", None),
            make_record(3, 45, "High", None),
            make_record(4, 10, "something else", None),
        ];

        let snapshot = compute_snapshot(&records, today(), GOAL);

        // No Medium bucket: zero-sum categories are omitted
        assert_eq!(
            snapshot.intensity_breakdown,
            vec![
                IntensityMinutes {
                    category: Intensity::Low,
                    minutes: 45
                },
                IntensityMinutes {
                    category: Intensity::High,
                    minutes: 45
                },
                IntensityMinutes {
                    category: Intensity::Other,
                    minutes: 10
                },
            ]
        );
    }

    #[test]
    fn test_snapshot_is_deterministic() {
        let records = week_of([0, 5, 10, 0, 20, 15, 30]);
        let a = compute_snapshot(&records, today(), GOAL);
        let b = compute_snapshot(&records, today(), GOAL);
        assert_eq!(a, b);
    }
}
