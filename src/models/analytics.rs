//! Accuracy and practice-time figures derived from an attempt history.
//!
//! Everything here is a pure function over a slice of attempts. Inputs may
//! arrive out of order; each function works on a timestamp-sorted copy.
//!
//! Practice time is estimated from attempt density: attempts closer together
//! than the session gap belong to one session, and a session counts the time
//! between its first and last attempt. Idle time between sessions is never
//! credited.

use super::Attempt;
use crate::config::TrainerConfig;
use crate::constants::MS_PER_MINUTE;
use chrono::{DateTime, Local, Utc};
use serde::Serialize;

/// One point on the accuracy-over-time chart, one per practice session.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub time_label: String,
    pub accuracy: f64,
    pub cumulative_time_min: f64,
}

/// Every figure the results view shows for a single pair.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairSummary {
    pub total: usize,
    pub raw_accuracy: f64,
    pub weighted_accuracy: f64,
    pub active_minutes: f64,
    pub logged_minutes: f64,
    pub goal_progress: f64,
    pub series: Vec<ChartPoint>,
}

fn sorted(attempts: &[Attempt]) -> Vec<Attempt> {
    let mut sorted = attempts.to_vec();
    sorted.sort_by_key(|a| a.timestamp);
    sorted
}

/// Splits attempts into sessions wherever consecutive timestamps are more
/// than `gap_ms` apart.
pub fn sessions(attempts: &[Attempt], gap_ms: i64) -> Vec<Vec<Attempt>> {
    let mut out: Vec<Vec<Attempt>> = Vec::new();
    for attempt in sorted(attempts) {
        let starts_session = out
            .last()
            .and_then(|session| session.last())
            .is_none_or(|prev| attempt.timestamp - prev.timestamp > gap_ms);

        if starts_session {
            out.push(vec![attempt]);
        } else if let Some(current) = out.last_mut() {
            current.push(attempt);
        }
    }
    out
}

fn session_span_ms(session: &[Attempt]) -> i64 {
    match (session.first(), session.last()) {
        (Some(first), Some(last)) => last.timestamp - first.timestamp,
        _ => 0,
    }
}

fn correct_ratio(attempts: &[Attempt]) -> f64 {
    if attempts.is_empty() {
        return 0.0;
    }
    let correct = attempts.iter().filter(|a| a.is_correct).count();
    correct as f64 / attempts.len() as f64
}

/// Recency-weighted accuracy as of now.
pub fn weighted_accuracy(attempts: &[Attempt], half_life_minutes: f64) -> f64 {
    weighted_accuracy_at(attempts, half_life_minutes, Utc::now().timestamp_millis())
}

/// Recency-weighted accuracy: each attempt weighs
/// `exp(-ln 2 * age / half_life)`, so an attempt one half-life old counts
/// half as much as one made at `now_ms`.
pub fn weighted_accuracy_at(attempts: &[Attempt], half_life_minutes: f64, now_ms: i64) -> f64 {
    let Some(min_age) = attempts.iter().map(|a| now_ms - a.timestamp).min() else {
        return 0.0;
    };
    let half_life_ms = half_life_minutes * MS_PER_MINUTE;

    // Ages are measured from the newest attempt; the common factor cancels
    // and old histories cannot underflow to a zero total.
    let mut total_weight = 0.0;
    let mut correct_weight = 0.0;
    for attempt in attempts {
        let age_ms = (now_ms - attempt.timestamp - min_age) as f64;
        let weight = (-std::f64::consts::LN_2 * age_ms / half_life_ms).exp();
        total_weight += weight;
        if attempt.is_correct {
            correct_weight += weight;
        }
    }

    if total_weight == 0.0 || !total_weight.is_finite() {
        return 0.0;
    }
    correct_weight / total_weight
}

/// Wall-clock time spent practising, excluding gaps longer than `max_gap_ms`.
pub fn active_practice_time_ms(attempts: &[Attempt], max_gap_ms: i64) -> i64 {
    if attempts.len() < 2 {
        return 0;
    }
    sessions(attempts, max_gap_ms)
        .iter()
        .map(|s| session_span_ms(s))
        .sum()
}

fn time_label(timestamp: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp)
        .map(|dt| dt.with_timezone(&Local).format("%H:%M").to_string())
        .unwrap_or_default()
}

/// One chart point per session: accuracy within the session and practice
/// minutes accumulated up to and including it.
pub fn accuracy_time_series(attempts: &[Attempt], session_gap_ms: i64) -> Vec<ChartPoint> {
    let mut cumulative_ms = 0;
    sessions(attempts, session_gap_ms)
        .iter()
        .map(|session| {
            cumulative_ms += session_span_ms(session);
            ChartPoint {
                time_label: session.last().map(|a| time_label(a.timestamp)).unwrap_or_default(),
                accuracy: correct_ratio(session),
                cumulative_time_min: cumulative_ms as f64 / MS_PER_MINUTE,
            }
        })
        .collect()
}

/// Plain correct / total.
pub fn raw_accuracy(attempts: &[Attempt]) -> f64 {
    correct_ratio(attempts)
}

/// Sum of the per-attempt durations callers logged.
pub fn logged_minutes(attempts: &[Attempt]) -> f64 {
    attempts.iter().map(|a| a.duration_min).sum()
}

/// Fraction of the practice goal reached, in `[0, 1]`.
pub fn goal_progress(minutes: f64, goal_minutes: f64) -> f64 {
    if goal_minutes <= 0.0 {
        return 0.0;
    }
    (minutes / goal_minutes).clamp(0.0, 1.0)
}

pub fn summarize(attempts: &[Attempt], config: &TrainerConfig) -> PairSummary {
    let active_minutes =
        active_practice_time_ms(attempts, config.session_gap_ms) as f64 / MS_PER_MINUTE;
    PairSummary {
        total: attempts.len(),
        raw_accuracy: raw_accuracy(attempts),
        weighted_accuracy: weighted_accuracy(attempts, config.half_life_minutes),
        active_minutes,
        logged_minutes: logged_minutes(attempts),
        goal_progress: goal_progress(active_minutes, config.practice_goal_minutes),
        series: accuracy_time_series(attempts, config.session_gap_ms),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{HALF_LIFE_MINUTES, SESSION_GAP_MS};

    fn at(is_correct: bool, timestamp: i64) -> Attempt {
        Attempt::new(is_correct, timestamp, 0.0)
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(weighted_accuracy(&[], HALF_LIFE_MINUTES), 0.0);
        assert_eq!(active_practice_time_ms(&[], SESSION_GAP_MS), 0);
        assert!(accuracy_time_series(&[], SESSION_GAP_MS).is_empty());
        assert_eq!(raw_accuracy(&[]), 0.0);
    }

    #[test]
    fn test_all_correct_is_one_regardless_of_age() {
        let now = 10_000_000_000;
        // A year old and a minute old.
        let attempts = vec![at(true, now - 365 * 24 * 3_600_000), at(true, now - 60_000)];
        let acc = weighted_accuracy_at(&attempts, HALF_LIFE_MINUTES, now);
        assert!((acc - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_all_wrong_is_zero() {
        let attempts = vec![at(false, 0), at(false, 5_000), at(false, 9_000)];
        assert_eq!(weighted_accuracy(&attempts, HALF_LIFE_MINUTES), 0.0);
    }

    #[test]
    fn test_identical_timestamps_weigh_equally() {
        let attempts = vec![at(true, 1_000), at(false, 1_000)];
        let acc = weighted_accuracy_at(&attempts, HALF_LIFE_MINUTES, 1_000);
        assert!((acc - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_recent_attempts_dominate() {
        let now = 100 * 3_600_000;
        // Wrong five half-lives ago, right just now.
        let attempts = vec![at(false, now - 5 * 3_600_000), at(true, now)];
        let acc = weighted_accuracy_at(&attempts, HALF_LIFE_MINUTES, now);
        let expected = 1.0 / (1.0 + 1.0 / 32.0);
        assert!((acc - expected).abs() < 1e-9);
    }

    #[test]
    fn test_mixed_history_between_zero_and_one() {
        let now = 50 * 60_000;
        let attempts = vec![
            at(true, now - 10 * 60_000),
            at(false, now - 5 * 60_000),
            at(true, now),
        ];
        let acc = weighted_accuracy_at(&attempts, 60.0, now);
        assert!(acc > 0.0 && acc < 1.0);
    }

    #[test]
    fn test_zero_half_life_does_not_produce_nan() {
        let attempts = vec![at(true, 0), at(false, 1_000)];
        let acc = weighted_accuracy_at(&attempts, 0.0, 2_000);
        assert!(!acc.is_nan());
    }

    #[test]
    fn test_single_attempt_has_no_active_time() {
        assert_eq!(active_practice_time_ms(&[at(true, 5_000)], SESSION_GAP_MS), 0);
    }

    #[test]
    fn test_active_time_skips_idle_gaps() {
        let day = 24 * 3_600_000;
        let attempts = vec![
            at(true, 0),
            at(true, 30_000),
            at(true, day),
            at(false, day + 45_000),
        ];
        assert_eq!(active_practice_time_ms(&attempts, SESSION_GAP_MS), 75_000);
    }

    #[test]
    fn test_active_time_ignores_input_order() {
        let attempts = vec![
            at(true, 0),
            at(false, 60_000),
            at(true, 100_000),
            at(true, 400_000),
            at(true, 450_000),
        ];
        let expected = active_practice_time_ms(&attempts, SESSION_GAP_MS);
        assert_eq!(expected, 150_000);

        let mut reversed = attempts.clone();
        reversed.reverse();
        assert_eq!(active_practice_time_ms(&reversed, SESSION_GAP_MS), expected);

        let shuffled = vec![
            attempts[3].clone(),
            attempts[0].clone(),
            attempts[4].clone(),
            attempts[2].clone(),
            attempts[1].clone(),
        ];
        assert_eq!(active_practice_time_ms(&shuffled, SESSION_GAP_MS), expected);
    }

    #[test]
    fn test_gap_equal_to_threshold_stays_in_session() {
        let attempts = vec![at(true, 0), at(true, SESSION_GAP_MS)];
        assert_eq!(sessions(&attempts, SESSION_GAP_MS).len(), 1);
        assert_eq!(active_practice_time_ms(&attempts, SESSION_GAP_MS), SESSION_GAP_MS);
    }

    #[test]
    fn test_series_splits_on_session_gap() {
        let attempts = vec![at(true, 0), at(false, 1_000), at(true, 130_000)];
        let series = accuracy_time_series(&attempts, SESSION_GAP_MS);

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].accuracy, 0.5);
        assert_eq!(series[1].accuracy, 1.0);
        assert!((series[0].cumulative_time_min - 1_000.0 / 60_000.0).abs() < 1e-12);
        assert_eq!(series[1].cumulative_time_min, series[0].cumulative_time_min);
    }

    #[test]
    fn test_series_labels_are_hour_minute() {
        let series = accuracy_time_series(&[at(true, 1_700_000_000_000)], SESSION_GAP_MS);
        let label = &series[0].time_label;
        assert_eq!(label.len(), 5);
        assert_eq!(&label[2..3], ":");
    }

    #[test]
    fn test_goal_progress_caps() {
        assert_eq!(goal_progress(15.0, 60.0), 0.25);
        assert_eq!(goal_progress(120.0, 60.0), 1.0);
        assert_eq!(goal_progress(0.0, 60.0), 0.0);
        assert_eq!(goal_progress(10.0, 0.0), 0.0);
    }

    #[test]
    fn test_summary_collects_figures() {
        let attempts = vec![
            Attempt::new(true, 0, 0.25),
            Attempt::new(true, 60_000, 0.25),
            Attempt::new(false, 120_000, 0.5),
        ];
        let summary = summarize(&attempts, &TrainerConfig::default());
        assert_eq!(summary.total, 3);
        assert!((summary.raw_accuracy - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(summary.active_minutes, 2.0);
        assert_eq!(summary.logged_minutes, 1.0);
        assert_eq!(summary.series.len(), 1);
    }
}
