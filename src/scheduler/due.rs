//! Due-time evaluation.
//!
//! Stateless: the decision is a pure function of the schedule's configured
//! time and frequency, the current instant, and the last-execution timestamp.
//! Recurrence itself lives outside the process — an external cron hits the
//! trigger endpoint and every invocation re-evaluates from scratch.

use chrono::{DateTime, FixedOffset, Timelike, Utc};

use crate::db::types::Frequency;
use crate::error::{AppError, AppResult};

/// Parse a wall-clock "HH:MM" schedule time.
pub fn parse_schedule_time(time: &str) -> AppResult<(u32, u32)> {
    let invalid = || AppError::InvalidScheduleTime(time.to_string());

    let (h, m) = time.split_once(':').ok_or_else(invalid)?;
    let hour: u32 = h.trim().parse().map_err(|_| invalid())?;
    let minute: u32 = m.trim().parse().map_err(|_| invalid())?;

    if hour > 23 || minute > 59 {
        return Err(invalid());
    }

    Ok((hour, minute))
}

/// Decide whether a schedule should fire now.
///
/// Two gates, in order:
/// 1. Time-of-day window: the current wall-clock minute (in the operational
///    timezone) must be within `window_minutes` of the configured time,
///    boundaries inclusive. Outside the window the answer is `false` without
///    consulting history.
/// 2. Frequency gate: enough time must have elapsed since
///    `last_executed_at` (see [`Frequency::min_hours_elapsed`]). A schedule
///    with no history at all is due on its first window hit.
///
/// `force` bypasses both gates; manual and test triggers use it.
pub fn is_due(
    time: &str,
    frequency: Frequency,
    now: DateTime<FixedOffset>,
    last_executed_at: Option<DateTime<Utc>>,
    window_minutes: i64,
    force: bool,
) -> AppResult<bool> {
    if force {
        return Ok(true);
    }

    let (hour, minute) = parse_schedule_time(time)?;
    let schedule_minutes = i64::from(hour * 60 + minute);
    let current_minutes = i64::from(now.hour() * 60 + now.minute());

    if (current_minutes - schedule_minutes).abs() > window_minutes {
        return Ok(false);
    }

    let Some(last) = last_executed_at else {
        return Ok(true);
    };

    let elapsed_minutes = (now.with_timezone(&Utc) - last).num_minutes();
    Ok(elapsed_minutes >= frequency.min_hours_elapsed() * 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    const WINDOW: i64 = 5;

    fn tokyo() -> FixedOffset {
        FixedOffset::east_opt(9 * 3600).unwrap()
    }

    fn at(hour: u32, minute: u32) -> DateTime<FixedOffset> {
        tokyo().with_ymd_and_hms(2026, 8, 6, hour, minute, 0).unwrap()
    }

    fn due_at(hour: u32, minute: u32) -> bool {
        is_due(
            "09:00",
            Frequency::Daily,
            at(hour, minute),
            None,
            WINDOW,
            false,
        )
        .unwrap()
    }

    #[test]
    fn test_window_boundaries_inclusive() {
        assert!(!due_at(8, 54));
        assert!(due_at(8, 55));
        assert!(due_at(8, 56));
        assert!(due_at(9, 0));
        assert!(due_at(9, 5));
        assert!(!due_at(9, 6));
        assert!(!due_at(15, 0));
    }

    #[test]
    fn test_first_run_is_due_inside_window() {
        assert!(due_at(9, 2));
    }

    #[test]
    fn test_frequency_gate_daily() {
        let now = at(9, 0);

        let twenty_hours_ago = now.with_timezone(&Utc) - Duration::hours(20);
        assert!(!is_due("09:00", Frequency::Daily, now, Some(twenty_hours_ago), WINDOW, false).unwrap());

        let full_day_ago = now.with_timezone(&Utc) - Duration::hours(24);
        assert!(is_due("09:00", Frequency::Daily, now, Some(full_day_ago), WINDOW, false).unwrap());

        // Yesterday's run a few minutes late must not block today's
        let slightly_less = now.with_timezone(&Utc) - Duration::hours(23) - Duration::minutes(30);
        assert!(is_due("09:00", Frequency::Daily, now, Some(slightly_less), WINDOW, false).unwrap());
    }

    #[test]
    fn test_frequency_gate_weekly() {
        let now = at(9, 0);

        let six_days_ago = now.with_timezone(&Utc) - Duration::hours(24 * 6);
        assert!(!is_due("09:00", Frequency::Weekly, now, Some(six_days_ago), WINDOW, false).unwrap());

        let week_ago = now.with_timezone(&Utc) - Duration::hours(24 * 7);
        assert!(is_due("09:00", Frequency::Weekly, now, Some(week_ago), WINDOW, false).unwrap());
    }

    #[test]
    fn test_recent_execution_blocks_inside_window() {
        let now = at(9, 2);
        let two_minutes_ago = now.with_timezone(&Utc) - Duration::minutes(2);
        assert!(!is_due("09:00", Frequency::Daily, now, Some(two_minutes_ago), WINDOW, false).unwrap());
    }

    #[test]
    fn test_force_bypasses_window_and_frequency() {
        let now = at(15, 30);
        let moments_ago = now.with_timezone(&Utc) - Duration::minutes(1);
        assert!(is_due("09:00", Frequency::Daily, now, Some(moments_ago), WINDOW, true).unwrap());
    }

    #[test]
    fn test_window_width_is_configurable() {
        let now = at(9, 4);
        assert!(!is_due("09:00", Frequency::Daily, now, None, 1, false).unwrap());
        assert!(is_due("09:00", Frequency::Daily, now, None, 10, false).unwrap());
    }

    #[test]
    fn test_malformed_time_is_an_error() {
        for bad in ["", "9", "24:00", "09:60", "ab:cd", "09-00"] {
            let result = is_due(bad, Frequency::Daily, at(9, 0), None, WINDOW, false);
            assert!(
                matches!(result, Err(AppError::InvalidScheduleTime(_))),
                "expected error for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_parse_schedule_time_accepts_unpadded_hour() {
        assert_eq!(parse_schedule_time("9:05").unwrap(), (9, 5));
        assert_eq!(parse_schedule_time("23:59").unwrap(), (23, 59));
    }
}
