use chrono::{DateTime, NaiveDate, NaiveDateTime};
use mockable::Clock;
use tracing::debug;

use crate::error::ServiceError;
use crate::result::{ActiveTimeResult, ActivityStatus, Timestamp};
use crate::task::Task;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const AWARE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%:z"];

/// Parses an ISO-8601 creation time. A trailing `Z` is read as `+00:00`;
/// values without an offset stay naive.
pub fn parse_timestamp(raw: &str) -> Result<Timestamp, ServiceError> {
    let normalized = raw.trim().replace('Z', "+00:00");

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Ok(Timestamp::Aware(dt));
    }
    for fmt in AWARE_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&normalized, fmt) {
            return Ok(Timestamp::Aware(dt));
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&normalized, fmt) {
            return Ok(Timestamp::Naive(dt));
        }
    }
    if let Some(midnight) = NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(Timestamp::Naive(midnight));
    }
    Err(ServiceError::InvalidCreationTime(raw.to_string()))
}

/// "Now" in the same offset mode as `reference`.
fn now_like(reference: &Timestamp, clock: &dyn Clock) -> Timestamp {
    match reference {
        Timestamp::Aware(dt) => Timestamp::Aware(clock.utc().with_timezone(dt.offset())),
        Timestamp::Naive(_) => Timestamp::Naive(clock.local().naive_local()),
    }
}

fn elapsed_hours(start: &Timestamp, end: &Timestamp) -> f64 {
    let delta = match (start, end) {
        (Timestamp::Aware(start), Timestamp::Aware(end)) => *end - *start,
        (Timestamp::Naive(start), Timestamp::Naive(end)) => *end - *start,
        (Timestamp::Aware(start), Timestamp::Naive(end)) => *end - start.naive_local(),
        (Timestamp::Naive(start), Timestamp::Aware(end)) => end.naive_local() - *start,
    };
    let hours = delta.num_milliseconds() as f64 / 1000.0 / 3600.0;
    (hours.max(0.0) * 100.0).round_ties_even() / 100.0
}

/// Completed tasks have no stored completion instant, so their end time is
/// the creation time itself and the elapsed time is always zero.
pub fn active_time(task: &Task, clock: &dyn Clock) -> Result<ActiveTimeResult, ServiceError> {
    let raw = match task.created_at.as_deref() {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Err(ServiceError::MissingCreationTime),
    };
    let created_at = parse_timestamp(raw)?;

    let (end, status) = if task.is_completed {
        (created_at, ActivityStatus::Completed)
    } else {
        (now_like(&created_at, clock), ActivityStatus::Active)
    };
    let active_hours = elapsed_hours(&created_at, &end);
    debug!(task_id = task.id, active_hours, ?status, "computed active time");

    Ok(ActiveTimeResult {
        active_hours,
        status,
        created_at,
        completed_at: (status == ActivityStatus::Completed).then_some(end),
    })
}
