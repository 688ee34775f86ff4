use super::run::RunTask;
use chrono::{DateTime, Utc};

/// Snapshot of one task's timer at a reference instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRemaining {
    pub elapsed_ms: i64,
    /// Signed; negative once the planned end has passed
    pub remaining_ms: i64,
    pub is_overtime: bool,
    pub overtime_ms: i64,
    pub total_planned_ms: i64,
}

/// Compute elapsed/remaining/overtime for a task.
///
/// Returns `None` until the task has started. While the run is paused the
/// pause instant becomes the reference time, freezing the countdown. Pure:
/// identical inputs always yield identical results, and the task is never
/// mutated, so this is safe to call on every tick.
pub fn compute_remaining_time(
    task: &RunTask,
    is_paused: bool,
    paused_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Option<TimeRemaining> {
    let started_at = task.started_at?;
    let planned_end_at = task.planned_end_at?;

    let reference = match (is_paused, paused_at) {
        (true, Some(paused)) => paused,
        _ => now,
    };

    let elapsed_ms = (reference - started_at).num_milliseconds();
    let remaining_ms = (planned_end_at - reference).num_milliseconds();
    let is_overtime = remaining_ms < 0;

    Some(TimeRemaining {
        elapsed_ms,
        remaining_ms,
        is_overtime,
        overtime_ms: if is_overtime { -remaining_ms } else { 0 },
        total_planned_ms: task.duration_ms + task.extension_ms,
    })
}

/// Render a millisecond count as `minutes:seconds` (e.g. `3:27`).
///
/// Negative input is treated as its magnitude.
pub fn format_time(ms: i64) -> String {
    let total_seconds = ms.abs() / 1000;
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Render a timer snapshot: overtime is prefixed with `+`
pub fn format_time_remaining(time: &TimeRemaining) -> String {
    if time.is_overtime {
        format!("+{}", format_time(time.overtime_ms))
    } else {
        format_time(time.remaining_ms)
    }
}
