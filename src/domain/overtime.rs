use super::run::{Run, RunTask};
use super::timer::TimeRemaining;
use uuid::Uuid;

/// Overtime reminders fire at every 5-minute boundary past the deadline
pub const OVERTIME_REMINDER_MINUTES: i64 = 5;

/// Elapsed-time milestones fire every 10 minutes of work on a task
pub const MILESTONE_MINUTES: i64 = 10;

/// Auto-advance tasks warn this long before their deadline
pub const AUTO_ADVANCE_WARNING_MS: i64 = 60_000;

/// Decide whether a new overtime boundary should be announced.
///
/// Returns the overtime minute count when it is a positive multiple of 5 that
/// has not been announced yet; the membership check against
/// `overtime_announced_minutes` is the sole guard against re-firing on every
/// tick within that minute, so callers must persist the returned value with
/// [`Run::mark_overtime_announced`].
pub fn check_overtime_reminder(task: &RunTask, time: &TimeRemaining) -> Option<i64> {
    if !time.is_overtime {
        return None;
    }

    let minutes = time.overtime_ms / 60_000;
    let on_boundary = minutes > 0 && minutes % OVERTIME_REMINDER_MINUTES == 0;
    if on_boundary && !task.overtime_announced_minutes.contains(&minutes) {
        Some(minutes)
    } else {
        None
    }
}

/// Decide whether an elapsed-time milestone should be announced.
///
/// Same shape as the overtime check, but over elapsed minutes and guarded by
/// `milestone_announced_minutes` (which survives extensions).
pub fn check_milestone_reminder(task: &RunTask, time: &TimeRemaining) -> Option<i64> {
    let minutes = time.elapsed_ms / 60_000;
    let on_boundary = minutes > 0 && minutes % MILESTONE_MINUTES == 0;
    if on_boundary && !task.milestone_announced_minutes.contains(&minutes) {
        Some(minutes)
    } else {
        None
    }
}

/// Whether the task's deadline has passed without a time-up announcement yet
pub fn check_time_up(task: &RunTask, time: &TimeRemaining) -> bool {
    time.remaining_ms <= 0 && !task.time_up_announced
}

/// Whether an auto-advance task is inside its warning window, unannounced
pub fn check_auto_advance_warning(task: &RunTask, time: &TimeRemaining) -> bool {
    task.auto_advance
        && !task.auto_advance_warning_announced
        && !time.is_overtime
        && time.remaining_ms <= AUTO_ADVANCE_WARNING_MS
}

impl Run {
    /// Record an announced overtime boundary so it never fires again
    pub fn mark_overtime_announced(&self, task_id: Uuid, minutes: i64) -> Run {
        self.with_task(task_id, |task| {
            if !task.overtime_announced_minutes.contains(&minutes) {
                task.overtime_announced_minutes.push(minutes);
            }
        })
    }

    /// Record an announced elapsed-time milestone
    pub fn mark_milestone_announced(&self, task_id: Uuid, minutes: i64) -> Run {
        self.with_task(task_id, |task| {
            if !task.milestone_announced_minutes.contains(&minutes) {
                task.milestone_announced_minutes.push(minutes);
            }
        })
    }

    /// Record that the time-up announcement fired
    pub fn mark_time_up_announced(&self, task_id: Uuid) -> Run {
        self.with_task(task_id, |task| task.time_up_announced = true)
    }

    /// Record that the auto-advance warning fired
    pub fn mark_auto_advance_warning_announced(&self, task_id: Uuid) -> Run {
        self.with_task(task_id, |task| task.auto_advance_warning_announced = true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::enums::Pace;
    use crate::domain::run::AdhocItem;
    use crate::domain::timer::compute_remaining_time;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn start_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap()
    }

    fn started_task(duration_ms: i64) -> RunTask {
        let start = start_instant();
        let mut task = RunTask::adhoc("Test", duration_ms, 0);
        task.started_at = Some(start);
        task.planned_end_at = Some(start + Duration::milliseconds(duration_ms));
        task
    }

    fn time_at(task: &RunTask, offset: Duration) -> TimeRemaining {
        compute_remaining_time(task, false, None, start_instant() + offset).unwrap()
    }

    #[test]
    fn test_no_reminder_before_overtime() {
        let task = started_task(10 * 60_000);
        let time = time_at(&task, Duration::minutes(8));
        assert_eq!(check_overtime_reminder(&task, &time), None);
    }

    #[test]
    fn test_reminder_fires_on_five_minute_boundary() {
        let task = started_task(10 * 60_000);
        let time = time_at(&task, Duration::minutes(15));
        assert_eq!(check_overtime_reminder(&task, &time), Some(5));
    }

    #[test]
    fn test_reminder_silent_between_boundaries() {
        let task = started_task(10 * 60_000);
        // 3 minutes over: not a multiple of 5
        let time = time_at(&task, Duration::minutes(13));
        assert_eq!(check_overtime_reminder(&task, &time), None);
    }

    #[test]
    fn test_reminder_never_repeats_once_marked() {
        let run = {
            let item = AdhocItem {
                text: "Test".to_string(),
                duration_text: Some("~10 min".to_string()),
                subtasks: None,
            };
            let mut run = Run::from_item(&item, start_instant());
            run.pace = Pace::Steady;
            let start = start_instant();
            run.tasks[0].started_at = Some(start);
            run.tasks[0].planned_end_at = Some(start + Duration::minutes(10));
            run
        };
        let task_id = run.tasks[0].id;

        let time = time_at(&run.tasks[0], Duration::minutes(15));
        assert_eq!(check_overtime_reminder(&run.tasks[0], &time), Some(5));

        let marked = run.mark_overtime_announced(task_id, 5);

        // Repeated ticks within the same overtime minute stay silent
        for seconds in [0, 10, 30, 59] {
            let tick = time_at(
                &marked.tasks[0],
                Duration::minutes(15) + Duration::seconds(seconds),
            );
            assert_eq!(check_overtime_reminder(&marked.tasks[0], &tick), None);
        }

        // The next boundary still fires
        let later = time_at(&marked.tasks[0], Duration::minutes(20));
        assert_eq!(check_overtime_reminder(&marked.tasks[0], &later), Some(10));
    }

    #[test]
    fn test_mark_overtime_does_not_duplicate() {
        let item = AdhocItem {
            text: "Test".to_string(),
            duration_text: None,
            subtasks: None,
        };
        let run = Run::from_item(&item, start_instant());
        let task_id = run.tasks[0].id;

        let marked = run
            .mark_overtime_announced(task_id, 5)
            .mark_overtime_announced(task_id, 5);
        assert_eq!(marked.tasks[0].overtime_announced_minutes, vec![5]);
    }

    #[test]
    fn test_milestone_fires_every_ten_elapsed_minutes() {
        let task = started_task(30 * 60_000);

        let early = time_at(&task, Duration::minutes(9));
        assert_eq!(check_milestone_reminder(&task, &early), None);

        let at_ten = time_at(&task, Duration::minutes(10));
        assert_eq!(check_milestone_reminder(&task, &at_ten), Some(10));

        let mut marked = task.clone();
        marked.milestone_announced_minutes.push(10);
        let still_ten = time_at(&marked, Duration::minutes(10) + Duration::seconds(30));
        assert_eq!(check_milestone_reminder(&marked, &still_ten), None);

        let at_twenty = time_at(&marked, Duration::minutes(20));
        assert_eq!(check_milestone_reminder(&marked, &at_twenty), Some(20));
    }

    #[test]
    fn test_time_up_fires_once() {
        let task = started_task(5 * 60_000);

        let before = time_at(&task, Duration::minutes(4));
        assert!(!check_time_up(&task, &before));

        let after = time_at(&task, Duration::minutes(5));
        assert!(check_time_up(&task, &after));

        let mut announced = task.clone();
        announced.time_up_announced = true;
        assert!(!check_time_up(&announced, &after));
    }

    #[test]
    fn test_auto_advance_warning_window() {
        let mut task = started_task(5 * 60_000);
        task.auto_advance = true;

        let early = time_at(&task, Duration::minutes(3));
        assert!(!check_auto_advance_warning(&task, &early));

        let inside = time_at(&task, Duration::minutes(4) + Duration::seconds(10));
        assert!(check_auto_advance_warning(&task, &inside));

        let mut warned = task.clone();
        warned.auto_advance_warning_announced = true;
        assert!(!check_auto_advance_warning(&warned, &inside));

        let mut manual = task.clone();
        manual.auto_advance = false;
        assert!(!check_auto_advance_warning(&manual, &inside));
    }
}
