use super::enums::{RunStatus, TaskStatus};
use super::error::{EngineError, EngineResult};
use super::run::Run;
use chrono::{DateTime, Duration, Utc};

/// Run-level lifecycle transitions.
///
/// Each operation validates the current status, then builds and returns a new
/// snapshot; the receiver is never mutated, so a failed transition leaves the
/// caller's state exactly as it was.
impl Run {
    /// Start the run, activating the first pending task.
    ///
    /// A run with nothing to do (all tasks filtered out) completes
    /// immediately with `started_at == ended_at`.
    pub fn start(&self, now: DateTime<Utc>) -> EngineResult<Run> {
        if self.status != RunStatus::NotStarted {
            return Err(EngineError::InvalidTransition {
                action: "start",
                status: self.status,
            });
        }

        let mut next = self.clone();
        next.started_at = Some(now);

        match self.next_pending() {
            None => {
                next.status = RunStatus::Completed;
                next.ended_at = Some(now);
                Ok(next)
            }
            Some(first) => {
                let first_id = first.id;
                next.status = RunStatus::Running;
                Ok(next.start_task(first_id, now))
            }
        }
    }

    /// Pause the run. Pause/resume must strictly alternate.
    pub fn pause(&self, now: DateTime<Utc>) -> EngineResult<Run> {
        if self.status != RunStatus::Running {
            return Err(EngineError::InvalidTransition {
                action: "pause",
                status: self.status,
            });
        }

        let mut next = self.clone();
        next.status = RunStatus::Paused;
        next.paused_at = Some(now);
        Ok(next)
    }

    /// Resume the run, shifting the active task's deadline forward by the
    /// pause duration so its remaining time is frozen across the pause.
    pub fn resume(&self, now: DateTime<Utc>) -> EngineResult<Run> {
        if self.status != RunStatus::Paused {
            return Err(EngineError::InvalidTransition {
                action: "resume",
                status: self.status,
            });
        }
        let Some(paused_at) = self.paused_at else {
            return Err(EngineError::InvalidTransition {
                action: "resume",
                status: self.status,
            });
        };

        let pause_ms = (now - paused_at).num_milliseconds();

        let mut next = self.clone();
        if let Some(active_id) = next.active_task_id {
            if let Some(task) = next.tasks.iter_mut().find(|task| task.id == active_id) {
                if let Some(end) = task.planned_end_at {
                    task.planned_end_at = Some(end + Duration::milliseconds(pause_ms));
                }
            }
        }
        next.total_pause_ms += pause_ms;
        next.paused_at = None;
        next.status = RunStatus::Running;
        Ok(next)
    }

    /// Abandon the run from any non-terminal status.
    ///
    /// The active task (if any) is marked skipped; overtime never times a run
    /// out on its own, so this is the only cancellation path.
    pub fn end(&self, now: DateTime<Utc>) -> EngineResult<Run> {
        if self.status.is_terminal() {
            return Err(EngineError::InvalidTransition {
                action: "end",
                status: self.status,
            });
        }

        let mut next = self.clone();
        if let Some(active_id) = next.active_task_id {
            if let Some(task) = next.tasks.iter_mut().find(|task| task.id == active_id) {
                task.status = TaskStatus::Skipped;
                task.completed_at = Some(now);
            }
        }
        next.status = RunStatus::Abandoned;
        next.active_task_id = None;
        next.ended_at = Some(now);
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::enums::Pace;
    use crate::domain::template::{Template, TemplateTask};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap()
    }

    fn two_task_run() -> Run {
        let template = Template::new(
            "Morning",
            vec![
                TemplateTask::new("Make bed", 5 * 60_000, 0),
                TemplateTask::new("Shower", 10 * 60_000, 1),
            ],
        );
        Run::from_template(&template, Pace::Steady, fixed_now())
    }

    #[test]
    fn test_start_activates_lowest_order_pending() {
        let now = fixed_now();
        let run = two_task_run().start(now).unwrap();

        assert_eq!(run.status, RunStatus::Running);
        assert_eq!(run.started_at, Some(now));

        let active = run.active_task().unwrap();
        assert_eq!(active.name, "Make bed");
        assert_eq!(active.status, TaskStatus::Active);
        assert_eq!(active.started_at, Some(now));
        assert_eq!(
            active.planned_end_at,
            Some(now + Duration::milliseconds(5 * 60_000))
        );
    }

    #[test]
    fn test_start_twice_is_invalid() {
        let run = two_task_run().start(fixed_now()).unwrap();
        let err = run.start(fixed_now()).unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidTransition {
                action: "start",
                status: RunStatus::Running,
            }
        );
    }

    #[test]
    fn test_start_with_no_tasks_completes_immediately() {
        let template = Template::new("Empty", vec![]);
        let now = fixed_now();
        let run = Run::from_template(&template, Pace::Steady, now)
            .start(now)
            .unwrap();

        assert_eq!(run.status, RunStatus::Completed);
        assert_eq!(run.started_at, Some(now));
        assert_eq!(run.ended_at, Some(now));
        assert!(run.active_task_id.is_none());
    }

    #[test]
    fn test_pause_requires_running() {
        let run = two_task_run();
        assert!(run.pause(fixed_now()).is_err());

        let started = run.start(fixed_now()).unwrap();
        let paused = started.pause(fixed_now()).unwrap();
        assert_eq!(paused.status, RunStatus::Paused);
        assert_eq!(paused.paused_at, Some(fixed_now()));

        // Pause/resume must strictly alternate
        assert!(paused.pause(fixed_now()).is_err());
    }

    #[test]
    fn test_resume_requires_paused() {
        let started = two_task_run().start(fixed_now()).unwrap();
        assert!(started.resume(fixed_now()).is_err());
    }

    #[test]
    fn test_resume_shifts_deadline_by_pause_duration() {
        let now = fixed_now();
        let started = two_task_run().start(now).unwrap();
        let deadline_before = started.active_task().unwrap().planned_end_at.unwrap();

        let pause_at = now + Duration::minutes(2);
        let resume_at = pause_at + Duration::minutes(3);
        let resumed = started
            .pause(pause_at)
            .unwrap()
            .resume(resume_at)
            .unwrap();

        assert_eq!(resumed.status, RunStatus::Running);
        assert_eq!(resumed.paused_at, None);
        assert_eq!(resumed.total_pause_ms, 3 * 60_000);
        assert_eq!(
            resumed.active_task().unwrap().planned_end_at,
            Some(deadline_before + Duration::minutes(3))
        );
    }

    #[test]
    fn test_immediate_resume_leaves_deadline_unchanged() {
        let now = fixed_now();
        let started = two_task_run().start(now).unwrap();
        let deadline_before = started.active_task().unwrap().planned_end_at;

        let instant = now + Duration::minutes(1);
        let resumed = started.pause(instant).unwrap().resume(instant).unwrap();

        assert_eq!(resumed.active_task().unwrap().planned_end_at, deadline_before);
        assert_eq!(resumed.total_pause_ms, 0);
    }

    #[test]
    fn test_pause_accumulates_across_cycles() {
        let now = fixed_now();
        let mut run = two_task_run().start(now).unwrap();

        run = run
            .pause(now + Duration::minutes(1))
            .unwrap()
            .resume(now + Duration::minutes(2))
            .unwrap();
        run = run
            .pause(now + Duration::minutes(5))
            .unwrap()
            .resume(now + Duration::minutes(9))
            .unwrap();

        assert_eq!(run.total_pause_ms, 5 * 60_000);
    }

    #[test]
    fn test_end_skips_active_task() {
        let now = fixed_now();
        let started = two_task_run().start(now).unwrap();
        let active_id = started.active_task_id.unwrap();

        let end_at = now + Duration::minutes(4);
        let ended = started.end(end_at).unwrap();

        assert_eq!(ended.status, RunStatus::Abandoned);
        assert_eq!(ended.ended_at, Some(end_at));
        assert!(ended.active_task_id.is_none());

        let skipped = ended.task(active_id).unwrap();
        assert_eq!(skipped.status, TaskStatus::Skipped);
        assert_eq!(skipped.completed_at, Some(end_at));
    }

    #[test]
    fn test_end_is_valid_while_paused() {
        let now = fixed_now();
        let paused = two_task_run()
            .start(now)
            .unwrap()
            .pause(now + Duration::minutes(1))
            .unwrap();
        let ended = paused.end(now + Duration::minutes(2)).unwrap();
        assert_eq!(ended.status, RunStatus::Abandoned);
    }

    #[test]
    fn test_end_rejects_terminal_runs() {
        let now = fixed_now();
        let ended = two_task_run().start(now).unwrap().end(now).unwrap();
        assert!(ended.end(now).is_err());
    }

    #[test]
    fn test_failed_transition_leaves_snapshot_untouched() {
        let run = two_task_run();
        let before = run.clone();
        let _ = run.pause(fixed_now());
        assert_eq!(run, before);
    }
}
