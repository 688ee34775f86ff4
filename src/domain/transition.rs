use super::enums::{RunStatus, TaskStatus};
use super::error::{EngineError, EngineResult};
use super::run::Run;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// An announcement the host should dispatch after committing a new snapshot.
///
/// Transitions return these as data instead of calling speech/notification
/// collaborators themselves, so the state machine stays pure and a failed
/// dispatch can never corrupt a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    /// The active task was completed and the named task started
    TaskCompleted { finished: String, next: String },
    /// The active task was skipped and the named task started
    TaskSkipped { skipped: String, next: String },
    /// No pending tasks remain; the run is complete
    RoutineComplete,
}

/// A transition's result: the replacement snapshot plus announcements to fire
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub run: Run,
    pub events: Vec<RunEvent>,
}

impl Outcome {
    fn silent(run: Run) -> Self {
        Self {
            run,
            events: Vec::new(),
        }
    }
}

/// Task-level transitions.
impl Run {
    /// Activate a task: `planned_end_at` is anchored to this instant plus the
    /// task's duration and any extension granted before it started.
    ///
    /// The caller must guarantee no other task is currently active; this
    /// function does not check.
    pub fn start_task(&self, task_id: Uuid, now: DateTime<Utc>) -> Run {
        if self.task(task_id).is_none() {
            return self.clone();
        }

        let mut next = self.with_task(task_id, |task| {
            task.status = TaskStatus::Active;
            task.started_at = Some(now);
            task.planned_end_at = Some(
                now + Duration::milliseconds(task.duration_ms + task.extension_ms),
            );
        });
        next.active_task_id = Some(task_id);
        next
    }

    /// Complete the active task and start the next pending one (smallest
    /// order), or complete the run when none remains.
    pub fn advance(&self, now: DateTime<Utc>) -> EngineResult<Outcome> {
        let Some(active_id) = self.active_task_id else {
            return Err(EngineError::InvalidTransition {
                action: "advance",
                status: self.status,
            });
        };

        let finished = self
            .task(active_id)
            .map(|task| task.name.clone())
            .unwrap_or_default();

        let mut next = self.with_task(active_id, |task| {
            task.status = TaskStatus::Completed;
            task.completed_at = Some(now);
        });
        next.active_task_id = None;

        Ok(next.start_next_or_complete(finished, false, now))
    }

    /// Skip a task without crediting it as done.
    ///
    /// Skipping the active task advances the run exactly like [`advance`],
    /// with a skip-flavored announcement; skipping a pending task only flips
    /// its status. Missing or already-terminal tasks are left untouched.
    pub fn skip(&self, task_id: Uuid, now: DateTime<Utc>) -> Outcome {
        let Some(task) = self.task(task_id) else {
            return Outcome::silent(self.clone());
        };
        if task.status.is_terminal() {
            return Outcome::silent(self.clone());
        }

        let skipped_name = task.name.clone();
        let was_active = self.active_task_id == Some(task_id);

        let mut next = self.with_task(task_id, |task| {
            task.status = TaskStatus::Skipped;
            task.completed_at = Some(now);
        });

        if was_active {
            next.active_task_id = None;
            next.start_next_or_complete(skipped_name, true, now)
        } else {
            Outcome::silent(next)
        }
    }

    /// Grant fresh time: the deadline becomes `now + delta_ms`, not the old
    /// deadline plus `delta_ms`, so "+5m" always means five minutes from the
    /// moment of the request however deep into overtime the task is.
    ///
    /// `extension_ms` accumulates as a record. Time-up and overtime
    /// announcement guards reset so thresholds can fire again under the new
    /// window; elapsed milestones are unaffected. A negative delta may land
    /// the task straight back in overtime. Extending a task that has not
    /// started yet only accrues `extension_ms`; `start_task` folds it in.
    pub fn extend(&self, task_id: Uuid, delta_ms: i64, now: DateTime<Utc>) -> Run {
        self.with_task(task_id, |task| {
            if task.status.is_terminal() {
                return;
            }
            task.extension_ms += delta_ms;
            task.time_up_announced = false;
            task.overtime_announced_minutes.clear();
            if task.started_at.is_some() {
                task.planned_end_at = Some(now + Duration::milliseconds(delta_ms));
            }
        })
    }

    /// Flip a task's auto-advance flag, re-arming its warning announcement
    pub fn toggle_auto_advance(&self, task_id: Uuid) -> Run {
        self.with_task(task_id, |task| {
            task.auto_advance = !task.auto_advance;
            task.auto_advance_warning_announced = false;
        })
    }

    /// Flip one subtask's checkbox; no state-machine side effects
    pub fn toggle_subtask(&self, task_id: Uuid, subtask_id: Uuid) -> Run {
        self.with_task(task_id, |task| {
            if let Some(subtasks) = &mut task.subtasks {
                if let Some(subtask) = subtasks.iter_mut().find(|sub| sub.id == subtask_id) {
                    subtask.checked = !subtask.checked;
                }
            }
        })
    }

    /// Shared tail of `advance`/`skip`: hand off to the next pending task or
    /// close out the run.
    fn start_next_or_complete(self, finished: String, skipped: bool, now: DateTime<Utc>) -> Outcome {
        let next_up = self.next_pending().map(|task| (task.id, task.name.clone()));

        match next_up {
            None => {
                let mut run = self;
                run.status = RunStatus::Completed;
                run.active_task_id = None;
                run.ended_at = Some(now);
                Outcome {
                    run,
                    events: vec![RunEvent::RoutineComplete],
                }
            }
            Some((next_id, next_name)) => {
                let run = self.start_task(next_id, now);
                let event = if skipped {
                    RunEvent::TaskSkipped {
                        skipped: finished,
                        next: next_name,
                    }
                } else {
                    RunEvent::TaskCompleted {
                        finished,
                        next: next_name,
                    }
                };
                Outcome {
                    run,
                    events: vec![event],
                }
            }
        }
    }
}
