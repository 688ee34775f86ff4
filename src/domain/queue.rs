use super::enums::{MovePosition, TaskStatus};
use super::error::{EngineError, EngineResult};
use super::run::{Run, RunTask};
use uuid::Uuid;

/// Queue reordering.
///
/// All repositioning happens on the sub-list of pending tasks; active and
/// terminal tasks keep their places. After any reorder the whole task list is
/// rebuilt as `[terminal tasks] ++ [active task] ++ [pending tasks]` with
/// `order` reassigned contiguously from zero.
impl Run {
    /// Move a pending task to a new position in the pending sub-list.
    ///
    /// `Next` puts it at the front of the sub-list — immediately after the
    /// active task, since active and terminal tasks are excluded from it. A
    /// move that resolves to the task's current index returns the run
    /// unchanged.
    pub fn move_task(&self, task_id: Uuid, position: MovePosition) -> EngineResult<Run> {
        let task = self
            .task(task_id)
            .ok_or(EngineError::TaskNotFound { id: task_id })?;
        if task.status != TaskStatus::Pending {
            return Err(EngineError::TaskNotMovable { id: task_id });
        }

        let mut pending = self.pending_sorted();
        let Some(current) = pending.iter().position(|task| task.id == task_id) else {
            return Ok(self.clone());
        };

        let last = pending.len() - 1;
        let target = match position {
            MovePosition::Up => current.saturating_sub(1),
            MovePosition::Down => (current + 1).min(last),
            MovePosition::Next => 0,
            MovePosition::End => last,
            MovePosition::Index(index) => index.min(last),
        };

        if target == current {
            return Ok(self.clone());
        }

        let moved = pending.remove(current);
        pending.insert(target, moved);
        Ok(self.rebuild_queue(pending))
    }

    /// Insert an ad-hoc task right after the active task, ahead of every
    /// other pending task. Timer fields start zeroed and auto-advance off.
    pub fn add_quick_task(&self, name: impl Into<String>, duration_ms: i64) -> Run {
        if self.status.is_terminal() {
            return self.clone();
        }

        let mut pending = self.pending_sorted();
        pending.insert(0, RunTask::adhoc(name, duration_ms, 0));
        self.rebuild_queue(pending)
    }

    /// Pending tasks cloned in queue order
    fn pending_sorted(&self) -> Vec<RunTask> {
        let mut pending: Vec<RunTask> = self
            .tasks
            .iter()
            .filter(|task| task.status == TaskStatus::Pending)
            .cloned()
            .collect();
        pending.sort_by_key(|task| task.order);
        pending
    }

    /// Rebuild the full task list around a reordered pending sub-list and
    /// reassign `order` contiguously across it.
    fn rebuild_queue(&self, pending_in_order: Vec<RunTask>) -> Run {
        let mut sorted = self.tasks.clone();
        sorted.sort_by_key(|task| task.order);

        let mut rebuilt: Vec<RunTask> = Vec::with_capacity(sorted.len() + 1);
        rebuilt.extend(
            sorted
                .iter()
                .filter(|task| task.status.is_terminal())
                .cloned(),
        );
        rebuilt.extend(
            sorted
                .iter()
                .filter(|task| task.status == TaskStatus::Active)
                .cloned(),
        );
        rebuilt.extend(pending_in_order);

        for (index, task) in rebuilt.iter_mut().enumerate() {
            task.order = index as u32;
        }

        let mut next = self.clone();
        next.tasks = rebuilt;
        next
    }
}
