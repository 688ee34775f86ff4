use super::enums::TaskStatus;
use super::run::{Run, RunTask};

/// A flattened row for rendering the run queue
#[derive(Debug, Clone)]
pub struct QueueRow {
    /// Index in the flattened list
    pub index: usize,
    /// Depth (0 = task, 1 = subtask)
    pub depth: usize,
    /// Whether this is the last subtask of its parent
    pub is_last: bool,
    /// Index into the queue-ordered task list
    pub task_index: usize,
    /// Subtask index (None for task rows)
    pub subtask_index: Option<usize>,
}

/// Tasks cloned-by-reference in queue order
pub fn tasks_in_queue_order(run: &Run) -> Vec<&RunTask> {
    let mut sorted: Vec<&RunTask> = run.tasks.iter().collect();
    sorted.sort_by_key(|task| task.order);
    sorted
}

/// Flatten the run queue into a linear list for rendering and selection.
///
/// Subtasks are shown under the active task only; elsewhere they stay
/// collapsed.
pub fn flatten_queue(run: &Run) -> Vec<QueueRow> {
    let tasks = tasks_in_queue_order(run);
    let mut rows = Vec::new();
    let mut flat_index = 0;

    for (task_index, task) in tasks.iter().enumerate() {
        rows.push(QueueRow {
            index: flat_index,
            depth: 0,
            is_last: false,
            task_index,
            subtask_index: None,
        });
        flat_index += 1;

        if task.status == TaskStatus::Active {
            if let Some(subtasks) = &task.subtasks {
                let count = subtasks.len();
                for subtask_index in 0..count {
                    rows.push(QueueRow {
                        index: flat_index,
                        depth: 1,
                        is_last: subtask_index == count - 1,
                        task_index,
                        subtask_index: Some(subtask_index),
                    });
                    flat_index += 1;
                }
            }
        }
    }

    rows
}

/// Planned milliseconds still ahead of the user (active + pending tasks)
pub fn remaining_planned_ms(run: &Run) -> i64 {
    run.tasks
        .iter()
        .filter(|task| !task.status.is_terminal())
        .map(|task| task.duration_ms + task.extension_ms)
        .sum()
}

/// Get status badge text for a run task
pub fn status_badge(task: &RunTask) -> &'static str {
    match task.status {
        TaskStatus::Active => "⏱ NOW",
        TaskStatus::Pending => "· UP NEXT",
        TaskStatus::Completed => "✓ DONE",
        TaskStatus::Skipped => "↷ SKIPPED",
    }
}

/// Get tree connector for subtask rows
pub fn tree_connector(is_last: bool) -> &'static str {
    if is_last {
        "└─"
    } else {
        "├─"
    }
}
