pub mod enums;
pub mod error;
pub mod estimate;
pub mod lifecycle;
pub mod overtime;
pub mod queue;
pub mod run;
pub mod template;
pub mod timer;
pub mod transition;
pub mod views;

pub use enums::{MovePosition, Pace, RunStatus, TaskStatus, UiMode};
pub use error::{EngineError, EngineResult};
pub use estimate::{parse_duration_text, Estimate, EstimateUnit, DEFAULT_ESTIMATE_MS};
pub use overtime::{
    check_auto_advance_warning, check_milestone_reminder, check_overtime_reminder, check_time_up,
};
pub use run::{AdhocItem, Run, RunSubtask, RunTask};
pub use template::{derive_visible_tasks, Template, TemplateTask};
pub use timer::{compute_remaining_time, format_time, format_time_remaining, TimeRemaining};
pub use transition::{Outcome, RunEvent};
pub use views::{
    flatten_queue, remaining_planned_ms, status_badge, tasks_in_queue_order, tree_connector,
    QueueRow,
};
