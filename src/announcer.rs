use crate::domain::RunEvent;

/// Build user-facing announcement strings.
///
/// The engine reports transitions as [`RunEvent`] data; this module renders
/// them (and the tick-loop threshold crossings) into opaque text for the
/// speech and notification collaborators.

/// Message for a transition event returned by `advance`/`skip`
pub fn announcement_text(event: &RunEvent) -> String {
    match event {
        RunEvent::TaskCompleted { finished, next } => {
            format!("{} done. Next up: {}.", finished, next)
        }
        RunEvent::TaskSkipped { skipped, next } => {
            format!("Skipping {}. Next up: {}.", skipped, next)
        }
        RunEvent::RoutineComplete => "Routine complete. Well done.".to_string(),
    }
}

/// Message for a task reaching its planned end
pub fn time_up_text(task_name: &str) -> String {
    format!("Time's up for {}.", task_name)
}

/// Message for an overtime boundary
pub fn overtime_text(task_name: &str, minutes: i64) -> String {
    format!("{} is {} minutes over.", task_name, minutes)
}

/// Message for an elapsed-time milestone
pub fn milestone_text(task_name: &str, minutes: i64) -> String {
    format!("{} minutes on {}.", minutes, task_name)
}

/// Message for the one-minute auto-advance warning
pub fn auto_advance_warning_text(task_name: &str) -> String {
    format!("One minute left on {}.", task_name)
}
