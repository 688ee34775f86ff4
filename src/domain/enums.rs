use serde::{Deserialize, Serialize};

/// User-selected capacity tag filtering which template tasks join a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Pace {
    Low,
    Steady,
    Flow,
}

impl Pace {
    /// Get the display name for this pace
    pub fn name(&self) -> &'static str {
        match self {
            Pace::Low => "Low",
            Pace::Steady => "Steady",
            Pace::Flow => "Flow",
        }
    }

    /// Get the glyph shown next to the pace name
    pub fn symbol(&self) -> &'static str {
        match self {
            Pace::Low => "🌙",
            Pace::Steady => "🌿",
            Pace::Flow => "🔥",
        }
    }

    /// Get all paces as a list (picker order)
    pub fn all() -> &'static [Pace] {
        &[Pace::Low, Pace::Steady, Pace::Flow]
    }
}

impl Default for Pace {
    fn default() -> Self {
        Pace::Steady
    }
}

/// Run-level status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RunStatus {
    NotStarted,
    Running,
    Paused,
    Completed,
    Abandoned,
}

impl RunStatus {
    /// Terminal runs accept no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Abandoned)
    }
}

/// Task-level status within a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    Pending,
    Active,
    Completed,
    Skipped,
}

impl TaskStatus {
    /// Completed/skipped tasks never change status again
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Skipped)
    }
}

/// Target position for queue reordering.
///
/// Positions address the pending sub-list only; active and terminal tasks
/// are excluded from it, which is why `Next` lands a task immediately after
/// the active one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovePosition {
    /// Swap with the previous pending task (clamped at the front)
    Up,
    /// Swap with the following pending task (clamped at the back)
    Down,
    /// Front of the pending sub-list, i.e. right after the active task
    Next,
    /// Back of the pending sub-list
    End,
    /// Explicit index into the pending sub-list, clamped into range
    Index(usize),
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    /// Choosing a template and pace before a run exists
    Picker,
    /// A run is on screen (any run status)
    Run,
    /// Entering a quick task name
    QuickTaskForm,
    /// Confirming abandonment of the current run
    ConfirmEnd,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pace_default_is_steady() {
        assert_eq!(Pace::default(), Pace::Steady);
    }

    #[test]
    fn test_pace_all_order() {
        assert_eq!(Pace::all(), &[Pace::Low, Pace::Steady, Pace::Flow]);
    }

    #[test]
    fn test_run_status_terminal() {
        assert!(!RunStatus::NotStarted.is_terminal());
        assert!(!RunStatus::Running.is_terminal());
        assert!(!RunStatus::Paused.is_terminal());
        assert!(RunStatus::Completed.is_terminal());
        assert!(RunStatus::Abandoned.is_terminal());
    }

    #[test]
    fn test_task_status_terminal() {
        assert!(!TaskStatus::Pending.is_terminal());
        assert!(!TaskStatus::Active.is_terminal());
        assert!(TaskStatus::Completed.is_terminal());
        assert!(TaskStatus::Skipped.is_terminal());
    }

    #[test]
    fn test_status_serde_tags_are_camel_case() {
        assert_eq!(
            serde_json::to_string(&RunStatus::NotStarted).unwrap(),
            "\"notStarted\""
        );
        assert_eq!(
            serde_json::to_string(&TaskStatus::Skipped).unwrap(),
            "\"skipped\""
        );
        assert_eq!(serde_json::to_string(&Pace::Flow).unwrap(), "\"flow\"");
    }
}
