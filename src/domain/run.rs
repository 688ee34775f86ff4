use super::enums::{Pace, RunStatus, TaskStatus};
use super::estimate::parse_duration_text;
use super::template::{derive_visible_tasks, Template, TemplateTask};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A checklist entry within a run task. Pure data; no lifecycle of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSubtask {
    pub id: Uuid,
    pub text: String,
    pub checked: bool,
    pub order: u32,
}

/// One task's execution state within a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunTask {
    pub id: Uuid,
    /// Template task this was derived from (absent for ad-hoc tasks)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_task_id: Option<Uuid>,
    pub name: String,
    pub duration_ms: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtasks: Option<Vec<RunSubtask>>,
    pub status: TaskStatus,
    /// Position in the run queue (contiguous 0..n-1 across all tasks)
    pub order: u32,
    pub started_at: Option<DateTime<Utc>>,
    pub planned_end_at: Option<DateTime<Utc>>,
    /// Cumulative record of extensions granted (may go negative)
    pub extension_ms: i64,
    pub completed_at: Option<DateTime<Utc>>,
    /// Overtime 5-minute boundaries already announced
    pub overtime_announced_minutes: Vec<i64>,
    /// Elapsed-time milestones already announced
    pub milestone_announced_minutes: Vec<i64>,
    pub auto_advance: bool,
    pub auto_advance_warning_announced: bool,
    pub time_up_announced: bool,
}

impl RunTask {
    /// Build a pending task with all timer fields zeroed/null
    fn fresh(name: impl Into<String>, duration_ms: i64, order: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            template_task_id: None,
            name: name.into(),
            duration_ms,
            subtasks: None,
            status: TaskStatus::Pending,
            order,
            started_at: None,
            planned_end_at: None,
            extension_ms: 0,
            completed_at: None,
            overtime_announced_minutes: Vec::new(),
            milestone_announced_minutes: Vec::new(),
            auto_advance: false,
            auto_advance_warning_announced: false,
            time_up_announced: false,
        }
    }

    fn from_template_task(task: &TemplateTask, order: u32) -> Self {
        let mut run_task = Self::fresh(task.name.clone(), task.duration_ms, order);
        run_task.template_task_id = Some(task.id);
        run_task.auto_advance = task.auto_advance;
        run_task.subtasks = task.subtasks.as_ref().map(|texts| build_subtasks(texts));
        run_task
    }

    /// Build an ad-hoc pending task (quick task or single-item run)
    pub(crate) fn adhoc(name: impl Into<String>, duration_ms: i64, order: u32) -> Self {
        Self::fresh(name, duration_ms, order)
    }
}

fn build_subtasks(texts: &[String]) -> Vec<RunSubtask> {
    texts
        .iter()
        .enumerate()
        .map(|(index, text)| RunSubtask {
            id: Uuid::new_v4(),
            text: text.clone(),
            checked: false,
            order: index as u32,
        })
        .collect()
}

/// An ad-hoc item promoted into a single-task run (e.g. from a brain dump)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdhocItem {
    pub text: String,
    /// Free-text estimate like `"~15 min"`; unparseable input falls back to
    /// 15 minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtasks: Option<Vec<String>>,
}

/// A live instantiation of a template being executed with timers.
///
/// Runs are immutable snapshots: every transition constructs a new value, so
/// the UI always swaps whole snapshots and never observes an intermediate
/// state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Run {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<Uuid>,
    pub template_name: String,
    pub pace: Pace,
    pub tasks: Vec<RunTask>,
    pub status: RunStatus,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub paused_at: Option<DateTime<Utc>>,
    pub total_pause_ms: i64,
    pub ended_at: Option<DateTime<Utc>>,
    pub active_task_id: Option<Uuid>,
}

impl Run {
    /// Create a run from a template at the given pace.
    ///
    /// Tasks are filtered by pace, sorted by template order, and renumbered
    /// contiguously from zero for the run.
    pub fn from_template(template: &Template, pace: Pace, now: DateTime<Utc>) -> Self {
        let tasks = derive_visible_tasks(&template.tasks, pace)
            .iter()
            .enumerate()
            .map(|(index, task)| RunTask::from_template_task(task, index as u32))
            .collect();

        Self {
            id: Uuid::new_v4(),
            template_id: Some(template.id),
            template_name: template.name.clone(),
            pace,
            tasks,
            status: RunStatus::NotStarted,
            created_at: now,
            started_at: None,
            paused_at: None,
            total_pause_ms: 0,
            ended_at: None,
            active_task_id: None,
        }
    }

    /// Create a single-task run from an ad-hoc item. Pace defaults to steady.
    pub fn from_item(item: &AdhocItem, now: DateTime<Utc>) -> Self {
        let duration_ms = parse_duration_text(item.duration_text.as_deref());
        let mut task = RunTask::adhoc(item.text.clone(), duration_ms, 0);
        if let Some(texts) = &item.subtasks {
            if !texts.is_empty() {
                task.subtasks = Some(build_subtasks(texts));
            }
        }

        Self {
            id: Uuid::new_v4(),
            template_id: None,
            template_name: item.text.clone(),
            pace: Pace::Steady,
            tasks: vec![task],
            status: RunStatus::NotStarted,
            created_at: now,
            started_at: None,
            paused_at: None,
            total_pause_ms: 0,
            ended_at: None,
            active_task_id: None,
        }
    }

    /// Find a task by ID
    pub fn task(&self, task_id: Uuid) -> Option<&RunTask> {
        self.tasks.iter().find(|task| task.id == task_id)
    }

    /// The currently active task, if any
    pub fn active_task(&self) -> Option<&RunTask> {
        let active_id = self.active_task_id?;
        self.task(active_id)
    }

    /// The pending task with the smallest order (next to run)
    pub fn next_pending(&self) -> Option<&RunTask> {
        self.tasks
            .iter()
            .filter(|task| task.status == TaskStatus::Pending)
            .min_by_key(|task| task.order)
    }

    /// Count of tasks still pending
    pub fn pending_count(&self) -> usize {
        self.tasks
            .iter()
            .filter(|task| task.status == TaskStatus::Pending)
            .count()
    }

    /// Clone the run with one task rewritten in place.
    ///
    /// An unknown ID yields an unchanged clone, keeping callers total.
    pub(crate) fn with_task<F>(&self, task_id: Uuid, mutate: F) -> Run
    where
        F: FnOnce(&mut RunTask),
    {
        let mut next = self.clone();
        if let Some(task) = next.tasks.iter_mut().find(|task| task.id == task_id) {
            mutate(task);
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap()
    }

    fn template_with_orders() -> Template {
        let mut first = TemplateTask::new("Make bed", 300_000, 3);
        first.low_included = Some(true);
        let second = TemplateTask::new("Shower", 600_000, 7);
        Template::new("Morning", vec![second, first])
    }

    #[test]
    fn test_from_template_sorts_and_renumbers() {
        let template = template_with_orders();
        let run = Run::from_template(&template, Pace::Steady, fixed_now());

        assert_eq!(run.status, RunStatus::NotStarted);
        assert_eq!(run.template_id, Some(template.id));
        assert_eq!(run.tasks.len(), 2);
        // Template order 3 comes first, renumbered from zero
        assert_eq!(run.tasks[0].name, "Make bed");
        assert_eq!(run.tasks[0].order, 0);
        assert_eq!(run.tasks[1].name, "Shower");
        assert_eq!(run.tasks[1].order, 1);
    }

    #[test]
    fn test_from_template_filters_by_pace() {
        let template = template_with_orders();
        let run = Run::from_template(&template, Pace::Low, fixed_now());
        assert_eq!(run.tasks.len(), 1);
        assert_eq!(run.tasks[0].name, "Make bed");
        assert_eq!(run.tasks[0].order, 0);
    }

    #[test]
    fn test_run_tasks_start_with_zeroed_timers() {
        let template = template_with_orders();
        let run = Run::from_template(&template, Pace::Steady, fixed_now());

        for task in &run.tasks {
            assert_eq!(task.status, TaskStatus::Pending);
            assert!(task.started_at.is_none());
            assert!(task.planned_end_at.is_none());
            assert!(task.completed_at.is_none());
            assert_eq!(task.extension_ms, 0);
            assert!(task.overtime_announced_minutes.is_empty());
            assert!(task.milestone_announced_minutes.is_empty());
            assert!(!task.time_up_announced);
            assert!(!task.auto_advance_warning_announced);
        }
        assert!(run.active_task_id.is_none());
        assert_eq!(run.total_pause_ms, 0);
    }

    #[test]
    fn test_from_item_parses_duration() {
        let item = AdhocItem {
            text: "Call the bank".to_string(),
            duration_text: Some("~20 min".to_string()),
            subtasks: None,
        };
        let run = Run::from_item(&item, fixed_now());

        assert_eq!(run.pace, Pace::Steady);
        assert!(run.template_id.is_none());
        assert_eq!(run.tasks.len(), 1);
        assert_eq!(run.tasks[0].duration_ms, 1_200_000);
        assert!(run.tasks[0].subtasks.is_none());
    }

    #[test]
    fn test_from_item_falls_back_to_fifteen_minutes() {
        let item = AdhocItem {
            text: "Mystery errand".to_string(),
            duration_text: Some("later".to_string()),
            subtasks: None,
        };
        let run = Run::from_item(&item, fixed_now());
        assert_eq!(run.tasks[0].duration_ms, 900_000);
    }

    #[test]
    fn test_from_item_builds_subtasks() {
        let item = AdhocItem {
            text: "Pack bag".to_string(),
            duration_text: None,
            subtasks: Some(vec!["Laptop".to_string(), "Charger".to_string()]),
        };
        let run = Run::from_item(&item, fixed_now());

        let subtasks = run.tasks[0].subtasks.as_ref().unwrap();
        assert_eq!(subtasks.len(), 2);
        assert_eq!(subtasks[0].text, "Laptop");
        assert_eq!(subtasks[0].order, 0);
        assert!(!subtasks[0].checked);
        assert_eq!(subtasks[1].order, 1);
    }

    #[test]
    fn test_next_pending_takes_smallest_order() {
        let template = template_with_orders();
        let mut run = Run::from_template(&template, Pace::Steady, fixed_now());
        run.tasks[0].status = TaskStatus::Skipped;

        let next = run.next_pending().unwrap();
        assert_eq!(next.name, "Shower");
        assert_eq!(run.pending_count(), 1);
    }

    #[test]
    fn test_run_snapshot_serde_roundtrip() {
        let template = template_with_orders();
        let run = Run::from_template(&template, Pace::Flow, fixed_now());

        let json = serde_json::to_string(&run).unwrap();
        let roundtrip: Run = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, run);
        // Field names follow the JSON contract
        assert!(json.contains("\"templateName\""));
        assert!(json.contains("\"activeTaskId\""));
    }
}
