use crate::announcer;
use crate::domain::{
    check_auto_advance_warning, check_milestone_reminder, check_overtime_reminder, check_time_up,
    compute_remaining_time, flatten_queue, tasks_in_queue_order, AdhocItem, MovePosition, Pace,
    Run, RunEvent, RunStatus, Template, UiMode,
};
use crate::persistence::{clear_run, run_file, save_run};
use crate::speech;
use anyhow::Result;
use chrono::Utc;
use uuid::Uuid;

/// Input form state for naming a quick task
#[derive(Debug, Clone)]
pub struct QuickTaskFormState {
    pub name: String,
    pub duration_text: String,
    pub editing_field: usize, // 0 = name, 1 = duration
}

impl QuickTaskFormState {
    fn empty() -> Self {
        Self {
            name: String::new(),
            duration_text: String::new(),
            editing_field: 0,
        }
    }
}

/// Main application state.
///
/// The current run is held as a single immutable snapshot; every transition
/// swaps it wholesale, so a mid-render tick can never observe a half-applied
/// change.
pub struct AppState {
    pub templates: Vec<Template>,
    pub run: Option<Run>,
    pub ui_mode: UiMode,
    pub selected_template: usize,
    pub selected_pace: Pace,
    /// Selection into the flattened queue rows
    pub selected_index: usize,
    pub quick_form: Option<QuickTaskFormState>,
    pub needs_save: bool,
    /// Most recent announcement, echoed in the footer
    pub status_line: Option<String>,
}

impl AppState {
    pub fn new(templates: Vec<Template>, run: Option<Run>) -> Self {
        let ui_mode = if run.is_some() {
            UiMode::Run
        } else {
            UiMode::Picker
        };
        Self {
            templates,
            run,
            ui_mode,
            selected_template: 0,
            selected_pace: Pace::default(),
            selected_index: 0,
            quick_form: None,
            needs_save: false,
            status_line: None,
        }
    }

    // --- Template picker ---

    pub fn picker_up(&mut self) {
        if self.selected_template > 0 {
            self.selected_template -= 1;
        }
    }

    pub fn picker_down(&mut self) {
        if self.selected_template + 1 < self.templates.len() {
            self.selected_template += 1;
        }
    }

    pub fn set_pace(&mut self, pace: Pace) {
        self.selected_pace = pace;
    }

    /// Cycle pace in picker order (wraps around)
    pub fn cycle_pace(&mut self) {
        let paces = Pace::all();
        let current = paces
            .iter()
            .position(|pace| *pace == self.selected_pace)
            .unwrap_or(0);
        self.selected_pace = paces[(current + 1) % paces.len()];
    }

    /// Create and start a run from the selected template at the selected pace
    pub fn start_selected_template(&mut self) {
        let Some(template) = self.templates.get(self.selected_template) else {
            return;
        };
        let now = Utc::now();
        let run = Run::from_template(template, self.selected_pace, now);
        if let Ok(started) = run.start(now) {
            self.selected_index = 0;
            self.ui_mode = UiMode::Run;
            self.commit(started);
        }
    }

    // --- Queue selection ---

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        let rows = self.run.as_ref().map(|run| flatten_queue(run).len()).unwrap_or(0);
        if self.selected_index + 1 < rows {
            self.selected_index += 1;
        }
    }

    /// ID of the task under the cursor (the parent task for subtask rows)
    pub fn selected_task_id(&self) -> Option<Uuid> {
        let run = self.run.as_ref()?;
        let rows = flatten_queue(run);
        let row = rows.get(self.selected_index)?;
        Some(tasks_in_queue_order(run)[row.task_index].id)
    }

    /// Whether the cursor sits on a subtask row
    pub fn selection_is_subtask(&self) -> bool {
        self.selected_subtask_id().is_some()
    }

    /// Subtask under the cursor, if the cursor is on a subtask row
    fn selected_subtask_id(&self) -> Option<(Uuid, Uuid)> {
        let run = self.run.as_ref()?;
        let rows = flatten_queue(run);
        let row = rows.get(self.selected_index)?;
        let task = tasks_in_queue_order(run)[row.task_index];
        let subtask_index = row.subtask_index?;
        let subtask = task.subtasks.as_ref()?.get(subtask_index)?;
        Some((task.id, subtask.id))
    }

    fn clamp_selection(&mut self) {
        let rows = self.run.as_ref().map(|run| flatten_queue(run).len()).unwrap_or(0);
        if rows == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= rows {
            self.selected_index = rows - 1;
        }
    }

    // --- Run transitions ---

    /// Toggle pause/resume on the current run
    pub fn toggle_pause(&mut self) {
        let Some(run) = &self.run else { return };
        let now = Utc::now();
        let transitioned = match run.status {
            RunStatus::Running => run.pause(now),
            RunStatus::Paused => run.resume(now),
            _ => return,
        };
        if let Ok(next) = transitioned {
            self.commit(next);
        }
    }

    /// Complete the active task and move on
    pub fn advance(&mut self) {
        let Some(run) = &self.run else { return };
        if run.status != RunStatus::Running {
            return;
        }
        if let Ok(outcome) = run.advance(Utc::now()) {
            self.commit(outcome.run);
            self.dispatch(&outcome.events);
        }
    }

    /// Skip the task under the cursor
    pub fn skip_selected(&mut self) {
        let Some(task_id) = self.selected_task_id() else {
            return;
        };
        let Some(run) = &self.run else { return };
        if run.status != RunStatus::Running {
            return;
        }
        let outcome = run.skip(task_id, Utc::now());
        self.commit(outcome.run);
        self.dispatch(&outcome.events);
    }

    /// Grant the active task fresh time from this moment
    pub fn extend_active(&mut self, delta_ms: i64) {
        let Some(run) = &self.run else { return };
        let Some(active_id) = run.active_task_id else {
            return;
        };
        let next = run.extend(active_id, delta_ms, Utc::now());
        self.commit(next);
    }

    /// Reposition the task under the cursor, keeping the cursor on it
    pub fn move_selected(&mut self, position: MovePosition) {
        let Some(task_id) = self.selected_task_id() else {
            return;
        };
        let Some(run) = &self.run else { return };
        if let Ok(next) = run.move_task(task_id, position) {
            let rows = flatten_queue(&next);
            let tasks = tasks_in_queue_order(&next);
            if let Some(row) = rows
                .iter()
                .find(|row| row.subtask_index.is_none() && tasks[row.task_index].id == task_id)
            {
                self.selected_index = row.index;
            }
            self.commit(next);
        }
    }

    /// Toggle auto-advance on the task under the cursor
    pub fn toggle_auto_advance_selected(&mut self) {
        let Some(task_id) = self.selected_task_id() else {
            return;
        };
        let Some(run) = &self.run else { return };
        let next = run.toggle_auto_advance(task_id);
        self.commit(next);
    }

    /// Toggle the subtask checkbox under the cursor
    pub fn toggle_selected_subtask(&mut self) {
        let Some((task_id, subtask_id)) = self.selected_subtask_id() else {
            return;
        };
        let Some(run) = &self.run else { return };
        let next = run.toggle_subtask(task_id, subtask_id);
        self.commit(next);
    }

    /// Ask for confirmation before abandoning the run
    pub fn request_end(&mut self) {
        if let Some(run) = &self.run {
            if !run.status.is_terminal() {
                self.ui_mode = UiMode::ConfirmEnd;
            }
        }
    }

    pub fn cancel_end(&mut self) {
        self.ui_mode = UiMode::Run;
    }

    /// Abandon the current run
    pub fn confirm_end(&mut self) {
        self.ui_mode = UiMode::Run;
        let Some(run) = &self.run else { return };
        if let Ok(ended) = run.end(Utc::now()) {
            self.commit(ended);
        }
    }

    /// Discard a terminal run and return to the picker
    pub fn clear_finished_run(&mut self) -> Result<()> {
        let Some(run) = &self.run else {
            return Ok(());
        };
        if !run.status.is_terminal() {
            return Ok(());
        }
        clear_run(run_file()?)?;
        self.run = None;
        self.needs_save = false;
        self.selected_index = 0;
        self.status_line = None;
        self.ui_mode = UiMode::Picker;
        Ok(())
    }

    // --- Quick task form ---

    pub fn open_quick_form(&mut self) {
        self.quick_form = Some(QuickTaskFormState::empty());
        self.ui_mode = UiMode::QuickTaskForm;
    }

    pub fn quick_form_toggle_field(&mut self) {
        if let Some(form) = &mut self.quick_form {
            form.editing_field = (form.editing_field + 1) % 2;
        }
    }

    pub fn quick_form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.quick_form {
            match form.editing_field {
                0 => form.name.push(c),
                _ => form.duration_text.push(c),
            }
        }
    }

    pub fn quick_form_backspace(&mut self) {
        if let Some(form) = &mut self.quick_form {
            match form.editing_field {
                0 => {
                    form.name.pop();
                }
                _ => {
                    form.duration_text.pop();
                }
            }
        }
    }

    pub fn cancel_quick_form(&mut self) {
        self.quick_form = None;
        self.ui_mode = if self.run.is_some() {
            UiMode::Run
        } else {
            UiMode::Picker
        };
    }

    /// Submit the form: with a run on screen the task joins the queue right
    /// after the active task; from the picker it becomes a single-task run.
    pub fn submit_quick_form(&mut self) {
        let Some(form) = self.quick_form.take() else {
            return;
        };
        let name = form.name.trim().to_string();
        if name.is_empty() {
            self.ui_mode = if self.run.is_some() {
                UiMode::Run
            } else {
                UiMode::Picker
            };
            return;
        }

        let duration_text = {
            let trimmed = form.duration_text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };

        match &self.run {
            Some(run) => {
                let duration_ms =
                    crate::domain::parse_duration_text(duration_text.as_deref());
                let next = run.add_quick_task(name, duration_ms);
                self.ui_mode = UiMode::Run;
                self.commit(next);
            }
            None => {
                let item = AdhocItem {
                    text: name,
                    duration_text,
                    subtasks: None,
                };
                let now = Utc::now();
                let run = Run::from_item(&item, now);
                if let Ok(started) = run.start(now) {
                    self.selected_index = 0;
                    self.ui_mode = UiMode::Run;
                    self.commit(started);
                }
            }
        }
    }

    // --- Tick loop ---

    /// One cooperative tick: recompute the active task's timer and fire at
    /// most one announcement per crossing, guarded by the per-task markers.
    pub fn tick(&mut self) {
        let Some(run) = self.run.clone() else { return };
        if run.status != RunStatus::Running {
            return;
        }
        let Some(active) = run.active_task() else {
            return;
        };
        let Some(time) = compute_remaining_time(active, false, None, Utc::now()) else {
            return;
        };

        let task_id = active.id;
        let name = active.name.clone();
        let auto_advance = active.auto_advance;

        if check_time_up(active, &time) {
            self.announce(announcer::time_up_text(&name));
            self.commit(run.mark_time_up_announced(task_id));
            if auto_advance {
                self.advance();
            }
            return;
        }

        if let Some(minutes) = check_overtime_reminder(active, &time) {
            self.announce(announcer::overtime_text(&name, minutes));
            self.commit(run.mark_overtime_announced(task_id, minutes));
            return;
        }

        if let Some(minutes) = check_milestone_reminder(active, &time) {
            self.announce(announcer::milestone_text(&name, minutes));
            self.commit(run.mark_milestone_announced(task_id, minutes));
            return;
        }

        if check_auto_advance_warning(active, &time) {
            self.announce(announcer::auto_advance_warning_text(&name));
            self.commit(run.mark_auto_advance_warning_announced(task_id));
        }
    }

    // --- Persistence ---

    /// Save the current run snapshot if it changed
    pub fn save(&mut self) -> Result<()> {
        if let Some(run) = &self.run {
            save_run(run_file()?, run)?;
        }
        self.needs_save = false;
        Ok(())
    }

    // --- Internal ---

    /// Swap in a new snapshot
    fn commit(&mut self, run: Run) {
        self.run = Some(run);
        self.needs_save = true;
        self.clamp_selection();
    }

    /// Render events to text and hand them to the collaborators. Dispatch is
    /// fire-and-forget: a failing speech process never reaches the snapshot.
    fn dispatch(&mut self, events: &[RunEvent]) {
        for event in events {
            let message = announcer::announcement_text(event);
            self.announce(message);
        }
    }

    fn announce(&mut self, message: String) {
        speech::announce(&message);
        self.status_line = Some(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TemplateTask;

    fn templates() -> Vec<Template> {
        vec![
            Template::new(
                "Morning",
                vec![
                    TemplateTask::new("Make bed", 300_000, 0),
                    TemplateTask::new("Shower", 600_000, 1),
                ],
            ),
            Template::new("Evening", vec![TemplateTask::new("Dishes", 600_000, 0)]),
        ]
    }

    #[test]
    fn test_new_without_run_opens_picker() {
        let app = AppState::new(templates(), None);
        assert_eq!(app.ui_mode, UiMode::Picker);
        assert_eq!(app.selected_pace, Pace::Steady);
    }

    #[test]
    fn test_picker_selection_clamps() {
        let mut app = AppState::new(templates(), None);
        app.picker_up();
        assert_eq!(app.selected_template, 0);
        app.picker_down();
        assert_eq!(app.selected_template, 1);
        app.picker_down();
        assert_eq!(app.selected_template, 1);
    }

    #[test]
    fn test_cycle_pace_wraps() {
        let mut app = AppState::new(templates(), None);
        app.cycle_pace();
        assert_eq!(app.selected_pace, Pace::Flow);
        app.cycle_pace();
        assert_eq!(app.selected_pace, Pace::Low);
        app.cycle_pace();
        assert_eq!(app.selected_pace, Pace::Steady);
    }

    #[test]
    fn test_start_selected_template_activates_first_task() {
        let mut app = AppState::new(templates(), None);
        app.start_selected_template();

        assert_eq!(app.ui_mode, UiMode::Run);
        let run = app.run.as_ref().unwrap();
        assert_eq!(run.status, RunStatus::Running);
        assert_eq!(run.active_task().unwrap().name, "Make bed");
        assert!(app.needs_save);
    }

    #[test]
    fn test_advance_dispatches_transition_message() {
        let mut app = AppState::new(templates(), None);
        app.start_selected_template();
        app.advance();

        let run = app.run.as_ref().unwrap();
        assert_eq!(run.active_task().unwrap().name, "Shower");
        assert_eq!(
            app.status_line.as_deref(),
            Some("Make bed done. Next up: Shower.")
        );
    }

    #[test]
    fn test_advance_to_completion() {
        let mut app = AppState::new(templates(), None);
        app.selected_template = 1;
        app.start_selected_template();
        app.advance();

        let run = app.run.as_ref().unwrap();
        assert_eq!(run.status, RunStatus::Completed);
        assert_eq!(app.status_line.as_deref(), Some("Routine complete. Well done."));
    }

    #[test]
    fn test_selection_follows_moved_task() {
        let mut app = AppState::new(templates(), None);
        app.start_selected_template();

        // Select the pending task (row 1) and send it to the front of the
        // pending sub-list; it stays selected at the same spot
        app.selected_index = 1;
        let moved_id = app.selected_task_id().unwrap();
        app.move_selected(MovePosition::Next);
        assert_eq!(app.selected_task_id(), Some(moved_id));
    }

    #[test]
    fn test_quick_form_edits_both_fields() {
        let mut app = AppState::new(templates(), None);
        app.open_quick_form();
        assert_eq!(app.ui_mode, UiMode::QuickTaskForm);

        for c in "Call".chars() {
            app.quick_form_add_char(c);
        }
        app.quick_form_toggle_field();
        for c in "~5 min".chars() {
            app.quick_form_add_char(c);
        }
        app.quick_form_backspace();
        app.quick_form_add_char('n');

        let form = app.quick_form.as_ref().unwrap();
        assert_eq!(form.name, "Call");
        assert_eq!(form.duration_text, "~5 min");
    }

    #[test]
    fn test_quick_form_from_picker_starts_single_task_run() {
        let mut app = AppState::new(templates(), None);
        app.open_quick_form();
        for c in "Water plants".chars() {
            app.quick_form_add_char(c);
        }
        app.submit_quick_form();

        let run = app.run.as_ref().unwrap();
        assert_eq!(run.status, RunStatus::Running);
        assert_eq!(run.tasks.len(), 1);
        assert_eq!(run.tasks[0].duration_ms, 900_000);
        assert_eq!(run.active_task().unwrap().name, "Water plants");
    }

    #[test]
    fn test_quick_form_with_run_joins_queue() {
        let mut app = AppState::new(templates(), None);
        app.start_selected_template();
        app.open_quick_form();
        for c in "Answer door".chars() {
            app.quick_form_add_char(c);
        }
        app.quick_form_toggle_field();
        for c in "~2 min".chars() {
            app.quick_form_add_char(c);
        }
        app.submit_quick_form();

        let run = app.run.as_ref().unwrap();
        let names: Vec<&str> = crate::domain::tasks_in_queue_order(run)
            .iter()
            .map(|task| task.name.as_str())
            .collect();
        assert_eq!(names, vec!["Make bed", "Answer door", "Shower"]);
    }

    #[test]
    fn test_empty_quick_form_submission_is_ignored() {
        let mut app = AppState::new(templates(), None);
        app.open_quick_form();
        app.submit_quick_form();
        assert!(app.run.is_none());
        assert_eq!(app.ui_mode, UiMode::Picker);
    }

    #[test]
    fn test_end_requires_confirmation() {
        let mut app = AppState::new(templates(), None);
        app.start_selected_template();

        app.request_end();
        assert_eq!(app.ui_mode, UiMode::ConfirmEnd);
        app.cancel_end();
        assert_eq!(app.run.as_ref().unwrap().status, RunStatus::Running);

        app.request_end();
        app.confirm_end();
        assert_eq!(app.run.as_ref().unwrap().status, RunStatus::Abandoned);
    }

    #[test]
    fn test_toggle_pause_round_trip() {
        let mut app = AppState::new(templates(), None);
        app.start_selected_template();

        app.toggle_pause();
        assert_eq!(app.run.as_ref().unwrap().status, RunStatus::Paused);
        app.toggle_pause();
        assert_eq!(app.run.as_ref().unwrap().status, RunStatus::Running);
    }
}
