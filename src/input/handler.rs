use crate::app::AppState;
use crate::domain::{MovePosition, Pace, UiMode};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Five minutes, the step granted by the extend keys
const EXTEND_STEP_MS: i64 = 5 * 60_000;

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match app.ui_mode {
        UiMode::Picker => handle_picker_mode(app, key),
        UiMode::Run => handle_run_mode(app, key),
        UiMode::QuickTaskForm => handle_quick_form_mode(app, key),
        UiMode::ConfirmEnd => handle_confirm_end_mode(app, key),
    }
}

/// Handle keys in the template/pace picker
fn handle_picker_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Up => {
            app.picker_up();
            Ok(false)
        }
        KeyCode::Down => {
            app.picker_down();
            Ok(false)
        }

        // Pace selection
        KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
            app.cycle_pace();
            Ok(false)
        }
        KeyCode::Char('1') => {
            app.set_pace(Pace::Low);
            Ok(false)
        }
        KeyCode::Char('2') => {
            app.set_pace(Pace::Steady);
            Ok(false)
        }
        KeyCode::Char('3') => {
            app.set_pace(Pace::Flow);
            Ok(false)
        }

        // Start the selected template
        KeyCode::Enter => {
            app.start_selected_template();
            Ok(false)
        }

        // Run a one-off item instead
        KeyCode::Char('a') | KeyCode::Char('A') => {
            app.open_quick_form();
            Ok(false)
        }

        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Ok(true),
        _ => Ok(false),
    }
}

/// Handle keys while a run is on screen
fn handle_run_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    let run_is_terminal = app
        .run
        .as_ref()
        .map(|run| run.status.is_terminal())
        .unwrap_or(false);

    if run_is_terminal {
        return match key.code {
            // Discard the finished run and return to the picker
            KeyCode::Enter | KeyCode::Esc => {
                app.clear_finished_run()?;
                Ok(false)
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => Ok(true),
            _ => Ok(false),
        };
    }

    match key.code {
        // Navigation (with Shift modifier for reordering)
        KeyCode::Up => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.move_selected(MovePosition::Up);
            } else {
                app.move_selection_up();
            }
            Ok(false)
        }
        KeyCode::Down => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.move_selected(MovePosition::Down);
            } else {
                app.move_selection_down();
            }
            Ok(false)
        }

        // Queue the selected task right after the active one, or last
        KeyCode::Char('n') | KeyCode::Char('N') => {
            app.move_selected(MovePosition::Next);
            Ok(false)
        }
        KeyCode::Char('b') | KeyCode::Char('B') => {
            app.move_selected(MovePosition::End);
            Ok(false)
        }

        // Pause / resume
        KeyCode::Char(' ') => {
            app.toggle_pause();
            Ok(false)
        }

        // Enter completes the active task, or toggles a subtask checkbox
        // when the cursor is on one
        KeyCode::Enter => {
            if app.selection_is_subtask() {
                app.toggle_selected_subtask();
            } else {
                app.advance();
            }
            Ok(false)
        }

        // Skip the selected task
        KeyCode::Char('k') | KeyCode::Char('K') => {
            app.skip_selected();
            Ok(false)
        }

        // Fresh-time extension of the active task
        KeyCode::Char('+') | KeyCode::Char('=') => {
            app.extend_active(EXTEND_STEP_MS);
            Ok(false)
        }
        KeyCode::Char('-') | KeyCode::Char('_') => {
            app.extend_active(-EXTEND_STEP_MS);
            Ok(false)
        }

        // Add a quick task to the queue
        KeyCode::Char('a') | KeyCode::Char('A') => {
            app.open_quick_form();
            Ok(false)
        }

        // Toggle auto-advance on the selected task
        KeyCode::Char('t') | KeyCode::Char('T') => {
            app.toggle_auto_advance_selected();
            Ok(false)
        }

        // Abandon the run (asks for confirmation)
        KeyCode::Char('e') | KeyCode::Char('E') => {
            app.request_end();
            Ok(false)
        }

        KeyCode::Char('q') | KeyCode::Char('Q') => Ok(true),
        _ => Ok(false),
    }
}

/// Handle keys in the quick-task form
fn handle_quick_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            app.cancel_quick_form();
            Ok(false)
        }
        KeyCode::Tab => {
            app.quick_form_toggle_field();
            Ok(false)
        }
        KeyCode::Enter => {
            app.submit_quick_form();
            Ok(false)
        }
        KeyCode::Backspace => {
            app.quick_form_backspace();
            Ok(false)
        }
        KeyCode::Char(c) => {
            app.quick_form_add_char(c);
            Ok(false)
        }
        _ => Ok(false),
    }
}

/// Handle keys in the end-run confirmation
fn handle_confirm_end_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            app.confirm_end();
            Ok(false)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.cancel_end();
            Ok(false)
        }
        _ => Ok(false),
    }
}
