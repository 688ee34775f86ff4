pub mod keybindings;
pub mod layout;
pub mod modal;
pub mod picker_pane;
pub mod queue_pane;
pub mod styles;
pub mod timer_pane;

use crate::app::AppState;
use crate::domain::UiMode;
use crate::ui::styles::hint_style;
use keybindings::render_keybindings;
use layout::{create_picker_layout, create_run_layout};
use modal::{render_confirm_end_modal, render_quick_form};
use picker_pane::render_picker_pane;
use queue_pane::render_queue_pane;
use ratatui::{text::Line, widgets::Paragraph, Frame};
use timer_pane::render_timer_pane;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();

    if app.run.is_none() {
        let layout = create_picker_layout(size);
        render_keybindings(f, app.ui_mode, layout.keybindings_area);
        render_picker_pane(f, app, layout.picker_area);
    } else {
        let layout = create_run_layout(size);
        render_keybindings(f, app.ui_mode, layout.keybindings_area);
        render_queue_pane(f, app, layout.queue_area);
        render_timer_pane(f, app, layout.timer_area);

        if let Some(status) = &app.status_line {
            let paragraph = Paragraph::new(Line::from(format!(" {}", status))).style(hint_style());
            f.render_widget(paragraph, layout.status_area);
        }
    }

    // Overlays
    if app.ui_mode == UiMode::QuickTaskForm {
        render_quick_form(f, app, size);
    }
    if app.ui_mode == UiMode::ConfirmEnd {
        render_confirm_end_modal(f, app, size);
    }
}
