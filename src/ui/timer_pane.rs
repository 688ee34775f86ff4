use crate::app::AppState;
use crate::domain::{
    compute_remaining_time, format_time, format_time_remaining, remaining_planned_ms, RunStatus,
};
use crate::ui::styles::{
    border_style, countdown_style, default_style, done_style, hint_style, overtime_style,
    paused_style, title_style,
};
use chrono::Utc;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the active-task timer pane
pub fn render_timer_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(run) = &app.run else { return };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled("Now", title_style()));

    let mut lines: Vec<Line> = vec![Line::from("")];

    match run.status {
        RunStatus::Completed => {
            lines.push(Line::from(Span::styled("Routine complete ✓", done_style())));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Enter to close this run",
                hint_style(),
            )));
        }
        RunStatus::Abandoned => {
            lines.push(Line::from(Span::styled("Run ended early", paused_style())));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Enter to close this run",
                hint_style(),
            )));
        }
        _ => {
            if let Some(active) = run.active_task() {
                lines.push(Line::from(Span::raw(format!("  {}", active.name))));
                lines.push(Line::from(""));

                let is_paused = run.status == RunStatus::Paused;
                if let Some(time) =
                    compute_remaining_time(active, is_paused, run.paused_at, Utc::now())
                {
                    let countdown = format_time_remaining(&time);
                    let style = if time.is_overtime {
                        overtime_style()
                    } else {
                        countdown_style()
                    };
                    lines.push(Line::from(Span::styled(
                        format!("    {}", countdown),
                        style,
                    )));
                    lines.push(Line::from(""));
                    lines.push(Line::from(Span::styled(
                        format!(
                            "  elapsed {} of {}",
                            format_time(time.elapsed_ms),
                            format_time(time.total_planned_ms)
                        ),
                        hint_style(),
                    )));
                    if active.extension_ms != 0 {
                        lines.push(Line::from(Span::styled(
                            format!("  extended {}", format_time(active.extension_ms)),
                            hint_style(),
                        )));
                    }
                }

                if is_paused {
                    lines.push(Line::from(""));
                    lines.push(Line::from(Span::styled("  ⏸ paused", paused_style())));
                }
            }

            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!(
                    "  {} queued · {} left in routine · paused {}",
                    run.pending_count(),
                    format_time(remaining_planned_ms(run)),
                    format_time(run.total_pause_ms)
                ),
                hint_style(),
            )));
        }
    }

    let paragraph = Paragraph::new(lines).style(default_style()).block(block);
    f.render_widget(paragraph, area);
}
