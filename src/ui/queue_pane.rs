use crate::app::AppState;
use crate::domain::{
    compute_remaining_time, flatten_queue, format_time, status_badge, tasks_in_queue_order,
    tree_connector, Run, RunStatus, TaskStatus,
};
use crate::ui::styles::{
    active_style, border_style, default_style, done_style, hint_style, pending_style,
    selected_style, skipped_style, title_style, tree_style,
};
use chrono::{DateTime, Duration, Local, Utc};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};
use std::collections::HashMap;
use uuid::Uuid;

/// Projected clock-time finish for every non-terminal task, walking the
/// queue sequentially from the active task's remaining time
fn calculate_etas(run: &Run, now: DateTime<Utc>) -> HashMap<Uuid, DateTime<Local>> {
    let mut etas = HashMap::new();
    let mut accumulated = Duration::zero();

    for task in tasks_in_queue_order(run) {
        match task.status {
            TaskStatus::Active => {
                let remaining_ms = compute_remaining_time(
                    task,
                    run.status == RunStatus::Paused,
                    run.paused_at,
                    now,
                )
                .map(|time| time.remaining_ms.max(0))
                .unwrap_or(task.duration_ms + task.extension_ms);
                accumulated = accumulated + Duration::milliseconds(remaining_ms);
                etas.insert(task.id, (now + accumulated).with_timezone(&Local));
            }
            TaskStatus::Pending => {
                accumulated =
                    accumulated + Duration::milliseconds(task.duration_ms + task.extension_ms);
                etas.insert(task.id, (now + accumulated).with_timezone(&Local));
            }
            _ => {}
        }
    }

    etas
}

/// Render the run queue pane
pub fn render_queue_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(run) = &app.run else { return };

    let now = Utc::now();
    let etas = calculate_etas(run, now);
    let tasks = tasks_in_queue_order(run);
    let rows = flatten_queue(run);

    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| {
            let task = tasks[row.task_index];
            let selected = row.index == app.selected_index;

            let subtask = row
                .subtask_index
                .and_then(|index| task.subtasks.as_ref().and_then(|subs| subs.get(index)));
            let line = if let Some(subtask) = subtask {
                let checkbox = if subtask.checked { "[x]" } else { "[ ]" };
                Line::from(vec![
                    Span::styled(
                        format!("   {} ", tree_connector(row.is_last)),
                        tree_style(),
                    ),
                    Span::raw(format!("{} {}", checkbox, subtask.text)),
                ])
            } else {
                let badge_style = match task.status {
                    TaskStatus::Active => active_style(),
                    TaskStatus::Pending => pending_style(),
                    TaskStatus::Completed => done_style(),
                    TaskStatus::Skipped => skipped_style(),
                };

                let mut spans = vec![
                    Span::styled(format!(" {:<10}", status_badge(task)), badge_style),
                    Span::raw(format!(" {}", task.name)),
                    Span::styled(
                        format!("  {}", format_time(task.duration_ms + task.extension_ms)),
                        hint_style(),
                    ),
                ];
                if task.auto_advance {
                    spans.push(Span::styled("  ⟳", hint_style()));
                }
                if let Some(eta) = etas.get(&task.id) {
                    spans.push(Span::styled(
                        format!("  ~{}", eta.format("%H:%M")),
                        hint_style(),
                    ));
                }
                Line::from(spans)
            };

            let style = if selected {
                selected_style()
            } else {
                default_style()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let title = format!(
        "{} · {} {}",
        run.template_name,
        run.pace.symbol(),
        run.pace.name()
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(title, title_style()));
    f.render_widget(List::new(items).block(block), area);
}
