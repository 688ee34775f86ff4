use crate::app::AppState;
use crate::domain::{derive_visible_tasks, format_time, Pace};
use crate::ui::styles::{
    border_style, default_style, hint_style, selected_style, title_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Render the template/pace picker
pub fn render_picker_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let chunks = ratatui::layout::Layout::default()
        .direction(ratatui::layout::Direction::Vertical)
        .constraints([
            ratatui::layout::Constraint::Length(3), // Pace selector
            ratatui::layout::Constraint::Min(0),    // Template list
        ])
        .split(area);

    render_pace_line(f, app, chunks[0]);
    render_template_list(f, app, chunks[1]);
}

fn render_pace_line(f: &mut Frame, app: &AppState, area: Rect) {
    let mut spans = vec![Span::raw(" ")];
    for pace in Pace::all() {
        let label = format!(" {} {} ", pace.symbol(), pace.name());
        if *pace == app.selected_pace {
            spans.push(Span::styled(label, selected_style()));
        } else {
            spans.push(Span::styled(label, hint_style()));
        }
        spans.push(Span::raw(" "));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled("Pace", title_style()));
    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    f.render_widget(paragraph, area);
}

fn render_template_list(f: &mut Frame, app: &AppState, area: Rect) {
    let items: Vec<ListItem> = app
        .templates
        .iter()
        .enumerate()
        .map(|(index, template)| {
            let visible = derive_visible_tasks(&template.tasks, app.selected_pace);
            let total_ms: i64 = visible
                .iter()
                .map(|task| task.duration_ms)
                .sum();

            let summary = format!(
                "{}  ({} tasks · {})",
                template.name,
                visible.len(),
                format_time(total_ms)
            );

            let mut line = vec![Span::raw(" "), Span::raw(summary)];
            if let Some(description) = &template.description {
                line.push(Span::styled(
                    format!("   {}", description),
                    hint_style(),
                ));
            }

            let style = if index == app.selected_template {
                selected_style()
            } else {
                default_style()
            };
            ListItem::new(Line::from(line)).style(style)
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled("Routines", title_style()));
    f.render_widget(List::new(items).block(block), area);
}
