use crate::app::AppState;
use crate::ui::layout::centered_rect;
use crate::ui::styles::{modal_bg_style, modal_title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render the end-run confirmation modal
pub fn render_confirm_end_modal(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(run) = &app.run else { return };

    let modal_area = centered_rect(44, 6, area);
    f.render_widget(Clear, modal_area);

    let lines = vec![
        Line::from(""),
        Line::from(format!("  End \"{}\" early?", run.template_name)),
        Line::from(""),
        Line::from("  y end run    n keep going"),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(" End run ", modal_title_style()));
    let paragraph = Paragraph::new(lines).style(modal_bg_style()).block(block);
    f.render_widget(paragraph, modal_area);
}

/// Render the quick-task input form
pub fn render_quick_form(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(form) = &app.quick_form else { return };

    let modal_area = centered_rect(48, 7, area);
    f.render_widget(Clear, modal_area);

    let cursor = |field: usize| if form.editing_field == field { "▌" } else { "" };
    let lines = vec![
        Line::from(""),
        Line::from(format!("  Task: {}{}", form.name, cursor(0))),
        Line::from(format!(
            "  Time: {}{}   (e.g. ~15 min)",
            form.duration_text,
            cursor(1)
        )),
        Line::from(""),
        Line::from("  Tab field · Enter add · Esc cancel"),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(" Quick task ", modal_title_style()));
    let paragraph = Paragraph::new(lines).style(modal_bg_style()).block(block);
    f.render_widget(paragraph, modal_area);
}
