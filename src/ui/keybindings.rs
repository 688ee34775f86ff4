use crate::ui::styles::hint_style;
use crate::domain::UiMode;
use ratatui::{layout::Rect, text::Line, widgets::Paragraph, Frame};

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, mode: UiMode, area: Rect) {
    let hints = match mode {
        UiMode::Picker => Line::from(
            " ↑/↓ template   ←/→ pace   1/2/3 low/steady/flow   Enter start   a one-off   q quit",
        ),
        UiMode::Run => Line::from(
            " ↑/↓ select   Shift+↑/↓ reorder   n next   b last   Space pause   Enter done   k skip   +/- 5m   a quick   t auto   e end   q quit",
        ),
        UiMode::QuickTaskForm => Line::from(" Tab field   Enter add   Esc cancel"),
        UiMode::ConfirmEnd => Line::from(" y end run   n keep going"),
    };

    let paragraph = Paragraph::new(hints).style(hint_style());
    f.render_widget(paragraph, area);
}
