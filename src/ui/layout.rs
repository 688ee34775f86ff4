use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure for the run screen
pub struct RunLayout {
    pub keybindings_area: Rect,
    pub queue_area: Rect,
    pub timer_area: Rect,
    pub status_area: Rect,
}

/// Create the run-screen layout
/// - Top bar: keybindings (1 row)
/// - Main area: queue (60%) | timer (40%)
/// - Bottom bar: last announcement (1 row)
pub fn create_run_layout(area: Rect) -> RunLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Keybindings bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Status line
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60), // Queue pane
            Constraint::Percentage(40), // Timer pane
        ])
        .split(vertical[1]);

    RunLayout {
        keybindings_area: vertical[0],
        queue_area: horizontal[0],
        timer_area: horizontal[1],
        status_area: vertical[2],
    }
}

/// Layout for the template picker: keybindings bar over the picker list
pub struct PickerLayout {
    pub keybindings_area: Rect,
    pub picker_area: Rect,
}

pub fn create_picker_layout(area: Rect) -> PickerLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    PickerLayout {
        keybindings_area: vertical[0],
        picker_area: vertical[1],
    }
}

/// Centered rectangle for modal overlays
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
