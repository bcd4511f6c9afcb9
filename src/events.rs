use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::app::App;

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),

        // Navigation within the node list
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::PageUp => app.select_prev_n(10),
        KeyCode::PageDown => app.select_next_n(10),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        // Activate the highlighted probe
        KeyCode::Enter => app.select_cursor(),

        // Immediate refresh, outside the timers
        KeyCode::Char('r') => app.refresh(),

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        _ => {}
    }
}

/// Handle mouse events.
///
/// `node_panel` is the inner area of the node list (inside its borders) so
/// clicked rows can be mapped back to list indices. Each node card is two
/// lines tall.
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent, node_panel: Rect) {
    match mouse.kind {
        // Scroll wheel moves the highlight cursor
        MouseEventKind::ScrollUp => app.select_prev(),
        MouseEventKind::ScrollDown => app.select_next(),

        // Click to select a probe
        MouseEventKind::Down(MouseButton::Left) => {
            let inside = mouse.column >= node_panel.x
                && mouse.column < node_panel.x + node_panel.width
                && mouse.row >= node_panel.y
                && mouse.row < node_panel.y + node_panel.height;
            if inside {
                // The list may be scrolled; the first visible card is
                // `list_offset`, each card is two lines.
                let row = app.list_offset + ((mouse.row - node_panel.y) / 2) as usize;
                app.select_row(row);
            }
        }

        _ => {}
    }
}
