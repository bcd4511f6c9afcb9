//! Summary strip rendering.
//!
//! Shows the newest sample of the selected probe: RTT, CPU load, memory
//! usage and microburst count, formatted per the dashboard rules.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

/// Render the title + latest-sample summary strip.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let title = match &app.active_node {
        Some(id) => format!(" Probe: {} ", id),
        None => " Probe: - ".to_string(),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let line = match app.summary() {
        Some(panel) => Line::from(vec![
            Span::styled("RTT (ms) ", app.theme.header),
            Span::styled(panel.rtt, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("   "),
            Span::styled("CPU Load1 ", app.theme.header),
            Span::styled(panel.cpu, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("   "),
            Span::styled("MEM Used% ", app.theme.header),
            Span::styled(panel.mem, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("   "),
            Span::styled("NET Microburst ", app.theme.header),
            Span::styled(panel.net, Style::default().add_modifier(Modifier::BOLD)),
        ]),
        // No data yet for this probe; distinct from a fetch failure,
        // which goes to the status bar.
        None => Line::from(Span::styled(
            "waiting for samples...",
            Style::default().add_modifier(Modifier::DIM),
        )),
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
}
