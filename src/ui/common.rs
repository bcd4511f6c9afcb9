//! Common UI components shared across panels.
//!
//! This module contains the header bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::Directory;

/// Render the header bar with the directory overview.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(" PROBEWATCH ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
    ];

    match &app.directory {
        Directory::Ready(rows) => {
            let online = app.directory.online_count();
            spans.push(Span::styled(
                format!("{}", online),
                Style::default().fg(app.theme.online),
            ));
            spans.push(Span::raw(" online "));
            let offline = rows.len() - online;
            if offline > 0 {
                spans.push(Span::styled(
                    format!("{}", offline),
                    Style::default().fg(app.theme.offline),
                ));
            } else {
                spans.push(Span::styled("0", Style::default().add_modifier(Modifier::DIM)));
            }
            spans.push(Span::raw(" offline │ "));
        }
        Directory::Lost { .. } => {
            spans.push(Span::styled(
                "controller unreachable",
                Style::default()
                    .fg(app.theme.critical)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(" │ "));
        }
        Directory::Waiting => {
            spans.push(Span::raw("discovering probes... │ "));
        }
    }

    match &app.active_node {
        Some(id) => {
            spans.push(Span::raw("watching "));
            spans.push(Span::styled(
                id.clone(),
                Style::default()
                    .fg(app.theme.highlight)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        None => spans.push(Span::styled(
            "no probe selected",
            Style::default().add_modifier(Modifier::DIM),
        )),
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the status bar at the bottom.
///
/// Shows: source description, last update age, metric fetch errors,
/// temporary messages, and key hints.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Temporary feedback takes precedence
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = if let Some(ref err) = app.metrics_error {
        format!(" {} | metrics: {} | r:retry q:quit", app.source_description(), err)
    } else {
        let age = match app.last_update {
            Some(at) => format!("updated {:.1}s ago", at.elapsed().as_secs_f64()),
            None => "no data yet".to_string(),
        };
        format!(
            " {} | {} | ↑↓:move Enter:watch r:refresh ?:help q:quit",
            app.source_description(),
            age
        )
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Navigation",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ↑/↓ j/k     Move probe cursor"),
        Line::from("  PgUp/PgDn   Jump 10 probes"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from("  Enter       Watch highlighted probe"),
        Line::from("  Click       Watch clicked probe"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  r           Refresh now"),
        Line::from("  q / Esc     Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 40u16.min(area.width.saturating_sub(4));
    let help_height = 18u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
