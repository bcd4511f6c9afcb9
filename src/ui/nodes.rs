//! Node directory panel rendering.
//!
//! Shows every known probe as a two-line card: id plus presence dot on the
//! first line, last-seen time and buffered point count on the second. The
//! active probe is marked and the highlight cursor is independent of it.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::{Directory, CONNECTION_LOST, WAITING_FOR_PROBES};

/// Render the node directory panel.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let count = app.directory.rows().map(|rows| rows.len()).unwrap_or(0);
    let title = if count > 0 {
        format!(" Probes ({}/{} online) ", app.directory.online_count(), count)
    } else {
        " Probes ".to_string()
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    match &app.directory {
        Directory::Waiting => {
            let placeholder = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    WAITING_FOR_PROBES,
                    Style::default().add_modifier(Modifier::DIM),
                )),
            ])
            .block(block);
            frame.render_widget(placeholder, area);
        }
        Directory::Lost { error } => {
            let banner = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    CONNECTION_LOST,
                    Style::default()
                        .fg(app.theme.critical)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    error.clone(),
                    Style::default().add_modifier(Modifier::DIM),
                )),
            ])
            .block(block);
            frame.render_widget(banner, area);
        }
        Directory::Ready(rows) if rows.is_empty() => {
            let placeholder = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    WAITING_FOR_PROBES,
                    Style::default().add_modifier(Modifier::DIM),
                )),
            ])
            .block(block);
            frame.render_widget(placeholder, area);
        }
        Directory::Ready(rows) => {
            let items: Vec<ListItem> = rows
                .iter()
                .map(|row| {
                    let is_active = app.active_node.as_deref() == Some(row.node_id.as_str());
                    let marker = if is_active { "▶ " } else { "  " };
                    let id_style = if is_active {
                        Style::default()
                            .fg(app.theme.highlight)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    };

                    let header = Line::from(vec![
                        Span::raw(marker),
                        Span::styled("● ", app.theme.presence_style(row.is_online)),
                        Span::styled(row.node_id.clone(), id_style),
                    ]);
                    let meta = Line::from(Span::styled(
                        format!(
                            "    seen {}  {} pts",
                            row.last_seen_label(),
                            row.points
                        ),
                        Style::default().add_modifier(Modifier::DIM),
                    ));

                    ListItem::new(vec![header, meta])
                })
                .collect();

            let list = List::new(items)
                .block(block)
                .highlight_style(app.theme.selected);

            let mut state = ListState::default().with_offset(app.list_offset);
            state.select(Some(app.cursor));

            frame.render_stateful_widget(list, area, &mut state);
            // The widget adjusts the offset to keep the cursor visible;
            // the mouse handler needs the value it actually rendered with.
            app.list_offset = state.offset();
        }
    }
}
