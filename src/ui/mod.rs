//! Terminal rendering for the dashboard.
//!
//! Layout: a one-line header, a node directory panel on the left, the
//! summary strip and three chart panels on the right, and a one-line
//! status bar. The layout math is shared with the mouse handler through
//! [`node_panel_area`].

pub mod charts;
pub mod common;
pub mod nodes;
pub mod summary;
pub mod theme;

pub use theme::Theme;

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::Frame;

use crate::app::App;

/// Width of the node directory panel, including its borders.
const NODE_PANEL_WIDTH: u16 = 32;

/// Render the whole dashboard for one frame.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let (header, nodes, dash, status) = split(area);

    common::render_header(frame, app, header);
    nodes::render(frame, app, nodes);

    let dash_chunks = Layout::vertical([
        Constraint::Length(3), // Summary strip
        Constraint::Min(9),    // Charts
    ])
    .split(dash);
    summary::render(frame, app, dash_chunks[0]);
    charts::render(frame, app, dash_chunks[1]);

    common::render_status_bar(frame, app, status);

    if app.show_help {
        common::render_help(frame, app, area);
    }
}

/// The inner area of the node list (inside its borders), for mapping
/// mouse clicks back to rows.
pub fn node_panel_area(area: Rect) -> Rect {
    let (_, nodes, _, _) = split(area);
    Rect {
        x: nodes.x + 1,
        y: nodes.y + 1,
        width: nodes.width.saturating_sub(2),
        height: nodes.height.saturating_sub(2),
    }
}

fn split(area: Rect) -> (Rect, Rect, Rect, Rect) {
    let rows = Layout::vertical([
        Constraint::Length(1), // Header bar
        Constraint::Min(12),   // Content
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    let cols = Layout::horizontal([
        Constraint::Length(NODE_PANEL_WIDTH),
        Constraint::Min(40),
    ])
    .split(rows[1]);

    (rows[0], cols[0], cols[1], rows[2])
}
