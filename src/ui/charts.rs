//! Chart panel rendering.
//!
//! Three stacked panels: RTT line, CPU/MEM dual line on a shared axis, and
//! a bar chart of microburst counts. Every redraw is a full replace; the
//! panels only consume the plain [`SeriesSet`] the controller exposes, so
//! the charting backend can be swapped without touching polling logic.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::SeriesSet;

/// Render the three chart panels.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Fill(1), // RTT
        Constraint::Fill(1), // CPU / MEM
        Constraint::Fill(1), // Microbursts
    ])
    .split(area);

    let series = app.chart_series();
    if series.is_empty() {
        render_placeholder(frame, app, " TCP RTT (ms) ", chunks[0]);
        render_placeholder(frame, app, " CPU Load1 / Memory % ", chunks[1]);
        render_placeholder(frame, app, " NET Microbursts ", chunks[2]);
        return;
    }

    render_rtt(frame, app, &series, chunks[0]);
    render_resources(frame, app, &series, chunks[1]);
    render_net(frame, app, &series, chunks[2]);
}

fn render_placeholder(frame: &mut Frame, app: &App, title: &str, area: Rect) {
    let block = bordered(app, title.to_string());
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "  waiting for samples...",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ])
    .block(block);
    frame.render_widget(text, area);
}

fn render_rtt(frame: &mut Frame, app: &App, series: &SeriesSet, area: Rect) {
    let datasets = vec![Dataset::default()
        .name("TCP RTT (ms)")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(app.theme.rtt))
        .data(&series.rtt)];

    let chart = Chart::new(datasets)
        .block(bordered(app, " TCP RTT (ms) ".to_string()))
        .x_axis(time_axis(app, series))
        .y_axis(value_axis(app, series.rtt_bound()));

    frame.render_widget(chart, area);
}

fn render_resources(frame: &mut Frame, app: &App, series: &SeriesSet, area: Rect) {
    let datasets = vec![
        Dataset::default()
            .name("CPU Load1")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(app.theme.cpu))
            .data(&series.cpu),
        Dataset::default()
            .name("Memory %")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(app.theme.mem))
            .data(&series.mem),
    ];

    let chart = Chart::new(datasets)
        .block(bordered(app, " CPU Load1 / Memory % ".to_string()))
        .x_axis(time_axis(app, series))
        .y_axis(value_axis(app, series.resource_bound()));

    frame.render_widget(chart, area);
}

fn render_net(frame: &mut Frame, app: &App, series: &SeriesSet, area: Rect) {
    const BAR_WIDTH: u16 = 2;
    const BAR_GAP: u16 = 1;

    // Show the most recent bars that fit the panel.
    let inner_width = area.width.saturating_sub(2);
    let capacity = (inner_width / (BAR_WIDTH + BAR_GAP)).max(1) as usize;
    let start = series.net.len().saturating_sub(capacity);

    let bars: Vec<Bar> = series.net[start..]
        .iter()
        .map(|&v| Bar::default().value(v))
        .collect();

    let chart = BarChart::default()
        .block(bordered(app, " NET Microbursts (evt) ".to_string()))
        .data(BarGroup::default().bars(&bars))
        .bar_width(BAR_WIDTH)
        .bar_gap(BAR_GAP)
        .bar_style(Style::default().fg(app.theme.net))
        .value_style(
            Style::default()
                .fg(app.theme.net)
                .add_modifier(Modifier::REVERSED),
        )
        .max(series.net_max().max(1));

    frame.render_widget(chart, area);
}

fn bordered(app: &App, title: String) -> Block<'static> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
}

fn time_axis<'a>(app: &App, series: &'a SeriesSet) -> Axis<'a> {
    let max_x = series.len().saturating_sub(1).max(1) as f64;
    Axis::default()
        .bounds([0.0, max_x])
        .labels(series.x_labels().into_iter().map(Line::from))
        .style(Style::default().fg(app.theme.border))
}

fn value_axis<'a>(app: &App, bound: f64) -> Axis<'a> {
    let labels = vec![
        "0".to_string(),
        format!("{:.1}", bound / 2.0),
        format!("{:.1}", bound),
    ];
    Axis::default()
        .bounds([0.0, bound])
        .labels(labels)
        .style(Style::default().fg(app.theme.border))
}
