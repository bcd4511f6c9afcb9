//! Application state and polling logic.
//!
//! All mutable dashboard state (active node, directory, history, timers)
//! lives in [`App`], constructed once at startup; mutation goes through its
//! methods. The polling loops are driven by [`Ticker`] values owned here and
//! serviced from the UI thread's `tick()`.

use std::time::{Duration, Instant};

use crate::data::{Directory, NodeRow, SeriesSet, SummaryPanel};
use crate::source::{FetchReply, MetricSample, MetricSource};
use crate::ui::Theme;

/// Intervals for the two polling loops.
#[derive(Debug, Clone)]
pub struct PollSettings {
    /// Node-discovery interval; this loop runs for the lifetime of the
    /// process and is never cancelled.
    pub discovery: Duration,
    /// Detail interval for the selected node; this loop is replaced on
    /// every selection change.
    pub detail: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            discovery: Duration::from_secs(5),
            detail: Duration::from_secs(3),
        }
    }
}

/// A repeating timer serviced cooperatively from the UI loop.
///
/// Owning the value is owning the loop: dropping a `Ticker` cancels it, and
/// replacing the detail ticker through [`App::restart_detail_poll`] is the
/// cancel-then-restart discipline - the old timer is gone before the new one
/// exists, so polling loops can never stack.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    last: Instant,
}

impl Ticker {
    /// Create a ticker that first fires one period from now.
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            last: Instant::now(),
        }
    }

    /// True when a period has elapsed; arms the next period.
    pub fn due(&mut self) -> bool {
        if self.last.elapsed() >= self.period {
            self.last = Instant::now();
            true
        } else {
            false
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

/// Main application state: the dashboard poller/renderer controller.
pub struct App {
    pub running: bool,
    pub show_help: bool,

    // Data source
    source: Box<dyn MetricSource>,
    settings: PollSettings,

    // Directory panel
    pub directory: Directory,
    /// Highlight cursor in the node list (navigation, not selection).
    pub cursor: usize,
    /// First visible row of the node list, written back by the renderer
    /// each frame so mouse clicks map to the right row while scrolled.
    pub list_offset: usize,

    // Selection + metric history
    pub active_node: Option<String>,
    history: Vec<MetricSample>,
    /// Set after the first successful dashboard render for the current node.
    pub last_update: Option<Instant>,
    /// Last metric fetch error, shown in the status bar; charts stay stale.
    pub metrics_error: Option<String>,

    // Polling loops
    discovery: Ticker,
    detail: Option<Ticker>,

    // UI
    pub theme: Theme,
    status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App with the given data source and poll intervals.
    pub fn new(source: Box<dyn MetricSource>, settings: PollSettings) -> Self {
        let discovery = Ticker::new(settings.discovery);
        Self {
            running: true,
            show_help: false,
            source,
            settings,
            directory: Directory::Waiting,
            cursor: 0,
            list_offset: 0,
            active_node: None,
            history: Vec::new(),
            last_update: None,
            metrics_error: None,
            discovery,
            detail: None,
            theme: Theme::auto_detect(),
            status_message: None,
        }
    }

    /// Returns a description of the data source for the status bar.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Kick off the initial node fetch. Call once before the UI loop.
    pub fn start(&mut self) {
        self.source.request_nodes();
    }

    /// Service the polling loops: drain completed fetches, then issue any
    /// that have come due. Called once per UI loop iteration.
    pub fn tick(&mut self) {
        while let Some(reply) = self.source.poll() {
            self.apply(reply);
        }

        if self.discovery.due() {
            self.source.request_nodes();
        }

        if self.detail.as_mut().is_some_and(Ticker::due) {
            self.source.request_nodes();
            // Guard: without an active node there is nothing to fetch.
            if let Some(id) = self.active_node.clone() {
                self.source.request_metrics(&id);
            }
        }
    }

    /// Apply one completed fetch to the dashboard state.
    fn apply(&mut self, reply: FetchReply) {
        match reply {
            FetchReply::Nodes(nodes) => {
                // Default selection: the first node the controller reports,
                // once, on the first non-empty directory. Display rows are
                // sorted, so this is decided before they are built.
                let auto_select = if self.active_node.is_none() {
                    nodes.first().map(|n| n.node_id.clone())
                } else {
                    None
                };

                self.directory = Directory::from_nodes(&nodes);
                let rows = self.directory.rows().unwrap_or(&[]);
                self.cursor = self.cursor.min(rows.len().saturating_sub(1));

                if let Some(first) = auto_select {
                    self.select_node(&first);
                }
            }
            FetchReply::NodesFailed(error) => {
                // Selection and charts are left untouched.
                self.directory = Directory::Lost { error };
            }
            FetchReply::Metrics { node_id, samples } => {
                // A reply for a node we have moved away from is stale.
                if self.active_node.as_deref() != Some(node_id.as_str()) {
                    return;
                }
                // Empty history: no render, the previous charts persist.
                if samples.is_empty() {
                    return;
                }
                self.history = samples;
                self.metrics_error = None;
                self.last_update = Some(Instant::now());
            }
            FetchReply::MetricsFailed { node_id, error } => {
                if self.active_node.as_deref() == Some(node_id.as_str()) {
                    self.metrics_error = Some(error);
                }
            }
        }
    }

    /// Make the given node active: fetch its history immediately, refresh
    /// the node list, and (re)start the 3-second detail loop.
    pub fn select_node(&mut self, node_id: &str) {
        if self.active_node.as_deref() != Some(node_id) {
            self.history.clear();
            self.last_update = None;
            self.metrics_error = None;
        }
        self.active_node = Some(node_id.to_string());

        self.source.request_metrics(node_id);
        self.source.request_nodes();
        self.restart_detail_poll();
    }

    /// Replace the detail polling loop.
    ///
    /// The previous ticker is dropped before the replacement is created,
    /// so at most one detail loop exists at any time.
    fn restart_detail_poll(&mut self) {
        drop(self.detail.take());
        self.detail = Some(Ticker::new(self.settings.detail));
    }

    /// Whether the detail polling loop is running (ACTIVE state).
    pub fn detail_poll_active(&self) -> bool {
        self.detail.is_some()
    }

    /// Immediately re-fetch everything, outside the timers.
    pub fn refresh(&mut self) {
        self.source.request_nodes();
        if let Some(id) = self.active_node.clone() {
            self.source.request_metrics(&id);
        }
        self.set_status_message("Refreshing...".to_string());
    }

    /// The current metric history (oldest first).
    pub fn history(&self) -> &[MetricSample] {
        &self.history
    }

    /// Chart series for the current history.
    pub fn chart_series(&self) -> SeriesSet {
        SeriesSet::from_history(&self.history)
    }

    /// Summary strip values for the newest sample, if any.
    pub fn summary(&self) -> Option<SummaryPanel> {
        SummaryPanel::from_history(&self.history)
    }

    /// Move the highlight cursor down by one row.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move the highlight cursor up by one row.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move the highlight cursor down by n rows.
    pub fn select_next_n(&mut self, n: usize) {
        if let Some(rows) = self.directory.rows() {
            let max = rows.len().saturating_sub(1);
            self.cursor = (self.cursor + n).min(max);
        }
    }

    /// Move the highlight cursor up by n rows.
    pub fn select_prev_n(&mut self, n: usize) {
        self.cursor = self.cursor.saturating_sub(n);
    }

    /// Jump to the first row.
    pub fn select_first(&mut self) {
        self.cursor = 0;
    }

    /// Jump to the last row.
    pub fn select_last(&mut self) {
        if let Some(rows) = self.directory.rows() {
            self.cursor = rows.len().saturating_sub(1);
        }
    }

    /// The row currently under the highlight cursor.
    pub fn row_under_cursor(&self) -> Option<&NodeRow> {
        self.directory.rows()?.get(self.cursor)
    }

    /// Activate the node under the highlight cursor.
    pub fn select_cursor(&mut self) {
        if let Some(id) = self.row_under_cursor().map(|r| r.node_id.clone()) {
            self.select_node(&id);
        }
    }

    /// Move the cursor to a clicked row and activate that node.
    pub fn select_row(&mut self, index: usize) {
        let Some(rows) = self.directory.rows() else {
            return;
        };
        if index < rows.len() {
            self.cursor = index;
            self.select_cursor();
        }
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        match &self.status_message {
            Some((msg, at)) if at.elapsed() < Duration::from_secs(3) => Some(msg),
            _ => None,
        }
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{ChannelHandle, ChannelSource, FetchCommand, NodeStatus};

    fn node(id: &str, online: bool) -> NodeStatus {
        NodeStatus {
            node_id: id.to_string(),
            last_seen: 1_714_550_703_000,
            is_online: online,
            history: Vec::new(),
        }
    }

    fn sample(ts: i64, rtt: f64) -> MetricSample {
        MetricSample {
            ping_avg_rtt: Some(rtt),
            ..MetricSample::at(ts)
        }
    }

    /// App wired to a channel source. Zero-period tickers make every tick
    /// fire both loops, so timer behavior is observable without sleeping.
    fn test_app() -> (ChannelHandle, App) {
        let (handle, source) = ChannelSource::create("test");
        let app = App::new(
            Box::new(source),
            PollSettings {
                discovery: Duration::ZERO,
                detail: Duration::ZERO,
            },
        );
        (handle, app)
    }

    #[test]
    fn test_empty_node_list_no_autoselect() {
        let (handle, mut app) = test_app();
        handle.send(FetchReply::Nodes(Vec::new()));
        app.tick();

        assert_eq!(app.directory, Directory::Ready(Vec::new()));
        assert!(app.active_node.is_none());
        assert!(!app.detail_poll_active());
    }

    #[test]
    fn test_first_node_autoselected_exactly_once() {
        let (handle, mut app) = test_app();
        handle.send(FetchReply::Nodes(vec![node("beta", true), node("alpha", true)]));
        app.tick();

        // The controller listed "beta" first; rows being displayed in
        // sorted order must not change the default selection.
        assert_eq!(app.active_node.as_deref(), Some("beta"));
        assert!(app.detail_poll_active());

        // Selection triggered an immediate metric fetch and list refresh.
        let requests = handle.drain_requests();
        assert!(requests.contains(&FetchCommand::Metrics {
            node_id: "beta".to_string()
        }));
        assert!(requests.contains(&FetchCommand::Nodes));

        // A later directory refresh must not re-select.
        app.select_node("alpha");
        handle.drain_requests();
        handle.send(FetchReply::Nodes(vec![node("beta", true), node("alpha", true)]));
        app.tick();
        assert_eq!(app.active_node.as_deref(), Some("alpha"));
    }

    #[test]
    fn test_switching_nodes_stops_fetches_for_old_node() {
        let (handle, mut app) = test_app();
        app.select_node("probe-a");
        app.select_node("probe-b");
        handle.drain_requests();

        // Several detail ticks: only probe-b may be fetched.
        for _ in 0..3 {
            app.tick();
        }
        let requests = handle.drain_requests();
        assert!(!requests.is_empty());
        for request in requests {
            match request {
                FetchCommand::Nodes => {}
                FetchCommand::Metrics { node_id } => assert_eq!(node_id, "probe-b"),
            }
        }
        assert!(app.detail_poll_active());
    }

    #[test]
    fn test_nodes_failure_keeps_selection() {
        let (handle, mut app) = test_app();
        app.select_node("probe-a");
        handle.send(FetchReply::Metrics {
            node_id: "probe-a".to_string(),
            samples: vec![sample(0, 5.0)],
        });
        app.tick();
        assert_eq!(app.history().len(), 1);

        handle.send(FetchReply::NodesFailed("connect refused".to_string()));
        app.tick();

        assert!(matches!(app.directory, Directory::Lost { .. }));
        assert_eq!(app.active_node.as_deref(), Some("probe-a"));
        assert_eq!(app.history().len(), 1);
    }

    #[test]
    fn test_empty_metric_history_keeps_stale_charts() {
        let (handle, mut app) = test_app();
        app.select_node("probe-a");
        handle.send(FetchReply::Metrics {
            node_id: "probe-a".to_string(),
            samples: vec![sample(0, 5.0)],
        });
        app.tick();
        let rendered_at = app.last_update;
        assert!(rendered_at.is_some());

        handle.send(FetchReply::Metrics {
            node_id: "probe-a".to_string(),
            samples: Vec::new(),
        });
        app.tick();

        assert_eq!(app.history().len(), 1);
        assert_eq!(app.last_update, rendered_at);
    }

    #[test]
    fn test_stale_metric_reply_dropped_after_switch() {
        let (handle, mut app) = test_app();
        app.select_node("probe-a");
        app.select_node("probe-b");

        // The in-flight reply for probe-a resolves late.
        handle.send(FetchReply::Metrics {
            node_id: "probe-a".to_string(),
            samples: vec![sample(0, 99.0)],
        });
        app.tick();

        assert!(app.history().is_empty());
    }

    #[test]
    fn test_metric_failure_is_nonfatal() {
        let (handle, mut app) = test_app();
        app.select_node("probe-a");
        handle.send(FetchReply::Metrics {
            node_id: "probe-a".to_string(),
            samples: vec![sample(0, 5.0)],
        });
        app.tick();

        handle.send(FetchReply::MetricsFailed {
            node_id: "probe-a".to_string(),
            error: "timeout".to_string(),
        });
        app.tick();

        assert_eq!(app.metrics_error.as_deref(), Some("timeout"));
        assert_eq!(app.history().len(), 1);
        assert!(app.running);
        assert!(app.detail_poll_active());
    }

    #[test]
    fn test_idle_state_only_polls_discovery() {
        let (handle, mut app) = test_app();
        app.tick();

        let requests = handle.drain_requests();
        assert_eq!(requests, vec![FetchCommand::Nodes]);
    }

    #[test]
    fn test_cursor_navigation_clamps() {
        let (handle, mut app) = test_app();
        app.select_node("a"); // keep auto-select out of the way
        handle.send(FetchReply::Nodes(vec![
            node("a", true),
            node("b", true),
            node("c", false),
        ]));
        app.tick();

        app.select_next();
        app.select_next();
        app.select_next();
        assert_eq!(app.cursor, 2);
        app.select_prev_n(10);
        assert_eq!(app.cursor, 0);
        app.select_last();
        assert_eq!(app.cursor, 2);
        assert_eq!(app.row_under_cursor().unwrap().node_id, "c");
    }

    #[test]
    fn test_select_row_activates_clicked_node() {
        let (handle, mut app) = test_app();
        app.select_node("a");
        handle.send(FetchReply::Nodes(vec![node("a", true), node("b", true)]));
        app.tick();
        handle.drain_requests();

        app.select_row(1);
        assert_eq!(app.active_node.as_deref(), Some("b"));

        // Out-of-range click is ignored.
        app.select_row(7);
        assert_eq!(app.cursor, 1);
    }

    #[test]
    fn test_ticker_fires_after_period() {
        let mut ticker = Ticker::new(Duration::from_millis(5));
        assert!(!ticker.due());
        std::thread::sleep(Duration::from_millis(10));
        assert!(ticker.due());
        // Re-armed immediately after firing
        assert!(!ticker.due());
        assert_eq!(ticker.period(), Duration::from_millis(5));
    }
}
