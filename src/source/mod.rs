//! Data source abstraction for the dashboard's fetch pipeline.
//!
//! This module provides a trait-based abstraction over how node lists and
//! metric histories reach the dashboard - HTTP polling against a live
//! controller, replay from a captured file, or an in-memory channel.

mod api;
mod channel;
mod file;
mod payload;

pub use api::ApiSource;
pub use channel::{ChannelHandle, ChannelSource};
pub use file::FileSource;
pub use payload::{MetricSample, NodeStatus};

use std::fmt::Debug;

/// A fetch issued by the dashboard's polling loops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchCommand {
    /// Fetch the current node directory.
    Nodes,
    /// Fetch the metric history for one node.
    Metrics { node_id: String },
}

/// The outcome of a single fetch.
///
/// Metric replies carry the node id they were requested for so the
/// dashboard can discard responses that resolve after the selection
/// has moved on.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchReply {
    /// Node directory fetched successfully.
    Nodes(Vec<NodeStatus>),
    /// Node directory fetch failed (transport or parse error).
    NodesFailed(String),
    /// Metric history fetched successfully, oldest sample first.
    Metrics {
        node_id: String,
        samples: Vec<MetricSample>,
    },
    /// Metric history fetch failed.
    MetricsFailed { node_id: String, error: String },
}

/// Trait for fetching dashboard data from various backends.
///
/// Requests are fire-and-forget: `request_*` must not block, and replies
/// arrive later via `poll()`. Overlapping in-flight requests for the same
/// endpoint are allowed; the last reply to resolve wins.
///
/// # Example
///
/// ```
/// use probewatch::{ChannelSource, FetchReply, MetricSource};
///
/// let (handle, mut source) = ChannelSource::create("demo");
/// source.request_nodes();
/// handle.send(FetchReply::Nodes(Vec::new()));
/// assert!(matches!(source.poll(), Some(FetchReply::Nodes(_))));
/// ```
pub trait MetricSource: Send + Debug {
    /// Request the current node directory.
    fn request_nodes(&mut self);

    /// Request the metric history for the given node.
    fn request_metrics(&mut self, node_id: &str);

    /// Poll for the next completed fetch, without blocking.
    fn poll(&mut self) -> Option<FetchReply>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;
}
