//! Channel-based data source.
//!
//! Replies are pushed in by the producer side; requests issued by the
//! dashboard are recorded and can be inspected through the handle. This is
//! the source used by tests and by library embedders that already have
//! node data in memory.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use super::{FetchCommand, FetchReply, MetricSource};

/// Producer-side handle for a [`ChannelSource`].
///
/// Clonable; lets the producer push replies and observe which fetches the
/// dashboard has requested so far.
#[derive(Debug, Clone)]
pub struct ChannelHandle {
    replies: mpsc::UnboundedSender<FetchReply>,
    requests: Arc<Mutex<Vec<FetchCommand>>>,
}

impl ChannelHandle {
    /// Push a reply to the dashboard. Returns false if the source is gone.
    pub fn send(&self, reply: FetchReply) -> bool {
        self.replies.send(reply).is_ok()
    }

    /// Take all requests recorded since the last drain.
    pub fn drain_requests(&self) -> Vec<FetchCommand> {
        let mut requests = self.requests.lock().expect("requests lock poisoned");
        std::mem::take(&mut *requests)
    }
}

/// A data source fed from an in-memory channel.
///
/// # Example
///
/// ```
/// use probewatch::{ChannelSource, FetchCommand, FetchReply, MetricSource};
///
/// let (handle, mut source) = ChannelSource::create("synthetic");
/// source.request_metrics("probe-a");
/// assert_eq!(
///     handle.drain_requests(),
///     vec![FetchCommand::Metrics { node_id: "probe-a".into() }]
/// );
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    replies: mpsc::UnboundedReceiver<FetchReply>,
    requests: Arc<Mutex<Vec<FetchCommand>>>,
    description: String,
}

impl ChannelSource {
    /// Create a handle/source pair.
    ///
    /// The description appears in the TUI status bar
    /// (e.g. "synthetic", "replay-buffer").
    pub fn create(description: &str) -> (ChannelHandle, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let handle = ChannelHandle {
            replies: tx,
            requests: requests.clone(),
        };
        let source = Self {
            replies: rx,
            requests,
            description: format!("channel: {}", description),
        };
        (handle, source)
    }

    fn record(&self, command: FetchCommand) {
        self.requests
            .lock()
            .expect("requests lock poisoned")
            .push(command);
    }
}

impl MetricSource for ChannelSource {
    fn request_nodes(&mut self) {
        self.record(FetchCommand::Nodes);
    }

    fn request_metrics(&mut self, node_id: &str) {
        self.record(FetchCommand::Metrics {
            node_id: node_id.to_string(),
        });
    }

    fn poll(&mut self) -> Option<FetchReply> {
        self.replies.try_recv().ok()
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::NodeStatus;

    fn node(id: &str) -> NodeStatus {
        NodeStatus {
            node_id: id.to_string(),
            last_seen: 0,
            is_online: true,
            history: Vec::new(),
        }
    }

    #[test]
    fn test_channel_source_poll() {
        let (handle, mut source) = ChannelSource::create("test");

        // Nothing queued yet
        assert!(source.poll().is_none());

        assert!(handle.send(FetchReply::Nodes(vec![node("probe-a")])));

        match source.poll() {
            Some(FetchReply::Nodes(nodes)) => assert_eq!(nodes[0].node_id, "probe-a"),
            other => panic!("expected Nodes, got {:?}", other),
        }
        assert!(source.poll().is_none());
    }

    #[test]
    fn test_channel_source_records_requests() {
        let (handle, mut source) = ChannelSource::create("test");

        source.request_nodes();
        source.request_metrics("probe-a");

        assert_eq!(
            handle.drain_requests(),
            vec![
                FetchCommand::Nodes,
                FetchCommand::Metrics {
                    node_id: "probe-a".to_string()
                }
            ]
        );
        // Drained: next call sees only new requests
        assert!(handle.drain_requests().is_empty());
    }

    #[test]
    fn test_channel_source_description() {
        let (_handle, source) = ChannelSource::create("synthetic");
        assert_eq!(source.description(), "channel: synthetic");
    }

    #[test]
    fn test_send_after_source_dropped() {
        let (handle, source) = ChannelSource::create("test");
        drop(source);
        assert!(!handle.send(FetchReply::NodesFailed("gone".into())));
    }
}
