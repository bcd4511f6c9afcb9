//! Node directory processing.
//!
//! Transforms the raw node payload into display rows and tracks the
//! directory panel's state (waiting, connection lost, or ready).

use crate::source::NodeStatus;

use super::series::time_label;

/// Message rendered in the node panel when the controller is unreachable.
pub const CONNECTION_LOST: &str = "Connection Lost to Controller";

/// Placeholder rendered while no probes are known.
pub const WAITING_FOR_PROBES: &str = "No probes found. Waiting...";

/// One row in the node directory panel.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRow {
    pub node_id: String,
    pub is_online: bool,
    /// Last report time, unix milliseconds.
    pub last_seen: i64,
    /// Number of buffered history points on the controller.
    pub points: usize,
}

impl NodeRow {
    /// Local HH:MM:SS of the last report.
    pub fn last_seen_label(&self) -> String {
        time_label(self.last_seen)
    }
}

/// State of the node directory panel.
#[derive(Debug, Clone, PartialEq)]
pub enum Directory {
    /// No successful fetch yet.
    Waiting,
    /// The last node-list fetch failed; the panel shows [`CONNECTION_LOST`].
    Lost { error: String },
    /// Current node set. Empty means "no probes yet" and renders the
    /// waiting placeholder.
    Ready(Vec<NodeRow>),
}

impl Directory {
    /// Build display rows from a node payload.
    ///
    /// The controller serves nodes in map order, which is unstable between
    /// polls; rows are sorted by id so the list does not jump around.
    pub fn from_nodes(nodes: &[NodeStatus]) -> Self {
        let mut rows: Vec<NodeRow> = nodes
            .iter()
            .map(|n| NodeRow {
                node_id: n.node_id.clone(),
                is_online: n.is_online,
                last_seen: n.last_seen,
                points: n.history.len(),
            })
            .collect();
        rows.sort_by(|a, b| a.node_id.cmp(&b.node_id));
        Self::Ready(rows)
    }

    /// Rows if the directory is ready, regardless of emptiness.
    pub fn rows(&self) -> Option<&[NodeRow]> {
        match self {
            Directory::Ready(rows) => Some(rows),
            _ => None,
        }
    }

    /// Number of online nodes in a ready directory.
    pub fn online_count(&self) -> usize {
        self.rows()
            .map(|rows| rows.iter().filter(|r| r.is_online).count())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MetricSample;

    fn node(id: &str, online: bool, points: usize) -> NodeStatus {
        NodeStatus {
            node_id: id.to_string(),
            last_seen: 1_714_550_703_000,
            is_online: online,
            history: (0..points).map(|i| MetricSample::at(i as i64)).collect(),
        }
    }

    #[test]
    fn test_rows_sorted_by_id() {
        let dir = Directory::from_nodes(&[node("zulu", true, 0), node("alpha", false, 2)]);
        let rows = dir.rows().unwrap();
        assert_eq!(rows[0].node_id, "alpha");
        assert_eq!(rows[0].points, 2);
        assert_eq!(rows[1].node_id, "zulu");
    }

    #[test]
    fn test_online_count() {
        let dir = Directory::from_nodes(&[
            node("a", true, 0),
            node("b", false, 0),
            node("c", true, 0),
        ]);
        assert_eq!(dir.online_count(), 2);
    }

    #[test]
    fn test_waiting_and_lost_have_no_rows() {
        assert!(Directory::Waiting.rows().is_none());
        let lost = Directory::Lost {
            error: "connect refused".to_string(),
        };
        assert!(lost.rows().is_none());
        assert_eq!(lost.online_count(), 0);
    }
}
