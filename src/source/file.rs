//! File-based replay source.
//!
//! Reads a captured `/api/nodes` JSON payload from disk and answers metric
//! requests from each node's embedded history. Useful for offline work and
//! demos without a running controller.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{Context, Result};

use super::{FetchReply, MetricSource, NodeStatus};

/// A data source that replays a captured node payload from a JSON file.
///
/// The source tracks the file's modification time and only re-reads it
/// when the file has been updated, so the file can be rewritten while
/// the dashboard is running.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
    last_modified: Option<SystemTime>,
    cached: Vec<NodeStatus>,
    queued: VecDeque<FetchReply>,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self {
            path,
            description,
            last_modified: None,
            cached: Vec::new(),
            queued: VecDeque::new(),
        }
    }

    /// Returns the path being replayed.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the file if it has changed since the last read.
    fn refresh(&mut self) -> Result<()> {
        let modified = fs::metadata(&self.path)
            .with_context(|| format!("read error: {}", self.path.display()))?
            .modified()
            .ok();

        let changed = match (&self.last_modified, &modified) {
            (None, _) => true,
            (Some(last), Some(current)) => current > last,
            (Some(_), None) => false,
        };

        if changed {
            let content = fs::read_to_string(&self.path)
                .with_context(|| format!("read error: {}", self.path.display()))?;
            self.cached = serde_json::from_str(&content)
                .with_context(|| format!("parse error: {}", self.path.display()))?;
            self.last_modified = modified;
        }
        Ok(())
    }
}

impl MetricSource for FileSource {
    fn request_nodes(&mut self) {
        let reply = match self.refresh() {
            Ok(()) => FetchReply::Nodes(self.cached.clone()),
            Err(e) => FetchReply::NodesFailed(format!("{:#}", e)),
        };
        self.queued.push_back(reply);
    }

    fn request_metrics(&mut self, node_id: &str) {
        let reply = match self.refresh() {
            Ok(()) => {
                // Unknown node behaves like the controller: empty history.
                let samples = self
                    .cached
                    .iter()
                    .find(|n| n.node_id == node_id)
                    .map(|n| n.history.clone())
                    .unwrap_or_default();
                FetchReply::Metrics {
                    node_id: node_id.to_string(),
                    samples,
                }
            }
            Err(e) => FetchReply::MetricsFailed {
                node_id: node_id.to_string(),
                error: format!("{:#}", e),
            },
        };
        self.queued.push_back(reply);
    }

    fn poll(&mut self) -> Option<FetchReply> {
        self.queued.pop_front()
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_json() -> &'static str {
        r#"[
            {
                "node_id": "probe-a",
                "last_seen": 1714550703000,
                "is_online": true,
                "history": [
                    {"timestamp": 1714550700000, "ping_avg_rtt": 8.5, "net_burst": 1},
                    {"timestamp": 1714550703000, "ping_avg_rtt": 9.1, "net_burst": 0}
                ]
            }
        ]"#
    }

    #[test]
    fn test_file_source_new() {
        let source = FileSource::new("/tmp/nodes.json");
        assert_eq!(source.path(), Path::new("/tmp/nodes.json"));
        assert_eq!(source.description(), "file: /tmp/nodes.json");
    }

    #[test]
    fn test_file_source_answers_node_request() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", sample_json()).unwrap();

        let mut source = FileSource::new(file.path());
        source.request_nodes();

        match source.poll() {
            Some(FetchReply::Nodes(nodes)) => {
                assert_eq!(nodes.len(), 1);
                assert_eq!(nodes[0].node_id, "probe-a");
            }
            other => panic!("expected Nodes, got {:?}", other),
        }
        assert!(source.poll().is_none());
    }

    #[test]
    fn test_file_source_answers_metrics_from_embedded_history() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", sample_json()).unwrap();

        let mut source = FileSource::new(file.path());
        source.request_metrics("probe-a");

        match source.poll() {
            Some(FetchReply::Metrics { node_id, samples }) => {
                assert_eq!(node_id, "probe-a");
                assert_eq!(samples.len(), 2);
                assert_eq!(samples[1].ping_avg_rtt, Some(9.1));
            }
            other => panic!("expected Metrics, got {:?}", other),
        }
    }

    #[test]
    fn test_file_source_unknown_node_yields_empty_history() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", sample_json()).unwrap();

        let mut source = FileSource::new(file.path());
        source.request_metrics("probe-z");

        match source.poll() {
            Some(FetchReply::Metrics { samples, .. }) => assert!(samples.is_empty()),
            other => panic!("expected Metrics, got {:?}", other),
        }
    }

    #[test]
    fn test_file_source_missing_file() {
        let mut source = FileSource::new("/nonexistent/path/nodes.json");
        source.request_nodes();

        match source.poll() {
            Some(FetchReply::NodesFailed(err)) => assert!(err.contains("read error")),
            other => panic!("expected NodesFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_file_source_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid json").unwrap();

        let mut source = FileSource::new(file.path());
        source.request_nodes();

        match source.poll() {
            Some(FetchReply::NodesFailed(err)) => assert!(err.contains("parse error")),
            other => panic!("expected NodesFailed, got {:?}", other),
        }
    }
}
