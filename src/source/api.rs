//! HTTP polling source for a live probe controller.
//!
//! Fetches run on a background tokio runtime owned by the source. Each
//! request is spawned on its own task, so a slow response never delays the
//! next scheduled fetch; replies are delivered through a channel and drained
//! by the UI loop via `poll()`.

use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;

use super::{FetchCommand, FetchReply, MetricSample, MetricSource, NodeStatus};

/// A data source that polls the controller's REST API.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use probewatch::{ApiSource, MetricSource};
///
/// let mut source = ApiSource::connect("http://127.0.0.1:8080", Duration::from_secs(10)).unwrap();
/// source.request_nodes();
/// ```
#[derive(Debug)]
pub struct ApiSource {
    commands: mpsc::UnboundedSender<FetchCommand>,
    replies: mpsc::UnboundedReceiver<FetchReply>,
    description: String,
    // Keeps the background dispatcher and in-flight fetches alive.
    _runtime: tokio::runtime::Runtime,
}

impl ApiSource {
    /// Connect to a controller at the given base URL (e.g. "http://host:8080").
    ///
    /// The timeout bounds each individual request so hung fetches cannot
    /// accumulate; the original dashboard had none and simply left the view
    /// stale for that tick.
    pub fn connect(base_url: &str, timeout: Duration) -> Result<Self> {
        let base = base_url.trim_end_matches('/').to_string();
        let description = format!("controller: {}", base);

        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let runtime = tokio::runtime::Runtime::new()?;

        let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel::<FetchCommand>();
        let (reply_tx, reply_rx) = mpsc::unbounded_channel::<FetchReply>();

        runtime.spawn(async move {
            while let Some(cmd) = cmd_rx.recv().await {
                let client = client.clone();
                let base = base.clone();
                let reply_tx = reply_tx.clone();

                // One task per request: overlapping fetches for the same
                // endpoint are allowed and the last reply to resolve wins.
                tokio::spawn(async move {
                    let reply = match cmd {
                        FetchCommand::Nodes => fetch_nodes(&client, &base).await,
                        FetchCommand::Metrics { node_id } => {
                            fetch_metrics(&client, &base, node_id).await
                        }
                    };
                    // Receiver dropped means the UI is gone; nothing to do.
                    let _ = reply_tx.send(reply);
                });
            }
        });

        Ok(Self {
            commands: cmd_tx,
            replies: reply_rx,
            description,
            _runtime: runtime,
        })
    }
}

impl MetricSource for ApiSource {
    fn request_nodes(&mut self) {
        let _ = self.commands.send(FetchCommand::Nodes);
    }

    fn request_metrics(&mut self, node_id: &str) {
        let _ = self.commands.send(FetchCommand::Metrics {
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

async fn fetch_nodes(client: &reqwest::Client, base: &str) -> FetchReply {
    match get_nodes(client, base).await {
        Ok(nodes) => FetchReply::Nodes(nodes),
        Err(e) => FetchReply::NodesFailed(e.to_string()),
    }
}

async fn fetch_metrics(client: &reqwest::Client, base: &str, node_id: String) -> FetchReply {
    match get_metrics(client, base, &node_id).await {
        Ok(samples) => FetchReply::Metrics { node_id, samples },
        Err(e) => FetchReply::MetricsFailed {
            node_id,
            error: e.to_string(),
        },
    }
}

async fn get_nodes(client: &reqwest::Client, base: &str) -> Result<Vec<NodeStatus>> {
    let nodes = client
        .get(format!("{}/api/nodes", base))
        .send()
        .await?
        .error_for_status()?
        .json::<Vec<NodeStatus>>()
        .await?;
    Ok(nodes)
}

async fn get_metrics(
    client: &reqwest::Client,
    base: &str,
    node_id: &str,
) -> Result<Vec<MetricSample>> {
    // The controller returns null for an unknown node; map it to empty.
    let samples = client
        .get(format!("{}/api/metrics", base))
        .query(&[("node_id", node_id)])
        .send()
        .await?
        .error_for_status()?
        .json::<Option<Vec<MetricSample>>>()
        .await?;
    Ok(samples.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_source_description() {
        let source = ApiSource::connect("http://localhost:8080/", Duration::from_secs(1)).unwrap();
        assert_eq!(source.description(), "controller: http://localhost:8080");
    }

    #[test]
    fn test_unreachable_controller_reports_failure() {
        // Port 9 (discard) is almost never listening; the fetch should fail
        // and surface as a NodesFailed reply rather than an error or panic.
        let mut source =
            ApiSource::connect("http://127.0.0.1:9", Duration::from_millis(200)).unwrap();
        source.request_nodes();

        let mut reply = None;
        for _ in 0..50 {
            if let Some(r) = source.poll() {
                reply = Some(r);
                break;
            }
            std::thread::sleep(Duration::from_millis(20));
        }

        match reply {
            Some(FetchReply::NodesFailed(_)) => {}
            other => panic!("expected NodesFailed, got {:?}", other),
        }
    }
}
