//! Shared wire types for the controller API.
//!
//! These types match the JSON produced by the probe controller's REST
//! endpoints (`/api/nodes` and `/api/metrics`). They serve as the common
//! data format between the controller and this dashboard consumer.

use serde::{Deserialize, Serialize};

/// One probe node as reported by `GET /api/nodes`.
///
/// The node list view only uses `history` for its length; the full samples
/// are kept so that replay sources can answer metric requests from a single
/// captured payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeStatus {
    /// Unique node identifier.
    pub node_id: String,

    /// Last report time, unix milliseconds.
    pub last_seen: i64,

    /// Whether the controller considers the node online
    /// (it marks nodes offline after 15s without a report).
    pub is_online: bool,

    /// Buffered metric history for this node, oldest first.
    #[serde(default)]
    pub history: Vec<MetricSample>,
}

/// One metric sample as reported by `GET /api/metrics?node_id=<id>`.
///
/// All metric fields are optional on the wire; absent values are treated
/// as zero by the summary panel and the chart series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    /// Sample time, unix milliseconds.
    pub timestamp: i64,

    /// Average TCP round-trip time in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ping_avg_rtt: Option<f64>,

    /// One-minute CPU load average.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_load1: Option<f64>,

    /// Memory usage as a percentage of total.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mem_used_percent: Option<f64>,

    /// Network microburst events counted in the sampling interval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_burst: Option<u64>,
}

impl MetricSample {
    /// Create a sample with only a timestamp; metric fields absent.
    pub fn at(timestamp: i64) -> Self {
        Self {
            timestamp,
            ping_avg_rtt: None,
            cpu_load1: None,
            mem_used_percent: None,
            net_burst: None,
        }
    }
}
