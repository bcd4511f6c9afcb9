//! Example: feeding the dashboard through a channel
//!
//! This example demonstrates how to integrate probewatch into your own
//! application by answering its fetch requests from memory.
//!
//! This is useful when you want to:
//! - Generate synthetic telemetry for testing
//! - Bridge from a data source the crate has no adapter for
//!
//! # Usage
//!
//! ```bash
//! cargo run --example channel_feed
//! ```

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use probewatch::{
    App, ChannelSource, FetchCommand, FetchReply, MetricSample, NodeStatus, PollSettings,
};

fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// Build a synthetic history: a slow RTT drift with a burst spike.
fn history(len: usize) -> Vec<MetricSample> {
    let base = now_ms() - (len as i64) * 1000;
    (0..len)
        .map(|i| MetricSample {
            timestamp: base + (i as i64) * 1000,
            ping_avg_rtt: Some(10.0 + (i as f64 / 3.0).sin() * 4.0),
            cpu_load1: Some(0.5 + (i % 7) as f64 * 0.1),
            mem_used_percent: Some(40.0 + (i % 11) as f64),
            net_burst: Some(if i % 9 == 0 { 5 } else { 1 }),
        })
        .collect()
}

fn nodes() -> Vec<NodeStatus> {
    vec![
        NodeStatus {
            node_id: "probe-hk-01".to_string(),
            last_seen: now_ms(),
            is_online: true,
            history: history(30),
        },
        NodeStatus {
            node_id: "probe-sg-02".to_string(),
            last_seen: now_ms() - 60_000,
            is_online: false,
            history: history(5),
        },
    ]
}

fn main() {
    println!("Channel feed example");
    println!("Answering dashboard fetches with synthetic telemetry...\n");

    let (handle, source) = ChannelSource::create("synthetic");
    let mut app = App::new(Box::new(source), PollSettings::default());
    app.start();

    // Drive the app for a few ticks, answering its requests like a
    // controller would. A real embedding would run the TUI instead.
    for round in 0..5 {
        for request in handle.drain_requests() {
            match request {
                FetchCommand::Nodes => {
                    handle.send(FetchReply::Nodes(nodes()));
                }
                FetchCommand::Metrics { node_id } => {
                    let samples = nodes()
                        .into_iter()
                        .find(|n| n.node_id == node_id)
                        .map(|n| n.history)
                        .unwrap_or_default();
                    handle.send(FetchReply::Metrics { node_id, samples });
                }
            }
        }

        app.tick();

        println!(
            "round {}: watching={:?} samples={}",
            round,
            app.active_node,
            app.history().len()
        );
        if let Some(panel) = app.summary() {
            println!(
                "  RTT {} ms | CPU {} | MEM {}% | NET {}",
                panel.rtt, panel.cpu, panel.mem, panel.net
            );
        }

        std::thread::sleep(Duration::from_millis(200));
    }
}
