// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # probewatch
//!
//! A terminal dashboard and library for monitoring probe node telemetry.
//!
//! This crate renders the metric streams collected by a probe controller -
//! RTT, CPU load, memory usage and network microburst counts per node - in
//! an interactive terminal UI. It can poll a live controller over HTTP,
//! replay a captured payload from a file, or receive data through an
//! in-memory channel.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │(processing)   │(rendering)   │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ source  │◀── ApiSource | FileSource | ChannelSource     │
//! │  │ (input) │                                                │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, the two polling loops, and selection logic
//! - **[`source`]**: Data source abstraction ([`MetricSource`] trait) with
//!   implementations for HTTP polling, file replay, and channel-based input
//! - **[`data`]**: Data models and processing - node directory rows, chart
//!   series extraction, and summary formatting
//! - **[`ui`]**: Terminal rendering using ratatui - node list, summary strip,
//!   chart panels, and theme support
//!
//! ## Polling model
//!
//! Two repeating loops, serviced cooperatively from the UI thread:
//!
//! - a 5-second discovery loop that refreshes the node directory for the
//!   lifetime of the process, and
//! - a 3-second detail loop for the selected node, replaced (never stacked)
//!   whenever the selection changes.
//!
//! Fetches are fire-and-forget; a slow response never blocks a tick and a
//! failed one never stops the loops.
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Watch a live controller
//! probewatch --url http://127.0.0.1:8080
//!
//! # Replay a captured /api/nodes payload
//! probewatch --file nodes.json
//! ```
//!
//! ### As a library with a file source
//!
//! ```
//! use probewatch::{App, FileSource, PollSettings};
//!
//! let source = Box::new(FileSource::new("nodes.json"));
//! let app = App::new(source, PollSettings::default());
//! ```
//!
//! ### As a library with a channel source
//!
//! ```
//! use probewatch::{App, ChannelSource, FetchReply, PollSettings};
//!
//! let (handle, source) = ChannelSource::create("synthetic");
//! let mut app = App::new(Box::new(source), PollSettings::default());
//! app.start();
//!
//! // Feed a (here: empty) node directory
//! handle.send(FetchReply::Nodes(Vec::new()));
//! app.tick();
//! ```

pub mod app;
pub mod data;
pub mod events;
pub mod settings;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, PollSettings, Ticker};
pub use data::{Directory, NodeRow, SeriesSet, SummaryPanel, CONNECTION_LOST, WAITING_FOR_PROBES};
pub use settings::Settings;
pub use source::{
    ApiSource, ChannelHandle, ChannelSource, FetchCommand, FetchReply, FileSource, MetricSample,
    MetricSource, NodeStatus,
};
