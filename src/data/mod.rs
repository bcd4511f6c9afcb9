//! Data models and processing for the dashboard.
//!
//! Transforms raw controller payloads into display-ready structures.
//!
//! ## Submodules
//!
//! - [`directory`]: node list rows and panel state
//! - [`series`]: chart series extraction and time-axis labels
//! - [`summary`]: latest-sample summary formatting
//!
//! ## Data Flow
//!
//! ```text
//! FetchReply (raw JSON payloads)
//!        │
//!        ├──▶ Directory::from_nodes()   (node panel rows)
//!        ├──▶ SeriesSet::from_history() (chart series)
//!        └──▶ SummaryPanel::from_history() (summary strip)
//! ```

pub mod directory;
pub mod series;
pub mod summary;

pub use directory::{Directory, NodeRow, CONNECTION_LOST, WAITING_FOR_PROBES};
pub use series::{time_label, SeriesSet};
pub use summary::SummaryPanel;
