//! Latest-sample summary formatting.
//!
//! The summary strip shows the newest sample of the selected node's
//! history. Formatting rules follow the controller dashboard: RTT and CPU
//! with two decimals, memory with one, bursts as an integer event count;
//! absent fields display as zero rather than failing.

use crate::source::MetricSample;

/// Pre-formatted values for the summary strip.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryPanel {
    pub rtt: String,
    pub cpu: String,
    pub mem: String,
    pub net: String,
}

impl SummaryPanel {
    /// Build the summary from the newest sample of a history.
    ///
    /// Returns None for an empty history - the caller keeps whatever was
    /// displayed before.
    pub fn from_history(history: &[MetricSample]) -> Option<Self> {
        history.last().map(Self::from_latest)
    }

    pub fn from_latest(sample: &MetricSample) -> Self {
        Self {
            rtt: format!("{:.2}", sample.ping_avg_rtt.unwrap_or(0.0)),
            cpu: format!("{:.2}", sample.cpu_load1.unwrap_or(0.0)),
            mem: format!("{:.1}", sample.mem_used_percent.unwrap_or(0.0)),
            net: format!("{} evt", sample.net_burst.unwrap_or(0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_fields_default_to_zero() {
        let sample = MetricSample {
            timestamp: 1_714_550_703_000,
            ping_avg_rtt: Some(12.345),
            cpu_load1: None,
            mem_used_percent: None,
            net_burst: None,
        };

        let panel = SummaryPanel::from_latest(&sample);
        assert_eq!(panel.rtt, "12.35");
        assert_eq!(panel.cpu, "0.00");
        assert_eq!(panel.mem, "0.0");
        assert_eq!(panel.net, "0 evt");
    }

    #[test]
    fn test_full_sample_formatting() {
        let sample = MetricSample {
            timestamp: 0,
            ping_avg_rtt: Some(3.2),
            cpu_load1: Some(1.507),
            mem_used_percent: Some(45.27),
            net_burst: Some(12),
        };

        let panel = SummaryPanel::from_latest(&sample);
        assert_eq!(panel.rtt, "3.20");
        assert_eq!(panel.cpu, "1.51");
        assert_eq!(panel.mem, "45.3");
        assert_eq!(panel.net, "12 evt");
    }

    #[test]
    fn test_summary_uses_last_element() {
        let history = vec![
            MetricSample {
                ping_avg_rtt: Some(1.0),
                ..MetricSample::at(0)
            },
            MetricSample {
                ping_avg_rtt: Some(2.0),
                ..MetricSample::at(1)
            },
        ];
        let panel = SummaryPanel::from_history(&history).unwrap();
        assert_eq!(panel.rtt, "2.00");
    }

    #[test]
    fn test_empty_history_yields_none() {
        assert!(SummaryPanel::from_history(&[]).is_none());
    }
}
