//! Chart series extraction.
//!
//! Turns a metric history into plain plottable series so the rendering
//! backend stays swappable: nothing here (or in the app controller)
//! depends on a widget type.

use chrono::{Local, LocalResult, TimeZone};

use crate::source::MetricSample;

/// Plottable series derived from one node's metric history.
///
/// Points are indexed 0..n-1 on the x axis; `time_labels` carries the
/// matching local HH:MM:SS label per sample. Absent metric fields are
/// charted as zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesSet {
    pub time_labels: Vec<String>,
    pub rtt: Vec<(f64, f64)>,
    pub cpu: Vec<(f64, f64)>,
    pub mem: Vec<(f64, f64)>,
    pub net: Vec<u64>,
}

impl SeriesSet {
    pub fn from_history(history: &[MetricSample]) -> Self {
        let mut set = Self::default();
        for (i, sample) in history.iter().enumerate() {
            let x = i as f64;
            set.time_labels.push(time_label(sample.timestamp));
            set.rtt.push((x, sample.ping_avg_rtt.unwrap_or(0.0)));
            set.cpu.push((x, sample.cpu_load1.unwrap_or(0.0)));
            set.mem.push((x, sample.mem_used_percent.unwrap_or(0.0)));
            set.net.push(sample.net_burst.unwrap_or(0));
        }
        set
    }

    pub fn is_empty(&self) -> bool {
        self.time_labels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.time_labels.len()
    }

    /// First, middle and last time label, for the x axis.
    pub fn x_labels(&self) -> Vec<&str> {
        match self.time_labels.len() {
            0 => Vec::new(),
            1 => vec![self.time_labels[0].as_str()],
            n => vec![
                self.time_labels[0].as_str(),
                self.time_labels[n / 2].as_str(),
                self.time_labels[n - 1].as_str(),
            ],
        }
    }

    /// Upper y bound for the RTT chart. At least 1.0 so a flat-zero
    /// series still gets a sane axis.
    pub fn rtt_bound(&self) -> f64 {
        axis_bound(self.rtt.iter().map(|p| p.1))
    }

    /// Shared upper y bound for the CPU/MEM chart.
    pub fn resource_bound(&self) -> f64 {
        axis_bound(self.cpu.iter().chain(self.mem.iter()).map(|p| p.1))
    }

    /// Upper bound for the burst bar chart.
    pub fn net_max(&self) -> u64 {
        self.net.iter().copied().max().unwrap_or(0)
    }
}

fn axis_bound(values: impl Iterator<Item = f64>) -> f64 {
    let max = values.fold(0.0f64, f64::max);
    (max * 1.1).max(1.0)
}

/// Format a unix-millisecond timestamp as local HH:MM:SS (24-hour,
/// zero-padded). Out-of-range timestamps render as a dash placeholder.
pub fn time_label(ts_ms: i64) -> String {
    match Local.timestamp_millis_opt(ts_ms) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => {
            dt.format("%H:%M:%S").to_string()
        }
        LocalResult::None => "--:--:--".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(ts: i64, rtt: Option<f64>, cpu: Option<f64>) -> MetricSample {
        MetricSample {
            timestamp: ts,
            ping_avg_rtt: rtt,
            cpu_load1: cpu,
            mem_used_percent: None,
            net_burst: None,
        }
    }

    #[test]
    fn test_time_label_is_zero_padded() {
        let dt = Local.with_ymd_and_hms(2024, 5, 2, 9, 5, 3).unwrap();
        assert_eq!(time_label(dt.timestamp_millis()), "09:05:03");
    }

    #[test]
    fn test_absent_fields_chart_as_zero() {
        let set = SeriesSet::from_history(&[sample(0, Some(12.5), None)]);
        assert_eq!(set.rtt, vec![(0.0, 12.5)]);
        assert_eq!(set.cpu, vec![(0.0, 0.0)]);
        assert_eq!(set.mem, vec![(0.0, 0.0)]);
        assert_eq!(set.net, vec![0]);
    }

    #[test]
    fn test_empty_history() {
        let set = SeriesSet::from_history(&[]);
        assert!(set.is_empty());
        assert!(set.x_labels().is_empty());
        assert_eq!(set.net_max(), 0);
    }

    #[test]
    fn test_x_labels_first_mid_last() {
        let history: Vec<MetricSample> = (0..5)
            .map(|i| sample(1_714_550_700_000 + i * 1000, None, None))
            .collect();
        let set = SeriesSet::from_history(&history);

        let labels = set.x_labels();
        assert_eq!(labels.len(), 3);
        assert_eq!(labels[0], set.time_labels[0]);
        assert_eq!(labels[1], set.time_labels[2]);
        assert_eq!(labels[2], set.time_labels[4]);
    }

    #[test]
    fn test_bounds_never_collapse() {
        let set = SeriesSet::from_history(&[sample(0, Some(0.0), Some(0.0))]);
        assert!(set.rtt_bound() >= 1.0);
        assert!(set.resource_bound() >= 1.0);
    }

    #[test]
    fn test_resource_bound_covers_both_series() {
        let mut s = sample(0, None, Some(0.4));
        s.mem_used_percent = Some(73.0);
        let set = SeriesSet::from_history(&[s]);
        assert!(set.resource_bound() > 73.0);
    }
}
