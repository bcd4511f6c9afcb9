//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and the active probe.
    pub highlight: Color,
    /// Color for online probes.
    pub online: Color,
    /// Color for offline probes.
    pub offline: Color,
    /// Color for errors and the connection-lost banner.
    pub critical: Color,
    /// Color for the RTT series.
    pub rtt: Color,
    /// Color for the CPU series.
    pub cpu: Color,
    /// Color for the memory series.
    pub mem: Color,
    /// Color for the burst bars.
    pub net: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for panel headers and labels.
    pub header: Style,
    /// Style for the highlighted node row.
    pub selected: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            online: Color::Green,
            offline: Color::DarkGray,
            critical: Color::Red,
            rtt: Color::Cyan,
            cpu: Color::Red,
            mem: Color::Magenta,
            net: Color::Green,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            online: Color::Green,
            offline: Color::DarkGray,
            critical: Color::Red,
            rtt: Color::Blue,
            cpu: Color::Red,
            mem: Color::Magenta,
            net: Color::Green,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Style for a probe's online/offline indicator.
    pub fn presence_style(&self, is_online: bool) -> Style {
        if is_online {
            Style::default().fg(self.online)
        } else {
            Style::default().fg(self.offline)
        }
    }
}
