//! Head-up display state for the map overlay
//!
//! Progress bar, distance-to-goal and compass readouts, and the short info
//! lines shown for a marker.

use super::geo::{self, Coordinate};
use super::landmarks::MarkerRecord;

/// Progress bar color band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressBand {
    /// Below half
    Red,
    /// Half up to 80 %
    Yellow,
    /// 80 % and above
    Green,
}

impl ProgressBand {
    /// Band for a percentage in `[0, 100]`
    pub fn from_percent(percent: f64) -> Self {
        if percent < 50.0 {
            Self::Red
        } else if percent < 80.0 {
            Self::Yellow
        } else {
            Self::Green
        }
    }

    /// CSS color name for the bar fill
    pub fn color_name(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Yellow => "yellow",
            Self::Green => "green",
        }
    }
}

/// Reveal progress bar
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProgressBar {
    percent: f64,
}

impl ProgressBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set fill level; clamped to `[0, 100]`
    pub fn set_percent(&mut self, percent: f64) {
        self.percent = if percent.is_finite() {
            percent.clamp(0.0, 100.0)
        } else {
            0.0
        };
    }

    pub fn percent(&self) -> f64 {
        self.percent
    }

    pub fn band(&self) -> ProgressBand {
        ProgressBand::from_percent(self.percent)
    }

    /// Label shown next to the bar
    pub fn label(&self) -> String {
        format!("Progress: {:.0}%", self.percent)
    }
}

/// Format distance for display
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{:.0} m", meters)
    } else {
        format!("{:.2} km", meters / 1000.0)
    }
}

/// Eight-point compass name for a bearing in degrees
pub fn compass_point(bearing: f64) -> &'static str {
    const POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
    let sector = ((bearing.rem_euclid(360.0) + 22.5) / 45.0) as usize % 8;
    POINTS[sector]
}

/// "250 m NE" style readout from the player to the goal
pub fn format_goal(from: Coordinate, goal: Coordinate) -> String {
    let distance = geo::distance(from, goal);
    let bearing = geo::bearing_degrees(from, goal);
    format!("{} {}", format_distance(distance), compass_point(bearing))
}

/// Short info lines for a marker popup
pub fn marker_info_lines(marker: &MarkerRecord) -> Vec<String> {
    let mut lines = vec![format!("{} ({})", marker.title, marker.icon.display_name())];

    let meta = &marker.metadata;
    for (label, value) in [
        ("Author", &meta.author),
        ("Year", &meta.year),
        ("Language", &meta.language),
        ("Rating", &meta.rating),
    ] {
        if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
            lines.push(format!("{label}: {value}"));
        }
    }

    if let Some(quest) = &marker.quest.start {
        lines.push(format!("New quest: {quest}"));
    }
    lines
}
