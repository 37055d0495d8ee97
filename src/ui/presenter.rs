//! Presentation surface driven by the navigation engine.
//!
//! The engine never touches a rendering toolkit directly; it calls these
//! hooks and the host (web map, terminal, test double) draws whatever it
//! wants.

use crate::world::geo::{Bounds, Coordinate};
use crate::world::hud::{self, ProgressBar};
use crate::world::landmarks::MarkerRecord;
use crate::world::route::NeighborEdge;

/// Rendering hooks for one round.
///
/// Every method has a no-op default so hosts only implement what they draw.
pub trait RoundPresenter: Send {
    /// Player marker created at the round start.
    fn place_player(&mut self, _position: Coordinate) {}

    /// Player marker moved (every animation frame).
    fn move_player(&mut self, _position: Coordinate) {}

    /// Player marker removed at the round end.
    fn remove_player(&mut self) {}

    /// Re-center the camera on the player.
    fn follow_camera(&mut self, _center: Coordinate) {}

    /// Rotate the directional arrow to `bearing` degrees.
    fn point_indicator(&mut self, _bearing: f64) {}

    /// Show the off-screen goal marker at `position`, or hide it with `None`.
    fn show_target_indicator(&mut self, _position: Option<Coordinate>) {}

    /// Draw one clickable marker per neighbor edge.
    fn show_neighbors(&mut self, _neighbors: &[NeighborEdge]) {}

    /// Remove all neighbor markers.
    fn clear_neighbors(&mut self) {}

    /// Spawn a newly revealed point of interest.
    fn reveal_marker(&mut self, _marker: &MarkerRecord) {}

    /// Progress bar update, percentage in `[0, 100]`.
    fn update_progress(&mut self, _percent: f64) {}

    /// Open the detail modal for a marker.
    fn open_modal(&mut self, _marker: &MarkerRecord) {}

    /// Redraw the quest log.
    fn render_quests(&mut self, _quests: &[String]) {}

    /// Draw the walked trace and fit the view to `bounds`.
    fn show_trace(&mut self, _trace: &[Coordinate], _bounds: Option<Bounds>) {}

    /// Tear down every round-scoped visual.
    fn clear_round(&mut self) {}
}

/// Presenter that draws nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPresenter;

impl RoundPresenter for NullPresenter {}

/// Headless presenter that narrates the round through `tracing`.
///
/// Per-frame hooks are only logged at trace level.
#[derive(Debug, Default)]
pub struct LoggingPresenter {
    progress: ProgressBar,
    frames: u64,
}

impl LoggingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames seen since creation
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn progress(&self) -> &ProgressBar {
        &self.progress
    }
}

impl RoundPresenter for LoggingPresenter {
    fn place_player(&mut self, position: Coordinate) {
        tracing::info!("Player placed at {}", position);
    }

    fn move_player(&mut self, position: Coordinate) {
        self.frames += 1;
        tracing::trace!("Player at {}", position);
    }

    fn remove_player(&mut self) {
        tracing::debug!("Player marker removed");
    }

    fn point_indicator(&mut self, bearing: f64) {
        tracing::trace!("Arrow bearing {:.1}° {}", bearing, hud::compass_point(bearing));
    }

    fn show_target_indicator(&mut self, position: Option<Coordinate>) {
        match position {
            Some(p) => tracing::debug!("Goal off screen, edge marker at {}", p),
            None => tracing::debug!("Goal on screen"),
        }
    }

    fn show_neighbors(&mut self, neighbors: &[NeighborEdge]) {
        tracing::info!("{} neighbours available", neighbors.len());
        for (i, edge) in neighbors.iter().enumerate() {
            tracing::debug!(
                "  [{}] {} via {} points ({})",
                i,
                edge.endpoint,
                edge.subpath.len(),
                hud::format_distance(edge.length_meters())
            );
        }
    }

    fn reveal_marker(&mut self, marker: &MarkerRecord) {
        tracing::info!("Discovered {}", hud::marker_info_lines(marker).join(" | "));
    }

    fn update_progress(&mut self, percent: f64) {
        self.progress.set_percent(percent);
        tracing::info!(
            "{} [{}]",
            self.progress.label(),
            self.progress.band().color_name()
        );
    }

    fn open_modal(&mut self, marker: &MarkerRecord) {
        tracing::info!("Opened '{}' ({:?} modal)", marker.title, marker.style);
    }

    fn render_quests(&mut self, quests: &[String]) {
        if quests.is_empty() {
            tracing::info!("Quest log empty");
        } else {
            tracing::info!("Quests: {}", quests.join("; "));
        }
    }

    fn show_trace(&mut self, trace: &[Coordinate], _bounds: Option<Bounds>) {
        tracing::info!(
            "Round trace: {} points, {}",
            trace.len(),
            hud::format_distance(crate::world::geo::path_length(trace))
        );
    }

    fn clear_round(&mut self) {
        tracing::info!("Cleared map");
    }
}
