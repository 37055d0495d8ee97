//! Navigation state, round data and errors.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::networking::ProviderError;
use crate::storage::config::{GameSettings, ViewportSettings};
use crate::world::geo::{Coordinate, ScreenSize};
use crate::world::route::{DetailedPath, NeighborSet};

/// Where the engine is in a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationState {
    /// No round running
    Idle,
    /// Waiting for the neighbor set of the current position
    AwaitingNeighbors,
    /// Neighbor markers on screen, waiting for a choice
    NeighborsShown,
    /// Player marker walking a sub-path
    Traveling,
    /// Goal reached, trace on screen
    RoundComplete,
}

impl NavigationState {
    /// True while a round is running.
    pub fn in_round(&self) -> bool {
        matches!(
            self,
            Self::AwaitingNeighbors | Self::NeighborsShown | Self::Traveling
        )
    }
}

impl fmt::Display for NavigationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::AwaitingNeighbors => "awaiting neighbours",
            Self::NeighborsShown => "neighbours shown",
            Self::Traveling => "traveling",
            Self::RoundComplete => "round complete",
        };
        f.write_str(name)
    }
}

/// Navigation errors.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum NavigationError {
    /// Transport failure or non-2xx status
    #[error("Network error: {0}")]
    Network(String),

    /// Server reply could not be used
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Server did not answer in time
    #[error("Request timed out")]
    Timeout,

    /// Operation not allowed in the current state
    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        state: NavigationState,
        action: &'static str,
    },

    /// Endpoint is not in the current neighbor set
    #[error("No neighbour at {0}")]
    UnknownNeighbor(Coordinate),

    /// Operation needs a running round
    #[error("No active round")]
    NoActiveRound,

    /// No catalog record at these coordinates
    #[error("No marker at {0}")]
    UnknownMarker(Coordinate),

    /// No catalog record with this index
    #[error("No marker with index {0}")]
    UnknownMarkerIndex(usize),
}

impl NavigationError {
    /// True for failures at the network boundary.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::MalformedResponse(_) | Self::Timeout
        )
    }
}

impl From<ProviderError> for NavigationError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Network(msg) => Self::Network(msg),
            ProviderError::Status { status, detail } => {
                Self::Network(format!("HTTP {status}: {detail}"))
            }
            ProviderError::MalformedResponse(msg) => Self::MalformedResponse(msg),
            ProviderError::Timeout => Self::Timeout,
        }
    }
}

/// Everything owned by one round.
#[derive(Debug, Clone)]
pub struct RoundState {
    /// Round ID
    pub id: Uuid,
    /// Wall-clock start
    pub started_at: DateTime<Utc>,
    /// Start node
    pub start: Coordinate,
    /// Last node reached
    pub current_position: Coordinate,
    /// Goal; moved by quest completion
    pub end: Coordinate,
    /// Edges offered at `current_position`
    pub neighbors: NeighborSet,
    /// Every sub-path walked, concatenated
    pub detailed_path: DetailedPath,
    /// Edges walked
    pub moves: u32,
    /// Animation time spent walking
    pub walked_for: Duration,
}

impl RoundState {
    pub fn new(start: Coordinate, end: Coordinate) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            start,
            current_position: start,
            end,
            neighbors: NeighborSet::new(),
            detailed_path: DetailedPath::new(),
            moves: 0,
            walked_for: Duration::ZERO,
        }
    }
}

/// Totals for one round.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSummary {
    pub round_id: Uuid,
    /// Wall-clock start
    pub started_at: DateTime<Utc>,
    pub moves: u32,
    /// Length of the walked trace in meters
    pub distance_m: f64,
    /// Markers revealed this round
    pub revealed: usize,
    /// Markers in the catalog
    pub total_markers: usize,
    /// Animation time spent walking
    pub walked_for: Duration,
    /// Goal reached
    pub completed: bool,
}

/// Tuning for a [`super::NavigationEngine`].
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    /// Reveal radius (meters)
    pub visibility_radius_m: f64,
    /// Animation slowness (ms per meter)
    pub movement_slowness: f64,
    /// Node stride between proximity checks
    pub checkpoint_interval: usize,
    /// Arrival distance to the goal (meters); 0 means exact equality
    pub arrival_tolerance_m: f64,
    pub start_override: Option<Coordinate>,
    pub end_override: Option<Coordinate>,
    /// Goal when the server sends none
    pub fallback_end: Option<Coordinate>,
    /// Quests added at every round start
    pub initial_quests: Vec<String>,
    /// Screen size used for the off-screen indicator
    pub viewport_size: ScreenSize,
    pub zoom: f64,
    /// Indicator inset from the screen edge (pixels)
    pub edge_padding: f64,
}

impl EngineSettings {
    pub fn from_config(game: &GameSettings, viewport: &ViewportSettings) -> Self {
        Self {
            visibility_radius_m: game.visibility_radius_m,
            movement_slowness: game.movement_slowness,
            checkpoint_interval: game.checkpoint_interval.max(1),
            arrival_tolerance_m: game.arrival_tolerance_m,
            start_override: game.start_override,
            end_override: game.end_override,
            fallback_end: game.fallback_end,
            initial_quests: game.initial_quests.clone(),
            viewport_size: viewport.size(),
            zoom: viewport.zoom,
            edge_padding: viewport.padding,
        }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self::from_config(&GameSettings::default(), &ViewportSettings::default())
    }
}
