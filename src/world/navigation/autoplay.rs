//! Headless walker: plays a round without a human at the map.
//!
//! At every decision point the walker takes the unvisited neighbor closest
//! to the goal, and opens each newly revealed marker so quest hooks fire.

use std::collections::HashSet;

use super::{NavigationEngine, NavigationError, NavigationState, RoundSummary};
use crate::world::geo::{self, Coordinate};
use crate::world::route::NeighborEdge;

/// How an autoplayed round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoplayOutcome {
    /// Goal reached
    Arrived,
    /// No neighbors offered
    DeadEnd,
    /// Move budget used up
    OutOfMoves,
}

/// Pick the edge to walk toward `goal`.
///
/// Unvisited endpoints are preferred; among those the closest to the goal
/// wins.
pub fn choose_neighbor<'a>(
    neighbors: &'a [NeighborEdge],
    goal: Coordinate,
    visited: &HashSet<(u64, u64)>,
) -> Option<&'a NeighborEdge> {
    closest(neighbors.iter().filter(|e| !visited.contains(&key(e.endpoint))), goal)
        .or_else(|| closest(neighbors.iter(), goal))
}

fn closest<'a>(
    edges: impl Iterator<Item = &'a NeighborEdge>,
    goal: Coordinate,
) -> Option<&'a NeighborEdge> {
    edges.min_by(|a, b| geo::distance(a.endpoint, goal).total_cmp(&geo::distance(b.endpoint, goal)))
}

fn key(c: Coordinate) -> (u64, u64) {
    (c.lat.to_bits(), c.lng.to_bits())
}

/// Play the current round until it ends or `max_moves` edges are walked.
///
/// The engine must already show neighbors (see
/// [`NavigationEngine::start_round`]).
pub async fn play_round(
    engine: &mut NavigationEngine,
    max_moves: u32,
) -> Result<(AutoplayOutcome, Option<RoundSummary>), NavigationError> {
    let mut visited = HashSet::new();
    let mut opened = 0;
    if let Some(position) = engine.current_position() {
        visited.insert(key(position));
    }

    let outcome = loop {
        opened = open_new_markers(engine, opened)?;

        match engine.state() {
            NavigationState::RoundComplete => break AutoplayOutcome::Arrived,
            NavigationState::NeighborsShown => {}
            NavigationState::AwaitingNeighbors => {
                engine.request_neighbors().await?;
                continue;
            }
            state => {
                return Err(NavigationError::InvalidTransition {
                    state,
                    action: "autoplay",
                })
            }
        }

        let moves = engine.round().map(|r| r.moves).unwrap_or(0);
        if moves >= max_moves {
            tracing::warn!("Autoplay stopped after {} moves", moves);
            break AutoplayOutcome::OutOfMoves;
        }

        let goal = engine.end().ok_or(NavigationError::NoActiveRound)?;
        let Some(next) = choose_neighbor(engine.neighbors(), goal, &visited).map(|e| e.endpoint)
        else {
            break AutoplayOutcome::DeadEnd;
        };

        visited.insert(key(next));
        tracing::debug!(
            "Autoplay heading to {} ({:.0} m from goal)",
            next,
            geo::distance(next, goal)
        );
        engine.select_neighbor(next).await?;
    };

    Ok((outcome, engine.summary()))
}

/// Open markers revealed since the first `already_opened`.
fn open_new_markers(
    engine: &mut NavigationEngine,
    already_opened: usize,
) -> Result<usize, NavigationError> {
    let pending: Vec<usize> = engine
        .catalog()
        .revealed_indices()
        .iter()
        .skip(already_opened)
        .copied()
        .collect();

    for &index in &pending {
        engine.open_marker_at(index)?;
    }
    Ok(already_opened + pending.len())
}
