//! Graph edges offered to the player and the trace of the walk so far.
//!
//! The graph server hands out, for the current node, a list of reachable
//! decision points together with the curved sub-path leading to each one.

use serde::{Deserialize, Serialize};

use super::geo::{self, Coordinate, COORDINATE_TOLERANCE_METERS};

/// One traversable connection from the current node to a neighbor.
///
/// On the wire this is a two-element array: `[endpoint, [subpath...]]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawEdge", into = "RawEdge")]
pub struct NeighborEdge {
    /// Decision point at the far end of the edge
    pub endpoint: Coordinate,
    /// Detailed route from the origin to `endpoint`, inclusive
    pub subpath: Vec<Coordinate>,
}

#[derive(Serialize, Deserialize)]
struct RawEdge(Coordinate, Vec<Coordinate>);

impl From<RawEdge> for NeighborEdge {
    fn from(raw: RawEdge) -> Self {
        Self {
            endpoint: raw.0,
            subpath: raw.1,
        }
    }
}

impl From<NeighborEdge> for RawEdge {
    fn from(edge: NeighborEdge) -> Self {
        RawEdge(edge.endpoint, edge.subpath)
    }
}

/// Problems found when checking an edge against its origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeIssue {
    /// No sub-path at all; the edge cannot be walked
    EmptySubpath,
    /// The sub-path does not start at the current node
    DetachedStart,
    /// The sub-path does not finish at the endpoint
    DetachedEnd,
}

impl NeighborEdge {
    /// Create an edge.
    pub fn new(endpoint: Coordinate, subpath: Vec<Coordinate>) -> Self {
        Self { endpoint, subpath }
    }

    /// Walking length of the sub-path in meters.
    pub fn length_meters(&self) -> f64 {
        geo::path_length(&self.subpath)
    }

    /// Check the sub-path invariants relative to `origin`.
    ///
    /// Only [`EdgeIssue::EmptySubpath`] makes an edge unusable; the other
    /// issues are reported so callers can log them.
    pub fn issues(&self, origin: Coordinate) -> Vec<EdgeIssue> {
        let (Some(first), Some(last)) = (self.subpath.first(), self.subpath.last()) else {
            return vec![EdgeIssue::EmptySubpath];
        };

        let mut issues = Vec::new();
        if !first.matches(&origin, COORDINATE_TOLERANCE_METERS) {
            issues.push(EdgeIssue::DetachedStart);
        }
        if !last.matches(&self.endpoint, COORDINATE_TOLERANCE_METERS) {
            issues.push(EdgeIssue::DetachedEnd);
        }
        issues
    }
}

/// The ordered neighbor edges offered at one position.
pub type NeighborSet = Vec<NeighborEdge>;

/// Find the edge whose endpoint is `endpoint`.
///
/// Exact matches win; otherwise the first endpoint within
/// [`COORDINATE_TOLERANCE_METERS`] is returned.
pub fn find_edge(neighbors: &[NeighborEdge], endpoint: Coordinate) -> Option<&NeighborEdge> {
    neighbors
        .iter()
        .find(|edge| edge.endpoint == endpoint)
        .or_else(|| {
            neighbors
                .iter()
                .find(|edge| edge.endpoint.matches(&endpoint, COORDINATE_TOLERANCE_METERS))
        })
}

/// Everything the player has walked this round, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailedPath {
    points: Vec<Coordinate>,
}

impl DetailedPath {
    /// Create an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a walked sub-path.
    pub fn extend_from(&mut self, subpath: &[Coordinate]) {
        self.points.extend_from_slice(subpath);
    }

    /// Forget the walk (round start).
    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<Coordinate> {
        self.points.last().copied()
    }

    /// Length of the walked trace in meters.
    pub fn length_meters(&self) -> f64 {
        geo::path_length(&self.points)
    }
}
