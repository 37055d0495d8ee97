//! Wire format of the graph server.
//!
//! Every call is a JSON `POST` to one endpoint; the `type` field selects
//! the operation. Coordinates travel as `[lat, lng]` arrays and neighbor
//! edges as `[endpoint, [subpath...]]`.

use serde::{Deserialize, Serialize};

use crate::world::geo::Coordinate;
use crate::world::route::NeighborSet;

/// Request body sent to the graph server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GraphRequest {
    /// New round: server picks start and end
    Start,
    /// Edges leaving `current`
    Neighbours { current: Coordinate },
}

/// Reply to [`GraphRequest::Start`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartResponse {
    /// Round start node
    pub start: Coordinate,
    /// Round goal; absent when the client decides it
    #[serde(default)]
    pub end: Option<Coordinate>,
    /// Edges leaving `start`
    #[serde(default, alias = "neighbors")]
    pub neighbours: NeighborSet,
}

/// Reply to [`GraphRequest::Neighbours`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeighborResponse {
    #[serde(alias = "neighbors")]
    pub neighbours: NeighborSet,
}

/// Error body the server sends for bad requests.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerError {
    pub error: String,
}
