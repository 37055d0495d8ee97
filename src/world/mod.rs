//! Map world: geometry, markers, quests and the navigation engine.
//!
//! A round walks the player node to node over a server-provided graph,
//! revealing points of interest that come within the visibility radius.

pub mod animator;
pub mod geo;
pub mod hud;
pub mod import;
pub mod landmarks;
pub mod navigation;
pub mod quests;
pub mod route;

pub use geo::{Bounds, Coordinate, ScreenPoint, ScreenSize, Viewport};
pub use landmarks::{MarkerCatalog, MarkerIcon, MarkerRecord, MarkerStyle, QuestLink};
pub use navigation::{NavigationEngine, NavigationError, NavigationState};
pub use quests::QuestLog;
pub use route::{DetailedPath, NeighborEdge, NeighborSet};
