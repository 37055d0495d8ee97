//! PoemWalk - Walking Game Client Engine
//!
//! Walks a player across a city graph served over HTTP, reveals poems,
//! restaurants and landmarks near the path, and tracks simple quests that
//! can move the round's goal.

pub mod networking;
pub mod storage;
pub mod ui;
pub mod world;

// Re-export commonly used types
pub use networking::{HttpNeighborProvider, NeighborProvider};
pub use storage::config::AppConfig;
pub use ui::presenter::RoundPresenter;
pub use world::navigation::NavigationEngine;
