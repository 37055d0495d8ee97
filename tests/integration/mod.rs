//! Integration test modules.

mod autoplay_test;
mod quest_test;
