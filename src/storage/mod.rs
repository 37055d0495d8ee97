//! Storage module for configuration.

pub mod config;

pub use config::{AppConfig, CatalogSettings, GameSettings, MarkerSource, ServerSettings, SourceKind, ViewportSettings};
