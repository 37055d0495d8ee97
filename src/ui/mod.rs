//! Presentation hooks for the map client.

pub mod presenter;

pub use presenter::{LoggingPresenter, NullPresenter, RoundPresenter};
