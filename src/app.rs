//! Headless application: loads config and markers, then autoplays rounds.

use anyhow::{Context, Result};
use std::path::Path;

use poemwalk::networking::HttpNeighborProvider;
use poemwalk::storage::config::{self, AppConfig};
use poemwalk::ui::LoggingPresenter;
use poemwalk::world::animator::{FixedStepClock, FrameClock, IntervalClock};
use poemwalk::world::import;
use poemwalk::world::navigation::{self, AutoplayOutcome, EngineSettings, NavigationEngine};

/// Main application state.
pub struct WalkApp {
    config: AppConfig,
    engine: NavigationEngine,
}

impl WalkApp {
    /// Build the app from the config at `config_path`, or the default
    /// location when `None`.
    ///
    /// With `realtime` off, animations run on simulated time.
    pub fn new(config_path: Option<&Path>, realtime: bool) -> Result<Self> {
        let config = match config_path {
            Some(path) => config::load_config_from(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => config::load_config().context("loading config")?,
        };
        tracing::info!("Data directory: {}", config.data_dir.display());

        let provider = HttpNeighborProvider::from_settings(&config.server)
            .context("creating graph client")?;
        tracing::info!("Graph server at {}", provider.url());

        let clock: Box<dyn FrameClock> = if realtime {
            Box::new(IntervalClock::new(config.game.fps))
        } else {
            Box::new(FixedStepClock::from_fps(config.game.fps))
        };

        let mut engine = NavigationEngine::new(
            EngineSettings::from_config(&config.game, &config.viewport),
            Box::new(provider),
            Box::new(LoggingPresenter::new()),
            clock,
        );

        let markers = import::load_catalog(&config).context("loading marker catalog")?;
        if !markers.warnings.is_empty() {
            tracing::warn!("{} marker import warnings", markers.warnings.len());
        }
        engine.load_markers(markers.records);

        Ok(Self { config, engine })
    }

    /// Play `rounds` rounds back to back.
    pub async fn run(&mut self, rounds: u32) -> Result<()> {
        for n in 1..=rounds {
            let started = if n == 1 {
                self.engine.start_round().await
            } else {
                self.engine.next_round().await
            };
            match started {
                Ok(_) => {}
                Err(e) if e.is_network() => {
                    tracing::warn!("Skipping round {}: {}", n, e);
                    continue;
                }
                Err(e) => return Err(e).with_context(|| format!("starting round {n}")),
            }

            let (outcome, summary) =
                navigation::play_round(&mut self.engine, self.config.game.max_moves)
                    .await
                    .with_context(|| format!("playing round {n}"))?;

            if let Some(summary) = summary {
                tracing::info!(
                    "Round {}: {:?} after {} moves, {:.0} m, {}/{} markers, {:.1}s walking",
                    n,
                    outcome,
                    summary.moves,
                    summary.distance_m,
                    summary.revealed,
                    summary.total_markers,
                    summary.walked_for.as_secs_f64()
                );
            }
            if outcome != AutoplayOutcome::Arrived {
                tracing::warn!("Round {} did not reach its goal", n);
            }
        }

        self.engine.reset();
        Ok(())
    }
}

