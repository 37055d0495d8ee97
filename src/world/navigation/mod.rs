//! Round lifecycle: graph walking, proximity reveals and quest effects.
//!
//! The engine owns all round state and drives three collaborators: a
//! [`NeighborProvider`] for graph data, a [`RoundPresenter`] for drawing and
//! a [`FrameClock`] for animation timing.

pub mod autoplay;
pub mod types;

pub use autoplay::{play_round, AutoplayOutcome};
pub use types::{EngineSettings, NavigationError, NavigationState, RoundState, RoundSummary};

use crate::networking::NeighborProvider;
use crate::ui::presenter::RoundPresenter;
use crate::world::animator::{AnimationEvent, FrameClock, PathAnimation, PathAnimator};
use crate::world::geo::{self, Bounds, Coordinate, Viewport};
use crate::world::hud;
use crate::world::landmarks::{MarkerCatalog, MarkerRecord};
use crate::world::quests::{QuestCompletion, QuestLog};
use crate::world::route::{self, DetailedPath, EdgeIssue, NeighborSet};

/// Navigation engine.
///
/// Every operation takes `&mut self`, so at most one animation or request
/// is in flight at a time.
pub struct NavigationEngine {
    settings: EngineSettings,
    provider: Box<dyn NeighborProvider>,
    presenter: Box<dyn RoundPresenter>,
    clock: Box<dyn FrameClock>,
    catalog: MarkerCatalog,
    quests: QuestLog,
    state: NavigationState,
    round: Option<RoundState>,
    /// Last bearing sent to the directional indicator
    last_bearing: f64,
}

impl NavigationEngine {
    /// Create an idle engine with an empty catalog.
    pub fn new(
        settings: EngineSettings,
        provider: Box<dyn NeighborProvider>,
        presenter: Box<dyn RoundPresenter>,
        clock: Box<dyn FrameClock>,
    ) -> Self {
        Self {
            settings,
            provider,
            presenter,
            clock,
            catalog: MarkerCatalog::new(),
            quests: QuestLog::new(),
            state: NavigationState::Idle,
            round: None,
            last_bearing: 0.0,
        }
    }

    /// Replace the marker catalog.
    pub fn load_markers(&mut self, records: Vec<MarkerRecord>) {
        self.catalog.load(records);
        tracing::info!("{} markers loaded", self.catalog.len());
    }

    pub fn state(&self) -> NavigationState {
        self.state
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    /// Current goal
    pub fn end(&self) -> Option<Coordinate> {
        self.round.as_ref().map(|r| r.end)
    }

    pub fn current_position(&self) -> Option<Coordinate> {
        self.round.as_ref().map(|r| r.current_position)
    }

    /// Edges offered at the current position
    pub fn neighbors(&self) -> &[route::NeighborEdge] {
        self.round
            .as_ref()
            .map(|r| r.neighbors.as_slice())
            .unwrap_or(&[])
    }

    pub fn detailed_path(&self) -> Option<&DetailedPath> {
        self.round.as_ref().map(|r| &r.detailed_path)
    }

    pub fn quests(&self) -> &QuestLog {
        &self.quests
    }

    pub fn catalog(&self) -> &MarkerCatalog {
        &self.catalog
    }

    pub fn last_bearing(&self) -> f64 {
        self.last_bearing
    }

    /// Totals for the current or just-finished round.
    pub fn summary(&self) -> Option<RoundSummary> {
        self.round.as_ref().map(|round| RoundSummary {
            round_id: round.id,
            started_at: round.started_at,
            moves: round.moves,
            distance_m: round.detailed_path.length_meters(),
            revealed: self.catalog.progress().revealed,
            total_markers: self.catalog.len(),
            walked_for: round.walked_for,
            completed: self.state == NavigationState::RoundComplete,
        })
    }

    /// Start a round from `Idle` or `RoundComplete`.
    ///
    /// On a failed start request the engine stays where it was. A failed
    /// neighbor request leaves the round in `AwaitingNeighbors`, from where
    /// [`NavigationEngine::request_neighbors`] retries.
    pub async fn start_round(&mut self) -> Result<NavigationState, NavigationError> {
        if !matches!(
            self.state,
            NavigationState::Idle | NavigationState::RoundComplete
        ) {
            return Err(self.invalid("start a round"));
        }

        let response = match self.provider.fetch_start().await {
            Ok(response) => response,
            Err(e) => return Err(log_failure("start", e.into())),
        };

        let start = self.settings.start_override.unwrap_or(response.start);
        let end = self
            .settings
            .end_override
            .or(response.end)
            .or(self.settings.fallback_end)
            .ok_or_else(|| {
                log_failure(
                    "start",
                    NavigationError::MalformedResponse("no goal in start response".to_string()),
                )
            })?;

        // Server neighbours only apply when they leave from the node it chose
        let initial_neighbors = if start == response.start && !response.neighbours.is_empty() {
            Some(validate_neighbors(start, response.neighbours).map_err(|e| log_failure("start", e))?)
        } else {
            None
        };

        if self.state == NavigationState::RoundComplete {
            self.presenter.clear_round();
        }

        let round = RoundState::new(start, end);
        tracing::info!("Round {} started at {}, goal {}", round.id, start, end);
        self.round = Some(round);
        self.catalog.reset();
        self.presenter.update_progress(0.0);

        for quest in &self.settings.initial_quests {
            self.quests.add(quest.clone());
        }
        self.presenter.render_quests(self.quests.quests());

        self.presenter.place_player(start);
        self.presenter.follow_camera(start);
        self.last_bearing = geo::bearing_degrees(start, end);
        self.presenter.point_indicator(self.last_bearing);

        reveal_near(
            &mut self.catalog,
            self.presenter.as_mut(),
            start,
            self.settings.visibility_radius_m,
        );
        show_target(self.presenter.as_mut(), &self.settings, start, end);

        self.state = NavigationState::AwaitingNeighbors;
        match initial_neighbors {
            Some(neighbors) => self.show_neighbors(neighbors),
            None => self.fetch_neighbors(start).await?,
        }
        Ok(self.state)
    }

    /// Retry the neighbor request for the current position.
    pub async fn request_neighbors(&mut self) -> Result<NavigationState, NavigationError> {
        if self.state != NavigationState::AwaitingNeighbors {
            return Err(self.invalid("request neighbours"));
        }
        let current = self
            .current_position()
            .ok_or(NavigationError::NoActiveRound)?;
        self.fetch_neighbors(current).await?;
        Ok(self.state)
    }

    /// Walk the edge ending at `endpoint`.
    ///
    /// Resolves once the animation is over and the next neighbor set is
    /// shown, or the round is complete.
    pub async fn select_neighbor(
        &mut self,
        endpoint: Coordinate,
    ) -> Result<NavigationState, NavigationError> {
        if self.state != NavigationState::NeighborsShown {
            return Err(self.invalid("select a neighbour"));
        }
        let round = self.round.as_mut().ok_or(NavigationError::NoActiveRound)?;
        let edge = route::find_edge(&round.neighbors, endpoint)
            .cloned()
            .ok_or(NavigationError::UnknownNeighbor(endpoint))?;

        round.detailed_path.extend_from(&edge.subpath);
        round.neighbors.clear();
        round.moves += 1;
        let end = round.end;
        let move_number = round.moves;

        self.presenter.clear_neighbors();
        self.state = NavigationState::Traveling;
        tracing::debug!(
            "Move {}: walking {} points to {}",
            move_number,
            edge.subpath.len(),
            edge.endpoint
        );

        let animation = PathAnimation::new(edge.subpath.clone(), self.settings.movement_slowness)
            .with_checkpoint_interval(self.settings.checkpoint_interval);
        let started = self.clock.now();
        let mut animator = PathAnimator::new(self.clock.as_mut(), animation);

        while let Some(event) = animator.next_event().await {
            match event {
                AnimationEvent::Step { position, .. } => {
                    self.presenter.move_player(position);
                    self.presenter.follow_camera(position);
                    self.last_bearing = geo::bearing_degrees(position, end);
                    self.presenter.point_indicator(self.last_bearing);
                }
                AnimationEvent::Checkpoint { index, position } => {
                    tracing::debug!("Checkpoint at node {} ({})", index, position);
                    reveal_near(
                        &mut self.catalog,
                        self.presenter.as_mut(),
                        position,
                        self.settings.visibility_radius_m,
                    );
                    show_target(self.presenter.as_mut(), &self.settings, position, end);
                }
                AnimationEvent::Finished => {}
            }
        }
        drop(animator);
        let walked = self.clock.now().saturating_sub(started);

        let round = self.round.as_mut().ok_or(NavigationError::NoActiveRound)?;
        round.current_position = edge.endpoint;
        round.walked_for += walked;
        tracing::info!("Moved to {}", edge.endpoint);

        if edge
            .endpoint
            .matches(&round.end, self.settings.arrival_tolerance_m)
        {
            self.finish_round();
            return Ok(self.state);
        }

        self.state = NavigationState::AwaitingNeighbors;
        self.fetch_neighbors(edge.endpoint).await?;
        Ok(self.state)
    }

    /// Open the detail modal of the first marker at `coords`.
    ///
    /// See [`NavigationEngine::open_marker_at`] for records sharing a
    /// coordinate.
    pub fn open_marker(&mut self, coords: Coordinate) -> Result<MarkerRecord, NavigationError> {
        let index = self
            .catalog
            .position(coords)
            .ok_or(NavigationError::UnknownMarker(coords))?;
        self.open_marker_at(index)
    }

    /// Open the detail modal of catalog entry `index` and apply its quest
    /// hooks: the ending quest is completed first, then the new one added.
    pub fn open_marker_at(&mut self, index: usize) -> Result<MarkerRecord, NavigationError> {
        let marker = self
            .catalog
            .get_at(index)
            .cloned()
            .ok_or(NavigationError::UnknownMarkerIndex(index))?;

        self.presenter.open_modal(&marker);

        if let Some(quest) = &marker.quest.end {
            self.apply_completion(quest, marker.quest.relocation);
        }
        if let Some(quest) = &marker.quest.start {
            self.quests.add(quest.clone());
        }
        if !marker.quest.is_empty() {
            self.presenter.render_quests(self.quests.quests());
        }
        Ok(marker)
    }

    /// Add a quest to the log. Returns `false` if it was already active.
    pub fn add_quest(&mut self, quest: impl Into<String>) -> bool {
        let added = self.quests.add(quest);
        self.presenter.render_quests(self.quests.quests());
        added
    }

    /// Complete an active quest, moving the goal to `relocation` if given.
    ///
    /// Does nothing when the quest is not active.
    pub fn complete_quest(
        &mut self,
        quest: &str,
        relocation: Option<Coordinate>,
    ) -> Option<QuestCompletion> {
        let completion = self.apply_completion(quest, relocation);
        if completion.is_some() {
            self.presenter.render_quests(self.quests.quests());
        }
        completion
    }

    /// Tear everything round-scoped down and return to `Idle`.
    pub fn reset(&mut self) {
        self.presenter.clear_round();
        if let Some(round) = self.round.take() {
            tracing::info!("Round {} reset after {} moves", round.id, round.moves);
        }
        self.state = NavigationState::Idle;
    }

    /// Reset, then start a new round.
    pub async fn next_round(&mut self) -> Result<NavigationState, NavigationError> {
        self.reset();
        self.start_round().await
    }

    fn apply_completion(
        &mut self,
        quest: &str,
        relocation: Option<Coordinate>,
    ) -> Option<QuestCompletion> {
        let completion = self.quests.complete(quest, relocation)?;

        if let Some(target) = completion.relocation {
            match self.round.as_mut() {
                Some(round) => {
                    round.end = target;
                    tracing::info!(
                        "New end: {} ({})",
                        target,
                        hud::format_goal(round.current_position, target)
                    );
                    // Indicators are gone once the round is over.
                    if self.state.in_round() {
                        self.last_bearing = geo::bearing_degrees(round.current_position, target);
                        self.presenter.point_indicator(self.last_bearing);
                        show_target(
                            self.presenter.as_mut(),
                            &self.settings,
                            round.current_position,
                            target,
                        );
                    }
                }
                None => tracing::debug!("No active round, relocation to {} dropped", target),
            }
        }
        Some(completion)
    }

    async fn fetch_neighbors(&mut self, current: Coordinate) -> Result<(), NavigationError> {
        let response = self
            .provider
            .fetch_neighbors(current)
            .await
            .map_err(|e| log_failure("neighbours", e.into()))?;
        let neighbors = validate_neighbors(current, response.neighbours)
            .map_err(|e| log_failure("neighbours", e))?;
        self.show_neighbors(neighbors);
        Ok(())
    }

    fn show_neighbors(&mut self, neighbors: NeighborSet) {
        if neighbors.is_empty() {
            tracing::warn!("Dead end: no neighbours offered");
        }
        self.presenter.show_neighbors(&neighbors);
        if let Some(round) = self.round.as_mut() {
            round.neighbors = neighbors;
        }
        self.state = NavigationState::NeighborsShown;
    }

    fn finish_round(&mut self) {
        let Some(round) = self.round.as_ref() else {
            return;
        };

        let bounds = Bounds::from_points(
            [round.start, round.end]
                .into_iter()
                .chain(round.detailed_path.points().iter().copied()),
        );
        self.presenter
            .show_trace(round.detailed_path.points(), bounds);
        self.presenter.clear_neighbors();
        self.presenter.remove_player();
        self.presenter.show_target_indicator(None);
        self.state = NavigationState::RoundComplete;

        tracing::info!(
            "Round {} (started {}) complete: {} moves, {:.0} m walked",
            round.id,
            round.started_at.format("%H:%M:%S"),
            round.moves,
            round.detailed_path.length_meters()
        );
    }

    fn invalid(&self, action: &'static str) -> NavigationError {
        NavigationError::InvalidTransition {
            state: self.state,
            action,
        }
    }
}

/// Reveal markers near `position` and update the progress bar.
fn reveal_near(
    catalog: &mut MarkerCatalog,
    presenter: &mut dyn RoundPresenter,
    position: Coordinate,
    radius_meters: f64,
) {
    let revealed = catalog.check_proximity_with(position, radius_meters, |record| {
        presenter.reveal_marker(record)
    });
    if revealed > 0 {
        presenter.update_progress(catalog.progress_percent());
    }
}

/// Show the goal marker on the screen edge, or hide it when in view.
fn show_target(
    presenter: &mut dyn RoundPresenter,
    settings: &EngineSettings,
    center: Coordinate,
    target: Coordinate,
) {
    let viewport = Viewport::new(center, settings.viewport_size, settings.zoom);
    if viewport.contains(target) {
        presenter.show_target_indicator(None);
    } else {
        presenter.show_target_indicator(Some(viewport.edge_indicator(target, settings.edge_padding)));
    }
}

/// Reject unusable neighbor sets; warn about edges that do not line up.
fn validate_neighbors(
    origin: Coordinate,
    neighbors: NeighborSet,
) -> Result<NeighborSet, NavigationError> {
    for edge in &neighbors {
        for issue in edge.issues(origin) {
            match issue {
                EdgeIssue::EmptySubpath => {
                    return Err(NavigationError::MalformedResponse(format!(
                        "empty sub-path to {}",
                        edge.endpoint
                    )));
                }
                EdgeIssue::DetachedStart => {
                    tracing::warn!("Sub-path to {} does not start at {}", edge.endpoint, origin)
                }
                EdgeIssue::DetachedEnd => {
                    tracing::warn!("Sub-path to {} does not end at its endpoint", edge.endpoint)
                }
            }
        }
    }
    Ok(neighbors)
}

fn log_failure(request: &str, err: NavigationError) -> NavigationError {
    tracing::warn!("{} request failed: {}", request, err);
    err
}
