//! Integration tests for the headless walker.

use super::mock_graph::{east_of, engine, line_nodes, MockGraph, RecordingPresenter};

use poemwalk::ui::NullPresenter;
use poemwalk::world::animator::FixedStepClock;
use poemwalk::world::geo::Coordinate;
use poemwalk::world::landmarks::{MarkerIcon, MarkerRecord};
use poemwalk::world::navigation::{
    play_round, AutoplayOutcome, EngineSettings, NavigationEngine, NavigationState,
};

const ORIGIN: Coordinate = Coordinate::new(52.1600, 4.4900);

#[tokio::test]
async fn test_autoplay_reaches_goal_and_opens_markers() {
    let nodes = line_nodes(ORIGIN, 5, 40.0);
    let graph = MockGraph::line(&nodes);
    // A detour that leads away from the goal
    let detour = east_of(nodes[1], -60.0);
    graph.connect(nodes[1], detour);

    let presenter = RecordingPresenter::default();
    let mut engine = engine(&graph, &presenter);
    engine.load_markers(vec![MarkerRecord::new(east_of(nodes[3], 30.0), "Windmill", MarkerIcon::Landmark)
        .ends_quest("Go to the windmill", None)]);

    engine.start_round().await.unwrap();
    let (outcome, summary) = play_round(&mut engine, 50).await.unwrap();

    assert_eq!(outcome, AutoplayOutcome::Arrived);
    assert_eq!(engine.state(), NavigationState::RoundComplete);
    let summary = summary.unwrap();
    assert!(summary.completed);
    assert_eq!(summary.moves, 4);
    assert!((summary.distance_m - 160.0).abs() < 1.0, "got {}", summary.distance_m);
    assert_eq!(summary.revealed, 1);
    assert!(summary.walked_for > std::time::Duration::ZERO);

    assert!(!engine.quests().contains("Go to the windmill"));
    assert_eq!(presenter.recorded().modals, vec!["Windmill".to_string()]);
}

#[tokio::test]
async fn test_autoplay_respects_move_budget() {
    let nodes = line_nodes(ORIGIN, 5, 40.0);
    let graph = MockGraph::line(&nodes);
    let presenter = RecordingPresenter::default();
    let mut engine = engine(&graph, &presenter);

    engine.start_round().await.unwrap();
    let (outcome, summary) = play_round(&mut engine, 2).await.unwrap();
    assert_eq!(outcome, AutoplayOutcome::OutOfMoves);
    assert_eq!(summary.unwrap().moves, 2);
    assert_eq!(engine.state(), NavigationState::NeighborsShown);
}

#[tokio::test]
async fn test_autoplay_stops_at_dead_end() {
    let nodes = line_nodes(ORIGIN, 3, 40.0);
    let graph = MockGraph::new(nodes[0], Coordinate::new(53.0, 5.0));
    // One-way chain with no way back
    let mid = nodes[0].lerp(nodes[1], 0.5);
    graph.add_edge(
        nodes[0],
        poemwalk::world::route::NeighborEdge::new(nodes[1], vec![nodes[0], mid, nodes[1]]),
    );

    let presenter = RecordingPresenter::default();
    let mut engine = engine(&graph, &presenter);
    engine.start_round().await.unwrap();

    let (outcome, summary) = play_round(&mut engine, 10).await.unwrap();
    assert_eq!(outcome, AutoplayOutcome::DeadEnd);
    assert!(!summary.unwrap().completed);
}

#[tokio::test]
async fn test_autoplay_without_presenter() {
    let nodes = line_nodes(ORIGIN, 4, 30.0);
    let graph = MockGraph::line(&nodes);
    let mut engine = NavigationEngine::new(
        EngineSettings::default(),
        Box::new(graph.clone()),
        Box::new(NullPresenter),
        Box::new(FixedStepClock::from_fps(60)),
    );
    engine.load_markers(vec![MarkerRecord::new(nodes[2], "poem", MarkerIcon::Poem)]);

    engine.start_round().await.unwrap();
    let (outcome, summary) = play_round(&mut engine, 10).await.unwrap();
    assert_eq!(outcome, AutoplayOutcome::Arrived);

    let summary = summary.unwrap();
    assert_eq!(summary.moves, 3);
    assert_eq!(summary.revealed, 1);
    assert!(summary.completed);
    assert!(summary.started_at <= chrono::Utc::now());
}
