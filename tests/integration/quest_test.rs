//! Integration tests for quest side effects on the round.

use super::mock_graph::{engine, line_nodes, MockGraph, RecordingPresenter};

use poemwalk::world::geo::{self, Coordinate};
use poemwalk::world::landmarks::{MarkerIcon, MarkerRecord, MarkerStyle};
use poemwalk::world::navigation::{NavigationError, NavigationState};

const ORIGIN: Coordinate = Coordinate::new(52.1600, 4.4900);

#[tokio::test]
async fn test_opening_quest_marker_relocates_goal() {
    let nodes = line_nodes(ORIGIN, 3, 50.0);
    let graph = MockGraph::line(&nodes);
    let presenter = RecordingPresenter::default();
    let mut engine = engine(&graph, &presenter);

    let target = Coordinate::new(1.0, 2.0);
    let landmark = MarkerRecord::new(Coordinate::new(52.1646, 4.4865), "Molen de Valk", MarkerIcon::Landmark)
        .with_style(MarkerStyle::Full)
        .ends_quest("Go to X", Some(target))
        .starts_quest("Visit the castle");
    engine.load_markers(vec![landmark.clone()]);

    engine.start_round().await.unwrap();
    assert!(engine.add_quest("Go to X"));

    let opened = engine.open_marker(landmark.coords).unwrap();
    assert_eq!(opened.title, "Molen de Valk");
    assert!(!engine.quests().contains("Go to X"));
    assert!(engine.quests().contains("Visit the castle"));
    assert_eq!(engine.end(), Some(target));

    // Position and trace are untouched by the relocation
    assert_eq!(engine.current_position(), Some(nodes[0]));
    assert!(engine.detailed_path().unwrap().is_empty());

    let expected = geo::bearing_degrees(nodes[0], target);
    assert!((engine.last_bearing() - expected).abs() < 1e-9);

    let recorded = presenter.recorded();
    assert_eq!(recorded.modals, vec!["Molen de Valk".to_string()]);
    assert_eq!(recorded.bearings.last().copied(), Some(expected));
    assert_eq!(
        recorded.quest_logs.last().cloned(),
        Some(vec!["Go to the windmill".to_string(), "Visit the castle".to_string()])
    );
}

#[tokio::test]
async fn test_inactive_quest_completion_is_noop() {
    let nodes = line_nodes(ORIGIN, 2, 50.0);
    let graph = MockGraph::line(&nodes);
    let presenter = RecordingPresenter::default();
    let mut engine = engine(&graph, &presenter);
    engine.start_round().await.unwrap();

    let before = engine.quests().clone();
    let renders = presenter.recorded().quest_logs.len();

    assert!(engine
        .complete_quest("Never added", Some(Coordinate::new(1.0, 2.0)))
        .is_none());
    assert_eq!(engine.quests(), &before);
    assert_eq!(engine.end(), Some(nodes[1]));
    assert_eq!(presenter.recorded().quest_logs.len(), renders);
}

#[tokio::test]
async fn test_initial_quest_added_once_per_game() {
    let nodes = line_nodes(ORIGIN, 2, 50.0);
    let graph = MockGraph::line(&nodes);
    let presenter = RecordingPresenter::default();
    let mut engine = engine(&graph, &presenter);

    engine.start_round().await.unwrap();
    assert!(!engine.add_quest("Go to the windmill"));
    engine.next_round().await.unwrap();
    assert_eq!(engine.quests().quests(), &["Go to the windmill".to_string()]);

    let completion = engine.complete_quest("Go to the windmill", None).unwrap();
    assert_eq!(completion.relocation, None);
    assert!(engine.quests().is_empty());
    assert_eq!(engine.end(), Some(nodes[1]));
}

#[tokio::test]
async fn test_relocation_without_round_is_dropped() {
    let graph = MockGraph::line(&line_nodes(ORIGIN, 2, 50.0));
    let presenter = RecordingPresenter::default();
    let mut engine = engine(&graph, &presenter);

    engine.add_quest("Go to X");
    let completion = engine.complete_quest("Go to X", Some(Coordinate::new(1.0, 2.0)));
    assert!(completion.is_some());
    assert_eq!(engine.end(), None);
}

#[tokio::test]
async fn test_open_unknown_marker() {
    let graph = MockGraph::line(&line_nodes(ORIGIN, 2, 50.0));
    let presenter = RecordingPresenter::default();
    let mut engine = engine(&graph, &presenter);

    let nowhere = Coordinate::new(0.5, 0.5);
    assert_eq!(
        engine.open_marker(nowhere),
        Err(NavigationError::UnknownMarker(nowhere))
    );
    assert!(presenter.recorded().modals.is_empty());
}

#[tokio::test]
async fn test_markers_sharing_coordinates_open_separately() {
    let nodes = line_nodes(ORIGIN, 2, 50.0);
    let graph = MockGraph::line(&nodes);
    let presenter = RecordingPresenter::default();
    let mut engine = engine(&graph, &presenter);

    engine.load_markers(vec![
        MarkerRecord::new(ORIGIN, "Cafe A", MarkerIcon::Food),
        MarkerRecord::new(ORIGIN, "Poem B", MarkerIcon::Poem).starts_quest("Find B"),
    ]);
    engine.start_round().await.unwrap();

    let indices = engine.catalog().revealed_indices().to_vec();
    assert_eq!(indices, vec![0, 1]);
    for index in indices {
        engine.open_marker_at(index).unwrap();
    }

    assert!(engine.quests().contains("Find B"));
    assert_eq!(
        presenter.recorded().modals,
        vec!["Cafe A".to_string(), "Poem B".to_string()]
    );
    assert_eq!(
        engine.open_marker_at(2),
        Err(NavigationError::UnknownMarkerIndex(2))
    );
}

#[tokio::test]
async fn test_relocation_after_arrival_keeps_indicators_hidden() {
    let nodes = line_nodes(ORIGIN, 2, 50.0);
    let graph = MockGraph::line(&nodes);
    let presenter = RecordingPresenter::default();
    let mut engine = engine(&graph, &presenter);

    engine.start_round().await.unwrap();
    engine.select_neighbor(nodes[1]).await.unwrap();
    assert_eq!(engine.state(), NavigationState::RoundComplete);

    let (bearings, indicators) = {
        let recorded = presenter.recorded();
        (recorded.bearings.len(), recorded.target_indicators.len())
    };
    assert_eq!(presenter.recorded().target_indicators.last(), Some(&None));

    let target = Coordinate::new(1.0, 2.0);
    engine.complete_quest("Go to the windmill", Some(target)).unwrap();
    assert_eq!(engine.end(), Some(target));

    let recorded = presenter.recorded();
    assert_eq!(recorded.bearings.len(), bearings);
    assert_eq!(recorded.target_indicators.len(), indicators);
}
