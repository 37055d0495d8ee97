//! Unit tests for path animation timing

use std::time::Duration;

use poemwalk::world::animator::{
    animate_along, AnimationEvent, FixedStepClock, FrameClock, PathAnimation, PathAnimator,
};
use poemwalk::world::geo::Coordinate;

const METER_LAT: f64 = 1.0 / 111_195.0;

fn path(meters: &[f64]) -> Vec<Coordinate> {
    meters
        .iter()
        .map(|m| Coordinate::new(52.0 + m * METER_LAT, 4.5))
        .collect()
}

#[tokio::test]
async fn test_walk_takes_distance_times_slowness() {
    // 10 m at 10 ms/m on 10 ms frames
    let mut clock = FixedStepClock::new(Duration::from_millis(10));
    let summary = animate_along(&mut clock, &path(&[0.0, 10.0]), 10.0, 5, |_, _| {}, |_, _| {}).await;

    assert!(summary.elapsed >= Duration::from_millis(100));
    assert!(summary.elapsed <= Duration::from_millis(120));
    assert!((10..=12).contains(&summary.frames), "frames {}", summary.frames);
}

#[tokio::test]
async fn test_positions_move_monotonically_north() {
    let mut clock = FixedStepClock::from_fps(60);
    let mut lats = Vec::new();
    animate_along(
        &mut clock,
        &path(&[0.0, 5.0, 12.0, 30.0]),
        10.0,
        5,
        |p, _| lats.push(p.lat),
        |_, _| {},
    )
    .await;

    assert!(lats.windows(2).all(|w| w[1] >= w[0]));
    assert_eq!(lats.last().copied(), Some(52.0 + 30.0 * METER_LAT));
}

#[tokio::test]
async fn test_zero_length_segments_finish_in_one_frame() {
    let p = Coordinate::new(52.0, 4.5);
    let mut clock = FixedStepClock::from_fps(60);
    let mut checkpoints = Vec::new();
    let summary = animate_along(&mut clock, &[p, p, p], 10.0, 1, |_, _| {}, |i, _| checkpoints.push(i)).await;

    assert_eq!(summary.frames, 2);
    assert_eq!(checkpoints, vec![0, 1, 2]);
}

#[tokio::test]
async fn test_checkpoint_uses_node_position() {
    let nodes = path(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    let mut clock = FixedStepClock::from_fps(30);
    let animation = PathAnimation::new(nodes.clone(), 10.0);
    let mut animator = PathAnimator::new(&mut clock, animation);

    let mut checkpoints = Vec::new();
    let mut finished = 0;
    while let Some(event) = animator.next_event().await {
        match event {
            AnimationEvent::Checkpoint { index, position } => checkpoints.push((index, position)),
            AnimationEvent::Finished => finished += 1,
            AnimationEvent::Step { .. } => {}
        }
    }

    assert_eq!(finished, 1);
    assert_eq!(checkpoints, vec![(0, nodes[0]), (5, nodes[5]), (6, nodes[6])]);
}

#[tokio::test]
async fn test_empty_path_uses_no_frames() {
    let mut clock = FixedStepClock::from_fps(60);
    let summary = animate_along(&mut clock, &[], 10.0, 5, |_, _| {}, |_, _| {}).await;
    assert_eq!(summary.frames, 0);
    assert_eq!(summary.checkpoints, 0);
    assert_eq!(clock.now(), Duration::ZERO);
}
