//! Player movement along a sub-path.
//!
//! The animation is a pull-style generator: [`PathAnimator::next_event`]
//! awaits the next frame from a [`FrameClock`] and yields step and
//! checkpoint events until the terminal node, after which it stops asking
//! for frames.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;

use super::geo::{self, Coordinate};

/// Default movement slowness in milliseconds per meter walked.
pub const DEFAULT_MOVEMENT_SLOWNESS: f64 = 10.0;

/// Default node stride between proximity checkpoints.
pub const DEFAULT_CHECKPOINT_INTERVAL: usize = 5;

/// Default animation frame rate.
pub const DEFAULT_FPS: u32 = 60;

/// Source of animation frame timestamps.
#[async_trait]
pub trait FrameClock: Send {
    /// Time elapsed since the clock started.
    fn now(&self) -> Duration;

    /// Wait for the next animation frame and return its timestamp.
    async fn next_frame(&mut self) -> Duration;
}

/// Real-time frames driven by a tokio interval.
pub struct IntervalClock {
    period: Duration,
    origin: tokio::time::Instant,
    interval: Option<tokio::time::Interval>,
}

impl IntervalClock {
    /// Create a clock ticking `fps` times per second.
    pub fn new(fps: u32) -> Self {
        Self {
            period: Duration::from_secs_f64(1.0 / f64::from(fps.max(1))),
            origin: tokio::time::Instant::now(),
            interval: None,
        }
    }
}

impl Default for IntervalClock {
    fn default() -> Self {
        Self::new(DEFAULT_FPS)
    }
}

#[async_trait]
impl FrameClock for IntervalClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    async fn next_frame(&mut self) -> Duration {
        // Created lazily so the clock can be built outside a runtime
        let period = self.period;
        let interval = self.interval.get_or_insert_with(|| {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            interval
        });
        interval.tick().await;
        self.origin.elapsed()
    }
}

/// Simulated frames: every call advances time by a fixed step without sleeping.
#[derive(Debug, Clone)]
pub struct FixedStepClock {
    step: Duration,
    now: Duration,
}

impl FixedStepClock {
    pub fn new(step: Duration) -> Self {
        Self {
            step,
            now: Duration::ZERO,
        }
    }

    /// A clock stepping at `fps` frames per second.
    pub fn from_fps(fps: u32) -> Self {
        Self::new(Duration::from_secs_f64(1.0 / f64::from(fps.max(1))))
    }
}

#[async_trait]
impl FrameClock for FixedStepClock {
    fn now(&self) -> Duration {
        self.now
    }

    async fn next_frame(&mut self) -> Duration {
        tokio::task::yield_now().await;
        self.now += self.step;
        self.now
    }
}

/// Something that happened during an animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationEvent {
    /// A rendered frame at the interpolated position, on segment `index`
    Step { position: Coordinate, index: usize },
    /// Time to re-check proximity at node `index`
    Checkpoint { index: usize, position: Coordinate },
    /// The last node was reached
    Finished,
}

/// Frame-by-frame state of one walk along a path.
///
/// Each segment `[path[i], path[i + 1]]` takes `distance * speed_factor`
/// milliseconds, so the walker moves at constant speed whatever the
/// segment lengths.
#[derive(Debug, Clone)]
pub struct PathAnimation {
    path: Vec<Coordinate>,
    speed_factor: f64,
    checkpoint_interval: usize,
    /// Start node of the current segment
    index: usize,
    segment_start: Duration,
    segment_duration: Duration,
    pending: VecDeque<AnimationEvent>,
    started: bool,
    finished: bool,
}

impl PathAnimation {
    /// Create an animation over `path` at `speed_factor` ms per meter.
    pub fn new(path: Vec<Coordinate>, speed_factor: f64) -> Self {
        Self {
            path,
            speed_factor: if speed_factor.is_finite() {
                speed_factor.max(0.0)
            } else {
                0.0
            },
            checkpoint_interval: DEFAULT_CHECKPOINT_INTERVAL,
            index: 0,
            segment_start: Duration::ZERO,
            segment_duration: Duration::ZERO,
            pending: VecDeque::new(),
            started: false,
            finished: false,
        }
    }

    /// Override the node stride between checkpoints (minimum 1).
    pub fn with_checkpoint_interval(mut self, interval: usize) -> Self {
        self.checkpoint_interval = interval.max(1);
        self
    }

    /// Time to walk segment `index`.
    pub fn segment_duration(&self, index: usize) -> Duration {
        match (self.path.get(index), self.path.get(index + 1)) {
            (Some(from), Some(to)) => {
                let millis = geo::distance(*from, *to) * self.speed_factor;
                Duration::try_from_secs_f64(millis / 1000.0).unwrap_or(Duration::MAX)
            }
            _ => Duration::ZERO,
        }
    }

    /// Time to walk the whole path.
    pub fn total_duration(&self) -> Duration {
        (0..self.path.len().saturating_sub(1))
            .map(|i| self.segment_duration(i))
            .fold(Duration::ZERO, Duration::saturating_add)
    }

    pub fn path(&self) -> &[Coordinate] {
        &self.path
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// True once the terminal event has been queued.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Start at node 0 at time `now`.
    pub fn begin(&mut self, now: Duration) {
        if self.started {
            return;
        }
        self.started = true;
        self.enter_node(0, now);
    }

    /// Process one frame at time `now`.
    pub fn advance(&mut self, now: Duration) {
        if !self.started || self.finished {
            return;
        }

        let from = self.path[self.index];
        let to = self.path[self.index + 1];

        let elapsed = now.saturating_sub(self.segment_start);
        let t = if self.segment_duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f64() / self.segment_duration.as_secs_f64()).min(1.0)
        };

        self.pending.push_back(AnimationEvent::Step {
            position: from.lerp(to, t),
            index: self.index,
        });

        if t >= 1.0 {
            self.enter_node(self.index + 1, now);
        }
    }

    /// Take the oldest queued event.
    pub fn pop_event(&mut self) -> Option<AnimationEvent> {
        self.pending.pop_front()
    }

    fn enter_node(&mut self, index: usize, now: Duration) {
        let Some(last) = self.path.len().checked_sub(1) else {
            self.finish();
            return;
        };

        self.index = index;
        if index < last {
            if index % self.checkpoint_interval == 0 {
                self.pending.push_back(AnimationEvent::Checkpoint {
                    index,
                    position: self.path[index],
                });
            }
            self.segment_start = now;
            self.segment_duration = self.segment_duration(index);
        } else {
            self.pending.push_back(AnimationEvent::Checkpoint {
                index: last,
                position: self.path[last],
            });
            self.finish();
        }
    }

    fn finish(&mut self) {
        self.pending.push_back(AnimationEvent::Finished);
        self.finished = true;
    }
}

/// Drives a [`PathAnimation`] from a [`FrameClock`].
pub struct PathAnimator<'c> {
    clock: &'c mut dyn FrameClock,
    animation: PathAnimation,
}

impl<'c> PathAnimator<'c> {
    pub fn new(clock: &'c mut dyn FrameClock, animation: PathAnimation) -> Self {
        Self { clock, animation }
    }

    /// Next event, awaiting a frame when none is queued.
    ///
    /// Returns `None` after [`AnimationEvent::Finished`] has been yielded.
    pub async fn next_event(&mut self) -> Option<AnimationEvent> {
        loop {
            if let Some(event) = self.animation.pop_event() {
                return Some(event);
            }
            if self.animation.is_finished() {
                return None;
            }
            if !self.animation.is_started() {
                let now = self.clock.now();
                self.animation.begin(now);
                continue;
            }
            let now = self.clock.next_frame().await;
            self.animation.advance(now);
        }
    }
}

/// Counters from a completed [`animate_along`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimationSummary {
    /// Frames rendered
    pub frames: usize,
    /// Checkpoints fired, including the final one
    pub checkpoints: usize,
    /// Clock time spent
    pub elapsed: Duration,
}

/// Walk `path`, calling `on_step` every frame and `on_checkpoint` at
/// checkpoint nodes. Resolves when the last node is reached.
pub async fn animate_along<S, C>(
    clock: &mut dyn FrameClock,
    path: &[Coordinate],
    speed_factor: f64,
    checkpoint_interval: usize,
    mut on_step: S,
    mut on_checkpoint: C,
) -> AnimationSummary
where
    S: FnMut(Coordinate, usize),
    C: FnMut(usize, Coordinate),
{
    let started_at = clock.now();
    let animation = PathAnimation::new(path.to_vec(), speed_factor)
        .with_checkpoint_interval(checkpoint_interval);

    let mut summary = AnimationSummary::default();
    let mut animator = PathAnimator::new(&mut *clock, animation);
    while let Some(event) = animator.next_event().await {
        match event {
            AnimationEvent::Step { position, index } => {
                summary.frames += 1;
                on_step(position, index);
            }
            AnimationEvent::Checkpoint { index, position } => {
                summary.checkpoints += 1;
                on_checkpoint(index, position);
            }
            AnimationEvent::Finished => {}
        }
    }
    drop(animator);

    summary.elapsed = clock.now().saturating_sub(started_at);
    summary
}
