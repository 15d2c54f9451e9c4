/// Fixed-timestep frame clock
///
/// Frames arrive whenever the window redraws; the car is integrated in whole
/// steps of a constant length so handling does not depend on the display rate.
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Upper bound on simulation steps caught up in a single frame
const MAX_PHYSICS_STEPS: u32 = 5;

/// Frames averaged for the FPS readout
const FPS_WINDOW_SIZE: usize = 60;

pub struct GameLoop {
    step: Duration,
    /// Time not yet consumed by a step
    pending: Duration,
    last_frame: Instant,
    started: Instant,
    recent_frames: VecDeque<Duration>,
    frame_count: u64,
    update_count: u64,
}

impl GameLoop {
    /// Clock producing `updates_per_second` steps per second of wall time
    pub fn new(updates_per_second: u32) -> Self {
        let now = Instant::now();
        Self {
            step: Duration::from_secs_f64(1.0 / f64::from(updates_per_second.max(1))),
            pending: Duration::ZERO,
            last_frame: now,
            started: now,
            recent_frames: VecDeque::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            update_count: 0,
        }
    }

    /// Start a frame and return how many fixed steps to simulate
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now - self.last_frame;
        self.last_frame = now;
        self.advance(frame_time)
    }

    fn advance(&mut self, frame_time: Duration) -> u32 {
        self.frame_count += 1;
        if self.recent_frames.len() == FPS_WINDOW_SIZE {
            self.recent_frames.pop_front();
        }
        self.recent_frames.push_back(frame_time);

        self.pending += frame_time;
        let mut steps = 0;
        while self.pending >= self.step && steps < MAX_PHYSICS_STEPS {
            self.pending -= self.step;
            steps += 1;
        }

        // After a stall, drop the backlog instead of replaying it next frame
        if steps == MAX_PHYSICS_STEPS {
            self.pending = self.pending.min(self.step);
        }

        self.update_count += u64::from(steps);
        steps
    }

    /// Length of one step in seconds
    pub fn fixed_timestep(&self) -> f32 {
        self.step.as_secs_f32()
    }

    /// Frames per second averaged over the recent window
    pub fn fps(&self) -> f32 {
        let total: Duration = self.recent_frames.iter().sum();
        if total.is_zero() {
            return 0.0;
        }
        self.recent_frames.len() as f32 / total.as_secs_f32()
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Monotonic seconds since start, used to timestamp skidmarks
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn update_count(&self) -> u64 {
        self.update_count
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new(60)
    }
}
