//! Frame pacing and FPS averaging
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Number of frame times averaged for the FPS readout
const FPS_WINDOW: usize = 60;

pub struct FrameClock {
    target_frame_time: Duration,
    last_tick: Instant,
    delta: f32,
    samples: VecDeque<f32>,
}

impl FrameClock {
    pub fn new(target_fps: u32) -> Self {
        Self::starting_at(target_fps, Instant::now())
    }

    fn starting_at(target_fps: u32, now: Instant) -> Self {
        Self {
            target_frame_time: Duration::from_secs_f64(1.0 / f64::from(target_fps.max(1))),
            last_tick: now,
            delta: 0.0,
            samples: VecDeque::with_capacity(FPS_WINDOW),
        }
    }

    /// Start a new frame; returns seconds since the previous tick.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> f32 {
        self.delta = now.saturating_duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;

        if self.samples.len() == FPS_WINDOW {
            self.samples.pop_front();
        }
        self.samples.push_back(self.delta);
        self.delta
    }

    pub fn delta_time(&self) -> f32 {
        self.delta
    }

    pub fn target_frame_time(&self) -> Duration {
        self.target_frame_time
    }

    /// Sleep away whatever is left of this frame's budget.
    pub fn wait(&self) {
        let elapsed = self.last_tick.elapsed();
        if elapsed < self.target_frame_time {
            std::thread::sleep(self.target_frame_time - elapsed);
        }
    }

    pub fn average_fps(&self) -> f32 {
        let total: f32 = self.samples.iter().sum();
        if total <= 0.0 {
            return 0.0;
        }
        self.samples.len() as f32 / total
    }

    pub fn fps_label(&self) -> String {
        format!("FPS: {:.1}", self.average_fps())
    }
}
