use crate::units::{Ratio, Time, Timestamp};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct SimulationInfo {
    /// Simulated wall clock the objects are propagated to
    pub timestamp: Timestamp,
    pub start: Timestamp,
    pub frame_iteration: u64,
    /// Simulated time elapsed since `start`
    pub relative_time: Time,
    /// Simulated seconds per real second
    pub time_scale: Ratio,
    pub real_time_start: Instant,
    pub real_time: Duration,
}

impl Default for SimulationInfo {
    fn default() -> Self {
        Self::new(Timestamp::now(), Ratio::from_f64(1.0))
    }
}

impl SimulationInfo {
    pub fn new(start: Timestamp, time_scale: Ratio) -> Self {
        SimulationInfo {
            timestamp: start,
            start,
            frame_iteration: 0,
            relative_time: Time::from_secs(0.0),
            time_scale,
            real_time_start: Instant::now(),
            real_time: Duration::ZERO,
        }
    }

    /// Advances the simulated clock by `dt` of real time, scaled
    pub fn frame_step(&mut self, dt: Time) {
        self.frame_iteration += 1;
        self.relative_time += dt * self.time_scale;
        self.timestamp = self.start + self.relative_time;
        self.real_time = Instant::now().duration_since(self.real_time_start);
    }
}
