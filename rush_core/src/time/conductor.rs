use std::sync::atomic::Ordering;
use std::sync::Arc;

use atomic_float::AtomicF64;
use rush_schema::Milliseconds;

/// Playback clock interpolated between reads of a shared time source.
///
/// The rate is signed: a negative rate runs the clock backwards, which is how
/// replay scrubbing reaches the session.
pub struct Conductor {
    time_source: Arc<AtomicF64>,
    last_source_time: Milliseconds,
    last_update_time: Milliseconds,
    rate: f64,
}

impl Conductor {
    pub fn new(time_source: Arc<AtomicF64>) -> Self {
        Self {
            time_source,
            last_source_time: 0.0,
            last_update_time: 0.0,
            rate: 1.0,
        }
    }

    pub fn update(&mut self, current_system_time: Milliseconds) {
        self.last_source_time = self.time_source.load(Ordering::Acquire);
        self.last_update_time = current_system_time;
    }

    pub fn get_time(&self, current_system_time: Milliseconds) -> Milliseconds {
        let elapsed = current_system_time - self.last_update_time;
        self.last_source_time + elapsed * self.rate
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn set_rate(&mut self, rate: f64) {
        self.rate = rate;
    }

    /// Jumps the source to `time`; takes effect from `current_system_time`.
    pub fn seek(&mut self, time: Milliseconds, current_system_time: Milliseconds) {
        self.time_source.store(time, Ordering::Release);
        self.update(current_system_time);
    }
}
