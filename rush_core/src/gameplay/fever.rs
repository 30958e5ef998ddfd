//! The fever meter.
//!
//! Progress fills from scored judgements while idle. Once full, the player may
//! activate a fever period: progress is pinned to 1 at its start and drains
//! linearly to 0 by its end. Inside a period progress is a pure function of the
//! clock, so querying any instant needs no replay of the schedule.

use log::debug;
use rush_schema::{FeverConfig, Milliseconds};

use crate::gameplay::judgement::{JudgementKind, JudgementResult};
use crate::gameplay::processor::{JudgementProcessor, ResultHandler};

/// Accumulated progress this close to full counts as full.
const FULL_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeverPhase {
    Idle,
    Ready,
    Active,
}

/// A fever period covering `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeverPeriod {
    pub start: Milliseconds,
    pub end: Milliseconds,
    /// Accumulated progress when the period was entered.
    pub progress_before: f64,
    /// Journal length of the owning processor when the period was entered.
    pub judged_before: usize,
}

impl FeverPeriod {
    pub fn contains(&self, time: Milliseconds) -> bool {
        self.start <= time && time < self.end
    }
}

#[derive(Debug, Clone)]
pub struct FeverMeter {
    duration: Milliseconds,
    hits_to_fill: u32,
    accumulated: f64,
    periods: Vec<FeverPeriod>,
}

impl FeverMeter {
    pub fn new(config: &FeverConfig) -> Self {
        Self {
            duration: config.duration_ms,
            hits_to_fill: config.perfect_hits_to_fill.max(1),
            accumulated: 0.0,
            periods: Vec::new(),
        }
    }

    pub fn progress_at(&self, now: Milliseconds) -> f64 {
        match self.active_period(now) {
            Some(period) => {
                let elapsed = (now - period.start) / (period.end - period.start);
                (1.0 - elapsed).clamp(0.0, 1.0)
            }
            None => self.accumulated,
        }
    }

    pub fn is_active_at(&self, now: Milliseconds) -> bool {
        self.active_period(now).is_some()
    }

    pub fn phase_at(&self, now: Milliseconds) -> FeverPhase {
        if self.is_active_at(now) {
            FeverPhase::Active
        } else if self.accumulated >= 1.0 {
            FeverPhase::Ready
        } else {
            FeverPhase::Idle
        }
    }

    pub fn periods(&self) -> &[FeverPeriod] {
        &self.periods
    }

    fn active_period(&self, now: Milliseconds) -> Option<&FeverPeriod> {
        self.periods.last().filter(|p| p.contains(now))
    }

    fn increase_for(&self, result: &JudgementResult) -> f64 {
        if result.kind != JudgementKind::Normal {
            return 0.0;
        }

        let max = result.kind.max_numeric_result() as f64;
        result.numeric_result() as f64 / max / self.hits_to_fill as f64
    }

    fn try_activate(&mut self, now: Milliseconds, judged_before: usize) -> Option<FeverPeriod> {
        if self.is_active_at(now) || self.accumulated < 1.0 {
            return None;
        }

        debug_assert!(
            self.periods.last().map_or(true, |p| now >= p.end),
            "fever activated before the previous period ended"
        );

        let period = FeverPeriod {
            start: now,
            end: now + self.duration,
            progress_before: self.accumulated,
            judged_before,
        };
        self.periods.push(period);
        self.accumulated = 0.0;

        debug!("fever activated for [{}, {})", period.start, period.end);
        Some(period)
    }
}

impl ResultHandler for FeverMeter {
    fn apply_result(&mut self, result: &mut JudgementResult) {
        result.snapshot.fever_progress = self.accumulated;

        if self.is_active_at(result.time) {
            return;
        }

        let mut progress = (self.accumulated + self.increase_for(result)).clamp(0.0, 1.0);
        if progress > 1.0 - FULL_EPSILON {
            progress = 1.0;
        }
        self.accumulated = progress;
    }

    fn revert_result(&mut self, result: &JudgementResult) {
        self.accumulated = result.snapshot.fever_progress;
    }
}

impl JudgementProcessor<FeverMeter> {
    /// Enters fever at `now` if the meter is full and no period is running.
    pub fn try_activate_fever(&mut self, now: Milliseconds) -> Option<FeverPeriod> {
        let judged_before = self.judged_count();
        self.handler_mut().try_activate(now, judged_before)
    }

    /// Removes the latest period if it starts after `time` and nothing applied
    /// after it is still standing. Progress goes back to its pre-period value.
    pub fn discard_period_after(&mut self, time: Milliseconds) -> Option<FeverPeriod> {
        let judged = self.judged_count();
        let meter = self.handler_mut();

        let last = *meter.periods.last()?;
        if last.start <= time || last.judged_before != judged {
            return None;
        }

        meter.periods.pop();
        meter.accumulated = last.progress_before;
        debug!("fever period starting at {} discarded", last.start);
        Some(last)
    }

    pub fn progress_at(&self, now: Milliseconds) -> f64 {
        self.handler().progress_at(now)
    }

    pub fn is_active_at(&self, now: Milliseconds) -> bool {
        self.handler().is_active_at(now)
    }
}
