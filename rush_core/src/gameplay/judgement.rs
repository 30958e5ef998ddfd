use rush_schema::Milliseconds;

use crate::chart::{Lane, ObjectId};
use crate::gameplay::hit_window::HitResult;

/// How a judgement feeds the processors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JudgementKind {
    Normal,
    /// Carries a tier for presentation but contributes nothing to any aggregate.
    Ignore,
    /// Scored like `Normal`, but never fills the fever meter.
    Fever,
}

impl JudgementKind {
    pub fn numeric_result(self, result: HitResult) -> u32 {
        match self {
            JudgementKind::Normal | JudgementKind::Fever => result.numeric_value(),
            JudgementKind::Ignore => 0,
        }
    }

    pub fn max_numeric_result(self) -> u32 {
        HitResult::MAX.numeric_value()
    }
}

/// Which judgeable part of an object a result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Part {
    Main,
    Tick(u32),
    Lane(Lane),
    Head,
    Tail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResultKey {
    pub object: ObjectId,
    pub part: Part,
}

/// Aggregate state captured when a result is applied, restored verbatim on revert.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeterSnapshot {
    pub fever_progress: f64,
    pub combo: u32,
    pub max_combo: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JudgementResult {
    pub key: ResultKey,
    pub kind: JudgementKind,
    pub result: HitResult,
    /// Clock time at which the result was applied.
    pub time: Milliseconds,
    pub snapshot: MeterSnapshot,
}

impl JudgementResult {
    pub fn new(key: ResultKey, kind: JudgementKind, result: HitResult, time: Milliseconds) -> Self {
        Self {
            key,
            kind,
            result,
            time,
            snapshot: MeterSnapshot::default(),
        }
    }

    pub fn is_hit(&self) -> bool {
        self.result.is_hit()
    }

    pub fn numeric_result(&self) -> u32 {
        self.kind.numeric_result(self.result)
    }
}
