use std::collections::HashSet;

use crate::gameplay::hit_window::HitResult;
use crate::gameplay::judgement::{JudgementKind, JudgementResult, ResultKey};

/// The per-processor half of apply/revert. The journal bookkeeping lives in
/// [`JudgementProcessor`], so handlers only touch their own aggregate.
pub trait ResultHandler {
    fn apply_result(&mut self, result: &mut JudgementResult);

    /// Must restore exactly what `apply_result` changed, from the snapshot in `result`.
    fn revert_result(&mut self, result: &JudgementResult);
}

/// Sequences results into a handler and enforces that reverts mirror applies.
#[derive(Debug, Default)]
pub struct JudgementProcessor<H> {
    handler: H,
    journal: Vec<ResultKey>,
    applied: HashSet<ResultKey>,
}

impl<H: ResultHandler> JudgementProcessor<H> {
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            journal: Vec::new(),
            applied: HashSet::new(),
        }
    }

    pub fn apply(&mut self, result: &mut JudgementResult) {
        assert!(
            self.applied.insert(result.key),
            "result {:?} applied twice",
            result.key
        );
        self.journal.push(result.key);
        self.handler.apply_result(result);
    }

    /// Panics unless `result` is the most recently applied one.
    pub fn revert(&mut self, result: &JudgementResult) {
        match self.journal.last() {
            Some(last) if *last == result.key => {}
            last => panic!(
                "out-of-order revert: expected {:?}, got {:?}",
                last, result.key
            ),
        }
        self.journal.pop();
        self.applied.remove(&result.key);
        self.handler.revert_result(result);
    }

    pub fn judged_count(&self) -> usize {
        self.journal.len()
    }

    pub fn last_applied(&self) -> Option<&ResultKey> {
        self.journal.last()
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub(crate) fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }
}

/// Running counts per tier plus combo.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JudgementTally {
    counts: [u32; 6],
    combo: u32,
    max_combo: u32,
}

impl JudgementTally {
    pub fn count(&self, result: HitResult) -> u32 {
        self.counts[result.index()]
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn max_combo(&self) -> u32 {
        self.max_combo
    }

    /// Scored judgements only; ignore-kind results are not counted.
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }
}

impl ResultHandler for JudgementTally {
    fn apply_result(&mut self, result: &mut JudgementResult) {
        result.snapshot.combo = self.combo;
        result.snapshot.max_combo = self.max_combo;

        if result.kind == JudgementKind::Ignore {
            return;
        }

        self.counts[result.result.index()] += 1;
        if result.is_hit() {
            self.combo += 1;
            self.max_combo = self.max_combo.max(self.combo);
        } else {
            self.combo = 0;
        }
    }

    fn revert_result(&mut self, result: &JudgementResult) {
        self.combo = result.snapshot.combo;
        self.max_combo = result.snapshot.max_combo;

        if result.kind == JudgementKind::Ignore {
            return;
        }

        self.counts[result.result.index()] -= 1;
    }
}
