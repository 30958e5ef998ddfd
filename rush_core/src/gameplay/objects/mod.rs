//! Live judgement state for each object, and the per-archetype rules that decide it.
//!
//! Rules never mutate: they look at the object and the clock and return the
//! results to apply. The session applies them and records them on the object,
//! which keeps revert a matter of clearing a slot.

mod dual_hit;
mod miniboss;
mod minion;
mod sawblade;
mod star_sheet;

use std::collections::BTreeMap;

use rush_schema::{Milliseconds, TailTimeout};

use crate::chart::{HitObject, HitObjectKind, Lane, ObjectId};
use crate::gameplay::hit_window::HitResult;
use crate::gameplay::judgement::{JudgementKind, Part};

pub use miniboss::miniboss_result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Press(Lane),
    Release(Lane),
}

impl Input {
    pub fn lane(self) -> Lane {
        match self {
            Input::Press(lane) | Input::Release(lane) => lane,
        }
    }
}

/// One result a rule wants applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Judged {
    pub part: Part,
    pub result: HitResult,
}

impl Judged {
    pub fn new(part: Part, result: HitResult) -> Self {
        Self { part, result }
    }
}

#[derive(Debug, Clone)]
pub struct LiveObject {
    pub object: HitObject,
    judged: BTreeMap<Part, HitResult>,
}

impl LiveObject {
    pub fn new(object: HitObject) -> Self {
        Self {
            object,
            judged: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> ObjectId {
        self.object.id
    }

    /// Whether `now` has reached the leading edge of the widest window.
    pub fn window_opened(&self, now: Milliseconds) -> bool {
        self.offset_from_start(now) >= -self.object.windows.widest_early()
    }

    pub fn result(&self, part: Part) -> Option<HitResult> {
        self.judged.get(&part).copied()
    }

    pub fn is_judged(&self, part: Part) -> bool {
        self.judged.contains_key(&part)
    }

    /// Whether the object has reached its terminal judgement.
    pub fn all_judged(&self) -> bool {
        match self.object.kind {
            HitObjectKind::StarSheet { .. } => self.is_judged(Part::Tail),
            _ => self.is_judged(Part::Main),
        }
    }

    /// The lane whose in-order consumption this object takes part in.
    pub fn policy_lane(&self) -> Option<Lane> {
        match self.object.kind {
            HitObjectKind::Minion { lane, .. } | HitObjectKind::StarSheet { lane, .. } => Some(lane),
            HitObjectKind::Sawblade { .. } | HitObjectKind::MiniBoss { .. } | HitObjectKind::DualHit => {
                None
            }
        }
    }

    pub fn accepts(&self, input: Input) -> bool {
        if self.all_judged() {
            return false;
        }

        match (&self.object.kind, input) {
            (HitObjectKind::Minion { lane, .. }, Input::Press(l)) => *lane == l,
            (HitObjectKind::Sawblade { .. }, _) => false,
            (HitObjectKind::MiniBoss { .. }, Input::Press(_)) => true,
            (HitObjectKind::DualHit, Input::Press(l)) => !self.is_judged(Part::Lane(l)),
            (HitObjectKind::StarSheet { lane, .. }, input) => *lane == input.lane(),
            (_, Input::Release(_)) => false,
        }
    }

    pub fn judgement_kind(&self, part: Part) -> JudgementKind {
        match (&self.object.kind, part) {
            (HitObjectKind::Minion { bonus: true, .. }, _) => JudgementKind::Fever,
            (HitObjectKind::MiniBoss { .. }, Part::Tick(_)) => JudgementKind::Ignore,
            (HitObjectKind::DualHit, Part::Lane(_)) => JudgementKind::Ignore,
            _ => JudgementKind::Normal,
        }
    }

    /// Hits landed over required hits, for minibosses.
    pub fn completion(&self) -> Option<f32> {
        match self.object.kind {
            HitObjectKind::MiniBoss { required_hits, .. } => {
                Some(miniboss::hit_count(self) as f32 / required_hits as f32)
            }
            _ => None,
        }
    }

    /// Results for a user-triggered input, or `None` if the input was not taken.
    pub fn on_input(&self, input: Input, now: Milliseconds) -> Option<Vec<Judged>> {
        if !self.accepts(input) {
            return None;
        }

        match &self.object.kind {
            HitObjectKind::Minion { .. } => minion::on_pressed(self, now),
            HitObjectKind::Sawblade { .. } => None,
            HitObjectKind::MiniBoss { .. } => miniboss::on_pressed(self, now),
            HitObjectKind::DualHit => dual_hit::on_pressed(self, input.lane(), now),
            HitObjectKind::StarSheet { .. } => match input {
                Input::Press(_) => star_sheet::on_pressed(self, now),
                Input::Release(_) => star_sheet::on_released(self, now),
            },
        }
    }

    /// Results that follow from time passing alone.
    pub fn check_for_result(
        &self,
        now: Milliseconds,
        collides: bool,
        tail_timeout: TailTimeout,
    ) -> Vec<Judged> {
        if self.all_judged() {
            return Vec::new();
        }

        match &self.object.kind {
            HitObjectKind::Minion { .. } => minion::check_expiry(self, now),
            HitObjectKind::Sawblade { .. } => sawblade::check_for_result(self, now, collides),
            HitObjectKind::MiniBoss { .. } => miniboss::check_expiry(self, now),
            HitObjectKind::DualHit => dual_hit::check_expiry(self, now),
            HitObjectKind::StarSheet { .. } => star_sheet::check_expiry(self, now, tail_timeout),
        }
    }

    pub(crate) fn set_result(&mut self, part: Part, result: HitResult) {
        let previous = self.judged.insert(part, result);
        debug_assert!(previous.is_none(), "{part:?} judged twice on object {}", self.id());
    }

    pub(crate) fn clear_result(&mut self, part: Part) {
        self.judged.remove(&part);
    }

    fn offset_from_start(&self, now: Milliseconds) -> Milliseconds {
        now - self.object.start_time
    }

    fn offset_from_end(&self, now: Milliseconds) -> Milliseconds {
        now - self.object.end_time()
    }
}
