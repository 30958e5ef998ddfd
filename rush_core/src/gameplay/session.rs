//! The tick driver tying objects, hit policy and processors together.
//!
//! All mutation happens on the caller's thread inside `update`, `press` and
//! `release`. The clock may move in either direction: moving it backwards pops
//! results and fever periods newer than the target time, newest first.

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, trace};
use rush_schema::{Milliseconds, RulesetConfig, TailTimeout};

use crate::chart::{Chart, HitObject, HitObjectKind, Lane, ObjectId};
use crate::gameplay::fever::{FeverMeter, FeverPeriod, FeverPhase};
use crate::gameplay::judgement::{JudgementResult, ResultKey};
use crate::gameplay::objects::{Input, Judged, LiveObject};
use crate::gameplay::policy::HitPolicy;
use crate::gameplay::processor::{JudgementProcessor, JudgementTally};
use crate::input::events::{InputEvent, RushAction};
use crate::input::InputQueue;

/// Spatial test supplied by the playfield; only consulted for sawblades.
pub trait CollisionCheck {
    fn collides_with(&self, object: &HitObject, now: Milliseconds) -> bool;
}

impl<F> CollisionCheck for F
where
    F: Fn(&HitObject, Milliseconds) -> bool,
{
    fn collides_with(&self, object: &HitObject, now: Milliseconds) -> bool {
        self(object, now)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCollides;

impl CollisionCheck for NeverCollides {
    fn collides_with(&self, _object: &HitObject, _now: Milliseconds) -> bool {
        false
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum JudgementEvent {
    Applied(JudgementResult),
    Reverted(JudgementResult),
    FeverActivated(FeverPeriod),
    FeverDiscarded(FeverPeriod),
}

/// Receiving end of the judgement stream.
pub struct JudgementFeed {
    receiver: Receiver<JudgementEvent>,
}

impl JudgementFeed {
    pub fn try_recv(&self) -> Option<JudgementEvent> {
        self.receiver.try_recv().ok()
    }

    pub fn drain(&self) -> Vec<JudgementEvent> {
        self.receiver.try_iter().collect()
    }
}

pub struct Session {
    objects: Vec<LiveObject>,
    results: Vec<JudgementResult>,
    tally: JudgementProcessor<JudgementTally>,
    fever: JudgementProcessor<FeverMeter>,
    policy: HitPolicy,
    tail_timeout: TailTimeout,
    current_time: Milliseconds,
    events: Sender<JudgementEvent>,
}

impl Session {
    pub fn new(chart: Chart, config: &RulesetConfig) -> (Self, JudgementFeed) {
        let (tx, rx) = unbounded();
        (
            Self {
                objects: chart.objects.into_iter().map(LiveObject::new).collect(),
                results: Vec::new(),
                tally: JudgementProcessor::new(JudgementTally::default()),
                fever: JudgementProcessor::new(FeverMeter::new(&config.fever)),
                policy: HitPolicy,
                tail_timeout: config.tail_timeout,
                current_time: Milliseconds::NEG_INFINITY,
                events: tx,
            },
            JudgementFeed { receiver: rx },
        )
    }

    /// Moves the clock to `now` and resolves everything that time alone decides.
    pub fn update(&mut self, now: Milliseconds, collision: &impl CollisionCheck) {
        if now < self.current_time {
            self.rewind_to(now);
        }
        self.current_time = now;

        for idx in 0..self.objects.len() {
            let obj = &self.objects[idx];
            if obj.all_judged() {
                continue;
            }

            let collides = matches!(obj.object.kind, HitObjectKind::Sawblade { .. })
                && collision.collides_with(&obj.object, now);
            let judged = obj.check_for_result(now, collides, self.tail_timeout);
            self.apply_all(idx, judged);
        }
    }

    /// Routes a press to the first eligible object. Returns whether anything took it.
    ///
    /// Inputs behind the clock are stale and rejected; inputs ahead of it move
    /// the clock first, so results are always stamped with their own time.
    pub fn press(&mut self, action: RushAction, now: Milliseconds) -> bool {
        if !self.advance_for_input(now) {
            return false;
        }

        match action.lane() {
            Some(lane) => self.dispatch(Input::Press(lane), now),
            None => self.try_activate_fever(),
        }
    }

    pub fn release(&mut self, action: RushAction, now: Milliseconds) -> bool {
        if !self.advance_for_input(now) {
            return false;
        }

        match action.lane() {
            Some(lane) => self.dispatch(Input::Release(lane), now),
            None => false,
        }
    }

    /// Gate plus forward for one specific object.
    pub fn on_user_action(&mut self, id: ObjectId, lane: Lane, now: Milliseconds) -> bool {
        if !self.advance_for_input(now) {
            return false;
        }

        let Some(obj) = self.objects.get(id) else {
            return false;
        };

        let input = Input::Press(lane);
        if !obj.accepts(input) || !self.policy.is_hittable(&self.objects, id) {
            trace!("input on object {id} rejected at {now}");
            return false;
        }

        match obj.on_input(input, now) {
            Some(judged) => {
                self.apply_all(id, judged);
                true
            }
            None => false,
        }
    }

    /// Feeds every queued input through the session, advancing the clock to
    /// each event that lies ahead of it.
    pub fn drain_inputs(&mut self, queue: &InputQueue, collision: &impl CollisionCheck) -> usize {
        let mut handled = 0;
        while let Some(InputEvent {
            timestamp,
            action,
            pressed,
        }) = queue.pop()
        {
            if timestamp > self.current_time {
                self.update(timestamp, collision);
            }
            if pressed {
                self.press(action, timestamp);
            } else {
                self.release(action, timestamp);
            }
            handled += 1;
        }
        handled
    }

    pub fn try_activate_fever(&mut self) -> bool {
        match self.fever.try_activate_fever(self.current_time) {
            Some(period) => {
                let _ = self.events.send(JudgementEvent::FeverActivated(period));
                true
            }
            None => false,
        }
    }

    pub fn current_time(&self) -> Milliseconds {
        self.current_time
    }

    pub fn fever_progress(&self) -> f64 {
        self.fever.progress_at(self.current_time)
    }

    pub fn fever_active(&self) -> bool {
        self.fever.is_active_at(self.current_time)
    }

    pub fn fever_phase(&self) -> FeverPhase {
        self.fever.handler().phase_at(self.current_time)
    }

    pub fn fever_periods(&self) -> &[FeverPeriod] {
        self.fever.handler().periods()
    }

    pub fn hittable_in(&self, lane: Lane) -> Option<ObjectId> {
        self.policy
            .hittable_in(&self.objects, lane, self.current_time)
            .map(LiveObject::id)
    }

    pub fn is_hittable(&self, id: ObjectId) -> bool {
        self.policy.is_hittable(&self.objects, id)
    }

    pub fn objects(&self) -> &[LiveObject] {
        &self.objects
    }

    pub fn object(&self, id: ObjectId) -> Option<&LiveObject> {
        self.objects.get(id)
    }

    pub fn completion(&self, id: ObjectId) -> Option<f32> {
        self.objects.get(id).and_then(LiveObject::completion)
    }

    /// Applied results, oldest first.
    pub fn results(&self) -> &[JudgementResult] {
        &self.results
    }

    pub fn tally(&self) -> &JudgementTally {
        self.tally.handler()
    }

    /// Sawblade collisions are only sampled by `update`, so catching up here
    /// sweeps expiries without a collision check.
    fn advance_for_input(&mut self, now: Milliseconds) -> bool {
        if now < self.current_time {
            trace!("stale input at {now} behind clock {}", self.current_time);
            return false;
        }
        if now > self.current_time {
            self.update(now, &NeverCollides);
        }
        true
    }

    fn dispatch(&mut self, input: Input, now: Milliseconds) -> bool {
        for idx in 0..self.objects.len() {
            let obj = &self.objects[idx];
            if !obj.accepts(input) || !self.policy.is_hittable(&self.objects, idx) {
                continue;
            }

            if let Some(judged) = obj.on_input(input, now) {
                self.apply_all(idx, judged);
                return true;
            }
        }

        trace!("{input:?} at {now} had no target");
        false
    }

    fn apply_all(&mut self, idx: usize, judged: Vec<Judged>) {
        // Judgement time never runs behind the clock, so results stay ordered by time.
        let time = self.current_time;

        for Judged { part, result } in judged {
            let key = ResultKey { object: idx, part };
            let kind = self.objects[idx].judgement_kind(part);
            let mut result = JudgementResult::new(key, kind, result, time);

            self.tally.apply(&mut result);
            self.fever.apply(&mut result);
            self.objects[idx].set_result(part, result.result);

            trace!("applied {:?} {:?} = {:?} at {}", key.object, part, result.result, time);
            let _ = self.events.send(JudgementEvent::Applied(result.clone()));
            self.results.push(result);
        }
    }

    fn revert_last(&mut self) {
        let Some(result) = self.results.pop() else {
            return;
        };

        self.fever.revert(&result);
        self.tally.revert(&result);
        self.objects[result.key.object].clear_result(result.key.part);

        trace!("reverted {:?} {:?}", result.key.object, result.key.part);
        let _ = self.events.send(JudgementEvent::Reverted(result));
    }

    /// Undoes everything that happened after `time`, newest first.
    fn rewind_to(&mut self, time: Milliseconds) {
        let mut reverted = 0;
        let mut discarded = 0;

        loop {
            if let Some(period) = self.fever.discard_period_after(time) {
                let _ = self.events.send(JudgementEvent::FeverDiscarded(period));
                discarded += 1;
                continue;
            }

            if self.results.last().is_some_and(|r| r.time > time) {
                self.revert_last();
                reverted += 1;
                continue;
            }

            break;
        }

        if reverted > 0 || discarded > 0 {
            debug!(
                "rewound {} -> {}: {} results reverted, {} fever periods discarded",
                self.current_time, time, reverted, discarded
            );
        }
    }
}
