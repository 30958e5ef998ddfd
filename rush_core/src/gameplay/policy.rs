use rush_schema::Milliseconds;

use crate::chart::{HitObjectKind, Lane, ObjectId};
use crate::gameplay::objects::LiveObject;

/// Decides which object in a lane may take the next user input.
///
/// Within a lane, only the earliest object that has not reached its terminal
/// judgement is hittable, so the player cannot skip ahead. Dual hits and
/// minibosses span both lanes and are left to their own aggregation rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct HitPolicy;

impl HitPolicy {
    /// The lane's gating object: the earliest one not yet fully judged, whether
    /// or not its window has opened. `objects` must be sorted by start time.
    pub fn next_in_lane<'a>(&self, objects: &'a [LiveObject], lane: Lane) -> Option<&'a LiveObject> {
        objects
            .iter()
            .find(|o| o.policy_lane() == Some(lane) && !o.all_judged())
    }

    /// The gating object, once its window has opened at `now`.
    pub fn hittable_in<'a>(
        &self,
        objects: &'a [LiveObject],
        lane: Lane,
        now: Milliseconds,
    ) -> Option<&'a LiveObject> {
        self.next_in_lane(objects, lane)
            .filter(|o| o.window_opened(now))
    }

    pub fn is_hittable(&self, objects: &[LiveObject], id: ObjectId) -> bool {
        let Some(obj) = objects.get(id) else {
            return false;
        };

        if obj.all_judged() {
            return false;
        }

        match obj.object.kind {
            HitObjectKind::Sawblade { .. } => false,
            HitObjectKind::DualHit | HitObjectKind::MiniBoss { .. } => true,
            HitObjectKind::Minion { lane, .. } | HitObjectKind::StarSheet { lane, .. } => self
                .next_in_lane(objects, lane)
                .is_some_and(|next| next.id() == id),
        }
    }
}
