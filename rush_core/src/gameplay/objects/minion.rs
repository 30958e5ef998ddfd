use rush_schema::Milliseconds;

use super::{Judged, LiveObject};
use crate::gameplay::hit_window::HitResult;
use crate::gameplay::judgement::Part;

pub(super) fn on_pressed(obj: &LiveObject, now: Milliseconds) -> Option<Vec<Judged>> {
    match obj.object.windows.classify(obj.offset_from_start(now)) {
        HitResult::None => None,
        result => Some(vec![Judged::new(Part::Main, result)]),
    }
}

pub(super) fn check_expiry(obj: &LiveObject, now: Milliseconds) -> Vec<Judged> {
    if obj.object.windows.can_be_hit(obj.offset_from_start(now)) {
        return Vec::new();
    }

    vec![Judged::new(Part::Main, HitResult::MIN)]
}
