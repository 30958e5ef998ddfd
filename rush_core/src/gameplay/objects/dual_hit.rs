use rush_schema::Milliseconds;

use super::{Judged, LiveObject};
use crate::chart::Lane;
use crate::gameplay::hit_window::HitResult;
use crate::gameplay::judgement::Part;

/// Both parts must land; the pair is only as good as its worse half.
fn combine(air: HitResult, ground: HitResult) -> HitResult {
    if !air.is_hit() || !ground.is_hit() {
        HitResult::MIN
    } else {
        air.min(ground)
    }
}

fn finish(obj: &LiveObject, judged: &mut Vec<Judged>) {
    let part_result = |lane: Lane| {
        obj.result(Part::Lane(lane)).or_else(|| {
            judged
                .iter()
                .find(|j| j.part == Part::Lane(lane))
                .map(|j| j.result)
        })
    };

    if let (Some(air), Some(ground)) = (part_result(Lane::Air), part_result(Lane::Ground)) {
        judged.push(Judged::new(Part::Main, combine(air, ground)));
    }
}

pub(super) fn on_pressed(obj: &LiveObject, lane: Lane, now: Milliseconds) -> Option<Vec<Judged>> {
    let result = obj.object.windows.classify(obj.offset_from_start(now));
    if result == HitResult::None {
        return None;
    }

    let mut judged = vec![Judged::new(Part::Lane(lane), result)];
    finish(obj, &mut judged);
    Some(judged)
}

pub(super) fn check_expiry(obj: &LiveObject, now: Milliseconds) -> Vec<Judged> {
    if obj.object.windows.can_be_hit(obj.offset_from_start(now)) {
        return Vec::new();
    }

    let mut judged: Vec<Judged> = Lane::ALL
        .into_iter()
        .filter(|&lane| !obj.is_judged(Part::Lane(lane)))
        .map(|lane| Judged::new(Part::Lane(lane), HitResult::MIN))
        .collect();
    finish(obj, &mut judged);
    judged
}
