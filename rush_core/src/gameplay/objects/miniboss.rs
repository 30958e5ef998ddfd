use rush_schema::Milliseconds;

use super::{Judged, LiveObject};
use crate::chart::HitObjectKind;
use crate::gameplay::hit_window::HitResult;
use crate::gameplay::judgement::Part;

/// Every landed tick is worth this, regardless of timing.
const TICK_RESULT: HitResult = HitResult::Great;

/// Terminal tier from landed ticks: all of them is a Great, fewer than half
/// (integer division) is a Miss, anything between is a Good.
pub fn miniboss_result(hits: u32, required_hits: u32) -> HitResult {
    if hits >= required_hits {
        HitResult::Great
    } else if hits == 0 || hits < required_hits / 2 {
        HitResult::Miss
    } else {
        HitResult::Good
    }
}

fn required_hits(obj: &LiveObject) -> u32 {
    match obj.object.kind {
        HitObjectKind::MiniBoss { required_hits, .. } => required_hits,
        _ => unreachable!("miniboss rule on {:?}", obj.object.kind),
    }
}

pub(super) fn hit_count(obj: &LiveObject) -> u32 {
    (0..required_hits(obj))
        .filter(|&i| obj.result(Part::Tick(i)).is_some_and(HitResult::is_hit))
        .count() as u32
}

pub(super) fn on_pressed(obj: &LiveObject, now: Milliseconds) -> Option<Vec<Judged>> {
    if now < obj.object.start_time || now >= obj.object.end_time() {
        return None;
    }

    let next = (0..required_hits(obj)).find(|&i| !obj.is_judged(Part::Tick(i)));
    Some(
        next.map(|i| Judged::new(Part::Tick(i), TICK_RESULT))
            .into_iter()
            .collect(),
    )
}

pub(super) fn check_expiry(obj: &LiveObject, now: Milliseconds) -> Vec<Judged> {
    if obj.offset_from_end(now) < 0.0 {
        return Vec::new();
    }

    let required = required_hits(obj);
    let mut judged: Vec<Judged> = (0..required)
        .filter(|&i| !obj.is_judged(Part::Tick(i)))
        .map(|i| Judged::new(Part::Tick(i), HitResult::MIN))
        .collect();

    judged.push(Judged::new(
        Part::Main,
        miniboss_result(hit_count(obj), required),
    ));
    judged
}
