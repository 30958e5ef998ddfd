use rush_schema::Milliseconds;

use super::{Judged, LiveObject};
use crate::gameplay::hit_window::HitResult;
use crate::gameplay::judgement::Part;

/// Sawblades only hurt inside the trailing miss window; clearing it is a dodge.
pub(super) fn check_for_result(obj: &LiveObject, now: Milliseconds, collides: bool) -> Vec<Judged> {
    let offset = obj.offset_from_start(now);
    if offset < 0.0 {
        return Vec::new();
    }

    match obj.object.windows.classify(offset) {
        HitResult::None => vec![Judged::new(Part::Main, HitResult::MAX)],
        HitResult::Miss if collides => vec![Judged::new(Part::Main, HitResult::MIN)],
        _ => Vec::new(),
    }
}
