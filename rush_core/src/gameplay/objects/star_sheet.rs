use rush_schema::{Milliseconds, TailTimeout};

use super::{Judged, LiveObject};
use crate::chart::HitObjectKind;
use crate::gameplay::hit_window::{HitResult, HitWindows};
use crate::gameplay::judgement::Part;

fn tail_windows(obj: &LiveObject) -> &HitWindows {
    match &obj.object.kind {
        HitObjectKind::StarSheet { tail_windows, .. } => tail_windows,
        _ => unreachable!("star sheet rule on {:?}", obj.object.kind),
    }
}

fn head_missed(head: Option<HitResult>) -> bool {
    head.is_some_and(|r| !r.is_hit())
}

pub(super) fn on_pressed(obj: &LiveObject, now: Milliseconds) -> Option<Vec<Judged>> {
    if obj.is_judged(Part::Head) {
        return None;
    }

    match obj.object.windows.classify(obj.offset_from_start(now)) {
        HitResult::None => None,
        result => Some(vec![Judged::new(Part::Head, result)]),
    }
}

/// Any release inside the (widened) tail windows is a perfect release.
pub(super) fn on_released(obj: &LiveObject, now: Milliseconds) -> Option<Vec<Judged>> {
    let head = obj.result(Part::Head)?;
    if !head.is_hit() || obj.is_judged(Part::Tail) {
        return None;
    }

    match tail_windows(obj).classify(obj.offset_from_end(now)) {
        HitResult::None => None,
        _ => Some(vec![Judged::new(Part::Tail, HitResult::MAX)]),
    }
}

pub(super) fn check_expiry(obj: &LiveObject, now: Milliseconds, tail_timeout: TailTimeout) -> Vec<Judged> {
    let mut judged = Vec::new();

    let mut head = obj.result(Part::Head);
    if head.is_none() && !obj.object.windows.can_be_hit(obj.offset_from_start(now)) {
        judged.push(Judged::new(Part::Head, HitResult::MIN));
        head = Some(HitResult::MIN);
    }

    // The tail never resolves ahead of the head, or before its own time.
    let offset = obj.offset_from_end(now);
    if head.is_none() || offset < 0.0 {
        return judged;
    }

    let tail = if head_missed(head) {
        Some(HitResult::MIN)
    } else {
        match tail_timeout {
            TailTimeout::AutoGreat => Some(HitResult::MAX),
            // A late release can still land until the tail windows close.
            TailTimeout::Miss if tail_windows(obj).can_be_hit(offset) => None,
            TailTimeout::Miss => Some(HitResult::MIN),
        }
    };
    judged.extend(tail.map(|result| Judged::new(Part::Tail, result)));
    judged
}
