use rush_core::chart::{Chart, Lane};
use rush_core::gameplay::fever::FeverPhase;
use rush_core::gameplay::hit_window::HitResult;
use rush_core::gameplay::judgement::Part;
use rush_core::gameplay::session::{JudgementEvent, JudgementFeed, NeverCollides, Session};
use rush_core::input::events::RushAction;
use rush_schema::{
    FeverConfig, HitObjectDecl, LaneDecl, Metadata, ObjectKindDecl, RulesetConfig, RushChart,
};

fn build_with(objects: Vec<HitObjectDecl>, config: &RulesetConfig) -> (Session, JudgementFeed) {
    let chart = RushChart {
        meta: Metadata {
            title: "rewind".to_string(),
            artist: "test".to_string(),
            version: "1".to_string(),
            tags: vec![],
        },
        objects,
    };
    let chart = Chart::from_schema(&chart, config).expect("valid chart");
    Session::new(chart, config)
}

fn build() -> (Session, JudgementFeed) {
    let config = RulesetConfig {
        fever: FeverConfig {
            duration_ms: 1000.0,
            perfect_hits_to_fill: 2,
        },
        ..RulesetConfig::default()
    };
    let objects = [1000.0, 1500.0, 2000.0, 2500.0, 3000.0]
        .into_iter()
        .map(|time_ms| HitObjectDecl {
            time_ms,
            kind: ObjectKindDecl::Minion {
                lane: LaneDecl::Air,
                bonus: false,
            },
        })
        .collect();
    build_with(objects, &config)
}

fn single(kind: ObjectKindDecl) -> Session {
    build_with(
        vec![HitObjectDecl {
            time_ms: 1000.0,
            kind,
        }],
        &RulesetConfig::default(),
    )
    .0
}

fn hit_at(session: &mut Session, time: f64) {
    session.update(time, &NeverCollides);
    assert!(session.press(RushAction::AirAttack, time), "press at {time}");
}

fn assert_same_state(a: &Session, b: &Session) {
    assert_eq!(a.current_time(), b.current_time());
    assert_eq!(a.fever_progress().to_bits(), b.fever_progress().to_bits());
    assert_eq!(a.fever_active(), b.fever_active());
    assert_eq!(a.fever_phase(), b.fever_phase());
    assert_eq!(a.fever_periods(), b.fever_periods());
    for lane in Lane::ALL {
        assert_eq!(a.hittable_in(lane), b.hittable_in(lane), "{lane:?}");
    }
    assert_eq!(a.tally(), b.tally());
    assert_eq!(a.results(), b.results());
    for obj in a.objects() {
        assert_eq!(a.completion(obj.id()), b.completion(obj.id()));
    }
}

#[test]
fn test_rewind_matches_direct_run() {
    let (mut direct, _) = build();
    hit_at(&mut direct, 1000.0);
    hit_at(&mut direct, 1500.0);
    direct.update(1600.0, &NeverCollides);

    let (mut replayed, feed) = build();
    hit_at(&mut replayed, 1000.0);
    hit_at(&mut replayed, 1500.0);
    replayed.update(1700.0, &NeverCollides);
    assert!(replayed.press(RushAction::Fever, 1700.0));
    hit_at(&mut replayed, 2000.0);
    replayed.update(2200.0, &NeverCollides);
    assert!(replayed.fever_active());

    feed.drain();
    replayed.update(1600.0, &NeverCollides);

    assert_same_state(&direct, &replayed);
    assert_eq!(replayed.fever_progress(), 1.0);
    assert_eq!(replayed.fever_phase(), FeverPhase::Ready);
    // Object 2 gates the lane but its window has not opened yet.
    assert_eq!(replayed.hittable_in(Lane::Air), None);
    assert!(replayed.is_hittable(2));
    assert_eq!(replayed.tally().count(HitResult::Great), 2);

    assert!(matches!(feed.try_recv(), Some(JudgementEvent::Reverted(r)) if r.key.object == 2));
    assert!(matches!(feed.try_recv(), Some(JudgementEvent::FeverDiscarded(p)) if p.start == 1700.0));
    assert_eq!(feed.try_recv(), None);
}

#[test]
fn test_rewind_inside_period_keeps_it() {
    let (mut session, _) = build();
    hit_at(&mut session, 1000.0);
    hit_at(&mut session, 1500.0);
    session.update(1700.0, &NeverCollides);
    session.press(RushAction::Fever, 1700.0);
    hit_at(&mut session, 2000.0);
    session.update(2500.0, &NeverCollides);

    session.update(1900.0, &NeverCollides);

    assert_eq!(session.fever_periods().len(), 1);
    assert!(session.fever_active());
    assert!((session.fever_progress() - 0.8).abs() < 1e-12);
    assert!(!session.object(2).unwrap().is_judged(Part::Main));
    assert_eq!(session.results().len(), 2);
}

#[test]
fn test_rewind_reopens_expired_object() {
    let (mut session, _) = build();
    session.update(1200.0, &NeverCollides);
    assert_eq!(session.object(0).unwrap().result(Part::Main), Some(HitResult::Miss));
    assert_eq!(session.tally().combo(), 0);

    session.update(1100.0, &NeverCollides);
    assert!(!session.object(0).unwrap().all_judged());
    assert_eq!(session.hittable_in(Lane::Air), Some(0));
    assert_eq!(session.tally().total(), 0);

    assert!(session.press(RushAction::AirAttack, 1100.0));
    assert_eq!(session.object(0).unwrap().result(Part::Main), Some(HitResult::Meh));
}

#[test]
fn test_replaying_forward_after_rewind_is_deterministic() {
    let (mut a, _) = build();
    let (mut b, _) = build();

    for session in [&mut a, &mut b] {
        hit_at(session, 1000.0);
        hit_at(session, 1500.0);
        session.update(1700.0, &NeverCollides);
        session.press(RushAction::Fever, 1700.0);
        hit_at(session, 2000.0);
    }

    b.update(3500.0, &NeverCollides);
    b.update(1800.0, &NeverCollides);
    hit_at(&mut b, 2000.0);

    assert_same_state(&a, &b);
}

#[test]
fn test_rewind_to_start_clears_everything() {
    let (mut session, feed) = build();
    hit_at(&mut session, 1000.0);
    hit_at(&mut session, 1500.0);
    session.update(1700.0, &NeverCollides);
    session.press(RushAction::Fever, 1700.0);
    session.update(4000.0, &NeverCollides);

    session.update(0.0, &NeverCollides);

    assert!(session.results().is_empty());
    assert!(session.fever_periods().is_empty());
    assert_eq!(session.fever_progress(), 0.0);
    assert_eq!(session.fever_phase(), FeverPhase::Idle);
    assert_eq!(session.tally().max_combo(), 0);
    assert!(session.objects().iter().all(|o| !o.all_judged()));

    let events = feed.drain();
    let activated = events
        .iter()
        .filter(|e| matches!(e, JudgementEvent::FeverActivated(_)))
        .count();
    let discarded = events
        .iter()
        .filter(|e| matches!(e, JudgementEvent::FeverDiscarded(_)))
        .count();
    assert_eq!((activated, discarded), (1, 1));
}

#[test]
fn test_user_action_ahead_of_clock_is_stamped_with_its_own_time() {
    let (mut session, _) = build();
    session.update(900.0, &NeverCollides);

    assert!(session.on_user_action(0, Lane::Air, 1000.0));
    assert_eq!(session.current_time(), 1000.0);
    assert_eq!(session.results()[0].time, 1000.0);

    session.update(950.0, &NeverCollides);
    assert!(!session.object(0).unwrap().is_judged(Part::Main));
    assert!(session.results().is_empty());
}

#[test]
fn test_press_before_first_update_can_be_rewound() {
    let (mut session, _) = build();

    assert!(session.press(RushAction::AirAttack, 1000.0));
    assert_eq!(session.results()[0].time, 1000.0);

    session.update(500.0, &NeverCollides);
    assert_eq!(session.object(0).unwrap().result(Part::Main), None);
    assert_eq!(session.tally().total(), 0);
}

#[test]
fn test_stale_input_is_rejected() {
    let (mut session, _) = build();
    session.update(1100.0, &NeverCollides);

    assert!(!session.press(RushAction::AirAttack, 1000.0));
    assert!(!session.on_user_action(0, Lane::Air, 1000.0));
    assert!(session.results().is_empty());
}

#[test]
fn test_miniboss_rewind_matches_direct_run() {
    let boss = || {
        single(ObjectKindDecl::MiniBoss {
            end_time_ms: 2000.0,
            required_hits: 4,
        })
    };

    let mut direct = boss();
    hit_at(&mut direct, 1100.0);
    hit_at(&mut direct, 1150.0);
    direct.update(1175.0, &NeverCollides);

    let mut replayed = boss();
    for t in [1100.0, 1150.0, 1200.0, 1250.0] {
        hit_at(&mut replayed, t);
    }
    replayed.update(1800.0, &NeverCollides);
    assert_eq!(replayed.completion(0), Some(1.0));

    replayed.update(1175.0, &NeverCollides);
    assert_same_state(&direct, &replayed);
    assert_eq!(replayed.completion(0), Some(0.5));
    assert!(!replayed.object(0).unwrap().is_judged(Part::Tick(2)));

    direct.update(2000.0, &NeverCollides);
    replayed.update(2000.0, &NeverCollides);
    assert_same_state(&direct, &replayed);
    assert_eq!(replayed.object(0).unwrap().result(Part::Main), Some(HitResult::Good));
}

#[test]
fn test_star_sheet_rewind_keeps_head_and_reverts_tail() {
    let sheet = || {
        single(ObjectKindDecl::StarSheet {
            lane: LaneDecl::Ground,
            end_time_ms: 2000.0,
        })
    };

    let mut direct = sheet();
    direct.update(1000.0, &NeverCollides);
    assert!(direct.press(RushAction::GroundAttack, 1000.0));
    direct.update(1500.0, &NeverCollides);

    let mut replayed = sheet();
    replayed.update(1000.0, &NeverCollides);
    assert!(replayed.press(RushAction::GroundAttack, 1000.0));
    replayed.update(1700.0, &NeverCollides);
    assert!(replayed.release(RushAction::GroundAttack, 1700.0));
    replayed.update(1900.0, &NeverCollides);
    assert!(replayed.object(0).unwrap().all_judged());

    replayed.update(1500.0, &NeverCollides);
    assert_same_state(&direct, &replayed);
    let obj = replayed.object(0).unwrap();
    assert_eq!(obj.result(Part::Head), Some(HitResult::Great));
    assert!(!obj.is_judged(Part::Tail));
    assert_eq!(replayed.hittable_in(Lane::Ground), Some(0));
}

#[test]
fn test_dual_rewind_reopens_pair_with_one_lane_standing() {
    let mut direct = single(ObjectKindDecl::DualHit);
    direct.update(1000.0, &NeverCollides);
    assert!(direct.press(RushAction::AirAttack, 1000.0));
    direct.update(1030.0, &NeverCollides);

    let mut replayed = single(ObjectKindDecl::DualHit);
    replayed.update(1000.0, &NeverCollides);
    assert!(replayed.press(RushAction::AirAttack, 1000.0));
    assert!(replayed.press(RushAction::GroundAttack, 1050.0));
    replayed.update(1100.0, &NeverCollides);
    assert!(replayed.object(0).unwrap().all_judged());

    replayed.update(1030.0, &NeverCollides);
    assert_same_state(&direct, &replayed);
    let obj = replayed.object(0).unwrap();
    assert_eq!(obj.result(Part::Lane(Lane::Air)), Some(HitResult::Great));
    assert!(!obj.is_judged(Part::Lane(Lane::Ground)));
    assert!(!obj.is_judged(Part::Main));

    assert!(replayed.press(RushAction::GroundAttack, 1040.0));
    assert_eq!(replayed.object(0).unwrap().result(Part::Main), Some(HitResult::Great));
}
