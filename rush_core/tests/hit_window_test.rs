use rush_core::gameplay::hit_window::{HitResult, HitWindow, HitWindows};

fn standard() -> HitWindows {
    HitWindows::new(vec![
        HitWindow::symmetric(HitResult::Great, 40.0),
        HitWindow::symmetric(HitResult::Good, 80.0),
        HitWindow::symmetric(HitResult::Meh, 120.0),
        HitWindow::symmetric(HitResult::Miss, 160.0),
    ])
    .expect("standard windows are nested")
}

#[test]
fn test_classify_tightest_window_wins() {
    let windows = standard();

    assert_eq!(windows.classify(0.0), HitResult::Great);
    assert_eq!(windows.classify(-25.0), HitResult::Great);
    assert_eq!(windows.classify(60.0), HitResult::Good);
    assert_eq!(windows.classify(-100.0), HitResult::Meh);
    assert_eq!(windows.classify(150.0), HitResult::Miss);
}

#[test]
fn test_boundaries_are_inclusive() {
    let windows = standard();

    assert_eq!(windows.classify(40.0), HitResult::Great);
    assert_eq!(windows.classify(-40.0), HitResult::Great);
    assert_eq!(windows.classify(40.5), HitResult::Good);
    assert_eq!(windows.classify(160.0), HitResult::Miss);
    assert_eq!(windows.classify(-160.0), HitResult::Miss);
}

#[test]
fn test_outside_every_window_is_none() {
    let windows = standard();

    assert_eq!(windows.classify(160.5), HitResult::None);
    assert_eq!(windows.classify(-500.0), HitResult::None);
    assert_eq!(HitWindows::empty().classify(0.0), HitResult::None);
}

#[test]
fn test_classify_is_monotone_in_distance() {
    let windows = standard();
    let offsets: Vec<f64> = (-200..=200).map(|i| i as f64 * 1.5).collect();

    for &a in &offsets {
        for &b in &offsets {
            if a.abs() <= b.abs() {
                assert!(
                    windows.classify(a) >= windows.classify(b),
                    "offset {a} judged worse than {b}"
                );
            }
        }
        // Same input, same answer.
        assert_eq!(windows.classify(a), windows.classify(a));
    }
}

#[test]
fn test_asymmetric_windows() {
    let windows = HitWindows::new(vec![
        HitWindow {
            result: HitResult::Great,
            early: 20.0,
            late: 40.0,
        },
        HitWindow {
            result: HitResult::Miss,
            early: 60.0,
            late: 100.0,
        },
    ])
    .unwrap();

    assert_eq!(windows.classify(-30.0), HitResult::Miss);
    assert_eq!(windows.classify(30.0), HitResult::Great);
    assert_eq!(windows.classify(-61.0), HitResult::None);
    assert_eq!(windows.classify(90.0), HitResult::Miss);
}

#[test]
fn test_zero_width_disables_tier() {
    let windows = HitWindows::new(vec![
        HitWindow::symmetric(HitResult::Great, 40.0),
        HitWindow::symmetric(HitResult::Good, 0.0),
        HitWindow::symmetric(HitResult::Meh, 120.0),
    ])
    .unwrap();

    assert_eq!(windows.classify(60.0), HitResult::Meh);
    assert!(!windows.is_allowed(HitResult::Good));
    assert!(windows.is_allowed(HitResult::Meh));
}

#[test]
fn test_can_be_hit_until_widest_late_window() {
    let windows = standard();

    assert!(windows.can_be_hit(-1000.0));
    assert!(windows.can_be_hit(160.0));
    assert!(!windows.can_be_hit(160.1));
}

#[test]
fn test_scaled_widens_every_window() {
    let windows = standard().scaled(3.0);

    assert_eq!(windows.classify(120.0), HitResult::Great);
    assert_eq!(windows.classify(-470.0), HitResult::Miss);
    assert_eq!(windows.widest_late(), 480.0);
}

#[test]
fn test_rejects_windows_that_are_not_nested() {
    let err = HitWindows::new(vec![
        HitWindow::symmetric(HitResult::Great, 90.0),
        HitWindow::symmetric(HitResult::Good, 80.0),
    ])
    .unwrap_err();

    assert_eq!(err.code, "E2003");
}

#[test]
fn test_rejects_tiers_out_of_order() {
    let err = HitWindows::new(vec![
        HitWindow::symmetric(HitResult::Good, 40.0),
        HitWindow::symmetric(HitResult::Great, 80.0),
    ])
    .unwrap_err();

    assert_eq!(err.code, "E2001");
}
