use conversion_chart::core::ProcessedPoint;
use conversion_chart::interaction::{ZoomCommit, ZoomPhase, ZoomRange, ZoomSelector};

fn series(count: usize) -> Vec<ProcessedPoint> {
    (1..=count)
        .map(|day| ProcessedPoint::new(format!("{day:02}")).with_value("a", day as f64))
        .collect()
}

fn labels(selector: &ZoomSelector) -> Vec<String> {
    selector.window().iter().map(|p| p.label.clone()).collect()
}

fn drag(selector: &mut ZoomSelector, from: &str, to: &str) -> ZoomCommit {
    selector.arm();
    selector.pointer_down(Some(from));
    selector.pointer_move(Some(to));
    selector.pointer_up()
}

#[test]
fn pointer_events_are_ignored_until_armed() {
    let mut selector = ZoomSelector::new(series(5));

    selector.pointer_down(Some("02"));
    selector.pointer_move(Some("04"));
    assert_eq!(selector.pointer_up(), ZoomCommit::Ignored);
    assert_eq!(selector.phase(), &ZoomPhase::Idle);
    assert_eq!(selector.window().len(), 5);
}

#[test]
fn drag_tracks_range_while_armed() {
    let mut selector = ZoomSelector::new(series(5));
    selector.arm();
    assert_eq!(selector.phase(), &ZoomPhase::ZoomArmed);
    assert!(selector.is_active());

    selector.pointer_down(Some("02"));
    selector.pointer_move(Some("03"));
    selector.pointer_move(Some("04"));
    assert_eq!(
        selector.range(),
        Some(&ZoomRange {
            left: "02".to_owned(),
            right: "04".to_owned(),
        })
    );
}

#[test]
fn press_without_category_does_not_start_drag() {
    let mut selector = ZoomSelector::new(series(5));
    selector.arm();
    selector.pointer_down(None);

    assert_eq!(selector.phase(), &ZoomPhase::ZoomArmed);
    assert!(selector.range().is_none());
}

#[test]
fn releasing_on_start_category_discards_selection() {
    let mut selector = ZoomSelector::new(series(5));
    selector.arm();
    selector.pointer_down(Some("03"));

    assert_eq!(selector.pointer_up(), ZoomCommit::Discarded);
    assert_eq!(selector.phase(), &ZoomPhase::ZoomArmed);
    assert_eq!(selector.window().len(), 5);
    assert!(!selector.can_reset());
}

#[test]
fn committed_range_slices_window_inclusively() {
    let mut selector = ZoomSelector::new(series(6));

    let commit = drag(&mut selector, "02", "04");
    assert_eq!(commit, ZoomCommit::Applied { start: 1, end: 3 });
    assert_eq!(labels(&selector), ["02", "03", "04"]);
    assert_eq!(selector.phase(), &ZoomPhase::Zoomed);
    assert_eq!(selector.history_len(), 2);
    assert!(selector.can_reset());
    assert!(!selector.is_active());
}

#[test]
fn reversed_drag_selects_same_range() {
    let mut selector = ZoomSelector::new(series(6));

    assert_eq!(
        drag(&mut selector, "05", "02"),
        ZoomCommit::Applied { start: 1, end: 4 }
    );
    assert_eq!(labels(&selector), ["02", "03", "04", "05"]);
}

#[test]
fn consecutive_zooms_narrow_the_current_window() {
    let mut selector = ZoomSelector::new(series(10));

    drag(&mut selector, "02", "08");
    let commit = drag(&mut selector, "04", "05");

    assert_eq!(commit, ZoomCommit::Applied { start: 2, end: 3 });
    assert_eq!(labels(&selector), ["04", "05"]);
    assert_eq!(selector.history_len(), 3);
    assert_eq!(selector.base().len(), 10);
}

#[test]
fn endpoint_outside_window_is_dropped() {
    let mut selector = ZoomSelector::new(series(5));

    assert_eq!(drag(&mut selector, "02", "99"), ZoomCommit::Unresolved);
    assert_eq!(selector.phase(), &ZoomPhase::Idle);
    assert_eq!(selector.window().len(), 5);
}

#[test]
fn cancel_keeps_zoom_mode_armed() {
    let mut selector = ZoomSelector::new(series(5));
    selector.arm();
    selector.pointer_down(Some("01"));
    selector.pointer_move(Some("03"));
    selector.pointer_cancel();

    assert_eq!(selector.phase(), &ZoomPhase::ZoomArmed);
    assert_eq!(selector.pointer_up(), ZoomCommit::Ignored);
}

#[test]
fn reset_restores_full_series() {
    let mut selector = ZoomSelector::new(series(8));
    drag(&mut selector, "02", "06");
    drag(&mut selector, "03", "04");

    selector.reset();
    assert_eq!(selector.window().len(), 8);
    assert_eq!(selector.phase(), &ZoomPhase::Idle);
    assert!(!selector.can_reset());
}

#[test]
fn replacing_base_drops_zoom_history() {
    let mut selector = ZoomSelector::new(series(8));
    drag(&mut selector, "02", "06");

    selector.replace_base(series(3));
    assert_eq!(selector.window().len(), 3);
    assert_eq!(selector.history_len(), 1);
    assert_eq!(selector.phase(), &ZoomPhase::Idle);
}

#[test]
fn empty_series_never_zooms() {
    let mut selector = ZoomSelector::default();
    assert_eq!(drag(&mut selector, "01", "02"), ZoomCommit::Unresolved);
    assert!(selector.window().is_empty());
}
