//! End-to-end swipe scenarios against a fake list.

use swipekit_list::{RowState, SwipeConfig, SwipeDirection, SwipePhase};
use swipekit_testing::{ListEvent, SwipeRobot};

#[test]
fn slow_swipe_past_half_width_dismisses_that_row_alone() {
    let mut robot = SwipeRobot::new(20);
    assert!(robot.swipe(3, 600.0));
    assert_eq!(
        robot.controller().row_state(3),
        RowState::DismissAnimating(SwipeDirection::Right)
    );
    assert!(robot.list().dismiss_batches().is_empty());

    robot.run_until_idle();

    assert_eq!(robot.list().dismiss_batches(), vec![vec![3]]);
    assert_eq!(robot.list().len(), 19);
    assert_eq!(robot.list().label(3).as_deref(), Some("Item 5"));
    assert!(robot.list().violations().is_empty());
}

#[test]
fn short_fast_fling_dismisses_toward_fling() {
    let mut robot = SwipeRobot::new(20);
    assert!(robot.fling(7, -200.0));
    assert_eq!(
        robot.controller().row_state(7),
        RowState::DismissAnimating(SwipeDirection::Left)
    );

    robot.run_until_idle();
    assert_eq!(robot.list().dismiss_batches(), vec![vec![7]]);
    assert!(!robot.list().labels().contains(&"Item 8".to_owned()));
}

#[test]
fn short_slow_swipe_settles_back() {
    let mut robot = SwipeRobot::new(20);
    robot.swipe(7, -200.0);
    assert_eq!(robot.controller().row_state(7), RowState::SettleAnimating);

    robot.run_until_idle();
    assert!(robot.list().dismiss_batches().is_empty());
    assert!(robot.list().surface(7).unwrap().is_at_rest());
}

#[test]
fn overlapping_dismissals_publish_one_descending_batch() {
    let mut robot = SwipeRobot::new(20);
    robot.swipe(2, 700.0);
    robot.pump_frames(3);
    assert_eq!(
        robot.controller().row_state(2),
        RowState::DismissAnimating(SwipeDirection::Right)
    );

    robot.swipe(5, 600.0);
    assert_eq!(robot.controller().pending_dismissals(), vec![2, 5]);

    robot.run_until_idle();
    assert_eq!(robot.list().dismiss_batches(), vec![vec![5, 2]]);
    let labels = robot.list().labels();
    assert!(!labels.contains(&"Item 3".to_owned()));
    assert!(!labels.contains(&"Item 6".to_owned()));
    assert_eq!(labels.len(), 18);
    assert!(robot.list().violations().is_empty());
}

#[test]
fn tap_clicks_without_dismissing() {
    let mut robot = SwipeRobot::new(20);
    assert!(!robot.tap(1));
    robot.run_until_idle();

    assert_eq!(
        robot.list().events(),
        vec![ListEvent::ActionUp(Some(1)), ListEvent::Click(1)]
    );
    assert_eq!(robot.list().len(), 20);
}

#[test]
fn vertical_scroll_never_moves_or_dismisses() {
    let mut robot = SwipeRobot::new(20);
    assert!(!robot.scroll(4, 300.0));
    robot.run_until_idle();

    assert!(robot.list().item_moves().is_empty());
    assert!(robot.list().dismiss_batches().is_empty());
    assert_eq!(robot.list().events(), vec![ListEvent::ActionUp(Some(4))]);
}

#[test]
fn cancel_mid_swipe_restores_row() {
    let mut robot = SwipeRobot::new(20);
    robot.press(6);
    robot.move_by(-800.0, 0.0, 8);
    assert!(robot.list().is_scroll_suppressed());
    assert!(robot.cancel());
    assert!(!robot.list().is_scroll_suppressed());

    robot.run_until_idle();
    assert!(robot.list().dismiss_batches().is_empty());
    assert!(robot.list().surface(6).unwrap().is_at_rest());
}

#[test]
fn dismissed_surfaces_are_reset_after_publish() {
    let mut robot = SwipeRobot::new(5);
    let surface = robot.list().surface(0).unwrap();
    robot.swipe(0, -900.0);
    robot.pump_frames(30);

    assert_eq!(robot.list().dismiss_batches(), vec![vec![0]]);
    assert_eq!(surface.reset_count(), 1);
    assert!(surface.is_at_rest());
}

#[test]
fn locked_rows_pass_through() {
    let mut robot = SwipeRobot::new(5);
    robot.list().lock("Item 2");
    assert!(!robot.swipe(1, 900.0));
    robot.run_until_idle();

    assert!(robot.list().item_moves().is_empty());
    assert!(robot.list().dismiss_batches().is_empty());
    assert_eq!(robot.list().len(), 5);
}

#[test]
fn action_up_after_idle_never_touches_list() {
    let mut robot = SwipeRobot::new(10);
    robot.swipe(2, 800.0);
    robot.run_until_idle();
    robot.list().take_events();

    robot.release();
    robot.cancel();
    assert_eq!(
        robot.list().events(),
        vec![ListEvent::ActionUp(None), ListEvent::ActionUp(None)]
    );
    assert_eq!(robot.list().len(), 9);
    assert_eq!(robot.controller().phase(), SwipePhase::Idle);
}

#[test]
fn item_moves_report_total_displacement() {
    let mut robot = SwipeRobot::new(3);
    robot.press(1);
    robot.move_by(40.0, 0.0, 4);
    let moves = robot.list().item_moves();
    assert_eq!(moves, vec![(10.0, 1), (20.0, 1), (30.0, 1), (40.0, 1)]);
    robot.release_after_pause();
}

#[test]
fn relayout_during_swipe_uses_new_width() {
    let mut robot = SwipeRobot::new(5);
    robot.press(2);
    robot.move_by(300.0, 0.0, 6);
    // Narrower container: the same drag now crosses half the width.
    robot.list().set_width(500.0);
    robot.controller().on_layout();
    robot.release_after_pause();

    assert_eq!(
        robot.controller().row_state(2),
        RowState::DismissAnimating(SwipeDirection::Right)
    );
}

#[test]
fn scrolling_list_pauses_detection() {
    let mut robot = SwipeRobot::new(5);
    robot
        .controller()
        .on_scroll_state_changed(swipekit_list::ListScrollState::TouchScroll);
    robot.swipe(1, 800.0);
    robot.run_until_idle();
    assert_eq!(robot.list().len(), 5);

    robot
        .controller()
        .on_scroll_state_changed(swipekit_list::ListScrollState::Idle);
    robot.swipe(1, 800.0);
    robot.run_until_idle();
    assert_eq!(robot.list().len(), 4);
}

#[test]
fn custom_fraction_changes_distance_threshold() {
    let config = SwipeConfig::default().with_dismiss_fraction(0.25);
    let mut robot = SwipeRobot::with_config(5, config);
    robot.swipe(0, 300.0);
    robot.run_until_idle();
    assert_eq!(robot.list().dismiss_batches(), vec![vec![0]]);
}
