use super::*;

use approx::assert_abs_diff_eq;

fn feed(tracker: &mut AxisVelocityTracker, samples: &[(i64, f32)]) {
    for &(time, position) in samples {
        tracker.add_position(time, position);
    }
}

#[test]
fn empty_and_single_sample_report_zero() {
    let mut tracker = AxisVelocityTracker::new();
    assert_eq!(tracker.velocity(), 0.0);
    tracker.add_position(0, 10.0);
    assert_eq!(tracker.velocity(), 0.0);
}

#[test]
fn constant_speed_is_recovered() {
    let mut tracker = AxisVelocityTracker::new();
    // 2 px per ms.
    feed(&mut tracker, &[(0, 0.0), (10, 20.0), (20, 40.0), (30, 60.0), (40, 80.0)]);
    assert_abs_diff_eq!(tracker.velocity(), 2_000.0, epsilon = 1.0);
}

#[test]
fn leftward_motion_is_negative() {
    let mut tracker = AxisVelocityTracker::new();
    feed(&mut tracker, &[(0, 500.0), (8, 480.0), (16, 460.0), (24, 440.0)]);
    assert!(tracker.velocity() < -2_000.0);
}

#[test]
fn pause_before_release_reads_as_stopped() {
    let mut tracker = AxisVelocityTracker::new();
    feed(&mut tracker, &[(0, 0.0), (10, 50.0), (20, 100.0), (200, 100.0)]);
    assert_eq!(tracker.velocity(), 0.0);
}

#[test]
fn samples_beyond_horizon_are_ignored() {
    let mut tracker = AxisVelocityTracker::new();
    // A fast early burst, then a slow steady tail spanning the horizon.
    feed(&mut tracker, &[(0, 0.0), (5, 200.0)]);
    for step in 1..=14 {
        tracker.add_position(5 + step * 10, 200.0 + step as f32 * 2.0);
    }
    assert_abs_diff_eq!(tracker.velocity(), 200.0, epsilon = 5.0);
}

#[test]
fn velocity_is_clamped() {
    let mut tracker = AxisVelocityTracker::new();
    feed(&mut tracker, &[(0, 0.0), (1, 100.0), (2, 200.0)]);
    assert_abs_diff_eq!(tracker.velocity_with_max(8_000.0), 8_000.0);
    assert_eq!(tracker.velocity_with_max(f32::NAN), 0.0);
}

#[test]
fn history_wraps_without_losing_recent_samples() {
    let mut tracker = AxisVelocityTracker::new();
    for step in 0..50 {
        tracker.add_position(step * 5, step as f32 * -5.0);
    }
    assert_abs_diff_eq!(tracker.velocity(), -1_000.0, epsilon = 1.0);
}

#[test]
fn two_axis_tracker_reports_both_components() {
    let mut tracker = VelocityTracker::new();
    for step in 0..6 {
        let t = step * 10;
        tracker.add_position(t, Point::new(step as f32 * -15.0, step as f32 * 2.0));
    }
    let velocity = tracker.velocity(8_000.0);
    assert_abs_diff_eq!(velocity.x, -1_500.0, epsilon = 1.0);
    assert_abs_diff_eq!(velocity.y, 200.0, epsilon = 1.0);

    tracker.reset();
    assert_eq!(tracker.velocity(8_000.0), Velocity::ZERO);
}
