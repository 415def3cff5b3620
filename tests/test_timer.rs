use std::time::Duration;

use asteroid_shooter::timer::Timer;

#[test]
fn duration_converts_to_ticks() {
    assert_eq!(Timer::new(Duration::from_millis(350), 60).target_ticks(), 21);
    assert_eq!(Timer::new(Duration::from_secs(2), 60).target_ticks(), 120);
    assert_eq!(Timer::new(Duration::from_secs(5), 30).target_ticks(), 150);
}

#[test]
fn not_ready_until_full_duration() {
    let mut t = Timer::from_ticks(3);
    assert!(!t.is_ready());
    t.update();
    t.update();
    assert!(!t.is_ready());
    assert_eq!(t.remaining_ticks(), 1);
    t.update();
    assert!(t.is_ready());
}

#[test]
fn stays_ready_without_reset() {
    let mut t = Timer::from_ticks(2);
    t.update();
    t.update();
    for _ in 0..10 {
        assert!(t.is_ready());
        t.update();
    }
    assert!(t.is_ready());
}

#[test]
fn reset_rearms_for_full_duration() {
    let mut t = Timer::from_ticks(3);
    for _ in 0..5 {
        t.update();
    }
    assert!(t.is_ready());

    t.reset();
    assert!(!t.is_ready());
    t.update();
    t.update();
    assert!(!t.is_ready());
    t.update();
    assert!(t.is_ready());
}

#[test]
fn zero_duration_is_ready_immediately() {
    let t = Timer::new(Duration::ZERO, 60);
    assert!(t.is_ready());
}

#[test]
fn force_ready_jumps_to_deadline() {
    let mut t = Timer::from_ticks(100);
    t.force_ready();
    assert!(t.is_ready());
    assert_eq!(t.remaining_ticks(), 0);
}
