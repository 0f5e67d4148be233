// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn system_clock_is_monotonic() {
    let clock = SystemClock;
    let t1 = clock.now();
    std::thread::sleep(Duration::from_millis(1));
    assert!(clock.now() > t1);
    assert!(clock.epoch_ms() > 0);
}

#[test]
fn fake_clock_advances_both_timelines() {
    let clock = FakeClock::new();
    let t1 = clock.now();
    let e1 = clock.epoch_ms();
    clock.advance(Duration::from_secs(2));
    assert_eq!(clock.now().duration_since(t1), Duration::from_secs(2));
    assert_eq!(clock.epoch_ms() - e1, 2_000);
}

#[test]
fn fake_clock_clones_share_time() {
    let a = FakeClock::new();
    let b = a.clone();
    let t1 = a.now();
    b.advance_ms(500);
    assert_eq!(a.now().duration_since(t1), Duration::from_millis(500));
}

#[test]
fn fake_clock_epoch_can_be_pinned() {
    let clock = FakeClock::default();
    clock.set_epoch_ms(42);
    assert_eq!(clock.epoch_ms(), 42);
}
