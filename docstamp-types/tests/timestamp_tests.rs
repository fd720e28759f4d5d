use docstamp_types::{Clock, ManualClock, SystemClock, Timestamp};
use proptest::prelude::*;

// ── Construction ─────────────────────────────────────────────────

#[test]
fn default_is_zero() {
    assert!(Timestamp::default().is_zero());
    assert_eq!(Timestamp::default(), Timestamp::ZERO);
}

#[test]
fn now_is_after_2020() {
    // 2020-01-01T00:00:00Z
    assert!(Timestamp::now().as_millis() > 1_577_836_800_000);
}

#[test]
fn from_millis_roundtrip() {
    let ts = Timestamp::from_millis(1_700_000_000_123);
    assert_eq!(ts.as_millis(), 1_700_000_000_123);
    assert_eq!(Timestamp::from(42), Timestamp::from_millis(42));
}

#[test]
fn unsigned_millis_clamps_negative() {
    assert_eq!(Timestamp::from_millis(-5).as_unsigned_millis(), 0);
    assert_eq!(Timestamp::from_millis(5).as_unsigned_millis(), 5);
}

#[test]
fn ordering_follows_millis() {
    assert!(Timestamp::from_millis(1) < Timestamp::from_millis(2));
}

#[test]
fn display_shows_millis() {
    assert_eq!(Timestamp::from_millis(17).to_string(), "17ms");
}

#[test]
fn serde_is_plain_number() {
    let ts = Timestamp::from_millis(1_700_000_000_000);
    assert_eq!(serde_json::to_string(&ts).unwrap(), "1700000000000");
    let back: Timestamp = serde_json::from_str("1700000000000").unwrap();
    assert_eq!(back, ts);
}

// ── Clocks ───────────────────────────────────────────────────────

#[test]
fn system_clock_tracks_wall_time() {
    let before = Timestamp::now();
    let observed = SystemClock.now();
    let after = Timestamp::now();
    assert!(before <= observed && observed <= after);
}

#[test]
fn manual_clock_is_frozen_until_moved() {
    let clock = ManualClock::new(Timestamp::from_millis(1000));
    assert_eq!(clock.now(), Timestamp::from_millis(1000));
    assert_eq!(clock.now(), Timestamp::from_millis(1000));
}

#[test]
fn manual_clock_advance_and_set() {
    let clock = ManualClock::new(Timestamp::from_millis(1000));
    assert_eq!(clock.advance(250), Timestamp::from_millis(1250));
    assert_eq!(clock.now(), Timestamp::from_millis(1250));
    clock.set(Timestamp::from_millis(5));
    assert_eq!(clock.now(), Timestamp::from_millis(5));
}

#[test]
fn manual_clock_advance_wraps_consistently() {
    let clock = ManualClock::new(Timestamp::from_millis(i64::MAX));
    let advanced = clock.advance(1);
    assert_eq!(advanced, Timestamp::from_millis(i64::MIN));
    assert_eq!(clock.now(), advanced);
}

#[test]
fn clock_is_object_safe() {
    let clocks: Vec<Box<dyn Clock>> = vec![
        Box::new(SystemClock),
        Box::new(ManualClock::new(Timestamp::from_millis(9))),
    ];
    assert!(clocks.iter().all(|clock| !clock.now().is_zero()));
}

proptest! {
    #[test]
    fn only_zero_is_zero(millis in any::<i64>()) {
        prop_assert_eq!(Timestamp::from_millis(millis).is_zero(), millis == 0);
    }

    #[test]
    fn advance_adds_exactly(start in 0i64..1_000_000_000, step in 0i64..1_000_000) {
        let clock = ManualClock::new(Timestamp::from_millis(start));
        prop_assert_eq!(clock.advance(step).as_millis(), start + step);
    }
}
