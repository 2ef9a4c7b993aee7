//! Sector and lap bookkeeping over scripted sample sequences.

use chrono_common::coord::Coordinate;
use proptest::prelude::*;
use ublox_chrono_service::timespec::from_tenths;
use ublox_chrono_service::{GateTable, MonotonicInstant, TimestampedPosition, TimingContext};

fn c(lon: i32, lat: i32) -> Coordinate {
    Coordinate::new(lon, lat)
}

fn sample(lon: i32, lat: i32, tenths: i32) -> TimestampedPosition {
    TimestampedPosition::new(c(lon, lat), MonotonicInstant::from_origin(from_tenths(tenths)))
}

fn three_gate_track() -> TimingContext {
    let gates = GateTable::new([
        (c(1, 2), c(3, 4)),
        (c(5, 6), c(7, 8)),
        (c(-1, -2), c(-3, -4)),
    ])
    .unwrap();
    TimingContext::new(gates)
}

#[test]
fn test_scripted_lap() {
    let mut ctx = three_gate_track();

    // 1: no crossing, live lap time only
    assert!(!ctx.on_position(sample(2, 1, 123)));
    assert_eq!(ctx.chrono().current_lap_time, 123);
    assert_eq!(ctx.gates().current_index(), 0);

    // 2: crosses gate 0
    assert!(ctx.on_position(sample(2, 5, 456)));
    assert_eq!(ctx.gates()[0].previous_time, 456);
    assert_eq!(ctx.gates()[0].best_time, 456);
    assert_eq!(ctx.chrono().previous_sector_delta_time, 456);
    assert_eq!(ctx.gates().current_index(), 1);

    // 3: runs parallel to gate 1
    assert!(!ctx.on_position(sample(4, 7, 1000)));
    assert_eq!(ctx.gates().current_index(), 1);

    // 4: crosses gate 1
    assert!(ctx.on_position(sample(8, 7, 1500)));
    assert_eq!(ctx.gates()[1].previous_time, 1044);
    assert_eq!(ctx.gates()[1].best_time, 1044);
    assert_eq!(ctx.chrono().previous_sector_delta_time, 1044);
    assert_eq!(ctx.gates().current_index(), 2);

    // 5: heading towards the finish
    assert!(!ctx.on_position(sample(2, -3, 2200)));
    assert_eq!(ctx.chrono().current_lap_time, 2200);

    // 6: crosses the finish line
    assert!(ctx.on_position(sample(-3, -3, 3000)));
    let chrono = *ctx.chrono();
    assert_eq!(chrono.current_lap_time, 0);
    assert_eq!(chrono.current_lap_n, 1);
    assert_eq!(chrono.best_lap_time, 3000);
    assert_eq!(chrono.previous_lap_time, 3000);
    assert_eq!(chrono.best_lap_n, 0);
    assert_eq!(ctx.gates().current_index(), 0);
    assert_eq!(ctx.gates()[2].previous_time, 1500);
    assert_eq!(ctx.gates()[2].best_time, 1500);

    // 7: moves away, lap clock restarted at the finish
    assert!(!ctx.on_position(sample(-3, 3, 3100)));
    assert_eq!(ctx.chrono().current_lap_time, 100);

    // 8: crosses gate 0 again with a faster sector
    assert!(ctx.on_position(sample(4, 3, 3200)));
    let chrono = *ctx.chrono();
    assert_eq!(chrono.previous_sector_delta_time, 200 - 456);
    assert_eq!(chrono.current_lap_time, 200);
    assert_eq!(ctx.gates()[0].previous_time, 200);
    assert_eq!(ctx.gates()[0].best_time, 200);
    assert_eq!(ctx.gates()[0].best_time_lap, 1);
    assert_eq!(ctx.gates().current_index(), 1);
}

#[test]
fn test_single_gate_every_crossing_is_a_lap() {
    let gates = GateTable::new([(c(0, -10), c(0, 10))]).unwrap();
    let mut ctx = TimingContext::new(gates);

    // Start on the far side so the first move crosses.
    ctx.on_position(sample(-5, 0, 10));

    let mut lon = -5;
    for lap in 1..=5u16 {
        lon = -lon;
        assert!(ctx.on_position(sample(lon, 0, 10 + 100 * i32::from(lap))));
        assert_eq!(ctx.chrono().current_lap_n, lap);
        assert_eq!(ctx.gates().current_index(), 0);
        assert_eq!(ctx.chrono().current_lap_time, 0);
    }

    // First lap ran from the origin to t=110, later ones 100 each.
    assert_eq!(ctx.chrono().previous_lap_time, 100);
    assert_eq!(ctx.chrono().best_lap_time, 100);
    assert_eq!(ctx.chrono().best_lap_n, 1);
    assert_eq!(ctx.gates()[0].best_time, 100);
    assert_eq!(ctx.gates()[0].previous_time, 100);
}

#[test]
fn test_sentinel_replaced_by_slower_first_time() {
    let gates = GateTable::new([(c(0, -10), c(0, 10))]).unwrap();
    let mut ctx = TimingContext::new(gates);

    ctx.on_position(sample(-5, 0, 0));
    assert!(ctx.on_position(sample(5, 0, 9000)));

    // Any first time replaces the 0 sentinel, however long it is.
    assert_eq!(ctx.chrono().best_lap_time, 9000);
    assert_eq!(ctx.gates()[0].best_time, 9000);

    // A slower lap does not replace a real best.
    assert!(ctx.on_position(sample(-5, 0, 18_500)));
    assert_eq!(ctx.chrono().previous_lap_time, 9500);
    assert_eq!(ctx.chrono().best_lap_time, 9000);
    assert_eq!(ctx.chrono().best_lap_n, 0);
    assert_eq!(ctx.gates()[0].best_time, 9000);
    assert_eq!(ctx.chrono().previous_sector_delta_time, 500);
}

#[test]
fn test_crossing_out_of_order_gate_is_ignored() {
    let mut ctx = three_gate_track();

    // Approach from the east, clear of gate 0.
    assert!(!ctx.on_position(sample(10, 7, 5)));
    assert!(!ctx.on_position(sample(4, 7, 10)));

    // Crosses gate 1 while gate 0 is expected.
    assert!(!ctx.on_position(sample(8, 7, 20)));
    assert_eq!(ctx.gates().current_index(), 0);
    assert!(ctx.gates().segments().iter().all(|g| g.previous_time == 0));
}

proptest! {
    #[test]
    fn non_crossing_samples_only_move_live_lap_time(
        steps in prop::collection::vec((20i32..100, 20i32..100, 1i32..50), 1..64),
    ) {
        // Every sample stays in the quadrant away from all three gates.
        let mut ctx = three_gate_track();
        ctx.on_position(sample(50, 50, 0));
        let gates_before = ctx.gates().clone();

        let mut t = 0;
        for (lon, lat, dt) in steps {
            t += dt;
            prop_assert!(!ctx.on_position(sample(lon, lat, t)));
            prop_assert_eq!(ctx.chrono().current_lap_time, t as u32);
        }

        let chrono = ctx.chrono();
        prop_assert_eq!(ctx.gates(), &gates_before);
        prop_assert_eq!(chrono.current_lap_n, 0);
        prop_assert_eq!(chrono.best_lap_time, 0);
        prop_assert_eq!(chrono.previous_lap_time, 0);
        prop_assert_eq!(chrono.previous_sector_delta_time, 0);
    }
}
