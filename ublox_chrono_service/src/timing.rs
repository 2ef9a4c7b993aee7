//! Sector and lap state machine.
//!
//! One call of [`TimingContext::on_position`] per decoded sample. The call
//! never blocks and never fails.

use crate::gates::GateTable;
use crate::geometry::crosses;
use crate::timespec::{MonotonicInstant, elapsed, to_tenths};
use chrono_common::coord::Coordinate;
use chrono_common::record::Chrono;
use tracing::{debug, trace};

/// A decoded receiver position and the instant it was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampedPosition {
    pub coord: Coordinate,
    pub timestamp: MonotonicInstant,
}

impl TimestampedPosition {
    pub const fn new(coord: Coordinate, timestamp: MonotonicInstant) -> Self {
        Self { coord, timestamp }
    }
}

/// All mutable timing state of a running service.
///
/// `last_coord` is only used for the crossing test; it is updated on every
/// sample, crossing or not.
#[derive(Debug, Clone)]
pub struct TimingContext {
    chrono: Chrono,
    gates: GateTable,
    last_coord: Coordinate,
    sector_start: MonotonicInstant,
    lap_start: MonotonicInstant,
}

impl TimingContext {
    /// Fresh context with both clocks at the clock origin and the previous
    /// position at `(0, 0)`.
    pub fn new(gates: GateTable) -> Self {
        Self::starting_at(gates, MonotonicInstant::ORIGIN)
    }

    /// Fresh context whose sector and lap clocks start at `start`.
    pub fn starting_at(gates: GateTable, start: MonotonicInstant) -> Self {
        Self {
            chrono: Chrono::default(),
            gates,
            last_coord: Coordinate::default(),
            sector_start: start,
            lap_start: start,
        }
    }

    /// Feed one sample. Returns `true` if it crossed the expected gate.
    pub fn on_position(&mut self, sample: TimestampedPosition) -> bool {
        let now = sample.timestamp;
        let lap_span = elapsed(now, self.lap_start);
        // The monotonic clock never runs behind the lap start.
        debug_assert!(!lap_span.is_negative(), "sample before lap start");
        self.chrono.current_lap_time = to_tenths(lap_span) as u32;

        let gate = self.gates.current();
        if !crosses(self.last_coord, sample.coord, gate.a, gate.b) {
            trace!(
                lon = sample.coord.lon,
                lat = sample.coord.lat,
                lap_time = self.chrono.current_lap_time,
                "no crossing"
            );
            self.last_coord = sample.coord;
            return false;
        }

        let sector_time = to_tenths(elapsed(now, self.sector_start));
        self.sector_start = now;

        let index = self.gates.current_index();
        let lap_n = self.chrono.current_lap_n;
        let gate = self.gates.current_mut();

        self.chrono.previous_sector_delta_time = sector_time - gate.previous_time;
        if gate.best_time == 0 || sector_time < gate.best_time {
            gate.best_time = sector_time;
            gate.best_time_lap = lap_n;
        }
        gate.previous_time = sector_time;

        debug!(
            gate = index,
            sector_time,
            delta = self.chrono.previous_sector_delta_time,
            "sector closed"
        );

        if self.gates.at_finish() {
            self.complete_lap(now);
        }
        self.gates.advance();
        self.last_coord = sample.coord;
        true
    }

    fn complete_lap(&mut self, now: MonotonicInstant) {
        let chrono = &mut self.chrono;
        let lap_time = chrono.current_lap_time;

        if chrono.best_lap_time == 0 || lap_time < chrono.best_lap_time {
            chrono.best_lap_time = lap_time;
            chrono.best_lap_n = chrono.current_lap_n;
        }
        chrono.previous_lap_time = lap_time;
        chrono.current_lap_time = 0;
        chrono.current_lap_n = chrono.current_lap_n.wrapping_add(1);
        self.lap_start = now;

        debug!(
            lap = chrono.current_lap_n,
            lap_time,
            best = chrono.best_lap_time,
            "lap completed"
        );
    }

    /// The record to publish.
    #[inline]
    pub fn chrono(&self) -> &Chrono {
        &self.chrono
    }

    #[inline]
    pub fn gates(&self) -> &GateTable {
        &self.gates
    }

    #[inline]
    pub fn last_coord(&self) -> Coordinate {
        self.last_coord
    }
}
