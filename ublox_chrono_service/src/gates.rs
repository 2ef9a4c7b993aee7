//! Gate table: ordered sector boundaries, the last one being start/finish.

use chrono_common::consts::MAX_GATES;
use chrono_common::coord::Coordinate;
use thiserror::Error;

/// Reasons a gate table cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateTableError {
    /// A table needs at least the start/finish line.
    #[error("gate table is empty")]
    Empty,

    /// More gates than the fixed capacity.
    #[error("too many gates: {count} (max {max})")]
    TooMany { count: usize, max: usize },

    /// Both endpoints coincide; such a gate can never be properly crossed.
    #[error("gate {index} is degenerate: both endpoints at {at}")]
    Degenerate { index: usize, at: Coordinate },
}

/// One sector boundary with its per-gate timing memory.
///
/// `best_time == 0` means no sector time has been recorded yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GateSegment {
    pub a: Coordinate,
    pub b: Coordinate,
    /// Sector time of the last pass, tenths.
    pub previous_time: i32,
    /// Best sector time ending at this gate, tenths (0 = none yet).
    pub best_time: i32,
    /// Lap number during which `best_time` was set.
    pub best_time_lap: u16,
}

impl GateSegment {
    /// A gate with no timing history.
    pub const fn new(a: Coordinate, b: Coordinate) -> Self {
        Self {
            a,
            b,
            previous_time: 0,
            best_time: 0,
            best_time_lap: 0,
        }
    }
}

/// Ordered gates plus the index of the next gate expected to be crossed.
///
/// Invariant: `1 <= len() <= MAX_GATES` and `current_index < len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateTable {
    segments: heapless::Vec<GateSegment, MAX_GATES>,
    current_index: usize,
}

impl GateTable {
    /// Build a table from endpoint pairs, in crossing order.
    pub fn new<I>(endpoints: I) -> Result<Self, GateTableError>
    where
        I: IntoIterator<Item = (Coordinate, Coordinate)>,
    {
        let mut segments: heapless::Vec<GateSegment, MAX_GATES> = heapless::Vec::new();
        let mut endpoints = endpoints.into_iter().enumerate();

        while let Some((index, (a, b))) = endpoints.next() {
            if a == b {
                return Err(GateTableError::Degenerate { index, at: a });
            }
            if segments.push(GateSegment::new(a, b)).is_err() {
                return Err(GateTableError::TooMany {
                    count: index + 1 + endpoints.count(),
                    max: MAX_GATES,
                });
            }
        }

        if segments.is_empty() {
            return Err(GateTableError::Empty);
        }

        Ok(Self {
            segments,
            current_index: 0,
        })
    }

    /// Number of gates.
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Never true for a constructed table.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Index of the next gate to be crossed.
    #[inline]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Whether the next expected gate is the start/finish line.
    #[inline]
    pub fn at_finish(&self) -> bool {
        self.current_index == self.segments.len() - 1
    }

    /// The next gate to be crossed.
    #[inline]
    pub fn current(&self) -> &GateSegment {
        &self.segments[self.current_index]
    }

    #[inline]
    pub(crate) fn current_mut(&mut self) -> &mut GateSegment {
        &mut self.segments[self.current_index]
    }

    /// Move to the next gate, wrapping after start/finish.
    #[inline]
    pub(crate) fn advance(&mut self) {
        self.current_index = (self.current_index + 1) % self.segments.len();
    }

    /// All gates in crossing order.
    pub fn segments(&self) -> &[GateSegment] {
        &self.segments
    }
}

impl std::ops::Index<usize> for GateTable {
    type Output = GateSegment;

    fn index(&self, index: usize) -> &Self::Output {
        &self.segments[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate(a: (i32, i32), b: (i32, i32)) -> (Coordinate, Coordinate) {
        (Coordinate::new(a.0, a.1), Coordinate::new(b.0, b.1))
    }

    #[test]
    fn test_new_table_starts_at_first_gate() {
        let table = GateTable::new([gate((1, 2), (3, 4)), gate((5, 6), (7, 8))]).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.current_index(), 0);
        assert!(!table.at_finish());
        assert_eq!(table[1].a, Coordinate::new(5, 6));
        assert!(table.segments().iter().all(|g| g.best_time == 0 && g.previous_time == 0));
    }

    #[test]
    fn test_advance_wraps_after_finish() {
        let mut table = GateTable::new([gate((1, 2), (3, 4)), gate((5, 6), (7, 8))]).unwrap();
        table.advance();
        assert!(table.at_finish());
        table.advance();
        assert_eq!(table.current_index(), 0);
    }

    #[test]
    fn test_single_gate_is_always_finish() {
        let mut table = GateTable::new([gate((0, 0), (0, 10))]).unwrap();
        assert!(table.at_finish());
        table.advance();
        assert_eq!(table.current_index(), 0);
        assert!(table.at_finish());
    }

    #[test]
    fn test_empty_table_rejected() {
        let err = GateTable::new(std::iter::empty()).unwrap_err();
        assert_eq!(err, GateTableError::Empty);
    }

    #[test]
    fn test_too_many_gates_rejected() {
        let gates = (0..=MAX_GATES as i32).map(|i| gate((i, 0), (i, 1)));
        let err = GateTable::new(gates).unwrap_err();
        assert_eq!(
            err,
            GateTableError::TooMany {
                count: MAX_GATES + 1,
                max: MAX_GATES
            }
        );
    }

    #[test]
    fn test_too_many_reports_every_gate_past_capacity() {
        let gates = (0..MAX_GATES as i32 + 5).map(|i| gate((i, 0), (i, 1)));
        match GateTable::new(gates) {
            Err(GateTableError::TooMany { count, .. }) => assert_eq!(count, MAX_GATES + 5),
            other => panic!("expected TooMany, got {other:?}"),
        }
    }

    #[test]
    fn test_full_capacity_accepted() {
        let gates = (0..MAX_GATES as i32).map(|i| gate((i, 0), (i, 1)));
        assert_eq!(GateTable::new(gates).unwrap().len(), MAX_GATES);
    }

    #[test]
    fn test_degenerate_gate_rejected() {
        let err = GateTable::new([gate((1, 2), (3, 4)), gate((5, 5), (5, 5))]).unwrap_err();
        assert_eq!(
            err,
            GateTableError::Degenerate {
                index: 1,
                at: Coordinate::new(5, 5)
            }
        );
    }
}
