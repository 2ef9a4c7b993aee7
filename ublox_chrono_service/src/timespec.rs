//! Monotonic timestamps and tenths-of-a-second arithmetic.
//!
//! All timing state is kept in tenths of a second. Conversion truncates,
//! so sub-tenth information is dropped and never comes back.

use chrono_common::consts::TENTHS_PER_SECOND;
use nix::time::{ClockId, clock_gettime};
use std::ops::Add;

/// Nanoseconds per second.
pub const NANOS_PER_SEC: i64 = 1_000_000_000;

/// Nanoseconds per tenth of a second.
pub const NANOS_PER_TENTH: i64 = NANOS_PER_SEC / TENTHS_PER_SECOND;

/// A signed duration split like a `timespec`.
///
/// Always normalized: `0 <= nanos < NANOS_PER_SEC`, the sign lives in
/// `secs`. `-0.3s` is `{ secs: -1, nanos: 700_000_000 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Span {
    secs: i64,
    nanos: i64,
}

impl Span {
    /// Zero-length span.
    pub const ZERO: Self = Self { secs: 0, nanos: 0 };

    /// Build a span from seconds and nanoseconds, normalizing the result.
    pub const fn new(secs: i64, nanos: i64) -> Self {
        Self {
            secs: secs + nanos.div_euclid(NANOS_PER_SEC),
            nanos: nanos.rem_euclid(NANOS_PER_SEC),
        }
    }

    /// Whole seconds (floor).
    #[inline]
    pub const fn secs(&self) -> i64 {
        self.secs
    }

    /// Sub-second remainder, always non-negative.
    #[inline]
    pub const fn nanos(&self) -> i64 {
        self.nanos
    }

    /// Whether the span is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.secs < 0
    }
}

/// A reading of the raw monotonic clock.
///
/// Only differences between instants are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct MonotonicInstant {
    since_origin: Span,
}

impl MonotonicInstant {
    /// The clock origin (all-zero reading).
    pub const ORIGIN: Self = Self {
        since_origin: Span::ZERO,
    };

    /// Build an instant from a raw clock reading.
    pub const fn new(secs: i64, nanos: i64) -> Self {
        Self {
            since_origin: Span::new(secs, nanos),
        }
    }

    /// The instant `span` after the clock origin.
    pub const fn from_origin(span: Span) -> Self {
        Self {
            since_origin: span,
        }
    }

    /// Read `CLOCK_MONOTONIC_RAW`.
    pub fn now() -> nix::Result<Self> {
        let ts = clock_gettime(ClockId::CLOCK_MONOTONIC_RAW)?;
        Ok(Self::new(i64::from(ts.tv_sec()), i64::from(ts.tv_nsec())))
    }

    /// Whole seconds of the reading.
    #[inline]
    pub const fn secs(&self) -> i64 {
        self.since_origin.secs
    }

    /// Sub-second part of the reading.
    #[inline]
    pub const fn nanos(&self) -> i64 {
        self.since_origin.nanos
    }
}

impl Add<Span> for MonotonicInstant {
    type Output = MonotonicInstant;

    fn add(self, rhs: Span) -> Self::Output {
        Self::new(self.secs() + rhs.secs, self.nanos() + rhs.nanos)
    }
}

/// `now - earlier`, borrowing a second when the nanosecond part underflows.
///
/// Non-negative whenever `now >= earlier`.
pub const fn elapsed(now: MonotonicInstant, earlier: MonotonicInstant) -> Span {
    let mut secs = now.since_origin.secs - earlier.since_origin.secs;
    let mut nanos = now.since_origin.nanos - earlier.since_origin.nanos;

    if nanos < 0 {
        nanos += NANOS_PER_SEC;
        secs -= 1;
    }

    Span { secs, nanos }
}

/// Truncate a span to whole tenths of a second.
pub const fn to_tenths(span: Span) -> i32 {
    (span.secs * TENTHS_PER_SECOND + span.nanos / NANOS_PER_TENTH) as i32
}

/// Span of `tenths` tenths of a second.
///
/// `to_tenths(from_tenths(x)) == x` for every `i32`.
pub const fn from_tenths(tenths: i32) -> Span {
    let tenths = tenths as i64;
    Span {
        secs: tenths.div_euclid(TENTHS_PER_SECOND),
        nanos: tenths.rem_euclid(TENTHS_PER_SECOND) * NANOS_PER_TENTH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_span_normalization() {
        assert_eq!(Span::new(1, 1_500_000_000), Span::new(2, 500_000_000));
        let neg = Span::new(0, -300_000_000);
        assert_eq!(neg.secs(), -1);
        assert_eq!(neg.nanos(), 700_000_000);
        assert!(neg.is_negative());
    }

    #[test]
    fn test_elapsed_without_borrow() {
        let span = elapsed(
            MonotonicInstant::new(12, 900_000_000),
            MonotonicInstant::new(10, 100_000_000),
        );
        assert_eq!(span, Span::new(2, 800_000_000));
    }

    #[test]
    fn test_elapsed_borrows_across_second_boundary() {
        let span = elapsed(
            MonotonicInstant::new(11, 100_000_000),
            MonotonicInstant::new(10, 900_000_000),
        );
        assert_eq!(span.secs(), 0);
        assert_eq!(span.nanos(), 200_000_000);
        assert_eq!(to_tenths(span), 2);
    }

    #[test]
    fn test_elapsed_of_equal_instants_is_zero() {
        let t = MonotonicInstant::new(5, 5);
        assert_eq!(elapsed(t, t), Span::ZERO);
    }

    #[test]
    fn test_to_tenths_truncates() {
        assert_eq!(to_tenths(Span::new(1, 99_999_999)), 10);
        assert_eq!(to_tenths(Span::new(1, 199_999_999)), 11);
        assert_eq!(to_tenths(Span::new(0, 999_999_999)), 9);
    }

    #[test]
    fn test_from_tenths() {
        assert_eq!(from_tenths(123), Span::new(12, 300_000_000));
        assert_eq!(from_tenths(0), Span::ZERO);
        assert_eq!(from_tenths(-5), Span::new(-1, 500_000_000));
    }

    #[test]
    fn test_instant_from_origin() {
        let t = MonotonicInstant::from_origin(from_tenths(456));
        assert_eq!(to_tenths(elapsed(t, MonotonicInstant::ORIGIN)), 456);
        assert_eq!(t + from_tenths(4), MonotonicInstant::from_origin(from_tenths(460)));
    }

    #[test]
    fn test_clock_advances() {
        let t0 = MonotonicInstant::now().unwrap();
        std::thread::sleep(std::time::Duration::from_millis(120));
        let t1 = MonotonicInstant::now().unwrap();

        let tenths = to_tenths(elapsed(t1, t0));
        assert!(tenths >= 1, "elapsed {tenths} tenths");
        assert!(!elapsed(t1, t0).is_negative());
    }

    proptest! {
        #[test]
        fn tenths_round_trip(x in any::<i32>()) {
            prop_assert_eq!(to_tenths(from_tenths(x)), x);
        }

        #[test]
        fn elapsed_is_never_negative_forward_in_time(
            secs in 0i64..1_000_000, nanos in 0i64..NANOS_PER_SEC,
            dsecs in 0i64..100_000, dnanos in 0i64..NANOS_PER_SEC,
        ) {
            let earlier = MonotonicInstant::new(secs, nanos);
            let now = earlier + Span::new(dsecs, dnanos);
            let span = elapsed(now, earlier);
            prop_assert!(!span.is_negative());
            prop_assert_eq!(span, Span::new(dsecs, dnanos));
        }
    }
}
