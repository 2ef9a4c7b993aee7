//! Even/odd sequence numbers for optimistic concurrency
//!
//! The writer moves the sequence to an odd value before touching the
//! record and to the next even value once it is done. Readers accept a
//! copy only if they saw the same even value before and after it.

/// Check if sequence is stable (even)
#[inline]
pub const fn is_stable(sequence: u64) -> bool {
    sequence % 2 == 0
}

/// Number of completed publications represented by a stable sequence
#[inline]
pub const fn publications(sequence: u64) -> u64 {
    sequence / 2
}
