//! Snapshot slot layout and the seqlock protocol over it

use crate::version;
use chrono_common::record::{CHRONO_RECORD_SIZE, Chrono};
use static_assertions::const_assert_eq;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering, fence};

/// Number of 32-bit words holding the encoded record
pub const RECORD_WORDS: usize = CHRONO_RECORD_SIZE / 4;

/// Total size of the mapped region in bytes
pub const SLOT_SIZE: usize = 32;

/// Byte offset of the sequence counter inside the region
pub const SEQUENCE_OFFSET: usize = 24;

/// Mapped region layout.
///
/// The encoded `Chrono` record sits at offset 0 so readers that only know
/// the 20-byte layout keep working. The sequence counter lives after it,
/// at offset 24.
///
/// Every word is accessed atomically; the record bytes are stored in the
/// little-endian `Chrono` encoding regardless of host byte order.
#[repr(C, align(8))]
pub struct SnapshotSlot {
    record: [AtomicU32; RECORD_WORDS],
    _reserved: AtomicU32,
    sequence: AtomicU64,
}

const_assert_eq!(core::mem::size_of::<SnapshotSlot>(), SLOT_SIZE);
const_assert_eq!(core::mem::offset_of!(SnapshotSlot, record), 0);
const_assert_eq!(core::mem::offset_of!(SnapshotSlot, sequence), SEQUENCE_OFFSET);

impl SnapshotSlot {
    /// Create a zeroed slot (every field at its sentinel)
    pub const fn new() -> Self {
        Self {
            record: [const { AtomicU32::new(0) }; RECORD_WORDS],
            _reserved: AtomicU32::new(0),
            sequence: AtomicU64::new(0),
        }
    }

    /// Current sequence value
    #[inline]
    pub fn sequence(&self) -> u64 {
        self.sequence.load(Ordering::Acquire)
    }

    /// Publish a record. Single writer only.
    pub fn store(&self, chrono: &Chrono) {
        let bytes = chrono.to_le_bytes();
        let seq = self.sequence.load(Ordering::Relaxed);

        // Odd: write in progress
        self.sequence.store(seq.wrapping_add(1), Ordering::Relaxed);
        fence(Ordering::Release);

        for (word, chunk) in self.record.iter().zip(bytes.chunks_exact(4)) {
            let raw = u32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            word.store(raw, Ordering::Relaxed);
        }

        // Even: committed
        self.sequence.store(seq.wrapping_add(2), Ordering::Release);
    }

    /// Take one consistent copy, or `None` if a write overlapped the attempt
    pub fn try_load(&self) -> Option<(u64, Chrono)> {
        let before = self.sequence.load(Ordering::Acquire);
        if !version::is_stable(before) {
            return None;
        }

        let mut bytes = [0u8; CHRONO_RECORD_SIZE];
        for (word, chunk) in self.record.iter().zip(bytes.chunks_exact_mut(4)) {
            chunk.copy_from_slice(&word.load(Ordering::Relaxed).to_ne_bytes());
        }

        fence(Ordering::Acquire);
        let after = self.sequence.load(Ordering::Relaxed);

        (before == after).then(|| (after, Chrono::from_le_bytes(&bytes)))
    }
}

impl Default for SnapshotSlot {
    fn default() -> Self {
        Self::new()
    }
}
