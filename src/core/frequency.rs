//! Frequency cell shared between the note scheduler and the audio callback.

use std::sync::atomic::{AtomicU64, Ordering};

/// Holds the currently sounding frequency in Hz.
///
/// Backed by an `AtomicU64` holding the bits of the `f64`, so a read can
/// never observe a torn value and never waits on a writer.
#[derive(Debug)]
pub struct Frequency {
    bits: AtomicU64,
}

impl Frequency {
    pub fn new(hz: f64) -> Self {
        Self {
            bits: AtomicU64::new(hz.to_bits()),
        }
    }

    #[inline]
    pub fn read(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }

    #[inline]
    pub fn write(&self, hz: f64) {
        self.bits.store(hz.to_bits(), Ordering::Release);
    }
}

impl Default for Frequency {
    fn default() -> Self {
        Self::new(0.0)
    }
}
