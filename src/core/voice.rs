//! The single voice both schedulers drive and the audio callback renders.

use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use log::{debug, trace};

use super::deadline::{DeadlineHandle, SilenceDeadline};
use super::frequency::Frequency;
use crate::note::{Note, REST};

#[derive(Default)]
struct Pending {
    /// Bumped on every note, so a deadline can tell whether it is still current.
    generation: u64,
    deadline: Option<DeadlineHandle>,
}

/// Current frequency plus the at-most-one outstanding silence deadline.
///
/// The render callback only reads [`Frequency`]. The `pending` lock is
/// shared between the note scheduler and deadline timers, never with the
/// callback.
pub struct Voice {
    frequency: Arc<Frequency>,
    pending: Mutex<Pending>,
}

impl Voice {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            frequency: Arc::new(Frequency::default()),
            pending: Mutex::new(Pending::default()),
        })
    }

    /// Handle for the tone generator.
    pub fn frequency_cell(&self) -> Arc<Frequency> {
        Arc::clone(&self.frequency)
    }

    pub fn frequency(&self) -> f64 {
        self.frequency.read()
    }

    pub fn set_frequency(&self, hz: f64) {
        self.frequency.write(hz);
    }

    pub fn silence(&self) {
        self.set_frequency(REST);
    }

    /// Start `note` and arm a deadline that silences it after its duration.
    /// Any earlier deadline is cancelled and can no longer silence this note.
    pub fn play_note(self: &Arc<Self>, note: &Note) -> io::Result<()> {
        let mut pending = self.lock_pending();
        pending.generation = pending.generation.wrapping_add(1);
        let generation = pending.generation;

        self.frequency.write(note.frequency);
        if let Some(previous) = pending.deadline.take() {
            trace!("deadline {} superseded", generation.wrapping_sub(1));
            previous.cancel();
        }

        let voice: Weak<Voice> = Arc::downgrade(self);
        pending.deadline = Some(SilenceDeadline::arm(note.duration, move || {
            if let Some(voice) = voice.upgrade() {
                voice.expire(generation);
            }
        })?);
        debug!("note {:.4} Hz for {:?}", note.frequency, note.duration);
        Ok(())
    }

    /// Whether a silence deadline is armed and has not fired yet.
    #[cfg(test)]
    pub fn has_pending_deadline(&self) -> bool {
        self.lock_pending().deadline.is_some()
    }

    fn expire(&self, generation: u64) {
        let mut pending = self.lock_pending();
        if pending.generation != generation {
            trace!("stale deadline {} ignored", generation);
            return;
        }
        pending.deadline = None;
        self.frequency.write(REST);
        trace!("deadline {} silenced the voice", generation);
    }

    fn lock_pending(&self) -> MutexGuard<'_, Pending> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
