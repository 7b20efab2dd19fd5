//! Note scheduling: decides when the voice changes frequency.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{debug, info};

use super::song::Song;
use super::voice::Voice;
use crate::error::PlayError;
use crate::messaging::Faults;

/// How often the interactive loop wakes up to look for device faults.
pub const POLL_INTERVAL: Duration = Duration::from_millis(16);

/// Outcome of waiting for a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPoll {
    Pressed,
    Idle,
    Quit,
}

/// Source of key presses for interactive play.
pub trait KeySource {
    /// Wait up to `timeout` for the next key press.
    fn next_key(&mut self, timeout: Duration) -> Result<KeyPoll>;
}

/// Suspends the scheduler between autoplay notes.
pub trait Pacer {
    fn wait(&mut self, duration: Duration) -> Result<(), PlayError>;
}

impl Pacer for &Faults {
    fn wait(&mut self, duration: Duration) -> Result<(), PlayError> {
        Faults::wait(*self, duration)
    }
}

/// Play the song one note per key press, looping forever until the key
/// source asks to quit or the device faults.
pub fn interactive<K: KeySource>(
    song: &Song,
    voice: &Arc<Voice>,
    keys: &mut K,
    faults: &Faults,
) -> Result<()> {
    let mut notes = song.notes().iter().cycle();
    loop {
        faults.check()?;
        match keys.next_key(POLL_INTERVAL)? {
            KeyPoll::Idle => {}
            KeyPoll::Pressed => {
                // non-empty songs make the cycle endless
                let Some(note) = notes.next() else {
                    break;
                };
                voice
                    .play_note(note)
                    .context("Failed to arm silence deadline")?;
            }
            KeyPoll::Quit => {
                info!("quit requested");
                break;
            }
        }
    }
    voice.silence();
    Ok(())
}

/// Play every note of the song once, holding each for its duration, then
/// fall silent.
pub fn autoplay<P: Pacer>(song: &Song, voice: &Voice, pacer: &mut P) -> Result<(), PlayError> {
    info!(
        "autoplaying '{}': {} notes, {:.2} seconds",
        song.name(),
        song.len(),
        song.total_duration().as_secs_f64()
    );
    for (index, note) in song.notes().iter().enumerate() {
        if note.is_rest() {
            debug!("note {}: rest for {:?}", index, note.duration);
        } else {
            debug!("note {}: {:.4} Hz for {:?}", index, note.frequency, note.duration);
        }
        voice.set_frequency(note.frequency);
        if let Err(err) = pacer.wait(note.duration) {
            voice.silence();
            return Err(err);
        }
    }
    voice.silence();
    Ok(())
}
