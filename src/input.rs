//! Raw-mode terminal keyboard for interactive play.

use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use log::warn;

use crate::core::scheduler::{KeyPoll, KeySource};

/// Keeps the terminal in raw mode (no echo, no line buffering) for as long
/// as it lives.
pub struct RawKeyboard {
    _private: (),
}

impl RawKeyboard {
    pub fn enable() -> Result<Self> {
        terminal::enable_raw_mode().context("Failed to put terminal into raw mode")?;
        Ok(Self { _private: () })
    }
}

impl Drop for RawKeyboard {
    fn drop(&mut self) {
        if let Err(err) = terminal::disable_raw_mode() {
            warn!("failed to restore terminal: {}", err);
        }
    }
}

impl KeySource for RawKeyboard {
    fn next_key(&mut self, timeout: Duration) -> Result<KeyPoll> {
        if !event::poll(timeout)? {
            return Ok(KeyPoll::Idle);
        }
        Ok(match event::read()? {
            Event::Key(key) => classify(&key),
            _ => KeyPoll::Idle,
        })
    }
}

/// Any key press, auto-repeat included, advances the song. Ctrl-C quits,
/// since raw mode no longer turns it into a signal.
fn classify(key: &KeyEvent) -> KeyPoll {
    if key.kind == KeyEventKind::Release {
        return KeyPoll::Idle;
    }
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('C') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            KeyPoll::Quit
        }
        _ => KeyPoll::Pressed,
    }
}
