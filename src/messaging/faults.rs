use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender, TryRecvError};
use log::error;

use crate::error::PlayError;

/// Sending half handed to the audio stream's error callback.
#[derive(Clone)]
pub struct FaultSender {
    sender: Sender<cpal::StreamError>,
}

impl FaultSender {
    /// Report a device fault. Never blocks, so it is safe on audio threads.
    pub fn report(&self, fault: cpal::StreamError) {
        error!("audio stream fault: {}", fault);
        // the session may already be shutting down
        let _ = self.sender.send(fault);
    }
}

/// Receiving half watched by the note scheduler.
pub struct Faults {
    receiver: Receiver<cpal::StreamError>,
    // keeps the channel open so waits time out instead of disconnecting
    _sender: Sender<cpal::StreamError>,
}

/// Create a connected fault sender/receiver pair.
pub fn fault_channel() -> (FaultSender, Faults) {
    let (sender, receiver) = unbounded();
    (
        FaultSender {
            sender: sender.clone(),
        },
        Faults {
            receiver,
            _sender: sender,
        },
    )
}

impl Faults {
    /// Return the first reported fault, if any, without waiting.
    pub fn check(&self) -> Result<(), PlayError> {
        match self.receiver.try_recv() {
            Ok(fault) => Err(PlayError::DeviceFault(fault)),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => Ok(()),
        }
    }

    /// Block for `duration`, returning early only if a fault arrives.
    pub fn wait(&self, duration: Duration) -> Result<(), PlayError> {
        let start = Instant::now();
        match self.receiver.recv_timeout(duration) {
            Ok(fault) => Err(PlayError::DeviceFault(fault)),
            Err(RecvTimeoutError::Timeout) => Ok(()),
            Err(RecvTimeoutError::Disconnected) => {
                thread::sleep(duration.saturating_sub(start.elapsed()));
                Ok(())
            }
        }
    }
}
