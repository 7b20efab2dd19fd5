//! Messages flowing from the audio thread back to the scheduler.

mod faults;

pub use faults::{fault_channel, FaultSender, Faults};
