//! One-shot timers that can be called off before they fire.

use std::io;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, RecvTimeoutError, Sender};
use log::trace;

/// Arms one-shot actions on their own timer thread.
pub struct SilenceDeadline;

impl SilenceDeadline {
    /// Run `action` once `after` has elapsed, unless the returned handle is
    /// cancelled or dropped first.
    pub fn arm<F>(after: Duration, action: F) -> io::Result<DeadlineHandle>
    where
        F: FnOnce() + Send + 'static,
    {
        let (cancel, cancelled) = bounded::<()>(1);
        thread::Builder::new()
            .name("silence-deadline".into())
            .spawn(move || match cancelled.recv_timeout(after) {
                Err(RecvTimeoutError::Timeout) => action(),
                Ok(()) | Err(RecvTimeoutError::Disconnected) => trace!("deadline cancelled"),
            })?;
        Ok(DeadlineHandle { cancel })
    }
}

/// Cancellation token for an armed deadline. Dropping it cancels as well.
#[derive(Debug)]
pub struct DeadlineHandle {
    cancel: Sender<()>,
}

impl DeadlineHandle {
    pub fn cancel(self) {
        // the timer may already have fired and hung up
        let _ = self.cancel.try_send(());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counter() -> (Arc<AtomicUsize>, impl FnOnce() + Send + 'static) {
        let fired = Arc::new(AtomicUsize::new(0));
        let action = {
            let fired = Arc::clone(&fired);
            move || {
                fired.fetch_add(1, Ordering::SeqCst);
            }
        };
        (fired, action)
    }

    #[test]
    fn test_fires_after_duration() {
        let (fired, action) = counter();
        let handle = SilenceDeadline::arm(Duration::from_millis(20), action).unwrap();
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        thread::sleep(Duration::from_millis(200));
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        handle.cancel();
    }

    #[test]
    fn test_cancel_prevents_firing() {
        let (fired, action) = counter();
        let handle = SilenceDeadline::arm(Duration::from_millis(100), action).unwrap();
        handle.cancel();
        thread::sleep(Duration::from_millis(250));
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_drop_prevents_firing() {
        let (fired, action) = counter();
        drop(SilenceDeadline::arm(Duration::from_millis(100), action).unwrap());
        thread::sleep(Duration::from_millis(250));
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
