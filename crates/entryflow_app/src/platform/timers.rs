use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use entryflow_core::Msg;

use super::app::AppEvent;

/// Owned handle to a periodic worker thread. Cancelling (or dropping) the
/// handle stops the worker before its next firing; a tick already queued on
/// the channel is filtered by the core state machine instead.
pub(crate) struct TimerHandle {
    cancelled: Arc<AtomicBool>,
}

impl TimerHandle {
    pub(crate) fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Spawns a worker that sends `msg` every `period` until cancelled or the
/// receiving side goes away.
pub(crate) fn spawn_repeating(
    period: Duration,
    event_tx: mpsc::Sender<AppEvent>,
    msg: Msg,
) -> TimerHandle {
    let cancelled = Arc::new(AtomicBool::new(false));
    let flag = cancelled.clone();
    thread::spawn(move || loop {
        thread::sleep(period);
        if flag.load(Ordering::Relaxed) {
            break;
        }
        if event_tx.send(AppEvent::Core(msg.clone())).is_err() {
            break;
        }
    });
    TimerHandle { cancelled }
}
