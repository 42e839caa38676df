use super::NotificationCenter;
use crate::models::NoticeDraft;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// How often a pending reminder re-checks its cancellation flag.
const CANCEL_POLL_STEP: Duration = Duration::from_millis(50);

/// Handle to a scheduled one-shot reminder.
///
/// `cancel` stops the reminder before it fires; dropping the handle detaches
/// the timer without cancelling it.
pub struct ReminderHandle {
    cancelled: Arc<AtomicBool>,
    fired: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl ReminderHandle {
    /// Cancel the reminder and wait for its timer thread to exit.
    pub fn cancel(mut self) {
        self.cancelled.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Whether the reminder already fired.
    pub fn fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }
}

pub(super) fn spawn(
    center: Arc<NotificationCenter>,
    delay: Duration,
    draft: NoticeDraft,
) -> ReminderHandle {
    let cancelled = Arc::new(AtomicBool::new(false));
    let fired = Arc::new(AtomicBool::new(false));

    let cancel_flag = Arc::clone(&cancelled);
    let fired_flag = Arc::clone(&fired);

    let handle = thread::spawn(move || {
        let deadline = Instant::now() + delay;
        loop {
            if cancel_flag.load(Ordering::SeqCst) {
                return;
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            thread::sleep(remaining.min(CANCEL_POLL_STEP));
        }
        center.show(draft);
        fired_flag.store(true, Ordering::SeqCst);
    });

    ReminderHandle {
        cancelled,
        fired,
        handle: Some(handle),
    }
}
