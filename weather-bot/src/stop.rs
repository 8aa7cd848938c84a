use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Notify;

/// Process-wide, one-way switch tripped by `/stop`.
#[derive(Debug, Default)]
pub struct StopSwitch {
    stopped: AtomicBool,
    notify: Notify,
}

impl StopSwitch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` only for the call that actually stopped the bot.
    pub fn trigger(&self) -> bool {
        if self.stopped.swap(true, Ordering::SeqCst) {
            return false;
        }
        // Stores a permit if nobody is waiting yet.
        self.notify.notify_one();
        true
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    /// Resolves once the switch has been tripped.
    pub async fn wait(&self) {
        if self.is_stopped() {
            return;
        }
        self.notify.notified().await;
    }
}
