//! Disconnected-state blink loop.
//!
//! While offline, a transient thread alternates the two indicator icons so
//! the tray keeps drawing attention. Both frames carry the "Disconnected"
//! tooltip, so hover text never flips mid-blink.

use crate::status::{IconVariant, StatusSink};
use crossbeam_channel::{Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

/// Tooltip carried by every frame the blink loop emits.
const BLINK_TOOLTIP: &str = "Disconnected";

/// Handle to a spawned blink loop.
pub struct BlinkHandle {
    active: Arc<AtomicBool>,
    done: Receiver<()>,
}

impl BlinkHandle {
    /// Spawn a blink loop on its own thread.
    ///
    /// The loop toggles the icon every `interval` until [`stop`](Self::stop)
    /// clears the active flag or `connected` flips true. On exit it forces
    /// one final Disconnected frame, so it can never end on the wrong half
    /// of the toggle.
    pub fn spawn(
        sink: Arc<dyn StatusSink>,
        connected: Arc<AtomicBool>,
        interval: Duration,
    ) -> Self {
        let active = Arc::new(AtomicBool::new(true));
        let (done_tx, done_rx) = crossbeam_channel::bounded(1);
        let flag = active.clone();
        thread::spawn(move || {
            // BlinkState lives and dies with this loop.
            let mut blink_on = false;
            while flag.load(Ordering::SeqCst) && !connected.load(Ordering::SeqCst) {
                blink_on = !blink_on;
                let variant = if blink_on {
                    IconVariant::Disconnected
                } else {
                    IconVariant::Connected
                };
                sink.set_icon(variant, BLINK_TOOLTIP);
                thread::sleep(interval);
            }
            // Leave the disconnected icon showing whatever the toggle
            // parity was when the loop ended.
            sink.set_icon(IconVariant::Disconnected, BLINK_TOOLTIP);
            flag.store(false, Ordering::SeqCst);
            let _ = done_tx.send(());
        });
        Self {
            active,
            done: done_rx,
        }
    }

    /// Whether the loop is still live.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Signal the loop to exit and wait for it, bounded by `wait`.
    ///
    /// Best-effort: if the loop is mid-sleep longer than `wait`, it keeps
    /// winding down on its own after this returns.
    pub fn stop(&mut self, wait: Duration) {
        self.active.store(false, Ordering::SeqCst);
        match self.done.recv_timeout(wait) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {}
            Err(RecvTimeoutError::Timeout) => {
                crate::verbose!("blink: loop did not stop within {wait:?}");
            }
        }
    }
}
