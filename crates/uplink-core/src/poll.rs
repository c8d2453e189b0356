//! Periodic connectivity polling.
//!
//! One long-lived background thread: probe, feed the monitor, wait. The
//! inter-check wait doubles as the manual-check entry point; a trigger on
//! the handle's channel wakes the loop early.

use crate::config::CHECK_INTERVAL;
use crate::monitor::ConnectivityMonitor;
use crate::probe::Prober;
use crossbeam_channel::{RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Handle to the polling thread.
///
/// Dropping it disconnects the trigger channel, which the poll loop treats
/// as a shutdown signal. The frontend holds it for the process lifetime, so
/// in normal operation the poller runs until exit.
pub struct PollerHandle {
    trigger: Sender<()>,
}

impl PollerHandle {
    /// Request an immediate connectivity check.
    ///
    /// Coalesces: if a manual check is already queued, this is a no-op.
    pub fn check_now(&self) {
        let _ = self.trigger.try_send(());
    }
}

/// Periodic prober-to-monitor pump.
pub struct Poller {
    prober: Prober,
    monitor: Arc<ConnectivityMonitor>,
    interval: Duration,
}

impl Poller {
    pub fn new(prober: Prober, monitor: Arc<ConnectivityMonitor>) -> Self {
        Self {
            prober,
            monitor,
            interval: CHECK_INTERVAL,
        }
    }

    /// Override the inter-check interval (tests shrink it).
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Move the poller onto its own thread.
    ///
    /// The first check runs immediately, then one per interval plus one for
    /// every `check_now` trigger. Checks never overlap: this loop is the
    /// only caller of the prober and feeds the monitor serially.
    pub fn spawn(self) -> PollerHandle {
        let (trigger_tx, trigger_rx) = crossbeam_channel::bounded(1);
        thread::spawn(move || {
            loop {
                let reachable = self.prober.probe();
                self.monitor.record(reachable);
                match trigger_rx.recv_timeout(self.interval) {
                    Ok(()) => crate::verbose!("poll: manual check requested"),
                    Err(RecvTimeoutError::Timeout) => {}
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            crate::verbose!("poll: handle dropped, stopping");
        });
        PollerHandle {
            trigger: trigger_tx,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::ConnectivityState;
    use crate::probe::{ReachError, Reachability};
    use crate::status::ChannelSink;
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

    /// Transport whose result the test flips at will.
    struct Scripted {
        up: AtomicBool,
        checks: AtomicU32,
    }

    impl Scripted {
        fn new(up: bool) -> Arc<Self> {
            Arc::new(Self {
                up: AtomicBool::new(up),
                checks: AtomicU32::new(0),
            })
        }

        fn set_up(&self, up: bool) {
            self.up.store(up, Ordering::SeqCst);
        }

        fn checks(&self) -> u32 {
            self.checks.load(Ordering::SeqCst)
        }
    }

    impl Reachability for Scripted {
        fn check(&self, _url: &str, _timeout: Duration) -> Result<(), ReachError> {
            self.checks.fetch_add(1, Ordering::SeqCst);
            if self.up.load(Ordering::SeqCst) {
                Ok(())
            } else {
                Err(ReachError::Other("down".to_string()))
            }
        }
    }

    fn poller(transport: Arc<Scripted>, interval: Duration) -> (Arc<ConnectivityMonitor>, PollerHandle) {
        let (sink, _rx) = ChannelSink::new();
        let monitor = Arc::new(ConnectivityMonitor::with_intervals(
            Arc::new(sink),
            Duration::from_millis(5),
            Duration::from_millis(500),
        ));
        let prober = Prober::with_transport(transport)
            .with_url("http://probe.invalid")
            .with_backoff(Duration::ZERO);
        let handle = Poller::new(prober, monitor.clone())
            .with_interval(interval)
            .spawn();
        (monitor, handle)
    }

    #[test]
    fn first_check_runs_immediately() {
        let transport = Scripted::new(true);
        let (monitor, _handle) = poller(transport.clone(), Duration::from_secs(60));
        thread::sleep(Duration::from_millis(100));

        assert_eq!(transport.checks(), 1);
        assert_eq!(monitor.state(), ConnectivityState::Connected);
    }

    #[test]
    fn check_now_wakes_the_loop() {
        let transport = Scripted::new(true);
        let (monitor, handle) = poller(transport.clone(), Duration::from_secs(60));
        thread::sleep(Duration::from_millis(100));
        assert_eq!(monitor.state(), ConnectivityState::Connected);

        transport.set_up(false);
        handle.check_now();
        thread::sleep(Duration::from_millis(200));
        // The manual check ran all three attempts and flipped the state.
        assert_eq!(transport.checks(), 1 + 3);
        assert_eq!(monitor.state(), ConnectivityState::Disconnected);
        assert!(monitor.is_blinking());

        transport.set_up(true);
        handle.check_now();
        thread::sleep(Duration::from_millis(200));
        assert_eq!(monitor.state(), ConnectivityState::Connected);
        assert!(!monitor.is_blinking());
    }

    #[test]
    fn dropping_the_handle_stops_polling() {
        let transport = Scripted::new(true);
        let (_monitor, handle) = poller(transport.clone(), Duration::from_millis(10));
        thread::sleep(Duration::from_millis(50));
        drop(handle);

        thread::sleep(Duration::from_millis(50));
        let settled = transport.checks();
        thread::sleep(Duration::from_millis(100));
        assert_eq!(transport.checks(), settled);
    }
}
