//! Connectivity state machine.
//!
//! Converts raw probe results into edge-triggered Connected/Disconnected
//! transitions and drives the indicator: icon and label updates, blink loop
//! start and stop. Repeated identical results are no-ops, so the icon never
//! churns while the state is steady.

use crate::blink::BlinkHandle;
use crate::config::{BLINK_INTERVAL, BLINK_STOP_WAIT};
use crate::status::{IconVariant, StatusSink};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// The two-state connectivity model.
///
/// Starts Disconnected, so the first probe result only causes a transition
/// if the network is actually up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectivityState {
    Connected,
    Disconnected,
}

impl ConnectivityState {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectivityState::Connected)
    }

    /// Tooltip text for the steady (non-blinking) icon.
    pub fn tooltip(&self) -> &'static str {
        match self {
            ConnectivityState::Connected => "Connected",
            ConnectivityState::Disconnected => "Disconnected",
        }
    }

    /// Label shown in the status menu entry.
    pub fn status_label(&self) -> &'static str {
        match self {
            ConnectivityState::Connected => "Status: Connected",
            ConnectivityState::Disconnected => "Status: Disconnected",
        }
    }
}

impl fmt::Display for ConnectivityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tooltip())
    }
}

/// Edge-triggered connectivity monitor.
///
/// Writer side of the shared state: the poller feeds results in through
/// [`record`](Self::record), the blink loop only reads the atomic connected
/// flag.
pub struct ConnectivityMonitor {
    state: Mutex<ConnectivityState>,
    // Shared with the blink loop; mirrors `state` for lock-free reads.
    connected: Arc<AtomicBool>,
    blinker: Mutex<Option<BlinkHandle>>,
    sink: Arc<dyn StatusSink>,
    blink_interval: Duration,
    stop_wait: Duration,
}

impl ConnectivityMonitor {
    /// Monitor with the built-in blink timing.
    pub fn new(sink: Arc<dyn StatusSink>) -> Self {
        Self::with_intervals(sink, BLINK_INTERVAL, BLINK_STOP_WAIT)
    }

    /// Monitor with custom blink timing (tests shrink the intervals).
    pub fn with_intervals(
        sink: Arc<dyn StatusSink>,
        blink_interval: Duration,
        stop_wait: Duration,
    ) -> Self {
        Self {
            state: Mutex::new(ConnectivityState::Disconnected),
            connected: Arc::new(AtomicBool::new(false)),
            blinker: Mutex::new(None),
            sink,
            blink_interval,
            stop_wait,
        }
    }

    /// Current recorded state.
    pub fn state(&self) -> ConnectivityState {
        *self.state.lock().unwrap()
    }

    /// Whether a blink loop is currently live.
    pub fn is_blinking(&self) -> bool {
        self.blinker
            .lock()
            .unwrap()
            .as_ref()
            .is_some_and(|blinker| blinker.is_active())
    }

    /// Feed one probe result into the state machine.
    ///
    /// No-op unless the result differs from the recorded state. The state
    /// lock is held for the whole step, so transitions and the blinker
    /// start/stop they imply are serialized.
    pub fn record(&self, reachable: bool) {
        let next = if reachable {
            ConnectivityState::Connected
        } else {
            ConnectivityState::Disconnected
        };

        let mut state = self.state.lock().unwrap();
        if *state == next {
            return;
        }
        *state = next;
        self.connected.store(reachable, Ordering::SeqCst);
        crate::verbose!("monitor: state -> {next}");

        match next {
            ConnectivityState::Connected => {
                // Stop blinking before the steady icon goes out, so the
                // blinker's forced final frame cannot land on top of it.
                self.stop_blinking();
                self.sink.set_icon(IconVariant::Connected, next.tooltip());
                self.sink.set_status_label(next.status_label());
            }
            ConnectivityState::Disconnected => {
                self.sink
                    .set_icon(IconVariant::Disconnected, next.tooltip());
                self.sink.set_status_label(next.status_label());
                self.start_blinking();
            }
        }
    }

    /// Start the blink loop unless one is already live.
    fn start_blinking(&self) {
        let mut blinker = self.blinker.lock().unwrap();
        if blinker.as_ref().is_some_and(|blinker| blinker.is_active()) {
            return;
        }
        *blinker = Some(BlinkHandle::spawn(
            self.sink.clone(),
            self.connected.clone(),
            self.blink_interval,
        ));
    }

    /// Signal the blink loop to exit and wait (bounded) for it to finish.
    fn stop_blinking(&self) {
        if let Some(mut blinker) = self.blinker.lock().unwrap().take() {
            blinker.stop(self.stop_wait);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::{ChannelSink, IndicatorEvent};
    use crossbeam_channel::Receiver;

    fn monitor() -> (ConnectivityMonitor, Receiver<IndicatorEvent>) {
        let (sink, rx) = ChannelSink::new();
        let monitor = ConnectivityMonitor::with_intervals(
            Arc::new(sink),
            Duration::from_millis(5),
            Duration::from_millis(500),
        );
        (monitor, rx)
    }

    fn status_labels(rx: &Receiver<IndicatorEvent>) -> Vec<String> {
        rx.try_iter()
            .filter_map(|event| match event {
                IndicatorEvent::StatusLabel(label) => Some(label),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn initial_disconnected_result_is_not_a_transition() {
        let (monitor, rx) = monitor();
        monitor.record(false);

        assert_eq!(monitor.state(), ConnectivityState::Disconnected);
        assert!(!monitor.is_blinking());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn transition_emits_icon_then_label() {
        let (monitor, rx) = monitor();
        monitor.record(true);

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![
                IndicatorEvent::Icon {
                    variant: IconVariant::Connected,
                    tooltip: "Connected".to_string(),
                },
                IndicatorEvent::StatusLabel("Status: Connected".to_string()),
            ]
        );
    }

    #[test]
    fn repeated_results_emit_nothing() {
        let (monitor, rx) = monitor();
        monitor.record(true);
        while rx.try_recv().is_ok() {}

        monitor.record(true);
        monitor.record(true);
        assert!(rx.try_recv().is_err());
        assert_eq!(monitor.state(), ConnectivityState::Connected);
    }

    #[test]
    fn disconnect_starts_one_blink_loop_and_reconnect_stops_it() {
        let (monitor, _rx) = monitor();
        monitor.record(true);

        monitor.record(false);
        assert!(monitor.is_blinking());

        // Same result again: no new loop, the existing one keeps running.
        monitor.record(false);
        assert!(monitor.is_blinking());

        monitor.record(true);
        assert!(!monitor.is_blinking());
        assert!(monitor.state().is_connected());
    }

    #[test]
    fn drop_and_recover_fires_exactly_two_transitions() {
        let (monitor, rx) = monitor();
        // Establish Connected, then feed the scenario sequence.
        monitor.record(true);
        while rx.try_recv().is_ok() {}

        for reachable in [true, false, false, true] {
            monitor.record(reachable);
        }

        // Transition events are the label updates; blink frames carry no
        // label, so this counts state changes exactly.
        let labels = status_labels(&rx);
        assert_eq!(labels, vec!["Status: Disconnected", "Status: Connected"]);
        assert!(!monitor.is_blinking());
        assert_eq!(monitor.state(), ConnectivityState::Connected);
    }

    #[test]
    fn reconnect_ends_on_the_connected_icon() {
        let (monitor, rx) = monitor();
        monitor.record(true);
        monitor.record(false);
        monitor.record(true);

        let last_icon = rx
            .try_iter()
            .filter_map(|event| match event {
                IndicatorEvent::Icon { variant, .. } => Some(variant),
                _ => None,
            })
            .last();
        assert_eq!(last_icon, Some(IconVariant::Connected));
    }
}
