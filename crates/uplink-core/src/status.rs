//! Presentation-collaborator interface.
//!
//! The core never mutates UI state from its background threads: the monitor
//! and blink loop call a [`StatusSink`], and the stock [`ChannelSink`]
//! marshals those calls onto the presentation loop as [`IndicatorEvent`]s.

use crossbeam_channel::{Receiver, Sender};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of the two indicator icons to show.
///
/// Distinct from [`ConnectivityState`](crate::ConnectivityState): while
/// blinking, the connected icon is shown with a "Disconnected" tooltip so
/// the indicator keeps a consistent footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconVariant {
    Connected,
    Disconnected,
}

impl IconVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            IconVariant::Connected => "connected",
            IconVariant::Disconnected => "disconnected",
        }
    }
}

impl fmt::Display for IconVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One sink call, crossing from a background thread to the presentation loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndicatorEvent {
    Icon {
        variant: IconVariant,
        tooltip: String,
    },
    StatusLabel(String),
}

/// Interface the core drives the presentation layer through.
///
/// Implementations must be callable from background threads. Anything that
/// owns real UI state should forward to its own main loop instead of
/// touching it here; [`ChannelSink`] is the stock way to do that.
pub trait StatusSink: Send + Sync {
    /// Show `variant` with the given tooltip text.
    fn set_icon(&self, variant: IconVariant, tooltip: &str);

    /// Update the status label (menu entry, status line, ...).
    fn set_status_label(&self, text: &str);
}

/// [`StatusSink`] that forwards every call over a channel.
///
/// The presentation loop owns the receiving end and applies events on its
/// own thread. Sends after the receiver is gone are dropped: the frontend
/// has exited and the background loops die with the process.
pub struct ChannelSink {
    tx: Sender<IndicatorEvent>,
}

impl ChannelSink {
    /// Create a sink plus the receiver for the presentation loop.
    pub fn new() -> (Self, Receiver<IndicatorEvent>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self { tx }, rx)
    }
}

impl StatusSink for ChannelSink {
    fn set_icon(&self, variant: IconVariant, tooltip: &str) {
        let _ = self.tx.send(IndicatorEvent::Icon {
            variant,
            tooltip: tooltip.to_string(),
        });
    }

    fn set_status_label(&self, text: &str) {
        let _ = self.tx.send(IndicatorEvent::StatusLabel(text.to_string()));
    }
}
