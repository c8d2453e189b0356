//! Core library for uplink, an internet connectivity monitor.
//!
//! The pipeline: [`Poller`] runs the [`Prober`] on a background thread and
//! feeds each result to the [`ConnectivityMonitor`], which turns raw
//! reachability into edge-triggered Connected/Disconnected transitions and
//! drives icon and label updates, including the disconnect blink loop.
//! Presentation layers implement [`StatusSink`] (or drain [`ChannelSink`]
//! events) on their own main loop; the core never touches UI state directly.

pub mod blink;
pub mod config;
pub mod monitor;
pub mod poll;
pub mod probe;
pub mod status;
pub mod verbose;

pub use blink::BlinkHandle;
pub use config::{BLINK_INTERVAL, CHECK_INTERVAL, MAX_ATTEMPTS, PROBE_TIMEOUT, TEST_URL};
pub use monitor::{ConnectivityMonitor, ConnectivityState};
pub use poll::{Poller, PollerHandle};
pub use probe::{HttpReachability, Prober, ReachError, Reachability};
pub use status::{ChannelSink, IconVariant, IndicatorEvent, StatusSink};
pub use verbose::set_verbose;
