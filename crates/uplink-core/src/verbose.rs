//! Verbose logging support for debugging uplink's background loops.
//!
//! Enable with `set_verbose(true)` (the CLI's `-v` flag) or by setting the
//! `UPLINK_VERBOSE` environment variable, then use the `verbose!()` macro.

use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Enable or disable verbose logging
pub fn set_verbose(enabled: bool) {
    VERBOSE.store(enabled, Ordering::SeqCst);
}

/// Enable verbose logging if `UPLINK_VERBOSE` is set to a truthy value
pub fn init_from_env() {
    if matches!(
        std::env::var("UPLINK_VERBOSE").as_deref(),
        Ok("1") | Ok("true")
    ) {
        set_verbose(true);
    }
}

/// Check if verbose logging is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// Log a formatted message if verbose mode is enabled
#[macro_export]
macro_rules! verbose {
    ($($arg:tt)*) => {
        if $crate::verbose::is_verbose() {
            eprintln!("[uplink] {}", format!($($arg)*));
        }
    };
}
