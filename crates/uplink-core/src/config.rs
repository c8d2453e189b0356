//! Build-time configuration.
//!
//! All connectivity tuning lives here as constants; none of it is exposed
//! as a runtime flag.

use std::time::Duration;

/// URL probed for connectivity.
pub const TEST_URL: &str = "https://www.google.com";

/// Time between periodic connectivity checks.
pub const CHECK_INTERVAL: Duration = Duration::from_secs(5);

/// Time between icon blinks while disconnected.
pub const BLINK_INTERVAL: Duration = Duration::from_millis(500);

/// How many times the HTTP check is attempted before declaring offline.
pub const MAX_ATTEMPTS: u32 = 3;

/// Per-attempt timeout for the HTTP check.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Sleep after a failed probe attempt before the next one.
pub const RETRY_BACKOFF: Duration = Duration::from_secs(1);

/// Upper bound on waiting for the blink loop to observe a stop request.
pub const BLINK_STOP_WAIT: Duration = Duration::from_secs(1);
