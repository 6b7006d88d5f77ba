//! Named durations for TTLs and sweep intervals.
//!
//! These are plain `Duration` values. The only special one is [`NO_EXPIRY`]
//! (and its constructor counterpart [`NO_SWEEP`]), which is `Duration::ZERO`.

use std::time::Duration;

/// TTL meaning "never expires"
pub const NO_EXPIRY: Duration = Duration::ZERO;

/// Sweep interval that disables the background sweeper
pub const NO_SWEEP: Duration = Duration::ZERO;

pub const MINUTE_EXPIRY: Duration = Duration::from_secs(60);
pub const HALF_HOUR_EXPIRY: Duration = Duration::from_secs(30 * 60);
pub const HOUR_EXPIRY: Duration = Duration::from_secs(60 * 60);
pub const HALF_DAY_EXPIRY: Duration = Duration::from_secs(12 * 60 * 60);
pub const DAY_EXPIRY: Duration = Duration::from_secs(24 * 60 * 60);
pub const WEEK_EXPIRY: Duration = Duration::from_secs(7 * 24 * 60 * 60);
