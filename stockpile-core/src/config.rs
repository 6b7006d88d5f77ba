use std::time::Duration;

/// Environment variable holding the sweep interval in milliseconds
pub const SWEEP_INTERVAL_ENV: &str = "STOCKPILE_SWEEP_INTERVAL_MS";

/// Environment variable holding the lazy-delete queue capacity
pub const LAZY_DELETE_CAPACITY_ENV: &str = "STOCKPILE_LAZY_DELETE_CAPACITY";

const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);
const DEFAULT_LAZY_DELETE_CAPACITY: usize = 1024;

/// Configuration for a store and its background sweeper
///
/// # Example
///
/// ```rust
/// use stockpile_core::StoreConfig;
/// use std::time::Duration;
///
/// let config = StoreConfig::default()
///     .with_sweep_interval(Duration::from_secs(30))
///     .with_lazy_delete_capacity(256);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Interval between sweep passes (default: 60 seconds, zero disables the sweeper)
    pub sweep_interval: Duration,
    /// How many expired keys found by readers may wait for the sweeper to remove them (default: 1024)
    pub lazy_delete_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
            lazy_delete_capacity: DEFAULT_LAZY_DELETE_CAPACITY,
        }
    }
}

impl StoreConfig {
    /// Creates a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a configuration from `STOCKPILE_*` environment variables
    ///
    /// Missing or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let sweep_interval = lookup(SWEEP_INTERVAL_ENV)
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.sweep_interval);
        let lazy_delete_capacity = lookup(LAZY_DELETE_CAPACITY_ENV)
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .unwrap_or(defaults.lazy_delete_capacity);

        Self::default()
            .with_sweep_interval(sweep_interval)
            .with_lazy_delete_capacity(lazy_delete_capacity)
    }

    /// Sets the sweep interval
    ///
    /// This determines how often the background task runs to remove expired items.
    /// `Duration::ZERO` means no background task is started at all.
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    /// Sets the capacity of the lazy-delete queue (at least 1)
    pub fn with_lazy_delete_capacity(mut self, capacity: usize) -> Self {
        self.lazy_delete_capacity = capacity.max(1);
        self
    }

    /// Returns `true` if this configuration starts a background sweeper
    pub fn sweeps(&self) -> bool {
        !self.sweep_interval.is_zero()
    }
}
