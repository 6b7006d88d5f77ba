use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::expiry::NO_EXPIRY;
use crate::item::Item;
use crate::sweeper::{Sweepable, Sweeper, SweeperState};

/// The key -> item map behind a single reader/writer lock
///
/// Reads (`get`, `count`) share the lock; every write, including sweep passes,
/// takes it exclusively. There is no per-key locking.
pub(crate) struct Items<V> {
    map: RwLock<HashMap<String, Item<V>>>,
}

impl<V> Items<V> {
    fn new() -> Self {
        Self {
            map: RwLock::new(HashMap::new()),
        }
    }

    fn purge(&self) -> usize {
        let now = Instant::now();
        let mut map = self.map.write();
        let before = map.len();
        map.retain(|_, item| !item.is_expired_at(now));
        before - map.len()
    }

    fn remove_expired(&self, key: &str) {
        let now = Instant::now();
        let mut map = self.map.write();
        // Only drop what is still expired: a writer may have re-set the key meanwhile
        if map.get(key).is_some_and(|item| item.is_expired_at(now)) {
            map.remove(key);
        }
    }
}

impl<V: Send + Sync + 'static> Sweepable for Items<V> {
    fn evict_expired(&self) -> usize {
        self.purge()
    }

    fn remove_if_expired(&self, key: &str) {
        self.remove_expired(key)
    }
}

/// Internal shared state for the store
struct StoreInner<V> {
    items: Arc<Items<V>>,
    /// Absent when the store was built with a zero sweep interval
    sweeper: Option<Sweeper>,
}

/// Thread-safe in-memory key-value store with TTL support
///
/// Values are opaque to the store; `get` hands back a clone. Expired items are
/// never returned. They are removed lazily when a reader trips over them, and
/// eagerly by a background sweeper when one is configured.
///
/// Cloning a `Store` yields another handle to the same data and sweeper. The
/// sweeper stops when [`Store::close`] is called or the last handle is dropped.
///
/// # Example
///
/// ```rust,no_run
/// use stockpile_core::{Store, MINUTE_EXPIRY};
/// use std::time::Duration;
///
/// #[tokio::main]
/// async fn main() {
///     let store = Store::new(Duration::from_secs(30));
///
///     store.set("session:42", vec![1u8, 2, 3], MINUTE_EXPIRY);
///     assert_eq!(store.get("session:42"), Some(vec![1, 2, 3]));
///
///     store.close();
/// }
/// ```
pub struct Store<V> {
    inner: Arc<StoreInner<V>>,
}

impl<V> Clone for Store<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> Store<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Creates an empty store, sweeping expired items every `sweep_interval`
    ///
    /// `Duration::ZERO` (see [`NO_SWEEP`](crate::NO_SWEEP)) starts no background
    /// task; expired items are then only removed when read.
    ///
    /// # Panics
    ///
    /// Panics if `sweep_interval` is non-zero and this is called outside of a
    /// Tokio runtime context. Use [`Store::try_new`] to get an error instead.
    pub fn new(sweep_interval: Duration) -> Self {
        Self::with_config(StoreConfig::default().with_sweep_interval(sweep_interval))
    }

    /// Creates a new store with custom configuration
    ///
    /// # Panics
    ///
    /// Same as [`Store::new`].
    pub fn with_config(config: StoreConfig) -> Self {
        match Self::try_with_config(config) {
            Ok(store) => store,
            Err(err) => panic!("stockpile_core::Store: {err}"),
        }
    }

    /// Fallible form of [`Store::new`]
    pub fn try_new(sweep_interval: Duration) -> Result<Self, StoreError> {
        Self::try_with_config(StoreConfig::default().with_sweep_interval(sweep_interval))
    }

    /// Fallible form of [`Store::with_config`]
    pub fn try_with_config(config: StoreConfig) -> Result<Self, StoreError> {
        let items = Arc::new(Items::new());
        let sweeper = if config.sweeps() {
            Some(Sweeper::start(
                Arc::clone(&items),
                config.sweep_interval,
                config.lazy_delete_capacity,
            )?)
        } else {
            None
        };

        Ok(Self {
            inner: Arc::new(StoreInner { items, sweeper }),
        })
    }

    /// Stores `value` under `key`, replacing any existing item and its expiration
    ///
    /// A zero `ttl` means the item never expires.
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let key = key.into();
        let item = Item::with_ttl(key.clone(), value, ttl);
        self.inner.items.map.write().insert(key, item);
    }

    /// Stores `value` under `key` with no expiration
    pub fn set_no_expiry(&self, key: impl Into<String>, value: V) {
        self.set(key, value, NO_EXPIRY)
    }

    /// Retrieves a value by key
    ///
    /// Returns `None` if the key doesn't exist or has expired. An expired item is
    /// handed off for removal, but may still be counted until that removal lands.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        let map = self.inner.items.map.read();
        let item = map.get(key)?;

        if !item.is_expired_at(now) {
            return Some(item.value().clone());
        }

        let key = item.key().to_owned();
        drop(map);
        self.evict_lazily(key);
        None
    }

    fn evict_lazily(&self, key: String) {
        let key = match &self.inner.sweeper {
            Some(sweeper) => match sweeper.dispatch(key) {
                Ok(()) => return,
                Err(key) => key,
            },
            None => key,
        };
        self.inner.items.remove_expired(&key);
    }

    /// Deletes a key from the store. Deleting a missing key is a no-op.
    pub fn delete(&self, key: &str) {
        self.inner.items.map.write().remove(key);
    }

    /// Discards every item by swapping in a fresh map
    pub fn reset(&self) {
        let old = std::mem::take(&mut *self.inner.items.map.write());
        // Free the old items after the lock is released
        drop(old);
    }

    /// Returns the number of items held, including expired ones not yet removed
    #[must_use]
    pub fn count(&self) -> usize {
        self.inner.items.map.read().len()
    }

    /// Returns `true` if the store holds no items (expired ones included)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Removes all expired items now, returning how many were removed
    ///
    /// This is the same pass the background sweeper runs on every tick.
    pub fn purge_expired(&self) -> usize {
        self.inner.items.purge()
    }

    /// Returns the sweeper's state, or `None` if this store has no sweeper
    pub fn sweeper_state(&self) -> Option<SweeperState> {
        self.inner.sweeper.as_ref().map(Sweeper::state)
    }

    /// Returns the configured sweep interval, or `None` if this store has no sweeper
    pub fn sweep_interval(&self) -> Option<Duration> {
        self.inner.sweeper.as_ref().map(Sweeper::interval)
    }

    /// Stops the background sweeper
    ///
    /// Callers owning a sweeping store should call this when done with it; dropping
    /// the last handle does the same. The store stays usable afterwards, with
    /// expired items removed only on read. Calling it again is a no-op.
    pub fn close(&self) {
        if let Some(sweeper) = &self.inner.sweeper {
            sweeper.stop();
        }
    }

    /// Stores a value that has already expired (for testing purposes)
    #[cfg(test)]
    fn set_expired(&self, key: impl Into<String>, value: V) {
        let key = key.into();
        let item = Item::new(key.clone(), value, Some(Instant::now() - Duration::from_secs(1)));
        self.inner.items.map.write().insert(key, item);
    }
}
