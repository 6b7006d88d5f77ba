use std::time::{Duration, Instant};

/// A stored value together with its key and optional expiration time
#[derive(Debug, Clone)]
pub struct Item<V> {
    key: String,
    value: V,
    expires_at: Option<Instant>,
}

impl<V> Item<V> {
    /// Creates a new item with the given absolute expiration (`None` = never expires)
    pub fn new(key: impl Into<String>, value: V, expires_at: Option<Instant>) -> Self {
        Self {
            key: key.into(),
            value,
            expires_at,
        }
    }

    /// Creates an item that expires `ttl` from now
    ///
    /// A zero TTL means the item never expires. A TTL so large that the
    /// deadline cannot be represented as an `Instant` is treated the same way.
    pub fn with_ttl(key: impl Into<String>, value: V, ttl: Duration) -> Self {
        let expires_at = if ttl.is_zero() {
            None
        } else {
            Instant::now().checked_add(ttl)
        };
        Self::new(key, value, expires_at)
    }

    /// Returns the key this item is stored under
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns a reference to the stored value
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Returns the expiration time, or `None` if the item never expires
    pub fn expires_at(&self) -> Option<Instant> {
        self.expires_at
    }

    /// Checks if this item has expired as of `now`
    ///
    /// The deadline itself is still live; only instants strictly after it count.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(deadline) => now > deadline,
            None => false,
        }
    }

    /// Checks if this item has expired as of the current time
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }
}
