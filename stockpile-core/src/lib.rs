//! # Stockpile Core
//!
//! An in-process key-value store with optional per-item TTLs.
//!
//! ## Features
//!
//! - Thread-safe storage behind a single reader/writer lock
//! - Generic over the stored value type; values are never inspected
//! - Expired items are never returned, and are removed lazily on read
//! - Optional background sweeper per store that purges expired items eagerly
//! - Deterministic teardown via [`Store::close`] or dropping the last handle
//!
//! ## Example
//!
//! ```rust,no_run
//! use stockpile_core::{Store, StoreConfig, HOUR_EXPIRY};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     // Sweep expired items every 30 seconds
//!     let store: Store<String> = Store::new(Duration::from_secs(30));
//!     store.close();
//!
//!     // Or from the environment
//!     let store: Store<String> = Store::with_config(StoreConfig::from_env());
//!
//!     // Store a value with a one hour TTL
//!     store.set("user:123", "John Doe".to_string(), HOUR_EXPIRY);
//!
//!     // Retrieve the value
//!     if let Some(value) = store.get("user:123") {
//!         println!("User: {}", value);
//!     }
//!
//!     // Delete a key
//!     store.delete("user:123");
//!
//!     // Stop the background sweeper
//!     store.close();
//! }
//! ```

mod config;
mod error;
pub mod expiry;
mod item;
mod store;
mod sweeper;

pub use config::{StoreConfig, LAZY_DELETE_CAPACITY_ENV, SWEEP_INTERVAL_ENV};
pub use error::StoreError;
pub use expiry::{
    DAY_EXPIRY, HALF_DAY_EXPIRY, HALF_HOUR_EXPIRY, HOUR_EXPIRY, MINUTE_EXPIRY, NO_EXPIRY, NO_SWEEP,
    WEEK_EXPIRY,
};
pub use item::Item;
pub use store::Store;
pub use sweeper::SweeperState;
