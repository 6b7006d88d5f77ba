use anyhow::{ensure, Result};
use futures::future::join_all;
use std::time::{Duration, Instant};
use stockpile_core::{Store, StoreConfig, MINUTE_EXPIRY};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stockpile_demo=info,stockpile_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = StoreConfig::from_env();
    tracing::info!("Stockpile demo");
    tracing::info!("   Sweep interval: {:?}", config.sweep_interval);
    tracing::info!("   Lazy-delete capacity: {}", config.lazy_delete_capacity);

    run_expiration().await?;
    run_parallel_set_get(config).await?;

    tracing::info!("All scenarios passed");
    Ok(())
}

/// Items expire on schedule while sweeping every millisecond
async fn run_expiration() -> Result<()> {
    tracing::info!("Scenario: Expiration");

    let store = Store::new(Duration::from_millis(1));
    store.set_no_expiry("a", 1);
    store.set("b", 2, Duration::from_millis(10));
    store.set("c", 3, Duration::from_millis(50));

    tokio::time::sleep(Duration::from_millis(11)).await;
    ensure!(store.get("b").is_none(), "b should have expired");
    ensure!(store.get("c") == Some(3), "c should not have expired yet");

    tokio::time::sleep(Duration::from_millis(40)).await;
    ensure!(store.get("c").is_none(), "c should have expired");
    ensure!(store.get("a") == Some(1), "a should never expire");

    store.close();
    tracing::info!("   ✓ Items expire on schedule");
    Ok(())
}

/// Concurrent writers on distinct keys alongside readers - verify nothing is lost
async fn run_parallel_set_get(config: StoreConfig) -> Result<()> {
    const WRITERS: usize = 8;
    const KEYS_PER_WRITER: usize = 500;

    tracing::info!(
        "Scenario: Parallel SET/GET ({} writers x {} keys)",
        WRITERS,
        KEYS_PER_WRITER
    );

    let store: Store<String> = Store::try_with_config(config)?;
    let start = Instant::now();

    let writers = (0..WRITERS).map(|writer| {
        let store = store.clone();
        tokio::task::spawn_blocking(move || {
            for i in 0..KEYS_PER_WRITER {
                store.set(
                    format!("writer{}:key{}", writer, i),
                    format!("value{}", i),
                    MINUTE_EXPIRY,
                );
            }
        })
    });
    let readers = (0..WRITERS).map(|writer| {
        let store = store.clone();
        tokio::task::spawn_blocking(move || {
            (0..KEYS_PER_WRITER)
                .filter(|i| store.get(&format!("writer{}:key{}", writer, i)).is_some())
                .count()
        })
    });

    let (written, read) = tokio::join!(join_all(writers), join_all(readers));
    for result in written {
        result?;
    }
    let mut hits = 0;
    for result in read {
        hits += result?;
    }

    tracing::info!("   {} operations in {:?}", 2 * WRITERS * KEYS_PER_WRITER, start.elapsed());
    tracing::info!("   {} reads hit while writers were running", hits);

    ensure!(
        store.count() == WRITERS * KEYS_PER_WRITER,
        "expected {} keys, found {}",
        WRITERS * KEYS_PER_WRITER,
        store.count()
    );
    for writer in 0..WRITERS {
        for i in 0..KEYS_PER_WRITER {
            let key = format!("writer{}:key{}", writer, i);
            ensure!(
                store.get(&key) == Some(format!("value{}", i)),
                "wrong value for {}",
                key
            );
        }
    }

    store.close();
    tracing::info!("   ✓ All values verified correctly");
    Ok(())
}
