mod cli;

use crate::cli::{CacheBackendArg, StoreBackendArg, CLI};
use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tinyurl_cache::{MokaCache, RedisCache};
use tinyurl_core::{Cache, Clock, Store, SystemClock, TinyUrlService};
use tinyurl_gateway::reaper::spawn_reaper;
use tinyurl_gateway::telemetry::{init_metrics, init_tracing, spawn_metrics_upkeep};
use tinyurl_gateway::{App, AppState};
use tinyurl_generator::RandomGenerator;
use tinyurl_service::{MetricsUsageCounter, ServiceConfig, UrlService};
use tinyurl_storage::{ExpiryReaper, InMemoryStore, MySqlStore};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();
    init_tracing(config.log_format.into())?;

    info!(
        listen_addr = %config.listen_addr,
        public_base_url = %config.public_base_url,
        store_backend = %config.store,
        cache_backend = %config.cache,
        "starting tinyurl gateway"
    );

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let (store, reaper) = match config.store {
        StoreBackendArg::InMemory => with_reaper(Arc::new(InMemoryStore::new())),
        StoreBackendArg::Mysql => {
            let dsn = config
                .mysql_dsn
                .as_deref()
                .context("mysql dsn is required when store backend is mysql")?;
            let store = MySqlStore::connect(dsn).await?;
            store.migrate().await?;
            with_reaper(Arc::new(store))
        }
    };

    let cache: Arc<dyn Cache> = match config.cache {
        CacheBackendArg::InMemory => Arc::new(MokaCache::with_capacity(config.cache_capacity)),
        CacheBackendArg::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .context("redis url is required when cache backend is redis")?;
            Arc::new(RedisCache::connect(url).await?)
        }
    };

    let service_config = ServiceConfig::builder()
        .cache_ttl(Duration::from_secs(config.cache_ttl_secs))
        .build();
    let service = Arc::new(UrlService::with_config(
        store,
        cache,
        RandomGenerator::new(),
        MetricsUsageCounter::new(),
        service_config,
        Arc::clone(&clock),
    ));

    let mut state = AppState::new(service.clone(), config.public_base_url);
    if config.metrics {
        let handle = init_metrics()?;
        service.register_metric()?;
        spawn_metrics_upkeep(handle.clone(), Duration::from_secs(5));
        state = state.with_metrics(handle);
    }

    if config.reaper_interval_secs > 0 {
        spawn_reaper(
            reaper,
            clock,
            Duration::from_secs(config.reaper_interval_secs),
        );
    }

    let app = App::router_with_timeout(state, Duration::from_secs(config.request_timeout_secs));
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

fn with_reaper<S>(store: Arc<S>) -> (Arc<dyn Store>, Arc<dyn ExpiryReaper>)
where
    S: Store + ExpiryReaper,
{
    let reaper: Arc<dyn ExpiryReaper> = store.clone();
    let store: Arc<dyn Store> = store;
    (store, reaper)
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}
