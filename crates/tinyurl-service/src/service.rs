use crate::config::ServiceConfig;
use crate::mutation::MutationService;
use crate::resolver::CacheAsideResolver;
use crate::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tinyurl_core::{
    Cache, Clock, Store, SystemClock, TinyUrlService, UrlDocument, UrlKey, UsageCounter,
};
use tinyurl_generator::Generator;

/// The [`TinyUrlService`] implementation, composed of a [`MutationService`]
/// and a [`CacheAsideResolver`] sharing the same store, cache and counter.
pub struct UrlService<S, C, G, U> {
    mutation: MutationService<S, C, G, U>,
    resolver: CacheAsideResolver<S, C, U>,
    usage: Arc<U>,
}

impl<S, C, G, U> UrlService<S, C, G, U>
where
    S: Store,
    C: Cache,
    G: Generator,
    U: UsageCounter,
{
    /// Creates a service with the default configuration and the system clock.
    pub fn new(store: S, cache: C, generator: G, usage: U) -> Self {
        Self::with_config(
            store,
            cache,
            generator,
            usage,
            ServiceConfig::default(),
            Arc::new(SystemClock),
        )
    }

    pub fn with_config(
        store: S,
        cache: C,
        generator: G,
        usage: U,
        config: ServiceConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let store = Arc::new(store);
        let cache = Arc::new(cache);
        let usage = Arc::new(usage);
        let config = Arc::new(config);

        let resolver = CacheAsideResolver::new(
            Arc::clone(&store),
            Arc::clone(&cache),
            Arc::clone(&usage),
            Arc::clone(&clock),
            Arc::clone(&config),
        );
        let mutation = MutationService::new(
            store,
            cache,
            Arc::new(generator),
            Arc::clone(&usage),
            clock,
            config,
        );

        Self {
            mutation,
            resolver,
            usage,
        }
    }
}

#[async_trait]
impl<S, C, G, U> TinyUrlService for UrlService<S, C, G, U>
where
    S: Store,
    C: Cache,
    G: Generator,
    U: UsageCounter,
{
    async fn generate_tiny_url(&self, target_url: &str, live_forever: bool) -> Result<UrlDocument> {
        self.mutation.generate(target_url, live_forever).await
    }

    async fn get_tiny_url(&self, key: &UrlKey) -> Result<UrlDocument> {
        self.resolver.resolve(key).await
    }

    async fn delete_tiny_url(&self, key: &UrlKey) -> Result<()> {
        self.mutation.delete(key).await
    }

    fn register_metric(&self) -> Result<()> {
        Ok(self.usage.register()?)
    }
}
