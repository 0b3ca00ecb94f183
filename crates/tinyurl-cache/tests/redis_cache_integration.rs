use std::time::Duration;
use tinyurl_cache::{Cache, CacheError, RedisCache};
use tinyurl_core::UrlKey;
use tinyurl_test_infra::redis::RedisServer;

const TTL: Duration = Duration::from_secs(60);

fn key(s: &str) -> UrlKey {
    UrlKey::parse(s).unwrap()
}

async fn start() -> (RedisServer, RedisCache) {
    let server = RedisServer::new().await.expect("start redis");
    let conn = server.connection().await.expect("connect redis");
    (server, RedisCache::new(conn))
}

#[tokio::test]
#[ignore = "requires a docker daemon"]
async fn cache_get_and_delete() {
    let (_server, cache) = start().await;
    let k = key("27qMi57J");

    assert_eq!(cache.get_cached_value(&k).await.unwrap(), None);

    cache.cache(&k, "payload", TTL).await.unwrap();
    assert_eq!(
        cache.get_cached_value(&k).await.unwrap().as_deref(),
        Some("payload")
    );

    cache.delete(&k).await.unwrap();
    assert_eq!(cache.get_cached_value(&k).await.unwrap(), None);
}

#[tokio::test]
#[ignore = "requires a docker daemon"]
async fn delete_missing_is_not_found() {
    let (_server, cache) = start().await;

    let err = cache.delete(&key("JV5pY")).await.unwrap_err();
    assert!(matches!(err, CacheError::NotFound(_)));
}

#[tokio::test]
#[ignore = "requires a docker daemon"]
async fn entries_expire() {
    let (_server, cache) = start().await;
    let k = key("9bHtdX");

    cache.cache(&k, "payload", Duration::from_secs(1)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(2_100)).await;

    assert_eq!(cache.get_cached_value(&k).await.unwrap(), None);
}

#[tokio::test]
#[ignore = "requires a docker daemon"]
async fn prefixes_keep_caches_apart() {
    let server = RedisServer::new().await.expect("start redis");
    let a = RedisCache::with_prefix(server.connection().await.unwrap(), "a:");
    let b = RedisCache::with_prefix(server.connection().await.unwrap(), "b:");
    let k = key("3JEufoG");

    a.cache(&k, "from a", TTL).await.unwrap();

    assert_eq!(b.get_cached_value(&k).await.unwrap(), None);
    assert!(matches!(
        b.delete(&k).await.unwrap_err(),
        CacheError::NotFound(_)
    ));
}
