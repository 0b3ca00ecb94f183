//! Port doubles with failure injection for unit tests.

use async_trait::async_trait;
use dashmap::DashMap;
use crate::usage::{TINY_URL_USAGE, URL_KEY_LABEL};
use jiff::{SignedDuration, Timestamp};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tinyurl_core::{
    Cache, CacheError, Clock, NumericId, Store, StoreError, UrlDocument, UrlKey, UsageCounter,
    UsageError,
};
use tinyurl_generator::Generator;

pub fn document(id: u64, expire_at: Timestamp) -> UrlDocument {
    UrlDocument::new(NumericId::new(id).unwrap(), "https://abc.io", expire_at, false)
}

pub struct FixedClock(Timestamp);

impl FixedClock {
    pub fn after(&self, duration: SignedDuration) -> Timestamp {
        self.0 + duration
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self("2025-06-01T12:00:00Z".parse().unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

/// Hands out a fixed sequence of ids.
pub struct ScriptedGenerator(Mutex<VecDeque<u64>>);

impl ScriptedGenerator {
    pub fn new(ids: &[u64]) -> Self {
        Self(Mutex::new(ids.iter().copied().collect()))
    }
}

impl Generator for ScriptedGenerator {
    fn generate(&self) -> NumericId {
        let id = self.0.lock().unwrap().pop_front().expect("ran out of ids");
        NumericId::new(id).unwrap()
    }
}

#[derive(Default)]
pub struct ScriptedStore {
    documents: DashMap<UrlKey, UrlDocument>,
    put_failures: Mutex<VecDeque<StoreError>>,
    get_failure: Mutex<Option<StoreError>>,
    delete_failure: Mutex<Option<StoreError>>,
    puts: AtomicUsize,
    gets: AtomicUsize,
}

impl ScriptedStore {
    pub fn insert(&self, document: UrlDocument) {
        self.documents.insert(document.key.clone(), document);
    }

    pub fn contains(&self, key: &UrlKey) -> bool {
        self.documents.contains_key(key)
    }

    /// Makes the next puts fail with `errors`, one per call.
    pub fn fail_next_puts(&self, errors: impl IntoIterator<Item = StoreError>) {
        self.put_failures.lock().unwrap().extend(errors);
    }

    pub fn fail_gets(&self, error: StoreError) {
        *self.get_failure.lock().unwrap() = Some(error);
    }

    pub fn fail_deletes(&self, error: StoreError) {
        *self.delete_failure.lock().unwrap() = Some(error);
    }

    pub fn put_calls(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    pub fn get_calls(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Store for ScriptedStore {
    async fn put(&self, document: &UrlDocument) -> Result<(), StoreError> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.put_failures.lock().unwrap().pop_front() {
            return Err(err);
        }
        if self.documents.contains_key(&document.key) {
            return Err(StoreError::Conflict(document.key.to_string()));
        }
        self.insert(document.clone());
        Ok(())
    }

    async fn get_document(&self, key: &UrlKey) -> Result<UrlDocument, StoreError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.get_failure.lock().unwrap().clone() {
            return Err(err);
        }
        self.documents
            .get(key)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    async fn delete(&self, key: &UrlKey) -> Result<(), StoreError> {
        if let Some(err) = self.delete_failure.lock().unwrap().clone() {
            return Err(err);
        }
        self.documents
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }
}

#[derive(Default)]
pub struct ScriptedCache {
    entries: DashMap<UrlKey, (String, Duration)>,
    get_failure: Mutex<Option<CacheError>>,
    write_failure: Mutex<Option<CacheError>>,
    delete_failure: Mutex<Option<CacheError>>,
    writes: AtomicUsize,
    deletes: AtomicUsize,
}

impl ScriptedCache {
    pub fn insert_raw(&self, key: &UrlKey, value: &str) {
        self.entries
            .insert(key.clone(), (value.to_string(), Duration::from_secs(60)));
    }

    pub fn insert_document(&self, document: &UrlDocument) {
        self.insert_raw(&document.key, &document.to_cache_value().unwrap());
    }

    pub fn value(&self, key: &UrlKey) -> Option<String> {
        self.entries.get(key).map(|entry| entry.0.clone())
    }

    pub fn document(&self, key: &UrlKey) -> Option<UrlDocument> {
        self.value(key)
            .map(|value| UrlDocument::from_cache_value(&value).unwrap())
    }

    pub fn ttl(&self, key: &UrlKey) -> Option<Duration> {
        self.entries.get(key).map(|entry| entry.1)
    }

    pub fn fail_gets(&self, error: CacheError) {
        *self.get_failure.lock().unwrap() = Some(error);
    }

    pub fn fail_writes(&self, error: CacheError) {
        *self.write_failure.lock().unwrap() = Some(error);
    }

    pub fn fail_deletes(&self, error: CacheError) {
        *self.delete_failure.lock().unwrap() = Some(error);
    }

    pub fn write_calls(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Cache for ScriptedCache {
    async fn cache(&self, key: &UrlKey, value: &str, ttl: Duration) -> Result<(), CacheError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.write_failure.lock().unwrap().clone() {
            return Err(err);
        }
        self.entries.insert(key.clone(), (value.to_string(), ttl));
        Ok(())
    }

    async fn delete(&self, key: &UrlKey) -> Result<(), CacheError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.delete_failure.lock().unwrap().clone() {
            return Err(err);
        }
        self.entries
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| CacheError::NotFound(key.to_string()))
    }

    async fn get_cached_value(&self, key: &UrlKey) -> Result<Option<String>, CacheError> {
        if let Some(err) = self.get_failure.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self.value(key))
    }
}

#[derive(Default)]
pub struct RecordingUsage {
    registered: AtomicBool,
    counts: DashMap<UrlKey, u64>,
    resets: Mutex<Vec<UrlKey>>,
}

impl RecordingUsage {
    pub fn count(&self, key: &UrlKey) -> u64 {
        self.counts.get(key).map(|count| *count).unwrap_or(0)
    }

    pub fn resets(&self) -> Vec<UrlKey> {
        self.resets.lock().unwrap().clone()
    }
}

impl UsageCounter for RecordingUsage {
    fn register(&self) -> Result<(), UsageError> {
        if self.registered.swap(true, Ordering::SeqCst) {
            return Err(UsageError::AlreadyRegistered);
        }
        Ok(())
    }

    fn increment(&self, key: &UrlKey) {
        *self.counts.entry(key.clone()).or_default() += 1;
    }

    fn reset(&self, key: &UrlKey) {
        self.counts.remove(key);
        self.resets.lock().unwrap().push(key.clone());
    }
}

/// Value of the usage series for `key` in the rendered exposition, if present.
pub fn rendered_usage(handle: &PrometheusHandle, key: &UrlKey) -> Option<f64> {
    let series = format!("{TINY_URL_USAGE}{{{URL_KEY_LABEL}=\"{key}\"}} ");
    handle
        .render()
        .lines()
        .find_map(|line| line.strip_prefix(series.as_str()))
        .map(|value| value.trim().parse().unwrap())
}
