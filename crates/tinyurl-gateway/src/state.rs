use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tinyurl_core::{TinyUrlService, UrlKey};

#[derive(Clone)]
pub struct AppState {
    service: Arc<dyn TinyUrlService>,
    base_url: String,
    metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(service: Arc<dyn TinyUrlService>, public_base_url: impl Into<String>) -> Self {
        Self {
            service,
            base_url: public_base_url.into().trim_end_matches('/').to_string(),
            metrics: None,
        }
    }

    /// Exposes the given recorder on `/metrics`.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    pub fn service(&self) -> &dyn TinyUrlService {
        self.service.as_ref()
    }

    pub fn metrics(&self) -> Option<&PrometheusHandle> {
        self.metrics.as_ref()
    }

    /// The public short url for `key`, e.g. `https://tiny.io/tinyurlsvc/27qMi57J`.
    pub fn short_url(&self, key: &UrlKey) -> String {
        key.to_url(&format!("{}/tinyurlsvc", self.base_url))
    }
}
