use crate::document::UrlDocument;
use crate::error::StoreError;
use crate::key::UrlKey;
use async_trait::async_trait;
use std::sync::Arc;

pub type Result<T> = std::result::Result<T, StoreError>;

/// The authoritative record of url documents.
#[async_trait]
pub trait Store: Send + Sync + 'static {
    /// Inserts a new document. Returns `Err(Conflict)` if its key is already taken.
    async fn put(&self, document: &UrlDocument) -> Result<()>;

    /// Retrieves the document for `key`.
    /// Returns `Err(NotFound)` if the key does not exist.
    async fn get_document(&self, key: &UrlKey) -> Result<UrlDocument>;

    /// Deletes the document for `key`.
    /// Returns `Err(NotFound)` if the key does not exist.
    async fn delete(&self, key: &UrlKey) -> Result<()>;
}

#[async_trait]
impl<T: Store + ?Sized> Store for Arc<T> {
    async fn put(&self, document: &UrlDocument) -> Result<()> {
        (**self).put(document).await
    }

    async fn get_document(&self, key: &UrlKey) -> Result<UrlDocument> {
        (**self).get_document(key).await
    }

    async fn delete(&self, key: &UrlKey) -> Result<()> {
        (**self).delete(key).await
    }
}
