use crate::base58::{self, MAX_ENCODED_LEN};
use crate::error::{CoreError, Result};
use crate::id::NumericId;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt::Display;

/// The public identifier of a url document: the base58 encoding of its id.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SmolStr", into = "SmolStr")]
pub struct UrlKey(SmolStr);

impl UrlKey {
    /// Parses a key received from outside, e.g. a request path.
    ///
    /// The key must be 1 to 11 base58 characters and be the canonical encoding
    /// of a 63-bit id, i.e. carry no leading `1` padding.
    pub fn parse(key: impl AsRef<str>) -> Result<Self> {
        let key = key.as_ref();
        if key.len() > MAX_ENCODED_LEN {
            return Err(CoreError::InvalidKey(format!(
                "length must be at most {MAX_ENCODED_LEN}, got {}",
                key.len()
            )));
        }
        let canonical = base58::encode(base58::decode(key)?);
        if canonical.as_str() != key {
            return Err(CoreError::InvalidKey(format!(
                "'{key}' is not canonical, expected '{canonical}'"
            )));
        }
        Ok(canonical)
    }

    /// Wraps a string produced by the encoder.
    pub(crate) fn from_encoded(encoded: String) -> Self {
        Self(SmolStr::new(encoded))
    }

    /// Generates the full short url based on the provided base url.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<NumericId> for UrlKey {
    fn from(id: NumericId) -> Self {
        base58::encode(id)
    }
}

impl TryFrom<SmolStr> for UrlKey {
    type Error = CoreError;

    fn try_from(value: SmolStr) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<UrlKey> for SmolStr {
    fn from(value: UrlKey) -> Self {
        value.0
    }
}

impl std::fmt::Debug for UrlKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("UrlKey").field(&self.0).finish()
    }
}

impl Display for UrlKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
