use crate::error::{CoreError, Result};
use url::Url;

/// Validates a url to be shortened: it must parse, carry a host, and use the
/// http or https scheme.
pub fn validate_target_url(target: &str) -> Result<Url> {
    if target.trim().is_empty() {
        return Err(CoreError::InvalidUrl("url cannot be empty".to_string()));
    }

    let url = Url::parse(target).map_err(|e| CoreError::InvalidUrl(format!("{target}: {e}")))?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(CoreError::InvalidUrl(format!(
                "url scheme must be http or https: {other}"
            )))
        }
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(CoreError::InvalidUrl(format!("url has no host: {target}")));
    }

    Ok(url)
}
