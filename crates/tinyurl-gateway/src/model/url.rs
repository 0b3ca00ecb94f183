use jiff::Timestamp;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUrlRequest {
    pub url: String,
    #[serde(default)]
    pub live_forever: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUrlResponse {
    pub generated_tiny_url: String,
    pub url_key: String,
    pub expire_time: Timestamp,
    pub live_forever: bool,
}
