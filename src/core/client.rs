use crate::core::{LookupResult, Plate, RecordSource};
use crate::utils::error::{HarvestError, LookupError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.boostr.cl";

const API_KEY_HEADER: &str = "X-API-KEY";

/// Vehicle lookup client. Holds the credential it was built with; nothing global.
pub struct RecordClient {
    client: Client,
    base_url: Url,
}

impl RecordClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| HarvestError::InvalidConfigValueError {
            field: "base_url".to_string(),
            value: base_url.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;

        if base_url.cannot_be_a_base() {
            return Err(HarvestError::InvalidConfigValueError {
                field: "base_url".to_string(),
                value: base_url.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            });
        }

        let mut api_key = HeaderValue::from_str(api_key).map_err(|_| {
            HarvestError::InvalidConfigValueError {
                field: "api_key".to_string(),
                value: String::new(),
                reason: "API key contains characters not allowed in an HTTP header".to_string(),
            }
        })?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, api_key);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self { client, base_url })
    }

    /// `<base>/vehicle/<plate>.json`, with the plate kept as one path segment.
    pub fn lookup_url(&self, plate: &Plate) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push("vehicle")
                .push(&format!("{}.json", plate.as_str()));
        }
        url
    }
}

#[async_trait]
impl RecordSource for RecordClient {
    async fn fetch(&self, plate: &Plate) -> std::result::Result<LookupResult, LookupError> {
        let url = self.lookup_url(plate);
        tracing::debug!("Making lookup request to: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(LookupError::Transport)?;

        // 不解讀狀態碼，任何回應內容都嘗試解析為 JSON
        let status = response.status();
        tracing::debug!("Lookup response status for {}: {}", plate, status);

        let body = response.bytes().await.map_err(LookupError::Transport)?;
        let data = serde_json::from_slice(&body).map_err(|source| LookupError::Parse {
            status: status.as_u16(),
            source,
        })?;

        Ok(LookupResult::new(plate.clone(), data))
    }
}
