use async_trait::async_trait;
use reqwest::Client;

use crate::{
    FetchError, WeatherDocument,
    model::LocationMatch,
    source::get_json,
};

use super::WeatherSource;

const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com";
const DEFAULT_LOCATION: &str = "melbourne";

/// Current conditions straight from weatherapi.com.
#[derive(Clone)]
pub struct WeatherApiSource {
    api_key: String,
    base_url: String,
    location: String,
    http: Client,
}

// Keeps the API key out of Debug output.
impl std::fmt::Debug for WeatherApiSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherApiSource")
            .field("base_url", &self.base_url)
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}

impl WeatherApiSource {
    pub fn with_client(api_key: String, http: Client) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            location: DEFAULT_LOCATION.to_string(),
            http,
        }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Look up locations matching `query` via `search.json`.
    pub async fn search(&self, query: &str) -> Result<Vec<LocationMatch>, FetchError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/v1/search.json", self.base_url);
        let request =
            self.http.get(&url).query(&[("key", self.api_key.as_str()), ("q", query)]);

        get_json(request, &url).await
    }

    /// Current conditions for an arbitrary location, ignoring the configured one.
    pub async fn current_for(&self, location: &str) -> Result<WeatherDocument, FetchError> {
        let url = format!("{}/v1/current.json", self.base_url);
        let request =
            self.http.get(&url).query(&[("key", self.api_key.as_str()), ("q", location)]);

        get_json(request, &url).await
    }
}

#[async_trait]
impl WeatherSource for WeatherApiSource {
    async fn fetch(&self) -> Result<WeatherDocument, FetchError> {
        self.current_for(&self.location).await
    }
}
