use async_trait::async_trait;
use reqwest::Client;

use crate::{FetchError, WeatherDocument, source::get_json};

use super::WeatherSource;

/// A fixed URL that already serves a complete weather document.
#[derive(Debug, Clone)]
pub struct EndpointSource {
    url: String,
    http: Client,
}

impl EndpointSource {
    pub fn with_client(url: impl Into<String>, http: Client) -> Self {
        Self { url: url.into(), http }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl WeatherSource for EndpointSource {
    async fn fetch(&self) -> Result<WeatherDocument, FetchError> {
        get_json(self.http.get(&self.url), &self.url).await
    }
}
