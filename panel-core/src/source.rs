use crate::{
    Config, FetchError, WeatherDocument,
    error::truncate_body,
    source::{endpoint::EndpointSource, file::FileSource, weatherapi::WeatherApiSource},
};
use async_trait::async_trait;
use reqwest::Client;
use std::{fmt::Debug, time::Duration};

pub mod endpoint;
pub mod file;
pub mod weatherapi;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Endpoint,
    WeatherApi,
    File,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Endpoint => "endpoint",
            SourceKind::WeatherApi => "weatherapi",
            SourceKind::File => "file",
        }
    }

    pub const fn all() -> &'static [SourceKind] {
        &[SourceKind::Endpoint, SourceKind::WeatherApi, SourceKind::File]
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for SourceKind {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "endpoint" => Ok(SourceKind::Endpoint),
            "weatherapi" => Ok(SourceKind::WeatherApi),
            "file" => Ok(SourceKind::File),
            _ => Err(anyhow::anyhow!(
                "Unknown source '{value}'. Supported sources: endpoint, weatherapi, file."
            )),
        }
    }
}

/// Something that can produce one weather snapshot per call.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn fetch(&self) -> Result<WeatherDocument, FetchError>;
}

/// Construct a source from config and an explicit SourceKind.
pub fn source_from_config(
    kind: SourceKind,
    config: &Config,
) -> anyhow::Result<Box<dyn WeatherSource>> {
    let boxed: Box<dyn WeatherSource> = match kind {
        SourceKind::Endpoint => {
            let http = http_client(config.timeout())?;
            Box::new(EndpointSource::with_client(config.endpoint.url.clone(), http))
        }
        SourceKind::WeatherApi => Box::new(weatherapi_from_config(config)?),
        SourceKind::File => {
            let path = config.file.path.clone().ok_or_else(|| {
                anyhow::anyhow!(
                    "No file configured for source 'file'.\n\
                     Hint: pass `--file <PATH>` or set [file] path in the config."
                )
            })?;
            Box::new(FileSource::new(path))
        }
    };

    Ok(boxed)
}

/// Construct the default source from config, using the `default_source` field.
pub fn default_source_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherSource>> {
    let kind = config.default_source_kind()?;
    source_from_config(kind, config)
}

/// Build the weatherapi.com source with the configured key, location and timeout.
pub fn weatherapi_from_config(config: &Config) -> anyhow::Result<WeatherApiSource> {
    let api_key = config.weatherapi_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured for source 'weatherapi'.\n\
             Hint: run `weather-panel configure` or set {}.",
            crate::config::API_KEY_ENV
        )
    })?;
    let http = http_client(config.timeout())?;

    Ok(WeatherApiSource::with_client(api_key.to_owned(), http)
        .base_url(config.weatherapi.base_url.clone())
        .location(config.weatherapi.location.clone()))
}

fn http_client(timeout: Duration) -> anyhow::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))
}

/// Send a GET and decode the JSON body, mapping each failure onto [`FetchError`].
pub(crate) async fn get_json<T: serde::de::DeserializeOwned>(
    request: reqwest::RequestBuilder,
    url: &str,
) -> Result<T, FetchError> {
    // reqwest prints the full URL, query string and API key included.
    let transport = |source: reqwest::Error| FetchError::Transport {
        url: url.to_string(),
        source: source.without_url(),
    };

    tracing::debug!(%url, "fetching weather data");
    let res = request.send().await.map_err(transport)?;

    let status = res.status();
    let body = res.text().await.map_err(transport)?;

    if !status.is_success() {
        return Err(FetchError::Status { status, body: truncate_body(&body) });
    }

    Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
pub(crate) mod stub {
    //! One-shot loopback HTTP server for exercising the HTTP sources.

    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
        task::JoinHandle,
    };

    pub struct Stub {
        pub url: String,
        request: JoinHandle<String>,
    }

    impl Stub {
        /// Raw request line and headers the server received.
        pub async fn request(self) -> String {
            self.request.await.expect("stub task panicked")
        }
    }

    /// Client that ignores proxy settings from the environment.
    pub fn client() -> reqwest::Client {
        reqwest::Client::builder().no_proxy().build().unwrap()
    }

    pub async fn serve(status: &str, body: &str) -> Stub {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let response = format!(
            "HTTP/1.1 {status}\r\n\
             Content-Type: application/json\r\n\
             Content-Length: {}\r\n\
             Connection: close\r\n\r\n{body}",
            body.len()
        );

        let request = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let mut read = 0;
            while !buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf[read..]).await.unwrap();
                if n == 0 {
                    break;
                }
                read += n;
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&buf[..read]).into_owned()
        });

        Stub { url, request }
    }

    /// Accepts a connection and never answers it.
    pub async fn silent() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            std::future::pending::<()>().await;
        });

        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_kind_as_str_roundtrip() {
        for kind in SourceKind::all() {
            let parsed = SourceKind::try_from(kind.as_str()).expect("roundtrip should succeed");
            assert_eq!(*kind, parsed);
        }
    }

    #[test]
    fn unknown_source_error() {
        let err = SourceKind::try_from("doesnotexist").unwrap_err();
        assert!(err.to_string().contains("Unknown source"));
    }

    #[test]
    fn weatherapi_source_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = source_from_config(SourceKind::WeatherApi, &cfg).unwrap_err();
        assert!(err.to_string().contains("No API key configured for source"));
    }

    #[test]
    fn file_source_errors_when_no_path() {
        let cfg = Config::default();
        let err = source_from_config(SourceKind::File, &cfg).unwrap_err();
        assert!(err.to_string().contains("No file configured"));
    }

    #[test]
    fn default_source_from_config_uses_endpoint() {
        let cfg = Config::default();
        assert!(default_source_from_config(&cfg).is_ok());
    }

    #[test]
    fn weatherapi_from_config_carries_location_and_base() {
        let mut cfg = Config::default();
        cfg.upsert_weatherapi_key("KEY".to_string());
        cfg.weatherapi.location = "oslo".into();
        cfg.weatherapi.base_url = "http://weather.test/".into();

        let dbg = format!("{:?}", weatherapi_from_config(&cfg).unwrap());
        assert!(dbg.contains("oslo"));
        assert!(dbg.contains("\"http://weather.test\""));
    }

    #[tokio::test]
    async fn search_gives_up_after_configured_timeout() {
        let mut cfg = Config::default();
        cfg.upsert_weatherapi_key("KEY".to_string());
        cfg.weatherapi.base_url = stub::silent().await;
        cfg.timeout_secs = Some(1);

        let api = weatherapi_from_config(&cfg).unwrap();
        let res = tokio::time::timeout(Duration::from_secs(5), api.search("melb"))
            .await
            .expect("search should not outlive the client timeout");
        assert!(res.is_err());
    }

    #[test]
    fn default_source_from_config_works_when_key_set() {
        let mut cfg = Config::default();
        cfg.upsert_weatherapi_key("KEY".to_string());

        let source = default_source_from_config(&cfg);
        assert!(source.is_ok());
    }
}
