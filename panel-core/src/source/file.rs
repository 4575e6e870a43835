use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::{FetchError, WeatherDocument};

use super::WeatherSource;

/// Reads a saved weather document from disk, handy for offline debugging.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl WeatherSource for FileSource {
    async fn fetch(&self) -> Result<WeatherDocument, FetchError> {
        tracing::debug!(path = %self.path.display(), "reading weather document");
        let body = tokio::fs::read_to_string(&self.path).await.map_err(|source| FetchError::Io {
            path: self.path.display().to_string(),
            source,
        })?;

        Ok(WeatherDocument::from_json(&body)?)
    }
}
