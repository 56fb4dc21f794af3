use crate::core::{DocumentLoader, Result};
use crate::fixtures::{LEGACY_DOCUMENT, SAMPLE_DOCUMENT};
use crate::utils::error::Error;
use async_trait::async_trait;
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Serves a document held in memory.
#[derive(Debug, Clone)]
pub struct FixtureLoader {
    label: String,
    text: String,
}

impl FixtureLoader {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }

    pub fn sample() -> Self {
        Self::new("built-in sample", SAMPLE_DOCUMENT)
    }

    pub fn legacy() -> Self {
        Self::new("built-in legacy fixture", LEGACY_DOCUMENT)
    }
}

#[async_trait]
impl DocumentLoader for FixtureLoader {
    async fn load(&self) -> Result<String> {
        Ok(self.text.clone())
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}

#[derive(Debug, Clone)]
pub struct FileLoader {
    path: PathBuf,
}

impl FileLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DocumentLoader for FileLoader {
    async fn load(&self) -> Result<String> {
        tracing::debug!("Reading descriptor from {}", self.path.display());
        let text = tokio::fs::read_to_string(&self.path).await?;
        Ok(text)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// Fetches the document with a single GET. No retries.
#[derive(Debug, Clone)]
pub struct HttpLoader {
    client: Client,
    url: Url,
    timeout: Duration,
}

impl HttpLoader {
    pub fn new(url: Url, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            url,
            timeout,
        }
    }
}

#[async_trait]
impl DocumentLoader for HttpLoader {
    async fn load(&self) -> Result<String> {
        tracing::debug!("Fetching descriptor from {}", self.url);
        let response = self
            .client
            .get(self.url.clone())
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Descriptor source answered {}", status);
        if !status.is_success() {
            return Err(Error::UpstreamStatus {
                url: self.url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }

    fn describe(&self) -> String {
        format!("url {}", self.url)
    }
}
