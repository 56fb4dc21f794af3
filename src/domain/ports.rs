use crate::utils::error::Result;
use async_trait::async_trait;

/// Produces the raw text of a descriptor document.
#[async_trait]
pub trait DocumentLoader: Send + Sync {
    async fn load(&self) -> Result<String>;

    /// Human readable origin of the document, for logs.
    fn describe(&self) -> String;
}
