// src/collect/types.rs
use anyhow::Result;

/// One upstream endpoint that yields raw text (titles, descriptions, suggestions).
///
/// Implementations return already-normalized text; tokenizing happens in the collector.
#[async_trait::async_trait]
pub trait TextFeed: Send + Sync {
    async fn fetch_texts(&self) -> Result<Vec<String>>;
    fn name(&self) -> &'static str;
}

/// A feed was configured without the credential it needs.
#[derive(Debug, thiserror::Error)]
#[error("missing credential: {0}")]
pub struct MissingCredential(pub &'static str);
