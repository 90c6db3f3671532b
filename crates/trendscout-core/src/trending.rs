// Trending repositories discovery
use crate::{language::Language, models::RepositoryRecord, Result};

/// Where trending repositories come from
///
/// The real thing scrapes the trending page, preview mode reads a fixture,
/// tests plug in whatever they like. Implementations get called from a
/// background task, so they must not share mutable state with the caller.
#[async_trait::async_trait]
pub trait TrendingSource: Send + Sync {
    async fn fetch(&self, language: Language) -> Result<Vec<RepositoryRecord>>;
}
