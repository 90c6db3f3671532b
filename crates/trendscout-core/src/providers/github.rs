// GitHub trending provider - bridges the page scraper with TrendingSource
use async_trait::async_trait;
use tracing::debug;
use trendscout_api::{TrendingClient, TrendingRepo};

use crate::{
    config::TrendingConfig,
    language::Language,
    models::{parse_count, RepositoryRecord},
    trending::TrendingSource,
    Result,
};

/// Wrapper around TrendingClient that implements TrendingSource
pub struct GitHubTrendingProvider {
    client: TrendingClient,
    since: String,
}

impl GitHubTrendingProvider {
    pub fn new(config: &TrendingConfig) -> Self {
        Self {
            client: TrendingClient::with_base_url(config.base_url.clone()),
            since: config.since.clone(),
        }
    }
}

#[async_trait]
impl TrendingSource for GitHubTrendingProvider {
    async fn fetch(&self, language: Language) -> Result<Vec<RepositoryRecord>> {
        let repos = self
            .client
            .fetch_trending(language.filter(), &self.since)
            .await?;

        debug!(%language, count = repos.len(), "trending page scraped");
        Ok(repos.into_iter().map(trending_to_record).collect())
    }
}

/// Convert a scraped row to our internal record
pub(crate) fn trending_to_record(repo: TrendingRepo) -> RepositoryRecord {
    RepositoryRecord {
        name: repo.full_name,
        url: repo.html_url,
        description: repo.description,
        language: repo.language,
        stars: parse_count(&repo.stars),
        forks: parse_count(&repo.forks),
        stars_today: parse_count(&repo.stars_today),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_are_parsed() {
        let record = trending_to_record(TrendingRepo {
            full_name: "tokio-rs/tokio".to_string(),
            html_url: "https://github.com/tokio-rs/tokio".to_string(),
            description: "runtime".to_string(),
            language: "Rust".to_string(),
            stars: "27,845".to_string(),
            forks: "2,567".to_string(),
            stars_today: "123 stars today".to_string(),
        });

        assert_eq!(record.name, "tokio-rs/tokio");
        assert_eq!(record.stars, 27845);
        assert_eq!(record.forks, 2567);
        assert_eq!(record.stars_today, 123);
    }
}
