// Preview mode: canned data for both collaborators, no network needed
use async_trait::async_trait;
use std::time::Duration;
use trendscout_api::parse_trending;

use crate::{
    analysis::RepoAnalyst,
    language::Language,
    models::{AiAnswer, RepositoryRecord},
    providers::github::trending_to_record,
    trending::TrendingSource,
    Result,
};

/// A saved copy of the trending page, run through the real parser
const TRENDING_FIXTURE: &str = include_str!("../../fixtures/trending.html");

/// Long enough to see the progress bar and the "analyzing" message
const PREVIEW_DELAY: Duration = Duration::from_millis(800);

pub struct PreviewTrending {
    delay: Duration,
}

impl PreviewTrending {
    pub fn new() -> Self {
        Self::with_delay(PREVIEW_DELAY)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for PreviewTrending {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TrendingSource for PreviewTrending {
    async fn fetch(&self, _language: Language) -> Result<Vec<RepositoryRecord>> {
        tokio::time::sleep(self.delay).await;
        let repos = parse_trending(TRENDING_FIXTURE)?;
        Ok(repos.into_iter().map(trending_to_record).collect())
    }
}

pub struct PreviewAnalyst {
    delay: Duration,
}

impl PreviewAnalyst {
    pub fn new() -> Self {
        Self::with_delay(PREVIEW_DELAY)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for PreviewAnalyst {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RepoAnalyst for PreviewAnalyst {
    async fn analyze(&self, _repo_url: &str) -> Result<AiAnswer> {
        tokio::time::sleep(self.delay).await;
        Ok(sample_answer())
    }
}

/// The answer preview mode hands out for every repository
pub fn sample_answer() -> AiAnswer {
    AiAnswer {
        what: "Immich-Go is an open-source tool that uploads large photo collections to a self-hosted Immich server without needing NodeJS.".to_string(),
        why: vec![
            "Imports massive Google Photos Takeout archives while keeping their metadata.".to_string(),
            "Installs as a single binary, no NodeJS or Docker required.".to_string(),
            "Drops the lower-resolution duplicates Takeout tends to include.".to_string(),
        ],
        how: vec![
            "Talks to the server through the Immich REST API.".to_string(),
            "Reads photos from folders, folder trees and ZIP archives.".to_string(),
            "Groups related photos and recreates albums on the server.".to_string(),
        ],
        related: vec![
            "rclone".to_string(),
            "gphotos-uploader-cli".to_string(),
            "gphotos-sync".to_string(),
        ],
    }
}
