// Dify analyst - bridges the chat client with RepoAnalyst
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};
use trendscout_api::DifyClient;

use crate::{
    analysis::{build_prompt, parse_answer, RepoAnalyst, DEFAULT_ANALYSIS_TIMEOUT},
    config::AiConfig,
    models::AiAnswer,
    Error, Result,
};

pub struct DifyAnalyst {
    client: DifyClient,
    timeout: Duration,
}

impl DifyAnalyst {
    pub fn new(api_key: String, config: &AiConfig) -> Self {
        let timeout = match config.timeout_secs {
            0 => DEFAULT_ANALYSIS_TIMEOUT,
            secs => Duration::from_secs(secs),
        };

        Self {
            client: DifyClient::with_endpoint(api_key, config.user.clone(), config.endpoint.clone()),
            timeout,
        }
    }
}

#[async_trait]
impl RepoAnalyst for DifyAnalyst {
    async fn analyze(&self, repo_url: &str) -> Result<AiAnswer> {
        debug!(%repo_url, timeout_secs = self.timeout.as_secs(), "asking AI");
        let prompt = build_prompt(repo_url);

        let text = match tokio::time::timeout(self.timeout, self.client.chat(&prompt)).await {
            Ok(result) => result?,
            Err(_) => {
                warn!(%repo_url, "AI query timed out");
                return Err(Error::Timeout(self.timeout.as_secs()));
            }
        };

        parse_answer(&text)
    }
}
