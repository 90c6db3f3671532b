// AI repository analysis: the trait, the prompt, and answer parsing
use crate::{models::AiAnswer, Error, Result};
use std::time::Duration;

/// Used when the caller doesn't bring its own deadline
pub const DEFAULT_ANALYSIS_TIMEOUT: Duration = Duration::from_secs(200);

/// Something that can explain a repository given its URL
#[async_trait::async_trait]
pub trait RepoAnalyst: Send + Sync {
    async fn analyze(&self, repo_url: &str) -> Result<AiAnswer>;
}

const PROMPT_TEMPLATE: &str = r#"You are a GitHub code analyst. Look at the repository at {url} and describe it.
Reply with a single JSON object and nothing else, shaped exactly like this:
{
  "what": "one sentence saying what the project is",
  "why": ["pain point it solves", "..."],
  "how": ["key technique or technology it uses", "..."],
  "other": ["name of a well-known similar project", "..."]
}
If implementation details are not available, describe the usual design of this kind of project.
Keep the bullet points short and do not repeat yourself."#;

/// Build the query sent to the chat API
pub fn build_prompt(repo_url: &str) -> String {
    PROMPT_TEMPLATE.replace("{url}", repo_url)
}

/// Parse the model's reply into an answer
///
/// Models like to wrap JSON in prose or code fences, so we take everything
/// from the first `{` to the last `}` and parse that.
pub fn parse_answer(text: &str) -> Result<AiAnswer> {
    let start = text.find('{');
    let end = text.rfind('}');

    let json = match (start, end) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => {
            return Err(Error::AnalysisError(
                "answer does not contain a JSON object".to_string(),
            ))
        }
    };

    let answer: AiAnswer = serde_json::from_str(json)?;
    if answer.why.is_empty() && answer.how.is_empty() && answer.related.is_empty() {
        return Err(Error::AnalysisError("answer is empty".to_string()));
    }

    Ok(answer)
}
