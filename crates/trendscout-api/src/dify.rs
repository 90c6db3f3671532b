// Dify chat-messages client
//
// Dify only streams in "streaming" mode for agent apps, so we always ask for
// a stream and stitch the `answer` pieces back together ourselves.
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

const DIFY_CHAT_ENDPOINT: &str = "https://api.dify.ai/v1/chat-messages";

#[derive(Error, Debug)]
pub enum DifyError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Authentication failed - check the API key")]
    AuthRequired,

    #[error("Stream reported an error: {0}")]
    StreamError(String),

    #[error("Stream ended without an answer")]
    EmptyAnswer,

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    ParseError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DifyError>;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    inputs: serde_json::Map<String, serde_json::Value>,
    query: &'a str,
    response_mode: &'static str,
    conversation_id: &'static str,
    user: &'a str,
}

/// One `data:` line of the event stream
///
/// Dify sends a dozen event kinds; we only care about the text pieces
/// and errors, everything else deserializes to `None`s and is skipped.
#[derive(Debug, Deserialize)]
struct StreamChunk {
    event: Option<String>,
    answer: Option<String>,
    message: Option<String>,
}

pub struct DifyClient {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    user: String,
}

impl DifyClient {
    pub fn new(api_key: String, user: String) -> Self {
        Self::with_endpoint(api_key, user, DIFY_CHAT_ENDPOINT.to_string())
    }

    /// For self-hosted Dify instances
    pub fn with_endpoint(api_key: String, user: String, endpoint: String) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            api_key,
            endpoint,
            user,
        }
    }

    /// Send one query and return the complete answer text
    pub async fn chat(&self, query: &str) -> Result<String> {
        let body = ChatRequest {
            inputs: serde_json::Map::new(),
            query,
            response_mode: "streaming",
            conversation_id: "",
            user: &self.user,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if response.status() == 401 {
            return Err(DifyError::AuthRequired);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DifyError::RequestFailed(format!(
                "Status {}: {}",
                status, body
            )));
        }

        let stream = response.text().await?;
        decode_stream(&stream)
    }
}

/// Concatenate the `answer` pieces of a server-sent event stream
pub fn decode_stream(stream: &str) -> Result<String> {
    let mut answer = String::new();

    for line in stream.lines() {
        let payload = line.strip_prefix("data:").unwrap_or(line).trim();
        if payload.is_empty() || !payload.starts_with('{') {
            continue;
        }

        let chunk: StreamChunk = match serde_json::from_str(payload) {
            Ok(chunk) => chunk,
            Err(e) => {
                // Keep-alive pings and partial lines, not worth failing over
                debug!(error = %e, "skipping undecodable stream line");
                continue;
            }
        };

        if chunk.event.as_deref() == Some("error") {
            let message = chunk.message.unwrap_or_else(|| "unknown error".to_string());
            warn!(%message, "chat stream reported an error");
            return Err(DifyError::StreamError(message));
        }

        if let Some(piece) = chunk.answer {
            answer.push_str(&piece);
        }
    }

    if answer.trim().is_empty() {
        return Err(DifyError::EmptyAnswer);
    }

    Ok(answer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_concatenates_answer_pieces() {
        let stream = concat!(
            "data: {\"event\": \"agent_message\", \"answer\": \"{\\\"what\\\":\"}\n",
            "\n",
            "data: {\"event\": \"agent_thought\", \"thought\": \"thinking\"}\n",
            "data: {\"event\": \"agent_message\", \"answer\": \" \\\"a tool\\\"}\"}\n",
            "event: ping\n",
            "data: {\"event\": \"message_end\"}\n",
        );

        let answer = decode_stream(stream).unwrap();
        assert_eq!(answer, "{\"what\": \"a tool\"}");
    }

    #[test]
    fn test_decode_surfaces_stream_errors() {
        let stream = "data: {\"event\": \"error\", \"message\": \"quota exceeded\"}\n";
        let err = decode_stream(stream).unwrap_err();
        assert!(matches!(err, DifyError::StreamError(ref m) if m == "quota exceeded"));
    }

    #[test]
    fn test_decode_empty_stream() {
        assert!(matches!(decode_stream(""), Err(DifyError::EmptyAnswer)));
        assert!(matches!(
            decode_stream("data: {\"event\": \"message_end\"}\n"),
            Err(DifyError::EmptyAnswer)
        ));
    }

    #[test]
    fn test_decode_skips_garbage_lines() {
        let stream = "data: {not json\ndata: {\"answer\": \"ok\"}\n";
        assert_eq!(decode_stream(stream).unwrap(), "ok");
    }

    #[test]
    fn test_request_shape() {
        let body = ChatRequest {
            inputs: serde_json::Map::new(),
            query: "hello",
            response_mode: "streaming",
            conversation_id: "",
            user: "trendscout",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["response_mode"], "streaming");
        assert_eq!(json["query"], "hello");
        assert!(json["inputs"].as_object().unwrap().is_empty());
    }
}
