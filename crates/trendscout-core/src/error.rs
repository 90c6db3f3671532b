use thiserror::Error;
use trendscout_api::{DifyError, TrendingError};

/// All the ways things can go wrong in trendscout
///
/// Errors cross from background tasks into the UI loop, so everything in
/// here has to stay `Send`.
#[derive(Error, Debug)]
pub enum Error {
    #[error("fetch failed: {0}")]
    FetchError(String),

    #[error("page parsing failed: {0}")]
    ParseError(String),

    #[error("AI analysis failed: {0}")]
    AnalysisError(String),

    #[error("AI analysis timed out after {0} seconds")]
    Timeout(u64),

    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<TrendingError> for Error {
    fn from(err: TrendingError) -> Self {
        match err {
            TrendingError::Selector { .. } => Error::ParseError(err.to_string()),
            other => Error::FetchError(other.to_string()),
        }
    }
}

impl From<DifyError> for Error {
    fn from(err: DifyError) -> Self {
        Error::AnalysisError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_status_keeps_page_message() {
        let err: Error = TrendingError::BadStatus(503).into();
        assert!(matches!(err, Error::FetchError(_)));
        assert!(err.to_string().contains("status code is not 200"));
    }

    #[test]
    fn test_dify_errors_become_analysis_errors() {
        let err: Error = DifyError::EmptyAnswer.into();
        assert!(matches!(err, Error::AnalysisError(_)));
    }
}
