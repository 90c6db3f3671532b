// Core business logic lives here - the brain of the operation
pub mod analysis;
pub mod config;
pub mod error;
pub mod language;
pub mod models;
pub mod providers;
pub mod trending;

pub use analysis::RepoAnalyst;
pub use config::Config;
pub use error::Error;
pub use language::Language;
pub use models::{AiAnswer, RepositoryRecord};
pub use trending::TrendingSource;

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
