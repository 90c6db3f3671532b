// Collaborator implementations: live scraping, live AI, and preview fixtures
pub mod dify;
pub mod github;
pub mod preview;

pub use dify::DifyAnalyst;
pub use github::GitHubTrendingProvider;
pub use preview::{PreviewAnalyst, PreviewTrending};
