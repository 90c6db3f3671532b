// Clients for the outside world: the trending page and the chat API
pub mod dify;
pub mod trending;

// Re-export common types
pub use dify::{DifyClient, DifyError};
pub use trending::{parse_trending, TrendingClient, TrendingError, TrendingRepo};
