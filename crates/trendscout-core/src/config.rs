use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable holding the chat API key
pub const API_KEY_ENV: &str = "API_KEY";

/// Main configuration structure
///
/// This gets loaded from config file, env vars, and CLI args.
/// Priority: CLI > Env > File > Defaults (like a sensible person would do)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub trending: TrendingConfig,
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Load config from default location, or defaults if there is none
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load config from an explicit path; a missing file means defaults
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| {
            crate::Error::ConfigError(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Overlay environment variables on top of whatever the file said
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Same as `apply_env` but with a custom lookup (tests don't touch the real env)
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
            self.ai.api_key = Some(key);
        }
    }

    /// The API key, required unless running in preview mode
    pub fn require_api_key(&self) -> crate::Result<&str> {
        self.ai
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                crate::Error::MissingCredential(format!(
                    "set {} in the environment or a .env file",
                    API_KEY_ENV
                ))
            })
    }

    /// Get the config file path
    /// Uses XDG on Linux/macOS, AppData on Windows
    pub fn config_path() -> crate::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find config directory".into()))?
            .join("trendscout");

        Ok(config_dir.join("config.toml"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingConfig {
    /// Trending page to scrape
    #[serde(default = "default_trending_url")]
    pub base_url: String,

    /// Trending window: daily, weekly or monthly
    #[serde(default = "default_since")]
    pub since: String,
}

fn default_trending_url() -> String {
    "https://github.com/trending".to_string()
}

fn default_since() -> String {
    "daily".to_string()
}

impl Default for TrendingConfig {
    fn default() -> Self {
        Self {
            base_url: default_trending_url(),
            since: default_since(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// Chat API key - usually comes from the environment, not the file
    #[serde(default)]
    pub api_key: Option<String>,

    /// Chat endpoint (for self-hosted Dify)
    #[serde(default = "default_ai_endpoint")]
    pub endpoint: String,

    /// User id sent along with every query
    #[serde(default = "default_ai_user")]
    pub user: String,

    /// Give up on a query after this many seconds
    #[serde(default = "default_ai_timeout")]
    pub timeout_secs: u64,
}

fn default_ai_endpoint() -> String {
    "https://api.dify.ai/v1/chat-messages".to_string()
}

fn default_ai_user() -> String {
    "trendscout".to_string()
}

fn default_ai_timeout() -> u64 {
    200 // agent apps browse the repo first, so they are slow
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_ai_endpoint(),
            user: default_ai_user(),
            timeout_secs: default_ai_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Seconds on the language picker before auto-quit
    #[serde(default = "default_countdown")]
    pub countdown_secs: u32,

    /// Seconds the fetch error stays on screen before auto-quit
    #[serde(default = "default_error_countdown")]
    pub error_countdown_secs: u32,

    /// Progress animation frames per second
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
}

fn default_countdown() -> u32 {
    30
}

fn default_error_countdown() -> u32 {
    10
}

fn default_frame_rate() -> u32 {
    60
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            countdown_secs: default_countdown(),
            error_countdown_secs: default_error_countdown(),
            frame_rate: default_frame_rate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.ai.timeout_secs, 200);
        assert_eq!(config.ui.countdown_secs, 30);
        assert_eq!(config.ui.error_countdown_secs, 10);
        assert_eq!(config.ui.frame_rate, 60);
        assert_eq!(config.trending.base_url, "https://github.com/trending");
        assert!(config.ai.api_key.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [ui]
            countdown_secs = 5

            [ai]
            endpoint = "http://localhost/v1/chat-messages"
            "#,
        )
        .unwrap();

        assert_eq!(config.ui.countdown_secs, 5);
        assert_eq!(config.ui.frame_rate, 60);
        assert_eq!(config.ai.endpoint, "http://localhost/v1/chat-messages");
        assert_eq!(config.ai.timeout_secs, 200);
        assert_eq!(config.trending.since, "daily");
    }

    #[test]
    fn test_missing_file_means_defaults() {
        let config = Config::load_from(Path::new("/definitely/not/here/config.toml")).unwrap();
        assert_eq!(config.ui.countdown_secs, 30);
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config = Config::default();
        config.ai.api_key = Some("from-file".to_string());

        config.apply_env_from(|key| (key == API_KEY_ENV).then(|| "from-env".to_string()));
        assert_eq!(config.require_api_key().unwrap(), "from-env");
    }

    #[test]
    fn test_blank_env_is_ignored() {
        let mut config = Config::default();
        config.apply_env_from(|_| Some("   ".to_string()));

        assert!(config.ai.api_key.is_none());
        assert!(matches!(
            config.require_api_key(),
            Err(crate::Error::MissingCredential(_))
        ));
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("countdown_secs"));
        assert!(toml.contains("timeout_secs"));
    }
}
