// GitHub trending page client - there is no API for this, so we scrape
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::debug;

const GITHUB_TRENDING_URL: &str = "https://github.com/trending";
const GITHUB_BASE_URL: &str = "https://github.com";

#[derive(Error, Debug)]
pub enum TrendingError {
    #[error("status code is not 200 (got {0})")]
    BadStatus(u16),

    #[error("Invalid selector {selector}: {reason}")]
    Selector { selector: &'static str, reason: String },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, TrendingError>;

/// One row of the trending page, exactly as the page shows it
///
/// Counts are kept as the raw text ("1,234", "56 stars today"); turning
/// them into numbers is the caller's business.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrendingRepo {
    pub full_name: String,
    pub html_url: String,
    pub description: String,
    pub language: String,
    pub stars: String,
    pub forks: String,
    pub stars_today: String,
}

pub struct TrendingClient {
    client: reqwest::Client,
    base_url: String,
}

impl TrendingClient {
    pub fn new() -> Self {
        Self::with_base_url(GITHUB_TRENDING_URL.to_string())
    }

    /// Point the client at a different trending page (mirrors, tests)
    pub fn with_base_url(base_url: String) -> Self {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("trendscout/0.1.0"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Page URL for a language slug; `None` means every language
    pub fn page_url(&self, language: Option<&str>, since: &str) -> String {
        match language {
            Some(slug) => format!("{}/{}?since={}", self.base_url, slug, since),
            None => self.base_url.clone(),
        }
    }

    /// Download the raw trending page
    pub async fn fetch_page(&self, language: Option<&str>, since: &str) -> Result<String> {
        let url = self.page_url(language, since);
        debug!(%url, "fetching trending page");

        let response = self.client.get(&url).send().await?;
        if response.status() != reqwest::StatusCode::OK {
            return Err(TrendingError::BadStatus(response.status().as_u16()));
        }

        Ok(response.text().await?)
    }

    /// Fetch and parse in one go
    pub async fn fetch_trending(
        &self,
        language: Option<&str>,
        since: &str,
    ) -> Result<Vec<TrendingRepo>> {
        let html = self.fetch_page(language, since).await?;
        parse_trending(&html)
    }
}

impl Default for TrendingClient {
    fn default() -> Self {
        Self::new()
    }
}

struct RowSelectors {
    row: Selector,
    link: Selector,
    description: Selector,
    language: Selector,
    stars: Selector,
    forks: Selector,
    stars_today: Selector,
}

impl RowSelectors {
    fn new() -> Result<Self> {
        Ok(Self {
            row: selector("article.Box-row")?,
            link: selector("h2 a[href]")?,
            description: selector("p.col-9")?,
            language: selector("[itemprop=\"programmingLanguage\"]")?,
            stars: selector("a[href$=\"/stargazers\"]")?,
            forks: selector("a[href$=\"/forks\"]")?,
            stars_today: selector("span.float-sm-right")?,
        })
    }
}

fn selector(css: &'static str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| TrendingError::Selector {
        selector: css,
        reason: e.to_string(),
    })
}

/// Parse the trending page into rows
///
/// Rows without a repository link are skipped; every other missing piece
/// just ends up as an empty string.
pub fn parse_trending(html: &str) -> Result<Vec<TrendingRepo>> {
    let selectors = RowSelectors::new()?;
    let doc = Html::parse_document(html);

    let repos = doc
        .select(&selectors.row)
        .filter_map(|row| parse_row(row, &selectors))
        .collect::<Vec<_>>();

    debug!(count = repos.len(), "parsed trending rows");
    Ok(repos)
}

fn parse_row(row: ElementRef<'_>, selectors: &RowSelectors) -> Option<TrendingRepo> {
    let href = row
        .select(&selectors.link)
        .next()
        .and_then(|a| a.value().attr("href"))?;
    let full_name = href.trim_start_matches('/').trim().to_string();
    if full_name.is_empty() {
        return None;
    }

    Some(TrendingRepo {
        html_url: format!("{}/{}", GITHUB_BASE_URL, full_name),
        full_name,
        description: first_text(row, &selectors.description),
        language: first_text(row, &selectors.language),
        stars: first_text(row, &selectors.stars),
        forks: first_text(row, &selectors.forks),
        stars_today: first_text(row, &selectors.stars_today),
    })
}

/// Text of the first match with all whitespace runs collapsed to single spaces
fn first_text(row: ElementRef<'_>, selector: &Selector) -> String {
    row.select(selector)
        .next()
        .map(|el| el.text().collect::<Vec<_>>().join(" "))
        .map(|text| text.split_whitespace().collect::<Vec<_>>().join(" "))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
<html><body>
<article class="Box-row">
  <h2 class="h3 lh-condensed">
    <a href="/tokio-rs/tokio" class="Link">
      <span class="text-normal">tokio-rs /</span> tokio
    </a>
  </h2>
  <p class="col-9 color-fg-muted my-1 pr-4">
    A runtime for writing reliable asynchronous applications with Rust.
  </p>
  <div class="f6 color-fg-muted mt-2">
    <span class="d-inline-block ml-0 mr-3">
      <span class="repo-language-color"></span>
      <span itemprop="programmingLanguage">Rust</span>
    </span>
    <a href="/tokio-rs/tokio/stargazers" class="Link d-inline-block mr-3">
      <svg></svg>
      27,845
    </a>
    <a href="/tokio-rs/tokio/forks" class="Link d-inline-block mr-3">
      <svg></svg>
      2,567
    </a>
    <span class="d-inline-block float-sm-right">
      <svg></svg>
      123 stars today
    </span>
  </div>
</article>
<article class="Box-row">
  <h2 class="h3 lh-condensed"><a href="/someone/no-description">someone / no-description</a></h2>
</article>
<article class="Box-row">
  <h2 class="h3 lh-condensed">no link here</h2>
</article>
</body></html>
"#;

    #[test]
    fn test_parse_full_row() {
        let repos = parse_trending(PAGE).unwrap();
        let tokio = &repos[0];

        assert_eq!(tokio.full_name, "tokio-rs/tokio");
        assert_eq!(tokio.html_url, "https://github.com/tokio-rs/tokio");
        assert_eq!(
            tokio.description,
            "A runtime for writing reliable asynchronous applications with Rust."
        );
        assert_eq!(tokio.language, "Rust");
        assert_eq!(tokio.stars, "27,845");
        assert_eq!(tokio.forks, "2,567");
        assert_eq!(tokio.stars_today, "123 stars today");
    }

    #[test]
    fn test_parse_skips_rows_without_link() {
        let repos = parse_trending(PAGE).unwrap();
        assert_eq!(repos.len(), 2);

        let sparse = &repos[1];
        assert_eq!(sparse.full_name, "someone/no-description");
        assert!(sparse.description.is_empty());
        assert!(sparse.stars.is_empty());
    }

    #[test]
    fn test_parse_empty_page() {
        let repos = parse_trending("<html><body></body></html>").unwrap();
        assert!(repos.is_empty());
    }

    #[test]
    fn test_page_url() {
        let client = TrendingClient::with_base_url("https://example.com/trending/".to_string());
        assert_eq!(client.page_url(None, "daily"), "https://example.com/trending");
        assert_eq!(
            client.page_url(Some("go"), "daily"),
            "https://example.com/trending/go?since=daily"
        );
    }

    #[test]
    fn test_bad_status_message() {
        let err = TrendingError::BadStatus(429);
        assert!(err.to_string().starts_with("status code is not 200"));
    }
}
