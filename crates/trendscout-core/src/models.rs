use serde::{Deserialize, Serialize};

/// One trending repository - read-only once scraped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    /// owner/repo
    pub name: String,
    /// Canonical URL, doubles as the unique key
    pub url: String,
    pub description: String,
    pub language: String,
    pub stars: u32,
    pub forks: u32,
    /// Stars gained today (or this week/month, depending on `since`)
    pub stars_today: u32,
}

/// What the AI had to say about a repository
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiAnswer {
    /// One-line summary
    #[serde(default)]
    pub what: String,
    /// Pain points the project solves
    #[serde(default)]
    pub why: Vec<String>,
    /// Key techniques it's built with
    #[serde(default)]
    pub how: Vec<String>,
    /// Well-known similar projects
    #[serde(default, rename = "other", alias = "related")]
    pub related: Vec<String>,
}

/// Pull the first number out of page text like "1,234" or "56 stars today"
///
/// Anything without digits counts as zero; the page isn't ours to validate.
pub fn parse_count(text: &str) -> u32 {
    let digits: String = text
        .trim()
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit() || *c == ',')
        .filter(|c| c.is_ascii_digit())
        .collect();

    digits.parse().unwrap_or(0)
}

/// 1234567 -> "1,234,567"
pub fn format_count(count: u32) -> String {
    let raw = count.to_string();
    let mut out = String::with_capacity(raw.len() + raw.len() / 3);

    for (i, c) in raw.chars().enumerate() {
        if i > 0 && (raw.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("27,845"), 27845);
        assert_eq!(parse_count("123 stars today"), 123);
        assert_eq!(parse_count("  1,002 stars this week "), 1002);
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("n/a"), 0);
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn test_answer_accepts_other_and_related() {
        let from_other: AiAnswer =
            serde_json::from_str(r#"{"what":"x","why":[],"how":[],"other":["a"]}"#).unwrap();
        let from_related: AiAnswer = serde_json::from_str(r#"{"related":["a"]}"#).unwrap();

        assert_eq!(from_other.related, vec!["a".to_string()]);
        assert_eq!(from_related.related, from_other.related);
        assert!(from_related.what.is_empty());
    }
}
